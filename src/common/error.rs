use miette::Diagnostic;
use thiserror::Error;

use crate::core::types::Value;

/// A value whose kind does not match the destination it was scanned into.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("expected {expected}, but got {got} of type {}", .got.kind())]
#[diagnostic(code(rowscan::scan::type_mismatch))]
pub struct TypeError {
    /// Name of the type the destination expects.
    pub expected: &'static str,

    /// The offending row value.
    pub got: Value,
}

impl TypeError {
    pub fn new(expected: &'static str, got: Value) -> Self {
        Self { expected, got }
    }
}

/// Failure to copy a row into a set of destinations.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ScanError {
    #[error("row has {row_len} values but {dest_len} destinations were given")]
    #[diagnostic(code(rowscan::scan::length_mismatch))]
    LengthMismatch { row_len: usize, dest_len: usize },

    #[error("position {position}: {source}")]
    #[diagnostic(code(rowscan::scan::type_mismatch))]
    Type {
        position: usize,
        #[source]
        source: TypeError,
    },

    #[error("no row to scan at cursor {} of {len} rows", display_position(.position))]
    #[diagnostic(
        code(rowscan::scan::out_of_range),
        help("call next() and check that it returned true before scanning")
    )]
    OutOfRange { position: Option<usize>, len: usize },

    #[error("scanning into {type_name} is not supported (position {position})")]
    #[diagnostic(
        code(rowscan::scan::unsupported_type),
        help("implement CustomSlot::assign for this type")
    )]
    UnsupportedType {
        type_name: &'static str,
        position: usize,
    },
}

impl ScanError {
    /// The type error behind this failure, if it is one.
    pub fn as_type_error(&self) -> Option<&TypeError> {
        match self {
            ScanError::Type { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn display_position(position: &Option<usize>) -> String {
    match position {
        Some(position) => position.to_string(),
        None => "before-first".to_owned(),
    }
}

/// Errors surfaced by row sequences and statement executors.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] ScanError),

    /// A driver-level failure independent of any single row, such as a
    /// broken connection mid-fetch.
    #[error("fetch failed: {0}")]
    #[diagnostic(code(rowscan::fetch))]
    Fetch(String),

    /// A mock executor was called with nothing scripted for that operation.
    #[error("no scripted response left for {op}")]
    #[diagnostic(
        code(rowscan::exec::unscripted),
        help("push a response onto the mock executor before calling it")
    )]
    Unscripted { op: &'static str },
}

impl Error {
    /// Builds a fetch error, typically to inject into a mock row sequence.
    pub fn fetch(message: impl Into<String>) -> Self {
        Error::Fetch(message.into())
    }
}

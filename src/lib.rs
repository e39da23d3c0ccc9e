//! Mock rows and a typed scan decoder for unit-testing database access code.
//!
//! Application code is written against the [`Row`] and [`Rows`] traits (and
//! [`Execer`] for issuing statements). Tests hand it [`MockRow`]s and
//! [`MockRows`] built from literal values; production code hands it a
//! driver adapter implementing the same traits.
//!
//! ```
//! use rowscan::{Error, FromRow, MockRows, Row, ScanError, dests, row, scan_all};
//!
//! #[derive(Debug, PartialEq)]
//! struct Data {
//!     id: u64,
//!     name: String,
//! }
//!
//! impl FromRow for Data {
//!     fn from_row<R: Row + ?Sized>(row: &R) -> Result<Self, ScanError> {
//!         let mut id = 0u64;
//!         let mut name: Option<String> = None;
//!         row.scan(&mut dests![&mut id, &mut name])?;
//!         Ok(Data { id, name: name.unwrap_or_default() })
//!     }
//! }
//!
//! let mut rows = MockRows::new([row![123u64, "JP"], row![1234u64, "George"]]);
//! let data: Vec<Data> = scan_all(&mut rows)?;
//! assert_eq!(data[1], Data { id: 1234, name: "George".to_string() });
//! # Ok::<(), Error>(())
//! ```

pub(crate) mod common;
pub(crate) mod core;
pub(crate) mod db;

pub use common::error::{Error, ScanError, TypeError};
pub use crate::core::types::{Value, ValueKind};
pub use db::{
    batch::{FromRow, scan_all, scan_all_with},
    decode::scan_values,
    destination::{CustomSlot, Destination, DestinationKind, Rejection},
    exec::{ExecCloser, ExecResult, Execer, MockExecer, Op, Statement},
    row::{MockRow, Row},
    rows::{MockRows, Rows},
};

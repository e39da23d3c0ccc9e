use tracing::debug;

use crate::{
    common::error::ScanError,
    core::types::Value,
    db::{decode::scan_values, destination::Destination},
};

/// Anything that can copy a single record into typed destinations.
///
/// Implemented by [`MockRow`] and [`MockRows`](crate::MockRows); a driver
/// adapter implements it for its own row type so that decoding code can be
/// written once against this trait.
pub trait Row {
    /// Copies each column into the destination at the same position.
    fn scan(&self, dest: &mut [Destination<'_>]) -> Result<(), ScanError>;
}

impl<R: Row + ?Sized> Row for &R {
    fn scan(&self, dest: &mut [Destination<'_>]) -> Result<(), ScanError> {
        (**self).scan(dest)
    }
}

impl<R: Row + ?Sized> Row for &mut R {
    fn scan(&self, dest: &mut [Destination<'_>]) -> Result<(), ScanError> {
        (**self).scan(dest)
    }
}

/// A literal database row.
///
/// Rows are ordered collections of values; their length is fixed once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MockRow {
    values: Vec<Value>,
}

impl MockRow {
    /// Creates a new row from a vector of values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Gets a reference to the value at the given column index.
    pub fn get_value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Row for MockRow {
    fn scan(&self, dest: &mut [Destination<'_>]) -> Result<(), ScanError> {
        scan_values(&self.values, dest).inspect_err(|err| debug!(%err, "mock row scan failed"))
    }
}

impl From<Vec<Value>> for MockRow {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Value> for MockRow {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Builds a [`MockRow`] from anything convertible into [`Value`].
///
/// ```
/// use rowscan::{Value, row};
///
/// let row = row![123u64, "JP", None::<i64>];
/// assert_eq!(row.get_value(2), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::MockRow::new(vec![$($crate::Value::from($value)),*])
    };
}

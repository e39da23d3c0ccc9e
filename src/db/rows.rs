use tracing::{debug, trace};

use crate::{
    common::error::{Error, ScanError},
    db::{
        destination::Destination,
        row::{MockRow, Row},
    },
};

/// A forward-only cursor over a query result.
///
/// The calling protocol follows database drivers: call [`Rows::next`] and
/// scan while it returns `true`, then check [`Rows::err`] once the cursor is
/// exhausted. [`Row::scan`] reads the row under the cursor.
pub trait Rows: Row {
    /// Advances to the next row, returning `false` once there are none left.
    fn next(&mut self) -> bool;

    /// The error that ended iteration early, if any.
    fn err(&self) -> Option<Error>;

    /// Releases the result set. Safe to call more than once.
    fn close(&mut self) -> Result<(), Error>;
}

impl<R: Rows + ?Sized> Rows for &mut R {
    fn next(&mut self) -> bool {
        (**self).next()
    }

    fn err(&self) -> Option<Error> {
        (**self).err()
    }

    fn close(&mut self) -> Result<(), Error> {
        (**self).close()
    }
}

/// An in-memory result set for tests.
///
/// The cursor starts before the first row. A fetch error can be injected to
/// simulate a driver failure, and [`MockRows::is_closed`] tells a test
/// whether the code under test closed the set.
#[derive(Debug, Clone, Default)]
pub struct MockRows {
    rows: Vec<MockRow>,

    /// `None` until the first call to `next`.
    cursor: Option<usize>,

    error: Option<Error>,
    closed: bool,
}

impl MockRows {
    /// Creates a result set over `rows`, positioned before the first row.
    pub fn new(rows: impl IntoIterator<Item = MockRow>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            cursor: None,
            error: None,
            closed: false,
        }
    }

    /// Injects the error reported by [`Rows::err`].
    pub fn with_error(mut self, error: Error) -> Self {
        self.error = Some(error);
        self
    }

    pub fn set_error(&mut self, error: Error) {
        self.error = Some(error);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current cursor position; `None` before the first `next`.
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row under the cursor.
    pub fn current(&self) -> Option<&MockRow> {
        self.cursor.and_then(|index| self.rows.get(index))
    }
}

impl Row for MockRows {
    fn scan(&self, dest: &mut [Destination<'_>]) -> Result<(), ScanError> {
        let row = self.current().ok_or(ScanError::OutOfRange {
            position: self.cursor,
            len: self.rows.len(),
        })?;
        row.scan(dest)
    }
}

impl Rows for MockRows {
    fn next(&mut self) -> bool {
        let next = self.cursor.map_or(0, |index| index.saturating_add(1));
        self.cursor = Some(next);
        trace!(position = next, len = self.rows.len(), "advanced mock rows");

        !self.rows.is_empty() && next < self.rows.len()
    }

    fn err(&self) -> Option<Error> {
        self.error.clone()
    }

    fn close(&mut self) -> Result<(), Error> {
        if !self.closed {
            debug!(position = ?self.cursor, "closing mock rows");
        }
        self.closed = true;
        Ok(())
    }
}

impl FromIterator<MockRow> for MockRows {
    fn from_iter<I: IntoIterator<Item = MockRow>>(iter: I) -> Self {
        Self::new(iter)
    }
}

use tracing::debug;

use crate::{
    common::error::{Error, ScanError},
    db::{row::Row, rows::Rows},
};

/// A record that can be decoded from one row.
pub trait FromRow: Sized {
    fn from_row<R: Row + ?Sized>(row: &R) -> Result<Self, ScanError>;
}

/// Drains `rows`, decoding every row with `decode`.
///
/// A decode failure closes `rows` and is returned immediately; records
/// decoded so far are dropped. A failing `close` is logged and does not
/// replace the decode error. Once the cursor is exhausted the sequence's
/// own error, if any, takes precedence over the collected records.
pub fn scan_all_with<R, T, F>(rows: &mut R, mut decode: F) -> Result<Vec<T>, Error>
where
    R: Rows + ?Sized,
    F: FnMut(&R) -> Result<T, ScanError>,
{
    let mut records = Vec::new();

    while rows.next() {
        match decode(&*rows) {
            Ok(record) => records.push(record),
            Err(err) => {
                debug!(%err, decoded = records.len(), "aborting batch decode");
                if let Err(close_err) = rows.close() {
                    debug!(%close_err, "closing rows after scan error failed");
                }
                return Err(err.into());
            }
        }
    }

    match rows.err() {
        Some(err) => Err(err),
        None => Ok(records),
    }
}

/// Drains `rows` into records of type `T`. See [`scan_all_with`].
pub fn scan_all<T: FromRow, R: Rows + ?Sized>(rows: &mut R) -> Result<Vec<T>, Error> {
    scan_all_with(rows, |row| T::from_row(row))
}

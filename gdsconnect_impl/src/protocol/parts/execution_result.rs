use crate::protocol::parts::Row;

/// Describes the success of an execution.
#[derive(Clone, Debug)]
pub enum ExecutionResult {
    /// A cursor was opened; fetch its rows from the statement.
    Cursor,
    /// The statement produced at most one row, which is returned directly
    /// (`EXECUTE PROCEDURE`, DML with `RETURNING`).
    Singleton(Option<Row>),
    /// Number of rows that were inserted, updated or deleted.
    RowsAffected(u64),
    /// Command was successful and produces neither rows nor counts (e.g. DDL).
    Success,
}

impl ExecutionResult {
    /// True if it is an instance of `Self::Cursor`.
    #[must_use]
    pub fn is_cursor(&self) -> bool {
        matches!(self, Self::Cursor)
    }

    /// Returns the count of affected rows, if this is a `RowsAffected`.
    #[must_use]
    pub fn rows_affected(&self) -> Option<u64> {
        match *self {
            Self::RowsAffected(count) => Some(count),
            _ => None,
        }
    }

    /// Converts into the returned row of a singleton execution.
    #[must_use]
    pub fn into_singleton(self) -> Option<Row> {
        match self {
            Self::Singleton(row) => row,
            _ => None,
        }
    }
}

impl std::fmt::Display for ExecutionResult {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::Cursor => writeln!(fmt, "Cursor opened"),
            Self::Singleton(Some(ref row)) => writeln!(fmt, "Returned row: {row}"),
            Self::Singleton(None) => writeln!(fmt, "No row returned"),
            Self::RowsAffected(count) => writeln!(fmt, "Number of affected rows: {count}"),
            Self::Success => writeln!(fmt, "Command successfully executed"),
        }
    }
}

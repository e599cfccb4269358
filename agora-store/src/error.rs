//! Structured error types for agora-store.
//!
//! Library consumers get composable `thiserror` variants; binary crates can
//! still wrap these in whatever reporting layer they prefer.

use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The driver rejected a statement or the store is unreachable
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Creating the database file's parent directory failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `update` was called on a record that was never inserted
    #[error("cannot update unsaved {table} record: no id assigned")]
    MissingId { table: &'static str },
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_display() {
        let err = StoreError::MissingId { table: "users" };
        assert_eq!(
            err.to_string(),
            "cannot update unsaved users record: no id assigned"
        );
    }
}

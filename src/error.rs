//! Error types for the import pipeline.
//!
//! Errors are classified by blast radius:
//! - Structural: a required column cannot be resolved — the whole import
//!   aborts before any write.
//! - Write: the persistent store rejected the batch — fatal, the store's
//!   message is surfaced verbatim.
//!
//! Row-level problems (unknown agent, unparseable number) are deliberately
//! NOT variants here: they are accumulated as strings per row, valid rows
//! still import, and the caller reports them in the trailing summary.

use thiserror::Error;

/// Fatal errors from an import run.
#[derive(Debug, Error)]
pub enum ImportError {
    /// One or more required semantic columns could not be resolved from the
    /// header row. Lists the unresolved field names.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The store rejected the batch write. The whole batch is considered
    /// failed; no partial-write assumption is made.
    #[error("{0}")]
    Write(String),
}

impl ImportError {
    /// True when the error happened before any side effect was issued.
    pub fn aborted_before_write(&self) -> bool {
        matches!(self, ImportError::MissingColumns(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_names_fields() {
        let err = ImportError::MissingColumns(vec![
            "agent name".to_string(),
            "calls".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required column(s): agent name, calls"
        );
        assert!(err.aborted_before_write());
    }

    #[test]
    fn test_write_error_surfaces_store_message_verbatim() {
        let err = ImportError::Write("UNIQUE constraint failed".to_string());
        assert_eq!(err.to_string(), "UNIQUE constraint failed");
        assert!(!err.aborted_before_write());
    }
}

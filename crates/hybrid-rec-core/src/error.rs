//! Error types for the recommendation engine

use thiserror::Error;

use crate::types::RecommendMode;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error types
///
/// Lookups that find nothing (unknown course, user without ratings or
/// sector) are not errors: they resolve to an empty recommendation list.
#[derive(Error, Debug)]
pub enum Error {
    // Data source errors
    #[error("{table} source is missing required column '{column}' (found: {found})")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
        found: String,
    },

    #[error("{table} source, row {row}: invalid value '{value}' in column '{column}'")]
    InvalidRecord {
        table: &'static str,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Request errors
    #[error("{mode} recommendations require '{parameter}'")]
    MissingParameter {
        mode: RecommendMode,
        parameter: &'static str,
    },

    #[error("Invalid request parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

impl Error {
    /// Returns true if the engine cannot be constructed after this error
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::MissingParameter { .. } | Error::InvalidParameter { .. }
        )
    }

    /// Returns a stable error code for logs and JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::MissingColumn { .. } => "MISSING_COLUMN",
            Error::InvalidRecord { .. } => "INVALID_RECORD",
            #[cfg(feature = "csv")]
            Error::Csv(_) => "CSV",
            Error::Io(_) => "IO",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::MissingParameter { .. } => "MISSING_PARAMETER",
            Error::InvalidParameter { .. } => "INVALID_PARAMETER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_are_not_fatal() {
        let err = Error::MissingParameter {
            mode: RecommendMode::Collaborative,
            parameter: "user_id",
        };
        assert!(!err.is_fatal());
        assert_eq!(err.error_code(), "MISSING_PARAMETER");
        assert_eq!(
            err.to_string(),
            "collaborative recommendations require 'user_id'"
        );
    }

    #[test]
    fn test_source_errors_are_fatal() {
        let err = Error::MissingColumn {
            table: "catalog",
            column: "name",
            found: "id, description".to_string(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.error_code(), "MISSING_COLUMN");
        assert!(err.to_string().contains("'name'"));
    }
}

// ❗ Error taxonomy for the transform pipeline
// Every variant is fatal: the run halts and the error is surfaced as-is.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    /// Input file absent or unreadable
    #[error("Failed to open source file {}: {source}", path.display())]
    MissingSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header row lacks one or more expected columns
    #[error("Source file {} is missing columns: {}", path.display(), missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },

    #[error("Failed to parse CSV line {line} in {}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// Month abbreviation outside the jan..dec table
    #[error("Cannot synthesize contact date for client {client_id}: unknown month {month:?}")]
    UnknownMonth { client_id: i64, month: String },

    /// Composed "2022-MM-DD" string is not a real calendar date
    #[error("Cannot synthesize contact date for client {client_id}: {date:?} is not a valid date")]
    InvalidDate {
        client_id: i64,
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read back {}: {source}", path.display())]
    ReadBack {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_lists_every_missing_column() {
        let err = EtlError::SchemaMismatch {
            path: PathBuf::from("data/raw/bank_marketing.csv"),
            missing: vec!["month".to_string(), "day".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("bank_marketing.csv"));
        assert!(msg.contains("month, day"));
    }

    #[test]
    fn test_unknown_month_names_client_and_value() {
        let err = EtlError::UnknownMonth {
            client_id: 12,
            month: "sept".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot synthesize contact date for client 12: unknown month \"sept\""
        );
    }
}

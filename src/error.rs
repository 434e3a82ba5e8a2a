//! Error types for exp_violin

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for loading, aggregating and rendering
#[derive(Error, Debug)]
pub enum ExpError {
    #[error("Cannot access {}: {}", .path.display(), .source)]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {context} at line {line}: {reason}")]
    Parse {
        context: String,
        line: usize,
        reason: String,
    },

    #[error("log2(x+1) is undefined for value {value} of gene {gene_id}")]
    LogDomain { gene_id: String, value: f64 },

    #[error("Rendering {path} failed: {reason}")]
    Render { path: String, reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON writing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ExpError {
    pub(crate) fn parse(context: &str, line: usize, reason: impl Into<String>) -> Self {
        ExpError::Parse {
            context: context.to_string(),
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for exp_violin operations
pub type Result<T> = std::result::Result<T, ExpError>;

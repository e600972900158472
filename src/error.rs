use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    // not fatal: callers log it and carry on with an empty result
    #[error("Unable to open file '{}': {source}", .path.display())]
    MissingSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error {action} '{}': {source}", .path.display())]
    IoFailure {
        action: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid record in {source_name} at line {line_number}: {reason}: {line:?}")]
    MalformedRecord {
        source_name: String,
        line_number: usize,
        line: String,
        reason: &'static str,
    },

    #[error("Invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl AnalyzerError {
    pub fn malformed(
        source_name: &str,
        line_number: usize,
        line: &str,
        reason: &'static str,
    ) -> Self {
        AnalyzerError::MalformedRecord {
            source_name: source_name.to_owned(),
            line_number,
            line: line.to_owned(),
            reason,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnalyzerError::MalformedRecord { .. } | AnalyzerError::Config { .. }
        )
    }
}

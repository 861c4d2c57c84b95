use std::fmt;

use dash13_core::RecordError;

#[derive(Debug)]
pub enum ReconError {
    /// Invalid reconciliation setting (unknown priority, etc.).
    Configuration(String),
    /// Record construction failed.
    Record(RecordError),
    /// Record construction failed on a line of an extract file.
    ExtractLine { line: u64, error: RecordError },
    /// IO error (file read, audit log write, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::Record(e) => write!(f, "malformed record: {e}"),
            Self::ExtractLine { line, error } => write!(f, "extract line {line}: {error}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

impl From<RecordError> for ReconError {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}

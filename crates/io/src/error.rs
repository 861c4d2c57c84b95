use std::fmt;

use dash13_core::RecordError;

#[derive(Debug)]
pub enum ExtractError {
    /// File read/write error.
    Io(String),
    /// Directory walk error.
    Walk(String),
    /// Sink rejected a record (write failure, flush failure).
    Sink(String),
    /// Lookup table content error.
    Table(RecordError),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Walk(msg) => write!(f, "directory walk error: {msg}"),
            Self::Sink(msg) => write!(f, "output error: {msg}"),
            Self::Table(e) => write!(f, "lookup table error: {e}"),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<RecordError> for ExtractError {
    fn from(e: RecordError) -> Self {
        Self::Table(e)
    }
}

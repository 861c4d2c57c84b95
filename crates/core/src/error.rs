use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Value list did not carry nine data fields plus file and line number.
    Malformed { found: usize, values: Vec<String> },
    /// Provenance line number is not an unsigned integer.
    LineNumber { value: String },
    /// Lookup table row has no value in the configured column.
    IdTableRow { line: usize, column: usize, content: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { found, values } => {
                write!(f, "cannot create record from {found} values (expected 11): {values:?}")
            }
            Self::LineNumber { value } => write!(f, "invalid source line number '{value}'"),
            Self::IdTableRow { line, column, content } => {
                write!(f, "lookup table line {line}: no column {column} in '{content}'")
            }
        }
    }
}

impl std::error::Error for RecordError {}

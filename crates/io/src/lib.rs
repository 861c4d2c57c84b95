// Report I/O: turns legacy ASCII report dumps into raw record field lists

pub mod classify;
pub mod decode;
pub mod discover;
pub mod error;
pub mod extract;
pub mod reassemble;
pub mod sink;
pub mod tables;
pub mod tokenize;

pub use classify::LineClassifier;
pub use discover::FileClass;
pub use error::ExtractError;
pub use extract::{extract_data, extract_file, extract_reader, ExtractOptions, Reject};
pub use sink::{FileSink, MemorySink, RecordSink};

/// Field separator for extract files (ASCII unit separator). Chosen so it
/// cannot collide with anything typed into a narrative.
pub const DEFAULT_DELIMITER: u8 = 0x1f;

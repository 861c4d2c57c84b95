//! Extraction: report files → raw record field lists in a sink, plus the
//! lines that could not be read as records.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::classify::LineClassifier;
use crate::decode::DecodedLines;
use crate::discover::{discover_files, FileClass};
use crate::error::ExtractError;
use crate::reassemble::{Reassembler, CONTINUATION_MAX_TOKENS};
use crate::sink::RecordSink;
use crate::tokenize::tokenize;

/// An interesting line that did not tokenize. `line` is the reassembled
/// buffer exactly as it was handed to the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reject {
    pub line: String,
    pub file: String,
    pub line_number: u64,
}

/// Tunable heuristics for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub classifier: LineClassifier,
    pub continuation_max_tokens: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            classifier: LineClassifier::default(),
            continuation_max_tokens: CONTINUATION_MAX_TOKENS,
        }
    }
}

/// Tokenize one logical line. On success the fields, the source file and
/// the line number go to `sink`; otherwise the line comes back as a reject.
pub fn handle_line(
    line: &str,
    file: &str,
    line_number: u64,
    sink: &mut dyn RecordSink,
) -> Result<Option<Reject>, ExtractError> {
    match tokenize(line) {
        Some(mut fields) => {
            fields.push(file.to_string());
            fields.push(line_number.to_string());
            sink.accept(fields)?;
            Ok(None)
        }
        None => {
            log::debug!("{file}:{line_number}: rejected: {line}");
            Ok(Some(Reject {
                line: line.to_string(),
                file: file.to_string(),
                line_number,
            }))
        }
    }
}

/// Extract every record from an already-open report. `file` is recorded as
/// the provenance of each record.
pub fn extract_reader<R: BufRead>(
    reader: R,
    file: &str,
    opts: &ExtractOptions,
    sink: &mut dyn RecordSink,
) -> Result<Vec<Reject>, ExtractError> {
    let lines = Reassembler::new(
        DecodedLines::named(reader, file),
        opts.classifier,
        opts.continuation_max_tokens,
    );
    let mut rejects = Vec::new();
    for logical in lines {
        let logical = logical.map_err(|e| ExtractError::Io(format!("{file}: {e}")))?;
        if let Some(reject) = handle_line(&logical.text, file, logical.line_number, sink)? {
            rejects.push(reject);
        }
    }
    Ok(rejects)
}

pub fn extract_file(
    path: &Path,
    opts: &ExtractOptions,
    sink: &mut dyn RecordSink,
) -> Result<Vec<Reject>, ExtractError> {
    let file = File::open(path)
        .map_err(|e| ExtractError::Io(format!("cannot open {}: {e}", path.display())))?;
    let name = path.display().to_string();
    let rejects = extract_reader(BufReader::new(file), &name, opts, sink)?;
    log::info!("{name}: {} rejected lines", rejects.len());
    Ok(rejects)
}

/// Extract every `class` file under `root` into one sink. Files are read
/// one after another; the rejects of all files are returned together.
pub fn extract_data(
    root: &Path,
    class: FileClass,
    opts: &ExtractOptions,
    sink: &mut dyn RecordSink,
) -> Result<Vec<Reject>, ExtractError> {
    let mut rejects = Vec::new();
    for path in discover_files(root, class)? {
        rejects.extend(extract_file(&path, opts, sink)?);
    }
    Ok(rejects)
}

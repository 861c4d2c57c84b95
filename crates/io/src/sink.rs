//! Where tokenized records go: a delimited extract file, or memory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ExtractError;

/// Accepts one raw record (nine fields, file, line number) at a time.
pub trait RecordSink {
    fn accept(&mut self, fields: Vec<String>) -> Result<(), ExtractError>;
}

/// Collects raw records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Vec<String>> {
        self.records
    }
}

impl RecordSink for MemorySink {
    fn accept(&mut self, fields: Vec<String>) -> Result<(), ExtractError> {
        self.records.push(fields);
        Ok(())
    }
}

/// Writes each record as one delimiter-joined line. No quoting: the
/// delimiter is a control character that never appears in report text.
pub struct FileSink<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl FileSink<BufWriter<File>> {
    pub fn create(path: &Path, delimiter: u8) -> Result<Self, ExtractError> {
        let file = File::create(path)
            .map_err(|e| ExtractError::Io(format!("cannot create {}: {e}", path.display())))?;
        Ok(Self::new(BufWriter::new(file), delimiter))
    }
}

impl<W: Write> FileSink<W> {
    pub fn new(writer: W, delimiter: u8) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(writer);
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W, ExtractError> {
        self.writer
            .into_inner()
            .map_err(|e| ExtractError::Sink(e.to_string()))
    }
}

impl<W: Write> RecordSink for FileSink<W> {
    fn accept(&mut self, fields: Vec<String>) -> Result<(), ExtractError> {
        self.writer
            .write_record(&fields)
            .map_err(|e| ExtractError::Sink(e.to_string()))?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(narr: &str, line: u64) -> Vec<String> {
        let mut v: Vec<String> = ["20140130", "ABCD", "A", "UH1234", "SN5", "20140128", "EVT01", "C"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        v.push(narr.to_string());
        v.push("dir/FAU1.txt".to_string());
        v.push(line.to_string());
        v
    }

    #[test]
    fn memory_sink_collects_in_order() {
        let mut sink = MemorySink::new();
        sink.accept(raw("one", 1)).unwrap();
        sink.accept(raw("two", 3)).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records()[1][8], "two");
        assert_eq!(sink.into_records()[0][10], "1");
    }

    #[test]
    fn file_sink_writes_unquoted_lines() {
        let mut sink = FileSink::new(Vec::new(), b'|');
        sink.accept(raw("LEAK, \"BAD\" SEAL", 4)).unwrap();
        sink.accept(raw("", 9)).unwrap();
        assert_eq!(sink.written(), 2);
        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(
            out,
            "20140130|ABCD|A|UH1234|SN5|20140128|EVT01|C|LEAK, \"BAD\" SEAL|dir/FAU1.txt|4\n\
             20140130|ABCD|A|UH1234|SN5|20140128|EVT01|C||dir/FAU1.txt|9\n"
        );
    }

    #[test]
    fn file_sink_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fau.extract");
        let mut sink = FileSink::create(&path, crate::DEFAULT_DELIMITER).unwrap();
        sink.accept(raw("narr", 2)).unwrap();
        sink.finish().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches('\u{1f}').count(), 10);
    }
}

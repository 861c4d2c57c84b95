//! Writing cleaned records and the merged dataset as delimited text.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dash13_core::Record;

use crate::error::ReconError;
use crate::model::MergedRecord;

fn writer<W: Write>(out: W, delimiter: u8, headers: bool) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(headers)
        .from_writer(out)
}

fn create(path: &Path) -> Result<BufWriter<File>, ReconError> {
    let file = File::create(path)
        .map_err(|e| ReconError::Io(format!("cannot create {}: {e}", path.display())))?;
    Ok(BufWriter::new(file))
}

/// One line per record: `recId`, the nine data fields, file, line number.
pub fn write_records<W: Write>(out: W, records: &[Record], delimiter: u8) -> Result<(), ReconError> {
    let mut wtr = writer(out, delimiter, false);
    for rec in records {
        wtr.write_record(rec.csv_fields())
            .map_err(|e| ReconError::Io(e.to_string()))?;
    }
    wtr.flush().map_err(|e| ReconError::Io(e.to_string()))
}

pub fn write_records_file(path: &Path, records: &[Record], delimiter: u8) -> Result<(), ReconError> {
    write_records(create(path)?, records, delimiter)
}

/// Header row, then one line per merged row.
pub fn write_merged<W: Write>(
    out: W,
    rows: &[MergedRecord],
    delimiter: u8,
) -> Result<(), ReconError> {
    let mut wtr = writer(out, delimiter, true);
    for row in rows {
        wtr.serialize(row).map_err(|e| ReconError::Io(e.to_string()))?;
    }
    wtr.flush().map_err(|e| ReconError::Io(e.to_string()))
}

pub fn write_merged_file(
    path: &Path,
    rows: &[MergedRecord],
    delimiter: u8,
) -> Result<(), ReconError> {
    write_merged(create(path)?, rows, delimiter)
}

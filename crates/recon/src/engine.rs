use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use dash13_core::{sort_by_id, IdMaps, Record};

use crate::audit::AuditLog;
use crate::dedup::{remove_blank_narr_event, remove_duplicate_ids, remove_duplicate_records};
use crate::error::ReconError;
use crate::model::{CleanResult, CleanSummary, Priority};

/// Build records from raw field lists held in memory (an extraction sink).
pub fn build_records(raw: Vec<Vec<String>>, ids: &IdMaps) -> Result<Vec<Record>, ReconError> {
    raw.into_iter()
        .map(|values| Record::from_values(values, ids).map_err(ReconError::from))
        .collect()
}

/// Build records from an extract: one record per line, eleven fields joined
/// by `delimiter`, no quoting. Only `\n` ends a record; a bare `\r` is
/// narrative text.
pub fn load_extract<R: Read>(
    reader: R,
    delimiter: u8,
    ids: &IdMaps,
) -> Result<Vec<Record>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ReconError::Io(e.to_string()))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let values: Vec<String> = row.iter().map(str::to_string).collect();
        let record = Record::from_values(values, ids)
            .map_err(|error| ReconError::ExtractLine { line, error })?;
        records.push(record);
    }
    Ok(records)
}

pub fn load_extract_file(
    path: &Path,
    delimiter: u8,
    ids: &IdMaps,
) -> Result<Vec<Record>, ReconError> {
    let file = File::open(path)
        .map_err(|e| ReconError::Io(format!("cannot open {}: {e}", path.display())))?;
    let records = load_extract(BufReader::new(file), delimiter, ids)?;
    log::info!("{}: {} records", path.display(), records.len());
    Ok(records)
}

/// Run the reconciliation stages in order: exact duplicates, blank
/// correction date or narrative, then one record per `recId` by
/// `priority`. The result is sorted by equipment id, event date and event
/// number.
pub fn clean(
    records: Vec<Record>,
    priority: Priority,
    audit: Option<&mut AuditLog>,
) -> Result<CleanResult, ReconError> {
    let input = records.len();

    let records = remove_duplicate_records(records);
    let after_exact_dedup = records.len();
    log::info!("exact duplicates: {input} -> {after_exact_dedup}");

    let records = remove_blank_narr_event(records);
    let after_blank_filter = records.len();
    log::info!("blank correction date or narrative: {after_exact_dedup} -> {after_blank_filter}");

    let (mut records, stats) = remove_duplicate_ids(records, priority, audit)?;
    log::info!(
        "duplicate ids by {priority}: {after_blank_filter} -> {} ({} groups, {} ties)",
        records.len(),
        stats.duplicate_groups,
        stats.tie_groups
    );
    sort_by_id(&mut records);

    let summary = CleanSummary {
        priority,
        input,
        after_exact_dedup,
        after_blank_filter,
        output: records.len(),
        duplicate_id_groups: stats.duplicate_groups,
        tie_groups: stats.tie_groups,
    };
    Ok(CleanResult { records, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash13_core::{IdTable, RecordError};

    fn raw(corr: &str, serial: &str, event_no: &str, narr: &str) -> Vec<String> {
        [corr, "ABCD", "A", "UH1234", serial, "20140128", event_no, "C", narr, "FAU1.txt", "4"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn build_normalises_equipment_id() {
        let ids = IdMaps::new(
            IdTable::from_pairs([("SN5", "U42")]),
            IdTable::from_pairs([("U42", "E7")]),
        );
        let records = build_records(vec![raw("20140130", "SN5", "EVT01", "n")], &ids).unwrap();
        assert_eq!(records[0].equipment_id(), "E7");
        assert_eq!(records[0].rec_id().as_str(), "20140128_EVT01_E7_A");
    }

    #[test]
    fn build_rejects_wrong_width() {
        let mut short = raw("20140130", "SN5", "EVT01", "n");
        short.pop();
        let err = build_records(vec![short], &IdMaps::identity()).unwrap_err();
        assert!(matches!(err, ReconError::Record(RecordError::Malformed { found: 10, .. })));
    }

    #[test]
    fn load_extract_lines() {
        let data = "20140130\x1fABCD\x1fA\x1fUH1234\x1fSN5\x1f20140128\x1fEVT01\x1fC\x1f\"QUOTED\" TEXT\x1fFAU1.txt\x1f4\n\
                    \x1f\x1fA\x1fUH1234\x1fSN6\x1f20140129\x1fEVT02\x1f\x1f\x1fACT1.txt\x1f9\r\n";
        let records = load_extract(data.as_bytes(), 0x1f, &IdMaps::identity()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].narrative(), "\"QUOTED\" TEXT");
        assert_eq!(records[0].source_line(), 4);
        assert_eq!(records[1].corr_date_time(), "");
        assert_eq!(records[1].source_file(), "ACT1.txt");
        assert_eq!(records[1].source_line(), 9);
    }

    #[test]
    fn carriage_return_inside_narrative_stays_in_the_record() {
        let data = "20140130\x1fABCD\x1fA\x1fUH1234\x1fSN5\x1f20140128\x1fEVT01\x1fC\x1fLEAK\rAT FITTING\x1fFAU1.txt\x1f4\n";
        let records = load_extract(data.as_bytes(), 0x1f, &IdMaps::identity()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].narrative(), "LEAK\rAT FITTING");
        assert_eq!(records[0].source_line(), 4);
    }

    #[test]
    fn load_extract_reports_line_of_bad_record() {
        let data = "a\x1fb\x1fc\n";
        let err = load_extract(data.as_bytes(), 0x1f, &IdMaps::identity()).unwrap_err();
        assert!(matches!(err, ReconError::ExtractLine { line: 1, .. }));
    }

    #[test]
    fn clean_runs_stages_in_order() {
        let raws = vec![
            raw("20140130", "SN5", "EVT02", "second event"),
            raw("20140130", "SN5", "EVT01", "short"),
            raw("20140130", "SN5", "EVT01", "short"),
            raw("20140130", "SN5", "EVT01", "much longer narrative"),
            raw("", "SN5", "EVT03", "no correction date"),
            raw("20140130", "SN4", "EVT09", ""),
        ];
        let records = build_records(raws, &IdMaps::identity()).unwrap();
        let result = clean(records, Priority::ByNarr, None).unwrap();

        assert_eq!(
            result.summary,
            CleanSummary {
                priority: Priority::ByNarr,
                input: 6,
                after_exact_dedup: 5,
                after_blank_filter: 3,
                output: 2,
                duplicate_id_groups: 1,
                tie_groups: 0,
            }
        );
        let narratives: Vec<&str> = result.records.iter().map(|r| r.narrative()).collect();
        assert_eq!(narratives, vec!["much longer narrative", "second event"]);
    }
}

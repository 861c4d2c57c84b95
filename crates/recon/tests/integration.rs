use std::path::PathBuf;

use dash13_core::{IdMaps, IdTable, Record};
use dash13_recon::export::{write_merged, write_records};
use dash13_recon::model::{MergeOrigin, Priority};
use dash13_io::{extract_reader, ExtractOptions, FileSink};
use dash13_recon::{clean, load_extract, load_extract_file, merge_batches, AuditLog};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn id_maps() -> IdMaps {
    let dir = fixtures_dir();
    let read = |name: &str| std::fs::read_to_string(dir.join(name)).unwrap();
    IdMaps::new(
        IdTable::parse(&read("serial_to_internal.txt"), 2).unwrap(),
        IdTable::parse(&read("internal_to_equipment.txt"), 1).unwrap(),
    )
}

fn load(name: &str) -> Vec<Record> {
    load_extract_file(&fixtures_dir().join(name), 0x1f, &id_maps()).unwrap()
}

// -------------------------------------------------------------------------
// Clean
// -------------------------------------------------------------------------

#[test]
fn fau_by_event_date() {
    let result = clean(load("fau.extract"), Priority::ByEventDate, None).unwrap();

    assert_eq!(result.summary.input, 7);
    assert_eq!(result.summary.after_exact_dedup, 6);
    assert_eq!(result.summary.after_blank_filter, 4);
    assert_eq!(result.summary.output, 2);
    assert_eq!(result.summary.duplicate_id_groups, 2);
    // both groups share an event date, so the narrative decides
    assert_eq!(result.summary.tie_groups, 2);

    let ids: Vec<String> = result.records.iter().map(|r| r.rec_id().to_string()).collect();
    assert_eq!(ids, vec!["20140128_EVT01_E7_A", "20140201_EVT02_E7_W"]);
    assert_eq!(result.records[0].narrative(), "HYD LEAK AT LEFT MAIN GEAR");
    assert_eq!(result.records[1].narrative(), "CHAFED WIRE HARNESS");
}

#[test]
fn fau_by_narrative_has_no_ties() {
    let result = clean(load("fau.extract"), Priority::ByNarr, None).unwrap();
    assert_eq!(result.summary.output, 2);
    assert_eq!(result.summary.tie_groups, 0);
}

#[test]
fn check_mode_writes_tie_groups() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eventNarr_choices.txt");
    let mut audit = AuditLog::create(&path, Priority::ByEventDate).unwrap();
    audit.section("FAU").unwrap();
    clean(load("fau.extract"), Priority::ByEventDate, Some(&mut audit)).unwrap();
    assert_eq!(audit.groups_written(), 2);
    audit.finish().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("Selected:").count(), 2);
    assert_eq!(text.matches("Discarded:").count(), 2);
    assert!(text.contains("20140201_EVT02_E7_W"));
}

#[test]
fn identifiers_are_normalised_on_load() {
    let records = load("act.extract");
    assert_eq!(records[0].equipment_id(), "E7");
    // U77 has no equipment id
    assert_eq!(records[1].equipment_id(), "U77");
}

// -------------------------------------------------------------------------
// Merge + export
// -------------------------------------------------------------------------

#[test]
fn merge_cleaned_batches() {
    let fau = clean(load("fau.extract"), Priority::ByEventDate, None).unwrap();
    let act = clean(load("act.extract"), Priority::ByEventDate, None).unwrap();
    let (rows, summary) = merge_batches(&fau.records, &act.records);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.both, 1);
    assert_eq!(summary.fau_only, 1);
    assert_eq!(summary.act_only, 1);

    let both = rows.iter().find(|r| r.origin == MergeOrigin::Both).unwrap();
    assert_eq!(both.corr_date_time, "20140129");
    assert_eq!(both.wuc, "11AA");
    assert_eq!(both.status, "X");
    assert_eq!(both.act_narrative, "REPLACED SEAL");

    let mut out = Vec::new();
    write_merged(&mut out, &rows, b'|').unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().nth(3).unwrap().ends_with("|act_only"));
}

#[test]
fn exported_records_reload() {
    let result = clean(load("fau.extract"), Priority::ByEventDate, None).unwrap();
    let mut out = Vec::new();
    write_records(&mut out, &result.records, 0x1f).unwrap();
    let text = String::from_utf8(out).unwrap();
    for (line, rec) in text.lines().zip(&result.records) {
        let fields: Vec<&str> = line.split('\u{1f}').collect();
        assert_eq!(fields.len(), 12);
        assert_eq!(fields[0], rec.rec_id().as_str());
        assert_eq!(fields[9], rec.narrative());
    }
}

#[test]
fn extract_file_with_stray_carriage_return_reloads() {
    // DOS dump with a bare CR inside the narrative of the first record
    let report = b"20140130 ABCD A UH1234 SN5 20140128 EVT01 C LEAK\rAT FITTING\r\n\
                   \r\n\
                   20140131 ABCD A UH1234 SN7 20140129 EVT02 C CHAFED WIRE\r\n";
    let mut sink = FileSink::new(Vec::new(), 0x1f);
    let rejects =
        extract_reader(&report[..], "FAU_1.txt", &ExtractOptions::default(), &mut sink).unwrap();
    assert!(rejects.is_empty());
    let extract = sink.finish().unwrap();

    let records = load_extract(&extract[..], 0x1f, &id_maps()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].narrative(), "LEAK\rAT FITTING");
    assert_eq!(records[0].equipment_id(), "E7");
    assert_eq!(records[0].source_line(), 1);
    assert_eq!(records[1].narrative(), "CHAFED WIRE");
    assert_eq!(records[1].source_line(), 3);
}

//! The three reconciliation stages, applied in order by [`crate::clean`].

use std::collections::{BTreeMap, HashSet};

use dash13_core::{RecId, Record};

use crate::audit::AuditLog;
use crate::error::ReconError;
use crate::model::{DuplicateIdStats, Priority};

/// Drop records whose nine data fields equal an earlier record's. The first
/// occurrence survives and input order is kept.
pub fn remove_duplicate_records(records: Vec<Record>) -> Vec<Record> {
    let mut seen: HashSet<&Record> = HashSet::with_capacity(records.len());
    let keep: Vec<bool> = records.iter().map(|r| seen.insert(r)).collect();
    records
        .into_iter()
        .zip(keep)
        .filter_map(|(r, keep)| keep.then_some(r))
        .collect()
}

/// Drop records without a correction date or without a narrative.
pub fn remove_blank_narr_event(mut records: Vec<Record>) -> Vec<Record> {
    records.retain(|r| !r.corr_date_time().is_empty() && !r.narrative().is_empty());
    records
}

/// Rank candidates best first. Stable, so input order decides a full tie.
pub fn rank(group: &mut [Record], priority: Priority) {
    group.sort_by(|a, b| priority.compare(b, a));
}

/// Keep one record per `recId`, chosen by `priority`. Groups whose top two
/// candidates tie on the primary key go to `audit` when one is given.
/// Output is in `recId` order.
pub fn remove_duplicate_ids(
    records: Vec<Record>,
    priority: Priority,
    mut audit: Option<&mut AuditLog>,
) -> Result<(Vec<Record>, DuplicateIdStats), ReconError> {
    let mut groups: BTreeMap<RecId, Vec<Record>> = BTreeMap::new();
    for record in records {
        groups.entry(record.rec_id()).or_default().push(record);
    }

    let mut stats = DuplicateIdStats::default();
    let mut kept = Vec::with_capacity(groups.len());
    for (id, mut group) in groups {
        if group.len() > 1 {
            stats.duplicate_groups += 1;
            rank(&mut group, priority);
            if priority.ties_on_primary(&group[0], &group[1]) {
                stats.tie_groups += 1;
                if let Some(audit_log) = audit.as_deref_mut() {
                    log::warn!("{id}: {} candidates tie on {priority}", group.len());
                    audit_log.write_group(&id, &group)?;
                } else {
                    log::debug!("{id}: {} candidates tie on {priority}", group.len());
                }
            }
        }
        kept.extend(group.into_iter().next());
    }
    Ok((kept, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash13_core::IdMaps;

    fn rec(corr: &str, event_no: &str, event_date: &str, narr: &str, line: u64) -> Record {
        let line = line.to_string();
        let values = [
            corr, "ABCD", "A", "UH1234", "SN5", event_date, event_no, "C", narr, "FAU1.txt", &line,
        ];
        Record::from_values(values.iter().map(|s| s.to_string()).collect(), &IdMaps::identity())
            .unwrap()
    }

    #[test]
    fn exact_duplicates_keep_first() {
        let records = vec![
            rec("20140130", "EVT01", "20140128", "narr", 1),
            rec("20140130", "EVT02", "20140128", "narr", 2),
            rec("20140130", "EVT01", "20140128", "narr", 9),
        ];
        let out = remove_duplicate_records(records);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].source_line(), 1);
        assert_eq!(out[1].event_no(), "EVT02");
    }

    #[test]
    fn differing_narrative_is_not_a_duplicate() {
        let records = vec![
            rec("20140130", "EVT01", "20140128", "narr", 1),
            rec("20140130", "EVT01", "20140128", "narr.", 2),
        ];
        assert_eq!(remove_duplicate_records(records).len(), 2);
    }

    #[test]
    fn blank_corr_date_or_narrative_dropped() {
        let records = vec![
            rec("", "EVT01", "20140128", "narr", 1),
            rec("20140130", "EVT02", "20140128", "", 2),
            rec("20140130", "EVT03", "20140128", "narr", 3),
        ];
        let out = remove_blank_narr_event(records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].event_no(), "EVT03");
    }

    #[test]
    fn latest_event_date_wins() {
        // event date is part of the recId, so vary it through corr date only
        let a = rec("20140101", "EVT01", "20140105", "short", 1);
        let b = rec("20140102", "EVT01", "20140105", "a longer narrative", 2);
        let (out, stats) =
            remove_duplicate_ids(vec![a, b], Priority::ByEventDate, None).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].narrative(), "a longer narrative");
        assert_eq!(stats.duplicate_groups, 1);
        assert_eq!(stats.tie_groups, 1);
    }

    #[test]
    fn longest_narrative_wins() {
        let a = rec("20140101", "EVT01", "20140105", "12345", 1);
        let b = rec("20140102", "EVT01", "20140105", "123456789012", 2);
        let (out, stats) = remove_duplicate_ids(vec![a, b], Priority::ByNarr, None).unwrap();
        assert_eq!(out[0].narrative_len(), 12);
        assert_eq!(stats.tie_groups, 0);
    }

    #[test]
    fn full_tie_keeps_input_order() {
        let a = rec("20140101", "EVT01", "20140105", "same", 1);
        let b = rec("20140102", "EVT01", "20140105", "SAME", 2);
        let (out, _) = remove_duplicate_ids(vec![a, b], Priority::ByNarr, None).unwrap();
        assert_eq!(out[0].source_line(), 1);
    }

    #[test]
    fn distinct_ids_all_survive_in_id_order() {
        let records = vec![
            rec("20140130", "EVT02", "20140128", "b", 1),
            rec("20140130", "EVT01", "20140128", "a", 2),
        ];
        let (out, stats) =
            remove_duplicate_ids(records, Priority::ByEventDate, None).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].event_no(), "EVT01");
        assert_eq!(stats, DuplicateIdStats::default());
    }

    #[test]
    fn ties_written_to_audit_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrEvent_choices.txt");
        let mut log = AuditLog::create(&path, Priority::ByNarr).unwrap();
        let records = vec![
            rec("20140101", "EVT01", "20140105", "12345", 1),
            rec("20140102", "EVT01", "20140105", "abcde", 2),
            rec("20140103", "EVT02", "20140105", "short", 3),
            rec("20140104", "EVT02", "20140105", "much longer", 4),
        ];
        let (out, stats) =
            remove_duplicate_ids(records, Priority::ByNarr, Some(&mut log)).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(stats.duplicate_groups, 2);
        assert_eq!(stats.tie_groups, 1);
        assert_eq!(log.groups_written(), 1);
        log.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("20140105_EVT01_SN5_A"));
        assert!(!text.contains("much longer"));
    }
}

//! FAU/ACT merge: outer join of the two cleaned batches on `recId`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use dash13_core::{RecId, Record};

use crate::model::{MergeOrigin, MergeSummary, MergedRecord};

/// Join `fau` and `act` on `recId`. Each batch should already hold one record
/// per id; if not, the first record for an id is used. Rows come out in
/// `recId` order.
pub fn merge_batches(fau: &[Record], act: &[Record]) -> (Vec<MergedRecord>, MergeSummary) {
    let fau_map = index(fau);
    let act_map = index(act);
    let ids: BTreeSet<&RecId> = fau_map.keys().chain(act_map.keys()).collect();

    let mut summary = MergeSummary::default();
    let mut rows = Vec::with_capacity(ids.len());
    for id in ids {
        let row = match (fau_map.get(id), act_map.get(id)) {
            (Some(f), Some(a)) => {
                summary.both += 1;
                merge_pair(id, f, a)
            }
            (Some(f), None) => {
                summary.fau_only += 1;
                one_sided(id, f, MergeOrigin::FauOnly)
            }
            (None, Some(a)) => {
                summary.act_only += 1;
                one_sided(id, a, MergeOrigin::ActOnly)
            }
            (None, None) => continue,
        };
        rows.push(row);
    }
    summary.total = rows.len();
    log::info!(
        "merged {} rows ({} both, {} fau only, {} act only)",
        summary.total,
        summary.both,
        summary.fau_only,
        summary.act_only
    );
    (rows, summary)
}

fn index(records: &[Record]) -> BTreeMap<RecId, &Record> {
    let mut map = BTreeMap::new();
    for r in records {
        map.entry(r.rec_id()).or_insert(r);
    }
    map
}

fn merge_pair(id: &RecId, fau: &Record, act: &Record) -> MergedRecord {
    MergedRecord {
        rec_id: id.clone(),
        // a fault is logged before the action that closes it
        corr_date_time: earlier(fau.corr_date_time(), act.corr_date_time()).to_string(),
        wuc: fau.wuc().to_string(),
        sys_code: fau.sys_code().to_string(),
        model: non_empty_or(fau.model(), act.model()).to_string(),
        equipment_id: fau.equipment_id().to_string(),
        event_date: fau.event_date().to_string(),
        event_no: fau.event_no().to_string(),
        status: non_empty_or(act.status(), fau.status()).to_string(),
        fau_narrative: fau.narrative().to_string(),
        act_narrative: act.narrative().to_string(),
        origin: MergeOrigin::Both,
    }
}

fn one_sided(id: &RecId, rec: &Record, origin: MergeOrigin) -> MergedRecord {
    let (fau_narrative, act_narrative) = match origin {
        MergeOrigin::ActOnly => (String::new(), rec.narrative().to_string()),
        _ => (rec.narrative().to_string(), String::new()),
    };
    MergedRecord {
        rec_id: id.clone(),
        corr_date_time: rec.corr_date_time().to_string(),
        wuc: rec.wuc().to_string(),
        sys_code: rec.sys_code().to_string(),
        model: rec.model().to_string(),
        equipment_id: rec.equipment_id().to_string(),
        event_date: rec.event_date().to_string(),
        event_no: rec.event_no().to_string(),
        status: rec.status().to_string(),
        fau_narrative,
        act_narrative,
        origin,
    }
}

fn non_empty_or<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

/// The earlier of two `YYYYMMDD` dates. An empty side yields the other;
/// values that are not dates compare as text.
pub fn earlier<'a>(a: &'a str, b: &'a str) -> &'a str {
    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y%m%d").ok();
    match (parse(a), parse(b)) {
        (Some(da), Some(db)) => {
            if db < da {
                b
            } else {
                a
            }
        }
        _ => a.min(b),
    }
}

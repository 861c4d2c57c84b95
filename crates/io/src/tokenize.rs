//! Record tokenizer: one reassembled logical line → nine fields.
//!
//! The report has no fixed columns. Fields are whitespace separated and WUC,
//! system code, status and correction date may each be missing, so which
//! optional fields are present is inferred from what the leading tokens look
//! like. Narrative text is whatever remains after the eighth field.

use dash13_core::fields::{
    is_junk, looks_like_date, looks_like_model, looks_like_status, looks_like_sys_code,
    CORR_DATE_TIME, EVENT_DATE, FIELD_COUNT, MODEL, STATUS, SYS_CODE,
};

/// Split `line` into nine fields, or `None` when it cannot be read as a
/// record.
pub fn tokenize(line: &str) -> Option<Vec<String>> {
    if too_few_values(line) {
        return None;
    }
    let mut fields = if token_is(line, 0, looks_like_date) {
        split_with_date(line)
    } else {
        split_without_date(line)
    };
    if fields.len() < FIELD_COUNT {
        fields.push(String::new());
    }
    check(&fields).then_some(fields)
}

/// Field-level validation of a tokenized line.
pub fn check(fields: &[String]) -> bool {
    if fields.len() != FIELD_COUNT {
        return false;
    }
    let corr = &fields[CORR_DATE_TIME];
    let sys = &fields[SYS_CODE];
    let status = &fields[STATUS];
    (corr.is_empty() || looks_like_date(corr))
        && (sys.is_empty() || looks_like_sys_code(sys))
        && looks_like_model(&fields[MODEL])
        && looks_like_date(&fields[EVENT_DATE])
        && (status.is_empty() || looks_like_status(status))
}

fn too_few_values(line: &str) -> bool {
    line.split_whitespace().count() <= 2
}

// Layout with a correction date:
//   CORR WUC SYS MODEL EID EVDATE EVNO STATUS NARR...
fn split_with_date(line: &str) -> Vec<String> {
    let mut line = line.to_string();
    if token_is(&line, 2, is_junk) {
        let mut parts = split_max(&line, 3);
        parts.remove(2);
        line = parts.join(" ");
    }
    if token_is(&line, 3, looks_like_sys_code) {
        // WUC printed as two tokens around its hyphen
        line = rejoin_wuc(&line, 1, 9);
    }

    if token_is(&line, 1, looks_like_model) {
        // no WUC and no system code
        if token_is(&line, 5, looks_like_status) {
            let mut parts = split_max(&line, 6);
            insert_blank(&mut parts, 1);
            insert_blank(&mut parts, 2);
            parts
        } else {
            let mut parts = split_max(&line, 5);
            insert_blank(&mut parts, 1);
            insert_blank(&mut parts, 2);
            insert_blank(&mut parts, 7);
            parts
        }
    } else if token_is(&line, 2, looks_like_sys_code) {
        split_max(&line, 8)
    } else {
        let mut parts = split_max(&line, 7);
        insert_blank(&mut parts, 1);
        parts
    }
}

// Layout of entries not yet completed (no correction date):
//   WUC SYS MODEL EID EVDATE EVNO STATUS NARR...
fn split_without_date(line: &str) -> Vec<String> {
    let mut line = line.to_string();
    if token_is(&line, 1, is_junk) {
        let mut parts = split_max(&line, 2);
        parts.remove(1);
        line = parts.join(" ");
    }
    if token_is(&line, 2, looks_like_sys_code) {
        line = rejoin_wuc(&line, 0, 8);
    }

    if token_is(&line, 1, looks_like_sys_code) {
        let mut parts = split_max(&line, 7);
        insert_blank(&mut parts, CORR_DATE_TIME);
        parts
    } else {
        let mut parts = split_max(&line, 6);
        insert_blank(&mut parts, 0);
        insert_blank(&mut parts, 1);
        parts
    }
}

fn token(line: &str, idx: usize) -> Option<&str> {
    line.split_whitespace().nth(idx)
}

fn token_is(line: &str, idx: usize, pred: fn(&str) -> bool) -> bool {
    token(line, idx).is_some_and(pred)
}

/// Join tokens `idx` and `idx + 1` with a hyphen.
fn rejoin_wuc(line: &str, idx: usize, max_splits: usize) -> String {
    let mut parts = split_max(line, max_splits);
    if parts.len() > idx + 1 {
        let tail = parts.remove(idx + 1);
        parts[idx] = format!("{}-{}", parts[idx], tail);
    }
    parts.join(" ")
}

/// Insert an empty field, appending when `idx` is past the end.
fn insert_blank(parts: &mut Vec<String>, idx: usize) {
    let idx = idx.min(parts.len());
    parts.insert(idx, String::new());
}

/// Split on whitespace at most `max_splits` times; the last element keeps
/// the untouched remainder (inner whitespace included).
pub(crate) fn split_max(s: &str, max_splits: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        if parts.len() == max_splits {
            parts.push(rest.to_string());
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                parts.push(rest[..end].to_string());
                rest = rest[end..].trim_start();
            }
            None => {
                parts.push(rest.to_string());
                break;
            }
        }
    }
    parts
}

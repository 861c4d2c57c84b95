//! The validated record: nine report fields plus provenance.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::RecordError;
use crate::fields::FIELD_COUNT;
use crate::ids::IdMaps;

/// Source file and line number appended after the nine data fields.
pub const PROVENANCE_FIELDS: usize = 2;
pub const RECORD_WIDTH: usize = FIELD_COUNT + PROVENANCE_FIELDS;

/// Logical identity of an event: `EVENT_DATE_EVENT_NO_EQUIPMENT_ID_SYS_CODE`.
///
/// Records sharing a `RecId` describe the same event even when their other
/// fields disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecId(String);

impl RecId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable once built. Equality and hashing cover the nine data fields
/// only, so the same event printed in two files compares equal.
#[derive(Debug, Clone)]
pub struct Record {
    corr_date_time: String,
    wuc: String,
    sys_code: String,
    model: String,
    equipment_id: String,
    event_date: String,
    event_no: String,
    status: String,
    narrative: String,
    source_file: String,
    source_line: u64,
}

impl Record {
    /// Build from nine data values followed by file and line number. The
    /// equipment id is normalised through `ids`.
    pub fn from_values(values: Vec<String>, ids: &IdMaps) -> Result<Self, RecordError> {
        if values.len() != RECORD_WIDTH {
            return Err(RecordError::Malformed {
                found: values.len(),
                values,
            });
        }
        let line_value = values[RECORD_WIDTH - 1].trim();
        let source_line = line_value.parse::<u64>().map_err(|_| RecordError::LineNumber {
            value: line_value.to_string(),
        })?;

        let mut it = values.into_iter();
        let mut next = || it.next().unwrap_or_default();
        let corr_date_time = next();
        let wuc = next();
        let sys_code = next();
        let model = next();
        let serial = next();
        let equipment_id = ids.equipment_id(&serial).to_string();

        Ok(Self {
            corr_date_time,
            wuc,
            sys_code,
            model,
            equipment_id,
            event_date: next(),
            event_no: next(),
            status: next(),
            narrative: next(),
            source_file: next(),
            source_line,
        })
    }

    pub fn corr_date_time(&self) -> &str {
        &self.corr_date_time
    }

    pub fn wuc(&self) -> &str {
        &self.wuc
    }

    pub fn sys_code(&self) -> &str {
        &self.sys_code
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn equipment_id(&self) -> &str {
        &self.equipment_id
    }

    pub fn event_date(&self) -> &str {
        &self.event_date
    }

    pub fn event_no(&self) -> &str {
        &self.event_no
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn source_line(&self) -> u64 {
        self.source_line
    }

    /// All values except file and line number, in report order.
    pub fn data_fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.corr_date_time,
            &self.wuc,
            &self.sys_code,
            &self.model,
            &self.equipment_id,
            &self.event_date,
            &self.event_no,
            &self.status,
            &self.narrative,
        ]
    }

    pub fn rec_id(&self) -> RecId {
        RecId(format!(
            "{}_{}_{}_{}",
            self.event_date, self.event_no, self.equipment_id, self.sys_code
        ))
    }

    /// Canonical ordering key: equipment, then event date, then event number.
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.equipment_id, &self.event_date, &self.event_no)
    }

    /// Event date as an integer; `None` when it is not numeric.
    pub fn event_date_value(&self) -> Option<u64> {
        self.event_date.parse().ok()
    }

    pub fn narrative_len(&self) -> usize {
        self.narrative.chars().count()
    }

    /// `recId`, the nine data fields, file and line number.
    pub fn csv_fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(RECORD_WIDTH + 1);
        out.push(self.rec_id().0);
        out.extend(self.data_fields().iter().map(|s| s.to_string()));
        out.push(self.source_file.clone());
        out.push(self.source_line.to_string());
        out
    }

    /// `csv_fields` joined by `delimiter`.
    pub fn to_csv(&self, delimiter: char) -> String {
        let mut buf = [0; 4];
        let sep: &str = delimiter.encode_utf8(&mut buf);
        self.csv_fields().join(sep)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.data_fields() == other.data_fields()
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data_fields().hash(state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data_fields().join(" | "))
    }
}

/// Sort by `(EQUIPMENT_ID, EVENT_DATE, EVENT_NO)`; stable.
pub fn sort_by_id(records: &mut [Record]) {
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

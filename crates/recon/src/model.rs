use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use dash13_core::{RecId, Record};
use serde::{Deserialize, Serialize};

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Which record survives when several share a `recId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Latest event date, then longest narrative.
    #[default]
    #[serde(rename = "byEventDate")]
    ByEventDate,
    /// Longest narrative, then latest event date.
    #[serde(rename = "byNarr")]
    ByNarr,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByEventDate => "byEventDate",
            Self::ByNarr => "byNarr",
        }
    }

    /// Ascending order of preference; the winner is the greatest.
    /// A non-numeric event date ranks below every numeric one.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::ByEventDate => (a.event_date_value(), a.narrative_len())
                .cmp(&(b.event_date_value(), b.narrative_len())),
            Self::ByNarr => (a.narrative_len(), a.event_date_value())
                .cmp(&(b.narrative_len(), b.event_date_value())),
        }
    }

    /// Whether two candidates are indistinguishable on the primary key,
    /// which makes the choice between them worth auditing.
    pub fn ties_on_primary(&self, a: &Record, b: &Record) -> bool {
        match self {
            Self::ByEventDate => a.event_date() == b.event_date(),
            Self::ByNarr => a.narrative_len() == b.narrative_len(),
        }
    }

    /// First lines of the audit log.
    pub fn audit_heading(&self) -> &'static str {
        match self {
            Self::ByEventDate => {
                "When removing duplicate recordIds, these decisions were made\n\
                 by 1) latter eventDate, 2) length of narrative field\n"
            }
            Self::ByNarr => {
                "When removing duplicate recordIds, these decisions were made\n\
                 by 1) length of narrative field, 2) latter eventDate\n"
            }
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "byEventDate" => Ok(Self::ByEventDate),
            "byNarr" => Ok(Self::ByNarr),
            other => Err(ReconError::Configuration(format!(
                "priority must be 'byEventDate' or 'byNarr', got '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Clean
// ---------------------------------------------------------------------------

/// Outcome of collapsing records that share a `recId`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateIdStats {
    /// Groups with more than one candidate.
    pub duplicate_groups: usize,
    /// Duplicate groups whose top two candidates tie on the primary key.
    pub tie_groups: usize,
}

/// Record counts after each stage of [`crate::clean`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub priority: Priority,
    pub input: usize,
    pub after_exact_dedup: usize,
    pub after_blank_filter: usize,
    pub output: usize,
    pub duplicate_id_groups: usize,
    pub tie_groups: usize,
}

#[derive(Debug, Clone)]
pub struct CleanResult {
    /// One record per `recId`, sorted by equipment id, event date, event number.
    pub records: Vec<Record>,
    pub summary: CleanSummary,
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOrigin {
    Both,
    FauOnly,
    ActOnly,
}

impl fmt::Display for MergeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Both => write!(f, "both"),
            Self::FauOnly => write!(f, "fau_only"),
            Self::ActOnly => write!(f, "act_only"),
        }
    }
}

/// One row of the merged FAU/ACT dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    #[serde(rename = "REC_ID")]
    pub rec_id: RecId,
    #[serde(rename = "CORR_DATE_TIME")]
    pub corr_date_time: String,
    #[serde(rename = "WUC")]
    pub wuc: String,
    #[serde(rename = "SYS_CODE")]
    pub sys_code: String,
    #[serde(rename = "MODEL")]
    pub model: String,
    #[serde(rename = "EQUIPMENT_ID")]
    pub equipment_id: String,
    #[serde(rename = "FAULTDAT")]
    pub event_date: String,
    #[serde(rename = "EVENT_NO")]
    pub event_no: String,
    #[serde(rename = "SS")]
    pub status: String,
    #[serde(rename = "FAU_NARRATIVE")]
    pub fau_narrative: String,
    #[serde(rename = "ACT_NARRATIVE")]
    pub act_narrative: String,
    #[serde(rename = "ORIGIN")]
    pub origin: MergeOrigin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub total: usize,
    pub both: usize,
    pub fau_only: usize,
    pub act_only: usize,
}

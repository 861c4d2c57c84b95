//! `dash13-recon`: record reconciliation.
//!
//! Receives extracted records, returns one record per logical event, and
//! merges the FAU and ACT batches into a single dataset. Reading report
//! text is not done here; see `dash13-io`.

pub mod audit;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod export;
pub mod merge;
pub mod model;

pub use audit::AuditLog;
pub use engine::{build_records, clean, load_extract, load_extract_file};
pub use error::ReconError;
pub use merge::merge_batches;
pub use model::{CleanResult, CleanSummary, MergeOrigin, MergeSummary, MergedRecord, Priority};

//! `dash13-core`: maintenance-log record model.
//!
//! Shared by the extractor and the reconciler. Holds no IO: lookup tables
//! arrive as text and are parsed here, files are opened by the callers.

pub mod error;
pub mod fields;
pub mod ids;
pub mod record;

pub use error::RecordError;
pub use ids::{IdMaps, IdTable};
pub use record::{sort_by_id, RecId, Record};

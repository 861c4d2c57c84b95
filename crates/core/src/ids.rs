//! Serial number → internal id → equipment id normalisation.
//!
//! Both tables are loaded once at startup and only read afterwards. A key
//! that is absent from a table maps to itself; that is never an error.

use std::collections::HashMap;

use crate::error::RecordError;

/// One whitespace-delimited lookup table: key in the first column, value in
/// `value_column` (0-based).
#[derive(Debug, Clone, Default)]
pub struct IdTable {
    entries: HashMap<String, String>,
}

impl IdTable {
    /// Parse table text. Blank lines are skipped; a later row for the same
    /// key replaces an earlier one.
    pub fn parse(text: &str, value_column: usize) -> Result<Self, RecordError> {
        let mut entries = HashMap::new();
        for (idx, line) in text.lines().enumerate() {
            let cols: Vec<&str> = line.split_whitespace().collect();
            let Some(key) = cols.first() else {
                continue;
            };
            let value = cols.get(value_column).ok_or_else(|| RecordError::IdTableRow {
                line: idx + 1,
                column: value_column,
                content: line.trim().to_string(),
            })?;
            entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(Self { entries })
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Mapped value, or `key` itself when unmapped.
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The two chained tables. Constructed once and passed by reference to
/// whatever builds records.
#[derive(Debug, Clone, Default)]
pub struct IdMaps {
    serial_to_internal: IdTable,
    internal_to_equipment: IdTable,
}

impl IdMaps {
    pub fn new(serial_to_internal: IdTable, internal_to_equipment: IdTable) -> Self {
        Self {
            serial_to_internal,
            internal_to_equipment,
        }
    }

    /// Maps every serial to itself.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn internal_id<'a>(&'a self, serial: &'a str) -> &'a str {
        self.serial_to_internal.lookup(serial)
    }

    pub fn equipment_id<'a>(&'a self, serial: &'a str) -> &'a str {
        self.internal_to_equipment.lookup(self.internal_id(serial))
    }
}

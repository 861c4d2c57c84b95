//! Audit log of duplicate-id choices that tie on the primary key.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dash13_core::{RecId, Record};

use crate::error::ReconError;
use crate::model::Priority;

/// Written in check mode so a person can review choices the priority could
/// not make on its primary key alone.
pub struct AuditLog {
    out: Box<dyn Write>,
    groups_written: usize,
}

impl AuditLog {
    /// Create (truncate) the log at `path` and write the heading for
    /// `priority`.
    pub fn create(path: &Path, priority: Priority) -> Result<Self, ReconError> {
        let file = File::create(path)
            .map_err(|e| ReconError::Io(format!("cannot create {}: {e}", path.display())))?;
        Self::new(Box::new(BufWriter::new(file)), priority)
    }

    pub fn new(out: Box<dyn Write>, priority: Priority) -> Result<Self, ReconError> {
        let mut log = Self {
            out,
            groups_written: 0,
        };
        log.write(format_args!("{}\n", priority.audit_heading()))?;
        Ok(log)
    }

    /// Start a titled section, one per batch.
    pub fn section(&mut self, title: &str) -> Result<(), ReconError> {
        self.write(format_args!("\n== {title} ==\n"))
    }

    /// Record one group, ranked best first: the first record was kept.
    pub fn write_group(&mut self, id: &RecId, ranked: &[Record]) -> Result<(), ReconError> {
        let Some((selected, discarded)) = ranked.split_first() else {
            return Ok(());
        };
        self.write(format_args!("\n{id}\nSelected:\n{selected}\nDiscarded:\n"))?;
        for rec in discarded {
            self.write(format_args!("{rec}\n"))?;
        }
        self.groups_written += 1;
        Ok(())
    }

    pub fn groups_written(&self) -> usize {
        self.groups_written
    }

    pub fn finish(mut self) -> Result<(), ReconError> {
        self.out
            .flush()
            .map_err(|e| ReconError::Io(format!("audit log: {e}")))
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) -> Result<(), ReconError> {
        self.out
            .write_fmt(args)
            .map_err(|e| ReconError::Io(format!("audit log: {e}")))
    }
}

//! `d13 clean`: extract file to one record per event.

use std::path::{Path, PathBuf};

use dash13_recon::export::write_records_file;
use dash13_recon::{clean, load_extract_file, AuditLog, Priority};

use crate::util::{load_ids, load_settings, recon_err};
use crate::CliError;

pub fn cmd_clean(
    config: Option<&Path>,
    extract: PathBuf,
    priority: Option<String>,
    check: bool,
    out: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    // an invalid priority fails before anything is read
    let priority: Priority = match priority {
        Some(p) => p.parse().map_err(recon_err)?,
        None => settings.clean.priority,
    };
    let check = check || settings.clean.check;
    let delimiter = settings.extract.delimiter;
    let out = out.unwrap_or_else(|| extract.with_extension("csv"));
    if out == extract {
        return Err(CliError::usage(format!("refusing to overwrite {}", extract.display()))
            .with_hint("pass --out FILE"));
    }

    let ids = load_ids(&settings)?;
    let records = load_extract_file(&extract, delimiter, &ids).map_err(recon_err)?;

    let mut audit = if check {
        let path = settings.audit_path(priority);
        let mut log = AuditLog::create(path, priority).map_err(recon_err)?;
        log.section(&extract.display().to_string()).map_err(recon_err)?;
        Some(log)
    } else {
        None
    };

    let result = clean(records, priority, audit.as_mut()).map_err(recon_err)?;
    if let Some(audit_log) = audit {
        let written = audit_log.groups_written();
        audit_log.finish().map_err(recon_err)?;
        eprintln!(
            "audit: {written} tie groups -> {}",
            settings.audit_path(priority).display()
        );
    }

    write_records_file(&out, &result.records, delimiter).map_err(recon_err)?;

    let s = &result.summary;
    if json {
        let json_str = serde_json::to_string_pretty(s)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }
    eprintln!(
        "clean ({}): {} records, {} after exact duplicates, {} after blank filter, {} unique ids ({} duplicate groups, {} ties) -> {}",
        s.priority,
        s.input,
        s.after_exact_dedup,
        s.after_blank_filter,
        s.output,
        s.duplicate_id_groups,
        s.tie_groups,
        out.display()
    );
    Ok(())
}

//! Shared plumbing: settings, lookup tables, error mapping, reject files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use dash13_config::{ConfigError, Settings};
use dash13_core::IdMaps;
use dash13_io::tables::load_id_maps;
use dash13_io::{ExtractError, Reject};
use dash13_recon::ReconError;

use crate::exit_codes::{EXIT_CONFIG, EXIT_IO, EXIT_RECORD};
use crate::CliError;

pub fn config_err(e: ConfigError) -> CliError {
    match e {
        ConfigError::Io(msg) => CliError::io(msg),
        other => CliError::config(other.to_string())
            .with_hint("run `d13 check-config` to see the settings in effect"),
    }
}

pub fn extract_err(e: ExtractError) -> CliError {
    CliError::io(e.to_string())
}

pub fn recon_err(e: ReconError) -> CliError {
    let code = match &e {
        ReconError::Configuration(_) => EXIT_CONFIG,
        ReconError::Record(_) | ReconError::ExtractLine { .. } => EXIT_RECORD,
        ReconError::Io(_) => EXIT_IO,
    };
    CliError { code, message: e.to_string(), hint: None }
}

/// `path` when given, otherwise the default settings file if present,
/// otherwise built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let settings = match path {
        Some(p) => Settings::load(p),
        None => Settings::load_default(),
    };
    settings.map_err(config_err)
}

/// Identifier tables named in the settings. A table that is not configured
/// maps every id to itself; one that is configured must exist.
pub fn load_ids(settings: &Settings) -> Result<IdMaps, CliError> {
    let ids = &settings.ids;
    if ids.serial_to_internal.is_none() && ids.internal_to_equipment.is_none() {
        log::warn!("no identifier tables configured; equipment ids pass through unchanged");
    }
    load_id_maps(
        ids.serial_to_internal.as_deref(),
        ids.serial_value_column,
        ids.internal_to_equipment.as_deref(),
        ids.internal_value_column,
    )
    .map_err(|e| extract_err(e).with_hint("check [ids] in the settings file"))
}

/// Output directory: the flag, then `[output] dir`, then the working
/// directory. Created when missing.
pub fn output_dir(flag: Option<PathBuf>, settings: &Settings) -> Result<PathBuf, CliError> {
    let dir = flag
        .or_else(|| settings.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", dir.display())))?;
    Ok(dir)
}

/// One reject per line: file, line number, text, tab separated.
pub fn write_rejects(path: &Path, rejects: &[Reject]) -> Result<(), CliError> {
    let io_err = |e: std::io::Error| CliError::io(format!("cannot write {}: {e}", path.display()));
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for r in rejects {
        writeln!(out, "{}\t{}\t{}", r.file, r.line_number, r.line).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

// Loading the identifier lookup tables from disk

use std::path::Path;

use dash13_core::{IdMaps, IdTable};

use crate::decode::decode_line;
use crate::error::ExtractError;

/// Read one table; `value_column` is the 0-based column holding the mapped
/// value.
pub fn load_id_table(path: &Path, value_column: usize) -> Result<IdTable, ExtractError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ExtractError::Io(format!("cannot read {}: {e}", path.display())))?;
    let table = IdTable::parse(&decode_line(&bytes), value_column)?;
    log::info!("{}: {} identifier mappings", path.display(), table.len());
    Ok(table)
}

/// Both tables. A table with no path maps every id to itself.
pub fn load_id_maps(
    serial_to_internal: Option<&Path>,
    serial_value_column: usize,
    internal_to_equipment: Option<&Path>,
    internal_value_column: usize,
) -> Result<IdMaps, ExtractError> {
    let load = |path: Option<&Path>, column| match path {
        Some(p) => load_id_table(p, column),
        None => Ok(IdTable::default()),
    };
    Ok(IdMaps::new(
        load(serial_to_internal, serial_value_column)?,
        load(internal_to_equipment, internal_value_column)?,
    ))
}

//! `d13 extract`: report tree to extract file.

use std::path::{Path, PathBuf};

use dash13_io::{extract_data, FileClass, FileSink};

use crate::exit_codes::EXIT_REJECTS;
use crate::util::{extract_err, load_settings, output_dir, write_rejects};
use crate::CliError;

pub fn cmd_extract(
    config: Option<&Path>,
    root: PathBuf,
    class: FileClass,
    out: Option<PathBuf>,
    rejects_path: Option<PathBuf>,
    strict: bool,
) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    let out = match out {
        Some(path) => path,
        None => output_dir(None, &settings)?
            .join(format!("{}.extract", class.tag().to_ascii_lowercase())),
    };

    let mut sink = FileSink::create(&out, settings.extract.delimiter).map_err(extract_err)?;
    let rejects = extract_data(&root, class, &settings.extract_options(), &mut sink)
        .map_err(extract_err)?;
    let written = sink.written();
    sink.finish().map_err(extract_err)?;

    if let Some(ref path) = rejects_path {
        write_rejects(path, &rejects)?;
    }

    eprintln!(
        "{class}: {written} records -> {}, {} rejected lines",
        out.display(),
        rejects.len()
    );

    if strict && !rejects.is_empty() {
        let hint = match rejects_path {
            Some(path) => format!("rejected lines are in {}", path.display()),
            None => "rerun with --rejects FILE to see them".to_string(),
        };
        return Err(CliError {
            code: EXIT_REJECTS,
            message: format!("{} lines could not be tokenized", rejects.len()),
            hint: Some(hint),
        });
    }
    Ok(())
}

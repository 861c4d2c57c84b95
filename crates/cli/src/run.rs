//! `d13 run`: both classes extracted in memory, cleaned, merged, written.

use std::path::{Path, PathBuf};

use dash13_config::Settings;
use dash13_core::IdMaps;
use dash13_io::{extract_data, FileClass, MemorySink, Reject};
use dash13_recon::export::{write_merged_file, write_records_file};
use dash13_recon::{build_records, clean, merge_batches, AuditLog, CleanResult, CleanSummary, MergeSummary};
use serde::Serialize;

use crate::exit_codes::EXIT_REJECTS;
use crate::util::{extract_err, load_ids, load_settings, output_dir, recon_err, write_rejects};
use crate::CliError;

#[derive(Debug, Serialize)]
struct ClassSummary {
    extracted: usize,
    rejected: usize,
    clean: CleanSummary,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    root: String,
    out_dir: String,
    fau: ClassSummary,
    act: ClassSummary,
    merge: MergeSummary,
    audit_groups: Option<usize>,
}

struct ClassOutcome {
    result: CleanResult,
    rejects: Vec<Reject>,
    extracted: usize,
}

fn process_class(
    root: &Path,
    class: FileClass,
    settings: &Settings,
    ids: &IdMaps,
    mut audit: Option<&mut AuditLog>,
) -> Result<ClassOutcome, CliError> {
    let mut sink = MemorySink::new();
    let rejects = extract_data(root, class, &settings.extract_options(), &mut sink)
        .map_err(extract_err)?;
    let extracted = sink.len();
    log::info!("{class}: {extracted} records, {} rejected lines", rejects.len());

    let records = build_records(sink.into_records(), ids).map_err(recon_err)?;
    if let Some(audit_log) = audit.as_deref_mut() {
        audit_log.section(class.tag()).map_err(recon_err)?;
    }
    let result = clean(records, settings.clean.priority, audit).map_err(recon_err)?;
    Ok(ClassOutcome { result, rejects, extracted })
}

pub fn cmd_run(
    config: Option<&Path>,
    root: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    json: bool,
    strict: bool,
) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    let root = root.or_else(|| settings.input.root.clone()).ok_or_else(|| {
        CliError::usage("no report tree given").with_hint("pass --root DIR or set [input] root")
    })?;
    if !root.is_dir() {
        return Err(CliError::io(format!("{} is not a directory", root.display())));
    }
    let out_dir = output_dir(out_dir, &settings)?;
    let ids = load_ids(&settings)?;
    let priority = settings.clean.priority;
    let delimiter = settings.extract.delimiter;

    let mut audit = if settings.clean.check {
        Some(AuditLog::create(settings.audit_path(priority), priority).map_err(recon_err)?)
    } else {
        None
    };

    let fau = process_class(&root, FileClass::Fau, &settings, &ids, audit.as_mut())?;
    let act = process_class(&root, FileClass::Act, &settings, &ids, audit.as_mut())?;

    let audit_groups = match audit {
        Some(audit_log) => {
            let written = audit_log.groups_written();
            audit_log.finish().map_err(recon_err)?;
            Some(written)
        }
        None => None,
    };

    let (merged, merge_summary) = merge_batches(&fau.result.records, &act.result.records);

    write_records_file(&out_dir.join("fau.csv"), &fau.result.records, delimiter)
        .map_err(recon_err)?;
    write_records_file(&out_dir.join("act.csv"), &act.result.records, delimiter)
        .map_err(recon_err)?;
    write_merged_file(&out_dir.join("merged.csv"), &merged, delimiter).map_err(recon_err)?;
    let fau_rejected = fau.rejects.len();
    let act_rejected = act.rejects.len();
    let mut rejects = fau.rejects;
    rejects.extend(act.rejects);
    write_rejects(&out_dir.join("rejects.txt"), &rejects)?;

    let summary = RunSummary {
        root: root.display().to_string(),
        out_dir: out_dir.display().to_string(),
        fau: ClassSummary {
            extracted: fau.extracted,
            rejected: fau_rejected,
            clean: fau.result.summary,
        },
        act: ClassSummary {
            extracted: act.extracted,
            rejected: act_rejected,
            clean: act.result.summary,
        },
        merge: merge_summary,
        audit_groups,
    };

    if json {
        let json_str = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }
    for (name, c) in [("FAU", &summary.fau), ("ACT", &summary.act)] {
        eprintln!(
            "{name}: {} extracted, {} rejected, {} unique ids ({} ties)",
            c.extracted, c.rejected, c.clean.output, c.clean.tie_groups
        );
    }
    eprintln!(
        "merged: {} rows ({} both, {} fau only, {} act only) -> {}",
        summary.merge.total,
        summary.merge.both,
        summary.merge.fau_only,
        summary.merge.act_only,
        out_dir.display()
    );

    if strict && !rejects.is_empty() {
        return Err(CliError {
            code: EXIT_REJECTS,
            message: format!("{} lines could not be tokenized", rejects.len()),
            hint: Some(format!(
                "rejected lines are in {}",
                out_dir.join("rejects.txt").display()
            )),
        });
    }
    Ok(())
}

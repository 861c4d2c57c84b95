//! Selecting report files by class.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use walkdir::WalkDir;

use crate::error::ExtractError;

/// Report file class, chosen by a substring of the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    /// Fault log.
    Fau,
    /// Corrective action log. Combined `FAUACT` dumps belong here.
    Act,
}

impl FileClass {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Fau => "FAU",
            Self::Act => "ACT",
        }
    }

    /// Whether a file name belongs to this class. A `FAUACT` file is ACT
    /// only, so it is never read twice.
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            Self::Act => file_name.contains("ACT"),
            Self::Fau => file_name.contains("FAU") && !file_name.contains("ACT"),
        }
    }
}

impl fmt::Display for FileClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FileClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fau" => Ok(Self::Fau),
            "act" => Ok(Self::Act),
            other => Err(format!("unknown file class '{other}' (expected fau or act)")),
        }
    }
}

/// All files under `root` whose names match `class`, walked recursively in
/// file-name order.
pub fn discover_files(root: &Path, class: FileClass) -> Result<Vec<PathBuf>, ExtractError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ExtractError::Walk(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if class.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }
    log::info!("{} {class} files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn class_matching() {
        let cases = [
            ("FAU_2014.txt", true, false),
            ("ACT_2014.txt", false, true),
            ("FAUACT_2014.txt", false, true),
            ("notes.txt", false, false),
            ("fau_lower.txt", false, false),
        ];
        for (name, fau, act) in cases {
            assert_eq!(FileClass::Fau.matches(name), fau, "{name}");
            assert_eq!(FileClass::Act.matches(name), act, "{name}");
        }
    }

    #[test]
    fn parse_class() {
        assert_eq!("fau".parse::<FileClass>(), Ok(FileClass::Fau));
        assert_eq!("ACT".parse::<FileClass>(), Ok(FileClass::Act));
        assert!("both".parse::<FileClass>().is_err());
        assert_eq!(FileClass::Act.to_string(), "ACT");
    }

    #[test]
    fn walks_recursively_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("2014");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("FAU_b.txt"), "x").unwrap();
        fs::write(dir.path().join("FAU_a.txt"), "x").unwrap();
        fs::write(dir.path().join("FAUACT_c.txt"), "x").unwrap();
        fs::write(dir.path().join("readme.txt"), "x").unwrap();

        let fau = discover_files(dir.path(), FileClass::Fau).unwrap();
        let names: Vec<_> = fau
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        // depth first, so the 2014/ subdirectory sorts ahead of FAU_a.txt
        assert_eq!(names, vec!["FAU_b.txt", "FAU_a.txt"]);

        let act = discover_files(dir.path(), FileClass::Act).unwrap();
        assert_eq!(act.len(), 1);
        assert!(act[0].ends_with("FAUACT_c.txt"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_files(&dir.path().join("nope"), FileClass::Fau).unwrap_err();
        assert!(matches!(err, ExtractError::Walk(_)));
    }
}

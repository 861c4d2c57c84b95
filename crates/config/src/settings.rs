// Pipeline settings
// Loaded from ~/.config/dash13/d13.toml unless --config points elsewhere

use std::fs;
use std::path::{Path, PathBuf};

use dash13_io::classify::PAGE_NUMBER_MAX;
use dash13_io::reassemble::CONTINUATION_MAX_TOKENS;
use dash13_io::{ExtractOptions, LineClassifier, DEFAULT_DELIMITER};
use dash13_recon::Priority;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const FILE_NAME: &str = "d13.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub ids: IdSettings,
    #[serde(default)]
    pub extract: ExtractSettings,
    #[serde(default)]
    pub clean: CleanSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Top of the directory tree holding the report dumps.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Identifier lookup tables. Without them every serial maps to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdSettings {
    pub serial_to_internal: Option<PathBuf>,
    pub internal_to_equipment: Option<PathBuf>,
    /// Column holding the internal id (`<serial> <ignored> <internal-id>`).
    pub serial_value_column: usize,
    /// Column holding the equipment id (`<internal-id> <equipment-id>`).
    pub internal_value_column: usize,
}

impl Default for IdSettings {
    fn default() -> Self {
        Self {
            serial_to_internal: None,
            internal_to_equipment: None,
            serial_value_column: 2,
            internal_value_column: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    pub page_number_max: u64,
    pub continuation_max_tokens: usize,
    /// Extract file field separator, as a byte (`0x1f` in TOML).
    pub delimiter: u8,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            page_number_max: PAGE_NUMBER_MAX,
            continuation_max_tokens: CONTINUATION_MAX_TOKENS,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanSettings {
    pub priority: Priority,
    /// Write tie groups to the audit log of the active priority.
    pub check: bool,
    pub audit_by_event_date: PathBuf,
    pub audit_by_narr: PathBuf,
}

impl Default for CleanSettings {
    fn default() -> Self {
        Self {
            priority: Priority::default(),
            check: false,
            audit_by_event_date: PathBuf::from("eventNarr_choices.txt"),
            audit_by_narr: PathBuf::from("narrEvent_choices.txt"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl Settings {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extract.page_number_max == 0 {
            return Err(ConfigError::Validation(
                "extract.page_number_max must be at least 1".into(),
            ));
        }
        if self.extract.continuation_max_tokens == 0 {
            return Err(ConfigError::Validation(
                "extract.continuation_max_tokens must be at least 1".into(),
            ));
        }
        let d = self.extract.delimiter;
        if !d.is_ascii_control() || matches!(d, b'\t' | b'\n' | b'\r') {
            return Err(ConfigError::Validation(format!(
                "extract.delimiter {d:#04x} could appear in report text; use a control character such as 0x1f"
            )));
        }
        // column 0 is the key
        if self.ids.serial_value_column == 0 || self.ids.internal_value_column == 0 {
            return Err(ConfigError::Validation(
                "ids value columns must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Read, validate, and resolve relative paths against the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("cannot read {}: {e}", path.display())))?;
        let mut settings = Self::from_toml(&text)?;
        if let Some(base) = path.parent() {
            settings.resolve_paths(base);
        }
        Ok(settings)
    }

    /// The default settings file if it exists, otherwise built-in defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dash13")
            .join(FILE_NAME)
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        let optional = [
            self.input.root.as_mut(),
            self.ids.serial_to_internal.as_mut(),
            self.ids.internal_to_equipment.as_mut(),
            self.output.dir.as_mut(),
        ];
        for path in optional.into_iter().flatten() {
            resolve(base, path);
        }
        resolve(base, &mut self.clean.audit_by_event_date);
        resolve(base, &mut self.clean.audit_by_narr);
    }

    /// Audit log path for `priority`.
    pub fn audit_path(&self, priority: Priority) -> &Path {
        match priority {
            Priority::ByEventDate => &self.clean.audit_by_event_date,
            Priority::ByNarr => &self.clean.audit_by_narr,
        }
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            classifier: LineClassifier::new(self.extract.page_number_max),
            continuation_max_tokens: self.extract.continuation_max_tokens,
        }
    }
}

fn resolve(base: &Path, path: &mut PathBuf) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

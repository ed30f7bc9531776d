use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::profile::DEFAULT_SAMPLES;
use crate::data::filter::SelectionMode;
use crate::data::model::AthleteKey;

// ---------------------------------------------------------------------------
// Viewer settings
// ---------------------------------------------------------------------------

/// User-editable settings, read from `settings.toml` in the config directory.
///
/// ```toml
/// athlete_key = "surname"      # or "full_name"
/// sprint_selection = "single"  # or "multiple"
/// date_selection = "multiple"
/// profile_samples = 100
/// show_labels = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which name column identifies an athlete in selectors and labels.
    pub athlete_key: AthleteKey,
    pub sprint_selection: SelectionMode,
    pub date_selection: SelectionMode,
    /// Points sampled along each profile line.
    pub profile_samples: usize,
    /// Initial state of the name-label toggle on the quadrant chart.
    pub show_labels: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            athlete_key: AthleteKey::FullName,
            sprint_selection: SelectionMode::Multiple,
            date_selection: SelectionMode::Multiple,
            profile_samples: DEFAULT_SAMPLES,
            show_labels: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile_samples < 2 {
            return Err(ConfigError::Invalid(format!(
                "profile_samples must be at least 2, got {}",
                self.profile_samples
            )));
        }
        Ok(())
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let settings: Settings =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Location of `settings.toml` in the platform config directory.
pub fn settings_path() -> PathBuf {
    directories::ProjectDirs::from("org", "fv-profiles", "FV Profiles")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("settings.toml")
}

/// Load settings, falling back to the defaults when the file is unreadable.
pub fn load_settings() -> Settings {
    let path = settings_path();
    match Settings::load_from(&path) {
        Ok(settings) => {
            log::debug!("Settings from {}: {settings:?}", path.display());
            settings
        }
        Err(e) => {
            log::warn!("Ignoring {}: {e}", path.display());
            Settings::default()
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.profile_samples, 100);
        assert!(settings.show_labels);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "athlete_key = \"surname\"\nsprint_selection = \"single\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.athlete_key, AthleteKey::Surname);
        assert_eq!(settings.sprint_selection, SelectionMode::Single);
        assert_eq!(settings.date_selection, SelectionMode::Multiple);
        assert_eq!(settings.profile_samples, DEFAULT_SAMPLES);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = Settings {
            date_selection: SelectionMode::Single,
            profile_samples: 40,
            show_labels: false,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn rejects_too_few_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "profile_samples = 1\n").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "date_selection = \"some\"\n").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Parse(_))));
    }
}

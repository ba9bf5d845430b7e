// blazestd - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for BlazeVM configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/blazevm/ or %APPDATA%\BlazeVM\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[input]` section.
    pub input: InputSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Maximum characters returned by `input_string`.
    pub max_string_len: Option<usize>,
}

/// Validated configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Maximum characters returned by `input_string`.
    pub max_input_string_len: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            max_input_string_len: constants::DEFAULT_MAX_INPUT_STRING_LEN,
        }
    }
}

/// Read and parse config.toml without validating values.
///
/// `Ok(None)` when the file does not exist.
pub fn read_raw_config(config_path: &Path) -> Result<Option<RawConfig>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;
    let raw = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(raw))
}

/// Validate raw values against named limits.
///
/// Every out-of-range value is reported; valid ones are kept.
pub fn validate(raw: &RawConfig) -> (AppConfig, Vec<ConfigError>) {
    let mut config = AppConfig::default();
    let mut errors = Vec::new();

    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            errors.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    if let Some(len) = raw.input.max_string_len {
        if (constants::MIN_MAX_INPUT_STRING_LEN..=constants::ABSOLUTE_MAX_INPUT_STRING_LEN)
            .contains(&len)
        {
            config.max_input_string_len = len;
        } else {
            errors.push(ConfigError::ValueOutOfRange {
                field: "input.max_string_len".to_string(),
                value: len.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_MAX_INPUT_STRING_LEN,
                    constants::ABSOLUTE_MAX_INPUT_STRING_LEN
                ),
            });
        }
    }

    (config, errors)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning
/// so the launcher still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let raw = match read_raw_config(&config_path) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
            return (AppConfig::default(), Vec::new());
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, errors) = validate(&raw);
    let warnings: Vec<String> = errors
        .iter()
        .map(|e| format!("{e}. Using default."))
        .collect();

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) {
        std::fs::write(dir.join(constants::CONFIG_FILE_NAME), body).unwrap();
    }

    #[test]
    fn test_missing_config_gives_defaults_without_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[logging]\nlevel = \"DEBUG\"\n\n[input]\nmax_string_len = 256\n",
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.max_input_string_len, 256);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[logging]\nlevel = \"loud\"\n\n[input]\nmax_string_len = 0\n",
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 2);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unparseable_config_warns() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[input\nmax_string_len = ");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let raw: RawConfig = toml::from_str("[future]\nflag = true\n").unwrap();
        let (config, errors) = validate(&raw);
        assert!(errors.is_empty());
        assert_eq!(config, AppConfig::default());
    }
}

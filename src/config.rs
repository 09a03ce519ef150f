// Configuration module for dynmap-inspect
// This module handles loading and parsing configuration from ~/.config/dynmap-inspect/config.toml

mod types;

pub use types::{
    Config, DEFAULT_DESC_LEN, DEFAULT_EXAMPLE_LEN, DEFAULT_FIELD_NAME_TOP, DEFAULT_FILE_NAME,
    DEFAULT_SAMPLES, DEFAULT_TOP_N, InputConfig, ReportConfig,
};

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/dynmap-inspect/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

/// Loads configuration from an explicit path with the same fallbacks
pub fn load_config_from(config_path: &Path) -> ConfigResult {
    debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            debug!("Config parsed successfully: {:?}", config.report);
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            debug!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/dynmap-inspect/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("dynmap-inspect")
        .join("config.toml")
}

/// Resolved settings for one report run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// Cutoff for ranked listings
    pub top_n: usize,
    /// Marker samples per kind, 0 disables them
    pub samples: usize,
    /// Whether to run the key-path census
    pub walk: bool,
    pub example_len: usize,
    pub desc_len: usize,
    pub field_name_top: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for InspectOptions {
    fn from(report: &ReportConfig) -> Self {
        InspectOptions {
            top_n: report.top,
            samples: report.samples,
            walk: report.walk,
            example_len: report.example_len,
            desc_len: report.desc_len,
            field_name_top: report.field_name_top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_config_path_location() {
        let path = get_config_path();
        let path_str = path.to_string_lossy();
        assert!(
            path_str.ends_with("dynmap-inspect/config.toml")
                || path_str.ends_with("dynmap-inspect\\config.toml"),
            "unexpected config path: {}",
            path_str
        );
    }

    #[test]
    fn test_missing_file_returns_defaults_silently() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(&dir.path().join("absent.toml"));
        assert!(result.warning.is_none());
        assert_eq!(result.config.report.top, DEFAULT_TOP_N);
    }

    #[test]
    fn test_valid_file_loaded() {
        let (_dir, path) = write_config("[report]\ntop = 7\nwalk = false\n");
        let result = load_config_from(&path);
        assert!(result.warning.is_none());
        assert_eq!(result.config.report.top, 7);
        assert!(!result.config.report.walk);
    }

    #[test]
    fn test_malformed_file_warns_and_defaults() {
        let (_dir, path) = write_config("[report\ntop = 7");
        let result = load_config_from(&path);
        let warning = result.warning.expect("warning expected");
        assert!(warning.starts_with("Invalid config"));
        assert_eq!(result.config.report.top, DEFAULT_TOP_N);
    }

    #[test]
    fn test_directory_instead_of_file_warns() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(dir.path());
        let warning = result.warning.expect("warning expected");
        assert!(warning.starts_with("Failed to read config"));
    }

    #[test]
    fn test_options_from_report_config() {
        let report = ReportConfig {
            top: 3,
            samples: 0,
            walk: false,
            example_len: 40,
            desc_len: 60,
            field_name_top: 9,
        };
        let options = InspectOptions::from(&report);
        assert_eq!(options.top_n, 3);
        assert_eq!(options.samples, 0);
        assert!(!options.walk);
        assert_eq!(options.example_len, 40);
        assert_eq!(options.desc_len, 60);
        assert_eq!(options.field_name_top, 9);
    }

    #[test]
    fn test_default_options() {
        let options = InspectOptions::default();
        assert_eq!(options.top_n, 50);
        assert_eq!(options.samples, 1);
        assert!(options.walk);
    }
}

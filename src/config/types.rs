// Configuration type definitions

use serde::Deserialize;

/// Input file looked up next to the executable when no path is given
pub const DEFAULT_FILE_NAME: &str = "dynmap_world.json";
/// Cutoff for every ranked listing
pub const DEFAULT_TOP_N: usize = 50;
/// Representative marker records rendered per kind
pub const DEFAULT_SAMPLES: usize = 1;
/// Character limit for census examples
pub const DEFAULT_EXAMPLE_LEN: usize = 160;
/// Character limit for marker descriptions
pub const DEFAULT_DESC_LEN: usize = 200;
/// Cutoff for the global field-name listing
pub const DEFAULT_FIELD_NAME_TOP: usize = 50;

/// Input configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_file")]
    pub default_file: String,
}

fn default_file() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            default_file: default_file(),
        }
    }
}

/// Report configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top")]
    pub top: usize,
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_walk")]
    pub walk: bool,
    #[serde(default = "default_example_len")]
    pub example_len: usize,
    #[serde(default = "default_desc_len")]
    pub desc_len: usize,
    #[serde(default = "default_field_name_top")]
    pub field_name_top: usize,
}

fn default_top() -> usize {
    DEFAULT_TOP_N
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_walk() -> bool {
    true
}

fn default_example_len() -> usize {
    DEFAULT_EXAMPLE_LEN
}

fn default_desc_len() -> usize {
    DEFAULT_DESC_LEN
}

fn default_field_name_top() -> usize {
    DEFAULT_FIELD_NAME_TOP
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            top: DEFAULT_TOP_N,
            samples: DEFAULT_SAMPLES,
            walk: true,
            example_len: DEFAULT_EXAMPLE_LEN,
            desc_len: DEFAULT_DESC_LEN,
            field_name_top: DEFAULT_FIELD_NAME_TOP,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

//! Configuration file handling for img2dcpu.
//!
//! Loads configuration from `~/.config/img2dcpu/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::convert::{ConvertOptions, PaletteMode};
use crate::program::{EmitOptions, Layout, DEFAULT_DELAY};

/// Configuration file structure for img2dcpu.
/// Loaded from ~/.config/img2dcpu/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct PaletteConfig {
    #[serde(default)]
    pub mode: PaletteMode,
    #[serde(default = "default_colors")]
    pub colors: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            mode: PaletteMode::default(),
            colors: default_colors(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default = "default_true")]
    pub comments: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            comments: true,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct AnimationConfig {
    #[serde(default = "default_delay")]
    pub delay: u16,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay: default_delay(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_colors() -> usize {
    16
}

fn default_delay() -> u16 {
    DEFAULT_DELAY
}

/// Commented default file written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# img2dcpu configuration

[palette]
# fixed: LEM1802 default colors, adaptive: most frequent image colors
mode = "fixed"
# Adaptive palette size, 4 or 16
colors = 16

[output]
# mapped: HWI-mapped DAT tables, legacy: direct writes to 0x8000
layout = "mapped"
comments = true

[animation]
# Busy-wait iterations between frames
delay = 16384
"#;

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Conversion settings before command-line overrides.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            palette: self.palette.mode,
            colors: self.palette.colors,
            emit: EmitOptions {
                layout: self.output.layout,
                delay: self.animation.delay,
                comments: self.output.comments,
            },
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("img2dcpu").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/img2dcpu/config.toml")
        })
}

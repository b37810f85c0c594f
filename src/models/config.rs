use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "EDGEMAP_CONFIG";

/// Application configuration loaded from a YAML file.
///
/// ```yaml
/// scale: true
/// flat_image: zero
/// overflow: clamp
/// strict_body: false
/// output_encoding: text
/// ```
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Stretch intensities onto 0..=255 before edge detection
    pub scale: bool,

    /// Policy for images whose samples are all equal
    pub flat_image: FlatImageMode,

    /// Policy for gradient magnitudes above 255
    pub overflow: OverflowMode,

    /// Reject bodies with data past the declared sample count
    pub strict_body: bool,

    /// Output encoding (defaults to the input's)
    pub output_encoding: Option<EncodingName>,
}

/// Flat image handling, as named in config files and on the command line.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FlatImageMode {
    /// Leave the image unchanged
    #[default]
    Skip,
    /// Turn every pixel black
    Zero,
    /// Fail the run
    Reject,
}

/// Gradient overflow handling, as named in config files and on the command line.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowMode {
    /// Saturate at 255
    #[default]
    Clamp,
    /// Keep raw magnitudes (text output only)
    Keep,
    /// Fail the run
    Reject,
}

/// Body encoding, as named in config files and on the command line.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingName {
    /// P5, one byte per pixel
    Packed,
    /// P2, decimal text
    Text,
}

impl From<FlatImageMode> for graymap::FlatImagePolicy {
    fn from(mode: FlatImageMode) -> Self {
        match mode {
            FlatImageMode::Skip => graymap::FlatImagePolicy::Skip,
            FlatImageMode::Zero => graymap::FlatImagePolicy::Zero,
            FlatImageMode::Reject => graymap::FlatImagePolicy::Reject,
        }
    }
}

impl From<OverflowMode> for graymap::OverflowPolicy {
    fn from(mode: OverflowMode) -> Self {
        match mode {
            OverflowMode::Clamp => graymap::OverflowPolicy::Clamp,
            OverflowMode::Keep => graymap::OverflowPolicy::Keep,
            OverflowMode::Reject => graymap::OverflowPolicy::Reject,
        }
    }
}

impl From<EncodingName> for graymap::Encoding {
    fn from(name: EncodingName) -> Self {
        match name {
            EncodingName::Packed => graymap::Encoding::Packed,
            EncodingName::Text => graymap::Encoding::Text,
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load configuration from a file, failing on any error
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolve configuration from an explicit path or the environment.
    ///
    /// An explicit path must load. A path from `EDGEMAP_CONFIG` that fails
    /// is logged and defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            Some(path) => match Self::from_file(&path) {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!(%e, "Failed to load config from environment, using defaults");
                    Ok(Self::default())
                }
            },
            None => Ok(Self::default()),
        }
    }
}

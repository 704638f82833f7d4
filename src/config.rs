//! Avatar style configuration
//!
//! An avatar style is described by its asset tree layout and its canvas.
//! Both can be loaded from a TOML file; every key is optional:
//!
//! ```toml
//! [assets]
//! root = "assets"
//! common = "common"
//! dimensions = ["country", "gender"]
//! extensions = ["svg"]
//!
//! [canvas]
//! width = 512
//! height = 512
//! view_box = "0 0 512 512"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::layer::DEFAULT_EXTENSIONS;
use crate::renderer::CanvasConfig;
use crate::selection::COMMON;

/// Upper bound on selection dimensions; each one doubles the candidate directories
pub const MAX_DIMENSIONS: usize = 16;

/// Errors that can occur when loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Layout of the asset tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Asset root directory
    pub root: PathBuf,
    /// Directory name standing in for any dimension
    pub common: String,
    /// Selection dimensions, outermost directory first
    pub dimensions: Vec<String>,
    /// Fragment file extensions, without the dot
    pub extensions: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            common: COMMON.to_string(),
            dimensions: vec!["country".to_string(), "gender".to_string()],
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Complete configuration for one avatar style
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    pub assets: AssetConfig,
    pub canvas: CanvasConfig,
}

impl AvatarConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// A relative asset root is resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;
        if config.assets.root.is_relative() {
            if let Some(dir) = path.parent() {
                config.assets.root = dir.join(&config.assets.root);
            }
        }
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: AvatarConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the asset root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets.root = root.into();
        self
    }

    /// Set the selection dimensions
    pub fn with_dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assets.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the canvas configuration
    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        let assets = &self.assets;
        if assets.common.trim().is_empty() {
            return Err(ConfigError::Invalid("assets.common must not be empty".into()));
        }
        if assets.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "assets.extensions must list at least one extension".into(),
            ));
        }
        if assets.dimensions.len() > MAX_DIMENSIONS {
            return Err(ConfigError::Invalid(format!(
                "at most {} dimensions are supported, got {}",
                MAX_DIMENSIONS,
                assets.dimensions.len()
            )));
        }
        for (i, dim) in assets.dimensions.iter().enumerate() {
            if dim.trim().is_empty() {
                return Err(ConfigError::Invalid("dimension names must not be empty".into()));
            }
            if assets.dimensions[..i].contains(dim) {
                return Err(ConfigError::Invalid(format!("duplicate dimension '{}'", dim)));
            }
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(
                "canvas width and height must be positive".into(),
            ));
        }
        Ok(())
    }
}

//! Plot configuration.
//!
//! YAML configuration for plot dimensions, margins and the data directory.
//! Every field has a default, so an empty document is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the temperature anomaly CSV inside the data directory.
pub const GISTEMP_FILE: &str = "gistemp.csv";

/// Frame margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Space above the frame.
    #[serde(default = "default_margin_top")]
    pub top: f32,
    /// Space right of the frame.
    #[serde(default = "default_margin_right")]
    pub right: f32,
    /// Space below the frame, holding the x axis.
    #[serde(default = "default_margin_bottom")]
    pub bottom: f32,
    /// Space left of the frame, holding the y axis.
    #[serde(default = "default_margin_left")]
    pub left: f32,
}

fn default_margin_top() -> f32 {
    20.0
}
fn default_margin_right() -> f32 {
    20.0
}
fn default_margin_bottom() -> f32 {
    30.0
}
fn default_margin_left() -> f32 {
    40.0
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: default_margin_top(),
            right: default_margin_right(),
            bottom: default_margin_bottom(),
            left: default_margin_left(),
        }
    }
}

/// Plot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Output width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Frame margins.
    #[serde(default)]
    pub margin: Margin,

    /// Directory holding the demo CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Radius of dot marks.
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f32,
}

fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    400
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_dot_radius() -> f32 {
    3.0
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: Margin::default(),
            data_dir: default_data_dir(),
            dot_radius: default_dot_radius(),
        }
    }
}

impl PlotConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file cannot be read, or
    /// [`Error::ConfigParse`] if it is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Path of the temperature anomaly CSV.
    #[must_use]
    pub fn gistemp_path(&self) -> PathBuf {
        self.data_dir.join(GISTEMP_FILE)
    }
}

//! Pipeline and rendering settings.
//!
//! Settings come from an optional JSON file; command-line flags override it.

use std::{fs, path::{Path, PathBuf}};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{io::shp::DEFAULT_NAME_FIELD, join::KeyNormalization};

/// Inputs and join policy for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Delimited observation file (`State`, `Drought_Percentage`, `Crop_Type`).
    pub observations: PathBuf,
    /// Boundary shapefile, or a directory holding exactly one.
    pub boundaries: PathBuf,
    /// Attribute naming each region in the boundary data.
    pub name_field: String,
    /// Single-byte field delimiter of the observation file.
    pub delimiter: char,
    pub normalization: KeyNormalization,
    /// Fail the run when any join key is left unmatched.
    pub strict_join: bool,
    pub render: RenderOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            observations: PathBuf::from("indian_states_drought.csv"),
            boundaries: PathBuf::from("data"),
            name_field: DEFAULT_NAME_FIELD.to_string(),
            delimiter: ',',
            normalization: KeyNormalization::default(),
            strict_join: false,
            render: RenderOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("[config] Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// The delimiter as a byte, for the CSV reader.
    pub fn delimiter_byte(&self) -> Result<u8> {
        ensure!(self.delimiter.is_ascii(), "[config] delimiter {:?} must be a single ASCII character", self.delimiter);
        Ok(self.delimiter as u8)
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        ensure!(!self.name_field.trim().is_empty(), "[config] name_field must not be empty");
        self.render.validate()
    }
}

/// Canvas settings for SVG output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Canvas width in pixels; height follows from the data.
    pub width: f64,
    pub margin: f64,
    pub map_title: String,
    pub pie_title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            margin: 10.0,
            map_title: "Drought Percentage by State".to_string(),
            pie_title: "Mean Drought Percentage by State".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.width.is_finite() && self.width > 0.0, "[config] render width must be positive");
        ensure!(
            self.margin.is_finite() && self.margin >= 0.0 && 2.0 * self.margin < self.width,
            "[config] render margin must be non-negative and leave room to draw"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{PipelineConfig, RenderOptions};
    use crate::join::KeyNormalization;

    #[test]
    fn defaults_follow_the_dashboard_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.name_field, "st_nm");
        assert_eq!(config.delimiter_byte().unwrap(), b',');
        assert_eq!(config.normalization, KeyNormalization::Exact);
        assert!(!config.strict_join);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name_field": "NAME_1", "normalization": "case-insensitive", "render": {{ "width": 800 }} }}"#).unwrap();

        let config = PipelineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.name_field, "NAME_1");
        assert_eq!(config.normalization, KeyNormalization::CaseInsensitive);
        assert_eq!(config.render.width, 800.0);
        assert_eq!(config.render.margin, RenderOptions::default().margin);
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name_feild": "NAME_1" }}"#).unwrap();
        assert!(PipelineConfig::from_json_file(file.path()).is_err());
    }

    #[test]
    fn non_ascii_delimiter_is_invalid() {
        let config = PipelineConfig { delimiter: '§', ..PipelineConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn margin_must_fit() {
        let render = RenderOptions { width: 100.0, margin: 60.0, ..RenderOptions::default() };
        assert!(render.validate().is_err());
    }
}

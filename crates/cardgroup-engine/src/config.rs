//! Engine configuration.
//!
//! Loaded from TOML; every field has a default so a partial file is valid:
//!
//! ```toml
//! [palette]
//! saturation = 65
//!
//! [labels]
//! item_prefix = "Card"
//! ```

use std::path::Path;

use cardgroup_model::Hsl;
use cardgroup_model::color::{DEFAULT_SATURATION, PASTEL_LIGHTNESS, VIVID_LIGHTNESS};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Engine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Colors assigned to new groups and items.
    pub palette: PaletteConfig,

    /// Default titles and texts for generated entities.
    pub labels: LabelConfig,
}

/// Saturation and lightness used for generated colors.
///
/// Hues are always random; these values keep group chrome pastel and item
/// faces vivid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub saturation: u8,
    pub group_lightness: u8,
    pub item_lightness: u8,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            saturation: DEFAULT_SATURATION,
            group_lightness: PASTEL_LIGHTNESS,
            item_lightness: VIVID_LIGHTNESS,
        }
    }
}

/// Prefixes for ordinal labels ("Group 3", "Item 7").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub group_prefix: String,
    pub item_prefix: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            group_prefix: "Group".to_string(),
            item_prefix: "Item".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let palette = &self.palette;
        for (field, value) in [
            ("palette.saturation", palette.saturation),
            ("palette.group_lightness", palette.group_lightness),
            ("palette.item_lightness", palette.item_lightness),
        ] {
            if value > 100 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} exceeds 100%"),
                });
            }
        }
        if self.labels.group_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "labels.group_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.labels.item_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "labels.item_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn group_color(&self, hue: u16) -> Hsl {
        Hsl::new(hue, self.palette.saturation, self.palette.group_lightness)
    }

    #[must_use]
    pub fn item_color(&self, hue: u16) -> Hsl {
        Hsl::new(hue, self.palette.saturation, self.palette.item_lightness)
    }

    pub(crate) fn group_title(&self, ordinal: usize) -> String {
        format!("{} {ordinal}", self.labels.group_prefix)
    }

    pub(crate) fn item_text(&self, ordinal: usize) -> String {
        format!("{} {ordinal}", self.labels.item_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("[labels]\nitem_prefix = \"Card\"\n").unwrap();
        assert_eq!(config.labels.item_prefix, "Card");
        assert_eq!(config.labels.group_prefix, "Group");
        assert_eq!(config.palette, PaletteConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn lightness_above_100_is_rejected() {
        let err = EngineConfig::from_toml_str("[palette]\ngroup_lightness = 120\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "palette.group_lightness",
                ..
            }
        ));
    }

    #[test]
    fn colors_follow_palette() {
        let config = EngineConfig::default();
        assert_eq!(config.group_color(40).to_css(), "hsl(40, 70%, 90%)");
        assert_eq!(config.item_color(40).to_css(), "hsl(40, 70%, 60%)");
        assert_eq!(config.group_title(3), "Group 3");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::load_from(Path::new("/nonexistent/cardgroup.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cardgroup.toml"));
    }
}

//! Editor configuration.
//!
//! The configuration is read-only for the lifetime of an editing session.
//! Field names serialize in camelCase so a JavaScript host can hand its
//! config object over unchanged.

use crate::error::ConfigError;
use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Aspect ratio used when the host does not provide one.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.6;

/// Which operations the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorMode {
    /// All operations are available; the editor starts in operation select.
    #[default]
    Full,
    /// Only cropping; the editor starts and stays in crop mode.
    CropOnly,
}

/// Crop constraints for one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Smallest crop frame a resize may produce (viewport pixels)
    pub minimum_crop_dimensions: Size,
    /// Width / height ratio enforced when the aspect ratio is locked
    pub fixed_aspect_ratio: f64,
    /// Whether resizes keep `fixed_aspect_ratio`
    pub is_aspect_ratio_locked: bool,
    /// Which operations are offered
    pub mode: EditorMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            minimum_crop_dimensions: Size::new(0.0, 0.0),
            fixed_aspect_ratio: DEFAULT_ASPECT_RATIO,
            is_aspect_ratio_locked: false,
            mode: EditorMode::Full,
        }
    }
}

impl EditorConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock resizes to the given aspect ratio.
    pub fn locked(aspect_ratio: f64) -> Self {
        Self {
            fixed_aspect_ratio: aspect_ratio,
            is_aspect_ratio_locked: true,
            ..Self::default()
        }
    }

    pub fn with_minimum(mut self, width: f64, height: f64) -> Self {
        self.minimum_crop_dimensions = Size::new(width, height);
        self
    }

    pub fn with_mode(mut self, mode: EditorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check that every constraint is usable by the crop frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = self.fixed_aspect_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(ratio));
        }

        let Size { width, height } = self.minimum_crop_dimensions;
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ConfigError::InvalidMinimumDimensions { width, height });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::new();
        assert_eq!(config.fixed_aspect_ratio, 1.6);
        assert!(!config.is_aspect_ratio_locked);
        assert_eq!(config.minimum_crop_dimensions, Size::new(0.0, 0.0));
        assert_eq!(config.mode, EditorMode::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_locked_builder() {
        let config = EditorConfig::locked(2.0).with_minimum(10.0, 5.0);
        assert!(config.is_aspect_ratio_locked);
        assert_eq!(config.fixed_aspect_ratio, 2.0);
        assert_eq!(config.minimum_crop_dimensions, Size::new(10.0, 5.0));
    }

    #[test]
    fn test_rejects_bad_aspect_ratio() {
        for ratio in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = EditorConfig::locked(ratio);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidAspectRatio(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_minimum() {
        let config = EditorConfig::new().with_minimum(-1.0, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMinimumDimensions { .. })
        ));

        let config = EditorConfig::new().with_minimum(0.0, f64::NAN);
        assert!(config.validate().is_err());
    }
}

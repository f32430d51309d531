//! Field and page configuration
//!
//! Every field is optional in JSON; missing values fall back to the defaults
//! below, which reproduce the stock portfolio background.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::Blending;
use crate::error::{FieldError, Result};

/// Default id of the background canvas element
pub const DEFAULT_CANVAS_ID: &str = "bg-canvas";

/// Env var naming a config file for the CLI
pub const CONFIG_ENV: &str = "PARTICLE_FIELD_CONFIG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of points in the cloud
    pub count: usize,
    /// Edge length of the sampling cube centred on the origin
    pub extent: f32,
    pub camera: CameraConfig,
    pub motion: MotionConfig,
    pub style: StyleConfig,
    pub page: PageConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 1500,
            extent: 15.0,
            camera: CameraConfig::default(),
            motion: MotionConfig::default(),
            style: StyleConfig::default(),
            page: PageConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Standoff distance along +Z
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Radians added to the X rotation every frame
    pub rotation_x_per_frame: f32,
    /// Radians added to the Y rotation every frame
    pub rotation_y_per_frame: f32,
    /// Pointer offset multiplier giving the parallax target
    pub parallax_scale: f32,
    /// Fraction of the remaining gap closed per frame
    pub smoothing: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rotation_x_per_frame: 0.0003,
            rotation_y_per_frame: 0.0005,
            parallax_scale: 0.5,
            smoothing: 0.02,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Point size in world units
    pub point_size: f32,
    pub opacity: f32,
    /// Upper bound on the device pixel ratio used for the drawing surface
    pub max_pixel_ratio: f64,
    /// `"additive"` (default) or `"normal"`
    pub blending: Blending,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            point_size: 0.03,
            opacity: 0.8,
            max_pixel_ratio: 2.0,
            blending: Blending::Additive,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub canvas_id: String,
    /// Phrases cycled by the typing effect
    pub roles: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            roles: [
                "ML pipelines",
                "data warehouses",
                "predictive models",
                "ETL systems",
                "dashboards",
                "insights from chaos",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl FieldConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: &str) -> Result<()> {
            Err(FieldError::InvalidConfig(msg.to_string()))
        }

        if self.count == 0 {
            return invalid("count must be positive");
        }
        if !(self.extent > 0.0) {
            return invalid("extent must be positive");
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return invalid("fov_degrees must be in (0, 180)");
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return invalid("near must be positive and below far");
        }
        if !(self.motion.smoothing > 0.0 && self.motion.smoothing <= 1.0) {
            return invalid("smoothing must be in (0, 1]");
        }
        if !(0.0..=1.0).contains(&self.style.opacity) {
            return invalid("opacity must be in [0, 1]");
        }
        if !(self.style.point_size > 0.0) {
            return invalid("point_size must be positive");
        }
        if !(self.style.max_pixel_ratio > 0.0) {
            return invalid("max_pixel_ratio must be positive");
        }
        if self.page.roles.is_empty() {
            return invalid("roles must not be empty");
        }
        if self.page.roles.iter().any(|r| r.is_empty()) {
            return invalid("roles must not contain empty strings");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.count, 1500);
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert_eq!(config.motion.smoothing, 0.02);
        assert_eq!(config.page.roles.len(), 6);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FieldConfig::from_json(r#"{"count": 200, "motion": {"smoothing": 0.1}}"#)
            .unwrap();
        assert_eq!(config.count, 200);
        assert_eq!(config.motion.smoothing, 0.1);
        assert_eq!(config.motion.parallax_scale, 0.5);
        assert_eq!(config.extent, 15.0);
    }

    #[test]
    fn blending_is_configurable() {
        assert_eq!(FieldConfig::default().style.blending, Blending::Additive);
        let config = FieldConfig::from_json(r#"{"style": {"blending": "normal"}}"#).unwrap();
        assert_eq!(config.style.blending, Blending::Normal);
        assert!(matches!(
            FieldConfig::from_json(r#"{"style": {"blending": "multiply"}}"#),
            Err(FieldError::ConfigParse(_))
        ));
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(FieldConfig::from_json("{}").unwrap(), FieldConfig::default());
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            r#"{"count": 0}"#,
            r#"{"extent": -1.0}"#,
            r#"{"camera": {"near": 10.0, "far": 1.0}}"#,
            r#"{"camera": {"fov_degrees": 180.0}}"#,
            r#"{"motion": {"smoothing": 0.0}}"#,
            r#"{"motion": {"smoothing": 1.5}}"#,
            r#"{"style": {"opacity": 2.0}}"#,
            r#"{"page": {"roles": []}}"#,
            r#"{"page": {"roles": ["ok", ""]}}"#,
        ];
        for json in cases {
            assert!(
                matches!(FieldConfig::from_json(json), Err(FieldError::InvalidConfig(_))),
                "{} should be rejected",
                json
            );
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            FieldConfig::from_json("{count:"),
            Err(FieldError::ConfigParse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            FieldConfig::from_file("/nonexistent/particle-field.json"),
            Err(FieldError::ConfigIo(_))
        ));
    }
}

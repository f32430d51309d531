//! Rendering seam between the particle core and concrete surfaces
//!
//! The field knows how to project itself; a surface only has to paint
//! squares. Implementations: 2D canvas (browser), egui painter (native
//! preview), and `CountingSurface` (headless runs and tests).

use serde::{Deserialize, Serialize};

use super::camera::Viewport;
use super::field::ParticleField;
use crate::config::StyleConfig;
use crate::error::Result;

/// How overlapping points combine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blending {
    /// Source color added onto the destination
    #[default]
    Additive,
    /// Source-over with `opacity` as alpha
    Normal,
}

/// Immutable rendering mode of the cloud
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
    pub blending: Blending,
    /// Per-point vertex colors instead of a single material color
    pub vertex_colors: bool,
    /// World-space point size, attenuated by depth when drawn
    pub size: f32,
    pub opacity: f32,
}

impl PointStyle {
    pub fn from_config(style: &StyleConfig) -> Self {
        Self {
            blending: style.blending,
            vertex_colors: true,
            size: style.point_size,
            opacity: style.opacity,
        }
    }

    /// On-screen edge length in CSS pixels for a point `depth` units away
    pub fn screen_size(&self, depth: f32, viewport_height: f32) -> f32 {
        self.size * (viewport_height * 0.5) / depth
    }
}

/// A point ready for painting, in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
    pub size: f32,
    pub color: [f32; 3],
}

/// Anything that can paint a particle field
pub trait RenderSurface {
    /// Match the drawing buffer to a new viewport
    fn resize(&mut self, viewport: Viewport) -> Result<()>;

    /// Paint one frame
    fn draw(&mut self, field: &ParticleField) -> Result<()>;
}

/// Surface that paints nothing and records what it would have drawn
#[derive(Debug, Default)]
pub struct CountingSurface {
    pub frames: u64,
    pub last_visible: usize,
    pub resizes: u32,
    pub buffer_size: (u32, u32),
    max_pixel_ratio: f64,
}

impl CountingSurface {
    pub fn new(max_pixel_ratio: f64) -> Self {
        Self {
            max_pixel_ratio,
            ..Default::default()
        }
    }
}

impl RenderSurface for CountingSurface {
    fn resize(&mut self, viewport: Viewport) -> Result<()> {
        self.resizes += 1;
        self.buffer_size = viewport.surface_size(self.max_pixel_ratio);
        Ok(())
    }

    fn draw(&mut self, field: &ParticleField) -> Result<()> {
        self.frames += 1;
        self.last_visible = field.project().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_defaults() {
        let style = PointStyle::from_config(&StyleConfig::default());
        assert_eq!(style.blending, Blending::Additive);
        assert!(style.vertex_colors);
        assert_eq!(style.size, 0.03);
        assert_eq!(style.opacity, 0.8);
    }

    #[test]
    fn test_style_follows_configured_blending() {
        let config = StyleConfig {
            blending: Blending::Normal,
            ..StyleConfig::default()
        };
        assert_eq!(PointStyle::from_config(&config).blending, Blending::Normal);
    }

    #[test]
    fn test_screen_size_attenuates_with_depth() {
        let style = PointStyle::from_config(&StyleConfig::default());
        let near = style.screen_size(2.5, 900.0);
        let far = style.screen_size(5.0, 900.0);
        assert!((far - 2.7).abs() < 1e-4);
        assert!((near - 2.0 * far).abs() < 1e-4);
    }
}

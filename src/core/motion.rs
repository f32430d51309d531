//! Cloud motion: frame-coupled tumble plus pointer parallax

use glam::{EulerRot, Mat4, Vec2, Vec3};
use std::f32::consts::TAU;

use crate::config::MotionConfig;

/// Normalized pointer position, both axes in [-1, 1] (+Y up)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    /// Convert client coordinates to a centred offset. Degenerate viewports
    /// give a centred pointer rather than NaN.
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        if !(width > 0.0 && height > 0.0) {
            return Self::default();
        }
        Self {
            x: (client_x / width) * 2.0 - 1.0,
            y: -(client_y / height) * 2.0 + 1.0,
        }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Rotation and translation applied to the whole cloud
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CloudTransform {
    /// Radians about X and Y, kept in [0, TAU)
    pub rotation: Vec2,
    /// Translation in the XY plane
    pub translation: Vec2,
}

impl CloudTransform {
    /// Advance one frame: fixed rotation steps, then exponential smoothing of
    /// the translation toward `pointer * parallax_scale`.
    pub fn advance(&mut self, pointer: PointerOffset, motion: &MotionConfig) {
        self.rotation.x = (self.rotation.x + motion.rotation_x_per_frame).rem_euclid(TAU);
        self.rotation.y = (self.rotation.y + motion.rotation_y_per_frame).rem_euclid(TAU);

        let target = pointer.as_vec2() * motion.parallax_scale;
        self.translation += (target - self.translation) * motion.smoothing;
    }

    /// Model matrix: translate after rotating (Euler XYZ)
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.translation.x, self.translation.y, 0.0))
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_offset_corners() {
        let tl = PointerOffset::from_client(0.0, 0.0, 800.0, 600.0);
        assert_eq!(tl, PointerOffset { x: -1.0, y: 1.0 });
        let br = PointerOffset::from_client(800.0, 600.0, 800.0, 600.0);
        assert_eq!(br, PointerOffset { x: 1.0, y: -1.0 });
        let mid = PointerOffset::from_client(400.0, 300.0, 800.0, 600.0);
        assert_eq!(mid, PointerOffset { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_pointer_offset_degenerate_viewport() {
        assert_eq!(
            PointerOffset::from_client(10.0, 10.0, 0.0, 0.0),
            PointerOffset::default()
        );
    }

    #[test]
    fn test_single_advance_from_rest() {
        let mut t = CloudTransform::default();
        let motion = MotionConfig::default();
        t.advance(PointerOffset { x: 1.0, y: -1.0 }, &motion);

        assert_eq!(t.rotation, Vec2::new(0.0003, 0.0005));
        // 2% of the gap to (0.5, -0.5)
        assert!((t.translation.x - 0.01).abs() < 1e-7);
        assert!((t.translation.y + 0.01).abs() < 1e-7);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut t = CloudTransform {
            rotation: Vec2::new(TAU - 0.0001, 0.0),
            translation: Vec2::ZERO,
        };
        t.advance(PointerOffset::default(), &MotionConfig::default());
        assert!((t.rotation.x - 0.0002).abs() < 1e-5);
    }

    #[test]
    fn test_model_matrix_translates_origin() {
        let t = CloudTransform {
            rotation: Vec2::new(0.3, 1.2),
            translation: Vec2::new(0.25, -0.5),
        };
        let origin = t.model_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.25, -0.5, 0.0)).length() < 1e-6);
    }
}

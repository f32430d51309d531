//! Perspective camera looking down -Z at the origin

use glam::{Mat4, Vec3, Vec4};

use crate::config::CameraConfig;

/// Viewport in CSS pixels plus the device pixel ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Zero or negative dimensions (minimized window, detached canvas)
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Drawing-buffer size in device pixels, with the ratio capped at `max_ratio`
    pub fn surface_size(&self, max_ratio: f64) -> (u32, u32) {
        let ratio = self.pixel_ratio.min(max_ratio);
        (
            (self.width as f64 * ratio).round() as u32,
            (self.height as f64 * ratio).round() as u32,
        )
    }
}

/// Point in normalized device coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NdcPoint {
    pub x: f32,
    pub y: f32,
    /// Distance in front of the camera (view-space -z)
    pub depth: f32,
}

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    fov_y: f32,
    near: f32,
    far: f32,
    aspect: f32,
    projection: Mat4,
    view: Mat4,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let position = Vec3::new(0.0, 0.0, config.distance);
        let mut camera = Self {
            fov_y: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            aspect,
            projection: Mat4::IDENTITY,
            view: Mat4::from_translation(-position),
        };
        camera.update_projection();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Recompute the projection for a new width / height ratio
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far);
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Project a world-space point; `None` when behind the camera or outside
    /// the near/far range.
    pub fn project(&self, view_projection: &Mat4, world: Vec3) -> Option<NdcPoint> {
        let clip: Vec4 = *view_projection * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(NdcPoint {
            x: ndc.x,
            y: ndc.y,
            // perspective_rh_gl puts view-space -z into clip.w
            depth: clip.w,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(&CameraConfig::default(), 16.0 / 9.0)
    }

    #[test]
    fn test_origin_projects_to_center() {
        let cam = camera();
        let vp = cam.view_projection();
        let p = cam.project(&vp, Vec3::ZERO).unwrap();
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
        assert!((p.depth - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_behind_camera_is_culled() {
        let cam = camera();
        let vp = cam.view_projection();
        assert!(cam.project(&vp, Vec3::new(0.0, 0.0, 6.0)).is_none());
        // Closer than the near plane
        assert!(cam.project(&vp, Vec3::new(0.0, 0.0, 4.95)).is_none());
    }

    #[test]
    fn test_set_aspect_changes_horizontal_scale() {
        let mut cam = camera();
        let point = Vec3::new(1.0, 0.0, 0.0);
        let wide = cam.project(&cam.view_projection(), point).unwrap().x;
        cam.set_aspect(1.0);
        assert_eq!(cam.aspect(), 1.0);
        let square = cam.project(&cam.view_projection(), point).unwrap().x;
        assert!((square / wide - 16.0 / 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_surface_size_caps_ratio() {
        let vp = Viewport::new(800.0, 600.0, 3.0);
        assert_eq!(vp.surface_size(2.0), (1600, 1200));
        let vp = Viewport::new(800.0, 600.0, 1.5);
        assert_eq!(vp.surface_size(2.0), (1200, 900));
    }

    #[test]
    fn test_degenerate_viewport() {
        assert!(Viewport::new(0.0, 600.0, 1.0).is_degenerate());
        assert!(Viewport::new(800.0, 0.0, 1.0).is_degenerate());
        assert!(!Viewport::new(800.0, 600.0, 1.0).is_degenerate());
    }
}

//! Particle field: the cloud, its camera and its per-frame motion

use glam::Vec3;
use rand::Rng;
use tracing::debug;

use super::camera::{PerspectiveCamera, Viewport};
use super::cloud::PointCloud;
use super::motion::{CloudTransform, PointerOffset};
use super::render::{PointStyle, ProjectedPoint};
use crate::config::FieldConfig;

/// A slowly tumbling, pointer-reactive cloud of colored points.
///
/// Owns all of its state: there are no globals. Pointer and resize handlers
/// only write state; nothing is drawn until the next `step` is submitted.
#[derive(Clone, Debug)]
pub struct ParticleField {
    config: FieldConfig,
    cloud: PointCloud,
    style: PointStyle,
    camera: PerspectiveCamera,
    viewport: Viewport,
    pointer: PointerOffset,
    transform: CloudTransform,
    frame: u64,
}

impl ParticleField {
    pub fn new<R: Rng>(config: FieldConfig, viewport: Viewport, rng: &mut R) -> Self {
        let cloud = PointCloud::generate(config.count, config.extent, rng);
        let style = PointStyle::from_config(&config.style);
        let aspect = if viewport.is_degenerate() {
            1.0
        } else {
            viewport.aspect()
        };
        let camera = PerspectiveCamera::new(&config.camera, aspect);

        debug!(
            count = cloud.len(),
            width = viewport.width,
            height = viewport.height,
            "Particle field created"
        );

        Self {
            config,
            cloud,
            style,
            camera,
            viewport,
            pointer: PointerOffset::default(),
            transform: CloudTransform::default(),
            frame: 0,
        }
    }

    /// Advance one display frame
    pub fn step(&mut self) {
        self.transform.advance(self.pointer, &self.config.motion);
        self.frame += 1;
    }

    /// Record a pointer move in client coordinates
    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.pointer = PointerOffset::from_client(
            client_x,
            client_y,
            self.viewport.width,
            self.viewport.height,
        );
    }

    /// Adopt new viewport dimensions. Degenerate sizes are ignored.
    /// Returns whether the viewport was applied.
    pub fn on_resize(&mut self, viewport: Viewport) -> bool {
        if viewport.is_degenerate() {
            debug!(width = viewport.width, height = viewport.height, "Ignoring degenerate resize");
            return false;
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        true
    }

    /// Points in front of the camera, in CSS pixels, in cloud order
    pub fn project(&self) -> impl Iterator<Item = ProjectedPoint> + '_ {
        let mvp = self.camera.view_projection() * self.transform.model_matrix();
        let (width, height) = (self.viewport.width, self.viewport.height);

        self.cloud.iter().filter_map(move |(pos, color)| {
            let ndc = self.camera.project(&mvp, Vec3::from_array(*pos))?;
            Some(ProjectedPoint {
                x: (ndc.x + 1.0) * 0.5 * width,
                y: (1.0 - ndc.y) * 0.5 * height,
                depth: ndc.depth,
                size: self.style.screen_size(ndc.depth, height),
                color: *color,
            })
        })
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn style(&self) -> &PointStyle {
        &self.style
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> PointerOffset {
        self.pointer
    }

    pub fn transform(&self) -> &CloudTransform {
        &self.transform
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Frames stepped since creation
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

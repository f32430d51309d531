//! Frame loop with explicit cancellation
//!
//! The host scheduler (requestAnimationFrame, egui repaint, or a plain `for`
//! in tests) calls `tick` once per refresh and re-schedules only when it
//! returns `LoopControl::Continue`.

use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, warn};

use super::camera::Viewport;
use super::field::ParticleField;
use super::render::RenderSurface;

/// Shared stop flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub struct FrameLoop<S: RenderSurface> {
    field: ParticleField,
    surface: S,
    token: CancelToken,
}

impl<S: RenderSurface> FrameLoop<S> {
    pub fn new(field: ParticleField, surface: S) -> Self {
        Self {
            field,
            surface,
            token: CancelToken::new(),
        }
    }

    /// Token that stops this loop when cancelled
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Step the field and submit it to the surface. A failed draw stops the
    /// loop; the background is decorative so nothing else is affected.
    pub fn tick(&mut self) -> LoopControl {
        if self.token.is_cancelled() {
            return LoopControl::Stop;
        }

        self.field.step();

        if let Err(e) = self.surface.draw(&self.field) {
            warn!(error = %e, frame = self.field.frame(), "Draw failed, stopping particle field");
            self.token.cancel();
            return LoopControl::Stop;
        }
        LoopControl::Continue
    }

    /// Run at most `frames` ticks; returns how many completed
    pub fn run_for(&mut self, frames: u64) -> u64 {
        let mut done = 0;
        while done < frames && self.tick() == LoopControl::Continue {
            done += 1;
        }
        debug!(requested = frames, done, "Bounded frame run finished");
        done
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.field.on_pointer_move(client_x, client_y);
    }

    /// Resize camera and surface together
    pub fn on_resize(&mut self, viewport: Viewport) {
        if !self.field.on_resize(viewport) {
            return;
        }
        if let Err(e) = self.surface.resize(viewport) {
            warn!(error = %e, "Surface resize failed");
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::core::render::CountingSurface;
    use crate::error::{FieldError, Result};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field() -> ParticleField {
        ParticleField::new(
            FieldConfig::default(),
            Viewport::new(800.0, 600.0, 1.0),
            &mut StdRng::seed_from_u64(5),
        )
    }

    #[test]
    fn test_bounded_run() {
        let mut frame_loop = FrameLoop::new(field(), CountingSurface::new(2.0));
        assert_eq!(frame_loop.run_for(120), 120);
        assert_eq!(frame_loop.field().frame(), 120);
        assert_eq!(frame_loop.surface().frames, 120);
        assert!(frame_loop.surface().last_visible > 0);
    }

    #[test]
    fn test_cancel_stops_loop() {
        let mut frame_loop = FrameLoop::new(field(), CountingSurface::new(2.0));
        let token = frame_loop.token();
        assert_eq!(frame_loop.tick(), LoopControl::Continue);
        token.cancel();
        assert_eq!(frame_loop.tick(), LoopControl::Stop);
        assert_eq!(frame_loop.run_for(10), 0);
        assert_eq!(frame_loop.field().frame(), 1);
    }

    #[test]
    fn test_resize_reaches_surface() {
        let mut frame_loop = FrameLoop::new(field(), CountingSurface::new(2.0));
        frame_loop.on_resize(Viewport::new(1024.0, 512.0, 3.0));
        assert_eq!(frame_loop.surface().resizes, 1);
        assert_eq!(frame_loop.surface().buffer_size, (2048, 1024));
        assert_eq!(frame_loop.field().camera().aspect(), 2.0);

        // Degenerate sizes never reach the surface
        frame_loop.on_resize(Viewport::new(0.0, 0.0, 1.0));
        assert_eq!(frame_loop.surface().resizes, 1);
    }

    struct FailingSurface {
        draws: u32,
    }

    impl RenderSurface for FailingSurface {
        fn resize(&mut self, _viewport: Viewport) -> Result<()> {
            Ok(())
        }

        fn draw(&mut self, _field: &ParticleField) -> Result<()> {
            self.draws += 1;
            if self.draws > 3 {
                return Err(FieldError::Draw("context lost".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_draw_failure_stops_quietly() {
        let mut frame_loop = FrameLoop::new(field(), FailingSurface { draws: 0 });
        let token = frame_loop.token();
        assert_eq!(frame_loop.run_for(10), 3);
        assert!(token.is_cancelled());
        assert_eq!(frame_loop.tick(), LoopControl::Stop);
    }
}

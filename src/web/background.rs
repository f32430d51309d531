//! Full-viewport particle background bound to a canvas element

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::canvas::CanvasSurface;
use super::dom::{document, viewport, window, Listener};
use super::scheduler::{Recurring, Schedule};
use crate::config::FieldConfig;
use crate::core::{CancelToken, FrameLoop, LoopControl, ParticleField, RenderSurface};
use crate::error::{FieldError, Result};

/// Running background. Dropping it stops the loop and detaches listeners.
pub struct Background {
    frame_loop: Rc<RefCell<FrameLoop<CanvasSurface>>>,
    token: CancelToken,
    _listeners: Vec<Listener>,
    _animation: Recurring,
}

impl Background {
    pub fn mount(config: &FieldConfig) -> Result<Self> {
        let window = window()?;
        let document = document()?;

        let canvas = document
            .get_element_by_id(&config.page.canvas_id)
            .ok_or_else(|| FieldError::MissingElement(format!("#{}", config.page.canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::SurfaceUnavailable("element is not a canvas".into()))?;

        let initial = viewport(&window)?;
        let mut surface = CanvasSurface::new(canvas, config.style.max_pixel_ratio)?;
        surface.resize(initial)?;

        let field = ParticleField::new(config.clone(), initial, &mut rand::thread_rng());
        let frame_loop = Rc::new(RefCell::new(FrameLoop::new(field, surface)));
        let token = frame_loop.borrow().token();

        let mut listeners = Vec::with_capacity(2);

        let fl = frame_loop.clone();
        listeners.push(Listener::passive(&document, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                fl.borrow_mut()
                    .on_pointer_move(mouse.client_x() as f32, mouse.client_y() as f32);
            }
        })?);

        let fl = frame_loop.clone();
        let resize_window = window.clone();
        listeners.push(Listener::new(&window, "resize", move |_| {
            match viewport(&resize_window) {
                Ok(vp) => fl.borrow_mut().on_resize(vp),
                Err(e) => debug!(error = %e, "Viewport query failed on resize"),
            }
        })?);

        let fl = frame_loop.clone();
        let animation = Recurring::start("particle-field", Schedule::Frame, move || {
            match fl.borrow_mut().tick() {
                LoopControl::Continue => Schedule::Frame,
                LoopControl::Stop => Schedule::Stop,
            }
        })?;

        info!(
            points = config.count,
            width = initial.width,
            height = initial.height,
            pixel_ratio = initial.pixel_ratio,
            "Particle background mounted"
        );

        Ok(Self {
            frame_loop,
            token,
            _listeners: listeners,
            _animation: animation,
        })
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn frames(&self) -> u64 {
        self.frame_loop.borrow().field().frame()
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        self.token.cancel();
        debug!(frames = self.frames(), "Particle background torn down");
    }
}

//! Native preview window
//!
//! Runs the same particle field inside an eframe window, painting through
//! egui shapes. Useful for tuning a config without a browser.

use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::FieldConfig;
use crate::core::{Blending, FrameLoop, LoopControl, ParticleField, RenderSurface, Viewport};
use crate::error::Result;
use crate::theme::{additive, blended, colors, preview_visuals};
use crate::time::FpsCounter;

/// Surface that turns projected points into egui rectangles
#[derive(Default)]
pub struct EguiSurface {
    origin: egui::Pos2,
    shapes: Vec<egui::Shape>,
}

impl EguiSurface {
    pub fn set_origin(&mut self, origin: egui::Pos2) {
        self.origin = origin;
    }

    pub fn take_shapes(&mut self) -> Vec<egui::Shape> {
        std::mem::take(&mut self.shapes)
    }
}

impl RenderSurface for EguiSurface {
    fn resize(&mut self, _viewport: Viewport) -> Result<()> {
        // egui sizes its own framebuffer
        Ok(())
    }

    fn draw(&mut self, field: &ParticleField) -> Result<()> {
        let style = *field.style();
        self.shapes.clear();
        self.shapes.reserve(field.cloud().len());

        for point in field.project() {
            let color = match style.blending {
                Blending::Additive => additive(point.color, style.opacity),
                Blending::Normal => blended(point.color, style.opacity),
            };
            let rect = egui::Rect::from_center_size(
                self.origin + egui::vec2(point.x, point.y),
                egui::vec2(point.size, point.size),
            );
            self.shapes.push(egui::Shape::rect_filled(rect, 0.0, color));
        }
        Ok(())
    }
}

pub struct PreviewApp {
    frame_loop: FrameLoop<EguiSurface>,
    fps_counter: FpsCounter,
    visible: usize,
}

impl PreviewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: FieldConfig, seed: Option<u64>) -> Self {
        cc.egui_ctx.set_visuals(preview_visuals());

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // Real size arrives with the first frame
        let viewport = Viewport::new(1280.0, 720.0, cc.egui_ctx.pixels_per_point() as f64);
        let field = ParticleField::new(config, viewport, &mut rng);

        Self {
            frame_loop: FrameLoop::new(field, EguiSurface::default()),
            fps_counter: FpsCounter::default(),
            visible: 0,
        }
    }

    fn render_overlay(&self, painter: &egui::Painter, rect: egui::Rect) {
        let field = self.frame_loop.field();
        let text = format!(
            "{:.0} fps / frame {} / {} of {} points",
            self.fps_counter.fps(),
            field.frame(),
            self.visible,
            field.cloud().len()
        );
        painter.text(
            rect.left_top() + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::monospace(11.0),
            colors::TEXT_SECONDARY,
        );
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Continuous animation
        ctx.request_repaint();
        self.fps_counter.tick();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;

                let viewport =
                    Viewport::new(rect.width(), rect.height(), ctx.pixels_per_point() as f64);
                if viewport != self.frame_loop.field().viewport() {
                    self.frame_loop.on_resize(viewport);
                }
                if let Some(pos) = response.hover_pos() {
                    let local = pos - rect.min;
                    self.frame_loop.on_pointer_move(local.x, local.y);
                }

                self.frame_loop.surface_mut().set_origin(rect.min);
                if self.frame_loop.tick() == LoopControl::Stop {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "stopped",
                        egui::FontId::monospace(12.0),
                        colors::TEXT_MUTED,
                    );
                    return;
                }

                let shapes = self.frame_loop.surface_mut().take_shapes();
                self.visible = shapes.len();
                painter.extend(shapes);
                self.render_overlay(&painter, rect);
            });
    }
}

impl Drop for PreviewApp {
    fn drop(&mut self) {
        self.frame_loop.token().cancel();
        info!(frames = self.frame_loop.field().frame(), "Preview closed");
    }
}

/// Open the preview window and block until it closes
pub fn run(config: FieldConfig, seed: Option<u64>) -> std::result::Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("particle-field preview"),
        ..Default::default()
    };

    info!(points = config.count, ?seed, "Opening preview window");
    eframe::run_native(
        "particle-field",
        options,
        Box::new(move |cc| Ok(Box::new(PreviewApp::new(cc, config, seed)))),
    )
}

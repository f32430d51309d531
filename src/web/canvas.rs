//! 2D-canvas surface for the particle field
//!
//! Points are painted as squares with `lighter` compositing, which gives the
//! additive look of the GPU point sprites without a WebGL context.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::{Blending, ParticleField, RenderSurface, Viewport};
use crate::error::{FieldError, Result};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    max_pixel_ratio: f64,
    ratio: f64,
    /// CSS color strings for colors seen so far (the palette is tiny)
    fill_styles: Vec<([f32; 3], String)>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, max_pixel_ratio: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| FieldError::SurfaceUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| FieldError::SurfaceUnavailable("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::SurfaceUnavailable("unexpected context type".into()))?;

        Ok(Self {
            canvas,
            ctx,
            max_pixel_ratio,
            ratio: 1.0,
            fill_styles: Vec::with_capacity(4),
        })
    }
}

/// Cached CSS color string for `color`
fn cached_style(cache: &mut Vec<([f32; 3], String)>, color: [f32; 3]) -> &str {
    let idx = match cache.iter().position(|(c, _)| *c == color) {
        Some(idx) => idx,
        None => {
            cache.push((color, css_rgb(color)));
            cache.len() - 1
        }
    };
    &cache[idx].1
}

/// `rgb(r, g, b)` from normalized components
fn css_rgb(color: [f32; 3]) -> String {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgb({}, {}, {})", r, g, b)
}

impl RenderSurface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) -> Result<()> {
        let (width, height) = viewport.surface_size(self.max_pixel_ratio);
        self.ratio = viewport.pixel_ratio.min(self.max_pixel_ratio);
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.width))?;
        style.set_property("height", &format!("{}px", viewport.height))?;
        Ok(())
    }

    fn draw(&mut self, field: &ParticleField) -> Result<()> {
        let viewport = field.viewport();
        let style = *field.style();
        let draw_err = |e: wasm_bindgen::JsValue| FieldError::Draw(format!("{:?}", e));

        self.ctx
            .set_transform(self.ratio, 0.0, 0.0, self.ratio, 0.0, 0.0)
            .map_err(draw_err)?;
        self.ctx
            .set_global_composite_operation("source-over")
            .map_err(draw_err)?;
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

        let composite = match style.blending {
            Blending::Additive => "lighter",
            Blending::Normal => "source-over",
        };
        self.ctx
            .set_global_composite_operation(composite)
            .map_err(draw_err)?;
        self.ctx.set_global_alpha(style.opacity as f64);

        // One fill style change per palette color
        let mut batches: Vec<([f32; 3], Vec<[f64; 3]>)> = Vec::with_capacity(4);
        for point in field.project() {
            let half = point.size as f64 * 0.5;
            let rect = [point.x as f64 - half, point.y as f64 - half, point.size as f64];
            match batches.iter_mut().find(|(c, _)| *c == point.color) {
                Some((_, rects)) => rects.push(rect),
                None => batches.push((point.color, vec![rect])),
            }
        }

        for (color, rects) in &batches {
            self.ctx
                .set_fill_style_str(cached_style(&mut self.fill_styles, *color));
            for &[x, y, size] in rects {
                self.ctx.fill_rect(x, y, size, size);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::palette;

    #[test]
    fn test_css_rgb() {
        assert_eq!(css_rgb(palette::INDIGO), "rgb(99, 102, 242)");
        assert_eq!(css_rgb([2.0, -1.0, 0.5]), "rgb(255, 0, 128)");
    }
}

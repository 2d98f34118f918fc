//! CanvasRenderer - Draws a banner frame with the browser 2D context
//!
//! The world is drawn in world units: the context is translated to the
//! canvas centre and scaled by `height / view_height` for the duration of
//! a frame, so every path below is in the same space as the physics.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::error::{BannerError, Result};
use crate::domain::settings::{RenderSettings, RenderStyle};

use super::ribbon::{Circle, PathCommand, RibbonPath};
use super::view::ViewTransform;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    view: ViewTransform,
}

fn js_err(e: JsValue) -> BannerError {
    BannerError::Canvas(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl CanvasRenderer {
    /// Bind to `canvas`, sizing its backing buffer to the displayed size
    pub fn new(canvas: HtmlCanvasElement, view_height: f32) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| BannerError::Canvas("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BannerError::Canvas("context is not CanvasRenderingContext2d".to_string()))?;

        let width = match canvas.offset_width() { w if w > 0 => w as u32, _ => canvas.width() };
        let height = match canvas.offset_height() { h if h > 0 => h as u32, _ => canvas.height() };
        canvas.set_width(width);
        canvas.set_height(height);

        Ok(Self {
            canvas,
            ctx,
            view: ViewTransform::new(width, height, view_height),
        })
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.view.resize(width, height);
    }

    pub fn draw(&self, settings: &RenderSettings, circles: &[Circle], ribbon: Option<&RibbonPath>) -> Result<()> {
        let ctx = &self.ctx;
        let w = self.view.width() as f64;
        let h = self.view.height() as f64;

        ctx.set_fill_style_str(&settings.background);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.save();
        let result = self.draw_world(settings, circles, ribbon);
        // Restore even when drawing failed halfway
        ctx.restore();
        result
    }

    fn draw_world(&self, settings: &RenderSettings, circles: &[Circle], ribbon: Option<&RibbonPath>) -> Result<()> {
        let ctx = &self.ctx;
        let origin = self.view.origin();
        let scale = self.view.scale() as f64;
        ctx.translate(origin.x as f64, origin.y as f64).map_err(js_err)?;
        ctx.scale(scale, scale).map_err(js_err)?;

        match settings.style {
            RenderStyle::Dots => {
                let size = settings.marker_size as f64;
                ctx.set_fill_style_str(&settings.ink);
                for c in circles {
                    ctx.fill_rect(c.center.x as f64 - size * 0.5, c.center.y as f64 - size * 0.5, size, size);
                }
            }
            RenderStyle::Circles => {
                ctx.set_stroke_style_str(&settings.ink);
                ctx.set_line_width(settings.line_width as f64);
                for c in circles {
                    ctx.begin_path();
                    ctx.arc(c.center.x as f64, c.center.y as f64, c.radius as f64, 0.0, TAU).map_err(js_err)?;
                    ctx.stroke();
                }
            }
            RenderStyle::Ribbon => {
                if let Some(path) = ribbon.filter(|p| !p.is_empty()) {
                    ctx.set_fill_style_str(&settings.ink);
                    ctx.begin_path();
                    self.trace(path)?;
                    ctx.fill();
                }
            }
        }
        Ok(())
    }

    fn trace(&self, path: &RibbonPath) -> Result<()> {
        let ctx = &self.ctx;
        for cmd in path.commands() {
            match *cmd {
                PathCommand::MoveTo(p) => ctx.move_to(p.x as f64, p.y as f64),
                PathCommand::LineTo(p) => ctx.line_to(p.x as f64, p.y as f64),
                PathCommand::Arc { center, radius, start, end, anticlockwise } => ctx
                    .arc_with_anticlockwise(
                        center.x as f64,
                        center.y as f64,
                        radius as f64,
                        start as f64,
                        end as f64,
                        anticlockwise,
                    )
                    .map_err(js_err)?,
                PathCommand::Close => ctx.close_path(),
            }
        }
        Ok(())
    }
}

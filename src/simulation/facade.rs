use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::domain::error::BannerError;
use crate::domain::settings::{BannerSettings, RenderStyle};
use crate::render::CanvasRenderer;

use super::perf_stats::PerfStats;
use super::perf_timer::timed;
use super::BannerCore;

fn to_js(e: BannerError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Banner bound to a canvas. JS owns the element and the rAF loop:
///
/// ```js
/// const banner = new Banner(canvas);
/// const loop = () => { banner.frame(); requestAnimationFrame(loop); };
/// loop();
/// ```
#[wasm_bindgen]
pub struct Banner {
    core: BannerCore,
    renderer: CanvasRenderer,
}

impl Banner {
    fn build(canvas: HtmlCanvasElement, settings: BannerSettings) -> Result<Banner, BannerError> {
        let renderer = CanvasRenderer::new(canvas, settings.render.view_height)?;
        let core = BannerCore::new(settings)?;
        log::info!(
            "banner attached to {}x{} canvas",
            renderer.view().width(),
            renderer.view().height()
        );
        Ok(Banner { core, renderer })
    }
}

#[wasm_bindgen]
impl Banner {
    /// Classic banner settings
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<Banner, JsValue> {
        Self::build(canvas, BannerSettings::default()).map_err(to_js)
    }

    /// Settings as a JSON document; missing fields keep their defaults
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(canvas: HtmlCanvasElement, json: String) -> Result<Banner, JsValue> {
        let settings = BannerSettings::from_json(&json).map_err(to_js)?;
        Self::build(canvas, settings).map_err(to_js)
    }

    /// One animation frame: a single fixed step, then draw
    pub fn frame(&mut self) -> Result<(), JsValue> {
        self.core.frame_tick().map_err(to_js)?;
        self.render()
    }

    /// Wall-clock driven frame: run the fixed steps due for `elapsed_ms`, then draw.
    /// Returns the number of steps run.
    pub fn advance(&mut self, elapsed_ms: f64) -> Result<u32, JsValue> {
        let before = self.core.total_steps();
        self.core.advance((elapsed_ms / 1000.0) as f32).map_err(to_js)?;
        self.render()?;
        Ok((self.core.total_steps() - before) as u32)
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let core = &mut self.core;
        let renderer = &self.renderer;
        // Snapshot first so the draw borrows are shared
        core.circles();
        core.ribbon();

        let perf_on = core.perf_enabled;
        let mut render_ms = 0.0;
        let result = timed(perf_on, &mut render_ms, || {
            renderer.draw(&core.settings.render, &core.circles, Some(&core.ribbon))
        });
        core.perf_stats.render_ms = render_ms;
        result.map_err(to_js)
    }

    /// Resize the canvas backing store (CSS pixels)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    #[wasm_bindgen(js_name = setRenderStyle)]
    pub fn set_render_style(&mut self, name: &str) -> Result<(), JsValue> {
        let style: RenderStyle = name.parse().map_err(to_js)?;
        self.core.set_render_style(style);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn link_count(&self) -> usize {
        self.core.link_count()
    }

    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> u64 {
        self.core.frame()
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// Effective settings as JSON
    pub fn settings_json(&self) -> String {
        self.core.settings().to_json()
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    /// Flattened ribbon as [x0, y0, x1, y1, ...] in world units. Loops sit
    /// back to back; each one ends on its own first point.
    pub fn ribbon_points(&mut self, max_step: f32) -> Vec<f32> {
        self.core.extract_ribbon_points(max_step);
        self.core.ribbon_buffer().to_vec()
    }

    /// Zero-copy view of the last `ribbon_points`/`extract_ribbon` result
    pub fn ribbon_buffer_ptr(&self) -> *const f32 {
        self.core.ribbon_buffer().as_ptr()
    }

    /// Flatten the ribbon into the transfer buffer; returns the point count
    pub fn extract_ribbon(&mut self, max_step: f32) -> usize {
        self.core.extract_ribbon_points(max_step)
    }
}

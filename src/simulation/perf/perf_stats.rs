use wasm_bindgen::prelude::*;

/// Per-frame perf snapshot (zeros while perf metrics are disabled)
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) chain_ms: f64,
    pub(super) ribbon_ms: f64,
    pub(super) render_ms: f64,
    pub(super) steps: u32,
    pub(super) links: u32,
    pub(super) joints: u32,
    pub(super) contacts: u32,
    pub(super) spawned: u32,
    pub(super) resized: u32,
    pub(super) retired: u32,
    pub(super) dropped_steps: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn chain_ms(&self) -> f64 { self.chain_ms }
    #[wasm_bindgen(getter)]
    pub fn ribbon_ms(&self) -> f64 { self.ribbon_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }

    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> u32 { self.steps }
    #[wasm_bindgen(getter)]
    pub fn links(&self) -> u32 { self.links }
    #[wasm_bindgen(getter)]
    pub fn joints(&self) -> u32 { self.joints }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn spawned(&self) -> u32 { self.spawned }
    #[wasm_bindgen(getter)]
    pub fn resized(&self) -> u32 { self.resized }
    #[wasm_bindgen(getter)]
    pub fn retired(&self) -> u32 { self.retired }
    #[wasm_bindgen(getter)]
    pub fn dropped_steps(&self) -> u32 { self.dropped_steps }
}

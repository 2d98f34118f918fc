//! BannerCore - One banner: physics world + chain bookkeeping + render state
//!
//! Orchestration only; the work lives in:
//! - physics_world/  - bodies, joints, contacts, solver
//! - chain/          - spawn / resize / retire
//! - render/         - view transform, ribbon geometry, canvas
//!
//! A fixed step is `physics.step(dt)` followed by `chain.step(dt)`.

use crate::chain::{ChainLink, ChainSystem, StepReport};
use crate::core::random::Rng;
use crate::domain::error::Result;
use crate::domain::settings::{BannerSettings, RenderStyle};
use crate::physics_world::PhysicsWorld;
use crate::render::{Circle, RibbonPath};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "clock/fixed_step.rs"]
mod fixed_step;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::Banner;
pub use fixed_step::FixedStep;
pub use perf_stats::PerfStats;

use perf_timer::{timed, PerfTimer};

pub struct BannerCore {
    settings: BannerSettings,
    physics: PhysicsWorld,
    chain: ChainSystem,
    rng: Rng,
    clock: FixedStep,

    // State
    frame: u64,
    total_steps: u64,

    // Render snapshot, rebuilt lazily after a step
    circles: Vec<Circle>,
    ribbon: RibbonPath,
    render_dirty: bool,
    ribbon_buffer: Vec<f32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl BannerCore {
    pub fn new(settings: BannerSettings) -> Result<Self> {
        init::create_banner_core(settings)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(BannerSettings::from_json(json)?)
    }

    pub fn settings(&self) -> &BannerSettings {
        &self.settings
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn chain(&self) -> &ChainSystem {
        &self.chain
    }

    /// Oldest first
    pub fn links(&self) -> impl Iterator<Item = &ChainLink> {
        self.chain.links().iter()
    }

    pub fn link_count(&self) -> usize {
        self.chain.len()
    }

    /// Frames driven through `frame`/`advance`
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Fixed steps simulated since creation / reset
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn clock(&self) -> &FixedStep {
        &self.clock
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_render_style(&mut self, style: RenderStyle) {
        settings::set_render_style(self, style);
    }

    /// One fixed step (physics then chain)
    pub fn step(&mut self) -> Result<StepReport> {
        step::step(self)
    }

    /// One animation frame of the classic sketch: exactly one fixed step
    pub fn frame_tick(&mut self) -> Result<StepReport> {
        step::frame(self, 1, 0)
    }

    /// Feed wall time; runs however many fixed steps are due
    pub fn advance(&mut self, seconds: f32) -> Result<StepReport> {
        let dropped_before = self.clock.dropped();
        let due = self.clock.advance(seconds);
        let dropped = (self.clock.dropped() - dropped_before) as u32;
        step::frame(self, due, dropped)
    }

    /// Centre + radius of every link, oldest first
    pub fn circles(&mut self) -> &[Circle] {
        render_extract::refresh(self);
        &self.circles
    }

    pub fn ribbon(&mut self) -> &RibbonPath {
        render_extract::refresh(self);
        &self.ribbon
    }

    /// Flatten the ribbon into the transfer buffer as x,y pairs; returns the point count
    pub fn extract_ribbon_points(&mut self, max_step: f32) -> usize {
        render_extract::extract_ribbon_points(self, max_step)
    }

    pub fn ribbon_buffer(&self) -> &[f32] {
        &self.ribbon_buffer
    }

    /// Drop every link and start over with the same settings (RNG keeps going)
    pub fn reset(&mut self) {
        self.chain.clear();
        self.physics.clear();
        self.clock.reset();
        self.frame = 0;
        self.total_steps = 0;
        self.render_dirty = true;
        self.perf_stats.reset();
        log::info!("banner reset");
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

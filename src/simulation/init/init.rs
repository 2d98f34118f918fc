use crate::chain::ChainSystem;
use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::error::Result;
use crate::domain::settings::BannerSettings;
use crate::physics_world::PhysicsWorld;
use crate::render::RibbonPath;

use super::fixed_step::FixedStep;
use super::perf_stats::PerfStats;
use super::BannerCore;

pub(super) fn create_banner_core(settings: BannerSettings) -> Result<BannerCore> {
    settings.validate()?;

    let w = &settings.world;
    let mut physics = PhysicsWorld::new(Vec2::new(w.gravity_x, w.gravity_y));
    physics.set_iterations(w.velocity_iterations, w.position_iterations);

    let chain = ChainSystem::new(settings.chain.clone(), w);
    let clock = FixedStep::new(w.timestep, w.max_substeps);
    let rng = Rng::new(settings.seed);

    log::debug!(
        "banner core: dt={:.4}s, retire_x={}, style={:?}",
        w.timestep,
        settings.chain.retire_x,
        settings.render.style
    );

    Ok(BannerCore {
        physics,
        chain,
        rng,
        clock,
        frame: 0,
        total_steps: 0,
        circles: Vec::with_capacity(64),
        ribbon: RibbonPath::default(),
        render_dirty: true,
        ribbon_buffer: Vec::new(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        settings,
    })
}

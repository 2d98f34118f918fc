use crate::chain::StepReport;
use crate::domain::error::Result;

use super::{timed, BannerCore, PerfTimer};

/// One fixed step: physics first so the chain sees post-solve positions
pub(super) fn step(banner: &mut BannerCore) -> Result<StepReport> {
    let dt = banner.clock.dt();
    let perf_on = banner.perf_enabled;

    timed(perf_on, &mut banner.perf_stats.physics_ms, || banner.physics.step(dt));

    let report = timed(perf_on, &mut banner.perf_stats.chain_ms, || {
        banner.chain.step(&mut banner.physics, &mut banner.rng, dt)
    })?;

    banner.total_steps += 1;
    banner.render_dirty = true;
    Ok(report)
}

/// Run `steps` fixed steps as one animation frame and record perf
pub(super) fn frame(banner: &mut BannerCore, steps: u32, dropped: u32) -> Result<StepReport> {
    let perf_on = banner.perf_enabled;
    if perf_on {
        banner.perf_stats.reset();
    }
    let frame_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let mut total = StepReport::default();
    for _ in 0..steps {
        let report = step(banner)?;
        total.spawned += report.spawned;
        total.resized += report.resized;
        total.retired += report.retired;
    }
    banner.frame += 1;

    if let Some(t0) = frame_start {
        let stats = &mut banner.perf_stats;
        stats.step_ms = t0.elapsed_ms();
        stats.steps = steps;
        stats.links = banner.chain.len() as u32;
        stats.joints = banner.physics.joint_count() as u32;
        stats.contacts = banner.physics.contact_count() as u32;
        stats.spawned = total.spawned;
        stats.resized = total.resized;
        stats.retired = total.retired;
        stats.dropped_steps = dropped;
    }

    Ok(total)
}

use crate::render::{Circle, RibbonPath};

use super::{timed, BannerCore};

/// Rebuild the circle snapshot and ribbon if a step ran since the last call
pub(super) fn refresh(banner: &mut BannerCore) {
    if !banner.render_dirty {
        return;
    }

    banner.circles.clear();
    for link in banner.chain.links().iter() {
        // A link is only drawable while its body exists
        if let Some(body) = banner.physics.body(link.body) {
            banner.circles.push(Circle::new(body.position, link.radius));
        }
    }

    let circles = &banner.circles;
    banner.ribbon = timed(banner.perf_enabled, &mut banner.perf_stats.ribbon_ms, || RibbonPath::build(circles));
    banner.render_dirty = false;
}

pub(super) fn extract_ribbon_points(banner: &mut BannerCore, max_step: f32) -> usize {
    refresh(banner);

    let points = banner.ribbon.flatten(max_step);
    banner.ribbon_buffer.clear();
    banner.ribbon_buffer.reserve(points.len() * 2);
    for p in points.iter() {
        banner.ribbon_buffer.push(p.x);
        banner.ribbon_buffer.push(p.y);
    }
    points.len()
}

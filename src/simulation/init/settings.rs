use crate::domain::settings::RenderStyle;

use super::perf_stats::PerfStats;
use super::BannerCore;

pub(super) fn enable_perf_metrics(banner: &mut BannerCore, enabled: bool) {
    banner.perf_enabled = enabled;
    if !enabled {
        banner.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(banner: &BannerCore) -> PerfStats {
    banner.perf_stats.clone()
}

pub(super) fn set_render_style(banner: &mut BannerCore, style: RenderStyle) {
    banner.settings.render.style = style;
}

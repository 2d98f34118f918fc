use super::*;
use crate::domain::error::BannerError;

fn classic() -> BannerCore {
    BannerCore::new(BannerSettings::default()).expect("default settings are valid")
}

fn run_frames(banner: &mut BannerCore, frames: u32) {
    for _ in 0..frames {
        banner.frame_tick().expect("frame");
    }
}

#[test]
fn new_banner_is_empty() {
    let mut banner = classic();
    assert_eq!(banner.link_count(), 0);
    assert_eq!(banner.frame(), 0);
    assert_eq!(banner.total_steps(), 0);
    assert!(banner.circles().is_empty());
    assert!(banner.ribbon().is_empty());
}

#[test]
fn frame_tick_runs_exactly_one_step() {
    let mut banner = classic();
    let report = banner.frame_tick().unwrap();
    assert_eq!(report.spawned, 1);
    assert_eq!(banner.frame(), 1);
    assert_eq!(banner.total_steps(), 1);
    assert_eq!(banner.link_count(), 1);
}

#[test]
fn circles_follow_link_bodies() {
    let mut banner = classic();
    run_frames(&mut banner, 120);

    let expected: Vec<(f32, f32, f32)> = banner
        .links()
        .map(|link| {
            let body = banner.physics().body(link.body).expect("body");
            (body.position.x, body.position.y, link.radius)
        })
        .collect();
    let circles = banner.circles().to_vec();

    assert_eq!(circles.len(), expected.len());
    for (c, (x, y, r)) in circles.iter().zip(expected.iter()) {
        assert_eq!(c.center.x, *x);
        assert_eq!(c.center.y, *y);
        assert_eq!(c.radius, *r);
    }
}

#[test]
fn ribbon_is_rebuilt_only_after_a_step() {
    let mut banner = classic();
    run_frames(&mut banner, 60);
    let before = banner.ribbon().clone();
    assert!(!before.is_empty());

    // No step in between: same path
    assert_eq!(banner.ribbon(), &before);

    banner.step().unwrap();
    assert_ne!(banner.ribbon(), &before);
}

#[test]
fn extract_ribbon_points_fills_xy_pairs() {
    let mut banner = classic();
    run_frames(&mut banner, 90);

    let count = banner.extract_ribbon_points(0.05);
    assert!(count > 2);
    assert_eq!(banner.ribbon_buffer().len(), count * 2);
    assert!(banner.ribbon_buffer().iter().all(|v| v.is_finite()));
}

#[test]
fn advance_runs_due_steps_and_drops_backlog() {
    let mut settings = BannerSettings::default();
    settings.world.timestep = 0.125;
    settings.world.max_substeps = 3;
    let mut banner = BannerCore::new(settings).unwrap();
    banner.enable_perf_metrics(true);

    banner.advance(0.25).unwrap();
    assert_eq!(banner.total_steps(), 2);
    assert_eq!(banner.get_perf_stats().steps(), 2);
    assert_eq!(banner.get_perf_stats().dropped_steps(), 0);

    // 8 steps due, 3 allowed
    banner.advance(1.0).unwrap();
    assert_eq!(banner.total_steps(), 5);
    let stats = banner.get_perf_stats();
    assert_eq!(stats.steps(), 3);
    assert_eq!(stats.dropped_steps(), 5);
    assert_eq!(banner.clock().dropped(), 5);
    assert_eq!(banner.frame(), 2);
}

#[test]
fn advance_with_no_elapsed_time_steps_nothing() {
    let mut banner = classic();
    banner.advance(0.0).unwrap();
    banner.advance(-1.0).unwrap();
    banner.advance(f32::NAN).unwrap();
    assert_eq!(banner.total_steps(), 0);
    assert_eq!(banner.link_count(), 0);
}

#[test]
fn perf_stats_are_zero_when_disabled() {
    let mut banner = classic();
    run_frames(&mut banner, 10);
    let stats = banner.get_perf_stats();
    assert_eq!(stats.steps(), 0);
    assert_eq!(stats.links(), 0);
    assert_eq!(stats.step_ms(), 0.0);
}

#[test]
fn perf_stats_describe_the_last_frame() {
    let mut banner = classic();
    banner.enable_perf_metrics(true);
    run_frames(&mut banner, 60);

    let stats = banner.get_perf_stats();
    assert_eq!(stats.steps(), 1);
    assert_eq!(stats.links() as usize, banner.link_count());
    assert_eq!(stats.joints() as usize, banner.physics().joint_count());
    assert!(stats.step_ms() >= 0.0);

    banner.enable_perf_metrics(false);
    assert_eq!(banner.get_perf_stats().links(), 0);
}

#[test]
fn reset_clears_links_and_counters() {
    let mut banner = classic();
    run_frames(&mut banner, 120);
    assert!(banner.link_count() > 1);

    banner.reset();
    assert_eq!(banner.link_count(), 0);
    assert_eq!(banner.physics().body_count(), 0);
    assert_eq!(banner.physics().joint_count(), 0);
    assert_eq!(banner.frame(), 0);
    assert_eq!(banner.total_steps(), 0);
    assert!(banner.circles().is_empty());

    // Starts spawning again right away
    assert_eq!(banner.frame_tick().unwrap().spawned, 1);
}

#[test]
fn same_seed_replays_identically() {
    let mut a = classic();
    let mut b = classic();
    run_frames(&mut a, 200);
    run_frames(&mut b, 200);
    assert_eq!(a.circles(), b.circles());
}

#[test]
fn set_render_style_updates_settings() {
    let mut banner = classic();
    assert_eq!(banner.settings().render.style, RenderStyle::Ribbon);
    banner.set_render_style(RenderStyle::Dots);
    assert_eq!(banner.settings().render.style, RenderStyle::Dots);
}

#[test]
fn from_json_applies_overrides_and_rejects_bad_documents() {
    let banner = BannerCore::from_json(r#"{"seed": 7, "chain": {"retire_x": 5.0}}"#).unwrap();
    assert_eq!(banner.settings().seed, 7);
    assert_eq!(banner.settings().chain.retire_x, 5.0);
    assert_eq!(banner.settings().chain.max_radius, 4.0);

    assert!(matches!(BannerCore::from_json("{not json"), Err(BannerError::Json(_))));
    assert!(matches!(
        BannerCore::from_json(r#"{"world": {"timestep": 0.0}}"#),
        Err(BannerError::InvalidSettings(_))
    ));
}

#[test]
fn new_rejects_invalid_settings() {
    let mut settings = BannerSettings::default();
    settings.chain.initial_radius = 10.0;
    assert!(matches!(BannerCore::new(settings), Err(BannerError::InvalidSettings(_))));
}

#[test]
fn short_retire_line_keeps_chain_bounded() {
    let mut settings = BannerSettings::default();
    settings.chain.retire_x = 3.0;
    let mut banner = BannerCore::new(settings).unwrap();
    banner.enable_perf_metrics(true);

    let mut retired = 0;
    for _ in 0..1200 {
        retired += banner.frame_tick().unwrap().retired;
        assert_eq!(banner.physics().body_count(), banner.link_count());
    }
    assert!(retired > 0);
    assert!(banner.link_count() < 40);
}

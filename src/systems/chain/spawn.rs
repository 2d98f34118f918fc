use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::error::Result;
use crate::physics_world::{CircleFixture, PhysicsWorld};

use super::{ChainLink, ChainSystem};

/// Tick the spawn countdown; returns true when a link was added.
pub(super) fn spawn_step(chain: &mut ChainSystem, physics: &mut PhysicsWorld, rng: &mut Rng, dt: f32) -> Result<bool> {
    chain.spawn_countdown -= dt;
    if chain.spawn_countdown >= 0.0 {
        return Ok(false);
    }

    if !ready_for_spawn(chain, physics) {
        // Spawn area is crowded, check again soon
        chain.spawn_countdown += chain.settings.spawn_retry;
        return Ok(false);
    }

    chain.spawn_countdown += chain.settings.spawn_interval;
    spawn_link(chain, physics, rng)?;
    Ok(true)
}

/// The newest link has to clear the spawn point first
fn ready_for_spawn(chain: &ChainSystem, physics: &PhysicsWorld) -> bool {
    match chain.links.back() {
        None => true,
        Some(newest) => physics
            .body(newest.body)
            .map(|b| b.position.x > chain.settings.spawn_clearance)
            // A link without a body is broken state; let the chain continue
            .unwrap_or(true),
    }
}

fn spawn_link(chain: &mut ChainSystem, physics: &mut PhysicsWorld, rng: &mut Rng) -> Result<()> {
    let s = &chain.settings;
    let radius = s.initial_radius;
    let position = Vec2::new(rng.symmetric(s.spawn_jitter), rng.symmetric(s.spawn_jitter));
    let velocity = Vec2::new(s.launch_speed, rng.symmetric(s.launch_spread));
    let fixture = CircleFixture::new(radius, chain.density, chain.friction);

    let body = physics.create_body(position, velocity, fixture);
    let mut link = ChainLink::new(body, radius);

    if let Some(prev) = chain.links.back_mut() {
        let joint = physics.create_joint(prev.body, body, prev.radius + radius)?;
        prev.next_joint = Some(joint);
        link.prev_joint = Some(joint);
    }

    log::debug!(
        "spawned link {:?} at ({:.3}, {:.3}), chain length {}",
        body,
        position.x,
        position.y,
        chain.links.len() + 1
    );
    chain.links.push_back(link);
    Ok(())
}

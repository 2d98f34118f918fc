use crate::core::random::Rng;
use crate::physics_world::{CircleFixture, PhysicsWorld};

use super::ChainSystem;

/// Age every link; links whose countdown expired grow toward `max_radius`.
///
/// Returns how many links were resized.
pub(super) fn resize_step(chain: &mut ChainSystem, physics: &mut PhysicsWorld, rng: &mut Rng, dt: f32) -> u32 {
    let mut resized = 0;

    for i in 0..chain.links.len() {
        let link = &mut chain.links[i];
        link.size_countdown -= dt;
        if link.size_countdown >= 0.0 {
            continue;
        }

        let s = &chain.settings;
        link.size_countdown += s.resize_base + rng.next_f32() * s.resize_jitter;

        let next_radius = link.radius + (s.max_radius - link.radius) * rng.next_f32() * s.growth_rate;
        link.radius = next_radius;

        let (body, prev_joint, next_joint) = (link.body, link.prev_joint, link.next_joint);
        if let Some(b) = physics.body_mut(body) {
            b.set_fixture(CircleFixture::new(next_radius, chain.density, chain.friction));
        }

        // Neighbour joints always span the sum of both radii
        if let (Some(joint), Some(prev)) = (prev_joint, i.checked_sub(1).and_then(|p| chain.links.get(p))) {
            physics.set_joint_length(joint, prev.radius + next_radius);
        }
        if let (Some(joint), Some(next)) = (next_joint, chain.links.get(i + 1)) {
            physics.set_joint_length(joint, next.radius + next_radius);
        }

        resized += 1;
    }

    resized
}

use crate::domain::error::Result;
use crate::physics_world::PhysicsWorld;

use super::ChainSystem;

/// Drop the oldest link once it scrolled past `retire_x`. At most one per step.
pub(super) fn retire_step(chain: &mut ChainSystem, physics: &mut PhysicsWorld) -> Result<bool> {
    let Some(oldest) = chain.links.front() else {
        return Ok(false);
    };

    let past_threshold = match physics.body(oldest.body) {
        Some(body) => body.position.x > chain.settings.retire_x,
        // Body vanished underneath us: treat the link as retired
        None => true,
    };
    if !past_threshold {
        return Ok(false);
    }

    let Some(link) = chain.links.pop_front() else {
        return Ok(false);
    };
    if physics.body(link.body).is_some() {
        physics.destroy_body(link.body)?;
    }

    // Its joint went down with the body
    if let Some(new_oldest) = chain.links.front_mut() {
        new_oldest.prev_joint = None;
    }

    log::debug!("retired link {:?}, chain length {}", link.body, chain.links.len());
    Ok(true)
}

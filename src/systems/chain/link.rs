use crate::physics_world::{BodyId, JointId};

/// One bead of the banner chain. Position lives in the physics world.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainLink {
    pub body: BodyId,
    /// Current radius (always equals the body's fixture radius)
    pub radius: f32,
    /// Seconds until the next resize
    pub size_countdown: f32,
    /// Joint to the older neighbour
    pub prev_joint: Option<JointId>,
    /// Joint to the newer neighbour
    pub next_joint: Option<JointId>,
}

impl ChainLink {
    pub fn new(body: BodyId, radius: f32) -> Self {
        Self {
            body,
            radius,
            size_countdown: 0.0,
            prev_joint: None,
            next_joint: None,
        }
    }
}

/// What one chain step did (feeds perf stats and logs)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub spawned: u32,
    pub resized: u32,
    pub retired: u32,
}

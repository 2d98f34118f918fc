use super::body::BodyId;
use super::LINEAR_SLOP;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointId(pub u32);

/// Keeps two body centres at a fixed distance (rigid rod, no spring)
#[derive(Clone, Debug)]
pub struct DistanceJoint {
    pub(super) id: JointId,
    pub(super) body_a: BodyId,
    pub(super) body_b: BodyId,
    length: f32,
}

impl DistanceJoint {
    pub(super) fn new(id: JointId, body_a: BodyId, body_b: BodyId, length: f32) -> Self {
        let mut joint = Self { id, body_a, body_b, length: 0.0 };
        joint.set_length(length);
        joint
    }

    pub fn id(&self) -> JointId {
        self.id
    }

    pub fn body_a(&self) -> BodyId {
        self.body_a
    }

    pub fn body_b(&self) -> BodyId {
        self.body_b
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn set_length(&mut self, length: f32) {
        self.length = length.max(LINEAR_SLOP);
    }

    pub fn connects(&self, body: BodyId) -> bool {
        self.body_a == body || self.body_b == body
    }
}

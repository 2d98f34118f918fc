use crate::core::math::Vec2;

/// Touching pair of circles found during a step
#[derive(Clone, Debug)]
pub struct Contact {
    /// Solver indices of the two bodies
    pub(super) a: usize,
    pub(super) b: usize,
    /// Unit normal from A to B
    pub normal: Vec2,
    /// Negative when overlapping
    pub separation: f32,
    pub(super) radius_a: f32,
    pub(super) radius_b: f32,
    pub(super) friction: f32,
    pub(super) normal_impulse: f32,
    pub(super) tangent_impulse: f32,
}

impl Contact {
    pub fn friction(&self) -> f32 {
        self.friction
    }
}

/// Circle-circle narrow phase. Returns `None` when the circles are apart.
pub(super) fn collide_circles(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> Option<(Vec2, f32)> {
    let d = pos_b - pos_a;
    let dist_sq = d.length_squared();
    let reach = radius_a + radius_b;
    if dist_sq > reach * reach {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Coincident centres: pick a fixed axis so the pair still separates
    let normal = if dist > 1e-6 { d * (1.0 / dist) } else { Vec2::new(1.0, 0.0) };
    Some((normal, dist - reach))
}

/// Friction mixing: geometric mean, as in Box2D/planck
#[inline]
pub(super) fn mix_friction(a: f32, b: f32) -> f32 {
    (a * b).sqrt()
}

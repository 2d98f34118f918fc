use crate::core::math::{cross_sv, Vec2};

use super::contact::Contact;
use super::{BAUMGARTE, LINEAR_SLOP, MAX_LINEAR_CORRECTION};

/// Dense per-step copy of body state, indexed like `PhysicsWorld::bodies`
pub(super) struct SolverBodies {
    pub positions: Vec<Vec2>,
    pub angles: Vec<f32>,
    pub velocities: Vec<Vec2>,
    pub angular: Vec<f32>,
    pub inv_mass: Vec<f32>,
    pub inv_inertia: Vec<f32>,
}

impl SolverBodies {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(n),
            angles: Vec::with_capacity(n),
            velocities: Vec::with_capacity(n),
            angular: Vec::with_capacity(n),
            inv_mass: Vec::with_capacity(n),
            inv_inertia: Vec::with_capacity(n),
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.angles.clear();
        self.velocities.clear();
        self.angular.clear();
        self.inv_mass.clear();
        self.inv_inertia.clear();
    }

    pub fn integrate_positions(&mut self, dt: f32) {
        for i in 0..self.positions.len() {
            let v = self.velocities[i];
            self.positions[i] += v * dt;
            self.angles[i] += self.angular[i] * dt;
        }
    }
}

/// Joint with body handles resolved to solver indices
pub(super) struct SolverJoint {
    pub a: usize,
    pub b: usize,
    pub length: f32,
}

pub(super) fn solve_joint_velocity(bodies: &mut SolverBodies, joint: &SolverJoint) {
    let (a, b) = (joint.a, joint.b);
    let inv_sum = bodies.inv_mass[a] + bodies.inv_mass[b];
    if inv_sum <= 0.0 {
        return;
    }

    let axis = (bodies.positions[b] - bodies.positions[a]).normalize();
    if axis == Vec2::ZERO {
        return;
    }

    // Anchors sit on the centres, so there is no angular term.
    let cdot = axis.dot(bodies.velocities[b] - bodies.velocities[a]);
    let impulse = -cdot / inv_sum;
    let p = axis * impulse;
    bodies.velocities[a] -= p * bodies.inv_mass[a];
    bodies.velocities[b] += p * bodies.inv_mass[b];
}

/// Returns the remaining absolute length error
pub(super) fn solve_joint_position(bodies: &mut SolverBodies, joint: &SolverJoint) -> f32 {
    let (a, b) = (joint.a, joint.b);
    let inv_sum = bodies.inv_mass[a] + bodies.inv_mass[b];
    if inv_sum <= 0.0 {
        return 0.0;
    }

    let d = bodies.positions[b] - bodies.positions[a];
    let dist = d.length();
    if dist < 1e-6 {
        return 0.0;
    }
    let axis = d * (1.0 / dist);

    let c = (dist - joint.length).clamp(-MAX_LINEAR_CORRECTION, MAX_LINEAR_CORRECTION);
    let impulse = -c / inv_sum;
    let p = axis * impulse;
    bodies.positions[a] -= p * bodies.inv_mass[a];
    bodies.positions[b] += p * bodies.inv_mass[b];
    c.abs()
}

pub(super) fn solve_contact_velocity(bodies: &mut SolverBodies, contact: &mut Contact) {
    let (a, b) = (contact.a, contact.b);
    let (ma, mb) = (bodies.inv_mass[a], bodies.inv_mass[b]);
    let (ia, ib) = (bodies.inv_inertia[a], bodies.inv_inertia[b]);
    if ma + mb <= 0.0 {
        return;
    }

    let n = contact.normal;
    let t = n.perp();
    // Contact point offsets from each centre
    let ra = n * contact.radius_a;
    let rb = -n * contact.radius_b;

    let rel_vel = |bodies: &SolverBodies| {
        bodies.velocities[b] + cross_sv(bodies.angular[b], rb)
            - bodies.velocities[a]
            - cross_sv(bodies.angular[a], ra)
    };

    // Friction first so the normal impulse has the last word on penetration
    let rta = ra.cross(t);
    let rtb = rb.cross(t);
    let tangent_mass = ma + mb + ia * rta * rta + ib * rtb * rtb;
    if tangent_mass > 0.0 {
        let vt = rel_vel(bodies).dot(t);
        let max_friction = contact.friction * contact.normal_impulse;
        let old = contact.tangent_impulse;
        contact.tangent_impulse = (old - vt / tangent_mass).clamp(-max_friction, max_friction);
        let lambda = contact.tangent_impulse - old;
        let p = t * lambda;
        bodies.velocities[a] -= p * ma;
        bodies.angular[a] -= ia * ra.cross(p);
        bodies.velocities[b] += p * mb;
        bodies.angular[b] += ib * rb.cross(p);
    }

    // ra, rb are parallel to n: the normal row has no angular part.
    let vn = rel_vel(bodies).dot(n);
    let old = contact.normal_impulse;
    contact.normal_impulse = (old - vn / (ma + mb)).max(0.0);
    let lambda = contact.normal_impulse - old;
    let p = n * lambda;
    bodies.velocities[a] -= p * ma;
    bodies.velocities[b] += p * mb;
}

/// Returns the current separation (negative = still overlapping)
pub(super) fn solve_contact_position(bodies: &mut SolverBodies, contact: &Contact) -> f32 {
    let (a, b) = (contact.a, contact.b);
    let (ma, mb) = (bodies.inv_mass[a], bodies.inv_mass[b]);
    if ma + mb <= 0.0 {
        return 0.0;
    }

    let d = bodies.positions[b] - bodies.positions[a];
    let dist = d.length();
    let n = if dist > 1e-6 { d * (1.0 / dist) } else { contact.normal };
    let separation = dist - (contact.radius_a + contact.radius_b);

    let c = (BAUMGARTE * (separation + LINEAR_SLOP)).clamp(-MAX_LINEAR_CORRECTION, 0.0);
    let impulse = -c / (ma + mb);
    let p = n * impulse;
    bodies.positions[a] -= p * ma;
    bodies.positions[b] += p * mb;
    separation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_bodies(pa: Vec2, pb: Vec2, va: Vec2, vb: Vec2) -> SolverBodies {
        let mut s = SolverBodies::with_capacity(2);
        for (p, v) in [(pa, va), (pb, vb)] {
            s.positions.push(p);
            s.angles.push(0.0);
            s.velocities.push(v);
            s.angular.push(0.0);
            s.inv_mass.push(1.0);
            s.inv_inertia.push(1.0);
        }
        s
    }

    #[test]
    fn joint_velocity_removes_separating_speed() {
        let mut s = two_bodies(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.5),
        );
        let joint = SolverJoint { a: 0, b: 1, length: 1.0 };
        solve_joint_velocity(&mut s, &joint);
        let rel = s.velocities[1] - s.velocities[0];
        assert!(rel.x.abs() < 1e-5);
        // Perpendicular motion is untouched
        assert!((rel.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn joint_position_converges_to_rest_length() {
        let mut s = two_bodies(Vec2::ZERO, Vec2::new(1.5, 0.0), Vec2::ZERO, Vec2::ZERO);
        let joint = SolverJoint { a: 0, b: 1, length: 1.0 };
        for _ in 0..10 {
            solve_joint_position(&mut s, &joint);
        }
        let dist = s.positions[0].distance(s.positions[1]);
        assert!((dist - 1.0).abs() < 1e-4);
    }

    #[test]
    fn contact_velocity_stops_approach_without_pulling() {
        let mut s = two_bodies(
            Vec2::ZERO,
            Vec2::new(1.9, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
        );
        let mut contact = Contact {
            a: 0,
            b: 1,
            normal: Vec2::new(1.0, 0.0),
            separation: -0.1,
            radius_a: 1.0,
            radius_b: 1.0,
            friction: 0.6,
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
        };
        solve_contact_velocity(&mut s, &mut contact);
        let vn = (s.velocities[1] - s.velocities[0]).x;
        assert!(vn.abs() < 1e-5);
        assert!(contact.normal_impulse > 0.0);

        // Already separating: no impulse is applied.
        let mut s = two_bodies(
            Vec2::ZERO,
            Vec2::new(1.9, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
        );
        contact.normal_impulse = 0.0;
        contact.tangent_impulse = 0.0;
        solve_contact_velocity(&mut s, &mut contact);
        assert_eq!(contact.normal_impulse, 0.0);
        assert_eq!(s.velocities[1], Vec2::new(1.0, 0.0));
    }
}

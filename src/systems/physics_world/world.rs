use std::collections::{HashMap, HashSet};

use crate::core::math::Vec2;
use crate::domain::error::{BannerError, Result};

use super::body::{Body, BodyId, CircleFixture};
use super::contact::{collide_circles, mix_friction, Contact};
use super::joint::{DistanceJoint, JointId};
use super::solver::{
    solve_contact_position, solve_contact_velocity, solve_joint_position, solve_joint_velocity,
    SolverBodies, SolverJoint,
};
use super::LINEAR_SLOP;

/// Owns all bodies and joints of one banner
pub struct PhysicsWorld {
    bodies: Vec<Body>,
    joints: Vec<DistanceJoint>,
    contacts: Vec<Contact>,
    gravity: Vec2,
    velocity_iterations: u32,
    position_iterations: u32,
    next_body_id: u32,
    next_joint_id: u32,

    // Scratch reused across steps
    solver: SolverBodies,
    solver_joints: Vec<SolverJoint>,
    index_of: HashMap<BodyId, usize>,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            joints: Vec::new(),
            contacts: Vec::new(),
            gravity,
            velocity_iterations: 8,
            position_iterations: 3,
            next_body_id: 1,
            next_joint_id: 1,
            solver: SolverBodies::with_capacity(64),
            solver_joints: Vec::with_capacity(64),
            index_of: HashMap::with_capacity(64),
        }
    }

    pub fn set_iterations(&mut self, velocity: u32, position: u32) {
        self.velocity_iterations = velocity;
        self.position_iterations = position;
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn create_body(&mut self, position: Vec2, velocity: Vec2, fixture: CircleFixture) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id = self.next_body_id.saturating_add(1);
        self.bodies.push(Body::new(id, position, velocity, fixture));
        id
    }

    /// Destroy a body together with every joint attached to it.
    ///
    /// Returns the ids of the destroyed joints.
    pub fn destroy_body(&mut self, id: BodyId) -> Result<Vec<JointId>> {
        let idx = self
            .bodies
            .iter()
            .position(|b| b.id == id)
            .ok_or(BannerError::UnknownBody(id))?;
        // Order matters to callers iterating `bodies()`
        self.bodies.remove(idx);

        let mut removed = Vec::new();
        self.joints.retain(|j| {
            if j.connects(id) {
                removed.push(j.id);
                false
            } else {
                true
            }
        });
        Ok(removed)
    }

    pub fn create_joint(&mut self, body_a: BodyId, body_b: BodyId, length: f32) -> Result<JointId> {
        for id in [body_a, body_b] {
            if self.body(id).is_none() {
                return Err(BannerError::UnknownBody(id));
            }
        }
        let id = JointId(self.next_joint_id);
        self.next_joint_id = self.next_joint_id.saturating_add(1);
        self.joints.push(DistanceJoint::new(id, body_a, body_b, length));
        Ok(id)
    }

    pub fn destroy_joint(&mut self, id: JointId) -> bool {
        if let Some(idx) = self.joints.iter().position(|j| j.id == id) {
            self.joints.swap_remove(idx);
            return true;
        }
        false
    }

    pub fn set_joint_length(&mut self, id: JointId, length: f32) -> bool {
        match self.joints.iter_mut().find(|j| j.id == id) {
            Some(joint) => {
                joint.set_length(length);
                true
            }
            None => false,
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn joint(&self, id: JointId) -> Option<&DistanceJoint> {
        self.joints.iter().find(|j| j.id == id)
    }

    /// Bodies in creation order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn joints(&self) -> &[DistanceJoint] {
        &self.joints
    }

    /// Contacts found during the last step
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Remove everything (ids keep counting up)
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.joints.clear();
        self.contacts.clear();
    }

    /// Advance the world by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 || self.bodies.is_empty() {
            self.contacts.clear();
            return;
        }

        self.load_solver_state(dt);
        self.find_contacts();

        for _ in 0..self.velocity_iterations {
            for joint in self.solver_joints.iter() {
                solve_joint_velocity(&mut self.solver, joint);
            }
            for contact in self.contacts.iter_mut() {
                solve_contact_velocity(&mut self.solver, contact);
            }
        }

        self.solver.integrate_positions(dt);

        for _ in 0..self.position_iterations {
            let mut max_joint_error = 0.0f32;
            for joint in self.solver_joints.iter() {
                max_joint_error = max_joint_error.max(solve_joint_position(&mut self.solver, joint));
            }
            let mut min_separation = 0.0f32;
            for contact in self.contacts.iter() {
                min_separation = min_separation.min(solve_contact_position(&mut self.solver, contact));
            }
            if max_joint_error <= LINEAR_SLOP && min_separation >= -3.0 * LINEAR_SLOP {
                break;
            }
        }

        self.store_solver_state();
    }

    fn load_solver_state(&mut self, dt: f32) {
        self.solver.clear();
        self.index_of.clear();

        for (i, body) in self.bodies.iter().enumerate() {
            self.index_of.insert(body.id, i);
            self.solver.positions.push(body.position);
            self.solver.angles.push(body.angle);
            // Gravity is integrated up front (symplectic Euler)
            let v = if body.inv_mass() > 0.0 { body.velocity + self.gravity * dt } else { body.velocity };
            self.solver.velocities.push(v);
            self.solver.angular.push(body.angular_velocity);
            self.solver.inv_mass.push(body.inv_mass());
            self.solver.inv_inertia.push(body.inv_inertia());
        }

        self.solver_joints.clear();
        for joint in self.joints.iter() {
            let (Some(&a), Some(&b)) = (self.index_of.get(&joint.body_a), self.index_of.get(&joint.body_b)) else {
                continue;
            };
            self.solver_joints.push(SolverJoint { a, b, length: joint.length() });
        }
    }

    fn find_contacts(&mut self) {
        self.contacts.clear();

        let jointed: HashSet<(usize, usize)> = self
            .solver_joints
            .iter()
            .map(|j| (j.a.min(j.b), j.a.max(j.b)))
            .collect();

        // Chains stay short; all-pairs is cheaper than maintaining a broadphase.
        let n = self.bodies.len();
        for a in 0..n {
            for b in (a + 1)..n {
                if jointed.contains(&(a, b)) {
                    continue;
                }
                let fa = self.bodies[a].fixture();
                let fb = self.bodies[b].fixture();
                let Some((normal, separation)) = collide_circles(
                    self.solver.positions[a],
                    fa.radius,
                    self.solver.positions[b],
                    fb.radius,
                ) else {
                    continue;
                };
                self.contacts.push(Contact {
                    a,
                    b,
                    normal,
                    separation,
                    radius_a: fa.radius,
                    radius_b: fb.radius,
                    friction: mix_friction(fa.friction, fb.friction),
                    normal_impulse: 0.0,
                    tangent_impulse: 0.0,
                });
            }
        }
    }

    fn store_solver_state(&mut self) {
        for (i, body) in self.bodies.iter_mut().enumerate() {
            body.position = self.solver.positions[i];
            body.angle = self.solver.angles[i];
            body.velocity = self.solver.velocities[i];
            body.angular_velocity = self.solver.angular[i];
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(radius: f32) -> CircleFixture {
        CircleFixture::new(radius, 1.0, 0.6)
    }

    #[test]
    fn free_body_moves_with_its_velocity() {
        let mut world = PhysicsWorld::default();
        let id = world.create_body(Vec2::ZERO, Vec2::new(2.5, 0.0), ball(0.4));
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let body = world.body(id).unwrap();
        assert!((body.position.x - 2.5).abs() < 1e-3);
        assert!(body.position.y.abs() < 1e-6);
    }

    #[test]
    fn gravity_accelerates_bodies() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 10.0));
        let id = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.4));
        world.step(0.1);
        assert!((world.body(id).unwrap().velocity.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn gravity_can_change_between_steps() {
        let mut world = PhysicsWorld::default();
        assert_eq!(world.gravity(), Vec2::ZERO);
        let id = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.4));
        world.step(0.1);
        assert_eq!(world.body(id).unwrap().velocity, Vec2::ZERO);

        world.set_gravity(Vec2::new(0.0, -5.0));
        assert_eq!(world.gravity(), Vec2::new(0.0, -5.0));
        world.step(0.1);
        let v = world.body(id).unwrap().velocity;
        assert!((v.y + 0.5).abs() < 1e-5);
        assert!(v.x.abs() < 1e-6);
    }

    #[test]
    fn non_positive_dt_is_a_no_op() {
        let mut world = PhysicsWorld::default();
        let id = world.create_body(Vec2::ZERO, Vec2::new(1.0, 0.0), ball(0.4));
        world.step(0.0);
        world.step(-1.0);
        assert_eq!(world.body(id).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn distance_joint_holds_bodies_at_length() {
        let mut world = PhysicsWorld::default();
        let a = world.create_body(Vec2::ZERO, Vec2::new(-1.0, 0.0), ball(0.4));
        let b = world.create_body(Vec2::new(0.8, 0.0), Vec2::new(1.0, 0.3), ball(0.4));
        world.create_joint(a, b, 0.8).unwrap();
        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
        let pa = world.body(a).unwrap().position;
        let pb = world.body(b).unwrap().position;
        assert!((pa.distance(pb) - 0.8).abs() < 0.02);
    }

    #[test]
    fn overlapping_bodies_push_apart() {
        let mut world = PhysicsWorld::default();
        let a = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.5));
        let b = world.create_body(Vec2::new(0.6, 0.0), Vec2::ZERO, ball(0.5));
        world.step(1.0 / 60.0);
        assert_eq!(world.contact_count(), 1);
        let contact = &world.contacts()[0];
        assert!(contact.separation < 0.0);
        assert!(contact.normal.x.abs() > 0.99);
        assert!((contact.friction() - 0.6).abs() < 1e-6);
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let d = world.body(a).unwrap().position.distance(world.body(b).unwrap().position);
        assert!(d > 1.0 - 0.05, "bodies still overlap: d = {d}");
    }

    #[test]
    fn jointed_pairs_do_not_collide() {
        let mut world = PhysicsWorld::default();
        let a = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.5));
        let b = world.create_body(Vec2::new(0.6, 0.0), Vec2::ZERO, ball(0.5));
        world.create_joint(a, b, 0.6).unwrap();
        world.step(1.0 / 60.0);
        assert_eq!(world.contact_count(), 0);
    }

    #[test]
    fn destroying_body_removes_attached_joints() {
        let mut world = PhysicsWorld::default();
        let a = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.4));
        let b = world.create_body(Vec2::new(0.8, 0.0), Vec2::ZERO, ball(0.4));
        let c = world.create_body(Vec2::new(1.6, 0.0), Vec2::ZERO, ball(0.4));
        let ab = world.create_joint(a, b, 0.8).unwrap();
        let bc = world.create_joint(b, c, 0.8).unwrap();

        let removed = world.destroy_body(a).unwrap();
        assert_eq!(removed, vec![ab]);
        assert!(world.joint(ab).is_none());
        assert!(world.joint(bc).is_some());
        assert_eq!(world.body_count(), 2);
        assert_eq!(world.bodies()[0].id(), b);

        assert!(matches!(world.destroy_body(a), Err(BannerError::UnknownBody(_))));
    }

    #[test]
    fn destroying_joint_keeps_its_bodies() {
        let mut world = PhysicsWorld::default();
        let a = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.5));
        let b = world.create_body(Vec2::new(0.6, 0.0), Vec2::ZERO, ball(0.5));
        let ab = world.create_joint(a, b, 0.6).unwrap();
        assert_eq!(world.joints()[0].id(), ab);

        assert!(world.destroy_joint(ab));
        assert!(world.joint(ab).is_none());
        assert!(world.joints().is_empty());
        assert_eq!(world.body_count(), 2);
        assert!(world.body(a).is_some() && world.body(b).is_some());

        // Unjointed and overlapping: they collide now
        world.step(1.0 / 60.0);
        assert_eq!(world.contact_count(), 1);
    }

    #[test]
    fn destroying_unknown_joint_returns_false() {
        let mut world = PhysicsWorld::default();
        let a = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.4));
        let b = world.create_body(Vec2::new(0.8, 0.0), Vec2::ZERO, ball(0.4));
        let ab = world.create_joint(a, b, 0.8).unwrap();

        assert!(!world.destroy_joint(JointId(999)));
        assert_eq!(world.joint_count(), 1);
        assert!(world.destroy_joint(ab));
        assert!(!world.destroy_joint(ab));
    }

    #[test]
    fn joint_to_unknown_body_is_rejected() {
        let mut world = PhysicsWorld::default();
        let a = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.4));
        assert!(world.create_joint(a, BodyId(999), 1.0).is_err());
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn set_fixture_updates_mass() {
        let mut world = PhysicsWorld::default();
        let id = world.create_body(Vec2::ZERO, Vec2::ZERO, ball(0.5));
        let small = world.body(id).unwrap().mass();
        let old = world.body_mut(id).unwrap().set_fixture(ball(1.0));
        assert_eq!(old.radius, 0.5);
        let big = world.body(id).unwrap().mass();
        assert!((big / small - 4.0).abs() < 1e-4);
    }
}

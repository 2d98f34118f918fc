use std::f32::consts::PI;

use crate::core::math::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Circular collision shape with its material
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleFixture {
    pub radius: f32,
    pub density: f32,
    pub friction: f32,
}

impl CircleFixture {
    pub fn new(radius: f32, density: f32, friction: f32) -> Self {
        Self { radius, density, friction }
    }

    pub fn mass(&self) -> f32 {
        self.density * PI * self.radius * self.radius
    }

    /// Solid disc about its centre: I = 0.5 * m * r^2
    pub fn inertia(&self) -> f32 {
        0.5 * self.mass() * self.radius * self.radius
    }
}

/// Dynamic circle body
#[derive(Clone, Debug)]
pub struct Body {
    pub(super) id: BodyId,
    /// World position (centre of mass)
    pub position: Vec2,
    /// Linear velocity (units per second)
    pub velocity: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    /// Angular velocity (radians per second)
    pub angular_velocity: f32,

    fixture: CircleFixture,
    inv_mass: f32,
    inv_inertia: f32,
}

impl Body {
    pub(super) fn new(id: BodyId, position: Vec2, velocity: Vec2, fixture: CircleFixture) -> Self {
        let mut body = Self {
            id,
            position,
            velocity,
            angle: 0.0,
            angular_velocity: 0.0,
            fixture,
            inv_mass: 0.0,
            inv_inertia: 0.0,
        };
        body.reset_mass_data();
        body
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn fixture(&self) -> &CircleFixture {
        &self.fixture
    }

    pub fn radius(&self) -> f32 {
        self.fixture.radius
    }

    pub fn mass(&self) -> f32 {
        if self.inv_mass > 0.0 { 1.0 / self.inv_mass } else { 0.0 }
    }

    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    /// Replace the collision shape, returning the old one. Mass data follows the new fixture.
    pub fn set_fixture(&mut self, fixture: CircleFixture) -> CircleFixture {
        let old = std::mem::replace(&mut self.fixture, fixture);
        self.reset_mass_data();
        old
    }

    fn reset_mass_data(&mut self) {
        let mass = self.fixture.mass();
        let inertia = self.fixture.inertia();
        // Degenerate fixtures behave as static
        self.inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        self.inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
    }
}

//! PhysicsWorld - Minimal 2D rigid-body world for the banner chain
//!
//! Scope is exactly what the banner needs:
//! - Circle bodies only (one fixture per body, swappable while alive).
//! - Rigid distance joints anchored at body centres.
//! - Circle-circle contacts with Coulomb friction; jointed pairs don't collide.
//! - Sequential-impulse velocity solver + non-linear position correction.

mod body;
mod contact;
mod joint;
mod solver;
mod world;

pub use body::{Body, BodyId, CircleFixture};
pub use contact::Contact;
pub use joint::{DistanceJoint, JointId};
pub use world::PhysicsWorld;

/// Allowed penetration before position correction kicks in (world units)
pub const LINEAR_SLOP: f32 = 0.005;
/// Fraction of the position error resolved per iteration
pub const BAUMGARTE: f32 = 0.2;
/// Cap on a single position correction (world units)
pub const MAX_LINEAR_CORRECTION: f32 = 0.2;

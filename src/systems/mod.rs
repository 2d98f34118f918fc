pub mod chain;
pub mod physics_world;

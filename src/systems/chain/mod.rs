//! ChainSystem - Per-step bookkeeping of the banner chain
//!
//! Order within a step: spawn, resize, retire. Links are kept oldest-first;
//! each link is joined to its neighbours with a distance joint whose length
//! is the sum of the two radii, so the beads always touch.

mod link;
mod resize;
mod retire;
mod spawn;

use std::collections::VecDeque;

pub use link::{ChainLink, StepReport};

use crate::core::random::Rng;
use crate::domain::error::Result;
use crate::domain::settings::{ChainSettings, WorldSettings};
use crate::physics_world::PhysicsWorld;

pub struct ChainSystem {
    settings: ChainSettings,
    density: f32,
    friction: f32,
    links: VecDeque<ChainLink>,
    spawn_countdown: f32,
}

impl ChainSystem {
    pub fn new(settings: ChainSettings, world: &WorldSettings) -> Self {
        Self {
            settings,
            density: world.density,
            friction: world.friction,
            links: VecDeque::new(),
            spawn_countdown: 0.0,
        }
    }

    pub fn settings(&self) -> &ChainSettings {
        &self.settings
    }

    /// Oldest first
    pub fn links(&self) -> &VecDeque<ChainLink> {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn spawn_countdown(&self) -> f32 {
        self.spawn_countdown
    }

    /// Run one bookkeeping step after the physics step
    pub fn step(&mut self, physics: &mut PhysicsWorld, rng: &mut Rng, dt: f32) -> Result<StepReport> {
        let mut report = StepReport::default();
        if spawn::spawn_step(self, physics, rng, dt)? {
            report.spawned = 1;
        }
        report.resized = resize::resize_step(self, physics, rng, dt);
        if retire::retire_step(self, physics)? {
            report.retired = 1;
        }
        Ok(report)
    }

    /// Forget all links; the caller clears the physics world
    pub fn clear(&mut self) {
        self.links.clear();
        self.spawn_countdown = 0.0;
    }
}

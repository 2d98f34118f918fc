//! BannerSettings - every tuning constant of the banner, loadable from JSON
//!
//! Missing sections or fields fall back to the values of the classic banner,
//! so `{}` is a valid settings document.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{BannerError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerSettings {
    pub seed: u32,
    pub world: WorldSettings,
    pub chain: ChainSettings,
    pub render: RenderSettings,
}

/// Physics world and clock
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub gravity_x: f32,
    pub gravity_y: f32,
    /// Fixed timestep in seconds
    pub timestep: f32,
    /// Max fixed steps per `advance` call; older backlog is dropped
    pub max_substeps: u32,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
    pub density: f32,
    pub friction: f32,
}

/// Spawn / resize / retire tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    pub spawn_interval: f32,
    pub spawn_retry: f32,
    /// Newest link must be past this x before another one spawns
    pub spawn_clearance: f32,
    pub spawn_jitter: f32,
    pub initial_radius: f32,
    pub launch_speed: f32,
    pub launch_spread: f32,
    pub resize_base: f32,
    pub resize_jitter: f32,
    pub max_radius: f32,
    /// Fraction of the remaining headroom a resize may take
    pub growth_rate: f32,
    pub retire_x: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub style: RenderStyle,
    /// World units spanning the canvas height
    pub view_height: f32,
    pub background: String,
    pub ink: String,
    pub marker_size: f32,
    pub line_width: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    Dots,
    Circles,
    #[default]
    Ribbon,
}

impl FromStr for RenderStyle {
    type Err = BannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dots" => Ok(RenderStyle::Dots),
            "circles" => Ok(RenderStyle::Circles),
            "ribbon" => Ok(RenderStyle::Ribbon),
            _ => Err(BannerError::UnknownRenderStyle(s.to_string())),
        }
    }
}

impl Default for BannerSettings {
    fn default() -> Self {
        Self {
            seed: 12345,
            world: WorldSettings::default(),
            chain: ChainSettings::default(),
            render: RenderSettings::default(),
        }
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity_x: 0.0,
            gravity_y: 0.0,
            timestep: 1.0 / 60.0,
            max_substeps: 5,
            velocity_iterations: 8,
            position_iterations: 3,
            density: 1.0,
            friction: 0.6,
        }
    }
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            spawn_interval: 0.4,
            spawn_retry: 0.1,
            spawn_clearance: 0.1,
            spawn_jitter: 0.1,
            initial_radius: 0.4,
            launch_speed: 2.5,
            launch_spread: 0.75,
            resize_base: 0.5,
            resize_jitter: 0.8,
            max_radius: 4.0,
            growth_rate: 0.1,
            retire_x: 20.0,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            style: RenderStyle::Ribbon,
            view_height: 20.0,
            background: "#222".to_string(),
            ink: "#ca4".to_string(),
            marker_size: 0.1,
            line_width: 0.05,
        }
    }
}

impl BannerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: BannerSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        positive("world.timestep", w.timestep)?;
        positive("world.density", w.density)?;
        non_negative("world.friction", w.friction)?;
        finite("world.gravity_x", w.gravity_x)?;
        finite("world.gravity_y", w.gravity_y)?;
        if w.max_substeps == 0 {
            return Err(invalid("world.max_substeps must be at least 1"));
        }

        let c = &self.chain;
        positive("chain.spawn_interval", c.spawn_interval)?;
        positive("chain.spawn_retry", c.spawn_retry)?;
        finite("chain.spawn_clearance", c.spawn_clearance)?;
        non_negative("chain.spawn_jitter", c.spawn_jitter)?;
        positive("chain.initial_radius", c.initial_radius)?;
        finite("chain.launch_speed", c.launch_speed)?;
        non_negative("chain.launch_spread", c.launch_spread)?;
        positive("chain.resize_base", c.resize_base)?;
        non_negative("chain.resize_jitter", c.resize_jitter)?;
        positive("chain.max_radius", c.max_radius)?;
        finite("chain.retire_x", c.retire_x)?;
        if c.initial_radius > c.max_radius {
            return Err(invalid(format!(
                "chain.initial_radius ({}) exceeds chain.max_radius ({})",
                c.initial_radius, c.max_radius
            )));
        }
        if !(c.growth_rate > 0.0 && c.growth_rate <= 1.0) {
            return Err(invalid(format!(
                "chain.growth_rate must be in (0, 1], got {}",
                c.growth_rate
            )));
        }

        let r = &self.render;
        positive("render.view_height", r.view_height)?;
        positive("render.marker_size", r.marker_size)?;
        positive("render.line_width", r.line_width)?;
        css_hex_color("render.background", &r.background)?;
        css_hex_color("render.ink", &r.ink)?;
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> BannerError {
    BannerError::InvalidSettings(msg.into())
}

fn finite(name: &str, v: f32) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {v}")))
    }
}

fn positive(name: &str, v: f32) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be > 0, got {v}")))
    }
}

fn non_negative(name: &str, v: f32) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be >= 0, got {v}")))
    }
}

/// `#rgb` or `#rrggbb`
fn css_hex_color(name: &str, s: &str) -> Result<()> {
    let ok = match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    };
    if ok {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be #rgb or #rrggbb, got '{s}'")))
    }
}

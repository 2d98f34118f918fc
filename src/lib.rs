//! Banner Engine - Growing-circle chain banner in WASM
//!
//! Circles spawn near the origin, drift right while slowly inflating,
//! stay linked to their neighbours by distance joints, and retire once
//! they leave the frame. The chain is drawn as dots, outlines or one
//! continuous ribbon.
//!
//! Architecture:
//! - core/          - Math and RNG
//! - domain/        - Settings and errors
//! - systems/       - Physics world and chain bookkeeping
//! - render/        - View transform, ribbon geometry, canvas
//! - simulation/    - Orchestration and the JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod render;
pub mod simulation;

// Short paths used throughout the crate
pub use systems::chain;
pub use systems::physics_world;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    {
        // A second init (hot reload) keeps the first logger
        let _ = console_log::init_with_level(log::Level::Info);
    }

    log::info!("banner engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::error::BannerError;
pub use domain::settings::{BannerSettings, ChainSettings, RenderSettings, RenderStyle, WorldSettings};
pub use render::{Circle, RibbonPath, ViewTransform};
pub use simulation::{Banner, BannerCore, FixedStep, PerfStats};

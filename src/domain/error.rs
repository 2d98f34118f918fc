use thiserror::Error;

use crate::physics_world::BodyId;

#[derive(Debug, Error)]
pub enum BannerError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),

    #[error("unknown render style '{0}' (expected dots, circles or ribbon)")]
    UnknownRenderStyle(String),

    #[error("canvas: {0}")]
    Canvas(String),
}

pub type Result<T> = std::result::Result<T, BannerError>;

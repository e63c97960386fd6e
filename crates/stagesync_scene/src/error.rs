//! Error types for frame reconciliation

use bevy::prelude::Entity;
use thiserror::Error;

/// Errors raised while setting up the stage or reconciling a frame.
///
/// Любая ошибка во время `update()` прерывает весь кадр: частичного
/// восстановления нет, draw submission не выполняется.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A Sprite or Text entity has no Position at the moment it is read.
    #[error("entity {entity:?} has no Position component")]
    MissingPosition {
        /// Entity whose position was requested.
        entity: Entity,
    },

    /// The backend could not resolve an image or font reference.
    #[error("failed to resolve asset '{asset}': {reason}")]
    AssetResolution {
        /// Asset reference as stored in the component.
        asset: String,
        /// Backend-provided reason.
        reason: String,
    },

    /// Registry lookup without a prior existence check.
    #[error("no scene node registered for entity {entity:?}")]
    NotFound {
        /// Entity that was looked up.
        entity: Entity,
    },

    /// Stage width/height must both be positive.
    #[error("stage dimensions must be positive, got {width}x{height}")]
    InvalidStageSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Stage config text could not be parsed.
    #[error("invalid stage configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The backend refused to initialize.
    #[error("backend initialization failed: {0}")]
    BackendInit(String),
}

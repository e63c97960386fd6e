//! Sprite component (image-based visual)

use bevy::prelude::*;

/// Image-backed visual.
///
/// `deleted` — soft delete: узел не создаётся, а существующий обрабатывается
/// по `DeletedPolicy`. `visible` — обычный флаг видимости, синхронизируется
/// каждый кадр.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Sprite {
    /// Asset reference resolved by the backend (path, `res://` URI, ...).
    pub asset: String,
    pub deleted: bool,
    pub visible: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            asset: String::new(),
            deleted: false,
            visible: true,
        }
    }
}

impl Sprite {
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            ..Default::default()
        }
    }
}

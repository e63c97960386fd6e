//! ECS Components, которые читает frame synchronizer
//!
//! - position: координаты на сцене (Position)
//! - sprite: image-based visual + soft-delete флаг (Sprite)
//! - text: текстовый visual со стилем (Text)
//!
//! Все три — read-only input для ядра; создаёт/меняет их внешний код.

pub mod position;
pub mod sprite;
pub mod text;

pub use position::*;
pub use sprite::*;
pub use text::*;

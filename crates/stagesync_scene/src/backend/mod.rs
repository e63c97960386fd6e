//! Backend seam — retained-mode scene graph behind a trait
//!
//! Ядро не рисует само: создание узлов, атрибуты и draw submission
//! делегируются `SceneBackend`. Реализации:
//! - `HeadlessStage` — in-memory дерево (тесты, headless прогоны)
//! - `GodotStage` — в крейте `stagesync_godot`

mod headless;

pub use headless::*;

use bevy::prelude::Vec2;

use crate::components::Text;
use crate::error::RenderError;

/// Every node the synchronizer creates is anchored at its visual center.
pub const NODE_ANCHOR: Vec2 = Vec2::new(0.5, 0.5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Style handed to the backend for text nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS-like shorthand, `"<size> <font>"` (например `"30px Arial"`).
    pub font: String,
    /// Fill color as written in the component (`"white"`, `"#ff8800"`).
    pub fill: String,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn from_text(text: &Text) -> Self {
        Self {
            font: format!("{} {}", text.size, text.font),
            fill: text.color.clone(),
            align: TextAlign::Center,
        }
    }

    /// Pixel size from the shorthand (`"30px Arial"` → `Some(30.0)`).
    pub fn size_px(&self) -> Option<f32> {
        let size = self.font.split_whitespace().next()?;
        size.strip_suffix("px").unwrap_or(size).parse().ok()
    }

    /// Font family from the shorthand (`"30px Comic Sans"` → `"Comic Sans"`).
    pub fn family(&self) -> &str {
        match self.font.split_once(' ') {
            Some((_, family)) => family.trim(),
            None => "",
        }
    }
}

/// Retained scene graph the processor reconciles against.
///
/// Все методы вызываются только с main thread, из одного места
/// (`RenderingProcessor`), поэтому `&mut self` без синхронизации.
pub trait SceneBackend: Sized {
    /// Where the renderer output is mounted (display surface, parent node).
    type Mount;
    /// Backend-specific options, forwarded verbatim from the host.
    type Options;
    /// Handle to a node in the backend's scene graph.
    type Node: Clone + std::fmt::Debug;

    /// Initialize the renderer for a `width`x`height` stage and mount its output.
    fn init(
        mount: &mut Self::Mount,
        width: u32,
        height: u32,
        options: Self::Options,
    ) -> Result<Self, RenderError>;

    /// Create the empty top-level container that gets submitted every frame.
    fn create_root(&mut self) -> Self::Node;

    /// Create an image node; fails with `AssetResolution` if `asset` can't be resolved.
    fn create_sprite(&mut self, asset: &str) -> Result<Self::Node, RenderError>;

    fn create_text(&mut self, content: &str, style: &TextStyle) -> Self::Node;

    fn add_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Detach `node` from its parent and release it.
    fn destroy(&mut self, node: Self::Node);

    fn set_anchor(&mut self, node: &Self::Node, anchor: Vec2);

    fn set_position(&mut self, node: &Self::Node, position: Vec2);

    fn set_visible(&mut self, node: &Self::Node, visible: bool);

    fn set_text(&mut self, node: &Self::Node, content: &str);

    fn set_text_style(&mut self, node: &Self::Node, style: &TextStyle);

    /// Submit `root` for drawing.
    fn render(&mut self, root: &Self::Node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_shorthand() {
        let text = Text {
            text: "Score: 0".into(),
            color: "white".into(),
            font: "Arial".into(),
            size: "30px".into(),
        };
        let style = TextStyle::from_text(&text);
        assert_eq!(style.font, "30px Arial");
        assert_eq!(style.fill, "white");
        assert_eq!(style.align, TextAlign::Center);
        assert_eq!(style.size_px(), Some(30.0));
        assert_eq!(style.family(), "Arial");
    }

    #[test]
    fn test_style_multiword_family() {
        let text = Text {
            font: "Comic Sans".into(),
            size: "12".into(),
            ..Default::default()
        };
        let style = TextStyle::from_text(&text);
        assert_eq!(style.size_px(), Some(12.0));
        assert_eq!(style.family(), "Comic Sans");
    }
}

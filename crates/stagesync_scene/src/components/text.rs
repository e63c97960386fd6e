//! Text component (styled label)

use bevy::prelude::*;

/// Styled text visual.
///
/// `font` и `size` хранятся раздельно, стиль узла собирается как
/// `"<size> <font>"` (см. `TextStyle::from_text`).
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Text {
    pub text: String,
    pub color: String,
    pub font: String,
    pub size: String,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: "white".to_string(),
            font: "Arial".to_string(),
            size: "30px".to_string(),
        }
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Text;
    use crate::components::Sprite;

    #[test]
    fn test_component_defaults() {
        let text = Text::default();
        assert_eq!(text.text, "");
        assert_eq!(text.color, "white");
        assert_eq!(text.font, "Arial");
        assert_eq!(text.size, "30px");

        let sprite = Sprite::default();
        assert_eq!(sprite.asset, "");
        assert!(!sprite.deleted);
        assert!(sprite.visible);
    }
}

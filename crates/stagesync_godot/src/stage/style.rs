//! TextStyle → Godot Label theme overrides

use godot::classes::{Font, Label, SystemFont};
use godot::global::HorizontalAlignment;
use godot::prelude::*;

use stagesync_scene::{logger, TextAlign, TextStyle};

/// CSS-ish color name or `#rrggbb` → Godot Color. Unknown → white.
pub fn parse_color(name: &str) -> Color {
    match name.trim().to_ascii_lowercase().as_str() {
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "red" => Color::from_rgb(1.0, 0.0, 0.0),
        "green" => Color::from_rgb(0.0, 0.5, 0.0),
        "lime" => Color::from_rgb(0.0, 1.0, 0.0),
        "blue" => Color::from_rgb(0.0, 0.0, 1.0),
        "yellow" => Color::from_rgb(1.0, 1.0, 0.0),
        "orange" => Color::from_rgb(1.0, 0.65, 0.0),
        "gray" | "grey" => Color::from_rgb(0.5, 0.5, 0.5),
        other => Color::from_html(other).unwrap_or_else(|| {
            logger::log_warning(&format!("Unknown text color '{}', using white", other));
            Color::WHITE
        }),
    }
}

pub fn apply_text_style(label: &mut Gd<Label>, style: &TextStyle) {
    if let Some(size) = style.size_px() {
        label.add_theme_font_size_override("font_size", size.round() as i32);
    }

    let family = style.family();
    if !family.is_empty() {
        let mut font = SystemFont::new_gd();
        let names = [GString::from(family)];
        font.set_font_names(&PackedStringArray::from(&names[..]));
        label.add_theme_font_override("font", &font.upcast::<Font>());
    }

    label.add_theme_color_override("font_color", parse_color(&style.fill));

    let alignment = match style.align {
        TextAlign::Left => HorizontalAlignment::LEFT,
        TextAlign::Center => HorizontalAlignment::CENTER,
        TextAlign::Right => HorizontalAlignment::RIGHT,
    };
    label.set_horizontal_alignment(alignment);
}

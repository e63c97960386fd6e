//! GodotStage — `SceneBackend` поверх Godot 2D scene tree
//!
//! Маппинг узлов:
//! - root container → `Node2D` (child mount node'а)
//! - sprite → `Sprite2D` (texture через ResourceLoader)
//! - text → `Label` (Control: anchor считаем сами из размера label'а)

mod style;

use bevy::prelude::Vec2;
use godot::classes::{
    CanvasItem, DisplayServer, Label, Node2D, RenderingServer, ResourceLoader, Sprite2D, Texture2D,
};
use godot::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;

use stagesync_scene::{logger, RenderError, SceneBackend, TextStyle};

pub use style::{apply_text_style, parse_color};

/// Node handle handed to the core registry.
#[derive(Debug, Clone)]
pub enum GodotNode {
    Container(Gd<Node2D>),
    Sprite(Gd<Sprite2D>),
    Label(Gd<Label>),
}

impl GodotNode {
    fn as_node(&self) -> Gd<Node> {
        match self {
            GodotNode::Container(node) => node.clone().upcast::<Node>(),
            GodotNode::Sprite(sprite) => sprite.clone().upcast::<Node>(),
            GodotNode::Label(label) => label.clone().upcast::<Node>(),
        }
    }

    fn as_canvas_item(&self) -> Gd<CanvasItem> {
        match self {
            GodotNode::Container(node) => node.clone().upcast::<CanvasItem>(),
            GodotNode::Sprite(sprite) => sprite.clone().upcast::<CanvasItem>(),
            GodotNode::Label(label) => label.clone().upcast::<CanvasItem>(),
        }
    }

    fn instance_id(&self) -> InstanceId {
        match self {
            GodotNode::Container(node) => node.instance_id(),
            GodotNode::Sprite(sprite) => sprite.instance_id(),
            GodotNode::Label(label) => label.instance_id(),
        }
    }
}

/// Options forwarded from `StageBridge` exports.
#[derive(Debug, Clone)]
pub struct GodotStageOptions {
    pub clear_color: Option<Color>,
    /// Resize the main window to the stage size on init.
    pub resize_window: bool,
}

impl Default for GodotStageOptions {
    fn default() -> Self {
        Self {
            clear_color: None,
            resize_window: true,
        }
    }
}

pub struct GodotStage {
    mount: Gd<Node>,
    size: Vector2i,
    /// Label anchors/positions: Control не умеет anchor как Sprite2D,
    /// поэтому позицию пересчитываем после каждого изменения текста.
    label_anchors: HashMap<InstanceId, Vector2>,
    label_positions: HashMap<InstanceId, Vector2>,
    /// Последний применённый стиль: SystemFont + theme overrides только при изменении
    label_styles: HashMap<InstanceId, TextStyle>,
}

impl GodotStage {
    pub fn size(&self) -> Vector2i {
        self.size
    }

    fn place_label(&self, label: &mut Gd<Label>) {
        let id = label.instance_id();
        let anchor = self.label_anchors.get(&id).copied().unwrap_or(Vector2::ZERO);
        let position = self.label_positions.get(&id).copied().unwrap_or(Vector2::ZERO);

        label.reset_size();
        let size = label.get_size();
        label.set_position(position - size * anchor);
    }
}

/// Store `value` under `key`; `false` if the same value was already stored.
fn remember_if_changed<K: Hash + Eq, V: PartialEq + Clone>(
    cache: &mut HashMap<K, V>,
    key: K,
    value: &V,
) -> bool {
    if cache.get(&key) == Some(value) {
        return false;
    }
    cache.insert(key, value.clone());
    true
}

fn to_godot(v: Vec2) -> Vector2 {
    Vector2::new(v.x, v.y)
}

impl SceneBackend for GodotStage {
    type Mount = Gd<Node>;
    type Options = GodotStageOptions;
    type Node = GodotNode;

    fn init(
        mount: &mut Gd<Node>,
        width: u32,
        height: u32,
        options: GodotStageOptions,
    ) -> Result<Self, RenderError> {
        if !mount.is_instance_valid() {
            return Err(RenderError::BackendInit("mount node is not a valid instance".to_string()));
        }

        let size = Vector2i::new(
            i32::try_from(width).map_err(|_| RenderError::BackendInit(format!("width {} too large", width)))?,
            i32::try_from(height).map_err(|_| RenderError::BackendInit(format!("height {} too large", height)))?,
        );

        if options.resize_window {
            DisplayServer::singleton().window_set_size(size);
        }
        if let Some(color) = options.clear_color {
            RenderingServer::singleton().set_default_clear_color(color);
        }

        logger::log(&format!("GodotStage: {}x{} stage mounted under {}", width, height, mount.get_name()));

        Ok(Self {
            mount: mount.clone(),
            size,
            label_anchors: HashMap::new(),
            label_positions: HashMap::new(),
            label_styles: HashMap::new(),
        })
    }

    fn create_root(&mut self) -> GodotNode {
        let mut root = Node2D::new_alloc();
        root.set_name("Stage");
        self.mount.add_child(&root.clone().upcast::<Node>());
        GodotNode::Container(root)
    }

    fn create_sprite(&mut self, asset: &str) -> Result<GodotNode, RenderError> {
        let mut loader = ResourceLoader::singleton();
        let Some(resource) = loader.load_ex(asset).done() else {
            return Err(RenderError::AssetResolution {
                asset: asset.to_string(),
                reason: "ResourceLoader returned null".to_string(),
            });
        };

        let texture = resource.try_cast::<Texture2D>().map_err(|_| RenderError::AssetResolution {
            asset: asset.to_string(),
            reason: "resource is not a Texture2D".to_string(),
        })?;

        let mut sprite = Sprite2D::new_alloc();
        sprite.set_texture(&texture);
        Ok(GodotNode::Sprite(sprite))
    }

    fn create_text(&mut self, content: &str, style: &TextStyle) -> GodotNode {
        let mut label = Label::new_alloc();
        label.set_text(content);
        apply_text_style(&mut label, style);
        self.label_styles.insert(label.instance_id(), style.clone());
        GodotNode::Label(label)
    }

    fn add_child(&mut self, parent: &GodotNode, child: &GodotNode) {
        parent.as_node().add_child(&child.as_node());
    }

    fn destroy(&mut self, node: GodotNode) {
        let id = node.instance_id();
        self.label_anchors.remove(&id);
        self.label_positions.remove(&id);
        self.label_styles.remove(&id);

        let mut godot_node = node.as_node();
        if let Some(mut parent) = godot_node.get_parent() {
            parent.remove_child(&godot_node);
        }
        godot_node.queue_free(); // Отложенное удаление (Godot safe)
    }

    fn set_anchor(&mut self, node: &GodotNode, anchor: Vec2) {
        match node {
            GodotNode::Sprite(sprite) => {
                // centered=false + offset = -size * anchor (0.5/0.5 ≡ centered)
                let mut sprite = sprite.clone();
                let size = sprite.get_rect().size;
                sprite.set_centered(false);
                sprite.set_offset(Vector2::new(-size.x * anchor.x, -size.y * anchor.y));
            }
            GodotNode::Label(label) => {
                let mut label = label.clone();
                self.label_anchors.insert(label.instance_id(), to_godot(anchor));
                self.place_label(&mut label);
            }
            GodotNode::Container(_) => {}
        }
    }

    fn set_position(&mut self, node: &GodotNode, position: Vec2) {
        match node {
            GodotNode::Container(container) => container.clone().set_position(to_godot(position)),
            GodotNode::Sprite(sprite) => sprite.clone().set_position(to_godot(position)),
            GodotNode::Label(label) => {
                let mut label = label.clone();
                self.label_positions.insert(label.instance_id(), to_godot(position));
                self.place_label(&mut label);
            }
        }
    }

    fn set_visible(&mut self, node: &GodotNode, visible: bool) {
        node.as_canvas_item().set_visible(visible);
    }

    fn set_text(&mut self, node: &GodotNode, content: &str) {
        let GodotNode::Label(label) = node else {
            logger::log_warning(&format!("GodotStage: set_text on non-label node {:?}", node));
            return;
        };

        let mut label = label.clone();
        if label.get_text().to_string() != content {
            label.set_text(content);
            self.place_label(&mut label);
        }
    }

    fn set_text_style(&mut self, node: &GodotNode, style: &TextStyle) {
        let GodotNode::Label(label) = node else {
            logger::log_warning(&format!("GodotStage: set_text_style on non-label node {:?}", node));
            return;
        };

        // Text path зовёт это каждый кадр; неизменный стиль не трогаем
        if !remember_if_changed(&mut self.label_styles, label.instance_id(), style) {
            return;
        }

        let mut label = label.clone();
        apply_text_style(&mut label, style);
        self.place_label(&mut label);
    }

    fn render(&mut self, root: &GodotNode) {
        // Godot рисует сам; просим перерисовать root canvas item в этом кадре
        root.as_canvas_item().queue_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagesync_scene::TextAlign;

    fn style(fill: &str) -> TextStyle {
        TextStyle {
            font: "30px Arial".into(),
            fill: fill.into(),
            align: TextAlign::Center,
        }
    }

    #[test]
    fn test_unchanged_style_is_skipped() {
        let mut cache = HashMap::new();

        assert!(remember_if_changed(&mut cache, 1u64, &style("white")));
        assert!(!remember_if_changed(&mut cache, 1u64, &style("white")));
        assert!(remember_if_changed(&mut cache, 1u64, &style("red")));
        assert!(!remember_if_changed(&mut cache, 1u64, &style("red")));

        // Другой label — свой кэш
        assert!(remember_if_changed(&mut cache, 2u64, &style("red")));
        assert_eq!(cache.len(), 2);
    }
}

//! HeadlessStage — in-memory retained scene graph
//!
//! Хранит узлы в slot-векторе (`NodeId` = индекс). Ничего не растеризует:
//! `render()` только обходит дерево и запоминает draw list.

use bevy::prelude::Vec2;
use std::collections::HashSet;

use super::{SceneBackend, TextStyle};
use crate::error::RenderError;
use crate::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessContent {
    Container,
    Sprite { texture: String },
    Text { content: String, style: TextStyle },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessNode {
    pub content: HeadlessContent,
    pub position: Vec2,
    pub anchor: Vec2,
    pub visible: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl HeadlessNode {
    fn new(content: HeadlessContent) -> Self {
        Self {
            content,
            position: Vec2::ZERO,
            anchor: Vec2::ZERO,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            HeadlessContent::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn text_style(&self) -> Option<&TextStyle> {
        match &self.content {
            HeadlessContent::Text { style, .. } => Some(style),
            _ => None,
        }
    }

    pub fn texture(&self) -> Option<&str> {
        match &self.content {
            HeadlessContent::Sprite { texture } => Some(texture),
            _ => None,
        }
    }
}

/// Mount target: records every renderer view attached to it.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    pub views: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    /// If set, only these asset references resolve; anything else fails.
    pub known_assets: Option<HashSet<String>>,
}

impl HeadlessOptions {
    pub fn with_known_assets<I, S>(assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_assets: Some(assets.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug)]
pub struct HeadlessStage {
    width: u32,
    height: u32,
    options: HeadlessOptions,
    nodes: Vec<Option<HeadlessNode>>,
    draw_calls: u64,
    last_draw: Vec<NodeId>,
}

impl HeadlessStage {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn options(&self) -> &HeadlessOptions {
        &self.options
    }

    pub fn node(&self, id: &NodeId) -> Option<&HeadlessNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Number of nodes not yet destroyed (root included).
    pub fn live_nodes(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    /// Nodes drawn by the last `render()`, in draw order (hidden subtrees skipped).
    pub fn last_draw(&self) -> &[NodeId] {
        &self.last_draw
    }

    fn alloc(&mut self, content: HeadlessContent) -> NodeId {
        self.nodes.push(Some(HeadlessNode::new(content)));
        NodeId(self.nodes.len() - 1)
    }

    fn node_mut(&mut self, id: &NodeId) -> Option<&mut HeadlessNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn collect_visible(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.node(&id) else {
            return;
        };
        if !node.visible {
            return;
        }
        out.push(id);
        for child in &node.children {
            self.collect_visible(*child, out);
        }
    }
}

impl SceneBackend for HeadlessStage {
    type Mount = HeadlessDisplay;
    type Options = HeadlessOptions;
    type Node = NodeId;

    fn init(
        mount: &mut HeadlessDisplay,
        width: u32,
        height: u32,
        options: HeadlessOptions,
    ) -> Result<Self, RenderError> {
        mount.views.push((width, height));
        logger::log(&format!("HeadlessStage: mounted {}x{} view", width, height));

        Ok(Self {
            width,
            height,
            options,
            nodes: Vec::new(),
            draw_calls: 0,
            last_draw: Vec::new(),
        })
    }

    fn create_root(&mut self) -> NodeId {
        self.alloc(HeadlessContent::Container)
    }

    fn create_sprite(&mut self, asset: &str) -> Result<NodeId, RenderError> {
        if let Some(known) = &self.options.known_assets {
            if !known.contains(asset) {
                return Err(RenderError::AssetResolution {
                    asset: asset.to_string(),
                    reason: "not in known_assets".to_string(),
                });
            }
        }

        Ok(self.alloc(HeadlessContent::Sprite {
            texture: asset.to_string(),
        }))
    }

    fn create_text(&mut self, content: &str, style: &TextStyle) -> NodeId {
        self.alloc(HeadlessContent::Text {
            content: content.to_string(),
            style: style.clone(),
        })
    }

    fn add_child(&mut self, parent: &NodeId, child: &NodeId) {
        let previous = self.node(child).and_then(|node| node.parent);
        if let Some(old_parent) = previous {
            if let Some(node) = self.node_mut(&old_parent) {
                node.children.retain(|c| c != child);
            }
        }

        if let Some(node) = self.node_mut(child) {
            node.parent = Some(*parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(*child);
        }
    }

    fn destroy(&mut self, node: NodeId) {
        let Some(removed) = self.nodes.get_mut(node.0).and_then(Option::take) else {
            return;
        };

        if let Some(parent) = removed.parent {
            if let Some(parent_node) = self.node_mut(&parent) {
                parent_node.children.retain(|c| *c != node);
            }
        }

        for child in removed.children {
            self.destroy(child);
        }
    }

    fn set_anchor(&mut self, node: &NodeId, anchor: Vec2) {
        if let Some(node) = self.node_mut(node) {
            node.anchor = anchor;
        }
    }

    fn set_position(&mut self, node: &NodeId, position: Vec2) {
        if let Some(node) = self.node_mut(node) {
            node.position = position;
        }
    }

    fn set_visible(&mut self, node: &NodeId, visible: bool) {
        if let Some(node) = self.node_mut(node) {
            node.visible = visible;
        }
    }

    fn set_text(&mut self, node: &NodeId, content: &str) {
        match self.node_mut(node).map(|n| &mut n.content) {
            Some(HeadlessContent::Text { content: current, .. }) => {
                *current = content.to_string();
            }
            _ => logger::log_warning(&format!("HeadlessStage: set_text on non-text node {:?}", node)),
        }
    }

    fn set_text_style(&mut self, node: &NodeId, style: &TextStyle) {
        match self.node_mut(node).map(|n| &mut n.content) {
            Some(HeadlessContent::Text { style: current, .. }) => {
                *current = style.clone();
            }
            _ => logger::log_warning(&format!(
                "HeadlessStage: set_text_style on non-text node {:?}",
                node
            )),
        }
    }

    fn render(&mut self, root: &NodeId) {
        let mut drawn = Vec::new();
        self.collect_visible(*root, &mut drawn);
        self.last_draw = drawn;
        self.draw_calls += 1;
    }
}

//! Node registry — маппинг Entity → scene node
//!
//! Владелец — `RenderingProcessor` (одна копия на процесс, main thread only).
//! Каждая запись помечена видом узла, чтобы Sprite и Text пути не портили
//! узлы друг друга.

use bevy::prelude::Entity;
use std::collections::HashMap;

use crate::error::RenderError;

/// Which synchronizer path owns a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Sprite,
    Text,
}

/// Lifecycle of a registered node. `Destroyed` = запись удалена из registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeState {
    #[default]
    Active,
    /// Hidden because the Sprite was soft-deleted; not updated until un-deleted.
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeEntry<N> {
    pub kind: NodeKind,
    pub node: N,
    pub state: NodeState,
}

impl<N> NodeEntry<N> {
    pub fn new(kind: NodeKind, node: N) -> Self {
        Self {
            kind,
            node,
            state: NodeState::Active,
        }
    }
}

#[derive(Debug)]
pub struct NodeRegistry<N> {
    entries: HashMap<Entity, NodeEntry<N>>,
}

impl<N> Default for NodeRegistry<N> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<N> NodeRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, entity: Entity) -> bool {
        self.entries.contains_key(&entity)
    }

    pub fn get(&self, entity: Entity) -> Result<&NodeEntry<N>, RenderError> {
        self.entries
            .get(&entity)
            .ok_or(RenderError::NotFound { entity })
    }

    pub fn get_mut(&mut self, entity: Entity) -> Result<&mut NodeEntry<N>, RenderError> {
        self.entries
            .get_mut(&entity)
            .ok_or(RenderError::NotFound { entity })
    }

    pub fn kind_of(&self, entity: Entity) -> Option<NodeKind> {
        self.entries.get(&entity).map(|entry| entry.kind)
    }

    /// Record `entry`; last writer wins. The replaced entry is handed back.
    pub fn put(&mut self, entity: Entity, entry: NodeEntry<N>) -> Option<NodeEntry<N>> {
        self.entries.insert(entity, entry)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<NodeEntry<N>> {
        self.entries.remove(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &NodeEntry<N>)> {
        self.entries.iter().map(|(entity, entry)| (*entity, entry))
    }
}

//! Frame synchronizer — component state → scene nodes
//!
//! Пути выполняются строго по порядку:
//! 1. sprites — Sprite + Position (soft delete через DeletedPolicy)
//! 2. texts — Text + Position
//! 3. lifecycle — release узлов, чья entity потеряла свой компонент (только при release_orphaned_nodes)
//!
//! Каждый путь — `impl RenderingProcessor` в отдельном файле.

mod lifecycle;
mod sprites;
mod texts;


use bevy::prelude::*;

use crate::backend::SceneBackend;
use crate::components::Position;
use crate::error::RenderError;
use crate::logger;
use crate::processor::RenderingProcessor;
use crate::registry::NodeKind;

/// Per-frame counters returned by `RenderingProcessor::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    /// Nodes created this frame.
    pub created: u32,
    /// Nodes whose attributes were written this frame (created ones included).
    pub updated: u32,
    /// Nodes hidden this frame because their Sprite became deleted.
    pub hidden: u32,
    /// Nodes destroyed this frame.
    pub released: u32,
    /// Entities skipped because their node belongs to the other path.
    pub conflicts: u32,
}

/// Point lookup of an entity's Position.
pub(crate) fn read_position(world: &World, entity: Entity) -> Result<Vec2, RenderError> {
    world
        .get::<Position>(entity)
        .map(Position::as_vec2)
        .ok_or(RenderError::MissingPosition { entity })
}

impl<B: SceneBackend> RenderingProcessor<B> {
    /// Count a kind conflict; warn only the first time per entity.
    pub(crate) fn report_conflict(&mut self, entity: Entity, wanted: NodeKind, stats: &mut FrameStats) {
        stats.conflicts += 1;

        if self.conflicts.insert(entity) {
            logger::log_warning(&format!(
                "Entity {:?} wants a {:?} node but already owns a {:?} node — skipped",
                entity,
                wanted,
                self.registry.kind_of(entity)
            ));
        }
    }
}

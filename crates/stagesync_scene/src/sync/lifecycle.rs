//! Node teardown — Active/Hidden → Destroyed

use bevy::prelude::*;

use super::FrameStats;
use crate::backend::SceneBackend;
use crate::components::{Sprite, Text};
use crate::logger;
use crate::processor::RenderingProcessor;
use crate::registry::NodeKind;

impl<B: SceneBackend> RenderingProcessor<B> {
    /// Destroy the node registered for `entity`, if any.
    ///
    /// Explicit teardown hook for hosts that despawn entities outside the
    /// frame loop. Returns `false` if nothing was registered.
    pub fn release(&mut self, entity: Entity) -> bool {
        let Some(entry) = self.registry.remove(entity) else {
            return false;
        };

        self.conflicts.remove(&entity);
        self.backend.destroy(entry.node);

        logger::log(&format!("Released {:?} node for {:?}", entry.kind, entity));
        true
    }

    /// Release every node whose entity no longer holds the component of the node's kind.
    ///
    /// `World::get` возвращает None и для despawned entity, так что оба
    /// случая (компонент снят / entity удалена) обрабатываются одинаково.
    pub(crate) fn release_orphans(&mut self, world: &World, stats: &mut FrameStats) {
        let orphans: Vec<Entity> = self
            .registry
            .iter()
            .filter(|(entity, entry)| match entry.kind {
                NodeKind::Sprite => world.get::<Sprite>(*entity).is_none(),
                NodeKind::Text => world.get::<Text>(*entity).is_none(),
            })
            .map(|(entity, _)| entity)
            .collect();

        for entity in orphans {
            if self.release(entity) {
                stats.released += 1;
            }
        }
    }
}

//! Sprite path

use bevy::prelude::*;

use super::{read_position, FrameStats};
use crate::backend::{SceneBackend, NODE_ANCHOR};
use crate::components::Sprite;
use crate::config::DeletedPolicy;
use crate::error::RenderError;
use crate::logger;
use crate::processor::RenderingProcessor;
use crate::registry::{NodeEntry, NodeKind, NodeState};

impl<B: SceneBackend> RenderingProcessor<B> {
    /// Sync every Sprite entity: create missing nodes, then visibility + position.
    pub(crate) fn sync_sprites(
        &mut self,
        world: &mut World,
        stats: &mut FrameStats,
    ) -> Result<(), RenderError> {
        let mut query = world.query::<(Entity, &Sprite)>();

        for (entity, sprite) in query.iter(world) {
            // deleted → узел не создаём, Position не читаем
            if sprite.deleted {
                self.retire_deleted_sprite(entity, stats);
                continue;
            }

            let position = read_position(world, entity)?;

            match self.registry.kind_of(entity) {
                Some(NodeKind::Text) => {
                    self.report_conflict(entity, NodeKind::Sprite, stats);
                    continue;
                }
                Some(NodeKind::Sprite) => {}
                None => {
                    let node = self.backend.create_sprite(&sprite.asset)?;
                    self.backend.set_anchor(&node, NODE_ANCHOR);
                    self.backend.set_position(&node, position);
                    self.backend.add_child(&self.root, &node);
                    self.registry.put(entity, NodeEntry::new(NodeKind::Sprite, node));
                    stats.created += 1;

                    logger::log(&format!(
                        "Created sprite node for {:?} ('{}') at ({}, {})",
                        entity, sprite.asset, position.x, position.y
                    ));
                }
            }

            let entry = self.registry.get_mut(entity)?;
            if entry.state == NodeState::Hidden {
                entry.state = NodeState::Active;
                logger::log(&format!("Sprite {:?} un-deleted — node active again", entity));
            }

            self.backend.set_visible(&entry.node, sprite.visible);
            self.backend.set_position(&entry.node, position);
            stats.updated += 1;
        }

        Ok(())
    }

    /// Apply `DeletedPolicy` to an already existing sprite node.
    fn retire_deleted_sprite(&mut self, entity: Entity, stats: &mut FrameStats) {
        if self.config.deleted_policy == DeletedPolicy::Freeze {
            return;
        }

        let Ok(entry) = self.registry.get_mut(entity) else {
            return;
        };

        // Text-узел этой entity не трогаем: deleted относится только к Sprite
        if entry.kind != NodeKind::Sprite || entry.state == NodeState::Hidden {
            return;
        }

        self.backend.set_visible(&entry.node, false);
        entry.state = NodeState::Hidden;
        stats.hidden += 1;

        logger::log(&format!("Sprite {:?} deleted — node hidden", entity));
    }
}

//! Text path

use bevy::prelude::*;

use super::{read_position, FrameStats};
use crate::backend::{SceneBackend, TextStyle, NODE_ANCHOR};
use crate::components::Text;
use crate::error::RenderError;
use crate::logger;
use crate::processor::RenderingProcessor;
use crate::registry::{NodeEntry, NodeKind};

impl<B: SceneBackend> RenderingProcessor<B> {
    /// Sync every Text entity: create missing nodes, then content, style, position.
    pub(crate) fn sync_texts(
        &mut self,
        world: &mut World,
        stats: &mut FrameStats,
    ) -> Result<(), RenderError> {
        let mut query = world.query::<(Entity, &Text)>();

        for (entity, text) in query.iter(world) {
            let position = read_position(world, entity)?;
            let style = TextStyle::from_text(text);

            match self.registry.kind_of(entity) {
                Some(NodeKind::Sprite) => {
                    self.report_conflict(entity, NodeKind::Text, stats);
                    continue;
                }
                Some(NodeKind::Text) => {}
                None => {
                    let node = self.backend.create_text(&text.text, &style);
                    self.backend.set_anchor(&node, NODE_ANCHOR);
                    self.backend.set_position(&node, position);
                    self.backend.add_child(&self.root, &node);
                    self.registry.put(entity, NodeEntry::new(NodeKind::Text, node));
                    stats.created += 1;

                    logger::log(&format!(
                        "Created text node for {:?} ('{}', {}) at ({}, {})",
                        entity, text.text, style.font, position.x, position.y
                    ));
                }
            }

            let entry = self.registry.get(entity)?;
            self.backend.set_text(&entry.node, &text.text);
            self.backend.set_text_style(&entry.node, &style);
            self.backend.set_position(&entry.node, position);
            stats.updated += 1;
        }

        Ok(())
    }
}

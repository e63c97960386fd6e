//! RenderingProcessor — setup + per-frame reconciliation + draw
//!
//! Создаётся ПЕРВЫМ среди всего, что трогает сцену (root container должен
//! существовать до остальных систем), а `update()` вызывается ПОСЛЕДНИМ в
//! кадре, чтобы показать все изменения этого кадра.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::backend::SceneBackend;
use crate::config::StageConfig;
use crate::error::RenderError;
use crate::logger;
use crate::registry::NodeRegistry;
use crate::sync::FrameStats;

/// Owns the backend, the root container and the node registry.
///
/// Main thread only: в Bevy живёт как NonSend resource.
pub struct RenderingProcessor<B: SceneBackend> {
    pub(crate) backend: B,
    pub(crate) root: B::Node,
    pub(crate) registry: NodeRegistry<B::Node>,
    pub(crate) config: StageConfig,
    /// Entities already reported as Sprite/Text kind conflicts.
    pub(crate) conflicts: HashSet<Entity>,
    frame: u64,
    last_stats: FrameStats,
}

impl<B: SceneBackend> RenderingProcessor<B> {
    /// Initialize the backend, mount its output into `mount`, create the root container.
    pub fn new(
        mount: &mut B::Mount,
        config: StageConfig,
        options: B::Options,
    ) -> Result<Self, RenderError> {
        config.validate()?;

        let mut backend = B::init(mount, config.width, config.height, options)?;
        let root = backend.create_root();

        logger::log_info(&format!(
            "RenderingProcessor ready: stage {}x{}, deleted_policy={:?}, release_orphaned_nodes={}",
            config.width, config.height, config.deleted_policy, config.release_orphaned_nodes
        ));

        Ok(Self {
            backend,
            root,
            registry: NodeRegistry::new(),
            config,
            conflicts: HashSet::new(),
            frame: 0,
            last_stats: FrameStats::default(),
        })
    }

    /// Reconcile the scene with `world`, then submit the root container.
    ///
    /// Order: sprite path → text path → orphan release (opt-in) → draw. The first error
    /// aborts the frame; nothing is submitted for drawing in that case.
    /// `_dt` is accepted for future animation rules and currently unused.
    pub fn update(&mut self, world: &mut World, _dt: f32) -> Result<FrameStats, RenderError> {
        let mut stats = FrameStats {
            frame: self.frame,
            ..Default::default()
        };

        self.sync_sprites(world, &mut stats)?;
        self.sync_texts(world, &mut stats)?;

        if self.config.release_orphaned_nodes {
            self.release_orphans(world, &mut stats);
        }

        self.backend.render(&self.root);

        self.frame += 1;
        self.last_stats = stats;
        Ok(stats)
    }

    pub fn root(&self) -> &B::Node {
        &self.root
    }

    pub fn registry(&self) -> &NodeRegistry<B::Node> {
        &self.registry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Number of completed frames.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

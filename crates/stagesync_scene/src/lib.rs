//! stagesync scene core
//!
//! Синхронизация ECS → retained scene graph, раз в кадр.
//!
//! HYBRID ARCHITECTURE:
//! - ECS (Bevy `World`) = источник правды: Position, Sprite, Text
//! - Backend (`SceneBackend`) = узлы сцены, мутируются in place
//! - `RenderingProcessor` = registry Entity → узел + порядок sprite → text → draw

use bevy::prelude::*;

pub mod backend;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod processor;
pub mod registry;
pub mod sync;
pub mod systems;

pub use backend::{
    HeadlessContent, HeadlessDisplay, HeadlessNode, HeadlessOptions, HeadlessStage, NodeId,
    SceneBackend, TextAlign, TextStyle, NODE_ANCHOR,
};
pub use components::*;
pub use config::{DeletedPolicy, StageConfig};
pub use error::RenderError;
pub use logger::{log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use processor::RenderingProcessor;
pub use registry::{NodeEntry, NodeKind, NodeRegistry, NodeState};
pub use sync::FrameStats;
pub use systems::{register_render_systems, render_frame_main_thread, FrameDelta, RenderStatus};

/// Minimal headless Bevy App (no window, no renderer) with the console logger.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins);
    app
}

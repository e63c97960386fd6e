//! Bevy integration — processor как NonSend resource + exclusive system в Last
//!
//! NAMING: `_main_thread` суффикс = система трогает backend (NonSend)

use bevy::prelude::*;

use crate::backend::SceneBackend;
use crate::logger;
use crate::processor::RenderingProcessor;
use crate::sync::FrameStats;

/// Elapsed time handed to the processor; the host writes it before `app.update()`.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameDelta(pub f32);

/// Outcome of the most recent render frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct RenderStatus {
    /// Frames that completed (draw submitted).
    pub frames: u64,
    /// Frames aborted by an error.
    pub failed_frames: u64,
    pub last_stats: FrameStats,
    /// Error of the most recent frame, `None` if it completed.
    pub last_error: Option<String>,
}

/// Register the render system for backend `B` in the `Last` schedule.
///
/// Processor должен быть вставлен отдельно:
/// `app.insert_non_send_resource(RenderingProcessor::<B>::new(..)?)`.
pub fn register_render_systems<B: SceneBackend + 'static>(app: &mut App) {
    app.init_resource::<FrameDelta>();
    app.init_resource::<RenderStatus>();

    // Last — после всех остальных систем кадра
    app.add_systems(Last, render_frame_main_thread::<B>);
}

/// Run one reconciliation + draw for the `RenderingProcessor<B>` stored in the world.
pub fn render_frame_main_thread<B: SceneBackend + 'static>(world: &mut World) {
    // Вынимаем processor, чтобы отдать ему &mut World целиком
    let Some(mut processor) = world.remove_non_send_resource::<RenderingProcessor<B>>() else {
        return;
    };

    let dt = world.get_resource::<FrameDelta>().map(|d| d.0).unwrap_or_default();
    let result = processor.update(world, dt);

    world.insert_non_send_resource(processor);

    let mut status = world.get_resource_or_insert_with(RenderStatus::default);
    match result {
        Ok(stats) => {
            status.frames += 1;
            status.last_stats = stats;
            status.last_error = None;

            if stats.created > 0 || stats.released > 0 {
                logger::log(&format!(
                    "Frame {}: +{} nodes, -{} nodes, {} updated",
                    stats.frame, stats.created, stats.released, stats.updated
                ));
            }
        }
        Err(err) => {
            status.failed_frames += 1;
            status.last_error = Some(err.to_string());
            logger::log_error(&format!("Render frame aborted: {}", err));
        }
    }
}

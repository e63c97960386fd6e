//! Мост между Godot и Bevy ECS (100% Rust, no GDScript logic)
//!
//! Архитектура:
//! - ready(): GodotLogger, GodotStage под этим node'ом, headless App
//! - process(delta): FrameDelta → app.update() → render system в Last
//! - #[func] методы: GDScript мутирует компоненты (Position/Sprite/Text)

mod entity_id;
mod logger;

use bevy::prelude::{App, Entity, World};
use godot::prelude::*;
use entity_id::{entity_from_id, entity_to_id};
use logger::GodotLogger;
use stagesync_scene::{
    create_headless_app, register_render_systems, set_log_level, set_logger, DeletedPolicy, FrameDelta,
    LogLevel, Position, RenderingProcessor, Sprite, StageConfig, Text,
};

use crate::stage::{GodotStage, GodotStageOptions};

/// StageBridge: главный node для Godot ↔ ECS интеграции.
///
/// Должен быть в сцене раньше всего, что обращается к stage root.
#[derive(GodotClass)]
#[class(base=Node)]
pub struct StageBridge {
    base: Base<Node>,

    #[export]
    stage_width: i64,

    #[export]
    stage_height: i64,

    #[export]
    clear_color: Color,

    /// Legacy режим: deleted sprite замораживается вместо скрытия
    #[export]
    freeze_deleted: bool,

    /// Bevy App (component store + NonSend RenderingProcessor)
    app: Option<App>,
}

#[godot_api]
impl INode for StageBridge {
    fn init(base: Base<Node>) -> Self {
        Self {
            base,
            stage_width: 800,
            stage_height: 600,
            clear_color: Color::BLACK,
            freeze_deleted: false,
            app: None,
        }
    }

    fn ready(&mut self) {
        GodotLogger::clear_log_file();
        set_logger(Box::new(GodotLogger));
        set_log_level(LogLevel::Debug);

        let width = u32::try_from(self.stage_width).unwrap_or(0);
        let height = u32::try_from(self.stage_height).unwrap_or(0);
        let policy = if self.freeze_deleted {
            DeletedPolicy::Freeze
        } else {
            DeletedPolicy::Hide
        };
        let config = StageConfig::new(width, height).with_deleted_policy(policy);

        let options = GodotStageOptions {
            clear_color: Some(self.clear_color),
            resize_window: true,
        };

        let mut mount = self.base().clone();
        let processor = match RenderingProcessor::<GodotStage>::new(&mut mount, config, options) {
            Ok(processor) => processor,
            Err(err) => {
                stagesync_scene::log_error(&format!("StageBridge: stage setup failed: {}", err));
                return;
            }
        };

        let mut app = create_headless_app();
        app.insert_non_send_resource(processor);
        register_render_systems::<GodotStage>(&mut app);
        self.app = Some(app);

        stagesync_scene::log_info("StageBridge ready");
    }

    fn process(&mut self, delta: f64) {
        let Some(app) = &mut self.app else {
            return;
        };

        app.world_mut().insert_resource(FrameDelta(delta as f32));
        app.update(); // render_frame_main_thread крутится в Last
    }
}

#[godot_api]
impl StageBridge {
    /// Spawn an entity with Position + Sprite. Returns entity id, -1 if not ready.
    #[func]
    pub fn spawn_sprite(&mut self, x: f32, y: f32, asset: GString) -> i64 {
        self.with_world(|world| {
            let entity = world
                .spawn((Position::new(x, y), Sprite::new(asset.to_string())))
                .id();
            Self::export_entity(entity)
        })
        .unwrap_or(-1)
    }

    /// Spawn an entity with Position + Text. Returns entity id, -1 if not ready.
    #[func]
    pub fn spawn_text(
        &mut self,
        x: f32,
        y: f32,
        text: GString,
        color: GString,
        font: GString,
        size: GString,
    ) -> i64 {
        self.with_world(|world| {
            let entity = world
                .spawn((
                    Position::new(x, y),
                    Text {
                        text: text.to_string(),
                        color: color.to_string(),
                        font: font.to_string(),
                        size: size.to_string(),
                    },
                ))
                .id();
            Self::export_entity(entity)
        })
        .unwrap_or(-1)
    }

    #[func]
    pub fn set_entity_position(&mut self, entity_id: i64, x: f32, y: f32) -> bool {
        self.with_entity(entity_id, |world, entity| {
            world.entity_mut(entity).insert(Position::new(x, y));
            true
        })
    }

    #[func]
    pub fn set_sprite_visible(&mut self, entity_id: i64, visible: bool) -> bool {
        self.with_entity(entity_id, |world, entity| {
            let Some(mut sprite) = world.get_mut::<Sprite>(entity) else {
                return false;
            };
            sprite.visible = visible;
            true
        })
    }

    /// Soft delete: узел скрывается (или замораживается при freeze_deleted)
    #[func]
    pub fn set_sprite_deleted(&mut self, entity_id: i64, deleted: bool) -> bool {
        self.with_entity(entity_id, |world, entity| {
            let Some(mut sprite) = world.get_mut::<Sprite>(entity) else {
                return false;
            };
            sprite.deleted = deleted;
            true
        })
    }

    #[func]
    pub fn set_text_content(&mut self, entity_id: i64, text: GString) -> bool {
        self.with_entity(entity_id, |world, entity| {
            let Some(mut component) = world.get_mut::<Text>(entity) else {
                return false;
            };
            component.text = text.to_string();
            true
        })
    }

    /// True removal: despawn + явный release узла (orphan sweep по умолчанию выключен)
    #[func]
    pub fn despawn_entity(&mut self, entity_id: i64) -> bool {
        self.with_entity(entity_id, |world, entity| {
            if let Some(mut processor) =
                world.get_non_send_resource_mut::<RenderingProcessor<GodotStage>>()
            {
                processor.release(entity);
            }
            world.despawn(entity)
        })
    }

    fn with_world<R>(&mut self, f: impl FnOnce(&mut World) -> R) -> Option<R> {
        let Some(app) = &mut self.app else {
            stagesync_scene::log_error("StageBridge: stage not initialized");
            return None;
        };
        Some(f(app.world_mut()))
    }

    fn with_entity(&mut self, entity_id: i64, f: impl FnOnce(&mut World, Entity) -> bool) -> bool {
        let Some(entity) = entity_from_id(entity_id) else {
            stagesync_scene::log_warning(&format!("StageBridge: invalid entity id {}", entity_id));
            return false;
        };

        self.with_world(|world| world.entities().contains(entity) && f(world, entity))
            .unwrap_or(false)
    }

    fn export_entity(entity: Entity) -> i64 {
        entity_to_id(entity).unwrap_or_else(|| {
            stagesync_scene::log_warning(&format!(
                "StageBridge: {:?} does not fit a GDScript int",
                entity
            ));
            -1
        })
    }
}

//! Frame reconciliation scenarios
//!
//! Проверяем:
//! - Scenario A/B/C (sprite move, deleted sprite, text update)
//! - Идемпотентность двух кадров без изменений
//! - Once-created: узел живёт, пока у entity есть компонент

use bevy::prelude::*;
use stagesync_scene::{
    HeadlessDisplay, HeadlessNode, HeadlessOptions, HeadlessStage, Position, RenderingProcessor,
    Sprite, StageConfig, Text,
};

fn create_processor() -> RenderingProcessor<HeadlessStage> {
    let mut display = HeadlessDisplay::default();
    RenderingProcessor::new(&mut display, StageConfig::new(800, 600), HeadlessOptions::default())
        .expect("headless stage always initializes")
}

fn node<'a>(processor: &'a RenderingProcessor<HeadlessStage>, entity: Entity) -> &'a HeadlessNode {
    let id = processor.registry().get(entity).expect("entity has a node").node;
    processor.backend().node(&id).expect("node is alive")
}

/// Observable state of every registered node, sorted by entity.
fn snapshot(processor: &RenderingProcessor<HeadlessStage>) -> Vec<(Entity, HeadlessNode)> {
    let mut nodes: Vec<_> = processor
        .registry()
        .entities()
        .map(|entity| (entity, node(processor, entity).clone()))
        .collect();
    nodes.sort_by_key(|(entity, _)| entity.index());
    nodes
}

/// Scenario A: sprite создаётся, потом двигается без второго узла
#[test]
fn test_sprite_moves_without_new_node() {
    let mut world = World::new();
    let mut processor = create_processor();

    let e1 = world
        .spawn((
            Position::new(10.0, 20.0),
            Sprite {
                asset: "ship.png".into(),
                deleted: false,
                visible: true,
            },
        ))
        .id();

    processor.update(&mut world, 0.016).unwrap();
    let first_id = processor.registry().get(e1).unwrap().node;
    assert_eq!(node(&processor, e1).position, Vec2::new(10.0, 20.0));
    assert!(node(&processor, e1).visible);

    world.get_mut::<Position>(e1).unwrap().x = 15.0;
    let stats = processor.update(&mut world, 0.016).unwrap();

    assert_eq!(stats.created, 0);
    assert_eq!(processor.registry().get(e1).unwrap().node, first_id);
    assert_eq!(node(&processor, e1).position, Vec2::new(15.0, 20.0));
    assert_eq!(processor.registry().len(), 1);
}

/// Scenario B: deleted sprite без прошлого узла → узла нет
#[test]
fn test_deleted_sprite_never_gets_node() {
    let mut world = World::new();
    let mut processor = create_processor();

    let e2 = world
        .spawn((
            Position::default(),
            Sprite {
                deleted: true,
                ..Default::default()
            },
        ))
        .id();

    processor.update(&mut world, 0.016).unwrap();

    assert!(!processor.registry().has(e2));
    // Только root container
    assert_eq!(processor.backend().live_nodes(), 1);
}

/// Scenario C: text узел обновляет содержимое in place
#[test]
fn test_text_updates_in_place() {
    let mut world = World::new();
    let mut processor = create_processor();

    let e3 = world
        .spawn((
            Position::new(0.0, 0.0),
            Text {
                text: "Score: 0".into(),
                color: "white".into(),
                font: "Arial".into(),
                size: "30px".into(),
            },
        ))
        .id();

    processor.update(&mut world, 0.016).unwrap();
    let first_id = processor.registry().get(e3).unwrap().node;
    assert_eq!(node(&processor, e3).text(), Some("Score: 0"));
    assert_eq!(node(&processor, e3).text_style().unwrap().font, "30px Arial");
    assert_eq!(node(&processor, e3).position, Vec2::ZERO);

    world.get_mut::<Text>(e3).unwrap().text = "Score: 10".into();
    let stats = processor.update(&mut world, 0.016).unwrap();

    assert_eq!(stats.created, 0);
    assert_eq!(processor.registry().get(e3).unwrap().node, first_id);
    assert_eq!(node(&processor, e3).text(), Some("Score: 10"));
}

#[test]
fn test_two_frames_without_changes_are_idempotent() {
    let mut world = World::new();
    let mut processor = create_processor();

    for i in 0..20 {
        let position = Position::new(i as f32 * 8.0, 100.0 - i as f32);
        match i % 4 {
            0 => world.spawn((position, Sprite::new(format!("tile_{}.png", i)))),
            1 => world.spawn((position, Text::new(format!("label {}", i)))),
            2 => world.spawn((
                position,
                Sprite {
                    asset: "hidden.png".into(),
                    visible: false,
                    ..Default::default()
                },
            )),
            _ => world.spawn((
                position,
                Sprite {
                    asset: "gone.png".into(),
                    deleted: true,
                    ..Default::default()
                },
            )),
        };
    }

    processor.update(&mut world, 0.016).unwrap();
    let first = snapshot(&processor);
    let first_draw = processor.backend().last_draw().to_vec();

    processor.update(&mut world, 0.016).unwrap();
    let second = snapshot(&processor);

    assert_eq!(first.len(), 15);
    assert_eq!(first, second, "second frame changed node state");
    assert_eq!(first_draw, processor.backend().last_draw());
    assert_eq!(processor.backend().draw_calls(), 2);
}

#[test]
fn test_nodes_survive_while_components_remain() {
    let mut world = World::new();
    let mut processor = create_processor();

    let sprite = world.spawn((Position::default(), Sprite::new("a.png"))).id();
    let label = world.spawn((Position::default(), Text::new("b"))).id();
    processor.update(&mut world, 0.016).unwrap();

    for tick in 0..100 {
        // Сущности двигаются, мигают и soft-удаляются — но компонент остаётся
        world.get_mut::<Position>(sprite).unwrap().y = tick as f32;
        world.get_mut::<Sprite>(sprite).unwrap().visible = tick % 2 == 0;
        world.get_mut::<Sprite>(sprite).unwrap().deleted = tick % 10 == 0;
        world.get_mut::<Text>(label).unwrap().text = format!("tick {}", tick);

        processor.update(&mut world, 0.016).unwrap();

        assert!(processor.registry().has(sprite), "sprite node lost at tick {}", tick);
        assert!(processor.registry().has(label), "text node lost at tick {}", tick);

        // deleted → hidden (Hide policy), иначе visible пишется каждый кадр
        let expected = tick % 10 != 0 && tick % 2 == 0;
        assert_eq!(node(&processor, sprite).visible, expected, "visibility at tick {}", tick);
    }

    assert_eq!(processor.frame(), 101);
    assert_eq!(processor.backend().live_nodes(), 3);
}

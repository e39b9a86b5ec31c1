//! The orbit plugin inside a headless Bevy app
//!
//! Time advances by a fixed 1/60 s per update so the tick sees reference
//! frames.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use orbit_menu::bridge::{orbit_channels, OrbitHandle};
use orbit_menu::config::{OrbitConfig, EVENT_BUFFER_SIZE};
use orbit_menu::ecs::components::{OrbitCamera, OrbitTile};
use orbit_menu::ecs::resources::{FrameEvents, OrbitEngineRes};
use orbit_menu::orbit::{OrbitEngine, OrbitEvent, TouchState};
use orbit_menu::OrbitMenuPlugin;

fn base_app(plugin: OrbitMenuPlugin) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));
    app.add_plugins(plugin);
    app
}

fn engine() -> OrbitEngine {
    OrbitEngine::new(OrbitConfig::default()).unwrap()
}

fn linked_app() -> (App, OrbitHandle) {
    let (handle, link) = orbit_channels();
    let app = base_app(OrbitMenuPlugin::new(engine()).with_link(link));
    (app, handle)
}

#[test]
fn tiles_follow_the_instance_matrices() {
    let mut app = base_app(OrbitMenuPlugin::new(engine()));
    {
        let mut engine = app.world_mut().resource_mut::<OrbitEngineRes>();
        engine.set_item_count(10);
        engine.select_index(6, false).unwrap();
    }
    for _ in 0..20 {
        app.update();
    }

    let matrices = app
        .world()
        .resource::<OrbitEngineRes>()
        .instances()
        .matrices()
        .to_vec();
    let mut tiles = app.world_mut().query::<(&OrbitTile, &Transform)>();
    let mut count = 0;
    for (tile, transform) in tiles.iter(app.world()) {
        let expected = Transform::from_matrix(matrices[tile.anchor]);
        assert!(transform.translation.abs_diff_eq(expected.translation, 1e-5));
        assert!(transform.scale.abs_diff_eq(expected.scale, 1e-5));
        count += 1;
    }
    assert_eq!(count, 42);
}

#[test]
fn camera_follows_the_rig() {
    let mut app = base_app(OrbitMenuPlugin::new(engine()));
    app.world_mut()
        .resource_mut::<OrbitEngineRes>()
        .touch_down(Vec2::new(10.0, 10.0));
    for _ in 0..10 {
        app.update();
    }

    let distance = app.world().resource::<OrbitEngineRes>().camera().distance();
    assert!(distance > 3.0);

    let mut cameras = app
        .world_mut()
        .query_filtered::<&Transform, With<OrbitCamera>>();
    let transform = cameras.single(app.world()).unwrap();
    assert!(transform
        .translation
        .abs_diff_eq(Vec3::new(0.0, 0.0, distance), 1e-5));
}

#[test]
fn immediate_select_settles_within_the_same_update() {
    let mut app = base_app(OrbitMenuPlugin::new(engine()));
    app.update();
    {
        let mut engine = app.world_mut().resource_mut::<OrbitEngineRes>();
        engine.set_item_count(42);
        engine.select_index(9, true).unwrap();
    }
    app.update();

    let events = app.world().resource::<FrameEvents>();
    assert!(events.contains(&OrbitEvent::SelectionSettled { index: 9 }));

    app.update();
    assert!(app.world().resource::<FrameEvents>().is_empty());
}

#[test]
fn host_commands_reach_the_engine_and_events_come_back() {
    let (mut app, handle) = linked_app();
    handle.resize(1080.0, 1920.0).unwrap();
    handle.set_item_count(6).unwrap();
    handle.select_index(4, true).unwrap();
    app.update();

    let events = handle.drain_events();
    assert!(events.contains(&OrbitEvent::SelectionSettled { index: 4 }));

    let frame = handle.latest_frame().unwrap();
    assert_eq!(frame.tile_count(), 42);
    assert_eq!(frame.active_index, Some(4));
    assert!(frame.center_tile.width() > 0);
    assert_eq!(frame.glow.len(), 6);
}

#[test]
fn pointer_latch_drives_the_drag() {
    let (mut app, handle) = linked_app();
    handle.touch_down(Vec2::new(500.0, 500.0));
    app.update();
    assert_eq!(
        app.world().resource::<OrbitEngineRes>().touch_state(),
        TouchState::Dragging
    );
    assert_eq!(
        handle.drain_events(),
        vec![OrbitEvent::MovementChanged { moving: true }]
    );

    handle.touch_move(Vec2::new(700.0, 500.0));
    app.update();
    handle.touch_up();
    app.update();
    assert_eq!(
        app.world().resource::<OrbitEngineRes>().touch_state(),
        TouchState::Idle
    );
}

#[test]
fn rejected_commands_do_not_stop_the_tick() {
    let (mut app, handle) = linked_app();
    handle.select_index(3, false).unwrap();
    handle
        .send_json(r#"{ "command": "set_item_count", "count": 5 }"#)
        .unwrap();
    app.update();
    app.update();

    let engine = app.world().resource::<OrbitEngineRes>();
    assert_eq!(engine.item_count(), 5);
    assert!(!engine.controller().is_force_snapping());
    assert_eq!(handle.latest_frame().unwrap().frame, 2);
}

#[test]
fn undrained_events_are_capped_and_the_tick_keeps_running() {
    let (mut app, handle) = linked_app();
    handle.set_item_count(42).unwrap();
    // Each immediate select reports reached and settled in its update
    for update in 0..200 {
        handle.select_index(update % 42, true).unwrap();
        app.update();
    }

    assert_eq!(handle.latest_frame().unwrap().frame, 200);
    let events = handle.drain_events();
    assert_eq!(events.len(), EVENT_BUFFER_SIZE);
    assert_eq!(events[1], OrbitEvent::SelectionSettled { index: 0 });

    handle.select_index(7, true).unwrap();
    app.update();
    assert!(handle
        .drain_events()
        .contains(&OrbitEvent::SelectionSettled { index: 7 }));
}

use bevy::prelude::{App, MinimalPlugins, Transform, With};

use box_rain::gameplay::spawn::spawn::SpawnCount;
use box_rain::gameplay::sync::VisualIndex;
use box_rain::{FallingBox, GameConfig, GamePlugin, Ground, RngSeed};

fn headless_app(restart_after: u32) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    let mut cfg = GameConfig::default();
    // Zero interval: the repeating spawn timer completes on every frame.
    cfg.spawn.interval_secs = 0.0;
    cfg.spawn.restart_after = restart_after;
    app.insert_resource(cfg);
    app.insert_resource(RngSeed(42));
    app.add_plugins(GamePlugin);
    app
}

#[test]
fn ground_exists_after_scene_creation() {
    let mut app = headless_app(100);
    app.update();
    let world = app.world_mut();
    let mut q = world.query_filtered::<&Transform, With<Ground>>();
    let grounds: Vec<_> = q.iter(world).collect();
    assert_eq!(grounds.len(), 1);
    assert_eq!(grounds[0].translation.x, 0.0);
    assert_eq!(grounds[0].translation.y, -280.0);
}

#[test]
fn boxes_accumulate_one_per_tick() {
    let mut app = headless_app(100);
    for frame in 1..=8 {
        app.update();
        let world = app.world_mut();
        let mut q = world.query_filtered::<(), With<FallingBox>>();
        assert_eq!(q.iter(world).count(), frame);
    }
    assert_eq!(app.world().resource::<SpawnCount>().0, 8);
}

#[test]
fn scene_restarts_after_spawn_budget() {
    let mut app = headless_app(5);
    // Five frames exhaust the budget; the restart runs in the same frame's
    // post-physics pass and its commands apply before the next frame.
    for _ in 0..5 {
        app.update();
    }
    app.update();

    let world = app.world_mut();
    assert_eq!(
        world.resource::<SpawnCount>().0,
        1,
        "counter reset at restart, then one fresh spawn"
    );
    let mut grounds = world.query_filtered::<(), With<Ground>>();
    assert_eq!(grounds.iter(world).count(), 1, "ground recreated exactly once");
    let mut boxes = world.query_filtered::<(), With<FallingBox>>();
    assert_eq!(boxes.iter(world).count(), 1, "pre-restart boxes despawned");
    // Index holds exactly the fresh ground + fresh box pairings.
    assert_eq!(world.resource::<VisualIndex>().len(), 2);
}

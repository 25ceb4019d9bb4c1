use bevy::prelude::*;

use crate::core::components::SceneEntity;
use crate::core::config::GameConfig;
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::gameplay::spawn::spawn::{create_ground, QuadMesh, SpawnCount, SpawnRng, SpawnTimer};
use crate::gameplay::sync::{sync_box_visuals, VisualIndex};

/// Request to tear the scene down and rebuild it from scratch.
#[derive(Event, Debug)]
pub struct SceneRestart;

pub struct SceneRestartPlugin;

impl Plugin for SceneRestartPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SceneRestart>().add_systems(
            PostUpdate,
            restart_scene
                .in_set(PostPhysicsAdjustSet)
                .after(sync_box_visuals),
        );
    }
}

/// Despawn everything the scene owns, reset the spawn bookkeeping and put the
/// ground back, through the same creation path startup uses.
fn restart_scene(
    mut commands: Commands,
    mut ev: EventReader<SceneRestart>,
    scene_q: Query<Entity, With<SceneEntity>>,
    mut index: ResMut<VisualIndex>,
    mut count: ResMut<SpawnCount>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<SpawnRng>,
    quad: Option<Res<QuadMesh>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<ColorMaterial>>>,
    cfg: Res<GameConfig>,
) {
    if ev.is_empty() {
        return;
    }
    ev.clear();

    let torn_down = scene_q.iter().count();
    for e in &scene_q {
        commands.entity(e).despawn();
    }
    index.clear();
    count.0 = 0;
    timer.reset();
    create_ground(
        &mut commands,
        &mut index,
        &mut rng.0,
        quad,
        meshes,
        materials,
        &cfg,
    );
    info!(target: "session", entities = torn_down, "scene restarted");
}

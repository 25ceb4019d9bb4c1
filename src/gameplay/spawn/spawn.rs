use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::components::{BoxBody, BoxSize, BoxVisual, FallingBox, Ground, RngSeed, SceneEntity};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;
use crate::gameplay::session::restart::SceneRestart;
use crate::gameplay::sync::VisualIndex;

/// Shared unit quad used by every box visual.
#[derive(Resource)]
pub struct QuadMesh(pub Handle<Mesh>);

#[derive(Resource, Deref, DerefMut)]
pub struct SpawnTimer(pub Timer);

/// Boxes dropped since the last scene (re)start.
#[derive(Resource, Default, Debug)]
pub struct SpawnCount(pub u32);

/// Spawner RNG. Seeded from `RngSeed` when present, entropy otherwise.
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

pub struct BoxSpawnPlugin;

impl Plugin for BoxSpawnPlugin {
    fn build(&self, app: &mut App) {
        let interval = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.spawn.interval_secs)
            .unwrap_or_else(|| GameConfig::default().spawn.interval_secs);
        let rng = match app.world().get_resource::<RngSeed>() {
            Some(seed) => StdRng::seed_from_u64(seed.0),
            None => StdRng::from_entropy(),
        };
        app.insert_resource(SpawnTimer(Timer::from_seconds(
            interval,
            TimerMode::Repeating,
        )))
        .insert_resource(SpawnRng(rng))
        .init_resource::<SpawnCount>()
        .init_resource::<VisualIndex>()
        .add_event::<SceneRestart>()
        .add_systems(Startup, spawn_ground)
        .add_systems(Update, spawn_falling_boxes.in_set(PrePhysicsSet));
    }
}

/// One static slab spanning the window width, centered a little above the
/// bottom edge.
fn spawn_ground(
    mut commands: Commands,
    mut index: ResMut<VisualIndex>,
    mut rng: ResMut<SpawnRng>,
    quad: Option<Res<QuadMesh>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<ColorMaterial>>>,
    cfg: Res<GameConfig>,
) {
    create_ground(
        &mut commands,
        &mut index,
        &mut rng.0,
        quad,
        meshes,
        materials,
        &cfg,
    );
}

pub(crate) fn create_ground(
    commands: &mut Commands,
    index: &mut VisualIndex,
    rng: &mut StdRng,
    quad: Option<Res<QuadMesh>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<ColorMaterial>>>,
    cfg: &GameConfig,
) {
    let pos = Vec2::new(
        0.0,
        -(cfg.window.height * 0.5 - cfg.ground.bottom_offset),
    );
    let size = Vec2::new(cfg.window.width, cfg.ground.thickness);
    let assets = make_visual_assets(commands, quad, meshes, materials, rng);
    spawn_box(commands, index, assets, pos, size, false, cfg);
}

/// Tick the spawn timer; each completion drops one dynamic box above the
/// window top at a random horizontal position inside the margins. When the
/// spawn budget is exhausted a scene restart is requested.
fn spawn_falling_boxes(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<SpawnTimer>,
    mut count: ResMut<SpawnCount>,
    mut index: ResMut<VisualIndex>,
    mut rng: ResMut<SpawnRng>,
    quad: Option<Res<QuadMesh>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<ColorMaterial>>>,
    cfg: Res<GameConfig>,
    mut restart_ev: EventWriter<SceneRestart>,
) {
    timer.tick(time.delta());
    if !timer.finished() {
        return;
    }

    let half_w = cfg.window.width * 0.5;
    let half_h = cfg.window.height * 0.5;
    let x = sample(&mut rng.0, -half_w + cfg.spawn.margin_x, half_w - cfg.spawn.margin_x);
    let y = half_h + cfg.spawn.drop_height;
    let size = Vec2::new(
        sample(&mut rng.0, cfg.spawn.width_range.min, cfg.spawn.width_range.max),
        sample(&mut rng.0, cfg.spawn.height_range.min, cfg.spawn.height_range.max),
    );

    let assets = make_visual_assets(&mut commands, quad, meshes, materials, &mut rng.0);
    spawn_box(&mut commands, &mut index, assets, Vec2::new(x, y), size, true, &cfg);

    count.0 += 1;
    if count.0 >= cfg.spawn.restart_after {
        info!(target: "spawn", spawned = count.0, "spawn budget reached, restarting scene");
        restart_ev.write(SceneRestart);
    }
}

pub struct SpawnedBox {
    pub body: Entity,
    pub visual: Entity,
}

/// Create one body + paired visual and record the pairing. The original
/// scene's single box-creation path: static by default, dynamic on request,
/// with explicit mass data.
pub fn spawn_box(
    commands: &mut Commands,
    index: &mut VisualIndex,
    visual_assets: Option<(Mesh2d, MeshMaterial2d<ColorMaterial>)>,
    pos: Vec2,
    size: Vec2,
    dynamic: bool,
    cfg: &GameConfig,
) -> SpawnedBox {
    let mut body = commands.spawn((
        Transform::from_translation(pos.extend(0.0)),
        GlobalTransform::default(),
        if dynamic {
            RigidBody::Dynamic
        } else {
            RigidBody::Fixed
        },
        Collider::cuboid(size.x * 0.5, size.y * 0.5),
        AdditionalMassProperties::MassProperties(MassProperties {
            local_center_of_mass: Vec2::ZERO,
            mass: cfg.spawn.mass,
            principal_inertia: cfg.spawn.angular_inertia,
        }),
        BoxBody,
        BoxSize(size),
        SceneEntity,
    ));
    if dynamic {
        body.insert(FallingBox);
    } else {
        body.insert(Ground);
    }
    let body = body.id();

    let mut visual = commands.spawn((
        BoxVisual,
        SceneEntity,
        Transform {
            translation: pos.extend(0.0),
            scale: Vec3::new(size.x, size.y, 1.0),
            ..default()
        },
    ));
    if let Some((mesh, material)) = visual_assets {
        visual.insert((mesh, material));
    }
    let visual = visual.id();

    index.insert(body, visual);
    SpawnedBox { body, visual }
}

/// Mesh + randomly colored material for one visual, when asset stores exist.
/// Headless apps (tests) run without them and get bare transform visuals.
fn make_visual_assets(
    commands: &mut Commands,
    quad: Option<Res<QuadMesh>>,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
    mut materials: Option<ResMut<Assets<ColorMaterial>>>,
    rng: &mut StdRng,
) -> Option<(Mesh2d, MeshMaterial2d<ColorMaterial>)> {
    let meshes = meshes.as_mut()?;
    let materials = materials.as_mut()?;
    let handle = if let Some(quad) = quad {
        quad.0.clone()
    } else {
        let handle = meshes.add(Mesh::from(Rectangle::new(1.0, 1.0)));
        commands.insert_resource(QuadMesh(handle.clone()));
        handle
    };
    let color = Color::srgb(
        rng.gen::<f32>() * 0.9 + 0.1,
        rng.gen::<f32>() * 0.9 + 0.1,
        rng.gen::<f32>() * 0.9 + 0.1,
    );
    Some((Mesh2d(handle), MeshMaterial2d(materials.add(color))))
}

fn sample(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if max - min > f32::EPSILON {
        rng.gen_range(min..max)
    } else {
        min
    }
}

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// Fallback pixels-per-meter when no config resource is present (tests).
pub const DEFAULT_WORLD_SCALE: f32 = 30.0;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        // The conversion factor is baked into the Rapier plugin, so every
        // gameplay system works in pixel units while the solver sees meters.
        let scale = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.world.scale)
            .unwrap_or(DEFAULT_WORLD_SCALE);
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(scale))
            .add_systems(Startup, configure_gravity);
    }
}

fn configure_gravity(mut q_cfg: Query<&mut RapierConfiguration>, game_cfg: Res<GameConfig>) {
    // RapierConfiguration lives on the context entity in recent bevy_rapier,
    // so it is queried as a component rather than taken as a resource.
    if let Ok(mut cfg) = q_cfg.single_mut() {
        // Gravity is configured in meters/s^2; Rapier expects it in the same
        // (pixel) units the transforms use.
        cfg.gravity = Vect::new(0.0, game_cfg.gravity.y * game_cfg.world.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_configured_from_config() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut cfg = GameConfig::default();
        cfg.gravity.y = -3.0;
        cfg.world.scale = 30.0;
        app.insert_resource(cfg);
        app.add_plugins(PhysicsSetupPlugin);
        app.update();

        let world = app.world_mut();
        let mut q = world.query::<&RapierConfiguration>();
        let rapier_cfg = q.single(world).expect("rapier context missing");
        assert_eq!(rapier_cfg.gravity, Vect::new(0.0, -90.0));
    }
}

use bevy::prelude::*;
use bevy_rapier2d::plugin::PhysicsSet;

use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::gameplay::session::restart::SceneRestartPlugin;
use crate::gameplay::spawn::spawn::BoxSpawnPlugin;
use crate::gameplay::sync::VisualSyncPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::camera::CameraPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            PostUpdate,
            PostPhysicsAdjustSet.after(PhysicsSet::Writeback),
        )
        .add_plugins((
            CameraPlugin,
            PhysicsSetupPlugin,
            BoxSpawnPlugin,
            VisualSyncPlugin,
            SceneRestartPlugin,
            AutoClosePlugin,
        ));
    }
}

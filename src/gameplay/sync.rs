//! Body -> visual pose mirroring.
//!
//! Every spawned body is paired with a separate display entity through
//! `VisualIndex`. Once per frame, after the physics step has written body
//! poses back into their `Transform`s, the pose is copied onto the paired
//! visual. Entries whose body or visual has been despawned are pruned on the
//! same pass, so the index never holds a dangling pairing.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::components::{BoxBody, BoxVisual};
use crate::core::system::system_order::PostPhysicsAdjustSet;

/// Explicit body -> visual lookup table.
#[derive(Resource, Default, Debug)]
pub struct VisualIndex(pub HashMap<Entity, Entity>);

impl VisualIndex {
    pub fn insert(&mut self, body: Entity, visual: Entity) {
        self.0.insert(body, visual);
    }
    pub fn visual_of(&self, body: Entity) -> Option<Entity> {
        self.0.get(&body).copied()
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct VisualSyncPlugin;

impl Plugin for VisualSyncPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisualIndex>()
            .add_systems(PostUpdate, sync_box_visuals.in_set(PostPhysicsAdjustSet));
    }
}

/// Copy each body's translation (x, y) and rotation onto its paired visual.
/// Scale is left alone; it encodes the box extents.
pub fn sync_box_visuals(
    mut index: ResMut<VisualIndex>,
    bodies: Query<&Transform, (With<BoxBody>, Without<BoxVisual>)>,
    mut visuals: Query<&mut Transform, (With<BoxVisual>, Without<BoxBody>)>,
) {
    index.0.retain(|body, visual| {
        let Ok(body_tf) = bodies.get(*body) else {
            return false;
        };
        let Ok(mut vis_tf) = visuals.get_mut(*visual) else {
            return false;
        };
        vis_tf.translation.x = body_tf.translation.x;
        vis_tf.translation.y = body_tf.translation.y;
        vis_tf.rotation = body_tf.rotation;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_follows_body_pose() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(VisualSyncPlugin);

        let body = app
            .world_mut()
            .spawn((BoxBody, Transform::from_xyz(12.0, -34.0, 0.0)))
            .id();
        let visual = app
            .world_mut()
            .spawn((
                BoxVisual,
                Transform::from_scale(Vec3::new(40.0, 20.0, 1.0)),
            ))
            .id();
        app.world_mut()
            .resource_mut::<VisualIndex>()
            .insert(body, visual);

        app.update();

        let vis_tf = app.world().get::<Transform>(visual).unwrap();
        assert_eq!(vis_tf.translation.x, 12.0);
        assert_eq!(vis_tf.translation.y, -34.0);
        assert_eq!(vis_tf.scale, Vec3::new(40.0, 20.0, 1.0), "scale untouched");

        // Move and rotate the body; the visual tracks it on the next frame.
        let rot = Quat::from_rotation_z(0.7);
        {
            let mut body_tf = app.world_mut().get_mut::<Transform>(body).unwrap();
            body_tf.translation.x = -5.0;
            body_tf.rotation = rot;
        }
        app.update();
        let vis_tf = app.world().get::<Transform>(visual).unwrap();
        assert_eq!(vis_tf.translation.x, -5.0);
        assert_eq!(vis_tf.rotation, rot);
    }

    #[test]
    fn dangling_pairs_are_pruned() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(VisualSyncPlugin);

        let body = app
            .world_mut()
            .spawn((BoxBody, Transform::default()))
            .id();
        let visual = app.world_mut().spawn((BoxVisual, Transform::default())).id();
        app.world_mut()
            .resource_mut::<VisualIndex>()
            .insert(body, visual);

        app.update();
        assert_eq!(app.world().resource::<VisualIndex>().len(), 1);

        app.world_mut().entity_mut(visual).despawn();
        app.update();
        assert!(
            app.world().resource::<VisualIndex>().is_empty(),
            "entry with a dead visual must be removed"
        );
    }
}

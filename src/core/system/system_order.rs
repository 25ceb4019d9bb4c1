use bevy::prelude::*;

// System set labels establishing the per-frame ordering contract.
// PrePhysicsSet runs in Update, before the Rapier step; PostPhysicsAdjustSet
// runs in PostUpdate, after Rapier has written body poses back into
// Transforms, so observers see the stepped world.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub struct PrePhysicsSet;
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub struct PostPhysicsAdjustSet;

use bevy::prelude::*;

/// Marker for every physics-owning entity created by the scene (ground + spawned boxes).
#[derive(Component, Debug)]
pub struct BoxBody;

/// Marker for dynamic boxes dropped by the spawner.
#[derive(Component, Debug)]
pub struct FallingBox;

/// Marker for the single static ground slab.
#[derive(Component, Debug)]
pub struct Ground;

/// Full extents of a box in pixels. Collider half-extents and visual scale derive from this.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct BoxSize(pub Vec2);

/// Marker for display entities paired with a body through `VisualIndex`.
#[derive(Component, Debug)]
pub struct BoxVisual;

/// Marker for everything the scene owns; a restart despawns all of these.
#[derive(Component, Debug)]
pub struct SceneEntity;

/// Deterministic RNG seed resource (insert before startup for reproducible spawning).
#[derive(Resource, Debug, Copy, Clone)]
pub struct RngSeed(pub u64);

pub mod app;
pub mod core;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::core::components::{
    BoxBody, BoxSize, BoxVisual, FallingBox, Ground, RngSeed, SceneEntity,
};
pub use crate::core::config::{GameConfig, WindowConfig};

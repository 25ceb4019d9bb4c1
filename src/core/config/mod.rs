pub mod config;

pub use config::{GameConfig, SpawnRange, WindowConfig};

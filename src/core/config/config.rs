use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            title: "Box Rain".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    /// Vertical acceleration in meters/s^2 (Y-up world, so downward is negative).
    pub y: f32,
}
impl Default for GravityConfig {
    fn default() -> Self {
        Self { y: -3.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Pixels per physics meter.
    pub scale: f32,
}
impl Default for WorldConfig {
    fn default() -> Self {
        Self { scale: 30.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GroundConfig {
    /// Slab thickness in pixels.
    pub thickness: f32,
    /// Distance from the window bottom edge to the slab center, in pixels.
    pub bottom_offset: f32,
}
impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            thickness: 40.0,
            bottom_offset: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seconds between spawns.
    pub interval_secs: f32,
    /// Horizontal keep-out margin from both window edges, in pixels.
    pub margin_x: f32,
    pub width_range: SpawnRange<f32>,
    pub height_range: SpawnRange<f32>,
    /// Spawn height above the window top edge, in pixels.
    pub drop_height: f32,
    pub mass: f32,
    pub angular_inertia: f32,
    /// Number of spawns before the scene restarts.
    pub restart_after: u32,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_secs: 0.5,
            margin_x: 100.0,
            width_range: SpawnRange {
                min: 20.0,
                max: 80.0,
            },
            height_range: SpawnRange {
                min: 20.0,
                max: 80.0,
            },
            drop_height: 100.0,
            mass: 1.0,
            angular_inertia: 1.0,
            restart_after: 100,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub gravity: GravityConfig,
    pub ground: GroundConfig,
    pub spawn: SpawnConfig,
    pub rapier_debug: bool,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            world: Default::default(),
            gravity: Default::default(),
            ground: Default::default(),
            spawn: Default::default(),
            rapier_debug: false,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Merge an ordered list of RON files; later files override earlier keys.
    /// Returns the merged config, the list of files actually used, and any
    /// per-file errors (missing overlays are reported, not fatal).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        let mut replaced = false;
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                let val = incoming.take().unwrap();
                                merge_value(ev, val);
                                replaced = true;
                                break;
                            }
                        }
                        if !replaced {
                            bm.insert(k, incoming.unwrap());
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        if let Some(val) = merged {
            match val.clone().into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => (GameConfig::default(), used, {
                    let mut evec = errors;
                    evec.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    evec
                }),
            }
        } else {
            (GameConfig::default(), used, errors)
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.world.scale <= 0.0 {
            w.push(format!(
                "world.scale {} must be > 0 (pixels per meter)",
                self.world.scale
            ));
        }
        if self.gravity.y.abs() < 1e-4 {
            w.push("gravity.y magnitude near zero; boxes will not fall".into());
        }
        if self.gravity.y > 0.0 {
            w.push(format!(
                "gravity.y is positive ({}); Y-up world, typical configs use negative for downward",
                self.gravity.y
            ));
        }
        if self.ground.thickness <= 0.0 {
            w.push("ground.thickness must be > 0".into());
        }
        if self.spawn.interval_secs < 0.0 {
            w.push("spawn.interval_secs negative".into());
        }
        if self.spawn.restart_after == 0 {
            w.push("spawn.restart_after is 0; scene restarts on the first spawn".into());
        }
        if self.spawn.mass <= 0.0 {
            w.push("spawn.mass must be > 0".into());
        }
        fn check_range_f32(w: &mut Vec<String>, label: &str, r: &SpawnRange<f32>) {
            if r.min > r.max {
                w.push(format!(
                    "{label} min ({}) greater than max ({})",
                    r.min, r.max
                ));
            }
            if r.min <= 0.0 {
                w.push(format!("{label} min must be > 0"));
            }
        }
        check_range_f32(&mut w, "spawn.width_range", &self.spawn.width_range);
        check_range_f32(&mut w, "spawn.height_range", &self.spawn.height_range);
        if self.spawn.margin_x * 2.0 >= self.window.width {
            w.push(format!(
                "spawn.margin_x {} leaves no horizontal spawn span in a {}px window",
                self.spawn.margin_x, self.window.width
            ));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scene_constants() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.window.width, 600.0);
        assert_eq!(cfg.window.height, 600.0);
        assert_eq!(cfg.world.scale, 30.0);
        assert_eq!(cfg.spawn.restart_after, 100);
        assert_eq!(cfg.spawn.interval_secs, 0.5);
        assert_eq!(cfg.spawn.width_range.min, 20.0);
        assert_eq!(cfg.spawn.width_range.max, 80.0);
    }

    #[test]
    fn defaults_produce_no_warnings() {
        assert!(GameConfig::default().validate().is_empty());
    }

    #[test]
    fn partial_ron_overlays_defaults() {
        let cfg: GameConfig = ron::from_str("(spawn: (restart_after: 10))").unwrap();
        assert_eq!(cfg.spawn.restart_after, 10);
        assert_eq!(cfg.window.width, 600.0, "untouched fields keep defaults");
    }

    #[test]
    fn validate_flags_bad_ranges() {
        let mut cfg = GameConfig::default();
        cfg.spawn.width_range.min = 90.0;
        cfg.spawn.width_range.max = 20.0;
        cfg.world.scale = 0.0;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("width_range")));
        assert!(warnings.iter().any(|w| w.contains("world.scale")));
    }
}

use bevy::prelude::*;
use bevy_rapier2d::render::RapierDebugRenderPlugin;

use box_rain::{GameConfig, GamePlugin};

/// What config loading found; logged once the app (and its logger) is up.
#[derive(Resource, Debug)]
struct ConfigLoadReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn main() {
    let (cfg, used, errors) =
        GameConfig::load_layered(["assets/config/game.ron", "assets/config/game.local.ron"]);
    let report = ConfigLoadReport {
        used,
        errors,
        warnings: cfg.validate(),
    };

    let mut app = App::new();
    app.insert_resource(report);
    app.insert_resource(cfg.clone());
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.window.title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }));
    app.add_plugins(GamePlugin);
    if cfg.rapier_debug {
        app.add_plugins(RapierDebugRenderPlugin::default());
    }
    app.add_systems(Startup, log_config_report);
    app.run();
}

fn log_config_report(report: Res<ConfigLoadReport>) {
    for path in &report.used {
        info!(target: "config", "loaded {path}");
    }
    for err in &report.errors {
        warn!(target: "config", "{err}");
    }
    for warning in &report.warnings {
        warn!(target: "config", "{warning}");
    }
}

//! Token Health Aura
//!
//! Health-driven aura lighting for board tokens. Runs a sandbox board by
//! default, or a scripted headless scenario with `--headless`.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod aura;
mod board;
mod cli;
mod headless;
mod keybindings;
mod settings;
mod ui;

use aura::{ActiveGameSystem, AuraPlugin, GameSystem};
use board::BoardPlugin;
use headless::{run_headless_scenario, ScenarioConfig};
use settings::{AuraSettings, SettingsPath, SettingsPlugin};
use ui::UiPlugin;

fn main() {
    let args = cli::parse_args();

    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| SettingsPath::default().0);

    if let Some(scenario_path) = args.headless {
        let scenario = match ScenarioConfig::load_from_file(&scenario_path) {
            Ok(scenario) => scenario,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        };
        let settings = AuraSettings::load(&settings_path);

        match run_headless_scenario(&scenario, settings) {
            Ok(report) => {
                let json = serde_json::to_string_pretty(&report)
                    .expect("scenario report serializes");
                match args.output {
                    Some(path) => {
                        if let Err(e) = std::fs::write(&path, json) {
                            eprintln!("Failed to write report to {:?}: {}", path, e);
                            std::process::exit(1);
                        }
                    }
                    None => println!("{json}"),
                }
            }
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    App::new()
        // Bevy default plugins with custom window settings
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Token Health Aura".to_string(),
                resolution: (1280.0, 720.0).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ActiveGameSystem(GameSystem::from_id(&args.system)))
        // Our plugins
        .add_plugins((
            EguiPlugin,
            SettingsPlugin {
                path: settings_path,
            },
            AuraPlugin,
            BoardPlugin {
                tokens: args.tokens,
            },
            UiPlugin,
        ))
        .run();
}

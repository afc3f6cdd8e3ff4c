//! UI System
//!
//! Handles the module's user-facing panels:
//! - Aura settings window (all tunables, editable threshold list)
//! - Per-token config panel (disable checkbox, health readout)

use bevy::prelude::*;

pub mod settings_window;
pub mod token_config;

use settings_window::{draw_settings_window, toggle_settings_window, SettingsWindowState};
use token_config::draw_token_config;

/// Plugin for UI management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SettingsWindowState>().add_systems(
            Update,
            (toggle_settings_window, draw_settings_window, draw_token_config).chain(),
        );
    }
}

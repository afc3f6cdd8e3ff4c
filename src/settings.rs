//! Aura settings and configuration
//!
//! Manages the user-tunable aura parameters and their persistence. The
//! settings resource is the snapshot the mapper reads per refresh; any
//! change to it triggers a full board rescan (see the aura trigger layer).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::aura::{RgbColor, Threshold};
use crate::keybindings::Keybindings;

/// Which light radii the aura drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuraType {
    Dim,
    Bright,
    Both,
}

impl AuraType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuraType::Dim => "Dim Light Aura",
            AuraType::Bright => "Bright Light Aura",
            AuraType::Both => "Both Dim & Bright",
        }
    }

    pub fn all() -> [AuraType; 3] {
        [AuraType::Dim, AuraType::Bright, AuraType::Both]
    }
}

/// How the aura animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationStyle {
    /// No animation
    None,
    /// Fixed pulse regardless of health
    Pulse,
    /// Torch flicker at the configured intensity
    Flicker,
    /// Animation escalates as health falls
    Dynamic,
}

impl AnimationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationStyle::None => "None",
            AnimationStyle::Pulse => "Pulse",
            AnimationStyle::Flicker => "Flicker",
            AnimationStyle::Dynamic => "Dynamic",
        }
    }

    pub fn all() -> [AnimationStyle; 4] {
        [
            AnimationStyle::None,
            AnimationStyle::Pulse,
            AnimationStyle::Flicker,
            AnimationStyle::Dynamic,
        ]
    }
}

/// User-configurable aura settings
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct AuraSettings {
    pub aura_type: AuraType,
    /// Gradient stops, kept sorted descending by the settings form
    pub thresholds: Vec<Threshold>,
    /// Aura opacity, 0.1-0.3
    pub aura_alpha: f32,
    /// Dim light radius in grid units, 0-3
    pub aura_dim: f32,
    /// Bright light radius in grid units, 0-2
    pub aura_bright: f32,
    /// Global animation kill switch
    pub enable_pulse: bool,
    pub animation_style: AnimationStyle,
    /// Scale opacity up as health falls instead of keeping it flat
    pub dynamic_opacity: bool,
    /// Torch flicker strength for the Flicker style, 1-5
    pub flicker_intensity: u8,
    /// Suppress auras everywhere (the toggle-all hotkey flips this)
    pub disable_all: bool,
    pub keybindings: Keybindings,
}

impl Default for AuraSettings {
    fn default() -> Self {
        Self {
            aura_type: AuraType::Dim,
            thresholds: vec![
                Threshold::new(50.0, RgbColor::new(255, 255, 0)),
                Threshold::new(25.0, RgbColor::new(255, 0, 0)),
            ],
            aura_alpha: 0.1,
            aura_dim: 1.0,
            aura_bright: 0.0,
            enable_pulse: true,
            animation_style: AnimationStyle::Dynamic,
            dynamic_opacity: false,
            flicker_intensity: 3,
            disable_all: false,
            keybindings: Keybindings::default(),
        }
    }
}

impl AuraSettings {
    /// Load settings from file, or return defaults if the file doesn't
    /// exist or fails to parse.
    pub fn load(path: &PathBuf) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match ron::from_str::<AuraSettings>(&contents) {
                    Ok(settings) => {
                        info!("Loaded aura settings from {:?}", path);
                        settings.sanitized()
                    }
                    Err(e) => {
                        warn!("Failed to parse settings file: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    warn!("Failed to read settings file: {}", e);
                    Self::default()
                }
            }
        } else {
            info!("No settings file found, using defaults");
            Self::default()
        }
    }

    /// Save settings to file
    pub fn save(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, contents)?;
        info!("Saved aura settings to {:?}", path);
        Ok(())
    }

    /// Clamp every tunable into its documented range and restore the
    /// default stops if a hand-edited file emptied the threshold list.
    pub fn sanitized(mut self) -> Self {
        self.aura_alpha = self.aura_alpha.clamp(0.1, 0.3);
        self.aura_dim = self.aura_dim.clamp(0.0, 3.0);
        self.aura_bright = self.aura_bright.clamp(0.0, 2.0);
        self.flicker_intensity = self.flicker_intensity.clamp(1, 5);
        for threshold in &mut self.thresholds {
            threshold.cutoff = threshold.cutoff.clamp(0.0, 100.0);
        }
        if self.thresholds.is_empty() {
            self.thresholds = Self::default().thresholds;
        }
        self
    }
}

/// Where the settings file lives; set from the command line.
#[derive(Resource, Clone)]
pub struct SettingsPath(pub PathBuf);

impl Default for SettingsPath {
    fn default() -> Self {
        // Next to the executable for now; a released build would use
        // directories::ProjectDirs for proper per-platform placement.
        Self(PathBuf::from("aura-settings.ron"))
    }
}

/// Plugin for managing aura settings
pub struct SettingsPlugin {
    pub path: PathBuf,
}

impl Default for SettingsPlugin {
    fn default() -> Self {
        Self {
            path: SettingsPath::default().0,
        }
    }
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = AuraSettings::load(&self.path);

        // Keybindings mirrored as their own resource for easy access
        let keybindings = settings.keybindings.clone();

        app.insert_resource(SettingsPath(self.path.clone()))
            .insert_resource(settings)
            .insert_resource(keybindings)
            .add_systems(Update, (save_settings_on_change, sync_keybindings));
    }
}

/// System to save settings when they change
fn save_settings_on_change(settings: Res<AuraSettings>, path: Res<SettingsPath>) {
    if settings.is_changed() && !settings.is_added() {
        if let Err(e) = settings.save(&path.0) {
            error!("Failed to save settings: {}", e);
        }
    }
}

/// System to keep the Keybindings resource in sync with AuraSettings
fn sync_keybindings(settings: Res<AuraSettings>, mut keybindings: ResMut<Keybindings>) {
    if settings.is_changed() && !settings.is_added() {
        *keybindings = settings.keybindings.clone();
    }
}

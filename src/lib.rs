//! Token Health Aura
//!
//! A visual indicator attached to each board token whose light radius,
//! color, opacity, and animation are derived from the controlling
//! character's current health fraction.
//!
//! This library exposes the core modules for testing and reuse.

pub mod aura;
pub mod board;
pub mod cli;
pub mod headless;
pub mod keybindings;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use aura::{
    compute_descriptor, health_percentage, resolve_color, AuraPlugin, GameSystem,
    LightDescriptor, RgbColor, Threshold,
};
pub use headless::{run_headless_scenario, ScenarioConfig};
pub use settings::{AuraSettings, SettingsPlugin};

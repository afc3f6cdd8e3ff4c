//! Health aura pipeline
//!
//! Maps each token's health percentage onto a light descriptor and keeps
//! the token's light field in sync as health, settings, and flags change:
//! - pure mapping core (color gradient, animation tiers, radii/opacity)
//! - health resolution out of opaque character sheets
//! - reactive triggers with a per-token debounce queue

use bevy::prelude::*;

pub mod color;
pub mod components;
pub mod events;
pub mod health;
pub mod mapper;
pub mod systems;

pub use color::RgbColor;
pub use components::{
    ActiveGameSystem, AuraDisabled, AuraWriteOrigin, BoardToken, Character, CharacterSheet,
    RefreshQueue, SessionAuthority, TokenLight, TokenOf, REFRESH_DEBOUNCE,
};
pub use events::{AuraApplied, RescanAuras};
pub use health::{health_percentage, resolve_health, GameSystem, HealthSample};
pub use mapper::{
    compute_descriptor, resolve_color, select_animation, sorted_thresholds, AnimationKind,
    LightAnimation, LightDescriptor, Threshold,
};

use systems::*;

/// Plugin wiring the aura pipeline into an app. Headless-safe: needs no
/// window, input, or rendering, only a `Time` source.
pub struct AuraPlugin;

impl Plugin for AuraPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RescanAuras>()
            .add_event::<AuraApplied>()
            .init_resource::<RefreshQueue>()
            .init_resource::<AuraWriteOrigin>()
            .init_resource::<SessionAuthority>()
            .init_resource::<ActiveGameSystem>()
            .init_resource::<crate::settings::AuraSettings>()
            .add_systems(
                Update,
                (
                    watch_new_tokens,
                    watch_sheet_changes,
                    watch_token_light_changes,
                    watch_settings_changes,
                    handle_rescan,
                    drain_refresh_queue,
                )
                    .chain(),
            );
    }
}

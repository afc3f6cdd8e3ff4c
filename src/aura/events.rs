//! Aura events
//!
//! Events crossing the aura pipeline's boundary.

use bevy::prelude::*;

use super::mapper::LightDescriptor;

/// Request a refresh of every token on the board. Fired when settings
/// change, when the disable-all toggle flips, and by anything else that
/// invalidates all auras at once.
#[derive(Event)]
pub struct RescanAuras;

/// Fired after a descriptor has been applied to a token's light field.
/// Suppression emits this too (with the clearing descriptor); an
/// unavailable health lookup does not.
#[derive(Event)]
pub struct AuraApplied {
    pub token: Entity,
    pub descriptor: LightDescriptor,
}

//! Aura systems
//!
//! The reactive shell around the mapper: trigger watchers feed the per-token
//! debounce queue, and the drain system runs the orchestration state machine
//! for each token whose window has elapsed.

use bevy::prelude::*;

use super::components::*;
use super::events::*;
use super::health::resolve_health;
use super::mapper::{compute_descriptor, LightDescriptor};
use crate::settings::AuraSettings;

/// Freshly placed tokens get an initial refresh.
pub fn watch_new_tokens(
    new_tokens: Query<Entity, Added<BoardToken>>,
    mut queue: ResMut<RefreshQueue>,
) {
    for token in new_tokens.iter() {
        queue.schedule(token);
    }
}

/// A sheet change fans out to every token representing that character.
pub fn watch_sheet_changes(
    changed: Query<Entity, Changed<CharacterSheet>>,
    tokens: Query<(Entity, &TokenOf)>,
    mut queue: ResMut<RefreshQueue>,
) {
    for character in changed.iter() {
        for (token, token_of) in tokens.iter() {
            if token_of.0 == character {
                queue.schedule(token);
            }
        }
    }
}

/// Token light writes from outside this module re-queue the token so the
/// aura reasserts itself. Writes the orchestrator made are filtered through
/// the origin set instead of looping back in.
pub fn watch_token_light_changes(
    changed: Query<Entity, (Changed<TokenLight>, With<BoardToken>)>,
    mut origin: ResMut<AuraWriteOrigin>,
    mut queue: ResMut<RefreshQueue>,
) {
    for token in changed.iter() {
        if origin.0.remove(&token) {
            continue;
        }
        queue.schedule(token);
    }
}

/// Any settings change invalidates every aura on the board.
pub fn watch_settings_changes(
    settings: Res<AuraSettings>,
    mut rescan: EventWriter<RescanAuras>,
) {
    if settings.is_changed() && !settings.is_added() {
        rescan.send(RescanAuras);
    }
}

/// Turn rescan requests into one scheduled refresh per token.
pub fn handle_rescan(
    mut rescans: EventReader<RescanAuras>,
    tokens: Query<Entity, With<BoardToken>>,
    mut queue: ResMut<RefreshQueue>,
) {
    if rescans.read().next().is_none() {
        return;
    }
    rescans.clear();
    for token in tokens.iter() {
        queue.schedule(token);
    }
}

/// Run the orchestration state machine for every token whose debounce
/// window has elapsed.
///
/// Per token: disable flags win first and actively clear the light; an
/// unavailable health lookup skips the token without touching it; otherwise
/// the mapper's descriptor is applied. Only a controller session ever
/// writes - observers drop the apply outright.
pub fn drain_refresh_queue(
    time: Res<Time>,
    mut queue: ResMut<RefreshQueue>,
    settings: Res<AuraSettings>,
    system: Res<ActiveGameSystem>,
    authority: Res<SessionAuthority>,
    mut origin: ResMut<AuraWriteOrigin>,
    mut tokens: Query<(&TokenOf, Option<&AuraDisabled>, &mut TokenLight), With<BoardToken>>,
    sheets: Query<&CharacterSheet>,
    mut applied: EventWriter<AuraApplied>,
) {
    if queue.is_empty() {
        return;
    }

    for token in queue.tick(time.delta()) {
        let Ok((token_of, disabled, mut light)) = tokens.get_mut(token) else {
            // Token despawned while its refresh was pending; the next
            // trigger self-corrects whatever replaced it.
            warn!("aura refresh dropped, token {token:?} no longer exists");
            continue;
        };

        let suppressed = disabled.is_some() || settings.disable_all;
        let descriptor = if suppressed {
            LightDescriptor::no_aura()
        } else {
            let Ok(sheet) = sheets.get(token_of.0) else {
                continue;
            };
            let Some(sample) = resolve_health(&system.0, &sheet.0) else {
                // Unavailable: leave the prior light untouched
                continue;
            };
            compute_descriptor(sample.percentage(), &settings)
        };

        if !authority.is_controller {
            // Shared token state belongs to the controller session
            continue;
        }

        origin.0.insert(token);
        light.0 = descriptor;
        applied.send(AuraApplied { token, descriptor });
    }
}

//! Aura components and resources
//!
//! ECS state for the aura pipeline: the token-side components the
//! orchestrator reads and writes, the session-level resources that gate it,
//! and the per-token debounce queue.

use bevy::prelude::*;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::health::GameSystem;
use super::mapper::LightDescriptor;

/// How long a token's refresh is held back so bursts of field updates
/// collapse into one recompute.
pub const REFRESH_DEBOUNCE: Duration = Duration::from_millis(100);

/// A character on the roster. Tokens point at one of these.
#[derive(Component)]
pub struct Character {
    pub name: String,
}

/// The character's opaque system data, in the host game system's shape.
/// Health is resolved out of this per refresh, never cached.
#[derive(Component)]
pub struct CharacterSheet(pub Value);

/// A token placed on the board.
#[derive(Component)]
pub struct BoardToken {
    pub label: String,
}

/// Which character this token represents. Several tokens may point at the
/// same character; a health change fans out to all of them.
#[derive(Component)]
pub struct TokenOf(pub Entity);

/// The token's applied light field. Written only by the orchestrator (or by
/// outside code, which the trigger layer detects and reacts to).
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct TokenLight(pub LightDescriptor);

/// Per-token override: suppress the aura for this token regardless of
/// health. Toggled from the token config panel.
#[derive(Component)]
pub struct AuraDisabled;

/// Game system the active scene runs under; decides the sheet schema.
#[derive(Resource)]
pub struct ActiveGameSystem(pub GameSystem);

impl Default for ActiveGameSystem {
    fn default() -> Self {
        Self(GameSystem::Dnd5e)
    }
}

/// Whether this session is the authoritative controller of shared token
/// state. Non-controllers compute nothing less but never apply.
#[derive(Resource)]
pub struct SessionAuthority {
    pub is_controller: bool,
}

impl Default for SessionAuthority {
    fn default() -> Self {
        Self { is_controller: true }
    }
}

/// Tokens whose next light change was written by the orchestrator itself.
/// The light-change watcher drops entries found here instead of re-queueing
/// them, which is the re-entrancy guard against reacting to our own writes.
#[derive(Resource, Default)]
pub struct AuraWriteOrigin(pub HashSet<Entity>);

/// Pending refreshes, one timer per token. Re-scheduling a token replaces
/// its timer, so the last trigger within the debounce window wins.
#[derive(Resource, Default)]
pub struct RefreshQueue {
    pending: HashMap<Entity, Timer>,
}

impl RefreshQueue {
    pub fn schedule(&mut self, token: Entity) {
        self.pending
            .insert(token, Timer::new(REFRESH_DEBOUNCE, TimerMode::Once));
    }

    /// Advance all pending timers and drain the tokens whose debounce
    /// window has elapsed.
    pub fn tick(&mut self, delta: Duration) -> Vec<Entity> {
        let mut due = Vec::new();
        for (token, timer) in self.pending.iter_mut() {
            if timer.tick(delta).finished() {
                due.push(*token);
            }
        }
        for token in &due {
            self.pending.remove(token);
        }
        due
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

//! Health resolution
//!
//! Character sheets arrive as opaque JSON mirroring the host game system's
//! actor data. The two first-party systems share a schema
//! (`attributes.hp.{value,max}`); anything else gets a generic probe over
//! the two field shapes seen in the wild. A sheet that yields no usable
//! pair is "unavailable" and the caller skips the token silently - lookup
//! never errors across this boundary.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of the game system the active scene runs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSystem {
    Dnd5e,
    Pf2e,
    Other(String),
}

impl GameSystem {
    pub fn from_id(id: &str) -> Self {
        match id {
            "dnd5e" => GameSystem::Dnd5e,
            "pf2e" => GameSystem::Pf2e,
            other => GameSystem::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            GameSystem::Dnd5e => "dnd5e",
            GameSystem::Pf2e => "pf2e",
            GameSystem::Other(id) => id,
        }
    }
}

/// A character's health at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthSample {
    pub current: f32,
    pub max: f32,
}

impl HealthSample {
    pub fn percentage(&self) -> f32 {
        100.0 * self.current / self.max
    }
}

/// Read current/max health out of an hp object, requiring both fields to be
/// numeric and max to be positive.
fn hp_pair(hp: &Value) -> Option<HealthSample> {
    let current = hp.get("value")?.as_f64()? as f32;
    let max = hp.get("max")?.as_f64()? as f32;
    if max <= 0.0 {
        return None;
    }
    Some(HealthSample { current, max })
}

/// Resolve a health sample from a character sheet, or `None` when the sheet
/// carries no usable health data.
pub fn resolve_health(system: &GameSystem, sheet: &Value) -> Option<HealthSample> {
    match system {
        GameSystem::Dnd5e | GameSystem::Pf2e => {
            sheet.get("attributes").and_then(|a| a.get("hp")).and_then(hp_pair)
        }
        GameSystem::Other(id) => {
            warn!("system '{id}' not explicitly supported, attempting generic hp detection");
            sheet
                .get("attributes")
                .and_then(|a| a.get("hp"))
                .or_else(|| sheet.get("hp"))
                .and_then(hp_pair)
        }
    }
}

/// Health percentage for a sheet, the module's one independent variable.
pub fn health_percentage(system: &GameSystem, sheet: &Value) -> Option<f32> {
    resolve_health(system, sheet).map(|sample| sample.percentage())
}

/// Build a sheet in the shape `resolve_health` reads for `system`. Used by
/// the sandbox board and headless scenarios to fabricate characters.
pub fn make_sheet(system: &GameSystem, current: f64, max: f64) -> Value {
    match system {
        GameSystem::Dnd5e | GameSystem::Pf2e => serde_json::json!({
            "attributes": { "hp": { "value": current, "max": max } }
        }),
        GameSystem::Other(_) => serde_json::json!({
            "hp": { "value": current, "max": max }
        }),
    }
}

/// Overwrite the current-hp field in place, probing the same shapes the
/// resolver reads. Returns false when the sheet has no hp object to write.
pub fn write_current_hp(sheet: &mut Value, current: f64) -> bool {
    let hp = match sheet.get_mut("attributes").and_then(|a| a.get_mut("hp")) {
        Some(hp) => Some(hp),
        None => sheet.get_mut("hp"),
    };
    match hp.and_then(|h| h.as_object_mut()) {
        Some(obj) => {
            obj.insert("value".to_string(), serde_json::json!(current));
            true
        }
        None => false,
    }
}

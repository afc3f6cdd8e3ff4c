//! Keybinding system for remappable controls
//!
//! One global hotkey toggles all auras off; the rest drive the sandbox
//! board. Bindings persist inside the settings file.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraAction {
    /// Flip the disable-all flag and rescan every token
    ToggleAllAuras,
    /// Open/close the aura settings window
    OpenSettings,

    // Sandbox board
    CycleToken,
    DamageSelected,
    HealSelected,
}

impl AuraAction {
    pub fn description(&self) -> &'static str {
        match self {
            AuraAction::ToggleAllAuras => "Toggle All Auras",
            AuraAction::OpenSettings => "Aura Settings",
            AuraAction::CycleToken => "Select Next Token",
            AuraAction::DamageSelected => "Damage Selected",
            AuraAction::HealSelected => "Heal Selected",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            AuraAction::ToggleAllAuras | AuraAction::OpenSettings => "Auras",
            AuraAction::CycleToken | AuraAction::DamageSelected | AuraAction::HealSelected => {
                "Board"
            }
        }
    }

    pub fn all() -> Vec<AuraAction> {
        vec![
            AuraAction::ToggleAllAuras,
            AuraAction::OpenSettings,
            AuraAction::CycleToken,
            AuraAction::DamageSelected,
            AuraAction::HealSelected,
        ]
    }
}

/// Serializable wrapper for KeyCode (stores as string)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SerializableKeyCode(String);

impl From<KeyCode> for SerializableKeyCode {
    fn from(key: KeyCode) -> Self {
        Self(format!("{:?}", key))
    }
}

impl From<SerializableKeyCode> for KeyCode {
    fn from(sk: SerializableKeyCode) -> Self {
        match sk.0.as_str() {
            "Escape" => KeyCode::Escape,
            "Enter" => KeyCode::Enter,
            "Space" => KeyCode::Space,
            "Tab" => KeyCode::Tab,
            "KeyA" => KeyCode::KeyA,
            "KeyD" => KeyCode::KeyD,
            "KeyH" => KeyCode::KeyH,
            "KeyJ" => KeyCode::KeyJ,
            "KeyK" => KeyCode::KeyK,
            "KeyO" => KeyCode::KeyO,
            "KeyS" => KeyCode::KeyS,
            "KeyT" => KeyCode::KeyT,
            "Digit1" => KeyCode::Digit1,
            "Digit2" => KeyCode::Digit2,
            "Digit3" => KeyCode::Digit3,
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            _ => KeyCode::Escape, // Default fallback
        }
    }
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBinding {
    #[serde(with = "keycode_serde")]
    pub primary: KeyCode,
    #[serde(with = "option_keycode_serde")]
    pub secondary: Option<KeyCode>,
}

mod keycode_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sk: SerializableKeyCode = (*key).into();
        sk.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sk = SerializableKeyCode::deserialize(deserializer)?;
        Ok(sk.into())
    }
}

mod option_keycode_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(key: &Option<KeyCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key {
            Some(k) => {
                let sk: SerializableKeyCode = (*k).into();
                serializer.serialize_some(&sk)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<KeyCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt_sk: Option<SerializableKeyCode> = Option::deserialize(deserializer)?;
        Ok(opt_sk.map(|sk| sk.into()))
    }
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Keybindings {
    bindings: HashMap<AuraAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    /// Create default keybindings
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(
            AuraAction::ToggleAllAuras,
            KeyBinding::with_secondary(KeyCode::KeyH, KeyCode::F2),
        );
        bindings.insert(AuraAction::OpenSettings, KeyBinding::new(KeyCode::KeyO));

        bindings.insert(AuraAction::CycleToken, KeyBinding::new(KeyCode::Tab));
        bindings.insert(AuraAction::DamageSelected, KeyBinding::new(KeyCode::KeyJ));
        bindings.insert(AuraAction::HealSelected, KeyBinding::new(KeyCode::KeyK));

        Self { bindings }
    }

    /// Get the binding for an action
    pub fn get(&self, action: AuraAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Set a new binding for an action
    pub fn set(&mut self, action: AuraAction, binding: KeyBinding) {
        self.bindings.insert(action, binding);
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: AuraAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        if let Some(binding) = self.get(action) {
            keyboard.just_pressed(binding.primary)
                || binding
                    .secondary
                    .map_or(false, |key| keyboard.just_pressed(key))
        } else {
            false
        }
    }

    /// Check if a key is already bound to any action (for conflict detection)
    pub fn is_key_bound(&self, key: KeyCode, exclude_action: Option<AuraAction>) -> Option<AuraAction> {
        self.bindings
            .iter()
            .find(|(action, binding)| {
                if let Some(excluded) = exclude_action {
                    if **action == excluded {
                        return false;
                    }
                }
                binding.matches(key)
            })
            .map(|(action, _)| *action)
    }

    /// Get a human-readable string for a key
    pub fn key_name(key: KeyCode) -> &'static str {
        match key {
            KeyCode::Escape => "ESC",
            KeyCode::Enter => "ENTER",
            KeyCode::Space => "SPACE",
            KeyCode::Tab => "TAB",
            KeyCode::KeyA => "A",
            KeyCode::KeyD => "D",
            KeyCode::KeyH => "H",
            KeyCode::KeyJ => "J",
            KeyCode::KeyK => "K",
            KeyCode::KeyO => "O",
            KeyCode::KeyS => "S",
            KeyCode::KeyT => "T",
            KeyCode::Digit1 => "1",
            KeyCode::Digit2 => "2",
            KeyCode::Digit3 => "3",
            KeyCode::F1 => "F1",
            KeyCode::F2 => "F2",
            KeyCode::ArrowUp => "↑",
            KeyCode::ArrowDown => "↓",
            KeyCode::ArrowLeft => "←",
            KeyCode::ArrowRight => "→",
            _ => "???",
        }
    }

    /// Get display string for a binding
    pub fn binding_display(&self, action: AuraAction) -> String {
        if let Some(binding) = self.get(action) {
            let primary = Self::key_name(binding.primary);
            if let Some(secondary) = binding.secondary {
                format!("{} / {}", primary, Self::key_name(secondary))
            } else {
                primary.to_string()
            }
        } else {
            "Unbound".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_action() {
        let bindings = Keybindings::default();
        for action in AuraAction::all() {
            assert!(bindings.get(action).is_some(), "{:?} unbound", action);
        }
    }

    #[test]
    fn test_secondary_key_matches() {
        let bindings = Keybindings::default();
        let toggle = bindings.get(AuraAction::ToggleAllAuras).unwrap();
        assert!(toggle.matches(KeyCode::KeyH));
        assert!(toggle.matches(KeyCode::F2));
        assert!(!toggle.matches(KeyCode::KeyJ));
    }

    #[test]
    fn test_conflict_detection() {
        let bindings = Keybindings::default();
        assert_eq!(
            bindings.is_key_bound(KeyCode::Tab, None),
            Some(AuraAction::CycleToken)
        );
        assert_eq!(
            bindings.is_key_bound(KeyCode::Tab, Some(AuraAction::CycleToken)),
            None
        );
    }

    #[test]
    fn test_keycode_serde_round_trip() {
        let sk: SerializableKeyCode = KeyCode::KeyH.into();
        let back: KeyCode = sk.into();
        assert_eq!(back, KeyCode::KeyH);
    }
}

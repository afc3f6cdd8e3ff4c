//! JSON scenario parsing for headless mode

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One character in a headless scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioCharacter {
    /// Display name, also used to label the character's tokens
    pub name: String,
    /// Maximum hp; the character starts at full health
    pub max_hp: f64,
    /// How many tokens represent this character (default: 1)
    #[serde(default = "default_tokens")]
    pub tokens: usize,
    /// Set the per-token disable flag on this character's tokens
    #[serde(default)]
    pub disable_aura: bool,
    /// Current-hp values to step through, in order
    #[serde(default)]
    pub health_steps: Vec<f64>,
}

fn default_tokens() -> usize {
    1
}

/// Headless scenario loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Game system id ("dnd5e", "pf2e", or anything for the generic probe)
    #[serde(default = "default_system")]
    pub system: String,
    pub characters: Vec<ScenarioCharacter>,
}

fn default_system() -> String {
    "dnd5e".to_string()
}

impl ScenarioConfig {
    /// Load a scenario from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario file {:?}: {}", path, e))?;
        let config: ScenarioConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse scenario file {:?}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.characters.is_empty() {
            return Err("Scenario must declare at least one character".to_string());
        }
        for character in &self.characters {
            if character.max_hp <= 0.0 {
                return Err(format!("Character '{}' needs a positive max_hp", character.name));
            }
            if character.tokens == 0 {
                return Err(format!("Character '{}' needs at least one token", character.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_scenario() {
        let json = r#"{ "characters": [ { "name": "Goblin", "max_hp": 20 } ] }"#;
        let config: ScenarioConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.system, "dnd5e");
        assert_eq!(config.characters[0].tokens, 1);
        assert!(!config.characters[0].disable_aura);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_scenarios() {
        let empty = ScenarioConfig {
            system: "dnd5e".to_string(),
            characters: vec![],
        };
        assert!(empty.validate().is_err());

        let zero_hp = ScenarioConfig {
            system: "dnd5e".to_string(),
            characters: vec![ScenarioCharacter {
                name: "Ghost".to_string(),
                max_hp: 0.0,
                tokens: 1,
                disable_aura: false,
                health_steps: vec![],
            }],
        };
        assert!(zero_hp.validate().is_err());
    }
}

//! Headless scenario execution
//!
//! Runs the aura pipeline under `MinimalPlugins`, with no window or
//! renderer, stepping each character through its scripted health values and
//! letting the debounce window elapse between steps.

use bevy::prelude::*;
use serde::Serialize;
use std::time::Duration;

use crate::aura::{
    health, ActiveGameSystem, AuraDisabled, AuraPlugin, BoardToken, Character, CharacterSheet,
    GameSystem, LightDescriptor, TokenLight, TokenOf,
};
use crate::settings::AuraSettings;

use super::config::ScenarioConfig;

/// Final light state of one token after the scenario played out.
#[derive(Debug, Clone, Serialize)]
pub struct TokenReport {
    pub label: String,
    pub character: String,
    pub light: LightDescriptor,
}

/// Result of a completed headless scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub system: String,
    pub tokens: Vec<TokenReport>,
}

/// Run a scenario to completion and report every token's light state.
pub fn run_headless_scenario(
    config: &ScenarioConfig,
    settings: AuraSettings,
) -> Result<ScenarioReport, String> {
    config.validate()?;
    let system = GameSystem::from_id(&config.system);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(settings)
        .insert_resource(ActiveGameSystem(system.clone()))
        .add_plugins(AuraPlugin);

    // Spawn the roster: each character at full health, with its tokens
    let mut character_entities = Vec::new();
    let mut spawned_tokens = Vec::new();
    for character in &config.characters {
        let sheet = health::make_sheet(&system, character.max_hp, character.max_hp);
        let entity = app
            .world_mut()
            .spawn((
                Character {
                    name: character.name.clone(),
                },
                CharacterSheet(sheet),
            ))
            .id();
        character_entities.push(entity);

        for index in 0..character.tokens {
            let label = if character.tokens == 1 {
                character.name.clone()
            } else {
                format!("{} #{}", character.name, index + 1)
            };
            let mut token = app.world_mut().spawn((
                BoardToken {
                    label: label.clone(),
                },
                TokenOf(entity),
                TokenLight::default(),
            ));
            if character.disable_aura {
                token.insert(AuraDisabled);
            }
            let id = token.id();
            spawned_tokens.push((id, label, character.name.clone()));
        }
    }

    // Initial auras at full health
    settle(&mut app);

    let step_count = config
        .characters
        .iter()
        .map(|c| c.health_steps.len())
        .max()
        .unwrap_or(0);
    for step in 0..step_count {
        for (character, entity) in config.characters.iter().zip(&character_entities) {
            let Some(value) = character.health_steps.get(step) else {
                continue;
            };
            if let Some(mut sheet) = app.world_mut().get_mut::<CharacterSheet>(*entity) {
                health::write_current_hp(&mut sheet.0, *value);
            }
        }
        settle(&mut app);
    }

    let mut tokens = Vec::new();
    for (entity, label, character) in spawned_tokens {
        let light = app
            .world()
            .get::<TokenLight>(entity)
            .map(|l| l.0)
            .unwrap_or_else(LightDescriptor::no_aura);
        tokens.push(TokenReport {
            label,
            character,
            light,
        });
    }

    Ok(ScenarioReport {
        system: config.system.clone(),
        tokens,
    })
}

/// Step the schedule past the refresh debounce so pending recomputes land.
fn settle(app: &mut App) {
    for _ in 0..8 {
        std::thread::sleep(Duration::from_millis(25));
        app.update();
    }
}

//! Integration tests for headless scenario execution
//!
//! These verify that:
//! - scenarios run to completion and report per-token light state
//! - per-token disable flags survive into the report
//! - multi-token characters fan out to identical lights

use token_health_aura::aura::{AnimationKind, LightDescriptor, RgbColor};
use token_health_aura::headless::{run_headless_scenario, ScenarioCharacter, ScenarioConfig};
use token_health_aura::settings::AuraSettings;

fn character(name: &str, max_hp: f64, steps: Vec<f64>) -> ScenarioCharacter {
    ScenarioCharacter {
        name: name.to_string(),
        max_hp,
        tokens: 1,
        disable_aura: false,
        health_steps: steps,
    }
}

#[test]
fn test_scenario_runs_to_completion() {
    let config = ScenarioConfig {
        system: "dnd5e".to_string(),
        characters: vec![character("Goblin", 20.0, vec![10.0, 4.0])],
    };

    let report = run_headless_scenario(&config, AuraSettings::default()).unwrap();
    assert_eq!(report.tokens.len(), 1);

    let light = &report.tokens[0].light;
    // Final step leaves the goblin at 20%: flat red, bottom dynamic tier
    assert_eq!(light.color, Some(RgbColor::new(255, 0, 0)));
    assert_eq!(light.animation.kind, AnimationKind::Torch);
    assert_eq!(light.animation.speed, 5);
}

#[test]
fn test_healthy_character_reports_no_aura() {
    let config = ScenarioConfig {
        system: "pf2e".to_string(),
        characters: vec![character("Paladin", 40.0, vec![])],
    };

    let report = run_headless_scenario(&config, AuraSettings::default()).unwrap();
    assert_eq!(report.tokens[0].light, LightDescriptor::no_aura());
}

#[test]
fn test_disabled_tokens_stay_cleared() {
    let mut wounded = character("Rogue", 30.0, vec![3.0]);
    wounded.disable_aura = true;

    let config = ScenarioConfig {
        system: "dnd5e".to_string(),
        characters: vec![wounded],
    };

    let report = run_headless_scenario(&config, AuraSettings::default()).unwrap();
    assert_eq!(report.tokens[0].light, LightDescriptor::no_aura());
}

#[test]
fn test_multi_token_characters_share_one_light() {
    let mut ogre = character("Ogre", 60.0, vec![24.0]);
    ogre.tokens = 2;

    let config = ScenarioConfig {
        system: "dnd5e".to_string(),
        characters: vec![ogre],
    };

    let report = run_headless_scenario(&config, AuraSettings::default()).unwrap();
    assert_eq!(report.tokens.len(), 2);
    assert_eq!(report.tokens[0].character, "Ogre");
    assert_eq!(report.tokens[0].light, report.tokens[1].light);
    // 40% blends the default stops toward red
    assert_eq!(report.tokens[0].light.color, Some(RgbColor::new(255, 153, 0)));
}

#[test]
fn test_generic_system_fallback_in_scenarios() {
    let config = ScenarioConfig {
        system: "homebrew".to_string(),
        characters: vec![character("Blob", 10.0, vec![2.0])],
    };

    let report = run_headless_scenario(&config, AuraSettings::default()).unwrap();
    assert_eq!(report.system, "homebrew");
    assert_eq!(report.tokens[0].light.color, Some(RgbColor::new(255, 0, 0)));
}

#[test]
fn test_invalid_scenarios_are_rejected() {
    let config = ScenarioConfig {
        system: "dnd5e".to_string(),
        characters: vec![],
    };
    assert!(run_headless_scenario(&config, AuraSettings::default()).is_err());
}

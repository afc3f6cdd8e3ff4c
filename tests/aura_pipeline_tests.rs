//! Integration tests for the aura pipeline
//!
//! These run the full ECS shell under MinimalPlugins and verify:
//! - suppression actively clears, while unavailable health touches nothing
//! - only controller sessions apply descriptors
//! - health and settings changes propagate to token lights
//! - rapid update bursts collapse into one debounced apply

use bevy::prelude::*;
use std::thread::sleep;
use std::time::Duration;

use token_health_aura::aura::{
    health, AnimationKind, AuraApplied, AuraDisabled, AuraPlugin, BoardToken, Character,
    CharacterSheet, GameSystem, LightDescriptor, RgbColor, SessionAuthority, TokenLight, TokenOf,
};
use token_health_aura::settings::AuraSettings;

/// Counts every descriptor apply, so tests can tell "cleared" from
/// "never touched".
#[derive(Resource, Default)]
struct ApplyCount(usize);

fn count_applies(mut events: EventReader<AuraApplied>, mut count: ResMut<ApplyCount>) {
    count.0 += events.read().count();
}

fn test_app(settings: AuraSettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(settings)
        .init_resource::<ApplyCount>()
        .add_plugins(AuraPlugin)
        .add_systems(Update, count_applies);
    app
}

/// Step past the refresh debounce so pending recomputes land.
fn settle(app: &mut App) {
    for _ in 0..8 {
        sleep(Duration::from_millis(25));
        app.update();
    }
}

fn spawn_character(app: &mut App, current: f64, max: f64) -> Entity {
    let sheet = health::make_sheet(&GameSystem::Dnd5e, current, max);
    app.world_mut()
        .spawn((
            Character {
                name: "Test Character".to_string(),
            },
            CharacterSheet(sheet),
        ))
        .id()
}

fn spawn_token(app: &mut App, character: Entity) -> Entity {
    app.world_mut()
        .spawn((
            BoardToken {
                label: "Test Token".to_string(),
            },
            TokenOf(character),
            TokenLight::default(),
        ))
        .id()
}

/// A recognizable pre-existing light, for asserting whether a token was
/// touched at all.
fn stale_light() -> LightDescriptor {
    LightDescriptor {
        dim: 9.0,
        bright: 9.0,
        color: Some(RgbColor::new(1, 2, 3)),
        alpha: 0.9,
        ..LightDescriptor::no_aura()
    }
}

fn token_light(app: &App, token: Entity) -> LightDescriptor {
    app.world().get::<TokenLight>(token).unwrap().0
}

fn apply_count(app: &App) -> usize {
    app.world().resource::<ApplyCount>().0
}

#[test]
fn test_initial_aura_at_half_health() {
    let mut app = test_app(AuraSettings::default());
    let character = spawn_character(&mut app, 10.0, 20.0);
    let token = spawn_token(&mut app, character);

    settle(&mut app);

    let light = token_light(&app, token);
    // 50% sits exactly on the top default threshold: flat yellow
    assert_eq!(light.color, Some(RgbColor::new(255, 255, 0)));
    assert_eq!(light.dim, 1.0);
    assert_eq!(light.bright, 0.0);
    assert!((light.alpha - 0.1).abs() < 1e-6);
    // Dynamic style at 50%: pulse tier
    assert_eq!(light.animation.kind, AnimationKind::Pulse);
    assert_eq!(light.animation.speed, 4);
}

#[test]
fn test_full_health_has_no_aura() {
    let mut app = test_app(AuraSettings::default());
    let character = spawn_character(&mut app, 20.0, 20.0);
    let token = spawn_token(&mut app, character);

    settle(&mut app);

    assert_eq!(token_light(&app, token), LightDescriptor::no_aura());
}

#[test]
fn test_health_change_updates_the_aura() {
    let mut app = test_app(AuraSettings::default());
    let character = spawn_character(&mut app, 20.0, 20.0);
    let token = spawn_token(&mut app, character);
    settle(&mut app);

    let mut sheet = app.world_mut().get_mut::<CharacterSheet>(character).unwrap();
    health::write_current_hp(&mut sheet.0, 5.0);
    settle(&mut app);

    // 25% is exactly the lowest default threshold: flat red
    let light = token_light(&app, token);
    assert_eq!(light.color, Some(RgbColor::new(255, 0, 0)));
}

#[test]
fn test_suppression_actively_clears() {
    let mut app = test_app(AuraSettings::default());
    let character = spawn_character(&mut app, 2.0, 20.0);
    let token = spawn_token(&mut app, character);
    app.world_mut()
        .entity_mut(token)
        .insert((AuraDisabled, TokenLight(stale_light())));

    settle(&mut app);

    // The flag wins over any health value, and the clear is a real apply
    assert_eq!(token_light(&app, token), LightDescriptor::no_aura());
    assert!(apply_count(&app) > 0);
}

#[test]
fn test_unavailable_health_touches_nothing() {
    let mut app = test_app(AuraSettings::default());
    let character = app
        .world_mut()
        .spawn((
            Character {
                name: "Sheetless".to_string(),
            },
            CharacterSheet(serde_json::json!({})),
        ))
        .id();
    let token = spawn_token(&mut app, character);
    app.world_mut()
        .entity_mut(token)
        .insert(TokenLight(stale_light()));

    settle(&mut app);

    // Unlike suppression, no apply happens at all: the old light survives
    assert_eq!(token_light(&app, token), stale_light());
    assert_eq!(apply_count(&app), 0);
}

#[test]
fn test_observer_sessions_never_apply() {
    let mut app = test_app(AuraSettings::default());
    app.insert_resource(SessionAuthority {
        is_controller: false,
    });
    let character = spawn_character(&mut app, 5.0, 20.0);
    let token = spawn_token(&mut app, character);
    app.world_mut()
        .entity_mut(token)
        .insert(TokenLight(stale_light()));

    settle(&mut app);

    assert_eq!(token_light(&app, token), stale_light());
    assert_eq!(apply_count(&app), 0);
}

#[test]
fn test_disable_all_rescans_every_token() {
    let mut app = test_app(AuraSettings::default());
    let character = spawn_character(&mut app, 5.0, 20.0);
    let token = spawn_token(&mut app, character);
    settle(&mut app);
    assert!(token_light(&app, token).is_lit());

    app.world_mut()
        .resource_mut::<AuraSettings>()
        .disable_all = true;
    settle(&mut app);

    assert_eq!(token_light(&app, token), LightDescriptor::no_aura());
}

#[test]
fn test_sheet_change_fans_out_to_all_tokens() {
    let mut app = test_app(AuraSettings::default());
    let character = spawn_character(&mut app, 20.0, 20.0);
    let first = spawn_token(&mut app, character);
    let second = spawn_token(&mut app, character);
    settle(&mut app);

    let mut sheet = app.world_mut().get_mut::<CharacterSheet>(character).unwrap();
    health::write_current_hp(&mut sheet.0, 8.0);
    settle(&mut app);

    let expected = Some(RgbColor::new(255, 153, 0));
    // 40% blends yellow toward red at factor 0.4: channel g = 255 - 102
    assert_eq!(token_light(&app, first).color, expected);
    assert_eq!(token_light(&app, second).color, expected);
}

#[test]
fn test_external_light_write_is_reasserted() {
    let mut app = test_app(AuraSettings::default());
    let character = spawn_character(&mut app, 10.0, 20.0);
    let token = spawn_token(&mut app, character);
    settle(&mut app);
    let owned = token_light(&app, token);
    assert!(owned.is_lit());

    // Outside code stomps the light field; the watcher queues a refresh
    // and the aura reasserts itself
    app.world_mut().get_mut::<TokenLight>(token).unwrap().0 = stale_light();
    settle(&mut app);

    assert_eq!(token_light(&app, token), owned);
}

#[test]
fn test_rapid_changes_collapse_into_one_apply() {
    let mut app = test_app(AuraSettings::default());
    let character = spawn_character(&mut app, 20.0, 20.0);
    let token = spawn_token(&mut app, character);
    settle(&mut app);
    let before = apply_count(&app);

    // Three writes inside one debounce window, no sleeps between
    for value in [15.0, 12.0, 9.0] {
        let mut sheet = app.world_mut().get_mut::<CharacterSheet>(character).unwrap();
        health::write_current_hp(&mut sheet.0, value);
        app.update();
    }
    settle(&mut app);

    assert_eq!(apply_count(&app) - before, 1);
    // The last write wins: 45% blends toward red
    assert!(token_light(&app, token).is_lit());
}

//! Sandbox board
//!
//! A minimal stand-in for the host platform: a floor, a row of tokens, and
//! keyboard input that damages or heals the character behind the selected
//! token. Exists to exercise the aura pipeline, not to be a game.

use bevy::prelude::*;
use rand::Rng;

use crate::aura::{
    health, ActiveGameSystem, BoardToken, Character, CharacterSheet, TokenLight, TokenOf,
};
use crate::keybindings::{AuraAction, Keybindings};
use crate::settings::AuraSettings;

pub mod lighting;

use lighting::{animate_aura_lamps, AuraLamp};

/// Plugin for the sandbox board scene
pub struct BoardPlugin {
    /// How many tokens to place
    pub tokens: usize,
}

impl Default for BoardPlugin {
    fn default() -> Self {
        Self { tokens: 4 }
    }
}

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(BoardConfig {
            tokens: self.tokens.max(1),
        })
        .init_resource::<SelectedToken>()
        .add_systems(Startup, setup_board)
        .add_systems(
            Update,
            (
                handle_board_input,
                highlight_selected_token,
                animate_aura_lamps,
            ),
        );
    }
}

#[derive(Resource)]
pub struct BoardConfig {
    pub tokens: usize,
}

/// The token the board input and the token config panel act on.
#[derive(Resource, Default)]
pub struct SelectedToken {
    pub entity: Option<Entity>,
    /// Spawn order, for cycling
    pub roster: Vec<Entity>,
}

impl SelectedToken {
    pub fn cycle(&mut self) {
        let Some(current) = self.entity else {
            self.entity = self.roster.first().copied();
            return;
        };
        let index = self.roster.iter().position(|e| *e == current).unwrap_or(0);
        self.entity = Some(self.roster[(index + 1) % self.roster.len()]);
    }
}

/// Spawns the camera, lighting, floor, and the token roster.
fn setup_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<BoardConfig>,
    system: Res<ActiveGameSystem>,
    mut selected: ResMut<SelectedToken>,
) {
    info!("Setting up board with {} tokens", config.tokens);

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 14.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Dark ambient so the auras carry the scene
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.25, 0.25, 0.35),
        brightness: 120.0,
    });

    let floor_size = 40.0;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(floor_size, floor_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.15, 0.18, 0.22),
            perceptual_roughness: 0.9,
            ..default()
        })),
    ));

    let token_mesh = meshes.add(Cylinder::new(0.9, 0.3));
    let mut rng = rand::thread_rng();
    let spacing = 3.0;
    let row_offset = (config.tokens as f32 - 1.0) * spacing / 2.0;

    for i in 0..config.tokens {
        let name = format!("Combatant {}", i + 1);
        let max_hp = rng.gen_range(20..=60) as f64;

        let character = commands
            .spawn((
                Character { name: name.clone() },
                CharacterSheet(health::make_sheet(&system.0, max_hp, max_hp)),
            ))
            .id();

        let hue = (i as f32 / config.tokens as f32) * 360.0;
        let material = materials.add(StandardMaterial {
            base_color: Color::hsl(hue, 0.6, 0.5),
            perceptual_roughness: 0.5,
            ..default()
        });

        let token = commands
            .spawn((
                BoardToken {
                    label: format!("Token {}", i + 1),
                },
                TokenOf(character),
                TokenLight::default(),
                Mesh3d(token_mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(i as f32 * spacing - row_offset, 0.15, 0.0),
            ))
            .id();

        // Each token carries its own aura lamp
        commands.spawn((
            PointLight {
                intensity: 0.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(i as f32 * spacing - row_offset, 1.2, 0.0),
            AuraLamp { token },
        ));

        selected.roster.push(token);
    }

    selected.entity = selected.roster.first().copied();
}

/// Keyboard input: cycle selection, damage/heal the selected character,
/// and the global toggle-all hotkey.
fn handle_board_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut selected: ResMut<SelectedToken>,
    mut settings: ResMut<AuraSettings>,
    tokens: Query<&TokenOf, With<BoardToken>>,
    mut characters: Query<(&Character, &mut CharacterSheet)>,
    system: Res<ActiveGameSystem>,
) {
    if keybindings.action_just_pressed(AuraAction::CycleToken, &keyboard) {
        selected.cycle();
    }

    if keybindings.action_just_pressed(AuraAction::ToggleAllAuras, &keyboard) {
        settings.disable_all = !settings.disable_all;
        info!(
            "Auras {}",
            if settings.disable_all { "disabled" } else { "enabled" }
        );
    }

    let damage = keybindings.action_just_pressed(AuraAction::DamageSelected, &keyboard);
    let heal = keybindings.action_just_pressed(AuraAction::HealSelected, &keyboard);
    if !damage && !heal {
        return;
    }

    let Some(token) = selected.entity else { return };
    let Ok(token_of) = tokens.get(token) else { return };
    let Ok((character, mut sheet)) = characters.get_mut(token_of.0) else {
        return;
    };

    let Some(sample) = health::resolve_health(&system.0, &sheet.0) else {
        return;
    };

    let mut rng = rand::thread_rng();
    let delta = rng.gen_range(3.0..=9.0);
    let next = if damage {
        (sample.current - delta).max(0.0)
    } else {
        (sample.current + delta).min(sample.max)
    };

    if health::write_current_hp(&mut sheet.0, f64::from(next)) {
        info!(
            "{}: {:.0}/{:.0} hp",
            character.name, next, sample.max
        );
    }
}

/// Scale the selected token up slightly so selection is visible.
fn highlight_selected_token(
    selected: Res<SelectedToken>,
    mut tokens: Query<(Entity, &mut Transform), With<BoardToken>>,
) {
    for (entity, mut transform) in tokens.iter_mut() {
        let scale = if Some(entity) == selected.entity { 1.2 } else { 1.0 };
        transform.scale = Vec3::splat(scale);
    }
}

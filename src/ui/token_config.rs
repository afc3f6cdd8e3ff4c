//! Per-token configuration panel
//!
//! Shows the selected token's character and health, and carries the
//! "disable aura for this token" checkbox that sets the per-token override
//! flag.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::aura::{
    health_percentage, ActiveGameSystem, AuraDisabled, BoardToken, Character, CharacterSheet,
    TokenOf,
};
use crate::board::SelectedToken;

pub fn draw_token_config(
    mut contexts: EguiContexts,
    mut commands: Commands,
    selected: Res<SelectedToken>,
    tokens: Query<(&BoardToken, &TokenOf, Option<&AuraDisabled>)>,
    characters: Query<(&Character, &CharacterSheet)>,
    system: Res<ActiveGameSystem>,
) {
    let Some(token) = selected.entity else { return };
    let Ok((board_token, token_of, disabled)) = tokens.get(token) else {
        return;
    };
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::Window::new("Token Configuration")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(&board_token.label).strong());

            if let Ok((character, sheet)) = characters.get(token_of.0) {
                ui.label(format!("Represents: {}", character.name));
                match health_percentage(&system.0, &sheet.0) {
                    Some(percent) => ui.label(format!("Health: {:.0}%", percent)),
                    None => ui.label("Health: unavailable"),
                };
            }

            ui.separator();

            let mut is_disabled = disabled.is_some();
            if ui
                .checkbox(&mut is_disabled, "Disable health aura for this token")
                .changed()
            {
                if is_disabled {
                    commands.entity(token).insert(AuraDisabled);
                } else {
                    commands.entity(token).remove::<AuraDisabled>();
                }
            }
            ui.small("Overrides the aura display for this specific token.");
        });
}

//! Aura settings window
//!
//! A modal-ish egui window over every tunable. Edits land in a draft copy;
//! Apply validates and writes the settings resource in one batch, so the
//! change-detection layer sees a single update and rescans once.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::aura::{RgbColor, Threshold};
use crate::keybindings::{AuraAction, Keybindings};
use crate::settings::{AnimationStyle, AuraSettings, AuraType};

#[derive(Resource, Default)]
pub struct SettingsWindowState {
    pub open: bool,
    /// Working copy while the window is open
    pub draft: Option<AuraSettings>,
}

/// The settings hotkey opens the window with a fresh draft, or closes it.
pub fn toggle_settings_window(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    settings: Res<AuraSettings>,
    mut state: ResMut<SettingsWindowState>,
) {
    if keybindings.action_just_pressed(AuraAction::OpenSettings, &keyboard) {
        if state.open {
            state.open = false;
            state.draft = None;
        } else {
            state.draft = Some(settings.clone());
            state.open = true;
        }
    }
}

/// Pick the cutoff for a newly added threshold: the midpoint of the first
/// gap wider than 15 points walking down from 100, else half the lowest
/// cutoff.
fn next_cutoff(thresholds: &[Threshold]) -> f32 {
    let mut cutoffs: Vec<f32> = thresholds.iter().map(|t| t.cutoff).collect();
    cutoffs.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let Some(lowest) = cutoffs.last().copied() else {
        return 50.0;
    };

    let mut prev = 100.0;
    for value in &cutoffs {
        if prev - value > 15.0 {
            return ((prev + value) / 2.0).floor();
        }
        prev = *value;
    }
    (lowest / 2.0).floor()
}

pub fn draw_settings_window(
    mut contexts: EguiContexts,
    mut state: ResMut<SettingsWindowState>,
    mut settings: ResMut<AuraSettings>,
) {
    if !state.open {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let Some(mut draft) = state.draft.take() else {
        state.open = false;
        return;
    };

    let mut window_open = true;
    let mut apply = false;
    let mut reset = false;
    let mut close = false;

    egui::Window::new("Token Health Aura Settings")
        .open(&mut window_open)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ComboBox::from_label("Aura type")
                .selected_text(draft.aura_type.as_str())
                .show_ui(ui, |ui| {
                    for option in AuraType::all() {
                        ui.selectable_value(&mut draft.aura_type, option, option.as_str());
                    }
                });

            ui.add(egui::Slider::new(&mut draft.aura_alpha, 0.1..=0.3).text("Opacity"));
            ui.add(egui::Slider::new(&mut draft.aura_dim, 0.0..=3.0).text("Dim light range"));
            ui.add(egui::Slider::new(&mut draft.aura_bright, 0.0..=2.0).text("Bright light range"));
            ui.checkbox(&mut draft.dynamic_opacity, "Scale opacity with missing health");

            ui.separator();

            egui::ComboBox::from_label("Animation style")
                .selected_text(draft.animation_style.as_str())
                .show_ui(ui, |ui| {
                    for option in AnimationStyle::all() {
                        ui.selectable_value(&mut draft.animation_style, option, option.as_str());
                    }
                });
            ui.checkbox(&mut draft.enable_pulse, "Enable aura animation");
            ui.add_enabled(
                draft.animation_style == AnimationStyle::Flicker,
                egui::Slider::new(&mut draft.flicker_intensity, 1..=5).text("Flicker intensity"),
            );

            ui.separator();
            ui.label(egui::RichText::new("Health thresholds").strong());
            ui.small("At or below each cutoff the aura blends toward its color.");

            let mut remove_index = None;
            let single = draft.thresholds.len() == 1;
            for (index, threshold) in draft.thresholds.iter_mut().enumerate() {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Slider::new(&mut threshold.cutoff, 0.0..=100.0)
                            .text("%")
                            .fixed_decimals(0),
                    );
                    let mut rgb = [threshold.color.r, threshold.color.g, threshold.color.b];
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        threshold.color = RgbColor::new(rgb[0], rgb[1], rgb[2]);
                    }
                    if ui.add_enabled(!single, egui::Button::new("✕")).clicked() {
                        remove_index = Some(index);
                    }
                });
            }
            if let Some(index) = remove_index {
                draft.thresholds.remove(index);
            }
            if ui.button("＋ Add threshold").clicked() {
                let cutoff = next_cutoff(&draft.thresholds);
                draft
                    .thresholds
                    .push(Threshold::new(cutoff, RgbColor::new(255, 255, 0)));
            }

            ui.separator();
            ui.checkbox(&mut draft.disable_all, "Disable all auras");

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    apply = true;
                }
                if ui.button("Reset to defaults").clicked() {
                    reset = true;
                }
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });

    if reset {
        draft = AuraSettings {
            keybindings: draft.keybindings.clone(),
            ..AuraSettings::default()
        };
    }

    if apply {
        draft
            .thresholds
            .sort_by(|a, b| b.cutoff.partial_cmp(&a.cutoff).unwrap_or(std::cmp::Ordering::Equal));
        *settings = draft.clone().sanitized();
    }

    if close || !window_open {
        state.open = false;
        state.draft = None;
    } else {
        state.draft = Some(draft);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cutoff_picks_first_wide_gap() {
        // Gap between 100 and 50 is the first one wider than 15
        let stops = [
            Threshold::new(50.0, RgbColor::BLACK),
            Threshold::new(25.0, RgbColor::BLACK),
        ];
        assert_eq!(next_cutoff(&stops), 75.0);
    }

    #[test]
    fn test_next_cutoff_falls_back_to_half_lowest() {
        let stops = [
            Threshold::new(90.0, RgbColor::BLACK),
            Threshold::new(80.0, RgbColor::BLACK),
            Threshold::new(70.0, RgbColor::BLACK),
        ];
        // All gaps from 100 downward are <= 15, so take half the lowest
        assert_eq!(next_cutoff(&stops), 35.0);
    }

    #[test]
    fn test_next_cutoff_on_empty_list() {
        assert_eq!(next_cutoff(&[]), 50.0);
    }
}

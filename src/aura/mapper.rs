//! Health-to-light mapping
//!
//! The pure core of the module: given a health percentage and a settings
//! snapshot, produce the light descriptor to apply to a token. No ECS types
//! appear here so the whole mapping can be unit tested directly.
//!
//! Thresholds partition 0-100 into brackets under a "<= upper, > lower"
//! rule. Above the highest cutoff there is no aura; between two cutoffs the
//! color is a linear RGB blend of the bracket endpoints; at or below the
//! lowest cutoff the lowest color applies flat.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::RgbColor;
use crate::settings::{AnimationStyle, AuraSettings, AuraType};

/// One stop in the health gradient: at or below `cutoff` percent, blend
/// toward `color`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub cutoff: f32,
    pub color: RgbColor,
}

impl Threshold {
    pub fn new(cutoff: f32, color: RgbColor) -> Self {
        Self { cutoff, color }
    }
}

/// Light animation kinds understood by the board renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    None,
    Pulse,
    Torch,
}

/// Animation portion of a light descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightAnimation {
    pub kind: AnimationKind,
    pub speed: u8,
    pub intensity: u8,
}

impl LightAnimation {
    pub const NONE: LightAnimation = LightAnimation {
        kind: AnimationKind::None,
        speed: 0,
        intensity: 0,
    };

    pub fn new(kind: AnimationKind, speed: u8, intensity: u8) -> Self {
        Self {
            kind,
            speed,
            intensity,
        }
    }
}

/// The full light state computed for a token. Produced fresh on every
/// recomputation and applied to the token's light field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightDescriptor {
    pub dim: f32,
    pub bright: f32,
    pub color: Option<RgbColor>,
    pub alpha: f32,
    pub animation: LightAnimation,
}

impl LightDescriptor {
    /// The clearing descriptor: no radii, no color, no animation. Applied
    /// when the aura is suppressed or health sits above every threshold.
    pub fn no_aura() -> Self {
        Self {
            dim: 0.0,
            bright: 0.0,
            color: None,
            alpha: 0.0,
            animation: LightAnimation::NONE,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.color.is_some()
    }
}

impl Default for LightDescriptor {
    fn default() -> Self {
        Self::no_aura()
    }
}

/// Stable-sort a threshold list descending by cutoff.
///
/// The stable sort is the tie-break for duplicated cutoffs: the entry that
/// came first keeps priority, and the duplicate's empty bracket can never
/// match, so resolution stays deterministic regardless of how the settings
/// form ordered equal cutoffs.
pub fn sorted_thresholds(thresholds: &[Threshold]) -> SmallVec<[Threshold; 4]> {
    let mut sorted: SmallVec<[Threshold; 4]> = SmallVec::from_slice(thresholds);
    sorted.sort_by(|a, b| b.cutoff.partial_cmp(&a.cutoff).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Resolve the gradient color for a health percentage.
///
/// `thresholds` must be sorted descending by cutoff (see
/// [`sorted_thresholds`]). Returns `None` when health sits above every
/// cutoff, meaning no aura at all.
pub fn resolve_color(percent: f32, thresholds: &[Threshold]) -> Option<RgbColor> {
    let Some(highest) = thresholds.first() else {
        // Degenerate empty list; the settings form refuses to delete the
        // last threshold, so this only shows up with hand-edited files.
        return Some(RgbColor::BLACK);
    };
    if percent > highest.cutoff {
        return None;
    }

    let lowest = thresholds[thresholds.len() - 1];
    if percent <= lowest.cutoff {
        // No extrapolation below the lowest stop
        return Some(lowest.color);
    }

    for pair in thresholds.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        if percent <= upper.cutoff && percent > lower.cutoff {
            let range = upper.cutoff - lower.cutoff;
            if range <= f32::EPSILON {
                return Some(upper.color);
            }
            let factor = (upper.cutoff - percent) / range;
            return Some(upper.color.lerp(lower.color, factor));
        }
    }

    // Unreachable for a descending-sorted list, but unsorted input from a
    // hand-edited settings file lands here rather than panicking.
    Some(lowest.color)
}

/// Pick the animation for a health percentage.
///
/// `enable_pulse` is the global animation kill switch and overrides every
/// style, including dynamic tiers.
pub fn select_animation(
    style: AnimationStyle,
    percent: f32,
    flicker_intensity: u8,
    enable_pulse: bool,
) -> LightAnimation {
    if !enable_pulse {
        return LightAnimation::NONE;
    }
    match style {
        AnimationStyle::None => LightAnimation::NONE,
        AnimationStyle::Pulse => LightAnimation::new(AnimationKind::Pulse, 3, 3),
        AnimationStyle::Flicker => LightAnimation::new(AnimationKind::Torch, 2, flicker_intensity),
        AnimationStyle::Dynamic => {
            if percent <= 25.0 {
                LightAnimation::new(AnimationKind::Torch, 5, 5)
            } else if percent <= 50.0 {
                LightAnimation::new(AnimationKind::Pulse, 4, 4)
            } else if percent <= 75.0 {
                LightAnimation::new(AnimationKind::Pulse, 2, 2)
            } else {
                LightAnimation::NONE
            }
        }
    }
}

/// Assemble the full descriptor for a health percentage under a settings
/// snapshot. Deterministic: identical inputs give identical descriptors.
pub fn compute_descriptor(percent: f32, settings: &AuraSettings) -> LightDescriptor {
    let sorted = sorted_thresholds(&settings.thresholds);
    let Some(color) = resolve_color(percent, &sorted) else {
        return LightDescriptor::no_aura();
    };

    let dim = match settings.aura_type {
        AuraType::Bright => 0.0,
        _ => settings.aura_dim,
    };
    let bright = match settings.aura_type {
        AuraType::Dim => 0.0,
        _ => settings.aura_bright,
    };
    let alpha = if settings.dynamic_opacity {
        // Fades up from 0.1 toward the configured opacity as health falls
        0.1 + (settings.aura_alpha - 0.1) * (1.0 - percent / 100.0)
    } else {
        settings.aura_alpha
    };

    LightDescriptor {
        dim,
        bright,
        color: Some(color),
        alpha,
        animation: select_animation(
            settings.animation_style,
            percent,
            settings.flicker_intensity,
            settings.enable_pulse,
        ),
    }
}

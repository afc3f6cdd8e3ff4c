//! Aura lamp rendering
//!
//! Translates each token's applied light descriptor into a real point
//! light: radii become range, alpha becomes base intensity, and the
//! animation settings modulate intensity over time (sinusoidal pulse,
//! random torch flicker).

use bevy::prelude::*;
use rand::Rng;

use crate::aura::{AnimationKind, TokenLight};

/// World units of light range per grid unit of aura radius.
const RANGE_PER_GRID_UNIT: f32 = 2.5;

/// Lumens of lamp intensity per point of aura alpha.
const LUMENS_PER_ALPHA: f32 = 400_000.0;

/// A point light driven by one token's light descriptor.
#[derive(Component)]
pub struct AuraLamp {
    pub token: Entity,
}

/// Drive every aura lamp from its token's descriptor, applying the
/// animation for this frame.
pub fn animate_aura_lamps(
    time: Res<Time>,
    mut lamps: Query<(&mut PointLight, &AuraLamp)>,
    tokens: Query<&TokenLight>,
) {
    let elapsed = time.elapsed_secs();
    let mut rng = rand::thread_rng();

    for (mut light, lamp) in lamps.iter_mut() {
        let Ok(token_light) = tokens.get(lamp.token) else {
            light.intensity = 0.0;
            continue;
        };
        let descriptor = &token_light.0;

        let Some(color) = descriptor.color else {
            light.intensity = 0.0;
            continue;
        };

        light.color = color.to_bevy();
        light.range = descriptor.dim.max(descriptor.bright) * RANGE_PER_GRID_UNIT;

        // Bright auras read as a hotter core
        let mut intensity =
            descriptor.alpha * LUMENS_PER_ALPHA * (1.0 + descriptor.bright * 0.5);

        let animation = descriptor.animation;
        match animation.kind {
            AnimationKind::None => {}
            AnimationKind::Pulse => {
                let phase = elapsed * f32::from(animation.speed);
                intensity *= 1.0 + 0.12 * f32::from(animation.intensity) * phase.sin();
            }
            AnimationKind::Torch => {
                let jitter = (rng.gen::<f32>() - 0.5) * 0.06 * f32::from(animation.intensity);
                intensity *= 1.0 + jitter;
            }
        }

        light.intensity = intensity.max(0.0);
    }
}

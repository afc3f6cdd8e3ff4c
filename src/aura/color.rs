//! Aura color handling
//!
//! Colors travel as `#rrggbb` hex triplets in settings files and scenario
//! configs, and as 8-bit RGB channels everywhere else. Gradient blending
//! operates channel-wise in this space.

use bevy::prelude::*;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Sentinel returned by the resolver when the threshold list is empty.
    pub const BLACK: RgbColor = RgbColor { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or bare `rrggbb`) hex triplet.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blend toward `other`. `factor` 0.0 yields `self`, 1.0 yields `other`;
    /// each channel is interpolated independently and rounded to nearest.
    pub fn lerp(self, other: Self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let blended = f32::from(a) + (f32::from(b) - f32::from(a)) * factor;
            blended.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    pub fn to_bevy(self) -> Color {
        Color::srgb_u8(self.r, self.g, self.b)
    }
}

impl Serialize for RgbColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        RgbColor::from_hex(&hex)
            .ok_or_else(|| D::Error::custom(format!("invalid color triplet '{hex}'")))
    }
}

//! Color Model - RGB Triples
//!
//! Colors are 8-bit RGB, no alpha. Malformed literal input degrades to a
//! fixed default instead of failing (painting requests never abort over a
//! bad color string).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fallback when a literal background color does not parse (dark red).
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(139, 0, 0);

/// Fallback when a literal stripe color does not parse (white).
pub const DEFAULT_STRIPE: Rgb = Rgb::new(255, 255, 255);

/// An 8-bit RGB color. Immutable once resolved.
///
/// Serializes as a `"#rrggbb"` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` literal (leading `#` optional, case insensitive).
    /// Returns `None` on malformed input; callers substitute a default.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Apply an intensity factor in (0, 1] to every channel.
    ///
    /// Channels truncate (`floor`), matching the resolution-time scaling
    /// contract: applied once, never re-applied.
    pub fn scaled(self, intensity: f64) -> Self {
        let scale = |c: u8| (f64::from(c) * intensity) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// Linear blend toward `top` by `alpha` in [0, 1].
    ///
    /// alpha 0 leaves `self` unchanged, alpha 1 yields `top`. Channels are
    /// rounded to nearest and clamped to the 8-bit range.
    pub fn blend_toward(self, top: Rgb, alpha: f64) -> Self {
        let mix = |under: u8, over: u8| {
            let v = f64::from(under) * (1.0 - alpha) + f64::from(over) * alpha;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, top.r),
            g: mix(self.g, top.g),
            b: mix(self.b, top.b),
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s}")))
    }
}

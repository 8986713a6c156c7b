//! Generation Parameters
//!
//! The full parameter surface of a painting request, with the engine
//! defaults applied by serde. Range checking lives in the validation
//! layer; parsing here only normalizes shapes (color sentinel, width
//! range string) and degrades malformed width ranges to the default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::palette::PaletteTheme;

/// A requested color: either a `#RRGGBB` literal or the `random` sentinel.
///
/// Literal strings are kept verbatim; whether they parse as hex is decided
/// at palette resolution, where malformed input falls back to a default
/// color instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    Random,
    Literal(String),
}

impl ColorSpec {
    pub fn as_str(&self) -> &str {
        match self {
            ColorSpec::Random => "random",
            ColorSpec::Literal(s) => s,
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Random
    }
}

impl FromStr for ColorSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "random" {
            ColorSpec::Random
        } else {
            ColorSpec::Literal(s.to_string())
        })
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ColorSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColorSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(if s == "random" {
            ColorSpec::Random
        } else {
            ColorSpec::Literal(s)
        })
    }
}

/// Inclusive range of stripe widths in pixels, written `"min-max"`.
///
/// Malformed range strings degrade to the default 5-20 instead of failing;
/// min/max ordering is checked by the validation layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthRange {
    pub min: u32,
    pub max: u32,
}

impl WidthRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn parse_or_default(s: &str) -> Self {
        let mut parts = s.splitn(2, '-');
        match (
            parts.next().and_then(|p| p.trim().parse::<u32>().ok()),
            parts.next().and_then(|p| p.trim().parse::<u32>().ok()),
        ) {
            (Some(min), Some(max)) => Self { min, max },
            _ => Self::default(),
        }
    }
}

impl Default for WidthRange {
    fn default() -> Self {
        Self { min: 5, max: 20 }
    }
}

impl fmt::Display for WidthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl Serialize for WidthRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WidthRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(WidthRange::parse_or_default(&s))
    }
}

/// A painting request. Defaults match the engine's canonical composition:
/// a 1024x768 canvas, two asymmetric hard-edged stripes, classic palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateParams {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Background color: `#RRGGBB` or `random`.
    #[serde(default)]
    pub background: ColorSpec,
    /// Stripe color: `#RRGGBB` or `random`.
    #[serde(default)]
    pub stripe_color: ColorSpec,
    /// Number of vertical stripes, 0-5.
    #[serde(default = "default_stripe_count")]
    pub stripe_count: u32,
    /// Stripe width range in pixels, `"min-max"`.
    #[serde(default)]
    pub stripe_width_range: WidthRange,
    /// Color intensity factor, 0.1-1.0.
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    /// Asymmetric placement (tension-biased) vs. even spacing.
    #[serde(default = "default_true")]
    pub asymmetric: bool,
    /// Width of the edge blend ramp in pixels, 0-5. 0 is a hard edge.
    #[serde(default)]
    pub edge_softness: u32,
    #[serde(default)]
    pub palette: PaletteTheme,
    /// Fixed seed for reproducible output.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_width() -> u32 { 1024 }
fn default_height() -> u32 { 768 }
fn default_stripe_count() -> u32 { 2 }
fn default_intensity() -> f64 { 0.8 }
fn default_true() -> bool { true }

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: ColorSpec::default(),
            stripe_color: ColorSpec::default(),
            stripe_count: default_stripe_count(),
            stripe_width_range: WidthRange::default(),
            intensity: default_intensity(),
            asymmetric: default_true(),
            edge_softness: 0,
            palette: PaletteTheme::default(),
            seed: None,
        }
    }
}

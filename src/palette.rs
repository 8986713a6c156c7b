//! Palette Themes - Fixed Color Tables and Resolution
//!
//! Each named theme owns four candidate backgrounds and four candidate
//! stripe colors. Resolution priority: a literal hex spec wins (malformed
//! literals degrade to a fixed default), then the `random` theme draws
//! channels uniformly, then a uniform pick from the theme table. Every
//! resolved color is intensity-scaled exactly once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, DEFAULT_BACKGROUND, DEFAULT_STRIPE};
use crate::params::ColorSpec;
use crate::rng::SeededRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteTheme {
    Classic,
    Warm,
    Cool,
    Monochrome,
    Complementary,
    /// Fully random colors, no fixed table.
    Random,
}

impl Default for PaletteTheme {
    fn default() -> Self {
        Self::Classic
    }
}

impl PaletteTheme {
    pub const ALL: [PaletteTheme; 6] = [
        PaletteTheme::Classic,
        PaletteTheme::Warm,
        PaletteTheme::Cool,
        PaletteTheme::Monochrome,
        PaletteTheme::Complementary,
        PaletteTheme::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaletteTheme::Classic => "classic",
            PaletteTheme::Warm => "warm",
            PaletteTheme::Cool => "cool",
            PaletteTheme::Monochrome => "monochrome",
            PaletteTheme::Complementary => "complementary",
            PaletteTheme::Random => "random",
        }
    }

    /// The fixed color table for this theme; `None` for `Random`.
    pub fn table(self) -> Option<&'static ThemeTable> {
        match self {
            PaletteTheme::Classic => Some(&CLASSIC),
            PaletteTheme::Warm => Some(&WARM),
            PaletteTheme::Cool => Some(&COOL),
            PaletteTheme::Monochrome => Some(&MONOCHROME),
            PaletteTheme::Complementary => Some(&COMPLEMENTARY),
            PaletteTheme::Random => None,
        }
    }
}

impl fmt::Display for PaletteTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteTheme::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown palette theme: {s}"))
    }
}

/// A theme's fixed candidate colors.
pub struct ThemeTable {
    pub backgrounds: [Rgb; 4],
    pub stripes: [Rgb; 4],
}

const CLASSIC: ThemeTable = ThemeTable {
    backgrounds: [
        Rgb::new(139, 0, 0),
        Rgb::new(0, 0, 139),
        Rgb::new(139, 69, 19),
        Rgb::new(25, 25, 112),
    ],
    stripes: [
        Rgb::new(255, 255, 255),
        Rgb::new(255, 255, 0),
        Rgb::new(255, 140, 0),
        Rgb::new(220, 220, 220),
    ],
};

const WARM: ThemeTable = ThemeTable {
    backgrounds: [
        Rgb::new(178, 34, 34),
        Rgb::new(255, 69, 0),
        Rgb::new(205, 92, 92),
        Rgb::new(139, 69, 19),
    ],
    stripes: [
        Rgb::new(255, 255, 255),
        Rgb::new(255, 215, 0),
        Rgb::new(255, 160, 122),
        Rgb::new(240, 230, 140),
    ],
};

const COOL: ThemeTable = ThemeTable {
    backgrounds: [
        Rgb::new(25, 25, 112),
        Rgb::new(0, 100, 0),
        Rgb::new(70, 130, 180),
        Rgb::new(72, 61, 139),
    ],
    stripes: [
        Rgb::new(255, 255, 255),
        Rgb::new(173, 216, 230),
        Rgb::new(144, 238, 144),
        Rgb::new(221, 160, 221),
    ],
};

const MONOCHROME: ThemeTable = ThemeTable {
    backgrounds: [
        Rgb::new(50, 50, 50),
        Rgb::new(80, 80, 80),
        Rgb::new(35, 35, 35),
        Rgb::new(100, 100, 100),
    ],
    stripes: [
        Rgb::new(255, 255, 255),
        Rgb::new(200, 200, 200),
        Rgb::new(150, 150, 150),
        Rgb::new(220, 220, 220),
    ],
};

const COMPLEMENTARY: ThemeTable = ThemeTable {
    backgrounds: [
        Rgb::new(255, 0, 0),
        Rgb::new(0, 255, 0),
        Rgb::new(0, 0, 255),
        Rgb::new(255, 255, 0),
    ],
    stripes: [
        Rgb::new(0, 255, 255),
        Rgb::new(255, 0, 255),
        Rgb::new(255, 255, 0),
        Rgb::new(128, 0, 128),
    ],
};

/// The colors a painting request resolved to: one background plus one
/// stripe color per slot (`max(1, stripe_count)` slots). Recorded in the
/// manifest so silent literal-color fallbacks stay observable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedPalette {
    pub background: Rgb,
    pub stripe_colors: Vec<Rgb>,
}

fn random_color(rng: &mut SeededRng) -> Rgb {
    Rgb::new(rng.channel(), rng.channel(), rng.channel())
}

/// Resolve the background and stripe colors for a request.
///
/// Entropy is consumed here first (background, then stripe slots in order),
/// before any placement draw; callers must preserve that ordering.
pub fn resolve_palette(
    background: &ColorSpec,
    stripe_color: &ColorSpec,
    theme: PaletteTheme,
    intensity: f64,
    stripe_count: u32,
    rng: &mut SeededRng,
) -> ResolvedPalette {
    let bg = match background {
        ColorSpec::Literal(s) => Rgb::from_hex(s).unwrap_or(DEFAULT_BACKGROUND),
        ColorSpec::Random => match theme.table() {
            None => random_color(rng),
            Some(table) => *rng.pick(&table.backgrounds),
        },
    };

    let slots = stripe_count.max(1) as usize;
    let stripe_colors = (0..slots)
        .map(|_| {
            let c = match stripe_color {
                ColorSpec::Literal(s) => Rgb::from_hex(s).unwrap_or(DEFAULT_STRIPE),
                ColorSpec::Random => match theme.table() {
                    None => random_color(rng),
                    Some(table) => *rng.pick(&table.stripes),
                },
            };
            c.scaled(intensity)
        })
        .collect();

    ResolvedPalette {
        background: bg.scaled(intensity),
        stripe_colors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_colors_bypass_randomness() {
        let mut rng = SeededRng::from_seed(1);
        let p = resolve_palette(
            &ColorSpec::Literal("#336699".into()),
            &ColorSpec::Literal("#ffcc00".into()),
            PaletteTheme::Classic,
            1.0,
            3,
            &mut rng,
        );
        assert_eq!(p.background, Rgb::new(0x33, 0x66, 0x99));
        assert_eq!(p.stripe_colors.len(), 3);
        // Every slot resolves to the same literal.
        assert!(p.stripe_colors.iter().all(|&c| c == Rgb::new(0xff, 0xcc, 0x00)));
        // No entropy consumed: an untouched generator continues identically.
        let mut fresh = SeededRng::from_seed(1);
        assert_eq!(rng.next_f64(), fresh.next_f64());
    }

    #[test]
    fn test_malformed_literals_fall_back() {
        let mut rng = SeededRng::from_seed(1);
        let p = resolve_palette(
            &ColorSpec::Literal("teal".into()),
            &ColorSpec::Literal("#12345".into()),
            PaletteTheme::Warm,
            1.0,
            1,
            &mut rng,
        );
        assert_eq!(p.background, DEFAULT_BACKGROUND);
        assert_eq!(p.stripe_colors, vec![DEFAULT_STRIPE]);
    }

    #[test]
    fn test_theme_pick_stays_in_table() {
        for seed in 0..50 {
            let mut rng = SeededRng::from_seed(seed);
            let p = resolve_palette(
                &ColorSpec::Random,
                &ColorSpec::Random,
                PaletteTheme::Cool,
                1.0,
                4,
                &mut rng,
            );
            let table = PaletteTheme::Cool.table().unwrap();
            assert!(table.backgrounds.contains(&p.background));
            for c in &p.stripe_colors {
                assert!(table.stripes.contains(c));
            }
        }
    }

    #[test]
    fn test_zero_stripes_still_resolves_one_slot() {
        let mut rng = SeededRng::from_seed(3);
        let p = resolve_palette(
            &ColorSpec::Random,
            &ColorSpec::Random,
            PaletteTheme::Monochrome,
            1.0,
            0,
            &mut rng,
        );
        assert_eq!(p.stripe_colors.len(), 1);
    }

    #[test]
    fn test_intensity_applied_to_every_slot() {
        let mut rng = SeededRng::from_seed(1);
        let p = resolve_palette(
            &ColorSpec::Literal("#ffffff".into()),
            &ColorSpec::Literal("#ffffff".into()),
            PaletteTheme::Classic,
            0.5,
            2,
            &mut rng,
        );
        assert_eq!(p.background, Rgb::new(127, 127, 127));
        assert!(p.stripe_colors.iter().all(|&c| c == Rgb::new(127, 127, 127)));
    }

    #[test]
    fn test_random_theme_is_seed_deterministic() {
        let resolve = |seed| {
            let mut rng = SeededRng::from_seed(seed);
            resolve_palette(
                &ColorSpec::Random,
                &ColorSpec::Random,
                PaletteTheme::Random,
                0.8,
                5,
                &mut rng,
            )
        };
        let a = resolve(42);
        let b = resolve(42);
        assert_eq!(a.background, b.background);
        assert_eq!(a.stripe_colors, b.stripe_colors);
    }

    #[test]
    fn test_theme_names_round_trip() {
        for theme in PaletteTheme::ALL {
            assert_eq!(theme.name().parse::<PaletteTheme>().unwrap(), theme);
            let json = serde_json::to_string(&theme).unwrap();
            assert_eq!(json, format!("\"{}\"", theme.name()));
        }
        assert!("neon".parse::<PaletteTheme>().is_err());
    }
}

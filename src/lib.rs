//! ColorField Core - Deterministic Color-Field Painting Engine
//!
//! # The Four Laws (Non-Negotiable)
//! 1. Same Seed, Same Bitmap
//! 2. Validation Is Protective
//! 3. Bad Colors Degrade, Requests Never Abort
//! 4. Draw Order Is The Contract (palette, placement, widths)

pub mod color;
pub mod hashing;
pub mod layout;
pub mod palette;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod rng;
pub mod validation;

pub use color::Rgb;
pub use hashing::{canonical_json, compute_job_hash, compute_pixel_hash};
pub use palette::{PaletteTheme, ResolvedPalette};
pub use params::{ColorSpec, GenerateParams, WidthRange};
pub use pipeline::{GeneratedPainting, GenerationPipeline, PaintingFile, PipelineError};
pub use raster::{Canvas, StripeSpec};
pub use rng::SeededRng;
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, ViolationSeverity};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

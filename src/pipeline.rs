//! Generation Pipeline - Single Entry Point
//!
//! CRITICAL: generate_painting MUST call validate internally. No bypass.
//!
//! One seeded generator drives the whole request, consumed in a fixed
//! order: palette draws, then placement draws, then per-stripe width
//! draws. Same parameters + same seed = byte-identical bitmap.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::hashing::{compute_job_hash, compute_pixel_hash, sha256_hex};
use crate::layout::plan_positions;
use crate::palette::{resolve_palette, ResolvedPalette};
use crate::params::GenerateParams;
use crate::raster::{render, Canvas, StripeSpec};
use crate::rng::{seed_from_clock, SeededRng};
use crate::validation::{
    ValidationResult, Validator, MAX_EDGE_SOFTNESS, MAX_INTENSITY, MAX_STRIPE_COUNT,
    MIN_INTENSITY,
};
use crate::ENGINE_VERSION;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst);
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("PNG encoding failed: {0}")]
    EncodingError(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The encoded bitmap inside a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintingFile {
    pub filename: String,
    pub format: String,
    pub size: [u32; 2],
    pub data_base64: String,
    pub hash: String,
}

/// A finished painting plus everything needed to reproduce and audit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPainting {
    pub id: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    /// The seed actually used; supply it back to replay the exact bitmap.
    pub seed: u64,
    pub job_hash: String,
    pub pixel_hash: String,
    pub validation: ValidationResult,
    /// Resolved colors, so silent literal-color fallbacks stay observable.
    pub palette: ResolvedPalette,
    pub stripes: Vec<StripeSpec>,
    pub file: PaintingFile,
}

/// The generation pipeline - single entry point for all painting operations
pub struct GenerationPipeline {
    validator: Validator,
}

impl GenerationPipeline {
    pub fn new() -> Self {
        Self {
            validator: Validator::new(),
        }
    }

    /// Validate painting parameters.
    ///
    /// This is the ONLY validation entry point.
    pub fn validate_params(&self, params: &GenerateParams) -> ValidationResult {
        #[cfg(feature = "test-hooks")]
        VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        self.validator.validate(params)
    }

    /// Rasterize with an explicit seed, assuming pre-validated parameters.
    ///
    /// Debug builds assert the validated ranges; release builds trust the
    /// caller (the documented contract of the generation core).
    pub fn render_canvas(&self, params: &GenerateParams, seed: u64) -> Canvas {
        self.run(params, seed).0
    }

    /// Validate and rasterize, returning just the bitmap.
    pub fn generate_canvas(&self, params: &GenerateParams) -> Result<Canvas, PipelineError> {
        let validation = self.validate_params(params);
        if !validation.valid {
            return Err(PipelineError::ValidationFailed(violation_summary(&validation)));
        }
        let seed = params.seed.unwrap_or_else(seed_from_clock);
        Ok(self.render_canvas(params, seed))
    }

    /// Generate a painting with its full manifest.
    ///
    /// CRITICAL: This ALWAYS calls validate_params internally. No bypass possible.
    pub fn generate_painting(
        &self,
        params: &GenerateParams,
    ) -> Result<GeneratedPainting, PipelineError> {
        // MANDATORY: Validation is always called. This is non-negotiable.
        let validation = self.validate_params(params);
        if !validation.valid {
            return Err(PipelineError::ValidationFailed(violation_summary(&validation)));
        }

        let seed = params.seed.unwrap_or_else(seed_from_clock);
        let (canvas, palette, stripes) = self.run(params, seed);

        let png = canvas.encode_png()?;
        let job_hash = compute_job_hash(params, ENGINE_VERSION)?;
        let pixel_hash = compute_pixel_hash(&canvas);

        let id = Uuid::new_v4().to_string();
        let file = PaintingFile {
            filename: format!("{id}.png"),
            format: "png".to_string(),
            size: [canvas.width(), canvas.height()],
            hash: sha256_hex(&png),
            data_base64: base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                &png,
            ),
        };

        Ok(GeneratedPainting {
            id,
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            seed,
            job_hash,
            pixel_hash,
            validation,
            palette,
            stripes,
            file,
        })
    }

    fn run(&self, params: &GenerateParams, seed: u64) -> (Canvas, ResolvedPalette, Vec<StripeSpec>) {
        debug_assert!(params.width > 0 && params.height > 0);
        debug_assert!(params.stripe_count <= MAX_STRIPE_COUNT);
        debug_assert!((MIN_INTENSITY..=MAX_INTENSITY).contains(&params.intensity));
        debug_assert!(params.edge_softness <= MAX_EDGE_SOFTNESS);
        debug_assert!(
            params.stripe_width_range.min >= 1
                && params.stripe_width_range.min <= params.stripe_width_range.max
        );

        let mut rng = SeededRng::from_seed(seed);

        let palette = resolve_palette(
            &params.background,
            &params.stripe_color,
            params.palette,
            params.intensity,
            params.stripe_count,
            &mut rng,
        );

        let positions = plan_positions(
            params.width,
            params.stripe_count,
            params.asymmetric,
            &mut rng,
        );

        let (canvas, stripes) = render(
            params.width,
            params.height,
            palette.background,
            &positions,
            &palette.stripe_colors,
            params.stripe_width_range,
            params.edge_softness,
            &mut rng,
        );

        (canvas, palette, stripes)
    }
}

impl Default for GenerationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn violation_summary(validation: &ValidationResult) -> String {
    validation
        .violations
        .iter()
        .map(|v| format!("{}: {}", v.rule, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

//! Stripe Placement
//!
//! Plans the horizontal centers of the vertical stripes. Symmetric layout
//! is fully deterministic and consumes no randomness. Asymmetric layout
//! draws candidates and rejects any that land in a forbidden zone (left
//! edge, dead center, right edge) or too close to an accepted center; the
//! rejection loop is capped, and a short result is a documented non-fatal
//! degradation, not an error.
//!
//! Widths are not decided here. They are drawn per stripe at paint time,
//! after all placement draws.

use crate::rng::SeededRng;

/// Symmetric layout keeps centers inside [0.2w, 0.8w].
const MARGIN_FRACTION: f64 = 0.2;

/// Asymmetric candidates are drawn from [0.15w, 0.85w].
const CANDIDATE_LOW: f64 = 0.15;
const CANDIDATE_HIGH: f64 = 0.85;

/// No-go regions for asymmetric centers, as fractions of canvas width.
/// Keeping stripes off the edges and out of the center biases the
/// composition toward tense, off-balance arrangements.
const FORBIDDEN_ZONES: [(f64, f64); 3] = [(0.0, 0.10), (0.45, 0.55), (0.90, 1.00)];

/// Minimum spacing between accepted centers, as a fraction of width.
const MIN_SPACING_FRACTION: f64 = 0.10;

/// Total candidate draws before giving up. Bounds worst-case latency on
/// pathological requests (narrow canvas, many stripes).
const PLACEMENT_ATTEMPTS: u32 = 100;

/// Plan stripe centers, in order of acceptance.
///
/// Returns up to `stripe_count` centers; asymmetric placement may return
/// fewer when the attempt budget runs out.
pub fn plan_positions(
    canvas_width: u32,
    stripe_count: u32,
    asymmetric: bool,
    rng: &mut SeededRng,
) -> Vec<u32> {
    if stripe_count == 0 {
        return Vec::new();
    }
    if asymmetric {
        plan_asymmetric(canvas_width, stripe_count, rng)
    } else {
        plan_symmetric(canvas_width, stripe_count)
    }
}

fn plan_symmetric(canvas_width: u32, stripe_count: u32) -> Vec<u32> {
    if stripe_count == 1 {
        return vec![canvas_width / 2];
    }
    let width = f64::from(canvas_width);
    let margin = width * MARGIN_FRACTION;
    let spacing = (width - 2.0 * margin) / f64::from(stripe_count - 1);
    (0..stripe_count)
        .map(|i| (margin + f64::from(i) * spacing) as u32)
        .collect()
}

fn plan_asymmetric(canvas_width: u32, stripe_count: u32, rng: &mut SeededRng) -> Vec<u32> {
    let width = f64::from(canvas_width);
    let lo = (width * CANDIDATE_LOW) as i64;
    let hi = (width * CANDIDATE_HIGH) as i64;
    let min_spacing = width * MIN_SPACING_FRACTION;

    let mut centers: Vec<u32> = Vec::with_capacity(stripe_count as usize);
    let mut attempts = 0;
    while centers.len() < stripe_count as usize && attempts < PLACEMENT_ATTEMPTS {
        attempts += 1;
        let x = rng.range_inclusive(lo, hi);
        let xf = x as f64;

        let in_forbidden = FORBIDDEN_ZONES
            .iter()
            .any(|&(start, end)| xf >= start * width && xf <= end * width);
        if in_forbidden {
            continue;
        }
        let too_close = centers
            .iter()
            .any(|&existing| (xf - f64::from(existing)).abs() < min_spacing);
        if too_close {
            continue;
        }
        centers.push(x as u32);
    }
    centers
}

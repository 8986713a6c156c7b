//! Rasterization - Background Fill and Stripe Painting
//!
//! Paints the background, then composites each planned stripe in order.
//! Edge softness 0 is a hard replace; softness s > 0 ramps linearly from
//! the underlying pixel at the stripe boundary to full stripe color s
//! columns inside it, blending against whatever is already on the canvas
//! so overlapping soft stripes compound. Later stripes always paint over
//! earlier ones.
//!
//! Stripe widths are drawn here, one per planned center, after all
//! placement draws. That keeps the request's entropy consumption in a
//! fixed order: palette, then placement, then widths.

use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::params::WidthRange;
use crate::rng::SeededRng;

/// A row-major grid of RGB pixels. Mutable only while the rasterizer is
/// painting; read-only once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    fn set(&mut self, x: u32, y: u32, color: Rgb) {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = color;
    }

    /// Raw RGB bytes, row-major, three bytes per pixel. This is the byte
    /// stream the pixel hash is computed over.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.r, p.g, p.b]);
        }
        bytes
    }

    /// Encode the canvas as a PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let img = image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixel(x, y);
            image::Rgb([p.r, p.g, p.b])
        });
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img).write_to(&mut buf, image::ImageOutputFormat::Png)?;
        Ok(buf.into_inner())
    }
}

/// One painted stripe, recorded for the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeSpec {
    pub center: u32,
    pub width: u32,
    pub color: Rgb,
}

/// Paint the full composition.
///
/// `centers` come from the layout planner in acceptance order; stripe i
/// takes `stripe_colors[i % len]`. Returns the finished canvas and the
/// per-stripe record of what was actually painted.
#[allow(clippy::too_many_arguments)]
pub fn render(
    canvas_width: u32,
    canvas_height: u32,
    background: Rgb,
    centers: &[u32],
    stripe_colors: &[Rgb],
    width_range: WidthRange,
    edge_softness: u32,
    rng: &mut SeededRng,
) -> (Canvas, Vec<StripeSpec>) {
    debug_assert!(canvas_width > 0 && canvas_height > 0);
    debug_assert!(centers.is_empty() || !stripe_colors.is_empty());

    let mut canvas = Canvas::filled(canvas_width, canvas_height, background);
    let mut stripes = Vec::with_capacity(centers.len());

    for (i, &center) in centers.iter().enumerate() {
        let width = rng.range_inclusive(i64::from(width_range.min), i64::from(width_range.max)) as u32;
        let color = stripe_colors[i % stripe_colors.len()];

        let half = i64::from(width / 2);
        let left = (i64::from(center) - half).max(0) as u32;
        let right = (i64::from(center) + half).min(i64::from(canvas_width)) as u32;

        if edge_softness == 0 {
            paint_hard(&mut canvas, left, right, color);
        } else {
            paint_soft(&mut canvas, left, right, color, edge_softness);
        }

        stripes.push(StripeSpec { center, width, color });
    }

    (canvas, stripes)
}

fn paint_hard(canvas: &mut Canvas, left: u32, right: u32, color: Rgb) {
    for x in left..right {
        for y in 0..canvas.height() {
            canvas.set(x, y, color);
        }
    }
}

fn paint_soft(canvas: &mut Canvas, left: u32, right: u32, color: Rgb, softness: u32) {
    for x in left..right {
        let edge_distance = (x - left).min(right - x);
        let alpha = if edge_distance < softness {
            f64::from(edge_distance) / f64::from(softness)
        } else {
            1.0
        };
        for y in 0..canvas.height() {
            let blended = canvas.pixel(x, y).blend_toward(color, alpha);
            canvas.set(x, y, blended);
        }
    }
}

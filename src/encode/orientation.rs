//! Gradient-orientation encoding masked by gradient magnitude.
//!
//! Each surviving pixel gets `2 + bin`, where `bin` is the gradient direction
//! quantized into `angle_steps` equal sectors of [0, 360). Code 0 marks
//! pixels that were masked out or lie on the border ring.

use crate::image::gradient::derivatives;
use crate::image::{ImageView, OwnedImage};
use crate::params::Parameters;
use crate::util::math::atan2_deg;

/// Value added to the angle bin so that codes never collide with 0 or 1.
pub const ORIENTATION_CODE_OFFSET: u8 = 2;

/// Maps an angle in degrees `[0, 360)` to an orientation code.
pub fn quantize_angle(angle_deg: f32, angle_steps: u32) -> u8 {
    let steps = angle_steps.max(1);
    let bin = ((angle_deg / 360.0) * steps as f32).floor() as i64;
    let bin = bin.rem_euclid(steps as i64) as u32;
    (bin as u8).saturating_add(ORIENTATION_CODE_OFFSET)
}

/// Encodes the quantized gradient direction of every interior pixel.
///
/// The input is differentiated as-is; apply the pre-blur first (see
/// [`preprocess`](crate::encode::preprocess)).
pub fn encode_orientation(src: ImageView<'_, u8>, params: &Parameters) -> OwnedImage<u8> {
    let width = src.width();
    let height = src.height();
    let mut out = OwnedImage::zeros(width, height);
    if width < 3 || height < 3 {
        return out;
    }

    let (gx, gy) = derivatives(src, params.ksobel);
    let mag: Vec<f32> = gx
        .data()
        .iter()
        .zip(gy.data())
        .map(|(&x, &y)| x.hypot(y))
        .collect();

    // the maximum spans the whole frame, border ring included
    let cutoff = params.mag_threshold().map(|frac| {
        let max_mag = mag.iter().copied().fold(0.0f32, f32::max);
        frac as f32 * max_mag
    });

    let steps = params.angle_steps();
    let dst = out.data_mut();
    for (x, y) in interior(width, height) {
        let idx = y * width + x;
        // zero gradients have no direction; drop them whenever masking is on
        if cutoff.is_some_and(|c| mag[idx] < c || mag[idx] == 0.0) {
            continue;
        }
        let angle = atan2_deg(gy.data()[idx], gx.data()[idx]);
        dst[idx] = quantize_angle(angle, steps);
    }
    out
}

fn interior(width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..height - 1).flat_map(move |y| (1..width - 1).map(move |x| (x, y)))
}

//! Per-pixel feature encoders.
//!
//! Every encoder maps a grayscale image to a same-size byte image whose
//! outermost one-pixel ring is always zero. The neighbor encoders compare a
//! pixel with its 8-neighborhood; the orientation encoder quantizes the
//! gradient direction.

use crate::image::blur::blur;
use crate::image::{ImageView, OwnedImage};
use crate::params::Parameters;
use crate::table::set::{Membership, N8_4ADJ};

pub mod neighbors;
pub mod orientation;

pub use neighbors::{encode_gt, encode_gt_range, encode_lt, NEIGHBOR_OFFSETS};
pub use orientation::{encode_orientation, quantize_angle, ORIENTATION_CODE_OFFSET};

/// Encoder selection. A vote table only makes sense against images encoded
/// with the mode it was built with, so the mode is stored in the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EncodeMode {
    /// Center greater than neighbor.
    #[default]
    GreaterThan,
    /// Center smaller than neighbor.
    LessThan,
    /// Greater-than gated by the 3x3 intensity range.
    GreaterThanRange(u8),
    /// Quantized gradient orientation masked by magnitude.
    Orientation,
}

impl EncodeMode {
    /// Encodes an already preprocessed image.
    pub fn encode(&self, src: ImageView<'_, u8>, params: &Parameters) -> OwnedImage<u8> {
        match *self {
            EncodeMode::GreaterThan => encode_gt(src),
            EncodeMode::LessThan => encode_lt(src),
            EncodeMode::GreaterThanRange(thr) => encode_gt_range(src, thr),
            EncodeMode::Orientation => encode_orientation(src, params),
        }
    }

    /// The membership normally paired with this mode.
    pub fn default_membership(&self) -> Membership {
        match self {
            EncodeMode::Orientation => Membership::AllNonzero,
            _ => Membership::AdjacentBits(N8_4ADJ),
        }
    }
}

/// Applies the pre-blur configured in `params`.
pub fn preprocess(src: ImageView<'_, u8>, params: &Parameters) -> OwnedImage<u8> {
    blur(src, params.kblur, params.blur_kind)
}

/// Pre-blurs and encodes `src`; used identically for templates and frames.
pub fn encode_with_params(
    src: ImageView<'_, u8>,
    params: &Parameters,
    mode: EncodeMode,
) -> OwnedImage<u8> {
    let prepared = preprocess(src, params);
    mode.encode(prepared.view(), params)
}

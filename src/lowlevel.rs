//! Low-level building blocks for custom pipelines.
//!
//! These expose the individual encoders, filters and sweeps used by
//! [`Matcher`](crate::Matcher). Most users should prefer the top-level
//! `VoteTable` and `Matcher` types.

pub use crate::encode::{
    encode_gt, encode_gt_range, encode_lt, encode_orientation, preprocess, quantize_angle,
    NEIGHBOR_OFFSETS, ORIENTATION_CODE_OFFSET,
};
pub use crate::image::blur::blur;
pub use crate::image::gradient::{derivatives, DerivKernel};
pub use crate::peak::{nms_2d, TopK};
pub use crate::table::Reach;
pub use crate::vote::{bounded_region, vote_all_pixels, vote_bounded, SweepRegion};
#[cfg(feature = "rayon")]
pub use crate::vote::rayon::{vote_all_pixels_par, vote_bounded_par};

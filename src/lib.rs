//! BGHMatch locates a reference shape in grayscale images with a Generalized
//! Hough Transform driven by per-pixel binary-gradient codes.
//!
//! Pipeline: a template is pre-blurred and encoded into a byte image
//! ([`encode`]), the codes selected by a [`MembershipSet`] are tabulated into a
//! [`VoteTable`] of weighted offsets to the template center, and live frames
//! encoded the same way are swept against the table ([`vote`]) to build an
//! accumulator whose maxima mark candidate matches. Row-parallel sweeps are
//! available with the `rayon` feature.

pub mod encode;
pub mod image;
pub mod lowlevel;
pub mod params;
pub mod peak;
pub mod search;
pub mod table;
mod trace;
pub mod util;
pub mod vote;

pub use encode::{encode_with_params, EncodeMode};
pub use crate::image::blur::BlurKind;
#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{ImageView, OwnedImage};
pub use params::Parameters;
pub use peak::{find_max, find_peaks, Peak};
pub use search::{Match, MatchConfig, Matcher};
pub use table::{Membership, MembershipSet, Offset, Vote, VoteTable, N8_4ADJ, N8_4OR5, N8_5ADJ};
pub use util::{BghError, BghResult};
pub use vote::{vote, SweepPolicy, VoteCell};

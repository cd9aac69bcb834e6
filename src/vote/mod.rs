//! Voting transform: replay a [`VoteTable`] against an encoded image.
//!
//! Every pixel whose code has entries adds each entry's weight to the cell at
//! `pixel + offset`. The accumulator starts at zero and is only ever added
//! to, so the result does not depend on traversal order. Two boundary
//! policies are available:
//!
//! - [`SweepPolicy::Bounded`] only visits source pixels whose every vote is
//!   guaranteed to land inside the image, skipping per-vote checks.
//! - [`SweepPolicy::AllPixels`] visits the full interior and drops votes that
//!   would fall outside the accumulator.

use crate::image::{ImageView, OwnedImage};
use crate::table::VoteTable;

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use scalar::{vote_all_pixels, vote_bounded};

/// Accumulator cell type.
///
/// `u16` saturates instead of wrapping; floating-point cells are exact as
/// long as the totals stay within the mantissa.
pub trait VoteCell: Copy + Default + PartialOrd + Send + Sync + 'static {
    /// Adds a vote weight to the cell.
    fn add_weight(&mut self, weight: u32);
    /// Adds another cell (used when merging partial accumulators).
    fn merge(&mut self, other: Self);
    /// Converts the cell to `f64` for scoring.
    fn to_f64(self) -> f64;
}

impl VoteCell for u16 {
    #[inline]
    fn add_weight(&mut self, weight: u32) {
        *self = self.saturating_add(u16::try_from(weight).unwrap_or(u16::MAX));
    }
    #[inline]
    fn merge(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl VoteCell for u32 {
    #[inline]
    fn add_weight(&mut self, weight: u32) {
        *self = self.saturating_add(weight);
    }
    #[inline]
    fn merge(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl VoteCell for f32 {
    #[inline]
    fn add_weight(&mut self, weight: u32) {
        *self += weight as f32;
    }
    #[inline]
    fn merge(&mut self, other: Self) {
        *self += other;
    }
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl VoteCell for f64 {
    #[inline]
    fn add_weight(&mut self, weight: u32) {
        *self += f64::from(weight);
    }
    #[inline]
    fn merge(&mut self, other: Self) {
        *self += other;
    }
    fn to_f64(self) -> f64 {
        self
    }
}

/// Boundary handling for the voting sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepPolicy {
    /// Visit only the region where every vote lands in bounds.
    Bounded,
    /// Visit the full interior and range-check each vote.
    #[default]
    AllPixels,
}

/// Half-open rectangle of source pixels `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepRegion {
    /// First visited column.
    pub x0: usize,
    /// One past the last visited column.
    pub x1: usize,
    /// First visited row.
    pub y0: usize,
    /// One past the last visited row.
    pub y1: usize,
}

impl SweepRegion {
    const EMPTY: SweepRegion = SweepRegion {
        x0: 0,
        x1: 0,
        y0: 0,
        y1: 0,
    };

    /// Number of pixels in the region.
    pub fn area(&self) -> usize {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }

    /// Returns true if the region holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

/// Source region visited by the bounded sweep on a `width x height` image.
///
/// For a template of size `tw x th` the region starts at `(tw / 2, th / 2)`
/// and spans `(width - tw) x (height - th)` pixels; it is empty unless the
/// image is strictly larger than the template in both axes. Tables built with
/// a scale above 1 can reach further than half the template, in which case
/// the region shrinks so every vote still lands in bounds.
pub fn bounded_region(table: &VoteTable, width: usize, height: usize) -> SweepRegion {
    let (tw, th) = table.size();
    if width <= tw || height <= th {
        return SweepRegion::EMPTY;
    }
    let reach = table.reach();
    let (x0, x1) = axis_range(width, tw, reach.min_dx, reach.max_dx);
    let (y0, y1) = axis_range(height, th, reach.min_dy, reach.max_dy);
    if x0 >= x1 || y0 >= y1 {
        return SweepRegion::EMPTY;
    }
    SweepRegion { x0, x1, y0, y1 }
}

fn axis_range(dim: usize, tdim: usize, min_d: i32, max_d: i32) -> (usize, usize) {
    let dim = dim as i64;
    let tdim = tdim as i64;
    let lo = (tdim / 2).max(-i64::from(min_d)).max(0);
    let hi = (dim - tdim + tdim / 2).min(dim - i64::from(max_d)).min(dim);
    (lo as usize, hi.max(lo) as usize)
}

/// Runs the sweep selected by `policy`.
pub fn vote<T: VoteCell>(
    encoded: ImageView<'_, u8>,
    table: &VoteTable,
    policy: SweepPolicy,
) -> OwnedImage<T> {
    match policy {
        SweepPolicy::Bounded => vote_bounded(encoded, table),
        SweepPolicy::AllPixels => vote_all_pixels(encoded, table),
    }
}

#[cfg(test)]
mod tests {
    use super::{bounded_region, VoteCell};
    use crate::encode::EncodeMode;
    use crate::params::Parameters;
    use crate::table::{Offset, Vote, VoteTable};

    #[test]
    fn u16_cells_saturate() {
        let mut cell = u16::MAX - 1;
        cell.add_weight(5);
        assert_eq!(cell, u16::MAX);
        let mut cell = 0u16;
        cell.add_weight(100_000);
        assert_eq!(cell, u16::MAX);
    }

    #[test]
    fn float_cells_accumulate() {
        let mut cell = 0.0f32;
        cell.add_weight(3);
        cell.merge(2.0);
        assert_eq!(cell.to_f64(), 5.0);
    }

    #[test]
    fn bounded_region_matches_template_margin() {
        let table = VoteTable::from_votes(
            (7, 5),
            Parameters::default(),
            EncodeMode::GreaterThan,
            [(
                15u8,
                Vote {
                    offset: Offset::new(3, -2),
                    weight: 1,
                },
            )],
        )
        .unwrap();
        let region = bounded_region(&table, 20, 10);
        assert_eq!((region.x0, region.x1), (3, 16));
        assert_eq!((region.y0, region.y1), (2, 7));
        assert_eq!(region.area(), (20 - 7) * (10 - 5));

        assert!(bounded_region(&table, 7, 10).is_empty());
        assert!(bounded_region(&table, 20, 4).is_empty());
    }

    #[test]
    fn bounded_region_shrinks_for_long_offsets() {
        let table = VoteTable::from_votes(
            (5, 5),
            Parameters::default(),
            EncodeMode::GreaterThan,
            [(
                1u8,
                Vote {
                    offset: Offset::new(-8, 0),
                    weight: 1,
                },
            )],
        )
        .unwrap();
        let region = bounded_region(&table, 20, 20);
        assert_eq!(region.x0, 8);
        assert_eq!(region.x1, 17);
    }
}

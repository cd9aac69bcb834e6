//! Rayon-parallel voting sweeps (feature-gated).
//!
//! Source rows are split across workers. Each worker folds its rows into a
//! private accumulator and the partial accumulators are summed at the end, so
//! the shared table is only ever read. Integer results are identical to the
//! sequential sweeps.

use crate::image::{ImageView, OwnedImage};
use crate::table::VoteTable;
use crate::trace::trace_span;
use crate::vote::scalar::{sweep_row_bounded, sweep_row_checked};
use crate::vote::{bounded_region, VoteCell};
use rayon::prelude::*;

/// Row-parallel version of [`vote_bounded`](crate::vote::vote_bounded).
pub fn vote_bounded_par<T: VoteCell>(
    encoded: ImageView<'_, u8>,
    table: &VoteTable,
) -> OwnedImage<T> {
    let width = encoded.width();
    let height = encoded.height();
    let _span =
        trace_span!("vote_par", policy = "bounded", width = width, height = height).entered();

    let region = bounded_region(table, width, height);
    let data = fold_rows(width * height, region.y0..region.y1, |y, acc| {
        if let Some(codes) = encoded.row(y) {
            sweep_row_bounded(codes, y, &region, table, acc, width);
        }
    });
    into_image(data, width, height)
}

/// Row-parallel version of [`vote_all_pixels`](crate::vote::vote_all_pixels).
pub fn vote_all_pixels_par<T: VoteCell>(
    encoded: ImageView<'_, u8>,
    table: &VoteTable,
) -> OwnedImage<T> {
    let width = encoded.width();
    let height = encoded.height();
    let _span =
        trace_span!("vote_par", policy = "all_pixels", width = width, height = height).entered();

    if width < 3 || height < 3 {
        return OwnedImage::zeros(width, height);
    }
    let data = fold_rows(width * height, 1..height - 1, |y, acc| {
        if let Some(codes) = encoded.row(y) {
            sweep_row_checked(codes, y, table, acc, width, height);
        }
    });
    into_image(data, width, height)
}

fn fold_rows<T, F>(len: usize, rows: std::ops::Range<usize>, sweep: F) -> Vec<T>
where
    T: VoteCell,
    F: Fn(usize, &mut [T]) + Sync,
{
    rows.into_par_iter()
        .fold(
            || vec![T::default(); len],
            |mut acc, y| {
                sweep(y, &mut acc);
                acc
            },
        )
        .reduce(
            || vec![T::default(); len],
            |mut a, b| {
                for (dst, src) in a.iter_mut().zip(b) {
                    dst.merge(src);
                }
                a
            },
        )
}

fn into_image<T: VoteCell>(data: Vec<T>, width: usize, height: usize) -> OwnedImage<T> {
    OwnedImage::from_vec(data, width, height).unwrap_or_else(|_| OwnedImage::zeros(width, height))
}

//! Sequential voting sweeps.

use crate::image::{ImageView, OwnedImage};
use crate::table::VoteTable;
use crate::trace::{trace_debug, trace_span};
use crate::vote::{bounded_region, SweepRegion, VoteCell};

/// Bounded sweep: no per-vote range checks.
///
/// Only source pixels inside [`bounded_region`] vote, so coverage near the
/// border shrinks with the template size.
pub fn vote_bounded<T: VoteCell>(encoded: ImageView<'_, u8>, table: &VoteTable) -> OwnedImage<T> {
    let width = encoded.width();
    let height = encoded.height();
    let _span = trace_span!("vote", policy = "bounded", width = width, height = height).entered();

    let mut acc = OwnedImage::zeros(width, height);
    let region = bounded_region(table, width, height);
    for y in region.y0..region.y1 {
        if let Some(codes) = encoded.row(y) {
            sweep_row_bounded(codes, y, &region, table, acc.data_mut(), width);
        }
    }
    trace_debug!("sweep_done", visited = region.area());
    acc
}

/// All-pixel sweep: visits the whole interior and drops out-of-range votes.
pub fn vote_all_pixels<T: VoteCell>(
    encoded: ImageView<'_, u8>,
    table: &VoteTable,
) -> OwnedImage<T> {
    let width = encoded.width();
    let height = encoded.height();
    let _span =
        trace_span!("vote", policy = "all_pixels", width = width, height = height).entered();

    let mut acc = OwnedImage::zeros(width, height);
    if width < 3 || height < 3 {
        return acc;
    }
    for y in 1..height - 1 {
        if let Some(codes) = encoded.row(y) {
            sweep_row_checked(codes, y, table, acc.data_mut(), width, height);
        }
    }
    acc
}

#[inline]
pub(crate) fn sweep_row_bounded<T: VoteCell>(
    codes: &[u8],
    y: usize,
    region: &SweepRegion,
    table: &VoteTable,
    acc: &mut [T],
    width: usize,
) {
    for x in region.x0..region.x1 {
        for vote in table.votes(codes[x]) {
            let tx = (x as isize + vote.offset.dx as isize) as usize;
            let ty = (y as isize + vote.offset.dy as isize) as usize;
            acc[ty * width + tx].add_weight(vote.weight);
        }
    }
}

#[inline]
pub(crate) fn sweep_row_checked<T: VoteCell>(
    codes: &[u8],
    y: usize,
    table: &VoteTable,
    acc: &mut [T],
    width: usize,
    height: usize,
) {
    let w = width as i64;
    let h = height as i64;
    for x in 1..width - 1 {
        for vote in table.votes(codes[x]) {
            let tx = x as i64 + i64::from(vote.offset.dx);
            let ty = y as i64 + i64::from(vote.offset.dy);
            if tx < 0 || ty < 0 || tx >= w || ty >= h {
                continue;
            }
            acc[(ty * w + tx) as usize].add_weight(vote.weight);
        }
    }
}

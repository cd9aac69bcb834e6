//! Peak extraction from vote accumulators.
//!
//! Includes the global maximum, Top-K collection of local maxima and spatial
//! non-maximum suppression.

pub(crate) mod nms;
pub(crate) mod topk;

use crate::image::OwnedImage;
use crate::vote::VoteCell;

pub use nms::nms_2d;
pub use topk::{Peak, TopK};

/// Returns the first cell holding the global maximum, in row-major order.
///
/// An all-zero accumulator yields `None`: no pixel voted, so there is no
/// reliable location.
pub fn find_max<T: VoteCell>(acc: &OwnedImage<T>) -> Option<Peak> {
    let width = acc.width();
    let mut best: Option<(usize, T)> = None;
    for (idx, &value) in acc.data().iter().enumerate() {
        if value > T::default() && best.map_or(true, |(_, b)| value > b) {
            best = Some((idx, value));
        }
    }
    best.map(|(idx, value)| Peak {
        x: idx % width,
        y: idx / width,
        votes: value.to_f64(),
    })
}

/// Collects up to `k` local maxima and suppresses those within `nms_radius`
/// (Chebyshev distance) of a stronger one.
///
/// A local maximum is a nonzero cell not smaller than any of its 8 neighbors.
pub fn find_peaks<T: VoteCell>(acc: &OwnedImage<T>, k: usize, nms_radius: usize) -> Vec<Peak> {
    let width = acc.width();
    let height = acc.height();
    // gather extra candidates so suppression can still return k peaks
    let mut topk = TopK::new(k.saturating_mul(4).max(k));
    for y in 0..height {
        let Some(row) = acc.row(y) else {
            continue;
        };
        for (x, &value) in row.iter().enumerate() {
            if value <= T::default() || !is_local_max(acc, x, y, value) {
                continue;
            }
            topk.push(Peak {
                x,
                y,
                votes: value.to_f64(),
            });
        }
    }
    let mut peaks = topk.into_sorted_desc();
    let mut kept = nms_2d(&mut peaks, nms_radius);
    kept.truncate(k);
    kept
}

fn is_local_max<T: VoteCell>(acc: &OwnedImage<T>, x: usize, y: usize, value: T) -> bool {
    let x0 = x.saturating_sub(1);
    let y0 = y.saturating_sub(1);
    let x1 = (x + 1).min(acc.width() - 1);
    let y1 = (y + 1).min(acc.height() - 1);
    for ny in y0..=y1 {
        for nx in x0..=x1 {
            if let Some(&n) = acc.get(nx, ny) {
                if n > value {
                    return false;
                }
            }
        }
    }
    true
}

//! Non-maximum suppression for accumulator peaks.

use crate::peak::topk::{sort_peaks_desc, Peak};

/// Keeps peaks farther than `radius` (Chebyshev distance) from every
/// stronger kept peak. Output is sorted by descending votes.
pub fn nms_2d(peaks: &mut [Peak], radius: usize) -> Vec<Peak> {
    sort_peaks_desc(peaks);
    if radius == 0 {
        return peaks.to_owned();
    }

    let mut kept: Vec<Peak> = Vec::new();
    'outer: for peak in peaks.iter().copied() {
        for other in kept.iter() {
            let dx = peak.x.abs_diff(other.x);
            let dy = peak.y.abs_diff(other.y);
            if dx.max(dy) <= radius {
                continue 'outer;
            }
        }
        kept.push(peak);
    }
    kept
}

//! 8-neighbor comparison encoders.
//!
//! Bit index convention for the neighbors of a center pixel `*`
//! (rows grow downward):
//!
//! ```text
//! 5 6 7
//! 4 * 0
//! 3 2 1
//! ```

use crate::image::{ImageView, OwnedImage};

/// `(dx, dy)` of the neighbor assigned to each bit.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Sets bit `k` where the center is strictly greater than neighbor `k`.
///
/// A code of 255 marks a strict local maximum.
pub fn encode_gt<T: Copy + PartialOrd>(src: ImageView<'_, T>) -> OwnedImage<u8> {
    encode_with(src, |center, neighbor| center > neighbor, |_| true)
}

/// Sets bit `k` where the center is strictly smaller than neighbor `k`.
///
/// A code of 255 marks a strict local minimum.
pub fn encode_lt<T: Copy + PartialOrd>(src: ImageView<'_, T>) -> OwnedImage<u8> {
    encode_with(src, |center, neighbor| center < neighbor, |_| true)
}

/// Greater-than encoding restricted to textured neighborhoods.
///
/// A pixel keeps its code only when `max - min` over its 3x3 neighborhood is
/// at least `range_thr`; `range_thr == 0` is identical to [`encode_gt`].
pub fn encode_gt_range(src: ImageView<'_, u8>, range_thr: u8) -> OwnedImage<u8> {
    encode_with(
        src,
        |center, neighbor| center > neighbor,
        |window| {
            let (lo, hi) = window
                .iter()
                .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            hi - lo >= range_thr
        },
    )
}

/// Shared traversal: `window[0]` is the center, `window[1 + k]` neighbor `k`.
fn encode_with<T, C, G>(src: ImageView<'_, T>, cmp: C, gate: G) -> OwnedImage<u8>
where
    T: Copy,
    C: Fn(T, T) -> bool,
    G: Fn(&[T; 9]) -> bool,
{
    let width = src.width();
    let height = src.height();
    let mut out = OwnedImage::zeros(width, height);
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        let (Some(prev), Some(cur), Some(next)) = (src.row(y - 1), src.row(y), src.row(y + 1))
        else {
            continue;
        };
        let Some(dst) = out.row_mut(y) else {
            continue;
        };
        for x in 1..width - 1 {
            let window = [
                cur[x],
                cur[x + 1],
                next[x + 1],
                next[x],
                next[x - 1],
                cur[x - 1],
                prev[x - 1],
                prev[x],
                prev[x + 1],
            ];
            if !gate(&window) {
                continue;
            }
            let center = window[0];
            let mut code = 0u8;
            for (bit, &neighbor) in window[1..].iter().enumerate() {
                if cmp(center, neighbor) {
                    code |= 1 << bit;
                }
            }
            dst[x] = code;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{encode_gt, encode_gt_range, encode_lt, NEIGHBOR_OFFSETS};
    use crate::image::ImageView;

    fn single_spot(value: u8, background: u8) -> Vec<u8> {
        let mut data = vec![background; 25];
        data[2 * 5 + 2] = value;
        data
    }

    #[test]
    fn local_maximum_encodes_255() {
        let data = single_spot(200, 10);
        let view = ImageView::from_slice(&data, 5, 5).unwrap();
        let gt = encode_gt(view);
        assert_eq!(gt.get(2, 2).copied(), Some(255));
        assert_eq!(encode_lt(view).get(2, 2).copied(), Some(0));
    }

    #[test]
    fn dark_center_sets_bits_only_under_lt() {
        // a neighbor brighter than the center sets its bit in LT, never in GT
        let mut data = vec![255u8; 81];
        data[4 * 9 + 4] = 0;
        let view = ImageView::from_slice(&data, 9, 9).unwrap();
        assert_eq!(encode_gt(view).get(4, 4).copied(), Some(0));
        assert_eq!(encode_lt(view).get(4, 4).copied(), Some(255));
    }

    #[test]
    fn neighbor_bits_follow_compass_layout() {
        let data = single_spot(200, 10);
        let view = ImageView::from_slice(&data, 5, 5).unwrap();
        let lt = encode_lt(view);
        // each neighbor of the bright spot is smaller than it in one direction
        for (bit, (dx, dy)) in NEIGHBOR_OFFSETS.iter().enumerate() {
            let nx = (2 - dx) as usize;
            let ny = (2 - dy) as usize;
            assert_eq!(lt.get(nx, ny).copied(), Some(1 << bit), "bit {bit}");
        }
    }

    #[test]
    fn float_images_are_supported() {
        let data = [0.0f32, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0];
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        assert_eq!(encode_lt(view).get(1, 1).copied(), Some(255));
    }

    #[test]
    fn range_gate_suppresses_flat_regions() {
        let data = single_spot(30, 10);
        let view = ImageView::from_slice(&data, 5, 5).unwrap();
        assert_eq!(encode_gt_range(view, 21).get(2, 2).copied(), Some(0));
        assert_eq!(encode_gt_range(view, 20).get(2, 2).copied(), Some(255));
        assert_eq!(encode_gt_range(view, 0), encode_gt(view));
    }

    #[test]
    fn tiny_images_are_all_zero() {
        let data = [9u8, 1, 9, 1];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        assert!(encode_gt(view).data().iter().all(|&c| c == 0));
    }
}

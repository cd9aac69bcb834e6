use bghmatch::lowlevel::{encode_gt, encode_gt_range, encode_lt};
use bghmatch::{encode_with_params, EncodeMode, ImageView, OwnedImage, Parameters};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn border_is_zero(img: &OwnedImage<u8>) -> bool {
    let (w, h) = (img.width(), img.height());
    (0..w).all(|x| img.get(x, 0) == Some(&0) && img.get(x, h - 1) == Some(&0))
        && (0..h).all(|y| img.get(0, y) == Some(&0) && img.get(w - 1, y) == Some(&0))
}

#[test]
fn border_ring_is_zero_for_random_images() {
    let mut rng = StdRng::seed_from_u64(11);
    let modes = [
        EncodeMode::GreaterThan,
        EncodeMode::LessThan,
        EncodeMode::GreaterThanRange(12),
        EncodeMode::Orientation,
    ];
    for _ in 0..20 {
        let width = rng.random_range(1..24);
        let height = rng.random_range(1..24);
        let data: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let view = ImageView::from_slice(&data, width, height).unwrap();
        let params = Parameters {
            kblur: rng.random_range(0..6),
            mag_thr: rng.random_range(0.0..1.5),
            ..Parameters::default()
        };
        for mode in modes {
            let enc = encode_with_params(view, &params, mode);
            assert_eq!((enc.width(), enc.height()), (width, height));
            assert!(border_is_zero(&enc), "{mode:?} {width}x{height}");
        }
    }
}

#[test]
fn gt_and_lt_are_complementary_without_ties() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut values: Vec<u8> = (0..=255).collect();
    values.shuffle(&mut rng);
    let view = ImageView::from_slice(&values, 16, 16).unwrap();
    let gt = encode_gt(view);
    let lt = encode_lt(view);
    for y in 1..15 {
        for x in 1..15 {
            let g = *gt.get(x, y).unwrap();
            let l = *lt.get(x, y).unwrap();
            assert_eq!(g ^ l, 0xFF, "({x},{y})");
            assert_eq!(g & l, 0, "({x},{y})");
        }
    }
}

#[test]
fn ties_clear_both_bits() {
    let data = vec![77u8; 16];
    let view = ImageView::from_slice(&data, 4, 4).unwrap();
    assert!(encode_gt(view).data().iter().all(|&c| c == 0));
    assert!(encode_lt(view).data().iter().all(|&c| c == 0));
}

#[test]
fn range_threshold_zero_matches_plain_gt() {
    let mut rng = StdRng::seed_from_u64(23);
    let data: Vec<u8> = (0..30 * 20).map(|_| rng.random()).collect();
    let view = ImageView::from_slice(&data, 30, 20).unwrap();
    assert_eq!(encode_gt_range(view, 0), encode_gt(view));
}

#[test]
fn range_gate_only_clears_codes() {
    let mut rng = StdRng::seed_from_u64(29);
    let data: Vec<u8> = (0..30 * 20).map(|_| rng.random_range(100..140)).collect();
    let view = ImageView::from_slice(&data, 30, 20).unwrap();
    let plain = encode_gt(view);
    let gated = encode_gt_range(view, 30);
    for (&p, &g) in plain.data().iter().zip(gated.data()) {
        assert!(g == p || g == 0);
    }
}

#[test]
fn local_extrema_encode_to_full_byte() {
    let mut data = vec![100u8; 49];
    data[2 * 7 + 2] = 180;
    data[4 * 7 + 4] = 20;
    let view = ImageView::from_slice(&data, 7, 7).unwrap();
    assert_eq!(encode_gt(view).get(2, 2).copied(), Some(255));
    assert_eq!(encode_lt(view).get(4, 4).copied(), Some(255));
}

use bghmatch::{BghError, ImageView, OwnedImage, Parameters};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        BghError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        BghError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];
    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        BghError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];
    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, BghError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0).copied(), Some(5u8));
    assert!(roi.get(2, 0).is_none());

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        BghError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn strided_roi_encodes_like_a_copy() {
    let data: Vec<u8> = (0..64u32).map(|v| (v * 29 % 256) as u8).collect();
    let view = ImageView::from_slice(&data, 8, 8).unwrap();
    let roi = view.roi(2, 1, 5, 6).unwrap();
    let copy = OwnedImage::from_view(roi);
    assert_eq!(
        bghmatch::lowlevel::encode_gt(roi),
        bghmatch::lowlevel::encode_gt(copy.view())
    );
}

#[test]
fn parameters_default_matches_documented_values() {
    let p = Parameters::default();
    assert_eq!(p.kblur, 7);
    assert_eq!(p.ksobel, 7);
    assert_eq!(p.scale(), 1.0);
    assert_eq!(p.mag_threshold(), Some(0.1));
    assert_eq!(p.angle_steps(), 8);
}

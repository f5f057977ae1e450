use fieldmorph::{Correspondences, Image, ImageShape, ImageView, LineSegment, MorphError, Vec2};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1, 1).err().unwrap();
    assert_eq!(
        err,
        MorphError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0, 1).err().unwrap();
    assert_eq!(
        err,
        MorphError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_channels() {
    let data = [0u8; 10];
    assert_eq!(
        ImageView::from_slice(&data, 2, 1, 5).err().unwrap(),
        MorphError::InvalidChannels { channels: 5 }
    );
    assert_eq!(
        Image::zeros(2, 2, 0).err().unwrap(),
        MorphError::InvalidChannels { channels: 0 }
    );
}

#[test]
fn image_rejects_wrong_buffer_length() {
    let err = Image::new(vec![0u8; 11], 2, 2, 3).err().unwrap();
    assert_eq!(
        err,
        MorphError::BufferSizeMismatch {
            expected: 12,
            got: 11,
        }
    );
    let data = [0u8; 13];
    let err = ImageView::from_slice(&data, 2, 2, 3).err().unwrap();
    assert_eq!(
        err,
        MorphError::BufferSizeMismatch {
            expected: 12,
            got: 13,
        }
    );
}

#[test]
fn pixel_addressing_is_row_major_interleaved() {
    let data: Vec<u8> = (0u8..24).collect();
    let img = Image::new(data.clone(), 3, 2, 4).unwrap();
    assert_eq!(
        img.shape(),
        ImageShape {
            width: 3,
            height: 2,
            channels: 4,
        }
    );
    assert_eq!(img.pixel(0, 0), &[0, 1, 2, 3]);
    assert_eq!(img.pixel(0, 2), &[8, 9, 10, 11]);
    assert_eq!(img.pixel(1, 1), &[16, 17, 18, 19]);
    assert_eq!(img.row(1).unwrap(), &data[12..24]);
    assert!(img.row(2).is_none());
    assert!(img.view().get(2, 0).is_none());
    assert!(img.view().get(0, 3).is_none());

    let mut img = img;
    img.pixel_mut(1, 2).copy_from_slice(&[9, 9, 9, 9]);
    assert_eq!(img.view().get(1, 2).unwrap(), &[9, 9, 9, 9]);
    assert_eq!(img.clone().into_raw().len(), 24);
}

#[test]
#[should_panic]
fn pixel_out_of_range_panics() {
    let img = Image::zeros(2, 2, 1).unwrap();
    let _ = img.pixel(2, 0);
}

#[test]
fn shape_display_and_same_dims() {
    let a = Image::zeros(640, 480, 4).unwrap();
    let b = Image::zeros(640, 480, 4).unwrap();
    let c = Image::zeros(640, 480, 3).unwrap();
    assert_eq!(a.shape().to_string(), "640x480x4");
    assert!(a.has_same_dims_as(&b));
    assert!(!a.has_same_dims_as(&c));
}

#[test]
fn correspondences_enforce_equal_lengths() {
    let seg = LineSegment::from_coords(0.0, 0.0, 1.0, 1.0);
    let err = Correspondences::new(vec![seg, seg], vec![seg]).err().unwrap();
    assert_eq!(
        err,
        MorphError::SegmentCountMismatch {
            source_len: 2,
            target_len: 1,
        }
    );

    let other = LineSegment::new(Vec2::new(5.0, 5.0), Vec2::new(9.0, 2.0));
    let set = Correspondences::new(vec![seg], vec![other]).unwrap();
    assert_eq!(set.len(), 1);
    let reversed = set.reversed();
    assert_eq!(reversed.source(), &[other]);
    assert_eq!(reversed.target(), &[seg]);
    assert_eq!(set.pairs().count(), 1);
}

#[test]
fn errors_describe_failed_precondition() {
    let err = MorphError::ShapeMismatch {
        context: "morph inputs",
        left: ImageShape {
            width: 4,
            height: 4,
            channels: 4,
        },
        right: ImageShape {
            width: 4,
            height: 3,
            channels: 4,
        },
    };
    assert_eq!(
        err.to_string(),
        "morph inputs: image shapes differ (4x4x4 vs 4x3x4)"
    );
    assert_eq!(
        MorphError::TruncatedCorrespondences {
            expected: 3,
            found: 2,
        }
        .to_string(),
        "expected 3 segment pairs, found 2"
    );
}

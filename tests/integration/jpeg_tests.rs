//! JPEG segment integration tests against encoder-produced streams.
//!
//! Tests verify:
//! - Splitting a real JPEG and joining the segments gives the same bytes
//! - At most one EXIF segment after any merge
//! - Placement right after APP0, or right after SOI without APP0
//! - Removal is idempotent and leaves the image decodable

use exifkit::{
    dump, find_exif_segment, merge_segments, split_segments, FormatError, TiffEncoder,
};

use super::test_utils::{
    count_exif_segments, create_test_jpeg, create_test_rgb_jpeg, fixture, is_decodable_jpeg,
    segment_markers,
};

const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const SOI: u8 = 0xD8;
const SOS: u8 = 0xDA;

fn tiff_blob() -> Vec<u8> {
    TiffEncoder::default().encode(&fixture()).unwrap()
}

/// Rebuild `jpeg` with every APP0 segment removed.
fn strip_app0(jpeg: &[u8]) -> Vec<u8> {
    split_segments(jpeg)
        .unwrap()
        .iter()
        .filter(|segment| segment.marker() != APP0)
        .flat_map(|segment| segment.as_bytes().to_vec())
        .collect()
}

// =============================================================================
// Split Tests
// =============================================================================

#[test]
fn test_split_real_jpeg_is_lossless() {
    for jpeg in [create_test_jpeg(32, 32, 80), create_test_rgb_jpeg(40, 24, 90)] {
        let segments = split_segments(&jpeg).unwrap();

        assert_eq!(segments[0].marker(), SOI);
        assert_eq!(segments.last().unwrap().marker(), SOS);

        let joined: Vec<u8> = segments
            .iter()
            .flat_map(|segment| segment.as_bytes().to_vec())
            .collect();
        assert_eq!(joined, jpeg);
    }
}

#[test]
fn test_split_rejects_non_jpeg() {
    let blob = tiff_blob();
    assert!(matches!(split_segments(&blob), Err(FormatError::NotJpeg)));
}

#[test]
fn test_split_rejects_truncated_header_segment() {
    let jpeg = create_test_jpeg(16, 16, 80);
    let segments = split_segments(&jpeg).unwrap();
    // Cut in the middle of the second segment
    let cut = segments[0].as_bytes().len() + 3;

    assert!(matches!(
        split_segments(&jpeg[..cut]),
        Err(FormatError::TruncatedSegment { .. })
    ));
}

// =============================================================================
// Merge Tests
// =============================================================================

#[test]
fn test_merge_exactly_one_exif_segment() {
    let jpeg = create_test_jpeg(32, 32, 80);
    let blob = tiff_blob();

    let once = merge_segments(&split_segments(&jpeg).unwrap(), Some(&blob)).unwrap();
    assert_eq!(count_exif_segments(&once), 1);

    let twice = merge_segments(&split_segments(&once).unwrap(), Some(&blob)).unwrap();
    assert_eq!(count_exif_segments(&twice), 1);
    assert_eq!(once, twice);
}

#[test]
fn test_merge_placement_after_app0() {
    let jpeg = create_test_jpeg(32, 32, 80);
    let merged = merge_segments(&split_segments(&jpeg).unwrap(), Some(&tiff_blob())).unwrap();
    let markers = segment_markers(&merged);

    match markers.iter().position(|&m| m == APP0) {
        Some(app0) => assert_eq!(markers[app0 + 1], APP1),
        None => assert_eq!(markers[1], APP1),
    }
}

#[test]
fn test_merge_placement_after_soi() {
    let jpeg = strip_app0(&create_test_jpeg(32, 32, 80));
    assert!(!segment_markers(&jpeg).contains(&APP0));

    let merged = merge_segments(&split_segments(&jpeg).unwrap(), Some(&tiff_blob())).unwrap();
    let markers = segment_markers(&merged);
    assert_eq!(&markers[..2], &[SOI, APP1]);
    assert!(is_decodable_jpeg(&merged));
}

#[test]
fn test_merge_keeps_other_segments_in_order() {
    let jpeg = create_test_rgb_jpeg(24, 24, 75);
    let before = segment_markers(&jpeg);

    let merged = merge_segments(&split_segments(&jpeg).unwrap(), Some(&tiff_blob())).unwrap();
    let after: Vec<u8> = segment_markers(&merged)
        .into_iter()
        .filter(|&m| m != APP1)
        .collect();
    assert_eq!(after, before);
}

#[test]
fn test_merged_blob_is_found_again() {
    let jpeg = create_test_jpeg(16, 16, 80);
    let blob = tiff_blob();
    let merged = merge_segments(&split_segments(&jpeg).unwrap(), Some(&blob)).unwrap();

    let segments = split_segments(&merged).unwrap();
    let exif = find_exif_segment(&segments).unwrap();
    assert_eq!(exif.exif_blob(), Some(blob.as_slice()));
}

// =============================================================================
// Removal Tests
// =============================================================================

#[test]
fn test_removal_is_idempotent() {
    let jpeg = create_test_jpeg(32, 32, 80);
    let with_exif = merge_segments(&split_segments(&jpeg).unwrap(), Some(&tiff_blob())).unwrap();

    let once = merge_segments(&split_segments(&with_exif).unwrap(), None).unwrap();
    let twice = merge_segments(&split_segments(&once).unwrap(), None).unwrap();

    assert_eq!(once, twice);
    assert_eq!(count_exif_segments(&once), 0);
    assert_eq!(&once[..], &jpeg[..]);
}

#[test]
fn test_exif_jpeg_still_decodes() {
    let jpeg = create_test_rgb_jpeg(48, 32, 85);
    let blob = dump(&fixture()).unwrap();

    let merged = merge_segments(&split_segments(&jpeg).unwrap(), Some(&blob[6..])).unwrap();
    assert!(is_decodable_jpeg(&merged));

    let stripped = merge_segments(&split_segments(&merged).unwrap(), None).unwrap();
    assert!(is_decodable_jpeg(&stripped));
}

#[test]
fn test_oversized_blob_rejected() {
    let jpeg = create_test_jpeg(16, 16, 80);
    let blob = vec![0u8; 70_000];

    assert!(matches!(
        merge_segments(&split_segments(&jpeg).unwrap(), Some(&blob)),
        Err(FormatError::SegmentTooLarge { .. })
    ));
}

//! Operation-level integration tests.
//!
//! Tests verify:
//! - load/dump through real JPEG files
//! - insert/remove/transplant on buffers and on paths
//! - transplant A into B yields A's metadata, not B's
//! - failures never leave a partial target file

use std::fs;

use exifkit::{
    dump, ids, insert, insert_file, load, remove, remove_file, transplant, transplant_file,
    ExifData, ExifError, FormatError, IoError, TagValue, ValueError,
};

use super::test_utils::{
    count_exif_segments, create_test_jpeg, create_test_rgb_jpeg, fixture, is_decodable_jpeg,
    without_pointers,
};

/// A JPEG carrying the full fixture.
fn tagged_jpeg() -> Vec<u8> {
    insert(&dump(&fixture()).unwrap(), &create_test_jpeg(32, 32, 80)).unwrap()
}

/// A JPEG carrying different metadata than the fixture.
fn other_tagged_jpeg() -> (Vec<u8>, ExifData) {
    let mut data = ExifData::new();
    data.zeroth.insert(ids::MAKE, "Other".into());
    data.gps.insert(ids::GPS_ALTITUDE_REF, TagValue::Int(0));
    let jpeg = insert(&dump(&data).unwrap(), &create_test_rgb_jpeg(24, 24, 80)).unwrap();
    (jpeg, data)
}

// =============================================================================
// Load / Dump Tests
// =============================================================================

#[test]
fn test_dump_and_load_through_jpeg() {
    let loaded = load(&tagged_jpeg()).unwrap();
    assert_eq!(without_pointers(loaded), fixture());
}

#[test]
fn test_load_jpeg_without_exif_is_empty() {
    let loaded = load(&create_test_jpeg(16, 16, 80)).unwrap();

    assert!(loaded.zeroth.is_empty());
    assert!(loaded.exif.is_empty());
    assert!(loaded.gps.is_empty());
    assert!(loaded.thumbnail.is_none());
}

#[test]
fn test_load_from_path_matches_load_from_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tagged.jpg");
    let jpeg = tagged_jpeg();
    fs::write(&path, &jpeg).unwrap();

    assert_eq!(load(path.as_path()).unwrap(), load(&jpeg).unwrap());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.jpg");

    assert!(matches!(
        load(&path),
        Err(ExifError::Io(IoError::Read { .. }))
    ));
}

#[test]
fn test_load_corrupt_exif_segment() {
    // Valid APP1 framing, nonsense TIFF header
    let mut blob = b"Exif\0\0".to_vec();
    blob.extend_from_slice(b"XX\0*\0\0\0\x08");
    let jpeg = insert(&blob, &create_test_jpeg(16, 16, 80)).unwrap();

    assert!(matches!(load(&jpeg), Err(ExifError::Format(FormatError::Tiff(_)))));
}

// =============================================================================
// Insert / Remove Tests
// =============================================================================

#[test]
fn test_insert_replaces_existing_exif() {
    let (other, _) = other_tagged_jpeg();
    let output = insert(&dump(&fixture()).unwrap(), &other).unwrap();

    assert_eq!(count_exif_segments(&output), 1);
    assert_eq!(without_pointers(load(&output).unwrap()), fixture());
    assert!(is_decodable_jpeg(&output));
}

#[test]
fn test_insert_rejects_blob_without_signature() {
    let result = insert(b"dummy", &create_test_jpeg(16, 16, 80));
    assert!(matches!(
        result,
        Err(ExifError::Value(ValueError::NotExifData))
    ));
}

#[test]
fn test_remove_strips_exif() {
    let original = create_test_jpeg(32, 32, 80);
    let tagged = insert(&dump(&fixture()).unwrap(), &original).unwrap();

    let stripped = remove(&tagged).unwrap();
    assert_eq!(stripped, original);
    assert_eq!(load(&stripped).unwrap(), ExifData::default());
}

#[test]
fn test_remove_on_clean_jpeg_is_noop() {
    let original = create_test_rgb_jpeg(16, 16, 80);
    assert_eq!(remove(&original).unwrap(), original);
}

// =============================================================================
// Transplant Tests
// =============================================================================

#[test]
fn test_transplant_moves_metadata() {
    let source = tagged_jpeg();
    let (target, target_data) = other_tagged_jpeg();

    let output = transplant(&source, &target).unwrap();
    let loaded = load(&output).unwrap();

    assert_eq!(loaded, load(&source).unwrap());
    assert_ne!(without_pointers(loaded), target_data);
    assert!(is_decodable_jpeg(&output));
}

#[test]
fn test_transplant_copies_raw_segment() {
    let source = tagged_jpeg();
    let output = transplant(&source, &create_test_rgb_jpeg(24, 24, 80)).unwrap();

    let source_segments = exifkit::split_segments(&source).unwrap();
    let output_segments = exifkit::split_segments(&output).unwrap();
    assert_eq!(
        exifkit::find_exif_segment(&source_segments),
        exifkit::find_exif_segment(&output_segments)
    );
}

#[test]
fn test_transplant_from_source_without_exif() {
    let result = transplant(&create_test_jpeg(16, 16, 80), &tagged_jpeg());
    assert!(matches!(
        result,
        Err(ExifError::Value(ValueError::MissingExif))
    ));
}

// =============================================================================
// Path-Target Tests
// =============================================================================

#[test]
fn test_insert_file_to_target() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("image.jpg");
    let target = dir.path().join("out.jpg");
    let original = create_test_jpeg(32, 32, 80);
    fs::write(&image, &original).unwrap();

    insert_file(&dump(&fixture()).unwrap(), &image, Some(target.as_path())).unwrap();

    // source untouched, target tagged
    assert_eq!(fs::read(&image).unwrap(), original);
    assert_eq!(without_pointers(load(&target).unwrap()), fixture());
}

#[test]
fn test_insert_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("image.jpg");
    fs::write(&image, create_test_jpeg(32, 32, 80)).unwrap();

    insert_file(&dump(&fixture()).unwrap(), &image, None).unwrap();

    let written = fs::read(&image).unwrap();
    assert_eq!(count_exif_segments(&written), 1);
    assert!(is_decodable_jpeg(&written));
}

#[test]
fn test_remove_file_to_target() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("tagged.jpg");
    let target = dir.path().join("clean.jpg");
    let tagged = tagged_jpeg();
    fs::write(&image, &tagged).unwrap();

    remove_file(&image, Some(target.as_path())).unwrap();

    assert_eq!(fs::read(&image).unwrap(), tagged);
    assert_eq!(count_exif_segments(&fs::read(&target).unwrap()), 0);
}

#[test]
fn test_transplant_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.jpg");
    let image = dir.path().join("image.jpg");
    fs::write(&source, tagged_jpeg()).unwrap();
    fs::write(&image, create_test_rgb_jpeg(24, 24, 80)).unwrap();

    transplant_file(source.as_path(), &image, None).unwrap();

    assert_eq!(load(&image).unwrap(), load(&source).unwrap());
}

#[test]
fn test_transplant_file_from_buffer_source() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("image.jpg");
    let target = dir.path().join("out.jpg");
    let source = tagged_jpeg();
    fs::write(&image, create_test_jpeg(16, 16, 80)).unwrap();

    transplant_file(&source, &image, Some(target.as_path())).unwrap();

    assert_eq!(load(&target).unwrap(), load(&source).unwrap());
}

#[test]
fn test_failed_transplant_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("image.jpg");
    let target = dir.path().join("out.jpg");
    let original = create_test_jpeg(16, 16, 80);
    fs::write(&image, &original).unwrap();

    let result = transplant_file(&create_test_jpeg(8, 8, 80), &image, Some(target.as_path()));

    assert!(result.is_err());
    assert!(!target.exists());
    assert_eq!(fs::read(&image).unwrap(), original);
}

#[test]
fn test_path_operation_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("missing.jpg");

    assert!(matches!(
        remove_file(&image, None),
        Err(ExifError::Io(IoError::Read { .. }))
    ));
}

//! TIFF codec integration tests.
//!
//! Tests verify:
//! - Decode of encode preserves every value for both byte orders
//! - Pointer tags point at the IFDs they name
//! - Thumbnail, Interop and First directories survive a round trip
//! - Blobs written by other software (odd types, unknown codes) decode

use exifkit::{
    decode, dump, dump_with_order, ids, load, ByteOrder, ExifData, TagValue, TiffDecoder,
    TiffEncoder, TiffError,
};

use super::test_utils::{
    create_test_jpeg, fixture, without_pointers, RawEntry, TiffBuilder,
};

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_fixture_round_trip_big_endian() {
    let data = fixture();
    let blob = TiffEncoder::new(ByteOrder::BigEndian).encode(&data).unwrap();
    let decoded = decode(&blob).unwrap();

    assert_eq!(without_pointers(decoded), data);
}

#[test]
fn test_fixture_round_trip_little_endian() {
    let data = fixture();
    let blob = TiffEncoder::new(ByteOrder::LittleEndian)
        .encode(&data)
        .unwrap();
    let decoded = decode(&blob).unwrap();

    assert_eq!(without_pointers(decoded), data);
}

#[test]
fn test_byte_orders_decode_identically() {
    let data = fixture();
    let big = TiffEncoder::new(ByteOrder::BigEndian).encode(&data).unwrap();
    let little = TiffEncoder::new(ByteOrder::LittleEndian)
        .encode(&data)
        .unwrap();

    assert_ne!(big, little);
    assert_eq!(&big[..2], b"MM");
    assert_eq!(&little[..2], b"II");

    let big_decoder = TiffDecoder::new(&big).unwrap();
    let little_decoder = TiffDecoder::new(&little).unwrap();
    assert_eq!(big_decoder.header().byte_order, ByteOrder::BigEndian);
    assert_eq!(little_decoder.header().byte_order, ByteOrder::LittleEndian);

    // Same layout, so even the pointer values agree
    assert_eq!(big_decoder.decode().unwrap(), little_decoder.decode().unwrap());
}

#[test]
fn test_concrete_scenario_preserves_scalar_types() {
    let mut data = ExifData::new();
    data.zeroth.insert(ids::SOFTWARE, "X".into());
    data.zeroth.insert(ids::RESOLUTION_UNIT, TagValue::Int(65535));
    data.exif
        .insert(ids::DATE_TIME_ORIGINAL, "2099:09:29 10:10:10".into());
    data.gps.insert(ids::GPS_ALTITUDE_REF, TagValue::Int(1));

    let decoded = without_pointers(decode(&TiffEncoder::default().encode(&data).unwrap()).unwrap());

    assert_eq!(decoded.zeroth, data.zeroth);
    assert_eq!(decoded.exif, data.exif);
    assert_eq!(decoded.gps, data.gps);
    // scalars stay scalars
    assert_eq!(decoded.zeroth[&ids::RESOLUTION_UNIT], TagValue::Int(65535));
    assert_eq!(decoded.gps[&ids::GPS_ALTITUDE_REF], TagValue::Int(1));
}

#[test]
fn test_re_encode_is_stable() {
    let blob = TiffEncoder::default().encode(&fixture()).unwrap();
    let again = TiffEncoder::default().encode(&decode(&blob).unwrap()).unwrap();
    assert_eq!(blob, again);
}

// =============================================================================
// Pointer Consistency Tests
// =============================================================================

#[test]
fn test_pointers_address_their_ifds() {
    let mut data = fixture();
    data.interop.insert(ids::INTEROP_INDEX, "R98".into());
    data.interop
        .insert(ids::INTEROP_VERSION, TagValue::Undefined(b"0100".to_vec()));

    let blob = TiffEncoder::default().encode(&data).unwrap();
    let decoded = decode(&blob).unwrap();

    let order = ByteOrder::BigEndian;
    let entry_count = |offset: i64| order.read_u16(&blob[offset as usize..]) as usize;

    let exif = decoded.zeroth[&ids::EXIF_IFD_POINTER].as_int().unwrap();
    let gps = decoded.zeroth[&ids::GPS_IFD_POINTER].as_int().unwrap();
    let interop = decoded.exif[&ids::INTEROP_IFD_POINTER].as_int().unwrap();

    // Exif carries the Interop pointer in addition to its own tags
    assert_eq!(entry_count(exif), data.exif.len() + 1);
    assert_eq!(entry_count(gps), data.gps.len());
    assert_eq!(entry_count(interop), data.interop.len());

    // Fixed layout order
    assert!(exif < gps && gps < interop);

    assert_eq!(without_pointers(decoded), data);
}

#[test]
fn test_bogus_caller_pointers_are_recomputed() {
    let mut data = fixture();
    data.zeroth.insert(ids::EXIF_IFD_POINTER, TagValue::Int(1));
    data.zeroth.insert(ids::GPS_IFD_POINTER, TagValue::Int(2));

    let decoded = decode(&TiffEncoder::default().encode(&data).unwrap()).unwrap();
    assert_eq!(decoded.exif, fixture().exif);
    assert_eq!(decoded.gps, fixture().gps);
}

// =============================================================================
// Thumbnail / First IFD Tests
// =============================================================================

#[test]
fn test_thumbnail_round_trip() {
    let thumbnail = create_test_jpeg(16, 16, 50);
    let mut data = fixture();
    data.first.insert(ids::X_RESOLUTION, TagValue::Rational(72, 1));
    data.first.insert(ids::RESOLUTION_UNIT, TagValue::Int(2));
    data.thumbnail = Some(thumbnail.clone());

    let blob = dump(&data).unwrap();
    let loaded = load(&blob).unwrap();

    assert_eq!(loaded.thumbnail.as_deref(), Some(thumbnail.as_slice()));
    assert_eq!(
        loaded.first[&ids::JPEG_INTERCHANGE_FORMAT_LENGTH],
        TagValue::Int(thumbnail.len() as i64)
    );
    assert_eq!(without_pointers(loaded), data);
}

#[test]
fn test_thumbnail_without_first_tags() {
    let data = ExifData {
        thumbnail: Some(vec![0xFF, 0xD8, 0xFF, 0xD9]),
        ..ExifData::default()
    };

    let decoded = decode(&TiffEncoder::default().encode(&data).unwrap()).unwrap();
    assert_eq!(decoded.thumbnail, data.thumbnail);
    assert_eq!(decoded.first.len(), 2);
}

// =============================================================================
// Foreign Blob Tests
// =============================================================================

#[test]
fn test_gps_byte_tag_written_as_undefined() {
    // GPSAltitudeRef is documented as BYTE; some firmware writes UNDEFINED
    let blob = TiffBuilder::new()
        .zeroth(RawEntry::new(ids::MAKE, 2, 6, b"Canon\0"))
        .gps(RawEntry::new(ids::GPS_ALTITUDE_REF, 7, 1, &[1]))
        .build();

    let decoded = decode(&blob).unwrap();
    assert_eq!(
        decoded.gps[&ids::GPS_ALTITUDE_REF],
        TagValue::Undefined(vec![1])
    );

    // Re-encoding writes it back as BYTE with the same payload
    let blob = TiffEncoder::default().encode(&decoded).unwrap();
    let again = decode(&blob).unwrap();
    assert_eq!(again.gps[&ids::GPS_ALTITUDE_REF], TagValue::Int(1));
}

#[test]
fn test_latin1_ascii_re_encodes_byte_for_byte() {
    let blob = TiffBuilder::new()
        .zeroth(RawEntry::new(ids::MAKE, 2, 5, b"Caf\xE9\0"))
        .build();

    let decoded = decode(&blob).unwrap();
    assert_eq!(decoded.zeroth[&ids::MAKE], TagValue::from("Caf\u{e9}"));

    let again = TiffEncoder::default().encode(&decoded).unwrap();
    assert_eq!(again, blob);
}

#[test]
fn test_unknown_type_code_skipped() {
    let blob = TiffBuilder::new()
        .zeroth(RawEntry::new(ids::MAKE, 2, 6, b"Canon\0"))
        .zeroth(RawEntry::new(0xC000, 0x00FF, 1, &[1, 2, 3, 4]))
        .zeroth(RawEntry::new(ids::MODEL, 2, 4, b"EOS\0"))
        .build();

    let decoded = decode(&blob).unwrap();
    assert_eq!(decoded.zeroth.len(), 2);
    assert_eq!(decoded.zeroth[&ids::MAKE], TagValue::from("Canon"));
    assert_eq!(decoded.zeroth[&ids::MODEL], TagValue::from("EOS"));
}

#[test]
fn test_unsorted_foreign_entries_are_sorted_on_encode() {
    let blob = TiffBuilder::new()
        .zeroth(RawEntry::new(ids::MODEL, 2, 4, b"EOS\0"))
        .zeroth(RawEntry::new(ids::MAKE, 2, 6, b"Canon\0"))
        .build();

    let encoded = TiffEncoder::default()
        .encode(&decode(&blob).unwrap())
        .unwrap();

    let first_tag = u16::from_be_bytes([encoded[10], encoded[11]]);
    let second_tag = u16::from_be_bytes([encoded[22], encoded[23]]);
    assert_eq!(first_tag, ids::MAKE);
    assert_eq!(second_tag, ids::MODEL);
}

#[test]
fn test_uncatalogued_tag_round_trip() {
    let mut data = ExifData::new();
    data.exif.insert(0xEA1C, TagValue::Undefined(vec![0x1C, 0xEA, 0, 0, 0, 0]));
    data.exif.insert(0xFDE8, TagValue::Ints(vec![-1, 5]));

    let decoded = decode(&TiffEncoder::default().encode(&data).unwrap()).unwrap();
    assert_eq!(without_pointers(decoded), data);
}

#[test]
fn test_gps_pointer_past_end_is_error() {
    let mut blob = TiffBuilder::new()
        .gps(RawEntry::new(ids::GPS_ALTITUDE_REF, 1, 1, &[0]))
        .build();
    // Cut the GPS IFD off
    blob.truncate(8 + 2 + 12 + 4);

    assert!(matches!(decode(&blob), Err(TiffError::InvalidIfdOffset(_))));
}

#[test]
fn test_dump_with_order_prefix() {
    let blob = dump_with_order(&fixture(), ByteOrder::LittleEndian).unwrap();
    assert_eq!(&blob[..8], b"Exif\0\0II");
    assert_eq!(without_pointers(load(&blob).unwrap()), fixture());
}

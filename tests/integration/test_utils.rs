//! Test utilities for integration tests.
//!
//! Helpers for creating real JPEG streams with the `image` crate, hand-built
//! TIFF blobs, and the reference directory fixtures.

use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, Luma, Rgb, RgbImage};

use exifkit::{ids, split_segments, ExifData, Ifd, TagValue};

// =============================================================================
// Test JPEG Creation
// =============================================================================

/// Create a test JPEG image with a simple gradient pattern.
pub fn create_test_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = GrayImage::from_fn(width, height, |x, y| {
        let val = ((x + y) % 256) as u8;
        Luma([val])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Create a test RGB JPEG image.
pub fn create_test_rgb_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x % 256) as u8;
        let g = (y % 256) as u8;
        let b = ((x + y) % 256) as u8;
        Rgb([r, g, b])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Whether a JPEG stream still decodes to pixels.
pub fn is_decodable_jpeg(data: &[u8]) -> bool {
    image::load_from_memory_with_format(data, image::ImageFormat::Jpeg).is_ok()
}

/// Number of EXIF APP1 segments in a JPEG stream.
pub fn count_exif_segments(data: &[u8]) -> usize {
    split_segments(data)
        .unwrap()
        .iter()
        .filter(|segment| segment.is_exif())
        .count()
}

/// Marker bytes of every segment, in order.
pub fn segment_markers(data: &[u8]) -> Vec<u8> {
    split_segments(data)
        .unwrap()
        .iter()
        .map(|segment| segment.marker())
        .collect()
}

// =============================================================================
// Directory Fixtures
// =============================================================================

/// Image-level tags covering ASCII, SHORT, LONG, RATIONAL and SRATIONAL.
pub fn zeroth_fixture() -> Ifd {
    let mut ifd = Ifd::new();
    ifd.insert(ids::SOFTWARE, "PIL".into());
    ifd.insert(ids::MAKE, "Make".into());
    ifd.insert(ids::MODEL, "XXX-XXX".into());
    ifd.insert(ids::RESOLUTION_UNIT, TagValue::Int(65535));
    ifd.insert(ids::BITS_PER_SAMPLE, TagValue::Ints(vec![24, 24, 24]));
    ifd.insert(ids::JPEG_INTERCHANGE_FORMAT_LENGTH, TagValue::Int(4294967295));
    ifd.insert(ids::X_RESOLUTION, TagValue::Rational(4294967295, 1));
    ifd.insert(
        ids::BLACK_LEVEL_DELTA_H,
        TagValue::Rationals(vec![(1, 1), (1, 1), (1, 1)]),
    );
    ifd
}

/// Camera-level tags, including UNDEFINED and extreme SRATIONAL values.
pub fn exif_fixture() -> Ifd {
    let mut ifd = Ifd::new();
    ifd.insert(ids::DATE_TIME_ORIGINAL, "2099:09:29 10:10:10".into());
    ifd.insert(ids::LENS_MAKE, "LensMake".into());
    ifd.insert(ids::OECF, TagValue::Undefined(vec![0xAA; 6]));
    ifd.insert(ids::SHARPNESS, TagValue::Int(65535));
    ifd.insert(ids::ISO_SPEED, TagValue::Int(4294967295));
    ifd.insert(ids::EXPOSURE_TIME, TagValue::Rational(4294967295, 1));
    ifd.insert(
        ids::LENS_SPECIFICATION,
        TagValue::Rationals(vec![(1, 1), (1, 1), (1, 1), (1, 1)]),
    );
    ifd.insert(
        ids::EXPOSURE_BIAS_VALUE,
        TagValue::Rational(2147483647, -2147483648),
    );
    ifd
}

/// Location tags, including BYTE scalars and tuples.
pub fn gps_fixture() -> Ifd {
    let mut ifd = Ifd::new();
    ifd.insert(ids::GPS_VERSION_ID, TagValue::Ints(vec![0, 0, 0, 1]));
    ifd.insert(ids::GPS_ALTITUDE_REF, TagValue::Int(1));
    ifd.insert(ids::GPS_DATE_STAMP, "1999:99:99 99:99:99".into());
    ifd.insert(ids::GPS_DIFFERENTIAL, TagValue::Int(65535));
    ifd.insert(ids::GPS_LATITUDE, TagValue::Rational(4294967295, 1));
    ifd
}

/// Zeroth, Exif and GPS fixtures together.
pub fn fixture() -> ExifData {
    ExifData {
        zeroth: zeroth_fixture(),
        exif: exif_fixture(),
        gps: gps_fixture(),
        ..ExifData::default()
    }
}

/// Drop the derived pointer tags so decoded data compares with input.
pub fn without_pointers(mut data: ExifData) -> ExifData {
    data.zeroth.remove(&ids::EXIF_IFD_POINTER);
    data.zeroth.remove(&ids::GPS_IFD_POINTER);
    data.exif.remove(&ids::INTEROP_IFD_POINTER);
    data.first.remove(&ids::JPEG_INTERCHANGE_FORMAT);
    data.first.remove(&ids::JPEG_INTERCHANGE_FORMAT_LENGTH);
    data
}

// =============================================================================
// TIFF Blob Builder
// =============================================================================

/// Raw IFD entry for hand-built blobs: any type code, any payload.
pub struct RawEntry {
    pub tag: u16,
    pub type_code: u16,
    pub count: u32,
    pub payload: Vec<u8>,
}

impl RawEntry {
    pub fn new(tag: u16, type_code: u16, count: u32, payload: &[u8]) -> Self {
        Self {
            tag,
            type_code,
            count,
            payload: payload.to_vec(),
        }
    }
}

/// Builder for single-level big-endian TIFF blobs.
///
/// Writes a Zeroth IFD and, when GPS entries are given, a GPS IFD linked via
/// GPSTag. Payloads longer than four bytes go after each table. No sorting,
/// no type checking: the point is to produce what real firmware produces.
pub struct TiffBuilder {
    zeroth: Vec<RawEntry>,
    gps: Vec<RawEntry>,
}

impl TiffBuilder {
    pub fn new() -> Self {
        Self {
            zeroth: Vec::new(),
            gps: Vec::new(),
        }
    }

    pub fn zeroth(mut self, entry: RawEntry) -> Self {
        self.zeroth.push(entry);
        self
    }

    pub fn gps(mut self, entry: RawEntry) -> Self {
        self.gps.push(entry);
        self
    }

    /// Build the blob.
    pub fn build(mut self) -> Vec<u8> {
        let mut data = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];

        if !self.gps.is_empty() {
            // patched once the GPS IFD offset is known
            self.zeroth
                .push(RawEntry::new(ids::GPS_IFD_POINTER, 4, 1, &[0, 0, 0, 0]));
        }

        let pointer_index = self.zeroth.len().checked_sub(1);
        let zeroth_entry_pos = write_ifd(&mut data, &self.zeroth);

        if !self.gps.is_empty() {
            let gps_offset = data.len() as u32;
            if let Some(index) = pointer_index {
                let pos = zeroth_entry_pos + index * 12 + 8;
                data[pos..pos + 4].copy_from_slice(&gps_offset.to_be_bytes());
            }
            write_ifd(&mut data, &self.gps);
        }

        data
    }
}

impl Default for TiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Append one IFD plus its overflow area; returns the offset of its first entry.
fn write_ifd(data: &mut Vec<u8>, entries: &[RawEntry]) -> usize {
    let start = data.len();
    let table_size = 2 + entries.len() * 12 + 4;
    let mut overflow_offset = start + table_size;

    data.extend_from_slice(&(entries.len() as u16).to_be_bytes());
    let mut overflow = Vec::new();
    for entry in entries {
        data.extend_from_slice(&entry.tag.to_be_bytes());
        data.extend_from_slice(&entry.type_code.to_be_bytes());
        data.extend_from_slice(&entry.count.to_be_bytes());
        if entry.payload.len() <= 4 {
            let mut field = [0u8; 4];
            field[..entry.payload.len()].copy_from_slice(&entry.payload);
            data.extend_from_slice(&field);
        } else {
            data.extend_from_slice(&(overflow_offset as u32).to_be_bytes());
            overflow_offset += entry.payload.len();
            overflow.extend_from_slice(&entry.payload);
        }
    }
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&overflow);

    start + 2
}

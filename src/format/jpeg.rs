//! JPEG segment handling.
//!
//! A JPEG stream is split into marker segments so that the EXIF APP1 segment
//! can be located, replaced or dropped without touching anything else.
//!
//! # Segment Layout
//!
//! Most segments are a 2-byte marker followed by a 2-byte big-endian length
//! (which counts itself) and a payload. Standalone markers (SOI, EOI, RSTn,
//! TEM) carry no length. Everything from SOS onward is entropy-coded data and
//! is kept as one opaque trailing segment.
//!
//! # Merging Process
//!
//! 1. Drop every APP1 segment whose payload starts with "Exif\0\0"
//! 2. If a new blob is given, build one APP1 segment for it
//! 3. Insert it right after APP0 (JFIF) if present, otherwise right after SOI
//! 4. Concatenate all segments in order

use bytes::{Bytes, BytesMut};

use crate::error::FormatError;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 0 (JFIF) marker
pub const APP0: [u8; 2] = [0xFF, 0xE0];

/// Application segment 1 (EXIF) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Temporary private-use marker, no length field
const TEM: u8 = 0x01;

/// Prefix of an EXIF APP1 payload, and of a dumped EXIF blob
pub const EXIF_SIGNATURE: &[u8; 6] = b"Exif\0\0";

/// Largest value the 16-bit segment length field can hold
pub const MAX_SEGMENT_LENGTH: usize = u16::MAX as usize;

/// Marker (2) + length field (2)
const SEGMENT_HEADER_SIZE: usize = 4;

/// Whether a marker stands alone, without a length field.
fn is_standalone(marker: u8) -> bool {
    matches!(marker, TEM | 0xD0..=0xD7) || marker == SOI[1] || marker == EOI[1]
}

/// Check whether data starts with the SOI marker.
pub fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == SOI
}

// =============================================================================
// Segment
// =============================================================================

/// One marker segment, stored with its marker and length bytes.
///
/// Any 0xFF fill bytes preceding the marker are kept at the front of the
/// segment so that joining segments reproduces the stream exactly.
/// Segments share the buffer they were split from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    marker: u8,
    /// Number of leading fill bytes
    fill: usize,
    bytes: Bytes,
}

impl Segment {
    /// Build an EXIF APP1 segment around a TIFF blob.
    ///
    /// # Errors
    /// `SegmentTooLarge` if the length field would exceed 65535.
    pub fn exif(blob: &[u8]) -> Result<Self, FormatError> {
        let length = 2 + EXIF_SIGNATURE.len() + blob.len();
        if length > MAX_SEGMENT_LENGTH {
            return Err(FormatError::SegmentTooLarge { size: length });
        }

        let mut bytes = BytesMut::with_capacity(2 + length);
        bytes.extend_from_slice(&APP1);
        bytes.extend_from_slice(&(length as u16).to_be_bytes());
        bytes.extend_from_slice(EXIF_SIGNATURE);
        bytes.extend_from_slice(blob);

        Ok(Self {
            marker: APP1[1],
            fill: 0,
            bytes: bytes.freeze(),
        })
    }

    /// The marker byte following 0xFF.
    pub fn marker(&self) -> u8 {
        self.marker
    }

    /// The full segment, fill bytes and marker included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes after the marker and length field. Empty for standalone markers.
    pub fn payload(&self) -> &[u8] {
        if is_standalone(self.marker) {
            return &[];
        }
        self.bytes
            .get(self.fill + SEGMENT_HEADER_SIZE..)
            .unwrap_or_default()
    }

    /// Whether this is an APP1 segment carrying EXIF data.
    pub fn is_exif(&self) -> bool {
        self.marker == APP1[1] && self.payload().starts_with(EXIF_SIGNATURE)
    }

    /// The TIFF blob inside an EXIF segment, without the signature.
    pub fn exif_blob(&self) -> Option<&[u8]> {
        if self.is_exif() {
            Some(&self.payload()[EXIF_SIGNATURE.len()..])
        } else {
            None
        }
    }
}

// =============================================================================
// Split / Merge
// =============================================================================

/// Split a JPEG stream into its marker segments.
///
/// The first segment is always SOI. A stream that ends without reaching SOS
/// is accepted; bytes after EOI are kept with the EOI segment.
///
/// # Errors
/// - `NotJpeg` if the stream does not start with SOI
/// - `InvalidMarker` if a segment does not start with 0xFF
/// - `TruncatedSegment` if a declared length runs past the end
pub fn split_segments(data: &[u8]) -> Result<Vec<Segment>, FormatError> {
    if !is_jpeg(data) {
        return Err(FormatError::NotJpeg);
    }

    let data = Bytes::copy_from_slice(data);
    let mut segments = vec![Segment {
        marker: SOI[1],
        fill: 0,
        bytes: data.slice(0..2),
    }];

    let mut pos = 2;
    while pos < data.len() {
        if data[pos] != 0xFF {
            return Err(FormatError::InvalidMarker {
                offset: pos,
                byte: data[pos],
            });
        }

        // Fill bytes before a marker belong to the segment that follows
        let start = pos;
        while pos + 1 < data.len() && data[pos + 1] == 0xFF {
            pos += 1;
        }
        if pos + 1 >= data.len() {
            return Err(FormatError::TruncatedSegment { offset: start });
        }

        let marker = data[pos + 1];
        let fill = pos - start;

        // Scan data and trailing bytes are not segmented further
        if marker == SOS[1] || marker == EOI[1] {
            segments.push(Segment {
                marker,
                fill,
                bytes: data.slice(start..),
            });
            break;
        }

        if is_standalone(marker) {
            segments.push(Segment {
                marker,
                fill,
                bytes: data.slice(start..pos + 2),
            });
            pos += 2;
            continue;
        }

        if pos + SEGMENT_HEADER_SIZE > data.len() {
            return Err(FormatError::TruncatedSegment { offset: start });
        }
        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let end = pos + 2 + length;
        if length < 2 || end > data.len() {
            return Err(FormatError::TruncatedSegment { offset: start });
        }

        segments.push(Segment {
            marker,
            fill,
            bytes: data.slice(start..end),
        });
        pos = end;
    }

    Ok(segments)
}

/// Find the first EXIF APP1 segment.
pub fn find_exif_segment(segments: &[Segment]) -> Option<&Segment> {
    segments.iter().find(|segment| segment.is_exif())
}

/// Reassemble segments, replacing any EXIF data.
///
/// Every existing EXIF APP1 segment is dropped. If `exif` is given (a TIFF
/// blob without the signature), one new APP1 segment is inserted after APP0
/// if present, otherwise after SOI.
///
/// # Errors
/// `SegmentTooLarge` if the new segment does not fit the length field.
pub fn merge_segments(segments: &[Segment], exif: Option<&[u8]>) -> Result<Bytes, FormatError> {
    let replacement = exif.map(Segment::exif).transpose()?;

    let kept: Vec<&Segment> = segments.iter().filter(|s| !s.is_exif()).collect();
    let insert_at = kept
        .iter()
        .position(|s| s.marker() == APP0[1])
        .map_or(1, |index| index + 1)
        .min(kept.len());

    let total_size = kept.iter().map(|s| s.bytes.len()).sum::<usize>()
        + replacement.as_ref().map_or(0, |s| s.bytes.len());
    let mut result = BytesMut::with_capacity(total_size);

    for (index, segment) in kept.iter().enumerate() {
        if index == insert_at {
            if let Some(new) = &replacement {
                result.extend_from_slice(&new.bytes);
            }
        }
        result.extend_from_slice(&segment.bytes);
    }
    if insert_at == kept.len() {
        if let Some(new) = &replacement {
            result.extend_from_slice(&new.bytes);
        }
    }

    Ok(result.freeze())
}

// =============================================================================
// Tests
// =============================================================================

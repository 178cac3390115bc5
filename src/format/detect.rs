//! Source format detection.
//!
//! Metadata can be loaded from three kinds of input, told apart by their
//! leading bytes:
//!
//! - **JPEG**: starts with SOI (FFD8); EXIF lives in an APP1 segment
//! - **TIFF**: starts with II*\0 or MM\0*; the whole file is the blob
//! - **Raw EXIF**: starts with "Exif\0\0" followed by a TIFF blob, as
//!   produced by dump

use crate::error::FormatError;

use super::jpeg::{is_jpeg, EXIF_SIGNATURE};
use super::tiff::{ByteOrder, TIFF_HEADER_SIZE};

// =============================================================================
// SourceFormat
// =============================================================================

/// Detected input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// JPEG stream with optional APP1 EXIF segment
    Jpeg,

    /// Bare TIFF file, decoded directly
    Tiff,

    /// Dumped EXIF blob with the "Exif\0\0" prefix
    RawExif,
}

impl SourceFormat {
    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Tiff => "TIFF",
            SourceFormat::RawExif => "raw EXIF",
        }
    }
}

// =============================================================================
// Format Detection
// =============================================================================

/// Detect the format of an input buffer.
///
/// # Returns
/// * `Ok(SourceFormat)` - The detected format
/// * `Err(FormatError::UnsupportedFormat)` - Leading bytes match no known format
pub fn detect_format(data: &[u8]) -> Result<SourceFormat, FormatError> {
    if is_jpeg(data) {
        return Ok(SourceFormat::Jpeg);
    }

    if is_tiff_header(data) {
        return Ok(SourceFormat::Tiff);
    }

    if data.starts_with(EXIF_SIGNATURE) {
        return Ok(SourceFormat::RawExif);
    }

    Err(FormatError::UnsupportedFormat {
        reason: format!(
            "unrecognized leading bytes {:02X?}",
            &data[..data.len().min(8)]
        ),
    })
}

/// Check if bytes represent a valid TIFF header.
///
/// This is a quick check that can be used before attempting full parsing.
pub fn is_tiff_header(bytes: &[u8]) -> bool {
    if bytes.len() < TIFF_HEADER_SIZE {
        return false;
    }

    let byte_order = match &bytes[0..2] {
        b"II" => ByteOrder::LittleEndian,
        b"MM" => ByteOrder::BigEndian,
        _ => return false,
    };

    byte_order.read_u16(&bytes[2..4]) == 42
}

// =============================================================================
// Tests
// =============================================================================

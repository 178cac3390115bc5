//! TIFF header and IFD entry parsing.
//!
//! This module handles the fixed-size building blocks of an EXIF blob: the
//! 8-byte TIFF header and the 12-byte IFD entries. Everything else in the
//! codec is built on top of these.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to the Zeroth IFD (4 bytes, almost always 8)
//! ```
//!
//! # IFD Entry Structure
//!
//! ```text
//! Bytes 0-1:  Tag id
//! Bytes 2-3:  Value type code
//! Bytes 4-7:  Element count
//! Bytes 8-11: Value (when it fits in 4 bytes) or offset to the value
//! ```

use crate::error::TiffError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le};

use super::tags::ValueType;

// =============================================================================
// Constants
// =============================================================================

/// Marker bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Marker bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count prefix of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of the "next IFD" link that terminates an IFD
pub const IFD_NEXT_OFFSET_SIZE: usize = 4;

/// Size of the value/offset field, and so the inline value threshold
pub const VALUE_OFFSET_SIZE: usize = 4;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF blob.
///
/// The blob declares its byte order in the first two bytes of the header.
/// Every multi-byte value in the blob, offsets included, uses that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola), the usual choice for JPEG-embedded EXIF
    #[default]
    BigEndian,
}

impl ByteOrder {
    /// The two header bytes that declare this order.
    pub const fn marker(self) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => *b"II",
            ByteOrder::BigEndian => *b"MM",
        }
    }

    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read a u64 from a byte slice using this byte order.
    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => read_u64_le(bytes),
            ByteOrder::BigEndian => read_u64_be(bytes),
        }
    }

    /// Append a u16 to `buf` using this byte order.
    #[inline]
    pub fn put_u16(self, buf: &mut Vec<u8>, value: u16) {
        match self {
            ByteOrder::LittleEndian => buf.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::BigEndian => buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Append a u32 to `buf` using this byte order.
    #[inline]
    pub fn put_u32(self, buf: &mut Vec<u8>, value: u32) {
        match self {
            ByteOrder::LittleEndian => buf.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::BigEndian => buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Append a u64 to `buf` using this byte order.
    #[inline]
    pub fn put_u64(self, buf: &mut Vec<u8>, value: u64) {
        match self {
            ByteOrder::LittleEndian => buf.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::BigEndian => buf.extend_from_slice(&value.to_be_bytes()),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the blob
    pub byte_order: ByteOrder,

    /// Offset to the Zeroth IFD
    pub first_ifd_offset: u64,
}

impl TiffHeader {
    /// Header for a freshly encoded blob: Zeroth IFD immediately follows.
    pub const fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            first_ifd_offset: TIFF_HEADER_SIZE as u64,
        }
    }

    /// Parse a TIFF header from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Raw header bytes (at least 8 bytes)
    /// * `blob_size` - Total blob size (used to validate the IFD offset)
    ///
    /// # Errors
    /// - `FileTooSmall` if there aren't enough bytes for the header
    /// - `InvalidMagic` if byte order bytes are not II or MM
    /// - `InvalidVersion` if version is not 42
    /// - `InvalidIfdOffset` if the Zeroth IFD offset is outside the blob
    pub fn parse(bytes: &[u8], blob_size: u64) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::FileTooSmall {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        // Checking for specific byte patterns, so the read order is irrelevant
        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::InvalidMagic(magic)),
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != VERSION_TIFF {
            return Err(TiffError::InvalidVersion(version));
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]) as u64;
        if first_ifd_offset >= blob_size {
            return Err(TiffError::InvalidIfdOffset(first_ifd_offset));
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }

    /// Append the 8 header bytes to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.byte_order.marker());
        self.byte_order.put_u16(buf, VERSION_TIFF);
        self.byte_order.put_u32(buf, self.first_ifd_offset as u32);
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// One raw 12-byte IFD entry, before its value is dereferenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag id
    pub tag: u16,

    /// Type code as read from the wire
    pub field_type_raw: u16,

    /// Decoded value type, `None` for unrecognized codes
    pub value_type: Option<ValueType>,

    /// Number of elements
    pub count: u32,

    /// The raw value/offset field
    pub value_offset_bytes: [u8; VALUE_OFFSET_SIZE],
}

impl IfdEntry {
    /// Parse an entry from exactly [`IFD_ENTRY_SIZE`] bytes.
    pub fn parse(bytes: &[u8], byte_order: ByteOrder) -> Self {
        let field_type_raw = byte_order.read_u16(&bytes[2..4]);
        Self {
            tag: byte_order.read_u16(&bytes[0..2]),
            field_type_raw,
            value_type: ValueType::from_u16(field_type_raw),
            count: byte_order.read_u32(&bytes[4..8]),
            value_offset_bytes: [bytes[8], bytes[9], bytes[10], bytes[11]],
        }
    }

    /// Total payload size in bytes, `None` when the type is unknown.
    pub fn value_byte_size(&self) -> Option<u64> {
        self.value_type
            .map(|t| t.size_in_bytes() as u64 * self.count as u64)
    }

    /// Whether the payload sits in the value field itself.
    pub fn is_inline(&self) -> bool {
        self.value_byte_size()
            .is_some_and(|size| size <= VALUE_OFFSET_SIZE as u64)
    }

    /// The value field interpreted as an offset.
    pub fn value_offset(&self, byte_order: ByteOrder) -> u64 {
        byte_order.read_u32(&self.value_offset_bytes) as u64
    }
}

// =============================================================================
// Tests
// =============================================================================

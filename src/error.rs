use thiserror::Error;

use crate::format::tiff::{IfdKind, ValueType};

/// I/O errors that can occur when reading or writing image files
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Failed to read the source file
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// Failed to write the target file
    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// Errors that can occur when parsing TIFF/EXIF blobs
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// Invalid byte order marker (not II or MM)
    #[error("Invalid TIFF byte order: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Blob is too small to contain a valid TIFF header
    #[error("Blob too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// IFD offset points outside the blob
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// IFD entry table runs past the end of the blob
    #[error("Truncated IFD at offset {offset}: {entries} entries do not fit")]
    TruncatedIfd { offset: u64, entries: u16 },

    /// A value or thumbnail range lies outside the blob
    #[error("Value out of bounds: {len} bytes at offset {offset}, blob size is {size}")]
    ValueOutOfBounds { offset: u64, len: u64, size: u64 },

    /// Pointer or thumbnail tag has an unusable value
    #[error("Invalid tag value for 0x{tag:04X} in {ifd} IFD: {message}")]
    InvalidTagValue {
        ifd: IfdKind,
        tag: u16,
        message: String,
    },

    /// Directory has more entries than its 16-bit count can hold
    #[error("Too many entries in {ifd} IFD: {entries} (max 65535)")]
    TooManyEntries { ifd: IfdKind, entries: usize },

    /// Encoded blob would not be addressable with 32-bit offsets
    #[error("Encoded blob too large: {0} bytes")]
    BlobTooLarge(u64),
}

/// Errors related to container structure: malformed TIFF or JPEG streams
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// TIFF parsing error
    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),

    /// Stream does not begin with the Start-Of-Image marker
    #[error("Not a JPEG stream: missing SOI marker")]
    NotJpeg,

    /// Expected a marker prefix (0xFF) but found something else
    #[error("Invalid JPEG marker at offset {offset}: 0x{byte:02X}")]
    InvalidMarker { offset: usize, byte: u8 },

    /// Segment length runs past the end of the stream
    #[error("Truncated JPEG segment at offset {offset}")]
    TruncatedSegment { offset: usize },

    /// Segment payload does not fit the 16-bit length field
    #[error("Segment too large: {size} bytes exceeds the 16-bit length field")]
    SegmentTooLarge { size: usize },

    /// Source is neither JPEG, TIFF, nor raw EXIF data
    #[error("Unsupported format: {reason}")]
    UnsupportedFormat { reason: String },
}

/// Errors caused by caller-supplied values or call arguments
#[derive(Debug, Clone, Error)]
pub enum ValueError {
    /// Value variant cannot be written as the tag's binary type
    #[error("Tag 0x{tag:04X} in {ifd} IFD expects {expected}, got {actual}")]
    TypeMismatch {
        ifd: IfdKind,
        tag: u16,
        expected: ValueType,
        actual: &'static str,
    },

    /// Element count differs from the tag's fixed arity
    #[error("Tag 0x{tag:04X} in {ifd} IFD expects {expected} value(s), got {actual}")]
    ArityMismatch {
        ifd: IfdKind,
        tag: u16,
        expected: u32,
        actual: usize,
    },

    /// Value does not fit the binary type
    #[error("Tag 0x{tag:04X} in {ifd} IFD: {value} does not fit {value_type}")]
    OutOfRange {
        ifd: IfdKind,
        tag: u16,
        value_type: ValueType,
        value: String,
    },

    /// Blob does not start with the Exif signature
    #[error("Given data is not EXIF data: missing \"Exif\\0\\0\" signature")]
    NotExifData,

    /// Transplant source carries no metadata segment
    #[error("No EXIF segment found in the source image")]
    MissingExif,

    /// Thumbnail exceeds the size allowed in an APP1 segment
    #[error("Thumbnail too large: {size} bytes (max {max})")]
    ThumbnailTooLarge { size: usize, max: usize },
}

/// Top-level error returned by the load/dump/insert/remove/transplant operations
#[derive(Debug, Clone, Error)]
pub enum ExifError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Io(#[from] IoError),
}

impl From<TiffError> for ExifError {
    fn from(err: TiffError) -> Self {
        ExifError::Format(FormatError::Tiff(err))
    }
}

//! TIFF codec for EXIF metadata.
//!
//! An EXIF blob is a small TIFF file: a header followed by linked Image File
//! Directories (IFDs). This module converts between that binary form and the
//! in-memory [`ExifData`] directory set.
//!
//! # Key Concepts
//!
//! - **Byte order**: The header declares II (little-endian) or MM (big-endian).
//!   Every multi-byte value in the blob follows it.
//!
//! - **IFD**: A count, a table of 12-byte entries, and a 4-byte offset to the
//!   next IFD. EXIF uses up to five: Zeroth, Exif, GPS, Interop and First.
//!
//! - **Inline vs offset values**: Values of four bytes or fewer sit in the
//!   entry itself; larger values are stored in an overflow region and the
//!   entry holds their offset.
//!
//! - **Pointer tags**: ExifTag, GPSTag and InteroperabilityTag hold offsets of
//!   other IFDs. The encoder always recomputes them.

mod decoder;
mod directory;
mod encoder;
mod parser;
mod tags;
mod values;

pub use decoder::{decode, TiffDecoder};
pub use directory::{ExifData, Ifd, IfdKind};
pub use encoder::{encode, TiffEncoder, MAX_THUMBNAIL_SIZE};
pub use parser::{ByteOrder, IfdEntry, TiffHeader, TIFF_HEADER_SIZE};
pub use tags::{catalogue, ids, lookup, tag_name, Count, TagInfo, ValueType};
pub use values::{decode_value, encode_value, EncodedValue, TagValue};

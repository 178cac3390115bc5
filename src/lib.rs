//! # exifkit
//!
//! Read, build and relocate EXIF metadata embedded in JPEG and TIFF files,
//! without decoding pixel data.
//!
//! ## Features
//!
//! - **TIFF codec**: Decodes the EXIF blob into five directories (Zeroth,
//!   Exif, GPS, Interop, First) plus the embedded thumbnail, and encodes them
//!   back with every internal offset recomputed
//! - **JPEG segment manager**: Splits a JPEG into marker segments and splices
//!   the EXIF APP1 segment in or out, leaving every other byte untouched
//! - **Operations**: `load`, `dump`, `insert`, `remove` and `transplant`, on
//!   in-memory buffers or on files
//!
//! ## Architecture
//!
//! - [`mod@format`] - TIFF codec, JPEG segments, format detection
//! - [`ops`] - Load/dump/insert/remove/transplant
//! - [`io`] - Whole-file reads and writes, endian helpers
//! - [`config`] - CLI configuration types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use exifkit::{dump, insert, load, ids, ExifData, TagValue};
//!
//! # fn main() -> Result<(), exifkit::ExifError> {
//! let mut exif = ExifData::new();
//! exif.zeroth.insert(ids::SOFTWARE, "exifkit".into());
//! exif.gps.insert(ids::GPS_ALTITUDE_REF, TagValue::Int(1));
//!
//! let blob = dump(&exif)?;
//! let jpeg = std::fs::read("photo.jpg").expect("read photo.jpg");
//! let tagged = insert(&blob, &jpeg)?;
//!
//! assert_eq!(load(&tagged)?.gps, exif.gps);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod ops;

// Re-export commonly used types
pub use error::{ExifError, FormatError, IoError, TiffError, ValueError};
pub use format::jpeg::{
    find_exif_segment, merge_segments, split_segments, Segment, EXIF_SIGNATURE,
};
pub use format::tiff::{
    catalogue, decode, encode, ids, lookup, tag_name, ByteOrder, Count, ExifData, Ifd, IfdKind,
    TagInfo, TagValue, TiffDecoder, TiffEncoder, ValueType, MAX_THUMBNAIL_SIZE,
};
pub use format::{detect_format, is_tiff_header, SourceFormat};
pub use io::{read_file, write_file};
pub use ops::{
    dump, dump_with_order, insert, insert_file, load, remove, remove_file, transplant,
    transplant_file, Source,
};

//! Container formats that carry EXIF metadata.
//!
//! - [`tiff`] decodes and encodes the EXIF blob itself
//! - [`jpeg`] splits JPEG streams into segments and splices EXIF in or out
//! - [`detect`] tells JPEG, TIFF and raw EXIF input apart
//!
//! # Format Detection
//!
//! Use [`detect::detect_format`] to classify an input buffer before decoding.

pub mod detect;
pub mod jpeg;
pub mod tiff;

pub use detect::{detect_format, is_tiff_header, SourceFormat};
pub use jpeg::{
    find_exif_segment, is_jpeg, merge_segments, split_segments, Segment, EXIF_SIGNATURE,
};

//! Load, dump, insert, remove and transplant.
//!
//! These compose the TIFF codec and the JPEG segment manager. Each mutating
//! operation comes in two forms:
//!
//! - a buffer-target form (`insert`, `remove`, `transplant`) that returns the
//!   new JPEG bytes and never touches the file system for output;
//! - a path-target form (`insert_file`, `remove_file`, `transplant_file`) that
//!   writes to `target`, or back to the input path when `target` is `None`.
//!
//! Output is always fully built in memory before anything is written.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ExifError, ValueError};
use crate::format::jpeg::{find_exif_segment, merge_segments, split_segments, EXIF_SIGNATURE};
use crate::format::tiff::{decode, ByteOrder, ExifData, TiffEncoder};
use crate::format::{detect_format, SourceFormat};
use crate::io::{read_file, write_file};

// =============================================================================
// Source
// =============================================================================

/// Where input bytes come from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// A file, read fully into memory
    Path(&'a Path),
    /// An in-memory buffer, borrowed
    Bytes(&'a [u8]),
}

impl<'a> Source<'a> {
    fn read(self) -> Result<Cow<'a, [u8]>, ExifError> {
        match self {
            Source::Path(path) => Ok(Cow::Owned(read_file(path)?)),
            Source::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Source::Path(path)
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

// =============================================================================
// Load / Dump
// =============================================================================

/// Decode the metadata carried by a JPEG, a TIFF, or a dumped EXIF blob.
///
/// A JPEG without an EXIF segment yields an empty [`ExifData`].
pub fn load<'a>(source: impl Into<Source<'a>>) -> Result<ExifData, ExifError> {
    let data = source.into().read()?;
    let format = detect_format(&data)?;
    debug!(format = format.name(), bytes = data.len(), "Loading metadata");

    let exif = match format {
        SourceFormat::Jpeg => {
            let segments = split_segments(&data)?;
            debug!(segments = segments.len(), "Split JPEG stream");
            match find_exif_segment(&segments).and_then(|segment| segment.exif_blob()) {
                Some(blob) => decode(blob)?,
                None => {
                    debug!("No EXIF segment found");
                    ExifData::default()
                }
            }
        }
        SourceFormat::Tiff => decode(&data)?,
        SourceFormat::RawExif => decode(&data[EXIF_SIGNATURE.len()..])?,
    };

    Ok(exif)
}

/// Encode `data` big-endian, prefixed with "Exif\0\0".
pub fn dump(data: &ExifData) -> Result<Vec<u8>, ExifError> {
    dump_with_order(data, ByteOrder::BigEndian)
}

/// Encode `data` in the given byte order, prefixed with "Exif\0\0".
pub fn dump_with_order(data: &ExifData, byte_order: ByteOrder) -> Result<Vec<u8>, ExifError> {
    let tiff = TiffEncoder::new(byte_order).encode(data)?;

    let mut blob = Vec::with_capacity(EXIF_SIGNATURE.len() + tiff.len());
    blob.extend_from_slice(EXIF_SIGNATURE);
    blob.extend_from_slice(&tiff);
    Ok(blob)
}

// =============================================================================
// Buffer-target operations
// =============================================================================

/// Return `image` with its EXIF segment replaced by `exif`.
///
/// `exif` must start with "Exif\0\0", as produced by [`dump`].
pub fn insert<'a>(exif: &[u8], image: impl Into<Source<'a>>) -> Result<Vec<u8>, ExifError> {
    let blob = strip_signature(exif)?;
    let image = image.into().read()?;
    splice(&image, Some(blob))
}

/// Return `image` without any EXIF segment.
pub fn remove<'a>(image: impl Into<Source<'a>>) -> Result<Vec<u8>, ExifError> {
    let image = image.into().read()?;
    splice(&image, None)
}

/// Return `image` carrying the EXIF segment of `exif_source`, copied verbatim.
///
/// # Errors
/// `MissingExif` if `exif_source` has no EXIF segment.
pub fn transplant<'a, 'b>(
    exif_source: impl Into<Source<'a>>,
    image: impl Into<Source<'b>>,
) -> Result<Vec<u8>, ExifError> {
    let donor = exif_source.into().read()?;
    let blob = raw_exif_blob(&donor)?;
    let image = image.into().read()?;
    splice(&image, Some(&blob))
}

// =============================================================================
// Path-target operations
// =============================================================================

/// Insert `exif` into the JPEG at `path`, writing to `target` or in place.
pub fn insert_file(exif: &[u8], path: &Path, target: Option<&Path>) -> Result<(), ExifError> {
    let output = insert(exif, path)?;
    write_file(target.unwrap_or(path), &output)?;
    Ok(())
}

/// Remove EXIF from the JPEG at `path`, writing to `target` or in place.
pub fn remove_file(path: &Path, target: Option<&Path>) -> Result<(), ExifError> {
    let output = remove(path)?;
    write_file(target.unwrap_or(path), &output)?;
    Ok(())
}

/// Copy the EXIF segment of `exif_source` into the JPEG at `path`, writing to
/// `target` or in place.
pub fn transplant_file<'a>(
    exif_source: impl Into<Source<'a>>,
    path: &Path,
    target: Option<&Path>,
) -> Result<(), ExifError> {
    let output = transplant(exif_source, path)?;
    write_file(target.unwrap_or(path), &output)?;
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn strip_signature(exif: &[u8]) -> Result<&[u8], ValueError> {
    exif.strip_prefix(EXIF_SIGNATURE.as_slice())
        .ok_or(ValueError::NotExifData)
}

/// The TIFF blob inside a JPEG's EXIF segment, undecoded.
fn raw_exif_blob(jpeg: &[u8]) -> Result<Vec<u8>, ExifError> {
    let segments = split_segments(jpeg)?;
    let blob = find_exif_segment(&segments)
        .and_then(|segment| segment.exif_blob())
        .ok_or(ValueError::MissingExif)?;
    Ok(blob.to_vec())
}

fn splice(jpeg: &[u8], blob: Option<&[u8]>) -> Result<Vec<u8>, ExifError> {
    let segments = split_segments(jpeg)?;
    let merged = merge_segments(&segments, blob)?;
    debug!(
        segments = segments.len(),
        input = jpeg.len(),
        output = merged.len(),
        exif = blob.map_or(0, <[u8]>::len),
        "Spliced EXIF segment"
    );
    Ok(merged.to_vec())
}

// =============================================================================
// Tests
// =============================================================================

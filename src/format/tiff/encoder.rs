//! Encoding the directory set into a TIFF blob.
//!
//! Encoding runs in two passes. The first pass converts every value to wire
//! form and assigns each directory, overflow region and the thumbnail its
//! final offset. The second pass patches the pointer tags with those offsets
//! and serializes. Nothing is written before every offset is known.
//!
//! Layout, in order:
//!
//! ```text
//! header | Zeroth | overflow | Exif | overflow | GPS | overflow
//!        | Interop | overflow | First | overflow | thumbnail
//! ```
//!
//! Directories with nothing to write are omitted, except Zeroth.

use tracing::debug;

use crate::error::{ExifError, TiffError, ValueError};

use super::directory::{ExifData, Ifd, IfdKind};
use super::parser::{
    ByteOrder, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE,
    TIFF_HEADER_SIZE, VALUE_OFFSET_SIZE,
};
use super::tags::ids;
use super::values::{encode_value, EncodedValue};

/// Largest thumbnail that still fits in an APP1 segment alongside its IFDs.
pub const MAX_THUMBNAIL_SIZE: usize = 64_000;

/// Encode `data` as a TIFF blob using big-endian byte order.
pub fn encode(data: &ExifData) -> Result<Vec<u8>, ExifError> {
    TiffEncoder::default().encode(data)
}

/// TIFF blob writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffEncoder {
    byte_order: ByteOrder,
}

impl TiffEncoder {
    pub const fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }

    /// Encode `data` into a TIFF blob (no "Exif\0\0" prefix).
    ///
    /// Pointer tags in the input (ExifTag, GPSTag, InteroperabilityTag, and
    /// the thumbnail offset/length in First) are ignored; their values are
    /// derived from the layout.
    pub fn encode(&self, data: &ExifData) -> Result<Vec<u8>, ExifError> {
        if let Some(thumbnail) = &data.thumbnail {
            if thumbnail.len() > MAX_THUMBNAIL_SIZE {
                return Err(ValueError::ThumbnailTooLarge {
                    size: thumbnail.len(),
                    max: MAX_THUMBNAIL_SIZE,
                }
                .into());
            }
        }

        let mut plan = LayoutPlan::build(data, self.byte_order)?;
        plan.assign_offsets()?;
        plan.patch_pointers();
        let blob = plan.serialize();

        debug!(
            byte_order = ?self.byte_order,
            ifds = plan.ifds.len(),
            size = blob.len(),
            "Encoded EXIF blob"
        );

        Ok(blob)
    }
}

// =============================================================================
// Layout planning
// =============================================================================

#[derive(Debug)]
struct PlannedEntry {
    tag: u16,
    value: EncodedValue,
}

impl PlannedEntry {
    fn is_inline(&self) -> bool {
        self.value.bytes.len() <= VALUE_OFFSET_SIZE
    }
}

#[derive(Debug)]
struct PlannedIfd {
    kind: IfdKind,
    /// Sorted by tag before offsets are assigned
    entries: Vec<PlannedEntry>,
    offset: u32,
    overflow_offset: u32,
}

impl PlannedIfd {
    fn table_size(&self) -> usize {
        IFD_COUNT_SIZE + self.entries.len() * IFD_ENTRY_SIZE + IFD_NEXT_OFFSET_SIZE
    }

    fn overflow_size(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.is_inline())
            .map(|entry| entry.value.bytes.len())
            .sum()
    }

    fn set_long(&mut self, tag: u16, value: u32, byte_order: ByteOrder) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.tag == tag) {
            entry.value = EncodedValue::long(value, byte_order);
        }
    }
}

struct LayoutPlan<'a> {
    byte_order: ByteOrder,
    ifds: Vec<PlannedIfd>,
    thumbnail: Option<&'a [u8]>,
    thumbnail_offset: u32,
}

/// Tags whose values are computed from the layout rather than taken from input.
fn derived_tags(kind: IfdKind) -> &'static [u16] {
    match kind {
        IfdKind::Zeroth => &[ids::EXIF_IFD_POINTER, ids::GPS_IFD_POINTER],
        IfdKind::Exif => &[ids::INTEROP_IFD_POINTER],
        IfdKind::First => &[
            ids::JPEG_INTERCHANGE_FORMAT,
            ids::JPEG_INTERCHANGE_FORMAT_LENGTH,
        ],
        IfdKind::Gps | IfdKind::Interop => &[],
    }
}

fn encode_entries(
    kind: IfdKind,
    ifd: &Ifd,
    byte_order: ByteOrder,
) -> Result<Vec<PlannedEntry>, ValueError> {
    let derived = derived_tags(kind);
    ifd.iter()
        .filter(|(tag, _)| !derived.contains(*tag))
        .map(|(&tag, value)| {
            Ok(PlannedEntry {
                tag,
                value: encode_value(kind, tag, value, byte_order)?,
            })
        })
        .collect()
}

impl<'a> LayoutPlan<'a> {
    /// Convert all values and decide which directories are written.
    fn build(data: &'a ExifData, byte_order: ByteOrder) -> Result<Self, ValueError> {
        let mut entries: Vec<(IfdKind, Vec<PlannedEntry>)> = Vec::new();
        for kind in IfdKind::ALL {
            entries.push((kind, encode_entries(kind, data.ifd(kind), byte_order)?));
        }

        let thumbnail = data.thumbnail.as_deref();
        let non_empty = |kind: IfdKind| entries.iter().any(|(k, e)| *k == kind && !e.is_empty());

        let has_interop = non_empty(IfdKind::Interop);
        let has_exif = non_empty(IfdKind::Exif) || has_interop;
        let has_gps = non_empty(IfdKind::Gps);
        let has_first = non_empty(IfdKind::First) || thumbnail.is_some();

        let placeholder = |tag| PlannedEntry {
            tag,
            value: EncodedValue::long(0, byte_order),
        };

        let mut ifds = Vec::new();
        for (kind, mut kind_entries) in entries {
            let present = match kind {
                IfdKind::Zeroth => true,
                IfdKind::Exif => has_exif,
                IfdKind::Gps => has_gps,
                IfdKind::Interop => has_interop,
                IfdKind::First => has_first,
            };
            if !present {
                continue;
            }

            match kind {
                IfdKind::Zeroth => {
                    if has_exif {
                        kind_entries.push(placeholder(ids::EXIF_IFD_POINTER));
                    }
                    if has_gps {
                        kind_entries.push(placeholder(ids::GPS_IFD_POINTER));
                    }
                }
                IfdKind::Exif if has_interop => {
                    kind_entries.push(placeholder(ids::INTEROP_IFD_POINTER));
                }
                IfdKind::First if thumbnail.is_some() => {
                    kind_entries.push(placeholder(ids::JPEG_INTERCHANGE_FORMAT));
                    kind_entries.push(placeholder(ids::JPEG_INTERCHANGE_FORMAT_LENGTH));
                }
                _ => {}
            }

            kind_entries.sort_by_key(|entry| entry.tag);

            ifds.push(PlannedIfd {
                kind,
                entries: kind_entries,
                offset: 0,
                overflow_offset: 0,
            });
        }

        Ok(Self {
            byte_order,
            ifds,
            thumbnail,
            thumbnail_offset: 0,
        })
    }

    /// First pass: give every directory, overflow region and the thumbnail
    /// its absolute offset.
    fn assign_offsets(&mut self) -> Result<(), TiffError> {
        let mut cursor = TIFF_HEADER_SIZE as u64;
        for ifd in &mut self.ifds {
            if u16::try_from(ifd.entries.len()).is_err() {
                return Err(TiffError::TooManyEntries {
                    ifd: ifd.kind,
                    entries: ifd.entries.len(),
                });
            }
            ifd.offset = to_offset(cursor)?;
            cursor += ifd.table_size() as u64;
            ifd.overflow_offset = to_offset(cursor)?;
            cursor += ifd.overflow_size() as u64;
        }

        self.thumbnail_offset = to_offset(cursor)?;
        cursor += self.thumbnail.map_or(0, <[u8]>::len) as u64;
        to_offset(cursor)?;

        Ok(())
    }

    fn offset_of(&self, kind: IfdKind) -> Option<u32> {
        self.ifds
            .iter()
            .find(|ifd| ifd.kind == kind)
            .map(|ifd| ifd.offset)
    }

    /// Replace pointer placeholders with the assigned offsets.
    fn patch_pointers(&mut self) {
        let order = self.byte_order;
        let exif = self.offset_of(IfdKind::Exif);
        let gps = self.offset_of(IfdKind::Gps);
        let interop = self.offset_of(IfdKind::Interop);
        let thumbnail = self
            .thumbnail
            .map(|bytes| (self.thumbnail_offset, bytes.len() as u32));

        for ifd in &mut self.ifds {
            match ifd.kind {
                IfdKind::Zeroth => {
                    if let Some(offset) = exif {
                        ifd.set_long(ids::EXIF_IFD_POINTER, offset, order);
                    }
                    if let Some(offset) = gps {
                        ifd.set_long(ids::GPS_IFD_POINTER, offset, order);
                    }
                }
                IfdKind::Exif => {
                    if let Some(offset) = interop {
                        ifd.set_long(ids::INTEROP_IFD_POINTER, offset, order);
                    }
                }
                IfdKind::First => {
                    if let Some((offset, len)) = thumbnail {
                        ifd.set_long(ids::JPEG_INTERCHANGE_FORMAT, offset, order);
                        ifd.set_long(ids::JPEG_INTERCHANGE_FORMAT_LENGTH, len, order);
                    }
                }
                IfdKind::Gps | IfdKind::Interop => {}
            }
        }
    }

    /// Second pass: write bytes. Offsets are final at this point.
    fn serialize(&self) -> Vec<u8> {
        let order = self.byte_order;
        let first = self.offset_of(IfdKind::First).unwrap_or(0);

        let mut buf = Vec::new();
        TiffHeader::new(order).write_to(&mut buf);

        for ifd in &self.ifds {
            debug_assert_eq!(buf.len(), ifd.offset as usize);

            order.put_u16(&mut buf, ifd.entries.len() as u16);
            let mut overflow_cursor = ifd.overflow_offset;
            for entry in &ifd.entries {
                order.put_u16(&mut buf, entry.tag);
                order.put_u16(&mut buf, entry.value.value_type.as_u16());
                order.put_u32(&mut buf, entry.value.count);
                if entry.is_inline() {
                    let mut field = [0u8; VALUE_OFFSET_SIZE];
                    field[..entry.value.bytes.len()].copy_from_slice(&entry.value.bytes);
                    buf.extend_from_slice(&field);
                } else {
                    order.put_u32(&mut buf, overflow_cursor);
                    overflow_cursor += entry.value.bytes.len() as u32;
                }
            }

            let next = if ifd.kind == IfdKind::Zeroth { first } else { 0 };
            order.put_u32(&mut buf, next);

            debug_assert_eq!(buf.len(), ifd.overflow_offset as usize);
            for entry in ifd.entries.iter().filter(|entry| !entry.is_inline()) {
                buf.extend_from_slice(&entry.value.bytes);
            }
        }

        if let Some(thumbnail) = self.thumbnail {
            debug_assert_eq!(buf.len(), self.thumbnail_offset as usize);
            buf.extend_from_slice(thumbnail);
        }

        buf
    }
}

fn to_offset(cursor: u64) -> Result<u32, TiffError> {
    u32::try_from(cursor).map_err(|_| TiffError::BlobTooLarge(cursor))
}

// =============================================================================
// Tests
// =============================================================================

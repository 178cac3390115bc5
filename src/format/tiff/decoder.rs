//! Decoding a TIFF blob into the directory set.
//!
//! The blob is held fully in memory; every offset read from it is checked
//! against its length before use, so a malformed blob yields an error rather
//! than a panic.

use tracing::{debug, warn};

use crate::error::TiffError;

use super::directory::{ExifData, Ifd, IfdKind};
use super::parser::{
    IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE,
};
use super::tags::ids;
use super::values::{decode_value, TagValue};

/// Decode a TIFF blob (no "Exif\0\0" prefix) into an [`ExifData`].
pub fn decode(blob: &[u8]) -> Result<ExifData, TiffError> {
    TiffDecoder::new(blob)?.decode()
}

/// Reader over an in-memory TIFF blob.
pub struct TiffDecoder<'a> {
    data: &'a [u8],
    header: TiffHeader,
}

impl<'a> TiffDecoder<'a> {
    /// Parse the header and prepare to read directories.
    pub fn new(data: &'a [u8]) -> Result<Self, TiffError> {
        let header = TiffHeader::parse(data, data.len() as u64)?;
        Ok(Self { data, header })
    }

    pub fn header(&self) -> &TiffHeader {
        &self.header
    }

    /// Read every directory reachable from the header.
    ///
    /// Zeroth is always read. Exif and GPS are read when Zeroth carries their
    /// pointer tags, Interop when Exif carries its pointer, and First when
    /// Zeroth has a non-zero next link.
    pub fn decode(&self) -> Result<ExifData, TiffError> {
        let mut result = ExifData::new();

        let (zeroth, next) = self.read_ifd(IfdKind::Zeroth, self.header.first_ifd_offset)?;

        if let Some(offset) = self.pointer(IfdKind::Zeroth, &zeroth, ids::EXIF_IFD_POINTER)? {
            result.exif = self.read_ifd(IfdKind::Exif, offset)?.0;
        }

        if let Some(offset) = self.pointer(IfdKind::Zeroth, &zeroth, ids::GPS_IFD_POINTER)? {
            result.gps = self.read_ifd(IfdKind::Gps, offset)?.0;
        }

        if let Some(offset) = self.pointer(IfdKind::Exif, &result.exif, ids::INTEROP_IFD_POINTER)? {
            result.interop = self.read_ifd(IfdKind::Interop, offset)?.0;
        }

        if next != 0 {
            let (first, _) = self.read_ifd(IfdKind::First, next)?;
            result.thumbnail = self.thumbnail(&first)?;
            result.first = first;
        }

        result.zeroth = zeroth;

        debug!(
            byte_order = ?self.header.byte_order,
            zeroth = result.zeroth.len(),
            exif = result.exif.len(),
            gps = result.gps.len(),
            interop = result.interop.len(),
            first = result.first.len(),
            thumbnail = result.thumbnail.as_ref().map_or(0, Vec::len),
            "Decoded EXIF blob"
        );

        Ok(result)
    }

    /// Read one IFD, returning its entries and the next-IFD offset.
    fn read_ifd(&self, kind: IfdKind, offset: u64) -> Result<(Ifd, u64), TiffError> {
        let size = self.data.len() as u64;
        if offset + IFD_COUNT_SIZE as u64 > size {
            return Err(TiffError::InvalidIfdOffset(offset));
        }

        let byte_order = self.header.byte_order;
        let start = offset as usize;
        let entry_count = byte_order.read_u16(&self.data[start..]);

        let table_start = start + IFD_COUNT_SIZE;
        let table_end = table_start + entry_count as usize * IFD_ENTRY_SIZE;
        if table_end + IFD_NEXT_OFFSET_SIZE > self.data.len() {
            return Err(TiffError::TruncatedIfd {
                offset,
                entries: entry_count,
            });
        }

        let mut ifd = Ifd::new();
        for entry_bytes in self.data[table_start..table_end].chunks_exact(IFD_ENTRY_SIZE) {
            let entry = IfdEntry::parse(entry_bytes, byte_order);
            let Some(value_type) = entry.value_type else {
                warn!(
                    ifd = %kind,
                    tag = format_args!("0x{:04X}", entry.tag),
                    type_code = entry.field_type_raw,
                    "Skipping entry with unknown type code"
                );
                continue;
            };

            let bytes = self.value_bytes(&entry)?;
            ifd.insert(entry.tag, decode_value(value_type, bytes, byte_order));
        }

        // only the Zeroth link is followed; read_ifd bounds-checks it there
        let next = byte_order.read_u32(&self.data[table_end..]) as u64;

        Ok((ifd, next))
    }

    /// The payload bytes of an entry, inline or dereferenced.
    fn value_bytes<'e>(&self, entry: &'e IfdEntry) -> Result<&'e [u8], TiffError>
    where
        'a: 'e,
    {
        let len = entry.value_byte_size().unwrap_or(0);
        if entry.is_inline() {
            return Ok(&entry.value_offset_bytes[..len as usize]);
        }

        let offset = entry.value_offset(self.header.byte_order);
        self.slice(offset, len)
    }

    fn slice(&self, offset: u64, len: u64) -> Result<&'a [u8], TiffError> {
        let size = self.data.len() as u64;
        match offset.checked_add(len) {
            Some(end) if end <= size => Ok(&self.data[offset as usize..end as usize]),
            _ => Err(TiffError::ValueOutOfBounds { offset, len, size }),
        }
    }

    /// Resolve a pointer tag to an IFD offset. Absent or zero means no IFD.
    fn pointer(&self, ifd: IfdKind, dir: &Ifd, tag: u16) -> Result<Option<u64>, TiffError> {
        match dir.get(&tag) {
            None | Some(TagValue::Int(0)) => Ok(None),
            Some(TagValue::Int(offset)) if *offset > 0 => {
                let offset = *offset as u64;
                if offset >= self.data.len() as u64 {
                    return Err(TiffError::InvalidIfdOffset(offset));
                }
                Ok(Some(offset))
            }
            Some(other) => Err(TiffError::InvalidTagValue {
                ifd,
                tag,
                message: format!("expected a single offset, got {}", other.kind_name()),
            }),
        }
    }

    /// Extract the thumbnail described by JPEGInterchangeFormat(Length).
    fn thumbnail(&self, first: &Ifd) -> Result<Option<Vec<u8>>, TiffError> {
        let offset = first.get(&ids::JPEG_INTERCHANGE_FORMAT);
        let length = first.get(&ids::JPEG_INTERCHANGE_FORMAT_LENGTH);

        match (offset, length) {
            (Some(TagValue::Int(offset)), Some(TagValue::Int(length)))
                if *offset >= 0 && *length >= 0 =>
            {
                let bytes = self.slice(*offset as u64, *length as u64)?;
                Ok(Some(bytes.to_vec()))
            }
            (None, _) | (_, None) => Ok(None),
            (Some(_), Some(_)) => Err(TiffError::InvalidTagValue {
                ifd: IfdKind::First,
                tag: ids::JPEG_INTERCHANGE_FORMAT,
                message: "thumbnail offset and length must be single integers".to_string(),
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

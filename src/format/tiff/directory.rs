//! The directory set: the five fixed IFD slots of an EXIF structure.
//!
//! ```text
//! Zeroth ──ExifTag──▶ Exif ──InteroperabilityTag──▶ Interop
//!   │    ──GPSTag───▶ GPS
//!   └────next IFD───▶ First (thumbnail)
//! ```
//!
//! The graph is fixed, so it is modelled as named slots rather than a tree.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::values::TagValue;

/// One directory: tag id to value, iterated in ascending tag order.
pub type Ifd = BTreeMap<u16, TagValue>;

/// The directory slots, in encode layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IfdKind {
    /// Image-level tags
    Zeroth,
    /// Camera-level tags, reached via ExifTag in Zeroth
    Exif,
    /// Location tags, reached via GPSTag in Zeroth
    Gps,
    /// Interoperability tags, reached via InteroperabilityTag in Exif
    Interop,
    /// Thumbnail tags, reached via the Zeroth "next IFD" link
    First,
}

impl IfdKind {
    /// All slots in layout order.
    pub const ALL: [IfdKind; 5] = [
        IfdKind::Zeroth,
        IfdKind::Exif,
        IfdKind::Gps,
        IfdKind::Interop,
        IfdKind::First,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            IfdKind::Zeroth => "0th",
            IfdKind::Exif => "Exif",
            IfdKind::Gps => "GPS",
            IfdKind::Interop => "Interop",
            IfdKind::First => "1st",
        }
    }
}

impl fmt::Display for IfdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded or to-be-encoded EXIF structure.
///
/// Pointer tags (ExifTag, GPSTag, InteroperabilityTag) appear in decoded
/// directories as plain integers holding the offsets read from the blob.
/// On encode they are ignored and recomputed from the actual layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExifData {
    pub zeroth: Ifd,
    pub exif: Ifd,
    pub gps: Ifd,
    pub interop: Ifd,
    pub first: Ifd,
    /// Embedded thumbnail (normally a complete JPEG stream)
    pub thumbnail: Option<Vec<u8>>,
}

impl ExifData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The directory in slot `kind`.
    pub fn ifd(&self, kind: IfdKind) -> &Ifd {
        match kind {
            IfdKind::Zeroth => &self.zeroth,
            IfdKind::Exif => &self.exif,
            IfdKind::Gps => &self.gps,
            IfdKind::Interop => &self.interop,
            IfdKind::First => &self.first,
        }
    }

    /// Mutable access to the directory in slot `kind`.
    pub fn ifd_mut(&mut self, kind: IfdKind) -> &mut Ifd {
        match kind {
            IfdKind::Zeroth => &mut self.zeroth,
            IfdKind::Exif => &mut self.exif,
            IfdKind::Gps => &mut self.gps,
            IfdKind::Interop => &mut self.interop,
            IfdKind::First => &mut self.first,
        }
    }

    /// True when no directory holds any tag and there is no thumbnail.
    pub fn is_empty(&self) -> bool {
        IfdKind::ALL.iter().all(|&kind| self.ifd(kind).is_empty()) && self.thumbnail.is_none()
    }
}

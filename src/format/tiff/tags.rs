//! TIFF/EXIF value types and the tag catalogue.
//!
//! This module defines the vocabulary for the codec:
//! - Value types that determine how values are encoded on the wire
//! - Per-directory tag tables giving each known tag its documented type and,
//!   for fixed-arity tags, its element count
//!
//! The Zeroth and First IFDs share the image tag table; Exif, GPS, and
//! Interoperability each have their own namespace.

use std::fmt;

use super::directory::IfdKind;

// =============================================================================
// Value Types
// =============================================================================

/// TIFF value types that determine how values are encoded.
///
/// The catalogue is closed: every code the format defines for classic TIFF
/// is listed here, and unknown codes are skipped by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ValueType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit ASCII character, NUL-terminated on disk
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two unsigned 32-bit integers: numerator, denominator
    Rational = 5,

    /// Signed 8-bit integer
    SByte = 6,

    /// Opaque byte data
    Undefined = 7,

    /// Signed 16-bit integer
    SShort = 8,

    /// Signed 32-bit integer
    SLong = 9,

    /// Two signed 32-bit integers: numerator, denominator
    SRational = 10,

    /// IEEE 754 single precision
    Float = 11,

    /// IEEE 754 double precision
    Double = 12,
}

impl ValueType {
    /// Size of a single element of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            ValueType::Byte | ValueType::Ascii | ValueType::SByte | ValueType::Undefined => 1,
            ValueType::Short | ValueType::SShort => 2,
            ValueType::Long | ValueType::SLong | ValueType::Float => 4,
            ValueType::Rational | ValueType::SRational | ValueType::Double => 8,
        }
    }

    /// Create a ValueType from its numeric code.
    ///
    /// Returns `None` for unknown codes.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(ValueType::Byte),
            2 => Some(ValueType::Ascii),
            3 => Some(ValueType::Short),
            4 => Some(ValueType::Long),
            5 => Some(ValueType::Rational),
            6 => Some(ValueType::SByte),
            7 => Some(ValueType::Undefined),
            8 => Some(ValueType::SShort),
            9 => Some(ValueType::SLong),
            10 => Some(ValueType::SRational),
            11 => Some(ValueType::Float),
            12 => Some(ValueType::Double),
            _ => None,
        }
    }

    /// Get the numeric type code.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Human-readable name, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Byte => "BYTE",
            ValueType::Ascii => "ASCII",
            ValueType::Short => "SHORT",
            ValueType::Long => "LONG",
            ValueType::Rational => "RATIONAL",
            ValueType::SByte => "SBYTE",
            ValueType::Undefined => "UNDEFINED",
            ValueType::SShort => "SSHORT",
            ValueType::SLong => "SLONG",
            ValueType::SRational => "SRATIONAL",
            ValueType::Float => "FLOAT",
            ValueType::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Tag Catalogue
// =============================================================================

/// Number of elements a tag is documented to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    /// Any number of elements
    Any,
    /// Exactly this many elements
    Exactly(u32),
}

/// Catalogue entry for one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    pub tag: u16,
    pub name: &'static str,
    pub value_type: ValueType,
    pub count: Count,
}

const fn tag(tag: u16, name: &'static str, value_type: ValueType, count: Count) -> TagInfo {
    TagInfo {
        tag,
        name,
        value_type,
        count,
    }
}

use Count::{Any, Exactly};
use ValueType::{Ascii, Byte, Long, Rational, SRational, SShort, Short, Undefined};

/// Tag ids used directly by the codec and commonly by callers.
pub mod ids {
    // Image (Zeroth / First)
    pub const IMAGE_WIDTH: u16 = 0x0100;
    pub const IMAGE_LENGTH: u16 = 0x0101;
    pub const BITS_PER_SAMPLE: u16 = 0x0102;
    pub const COMPRESSION: u16 = 0x0103;
    pub const IMAGE_DESCRIPTION: u16 = 0x010E;
    pub const MAKE: u16 = 0x010F;
    pub const MODEL: u16 = 0x0110;
    pub const ORIENTATION: u16 = 0x0112;
    pub const X_RESOLUTION: u16 = 0x011A;
    pub const Y_RESOLUTION: u16 = 0x011B;
    pub const RESOLUTION_UNIT: u16 = 0x0128;
    pub const SOFTWARE: u16 = 0x0131;
    pub const DATE_TIME: u16 = 0x0132;
    pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;
    pub const COPYRIGHT: u16 = 0x8298;
    pub const EXIF_IFD_POINTER: u16 = 0x8769;
    pub const GPS_IFD_POINTER: u16 = 0x8825;
    pub const BLACK_LEVEL_DELTA_H: u16 = 0xC61B;

    // Exif
    pub const EXPOSURE_TIME: u16 = 0x829A;
    pub const F_NUMBER: u16 = 0x829D;
    pub const OECF: u16 = 0x8828;
    pub const ISO_SPEED: u16 = 0x8833;
    pub const EXIF_VERSION: u16 = 0x9000;
    pub const DATE_TIME_ORIGINAL: u16 = 0x9003;
    pub const EXPOSURE_BIAS_VALUE: u16 = 0x9204;
    pub const USER_COMMENT: u16 = 0x9286;
    pub const INTEROP_IFD_POINTER: u16 = 0xA005;
    pub const SHARPNESS: u16 = 0xA40A;
    pub const LENS_SPECIFICATION: u16 = 0xA432;
    pub const LENS_MAKE: u16 = 0xA433;

    // GPS
    pub const GPS_VERSION_ID: u16 = 0x0000;
    pub const GPS_LATITUDE_REF: u16 = 0x0001;
    pub const GPS_LATITUDE: u16 = 0x0002;
    pub const GPS_ALTITUDE_REF: u16 = 0x0005;
    pub const GPS_ALTITUDE: u16 = 0x0006;
    pub const GPS_DATE_STAMP: u16 = 0x001D;
    pub const GPS_DIFFERENTIAL: u16 = 0x001E;

    // Interoperability
    pub const INTEROP_INDEX: u16 = 0x0001;
    pub const INTEROP_VERSION: u16 = 0x0002;
}

/// Image tags, valid in the Zeroth and First IFDs. Sorted by tag id.
static IMAGE_TAGS: &[TagInfo] = &[
    tag(0x000B, "ProcessingSoftware", Ascii, Any),
    tag(0x00FE, "NewSubfileType", Long, Exactly(1)),
    tag(0x00FF, "SubfileType", Short, Exactly(1)),
    tag(0x0100, "ImageWidth", Long, Exactly(1)),
    tag(0x0101, "ImageLength", Long, Exactly(1)),
    tag(0x0102, "BitsPerSample", Short, Any),
    tag(0x0103, "Compression", Short, Exactly(1)),
    tag(0x0106, "PhotometricInterpretation", Short, Exactly(1)),
    tag(0x0107, "Threshholding", Short, Exactly(1)),
    tag(0x0108, "CellWidth", Short, Exactly(1)),
    tag(0x0109, "CellLength", Short, Exactly(1)),
    tag(0x010A, "FillOrder", Short, Exactly(1)),
    tag(0x010D, "DocumentName", Ascii, Any),
    tag(0x010E, "ImageDescription", Ascii, Any),
    tag(0x010F, "Make", Ascii, Any),
    tag(0x0110, "Model", Ascii, Any),
    tag(0x0111, "StripOffsets", Long, Any),
    tag(0x0112, "Orientation", Short, Exactly(1)),
    tag(0x0115, "SamplesPerPixel", Short, Exactly(1)),
    tag(0x0116, "RowsPerStrip", Long, Exactly(1)),
    tag(0x0117, "StripByteCounts", Long, Any),
    tag(0x011A, "XResolution", Rational, Exactly(1)),
    tag(0x011B, "YResolution", Rational, Exactly(1)),
    tag(0x011C, "PlanarConfiguration", Short, Exactly(1)),
    tag(0x0122, "GrayResponseUnit", Short, Exactly(1)),
    tag(0x0123, "GrayResponseCurve", Short, Any),
    tag(0x0124, "T4Options", Long, Exactly(1)),
    tag(0x0125, "T6Options", Long, Exactly(1)),
    tag(0x0128, "ResolutionUnit", Short, Exactly(1)),
    tag(0x012D, "TransferFunction", Short, Any),
    tag(0x0131, "Software", Ascii, Any),
    tag(0x0132, "DateTime", Ascii, Any),
    tag(0x013B, "Artist", Ascii, Any),
    tag(0x013C, "HostComputer", Ascii, Any),
    tag(0x013D, "Predictor", Short, Exactly(1)),
    tag(0x013E, "WhitePoint", Rational, Exactly(2)),
    tag(0x013F, "PrimaryChromaticities", Rational, Exactly(6)),
    tag(0x0140, "ColorMap", Short, Any),
    tag(0x0141, "HalftoneHints", Short, Exactly(2)),
    tag(0x0142, "TileWidth", Long, Exactly(1)),
    tag(0x0143, "TileLength", Long, Exactly(1)),
    tag(0x0144, "TileOffsets", Long, Any),
    tag(0x0145, "TileByteCounts", Long, Any),
    tag(0x014A, "SubIFDs", Long, Any),
    tag(0x014C, "InkSet", Short, Exactly(1)),
    tag(0x014D, "InkNames", Ascii, Any),
    tag(0x014E, "NumberOfInks", Short, Exactly(1)),
    tag(0x0150, "DotRange", Byte, Any),
    tag(0x0151, "TargetPrinter", Ascii, Any),
    tag(0x0152, "ExtraSamples", Short, Any),
    tag(0x0153, "SampleFormat", Short, Any),
    tag(0x0154, "SMinSampleValue", Short, Any),
    tag(0x0155, "SMaxSampleValue", Short, Any),
    tag(0x0156, "TransferRange", Short, Exactly(6)),
    tag(0x0157, "ClipPath", Byte, Any),
    tag(0x0158, "XClipPathUnits", Long, Exactly(1)),
    tag(0x0159, "YClipPathUnits", Long, Exactly(1)),
    tag(0x015A, "Indexed", Short, Exactly(1)),
    tag(0x015B, "JPEGTables", Undefined, Any),
    tag(0x015F, "OPIProxy", Short, Exactly(1)),
    tag(0x0200, "JPEGProc", Long, Exactly(1)),
    tag(0x0201, "JPEGInterchangeFormat", Long, Exactly(1)),
    tag(0x0202, "JPEGInterchangeFormatLength", Long, Exactly(1)),
    tag(0x0203, "JPEGRestartInterval", Short, Exactly(1)),
    tag(0x0205, "JPEGLosslessPredictors", Short, Any),
    tag(0x0206, "JPEGPointTransforms", Short, Any),
    tag(0x0207, "JPEGQTables", Long, Any),
    tag(0x0208, "JPEGDCTables", Long, Any),
    tag(0x0209, "JPEGACTables", Long, Any),
    tag(0x0211, "YCbCrCoefficients", Rational, Exactly(3)),
    tag(0x0212, "YCbCrSubSampling", Short, Exactly(2)),
    tag(0x0213, "YCbCrPositioning", Short, Exactly(1)),
    tag(0x0214, "ReferenceBlackWhite", Rational, Exactly(6)),
    tag(0x02BC, "XMLPacket", Byte, Any),
    tag(0x4746, "Rating", Short, Exactly(1)),
    tag(0x4749, "RatingPercent", Short, Exactly(1)),
    tag(0x800D, "ImageID", Ascii, Any),
    tag(0x828D, "CFARepeatPatternDim", Short, Exactly(2)),
    tag(0x828E, "CFAPattern", Byte, Any),
    tag(0x828F, "BatteryLevel", Rational, Exactly(1)),
    tag(0x8298, "Copyright", Ascii, Any),
    tag(0x829A, "ExposureTime", Rational, Exactly(1)),
    tag(0x83BB, "IPTCNAA", Long, Any),
    tag(0x8649, "ImageResources", Byte, Any),
    tag(0x8769, "ExifTag", Long, Exactly(1)),
    tag(0x8773, "InterColorProfile", Undefined, Any),
    tag(0x8822, "ExposureProgram", Short, Exactly(1)),
    tag(0x8824, "SpectralSensitivity", Ascii, Any),
    tag(0x8825, "GPSTag", Long, Exactly(1)),
    tag(0x8827, "ISOSpeedRatings", Short, Any),
    tag(0x8828, "OECF", Undefined, Any),
    tag(0x8829, "Interlace", Short, Exactly(1)),
    tag(0x882A, "TimeZoneOffset", SShort, Any),
    tag(0x882B, "SelfTimerMode", Short, Exactly(1)),
    tag(0x9003, "DateTimeOriginal", Ascii, Any),
    tag(0x9102, "CompressedBitsPerPixel", Rational, Exactly(1)),
    tag(0x9201, "ShutterSpeedValue", SRational, Exactly(1)),
    tag(0x9202, "ApertureValue", Rational, Exactly(1)),
    tag(0x9203, "BrightnessValue", SRational, Exactly(1)),
    tag(0x9204, "ExposureBiasValue", SRational, Exactly(1)),
    tag(0x9205, "MaxApertureValue", Rational, Exactly(1)),
    tag(0x9206, "SubjectDistance", SRational, Exactly(1)),
    tag(0x9207, "MeteringMode", Short, Exactly(1)),
    tag(0x9208, "LightSource", Short, Exactly(1)),
    tag(0x9209, "Flash", Short, Exactly(1)),
    tag(0x920A, "FocalLength", Rational, Exactly(1)),
    tag(0x920B, "FlashEnergy", Rational, Any),
    tag(0x920C, "SpatialFrequencyResponse", Undefined, Any),
    tag(0x920D, "Noise", Undefined, Any),
    tag(0x920E, "FocalPlaneXResolution", Rational, Exactly(1)),
    tag(0x920F, "FocalPlaneYResolution", Rational, Exactly(1)),
    tag(0x9210, "FocalPlaneResolutionUnit", Short, Exactly(1)),
    tag(0x9211, "ImageNumber", Long, Exactly(1)),
    tag(0x9212, "SecurityClassification", Ascii, Any),
    tag(0x9213, "ImageHistory", Ascii, Any),
    tag(0x9214, "SubjectLocation", Short, Any),
    tag(0x9215, "ExposureIndex", Rational, Any),
    tag(0x9216, "TIFFEPStandardID", Byte, Exactly(4)),
    tag(0x9217, "SensingMethod", Short, Exactly(1)),
    tag(0x9C9B, "XPTitle", Byte, Any),
    tag(0x9C9C, "XPComment", Byte, Any),
    tag(0x9C9D, "XPAuthor", Byte, Any),
    tag(0x9C9E, "XPKeywords", Byte, Any),
    tag(0x9C9F, "XPSubject", Byte, Any),
    tag(0xC4A5, "PrintImageMatching", Undefined, Any),
    tag(0xC612, "DNGVersion", Byte, Exactly(4)),
    tag(0xC613, "DNGBackwardVersion", Byte, Exactly(4)),
    tag(0xC614, "UniqueCameraModel", Ascii, Any),
    tag(0xC615, "LocalizedCameraModel", Byte, Any),
    tag(0xC616, "CFAPlaneColor", Byte, Any),
    tag(0xC617, "CFALayout", Short, Exactly(1)),
    tag(0xC618, "LinearizationTable", Short, Any),
    tag(0xC619, "BlackLevelRepeatDim", Short, Exactly(2)),
    tag(0xC61A, "BlackLevel", Rational, Any),
    tag(0xC61B, "BlackLevelDeltaH", SRational, Any),
    tag(0xC61C, "BlackLevelDeltaV", SRational, Any),
    tag(0xC61D, "WhiteLevel", Short, Any),
    tag(0xC61E, "DefaultScale", Rational, Exactly(2)),
    tag(0xC61F, "DefaultCropOrigin", Short, Exactly(2)),
    tag(0xC620, "DefaultCropSize", Short, Exactly(2)),
    tag(0xC621, "ColorMatrix1", SRational, Any),
    tag(0xC622, "ColorMatrix2", SRational, Any),
    tag(0xC623, "CameraCalibration1", SRational, Any),
    tag(0xC624, "CameraCalibration2", SRational, Any),
    tag(0xC625, "ReductionMatrix1", SRational, Any),
    tag(0xC626, "ReductionMatrix2", SRational, Any),
    tag(0xC627, "AnalogBalance", Rational, Any),
    tag(0xC628, "AsShotNeutral", Short, Any),
    tag(0xC629, "AsShotWhiteXY", Rational, Exactly(2)),
    tag(0xC62A, "BaselineExposure", SRational, Exactly(1)),
    tag(0xC62B, "BaselineNoise", Rational, Exactly(1)),
    tag(0xC62C, "BaselineSharpness", Rational, Exactly(1)),
    tag(0xC62D, "BayerGreenSplit", Long, Exactly(1)),
    tag(0xC62E, "LinearResponseLimit", Rational, Exactly(1)),
    tag(0xC62F, "CameraSerialNumber", Ascii, Any),
    tag(0xC630, "LensInfo", Rational, Exactly(4)),
    tag(0xC631, "ChromaBlurRadius", Rational, Exactly(1)),
    tag(0xC632, "AntiAliasStrength", Rational, Exactly(1)),
    tag(0xC633, "ShadowScale", SRational, Exactly(1)),
    tag(0xC634, "DNGPrivateData", Byte, Any),
    tag(0xC635, "MakerNoteSafety", Short, Exactly(1)),
];

/// Exif IFD tags. Sorted by tag id.
static EXIF_TAGS: &[TagInfo] = &[
    tag(0x829A, "ExposureTime", Rational, Exactly(1)),
    tag(0x829D, "FNumber", Rational, Exactly(1)),
    tag(0x8822, "ExposureProgram", Short, Exactly(1)),
    tag(0x8824, "SpectralSensitivity", Ascii, Any),
    tag(0x8827, "ISOSpeedRatings", Short, Any),
    tag(0x8828, "OECF", Undefined, Any),
    tag(0x8830, "SensitivityType", Short, Exactly(1)),
    tag(0x8831, "StandardOutputSensitivity", Long, Exactly(1)),
    tag(0x8832, "RecommendedExposureIndex", Long, Exactly(1)),
    tag(0x8833, "ISOSpeed", Long, Exactly(1)),
    tag(0x8834, "ISOSpeedLatitudeyyy", Long, Exactly(1)),
    tag(0x8835, "ISOSpeedLatitudezzz", Long, Exactly(1)),
    tag(0x9000, "ExifVersion", Undefined, Exactly(4)),
    tag(0x9003, "DateTimeOriginal", Ascii, Any),
    tag(0x9004, "DateTimeDigitized", Ascii, Any),
    tag(0x9010, "OffsetTime", Ascii, Any),
    tag(0x9011, "OffsetTimeOriginal", Ascii, Any),
    tag(0x9012, "OffsetTimeDigitized", Ascii, Any),
    tag(0x9101, "ComponentsConfiguration", Undefined, Exactly(4)),
    tag(0x9102, "CompressedBitsPerPixel", Rational, Exactly(1)),
    tag(0x9201, "ShutterSpeedValue", SRational, Exactly(1)),
    tag(0x9202, "ApertureValue", Rational, Exactly(1)),
    tag(0x9203, "BrightnessValue", SRational, Exactly(1)),
    tag(0x9204, "ExposureBiasValue", SRational, Exactly(1)),
    tag(0x9205, "MaxApertureValue", Rational, Exactly(1)),
    tag(0x9206, "SubjectDistance", Rational, Exactly(1)),
    tag(0x9207, "MeteringMode", Short, Exactly(1)),
    tag(0x9208, "LightSource", Short, Exactly(1)),
    tag(0x9209, "Flash", Short, Exactly(1)),
    tag(0x920A, "FocalLength", Rational, Exactly(1)),
    tag(0x9214, "SubjectArea", Short, Any),
    tag(0x927C, "MakerNote", Undefined, Any),
    tag(0x9286, "UserComment", Undefined, Any),
    tag(0x9290, "SubSecTime", Ascii, Any),
    tag(0x9291, "SubSecTimeOriginal", Ascii, Any),
    tag(0x9292, "SubSecTimeDigitized", Ascii, Any),
    tag(0x9400, "Temperature", SRational, Exactly(1)),
    tag(0x9401, "Humidity", Rational, Exactly(1)),
    tag(0x9402, "Pressure", Rational, Exactly(1)),
    tag(0x9403, "WaterDepth", SRational, Exactly(1)),
    tag(0x9404, "Acceleration", Rational, Exactly(1)),
    tag(0x9405, "CameraElevationAngle", SRational, Exactly(1)),
    tag(0xA000, "FlashpixVersion", Undefined, Exactly(4)),
    tag(0xA001, "ColorSpace", Short, Exactly(1)),
    tag(0xA002, "PixelXDimension", Long, Exactly(1)),
    tag(0xA003, "PixelYDimension", Long, Exactly(1)),
    tag(0xA004, "RelatedSoundFile", Ascii, Any),
    tag(0xA005, "InteroperabilityTag", Long, Exactly(1)),
    tag(0xA20B, "FlashEnergy", Rational, Exactly(1)),
    tag(0xA20C, "SpatialFrequencyResponse", Undefined, Any),
    tag(0xA20E, "FocalPlaneXResolution", Rational, Exactly(1)),
    tag(0xA20F, "FocalPlaneYResolution", Rational, Exactly(1)),
    tag(0xA210, "FocalPlaneResolutionUnit", Short, Exactly(1)),
    tag(0xA214, "SubjectLocation", Short, Exactly(2)),
    tag(0xA215, "ExposureIndex", Rational, Exactly(1)),
    tag(0xA217, "SensingMethod", Short, Exactly(1)),
    tag(0xA300, "FileSource", Undefined, Exactly(1)),
    tag(0xA301, "SceneType", Undefined, Exactly(1)),
    tag(0xA302, "CFAPattern", Undefined, Any),
    tag(0xA401, "CustomRendered", Short, Exactly(1)),
    tag(0xA402, "ExposureMode", Short, Exactly(1)),
    tag(0xA403, "WhiteBalance", Short, Exactly(1)),
    tag(0xA404, "DigitalZoomRatio", Rational, Exactly(1)),
    tag(0xA405, "FocalLengthIn35mmFilm", Short, Exactly(1)),
    tag(0xA406, "SceneCaptureType", Short, Exactly(1)),
    tag(0xA407, "GainControl", Short, Exactly(1)),
    tag(0xA408, "Contrast", Short, Exactly(1)),
    tag(0xA409, "Saturation", Short, Exactly(1)),
    tag(0xA40A, "Sharpness", Short, Exactly(1)),
    tag(0xA40B, "DeviceSettingDescription", Undefined, Any),
    tag(0xA40C, "SubjectDistanceRange", Short, Exactly(1)),
    tag(0xA420, "ImageUniqueID", Ascii, Any),
    tag(0xA430, "CameraOwnerName", Ascii, Any),
    tag(0xA431, "BodySerialNumber", Ascii, Any),
    tag(0xA432, "LensSpecification", Rational, Exactly(4)),
    tag(0xA433, "LensMake", Ascii, Any),
    tag(0xA434, "LensModel", Ascii, Any),
    tag(0xA435, "LensSerialNumber", Ascii, Any),
    tag(0xA500, "Gamma", Rational, Exactly(1)),
];

/// GPS IFD tags. Sorted by tag id.
static GPS_TAGS: &[TagInfo] = &[
    tag(0x0000, "GPSVersionID", Byte, Exactly(4)),
    tag(0x0001, "GPSLatitudeRef", Ascii, Any),
    tag(0x0002, "GPSLatitude", Rational, Any),
    tag(0x0003, "GPSLongitudeRef", Ascii, Any),
    tag(0x0004, "GPSLongitude", Rational, Any),
    tag(0x0005, "GPSAltitudeRef", Byte, Exactly(1)),
    tag(0x0006, "GPSAltitude", Rational, Exactly(1)),
    tag(0x0007, "GPSTimeStamp", Rational, Exactly(3)),
    tag(0x0008, "GPSSatellites", Ascii, Any),
    tag(0x0009, "GPSStatus", Ascii, Any),
    tag(0x000A, "GPSMeasureMode", Ascii, Any),
    tag(0x000B, "GPSDOP", Rational, Exactly(1)),
    tag(0x000C, "GPSSpeedRef", Ascii, Any),
    tag(0x000D, "GPSSpeed", Rational, Exactly(1)),
    tag(0x000E, "GPSTrackRef", Ascii, Any),
    tag(0x000F, "GPSTrack", Rational, Exactly(1)),
    tag(0x0010, "GPSImgDirectionRef", Ascii, Any),
    tag(0x0011, "GPSImgDirection", Rational, Exactly(1)),
    tag(0x0012, "GPSMapDatum", Ascii, Any),
    tag(0x0013, "GPSDestLatitudeRef", Ascii, Any),
    tag(0x0014, "GPSDestLatitude", Rational, Any),
    tag(0x0015, "GPSDestLongitudeRef", Ascii, Any),
    tag(0x0016, "GPSDestLongitude", Rational, Any),
    tag(0x0017, "GPSDestBearingRef", Ascii, Any),
    tag(0x0018, "GPSDestBearing", Rational, Exactly(1)),
    tag(0x0019, "GPSDestDistanceRef", Ascii, Any),
    tag(0x001A, "GPSDestDistance", Rational, Exactly(1)),
    tag(0x001B, "GPSProcessingMethod", Undefined, Any),
    tag(0x001C, "GPSAreaInformation", Undefined, Any),
    tag(0x001D, "GPSDateStamp", Ascii, Any),
    tag(0x001E, "GPSDifferential", Short, Exactly(1)),
    tag(0x001F, "GPSHPositioningError", Rational, Exactly(1)),
];

/// Interoperability IFD tags. Sorted by tag id.
static INTEROP_TAGS: &[TagInfo] = &[
    tag(0x0001, "InteroperabilityIndex", Ascii, Any),
    tag(0x0002, "InteroperabilityVersion", Undefined, Exactly(4)),
    tag(0x1000, "RelatedImageFileFormat", Ascii, Any),
    tag(0x1001, "RelatedImageWidth", Long, Exactly(1)),
    tag(0x1002, "RelatedImageLength", Long, Exactly(1)),
];

/// The tag table for a directory slot.
pub fn catalogue(kind: IfdKind) -> &'static [TagInfo] {
    match kind {
        IfdKind::Zeroth | IfdKind::First => IMAGE_TAGS,
        IfdKind::Exif => EXIF_TAGS,
        IfdKind::Gps => GPS_TAGS,
        IfdKind::Interop => INTEROP_TAGS,
    }
}

/// Look up a tag in the table for `kind`.
///
/// Returns `None` for tags the catalogue does not document. Unknown tags are
/// not an error; their type is inferred from the value on encode.
pub fn lookup(kind: IfdKind, tag: u16) -> Option<&'static TagInfo> {
    let table = catalogue(kind);
    table
        .binary_search_by_key(&tag, |info| info.tag)
        .ok()
        .map(|index| &table[index])
}

/// Name of a tag, if catalogued.
pub fn tag_name(kind: IfdKind, tag: u16) -> Option<&'static str> {
    lookup(kind, tag).map(|info| info.name)
}

// =============================================================================
// Tests
// =============================================================================

//! Tag values and their per-type wire encoding.
//!
//! A [`TagValue`] is what callers see: an integer, a tuple of integers, a
//! rational pair, a string, or raw bytes. The binary type is not part of the
//! value; on decode it comes from the entry's type code, on encode from the
//! tag catalogue (or, for uncatalogued tags, from the value itself).

use serde::Serialize;

use crate::error::ValueError;

use super::directory::IfdKind;
use super::parser::ByteOrder;
use super::tags::{self, Count, ValueType};

// =============================================================================
// TagValue
// =============================================================================

/// The decoded representation of one directory entry.
///
/// Numeric entries with a count of one decode to the scalar variants
/// (`Int`, `Rational`, `Float`); any other count decodes to the tuple
/// variants. Rationals are kept as (numerator, denominator) and never reduced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// BYTE, SHORT, LONG and their signed variants, count 1
    Int(i64),
    /// BYTE, SHORT, LONG and their signed variants, any other count
    Ints(Vec<i64>),
    /// RATIONAL or SRATIONAL, count 1
    Rational(i64, i64),
    /// RATIONAL or SRATIONAL, any other count
    Rationals(Vec<(i64, i64)>),
    /// FLOAT or DOUBLE, count 1
    Float(f64),
    /// FLOAT or DOUBLE, any other count
    Floats(Vec<f64>),
    /// ASCII with trailing NULs removed, one char per byte (Latin-1)
    Ascii(String),
    /// UNDEFINED, never interpreted
    Undefined(Vec<u8>),
}

impl TagValue {
    /// Short description of the variant, as used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            TagValue::Int(_) => "integer",
            TagValue::Ints(_) => "integer tuple",
            TagValue::Rational(..) => "rational",
            TagValue::Rationals(_) => "rational tuple",
            TagValue::Float(_) => "float",
            TagValue::Floats(_) => "float tuple",
            TagValue::Ascii(_) => "string",
            TagValue::Undefined(_) => "bytes",
        }
    }

    /// The scalar integer, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TagValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The string, if this is ASCII.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Ascii(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Ascii(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Int(value)
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a value payload.
///
/// `bytes` must hold exactly `count` elements of `value_type`; the IFD reader
/// guarantees this before calling.
pub fn decode_value(value_type: ValueType, bytes: &[u8], byte_order: ByteOrder) -> TagValue {
    match value_type {
        ValueType::Ascii => TagValue::Ascii(decode_ascii(bytes)),
        ValueType::Undefined => TagValue::Undefined(bytes.to_vec()),
        ValueType::Byte => ints(bytes.iter().map(|&b| b as i64)),
        ValueType::SByte => ints(bytes.iter().map(|&b| b as i8 as i64)),
        ValueType::Short => ints(
            bytes
                .chunks_exact(2)
                .map(|c| byte_order.read_u16(c) as i64),
        ),
        ValueType::SShort => ints(
            bytes
                .chunks_exact(2)
                .map(|c| byte_order.read_u16(c) as i16 as i64),
        ),
        ValueType::Long => ints(
            bytes
                .chunks_exact(4)
                .map(|c| byte_order.read_u32(c) as i64),
        ),
        ValueType::SLong => ints(
            bytes
                .chunks_exact(4)
                .map(|c| byte_order.read_u32(c) as i32 as i64),
        ),
        ValueType::Rational => rationals(bytes.chunks_exact(8).map(|c| {
            (
                byte_order.read_u32(&c[..4]) as i64,
                byte_order.read_u32(&c[4..]) as i64,
            )
        })),
        ValueType::SRational => rationals(bytes.chunks_exact(8).map(|c| {
            (
                byte_order.read_u32(&c[..4]) as i32 as i64,
                byte_order.read_u32(&c[4..]) as i32 as i64,
            )
        })),
        ValueType::Float => floats(
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_bits(byte_order.read_u32(c)) as f64),
        ),
        ValueType::Double => floats(
            bytes
                .chunks_exact(8)
                .map(|c| f64::from_bits(byte_order.read_u64(c))),
        ),
    }
}

fn decode_ascii(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    bytes[..end].iter().map(|&b| char::from(b)).collect()
}

fn ints(values: impl Iterator<Item = i64>) -> TagValue {
    let mut values: Vec<i64> = values.collect();
    if values.len() == 1 {
        TagValue::Int(values.remove(0))
    } else {
        TagValue::Ints(values)
    }
}

fn rationals(values: impl Iterator<Item = (i64, i64)>) -> TagValue {
    let mut values: Vec<(i64, i64)> = values.collect();
    if values.len() == 1 {
        let (num, den) = values.remove(0);
        TagValue::Rational(num, den)
    } else {
        TagValue::Rationals(values)
    }
}

fn floats(values: impl Iterator<Item = f64>) -> TagValue {
    let mut values: Vec<f64> = values.collect();
    if values.len() == 1 {
        TagValue::Float(values.remove(0))
    } else {
        TagValue::Floats(values)
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// A value converted to wire form, ready for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedValue {
    pub value_type: ValueType,
    pub count: u32,
    pub bytes: Vec<u8>,
}

impl EncodedValue {
    /// A single LONG, used for pointer placeholders.
    pub fn long(value: u32, byte_order: ByteOrder) -> Self {
        let mut bytes = Vec::with_capacity(4);
        byte_order.put_u32(&mut bytes, value);
        Self {
            value_type: ValueType::Long,
            count: 1,
            bytes,
        }
    }
}

/// Convert a caller-supplied value for `tag` in directory `ifd` to wire form.
///
/// The binary type is taken from the tag catalogue when the tag is known and
/// inferred from the value otherwise.
///
/// # Errors
/// - `TypeMismatch` if the value variant cannot be written as the tag's type
/// - `ArityMismatch` if a fixed-arity tag gets the wrong element count
/// - `OutOfRange` if an element does not fit the type
pub fn encode_value(
    ifd: IfdKind,
    tag: u16,
    value: &TagValue,
    byte_order: ByteOrder,
) -> Result<EncodedValue, ValueError> {
    let info = tags::lookup(ifd, tag);
    let value_type = info.map_or_else(|| infer_type(value), |info| info.value_type);
    let encoder = ValueEncoder {
        ifd,
        tag,
        value_type,
        byte_order,
    };

    let encoded = encoder.encode(value)?;

    if let Some(Count::Exactly(expected)) = info.map(|info| info.count) {
        if value_type != ValueType::Ascii && encoded.count != expected {
            return Err(ValueError::ArityMismatch {
                ifd,
                tag,
                expected,
                actual: encoded.count as usize,
            });
        }
    }

    Ok(encoded)
}

/// Binary type for a tag the catalogue does not know.
fn infer_type(value: &TagValue) -> ValueType {
    match value {
        TagValue::Int(v) if *v < 0 => ValueType::SLong,
        TagValue::Ints(vs) if vs.iter().any(|v| *v < 0) => ValueType::SLong,
        TagValue::Int(_) | TagValue::Ints(_) => ValueType::Long,
        TagValue::Rational(num, den) if *num < 0 || *den < 0 => ValueType::SRational,
        TagValue::Rationals(vs) if vs.iter().any(|(n, d)| *n < 0 || *d < 0) => {
            ValueType::SRational
        }
        TagValue::Rational(..) | TagValue::Rationals(_) => ValueType::Rational,
        TagValue::Float(_) | TagValue::Floats(_) => ValueType::Double,
        TagValue::Ascii(_) => ValueType::Ascii,
        TagValue::Undefined(_) => ValueType::Undefined,
    }
}

struct ValueEncoder {
    ifd: IfdKind,
    tag: u16,
    value_type: ValueType,
    byte_order: ByteOrder,
}

impl ValueEncoder {
    fn encode(&self, value: &TagValue) -> Result<EncodedValue, ValueError> {
        let order = self.byte_order;
        let mut bytes = Vec::new();

        let count = match self.value_type {
            ValueType::Ascii => {
                let TagValue::Ascii(s) = value else {
                    return Err(self.mismatch(value));
                };
                for c in s.chars() {
                    bytes.push(self.ascii_byte(c)?);
                }
                bytes.push(0);
                bytes.len()
            }
            ValueType::Undefined => {
                let TagValue::Undefined(raw) = value else {
                    return Err(self.mismatch(value));
                };
                bytes.extend_from_slice(raw);
                raw.len()
            }
            ValueType::Byte => match value {
                // Camera firmware sometimes writes BYTE tags as UNDEFINED
                TagValue::Undefined(raw) => {
                    bytes.extend_from_slice(raw);
                    raw.len()
                }
                _ => {
                    let values = self.integers(value)?;
                    for &v in values {
                        bytes.push(self.check(v, 0, u8::MAX as i64)? as u8);
                    }
                    values.len()
                }
            },
            ValueType::SByte => {
                let values = self.integers(value)?;
                for &v in values {
                    bytes.push(self.check(v, i8::MIN as i64, i8::MAX as i64)? as i8 as u8);
                }
                values.len()
            }
            ValueType::Short => {
                let values = self.integers(value)?;
                for &v in values {
                    order.put_u16(&mut bytes, self.check(v, 0, u16::MAX as i64)? as u16);
                }
                values.len()
            }
            ValueType::SShort => {
                let values = self.integers(value)?;
                for &v in values {
                    let v = self.check(v, i16::MIN as i64, i16::MAX as i64)?;
                    order.put_u16(&mut bytes, v as i16 as u16);
                }
                values.len()
            }
            ValueType::Long => {
                let values = self.integers(value)?;
                for &v in values {
                    order.put_u32(&mut bytes, self.check(v, 0, u32::MAX as i64)? as u32);
                }
                values.len()
            }
            ValueType::SLong => {
                let values = self.integers(value)?;
                for &v in values {
                    let v = self.check(v, i32::MIN as i64, i32::MAX as i64)?;
                    order.put_u32(&mut bytes, v as i32 as u32);
                }
                values.len()
            }
            ValueType::Rational => {
                let values = self.rationals(value)?;
                for &(num, den) in &values {
                    order.put_u32(&mut bytes, self.check(num, 0, u32::MAX as i64)? as u32);
                    order.put_u32(&mut bytes, self.check(den, 0, u32::MAX as i64)? as u32);
                }
                values.len()
            }
            ValueType::SRational => {
                let values = self.rationals(value)?;
                for &(num, den) in &values {
                    let num = self.check(num, i32::MIN as i64, i32::MAX as i64)?;
                    let den = self.check(den, i32::MIN as i64, i32::MAX as i64)?;
                    order.put_u32(&mut bytes, num as i32 as u32);
                    order.put_u32(&mut bytes, den as i32 as u32);
                }
                values.len()
            }
            ValueType::Float => {
                let values = self.floats(value)?;
                for &v in values {
                    order.put_u32(&mut bytes, (v as f32).to_bits());
                }
                values.len()
            }
            ValueType::Double => {
                let values = self.floats(value)?;
                for &v in values {
                    order.put_u64(&mut bytes, v.to_bits());
                }
                values.len()
            }
        };

        let count = u32::try_from(count).map_err(|_| ValueError::OutOfRange {
            ifd: self.ifd,
            tag: self.tag,
            value_type: self.value_type,
            value: format!("{} elements", count),
        })?;

        Ok(EncodedValue {
            value_type: self.value_type,
            count,
            bytes,
        })
    }

    fn integers<'v>(&self, value: &'v TagValue) -> Result<&'v [i64], ValueError> {
        match value {
            TagValue::Int(v) => Ok(std::slice::from_ref(v)),
            TagValue::Ints(vs) => Ok(vs),
            _ => Err(self.mismatch(value)),
        }
    }

    fn rationals(&self, value: &TagValue) -> Result<Vec<(i64, i64)>, ValueError> {
        match value {
            TagValue::Rational(num, den) => Ok(vec![(*num, *den)]),
            TagValue::Rationals(vs) => Ok(vs.clone()),
            _ => Err(self.mismatch(value)),
        }
    }

    fn floats<'v>(&self, value: &'v TagValue) -> Result<&'v [f64], ValueError> {
        match value {
            TagValue::Float(v) => Ok(std::slice::from_ref(v)),
            TagValue::Floats(vs) => Ok(vs),
            _ => Err(self.mismatch(value)),
        }
    }

    fn check(&self, value: i64, min: i64, max: i64) -> Result<i64, ValueError> {
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(ValueError::OutOfRange {
                ifd: self.ifd,
                tag: self.tag,
                value_type: self.value_type,
                value: value.to_string(),
            })
        }
    }

    /// Chars map back to the single byte they were decoded from.
    fn ascii_byte(&self, c: char) -> Result<u8, ValueError> {
        u8::try_from(c).map_err(|_| ValueError::OutOfRange {
            ifd: self.ifd,
            tag: self.tag,
            value_type: self.value_type,
            value: format!("{c:?}"),
        })
    }

    fn mismatch(&self, value: &TagValue) -> ValueError {
        ValueError::TypeMismatch {
            ifd: self.ifd,
            tag: self.tag,
            expected: self.value_type,
            actual: value.kind_name(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

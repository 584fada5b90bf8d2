//! Type & Conversion Layer: stateless conversion between the native
//! element types a channel may be read or written as.
//!
//! This layer does not know about wire framing; it only knows how to turn
//! a vector of one native type into a vector of another, plus the
//! `STRING` field padding/trimming the read pipeline needs. The CA wire
//! codec that packs these values into actual request/response bytes is
//! an external collaborator.

use crate::error::{ChannelError, Result};
use crate::types::{NativeBase, StringEncoding};
use crate::value::{EnumValue, NativeValue};

/// Converts every element of `values` from its current native type to
/// `to`, applying the CA conversion rules for the pairing involved.
///
/// - numeric -> numeric: natural numeric cast (saturating on overflow,
///   matching platform `as` semantics for float-to-int).
/// - numeric -> enum / enum -> numeric: the integer is an index into
///   `enum_table`; an out-of-range index on write is an error, but a
///   read simply passes the raw integer through uninterpreted by this
///   function (the channel decides what a read means).
/// - string -> enum: the string is matched against `enum_table`; no
///   match passes the string through unchanged as `EnumValue::Raw`,
///   leaving the decision to the caller's `verify_value` hook.
/// - enum -> string: the index is rendered as its table entry; an
///   out-of-range index renders as the empty string.
/// - string <-> char/byte: uses `encoding` to decode/encode.
pub fn convert(
    values: &NativeValue,
    to: NativeBase,
    encoding: StringEncoding,
    enum_table: Option<&[String]>,
) -> Result<NativeValue> {
    let from = values.native_base();
    if from == to {
        return Ok(values.clone());
    }

    match (values, to) {
        // Numeric <-> numeric
        (NativeValue::Int(v), _) if to.is_numeric() => Ok(cast_numeric(to, v.iter().map(|x| *x as f64))),
        (NativeValue::Long(v), _) if to.is_numeric() => Ok(cast_numeric(to, v.iter().map(|x| *x as f64))),
        (NativeValue::Float(v), _) if to.is_numeric() => Ok(cast_numeric(to, v.iter().map(|x| *x as f64))),
        (NativeValue::Double(v), _) if to.is_numeric() => Ok(cast_numeric(to, v.iter().map(|x| *x))),

        // Numeric -> enum: raw index passthrough
        (NativeValue::Int(v), NativeBase::Enum) => {
            Ok(NativeValue::Enum(v.iter().map(|x| EnumValue::Index(*x as u16)).collect()))
        }
        (NativeValue::Long(v), NativeBase::Enum) => {
            Ok(NativeValue::Enum(v.iter().map(|x| EnumValue::Index(*x as u16)).collect()))
        }

        // Enum -> numeric: resolved index passthrough, unresolved raw
        // strings have no numeric form.
        (NativeValue::Enum(v), _) if to.is_numeric() => {
            let mut indices = Vec::with_capacity(v.len());
            for ev in v {
                match ev {
                    EnumValue::Index(i) => indices.push(*i as f64),
                    EnumValue::Raw(s) => {
                        return Err(ChannelError::BadConversion {
                            from: NativeBase::Enum,
                            to,
                            reason: format!("unresolved enum string {s:?} has no numeric form"),
                        })
                    }
                }
            }
            Ok(cast_numeric(to, indices.into_iter()))
        }

        // Enum -> string: render the table entry, or the raw string
        // already carried.
        (NativeValue::Enum(v), NativeBase::String) => {
            let table = enum_table.unwrap_or(&[]);
            let strings = v
                .iter()
                .map(|ev| match ev {
                    EnumValue::Index(i) => table.get(*i as usize).cloned().unwrap_or_default(),
                    EnumValue::Raw(s) => s.clone(),
                })
                .collect();
            Ok(NativeValue::String(strings))
        }

        // String -> enum: match against the table, else pass through raw.
        (NativeValue::String(v), NativeBase::Enum) => {
            let table = enum_table.unwrap_or(&[]);
            let out = v
                .iter()
                .map(|s| match table.iter().position(|entry| entry == s) {
                    Some(idx) => EnumValue::Index(idx as u16),
                    None => EnumValue::Raw(s.clone()),
                })
                .collect();
            Ok(NativeValue::Enum(out))
        }

        // String <-> char
        (NativeValue::String(v), NativeBase::Char) => {
            let bytes = v
                .iter()
                .flat_map(|s| encode_string(s, encoding))
                .collect();
            Ok(NativeValue::Char(bytes))
        }
        (NativeValue::Char(v), NativeBase::String) => {
            Ok(NativeValue::String(vec![decode_string(v, encoding)]))
        }

        _ => Err(ChannelError::BadConversion {
            from,
            to,
            reason: "no conversion path between these native types".into(),
        }),
    }
}

impl NativeBase {
    fn is_numeric(self) -> bool {
        matches!(self, NativeBase::Int | NativeBase::Long | NativeBase::Float | NativeBase::Double)
    }
}

fn cast_numeric(to: NativeBase, values: impl Iterator<Item = f64>) -> NativeValue {
    match to {
        NativeBase::Int => NativeValue::Int(values.map(|v| v as i16).collect()),
        NativeBase::Long => NativeValue::Long(values.map(|v| v as i32).collect()),
        NativeBase::Float => NativeValue::Float(values.map(|v| v as f32).collect()),
        NativeBase::Double => NativeValue::Double(values.collect()),
        _ => unreachable!("cast_numeric called with non-numeric target"),
    }
}

pub(crate) fn encode_string(s: &str, encoding: StringEncoding) -> Vec<u8> {
    match encoding {
        StringEncoding::Utf8 => s.as_bytes().to_vec(),
        StringEncoding::Ascii | StringEncoding::Latin1 => {
            s.chars().map(|c| c as u32 as u8).collect()
        }
    }
}

fn decode_string(bytes: &[u8], encoding: StringEncoding) -> String {
    match encoding {
        StringEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        StringEncoding::Ascii | StringEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Truncates or NUL-pads an encoded string to the fixed 40-byte `STRING`
/// wire width, matching the CA wire convention (truncate on output if
/// longer than the field, NUL-trim on input).
pub fn pad_string_field(encoded: &[u8]) -> [u8; crate::types::MAX_STRING_SIZE] {
    let mut field = [0u8; crate::types::MAX_STRING_SIZE];
    let n = encoded.len().min(crate::types::MAX_STRING_SIZE);
    field[..n].copy_from_slice(&encoded[..n]);
    field
}

/// Strips trailing NUL bytes from a fixed-width `STRING` field.
pub fn trim_string_field(field: &[u8]) -> Vec<u8> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    field[..end].to_vec()
}

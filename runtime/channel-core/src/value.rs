//! In-memory value representation shared by every channel kind.

use serde::{Deserialize, Serialize};

/// A single enum channel value: either a resolved index into the
/// channel's state table, or a raw string that did not match any known
/// state and must be passed through unchanged for a hook to decide on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnumValue {
    Index(u16),
    Raw(String),
}

/// The native, type-tagged value a channel stores. Scalars are
/// represented as a length-1 vector; `max_length == 1` channels enforce
/// that invariant in `preprocess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeValue {
    String(Vec<String>),
    Char(Vec<u8>),
    Enum(Vec<EnumValue>),
    Int(Vec<i16>),
    Long(Vec<i32>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl NativeValue {
    /// Number of elements carried by this value.
    pub fn len(&self) -> usize {
        match self {
            NativeValue::String(v) => v.len(),
            NativeValue::Char(v) => v.len(),
            NativeValue::Enum(v) => v.len(),
            NativeValue::Int(v) => v.len(),
            NativeValue::Long(v) => v.len(),
            NativeValue::Float(v) => v.len(),
            NativeValue::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The native base type this value is tagged with.
    pub fn native_base(&self) -> crate::types::NativeBase {
        use crate::types::NativeBase;
        match self {
            NativeValue::String(_) => NativeBase::String,
            NativeValue::Char(_) => NativeBase::Char,
            NativeValue::Enum(_) => NativeBase::Enum,
            NativeValue::Int(_) => NativeBase::Int,
            NativeValue::Long(_) => NativeBase::Long,
            NativeValue::Float(_) => NativeBase::Float,
            NativeValue::Double(_) => NativeBase::Double,
        }
    }

    /// Interprets a single-element numeric value as `f64`, for limit
    /// checking and metadata conversion. Returns `None` for non-numeric
    /// or non-scalar values.
    pub fn as_scalar_f64(&self) -> Option<f64> {
        if self.len() != 1 {
            return None;
        }
        match self {
            NativeValue::Int(v) => Some(v[0] as f64),
            NativeValue::Long(v) => Some(v[0] as f64),
            NativeValue::Float(v) => Some(v[0] as f64),
            NativeValue::Double(v) => Some(v[0]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_f64_extraction() {
        let v = NativeValue::Double(vec![3.5]);
        assert_eq!(v.as_scalar_f64(), Some(3.5));

        let v = NativeValue::Double(vec![1.0, 2.0]);
        assert_eq!(v.as_scalar_f64(), None);

        let v = NativeValue::String(vec!["x".into()]);
        assert_eq!(v.as_scalar_f64(), None);
    }

    #[test]
    fn len_matches_underlying_vec() {
        let v = NativeValue::Enum(vec![EnumValue::Index(1), EnumValue::Index(2)]);
        assert_eq!(v.len(), 2);
    }
}

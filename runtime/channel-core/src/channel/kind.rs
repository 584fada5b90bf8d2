//! The tagged set of channel kinds. Each kind knows how to preprocess a
//! raw write into its storage shape, how to verify a value against its
//! own rules, and what it reports for metadata/class-name reads.
//!
//! Modeled as a tagged enum rather than a class hierarchy: CA's channel
//! kinds are a closed set, and a `match` over them is both the data the
//! pipeline branches on and the place every kind-specific rule lives.

use crate::channel::limits::check_numeric_limits;
use crate::error::{ChannelError, Result};
use crate::metadata::Limits;
use crate::types::{AlarmSeverity, AlarmStatus, NativeBase, StringEncoding, SubscriptionType};
use crate::value::{EnumValue, NativeValue};

/// The result of `verify_value`: an optional replacement value (`None`
/// means the input is accepted unchanged), and an optional `(status,
/// severity)` pair staged by a numeric limit check for the write
/// pipeline to merge in at commit.
pub struct VerifyOutcome {
    pub replacement: Option<NativeValue>,
    pub staged_alarm: Option<(AlarmStatus, AlarmSeverity)>,
    /// Set by a kind that wants to abort the rest of the write pipeline
    /// cooperatively (no value/metadata commit, no publish), without
    /// treating this as an error. None of the closed set of kinds this
    /// crate implements ever sets this; the field exists because the
    /// write pipeline's step ordering depends on it being possible.
    pub skip: bool,
}

impl VerifyOutcome {
    fn unchanged() -> Self {
        VerifyOutcome { replacement: None, staged_alarm: None, skip: false }
    }
}

/// Per-kind configuration and behavior. Numeric kinds share one variant
/// parameterized by which native base they store, since their limit
/// checking and metadata layout are otherwise identical.
#[derive(Debug, Clone)]
pub enum ChannelKind {
    String {
        long_string_max_length: usize,
    },
    Byte {
        strip_null_terminator: bool,
    },
    EncodedChar {
        report_as_string: bool,
        long_string_max_length: usize,
    },
    Enum {
        strings: Vec<String>,
    },
    Numeric {
        native: NativeBase,
        units: Vec<u8>,
        precision: i16,
        limits: Limits,
        value_atol: f64,
        log_atol: f64,
    },
}

impl ChannelKind {
    pub fn numeric(native: NativeBase) -> Self {
        debug_assert!(matches!(native, NativeBase::Int | NativeBase::Long | NativeBase::Float | NativeBase::Double));
        ChannelKind::Numeric {
            native,
            units: Vec::new(),
            precision: 0,
            limits: Limits::default(),
            value_atol: 0.0,
            log_atol: 0.0,
        }
    }

    /// The native base values are stored and converted through.
    pub fn data_type(&self) -> NativeBase {
        match self {
            ChannelKind::String { .. } => NativeBase::String,
            ChannelKind::Byte { .. } => NativeBase::Char,
            ChannelKind::EncodedChar { report_as_string, .. } => {
                if *report_as_string { NativeBase::String } else { NativeBase::Char }
            }
            ChannelKind::Enum { .. } => NativeBase::Enum,
            ChannelKind::Numeric { native, .. } => *native,
        }
    }

    /// Extra subscription flags this kind always ORs in on a write, on
    /// top of whatever the caller passed in.
    pub fn extra_write_flags(&self) -> SubscriptionType {
        match self {
            ChannelKind::String { .. } | ChannelKind::Byte { .. } | ChannelKind::EncodedChar { .. } | ChannelKind::Enum { .. } => {
                SubscriptionType::LOG | SubscriptionType::VALUE
            }
            ChannelKind::Numeric { .. } => SubscriptionType::empty(),
        }
    }

    /// Coerces a raw write into this channel's storage shape: checks
    /// array-length bounds against `max_length`, then applies the
    /// kind-specific coercion (byte channels collapse everything to raw
    /// bytes, encoded-char channels decode to a string, enum channels
    /// resolve strings/indices against the state table).
    pub fn preprocess(&self, value: NativeValue, max_length: usize, encoding: StringEncoding) -> Result<NativeValue> {
        if value.len() > max_length {
            return Err(ChannelError::OutOfBounds { length: value.len(), max_length });
        }
        if value.is_empty() {
            return Err(ChannelError::EmptyScalar);
        }

        match self {
            ChannelKind::Byte { .. } => self.coerce_to_bytes(value),
            ChannelKind::EncodedChar { .. } => self.coerce_to_decoded_string(value, encoding),
            ChannelKind::Enum { strings } => Ok(coerce_enum(value, strings)),
            ChannelKind::String { .. } | ChannelKind::Numeric { .. } => Ok(value),
        }
    }

    fn coerce_to_bytes(&self, value: NativeValue) -> Result<NativeValue> {
        let strip = matches!(self, ChannelKind::Byte { strip_null_terminator: true });
        let mut bytes = match value {
            NativeValue::Char(b) => b,
            NativeValue::String(_) => {
                return Err(ChannelError::BadRequest {
                    reason: "byte channel does not accept decoded string values".into(),
                })
            }
            other => {
                return Err(ChannelError::BadConversion {
                    from: other.native_base(),
                    to: NativeBase::Char,
                    reason: "only byte or string values coerce into a byte channel".into(),
                })
            }
        };
        if strip {
            while bytes.last() == Some(&0) {
                bytes.pop();
            }
        }
        Ok(NativeValue::Char(bytes))
    }

    fn coerce_to_decoded_string(&self, value: NativeValue, encoding: StringEncoding) -> Result<NativeValue> {
        match value {
            NativeValue::String(_) => Ok(value),
            NativeValue::Char(bytes) => {
                crate::convert::convert(&NativeValue::Char(bytes), NativeBase::String, encoding, None)
            }
            other => Err(ChannelError::BadConversion {
                from: other.native_base(),
                to: NativeBase::String,
                reason: "encoded-char channel accepts only char or string values".into(),
            }),
        }
    }

    /// Checks the value against this kind's own rules, returning an
    /// optional replacement and any alarm state a numeric limit check
    /// staged.
    pub fn verify_value(&self, value: &NativeValue) -> Result<VerifyOutcome> {
        match self {
            ChannelKind::Enum { strings } => {
                if let NativeValue::Enum(entries) = value {
                    let resolved: Vec<EnumValue> = entries
                        .iter()
                        .map(|ev| match ev {
                            EnumValue::Index(i) if (*i as usize) < strings.len() => EnumValue::Index(*i),
                            EnumValue::Raw(s) => match strings.iter().position(|entry| entry == s) {
                                Some(idx) => EnumValue::Index(idx as u16),
                                None => EnumValue::Raw(s.clone()),
                            },
                            other => other.clone(),
                        })
                        .collect();
                    Ok(VerifyOutcome { replacement: Some(NativeValue::Enum(resolved)), staged_alarm: None, skip: false })
                } else {
                    Ok(VerifyOutcome::unchanged())
                }
            }
            ChannelKind::Numeric { limits, .. } => {
                if let Some(scalar) = value.as_scalar_f64() {
                    let staged = check_numeric_limits(scalar, limits)?;
                    Ok(VerifyOutcome { replacement: None, staged_alarm: Some(staged), skip: false })
                } else {
                    Ok(VerifyOutcome::unchanged())
                }
            }
            ChannelKind::String { .. } | ChannelKind::Byte { .. } | ChannelKind::EncodedChar { .. } => {
                Ok(VerifyOutcome::unchanged())
            }
        }
    }

    /// Validates this kind's own configuration (enum table size limits).
    pub fn validate(&self) -> Result<()> {
        if let ChannelKind::Enum { strings } = self {
            if strings.len() > crate::types::MAX_ENUM_STATES {
                return Err(ChannelError::InvalidConfig {
                    reason: format!("enum table has {} entries, max is {}", strings.len(), crate::types::MAX_ENUM_STATES),
                });
            }
            for s in strings {
                if s.len() > crate::types::MAX_ENUM_STRING_SIZE {
                    return Err(ChannelError::InvalidConfig {
                        reason: format!("enum string {s:?} exceeds {} bytes", crate::types::MAX_ENUM_STRING_SIZE),
                    });
                }
            }
        }
        Ok(())
    }
}

fn coerce_enum(value: NativeValue, strings: &[String]) -> NativeValue {
    match value {
        NativeValue::Enum(_) => value,
        NativeValue::String(v) => NativeValue::Enum(
            v.into_iter()
                .map(|s| match strings.iter().position(|entry| *entry == s) {
                    Some(idx) => EnumValue::Index(idx as u16),
                    None => EnumValue::Raw(s),
                })
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_longer_than_max_length_is_out_of_bounds() {
        let kind = ChannelKind::numeric(NativeBase::Double);
        let err = kind
            .preprocess(NativeValue::Double(vec![1.0, 2.0]), 1, StringEncoding::Latin1)
            .unwrap_err();
        assert_eq!(err, ChannelError::OutOfBounds { length: 2, max_length: 1 });
    }

    #[test]
    fn empty_array_is_empty_scalar() {
        let kind = ChannelKind::numeric(NativeBase::Double);
        let err = kind
            .preprocess(NativeValue::Double(vec![]), 1, StringEncoding::Latin1)
            .unwrap_err();
        assert_eq!(err, ChannelError::EmptyScalar);
    }

    #[test]
    fn byte_channel_rejects_decoded_strings() {
        let kind = ChannelKind::Byte { strip_null_terminator: false };
        let err = kind
            .preprocess(NativeValue::String(vec!["x".into()]), 10, StringEncoding::Latin1)
            .unwrap_err();
        assert!(matches!(err, ChannelError::BadRequest { .. }));
    }

    #[test]
    fn byte_channel_strips_trailing_nul() {
        let kind = ChannelKind::Byte { strip_null_terminator: true };
        let out = kind
            .preprocess(NativeValue::Char(vec![b'h', b'i', 0]), 10, StringEncoding::Latin1)
            .unwrap();
        assert_eq!(out, NativeValue::Char(vec![b'h', b'i']));
    }

    #[test]
    fn enum_channel_passes_through_unknown_strings() {
        let kind = ChannelKind::Enum { strings: vec!["OFF".into(), "ON".into()] };
        let out = kind
            .preprocess(NativeValue::String(vec!["MYSTERY".into()]), 1, StringEncoding::Latin1)
            .unwrap();
        assert_eq!(out, NativeValue::Enum(vec![EnumValue::Raw("MYSTERY".into())]));
    }

    #[test]
    fn numeric_verify_stages_limit_alarm() {
        let mut kind = ChannelKind::numeric(NativeBase::Double);
        if let ChannelKind::Numeric { limits, .. } = &mut kind {
            limits.lower_alarm_limit = 0.0;
            limits.upper_alarm_limit = 10.0;
        }
        let outcome = kind.verify_value(&NativeValue::Double(vec![11.0])).unwrap();
        assert_eq!(outcome.staged_alarm, Some((AlarmStatus::HiHi, AlarmSeverity::Major)));
    }

    #[test]
    fn string_and_byte_kinds_force_log_and_value_flags() {
        let kind = ChannelKind::String { long_string_max_length: 81 };
        assert_eq!(kind.extra_write_flags(), SubscriptionType::LOG | SubscriptionType::VALUE);
        let kind = ChannelKind::numeric(NativeBase::Float);
        assert_eq!(kind.extra_write_flags(), SubscriptionType::empty());
    }

    #[test]
    fn oversized_enum_table_fails_validation() {
        let strings: Vec<String> = (0..20).map(|i| format!("S{i}")).collect();
        let kind = ChannelKind::Enum { strings };
        assert!(kind.validate().is_err());
    }
}

//! Closed type system for channel data: native element types, DBR wire
//! forms, alarm severity/status, and access rights.

use serde::{Deserialize, Serialize};

/// Maximum number of entries in an enum channel's state table.
pub const MAX_ENUM_STATES: usize = 16;

/// Maximum encoded length, in bytes, of a single enum state string.
pub const MAX_ENUM_STRING_SIZE: usize = 26;

/// Fixed wire length of a `STRING` value, NUL-padded.
pub const MAX_STRING_SIZE: usize = 40;

/// Default maximum length of a long string (a `CHAR` array reported in
/// place of `STRING`) when a channel does not configure one explicitly.
pub const DEFAULT_LONG_STRING_MAX_LENGTH: usize = 81;

/// The native element type a channel stores values as, independent of
/// the DBR form it is read back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeBase {
    String,
    Char,
    Enum,
    Int,
    Long,
    Float,
    Double,
}

/// The decoration a DBR request wraps a native base type in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbrForm {
    /// Bare native value, no metadata prefix.
    Native,
    /// Native value plus status/severity.
    Sts,
    /// Native value plus status/severity/timestamp.
    Time,
    /// Native value plus status/severity/units/graphic limits.
    Gr,
    /// Native value plus status/severity/units/graphic+control limits.
    Ctrl,
}

/// The full closed set of channel access request types: every native
/// base crossed with every DBR form, plus the pseudo-types that do not
/// decorate a native base and the long-string aliases for `Char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    Base(NativeBase, DbrForm),
    /// `CHAR` array requested/reported as a `STRING`-like long string.
    LongString(DbrForm),
    /// `DBR_STSACK_STRING`: alarm state rendered as a string payload.
    StsackString,
    /// `DBR_CLASS_NAME`: the channel's reported record type.
    ClassName,
    /// `DBR_PUT_ACKS`: acknowledge-severity write pseudo-type.
    PutAcks,
    /// `DBR_PUT_ACKT`: acknowledge-transient-flag write pseudo-type.
    PutAckt,
}

impl ChannelType {
    /// The plain native form with no metadata decoration, for a given base.
    pub fn native(base: NativeBase) -> Self {
        ChannelType::Base(base, DbrForm::Native)
    }

    /// The native base this type is built on, if it has one. Pseudo-types
    /// and the long-string alias (native base `Char`) are handled by the
    /// caller via their own branches.
    pub fn native_base(&self) -> Option<NativeBase> {
        match self {
            ChannelType::Base(base, _) => Some(*base),
            ChannelType::LongString(_) => Some(NativeBase::Char),
            _ => None,
        }
    }

    /// The DBR form this type carries, if it has one.
    pub fn form(&self) -> Option<DbrForm> {
        match self {
            ChannelType::Base(_, form) | ChannelType::LongString(form) => Some(*form),
            _ => None,
        }
    }

    /// True for `DbrForm::Native` request types: no metadata record is
    /// allocated, the pipeline returns only the converted value bytes.
    pub fn is_bare_native(&self) -> bool {
        matches!(self.form(), Some(DbrForm::Native))
    }
}

/// Alarm severity, ordered `NoAlarm < Minor < Major < Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AlarmSeverity {
    NoAlarm = 0,
    Minor = 1,
    Major = 2,
    Invalid = 3,
}

impl Default for AlarmSeverity {
    fn default() -> Self {
        AlarmSeverity::NoAlarm
    }
}

/// Alarm status: the reason an alarm is in its current severity.
///
/// The full CA status set is carried even though this crate's own limit
/// check only ever produces a handful of these; the rest remain legal
/// values for `write_metadata`/`Alarm::write` to set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlarmStatus {
    NoAlarm,
    Read,
    Write,
    HiHi,
    High,
    LoLo,
    Low,
    State,
    Cos,
    Comm,
    Timeout,
    HwLimit,
    Calc,
    Scan,
    Link,
    Soft,
    BadSub,
    Udf,
    Disable,
    Simm,
    ReadAccess,
    WriteAccess,
}

impl Default for AlarmStatus {
    fn default() -> Self {
        AlarmStatus::NoAlarm
    }
}

bitflags::bitflags! {
    /// CA access rights a `check_access` hook may grant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessRights: u8 {
        const READ  = 0b01;
        const WRITE = 0b10;
    }
}

impl Default for AccessRights {
    fn default() -> Self {
        AccessRights::READ | AccessRights::WRITE
    }
}

bitflags::bitflags! {
    /// Subscription event-type flags (`DBE_*`), controlling which kind
    /// of change a write is reported as to monitors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SubscriptionType: u8 {
        const VALUE    = 0b0001;
        const LOG      = 0b0010;
        const ALARM    = 0b0100;
        const PROPERTY = 0b1000;
    }
}

/// How a channel's string-typed values are encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringEncoding {
    Latin1,
    Utf8,
    Ascii,
}

impl Default for StringEncoding {
    fn default() -> Self {
        StringEncoding::Latin1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(AlarmSeverity::NoAlarm < AlarmSeverity::Minor);
        assert!(AlarmSeverity::Minor < AlarmSeverity::Major);
        assert!(AlarmSeverity::Major < AlarmSeverity::Invalid);
    }

    #[test]
    fn channel_type_native_base() {
        let ty = ChannelType::Base(NativeBase::Double, DbrForm::Ctrl);
        assert_eq!(ty.native_base(), Some(NativeBase::Double));
        assert_eq!(ty.form(), Some(DbrForm::Ctrl));
        assert!(!ty.is_bare_native());

        let native = ChannelType::native(NativeBase::Long);
        assert!(native.is_bare_native());
    }

    #[test]
    fn access_rights_default_allows_both() {
        let rights = AccessRights::default();
        assert!(rights.contains(AccessRights::READ));
        assert!(rights.contains(AccessRights::WRITE));
    }
}

//! EPICS timestamps: seconds since the EPICS epoch plus nanoseconds.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds between the UNIX epoch (1970-01-01) and the EPICS epoch
/// (1990-01-01), the offset every wire timestamp is carried relative to.
pub const EPICS_EPOCH_OFFSET: u32 = 631_152_000;

/// A CA wire timestamp: seconds since the EPICS epoch, plus nanoseconds
/// within that second. Conversions to/from UNIX time are lossless for
/// any instant that fits in the `u32` second range of either epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpicsTimestamp {
    pub seconds: u32,
    pub nanoseconds: u32,
}

impl EpicsTimestamp {
    /// Builds a timestamp directly from its wire fields.
    pub fn new(seconds: u32, nanoseconds: u32) -> Self {
        EpicsTimestamp { seconds, nanoseconds }
    }

    /// Returns the current wall-clock time as an EPICS timestamp.
    pub fn now() -> Self {
        let since_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::from_unix(since_unix.as_secs(), since_unix.subsec_nanos())
    }

    /// Converts from UNIX seconds and nanoseconds-within-second.
    pub fn from_unix(unix_seconds: u64, nanoseconds: u32) -> Self {
        let epics_seconds = unix_seconds.saturating_sub(EPICS_EPOCH_OFFSET as u64);
        EpicsTimestamp {
            seconds: epics_seconds as u32,
            nanoseconds,
        }
    }

    /// Converts to UNIX seconds and nanoseconds-within-second.
    pub fn to_unix(self) -> (u64, u32) {
        (self.seconds as u64 + EPICS_EPOCH_OFFSET as u64, self.nanoseconds)
    }

    /// The `(seconds, nanoseconds)` tuple form used on the wire.
    pub fn as_tuple(self) -> (u32, u32) {
        (self.seconds, self.nanoseconds)
    }

    /// Builds a timestamp from the wire tuple form.
    pub fn from_tuple(tuple: (u32, u32)) -> Self {
        EpicsTimestamp { seconds: tuple.0, nanoseconds: tuple.1 }
    }
}

impl Default for EpicsTimestamp {
    fn default() -> Self {
        EpicsTimestamp { seconds: 0, nanoseconds: 0 }
    }
}

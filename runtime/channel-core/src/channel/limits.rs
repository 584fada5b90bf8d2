//! Shared scalar limit check for numeric channels: control limits reject
//! a write outright, a value inside the alarm band falls through to the
//! warning check, and coincident limits (`lower == upper`) mean "no
//! limit configured" for that band.

use crate::error::{ChannelError, Result};
use crate::metadata::Limits;
use crate::types::{AlarmSeverity, AlarmStatus};

/// Checks a scalar write against a channel's configured limits.
///
/// Returns the `(status, severity)` the write should stage, or an error
/// if the value falls outside the control limits (in which case the
/// write must be rejected rather than merely flagged).
pub fn check_numeric_limits(value: f64, limits: &Limits) -> Result<(AlarmStatus, AlarmSeverity)> {
    if limits.lower_ctrl_limit != limits.upper_ctrl_limit
        && (value < limits.lower_ctrl_limit || value > limits.upper_ctrl_limit)
    {
        return Err(ChannelError::CannotExceedLimits {
            value,
            lo: limits.lower_ctrl_limit,
            hi: limits.upper_ctrl_limit,
        });
    }

    if limits.lower_alarm_limit != limits.upper_alarm_limit {
        if value <= limits.lower_alarm_limit {
            return Ok((AlarmStatus::LoLo, AlarmSeverity::Major));
        }
        if value >= limits.upper_alarm_limit {
            return Ok((AlarmStatus::HiHi, AlarmSeverity::Major));
        }
    }

    if limits.lower_warning_limit != limits.upper_warning_limit {
        if value <= limits.lower_warning_limit {
            return Ok((AlarmStatus::Low, AlarmSeverity::Minor));
        }
        if value >= limits.upper_warning_limit {
            return Ok((AlarmStatus::High, AlarmSeverity::Minor));
        }
    }

    Ok((AlarmStatus::NoAlarm, AlarmSeverity::NoAlarm))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits_with_ctrl(lo: f64, hi: f64) -> Limits {
        Limits { lower_ctrl_limit: lo, upper_ctrl_limit: hi, ..Default::default() }
    }

    #[test]
    fn value_above_control_limit_is_rejected() {
        let limits = limits_with_ctrl(0.0, 10.0);
        let err = check_numeric_limits(10.0001, &limits).unwrap_err();
        assert_eq!(
            err,
            ChannelError::CannotExceedLimits { value: 10.0001, lo: 0.0, hi: 10.0 }
        );
    }

    #[test]
    fn hihi_takes_priority_over_coincident_warning_limits() {
        let limits = Limits {
            lower_alarm_limit: 0.0,
            upper_alarm_limit: 20.0,
            lower_warning_limit: 5.0,
            upper_warning_limit: 5.0,
            ..Default::default()
        };
        let (status, severity) = check_numeric_limits(20.0, &limits).unwrap();
        assert_eq!(status, AlarmStatus::HiHi);
        assert_eq!(severity, AlarmSeverity::Major);
    }

    #[test]
    fn high_fires_when_alarm_limits_are_coincident() {
        let limits = Limits {
            lower_alarm_limit: 0.0,
            upper_alarm_limit: 0.0,
            lower_warning_limit: 1.0,
            upper_warning_limit: 6.0,
            ..Default::default()
        };
        let (status, severity) = check_numeric_limits(6.0, &limits).unwrap();
        assert_eq!(status, AlarmStatus::High);
        assert_eq!(severity, AlarmSeverity::Minor);
    }

    #[test]
    fn coincident_limits_everywhere_means_no_alarm() {
        let limits = Limits::default();
        let (status, severity) = check_numeric_limits(1_000_000.0, &limits).unwrap();
        assert_eq!(status, AlarmStatus::NoAlarm);
        assert_eq!(severity, AlarmSeverity::NoAlarm);
    }

    #[test]
    fn coincident_control_limits_mean_no_rejection() {
        let limits = Limits::default();
        assert!(check_numeric_limits(f64::MAX, &limits).is_ok());
    }

    #[test]
    fn value_inside_alarm_band_still_checked_against_warning() {
        let limits = Limits {
            lower_alarm_limit: -10.0,
            upper_alarm_limit: 10.0,
            lower_warning_limit: -5.0,
            upper_warning_limit: 5.0,
            ..Default::default()
        };
        let (status, severity) = check_numeric_limits(6.0, &limits).unwrap();
        assert_eq!(status, AlarmStatus::High);
        assert_eq!(severity, AlarmSeverity::Minor);
    }
}

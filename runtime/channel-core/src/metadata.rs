//! The metadata record that decorates a bare native value for `Sts`,
//! `Time`, `Gr`, and `Ctrl` DBR forms.

use crate::timestamp::EpicsTimestamp;
use crate::types::{AlarmSeverity, AlarmStatus, DbrForm};
use serde::{Deserialize, Serialize};

/// Numeric graphic/control limits, present from `Gr` form upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub upper_disp_limit: f64,
    pub lower_disp_limit: f64,
    pub upper_alarm_limit: f64,
    pub lower_alarm_limit: f64,
    pub upper_warning_limit: f64,
    pub lower_warning_limit: f64,
    pub upper_ctrl_limit: f64,
    pub lower_ctrl_limit: f64,
}

/// A freshly allocated metadata record for a given DBR form. Fields not
/// present in the requested form stay at their default and are not
/// serialized onto the wire by an external codec; this struct only
/// tracks what the read pipeline has populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbrMetadata {
    pub status: AlarmStatus,
    pub severity: AlarmSeverity,
    pub timestamp: Option<EpicsTimestamp>,
    pub units: Option<Vec<u8>>,
    pub precision: Option<i16>,
    pub limits: Option<Limits>,
    /// Encoded enum state strings, present only for `Gr`/`Ctrl` forms of
    /// an enum channel.
    pub enum_strings: Option<Vec<Vec<u8>>>,
}

impl DbrMetadata {
    /// A blank record appropriate to `form`, with only the fields that
    /// form carries left as `Some(default)` so the read pipeline knows
    /// what to populate.
    pub fn blank_for(form: DbrForm) -> Self {
        let mut md = DbrMetadata::default();
        match form {
            DbrForm::Native => {}
            DbrForm::Sts => {}
            DbrForm::Time => {
                md.timestamp = Some(EpicsTimestamp::default());
            }
            DbrForm::Gr => {
                md.units = Some(Vec::new());
                md.precision = Some(0);
                md.limits = Some(Limits::default());
                md.enum_strings = Some(Vec::new());
            }
            DbrForm::Ctrl => {
                md.units = Some(Vec::new());
                md.precision = Some(0);
                md.limits = Some(Limits::default());
                md.enum_strings = Some(Vec::new());
            }
        }
        md
    }
}

//! Alarm core: an owned severity-acknowledgement record shared by one or
//! more channels through a non-owning back-reference set.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::types::{AlarmSeverity, AlarmStatus, SubscriptionType};

/// Anything an alarm can publish a change notification to. `Channel`
/// implements this; the alarm only ever holds a `Weak` reference to its
/// attached channels so a channel's lifetime is independent of the
/// alarm it happens to be wearing.
#[async_trait]
pub trait PublishTarget: Send + Sync {
    async fn publish(&self, flags: SubscriptionType);
}

/// The `DBR_STSACK_STRING` read rendering of an alarm.
#[derive(Debug, Clone, PartialEq)]
pub struct StsAckString {
    pub status: AlarmStatus,
    pub severity: AlarmSeverity,
    pub must_acknowledge_transient: bool,
    pub severity_to_acknowledge: AlarmSeverity,
    pub alarm_string: Vec<u8>,
}

#[derive(Debug, Clone)]
struct AlarmData {
    status: AlarmStatus,
    severity: AlarmSeverity,
    must_acknowledge_transient: bool,
    severity_to_acknowledge: AlarmSeverity,
    alarm_string: Vec<u8>,
}

impl Default for AlarmData {
    fn default() -> Self {
        AlarmData {
            status: AlarmStatus::NoAlarm,
            severity: AlarmSeverity::NoAlarm,
            must_acknowledge_transient: true,
            severity_to_acknowledge: AlarmSeverity::NoAlarm,
            alarm_string: Vec::new(),
        }
    }
}

/// Fields a caller may update in one `Alarm::write` call. Each field left
/// `None` is left untouched; the five present fields are applied in the
/// fixed order the protocol requires, not the order they are listed here.
#[derive(Debug, Clone, Default)]
pub struct AlarmUpdate {
    pub status: Option<AlarmStatus>,
    pub severity: Option<AlarmSeverity>,
    pub must_acknowledge_transient: Option<bool>,
    pub severity_to_acknowledge: Option<AlarmSeverity>,
    pub alarm_string: Option<Vec<u8>>,
}

/// Owned alarm state plus the set of channels currently wearing it.
pub struct Alarm {
    data: RwLock<AlarmData>,
    channels: RwLock<Vec<Weak<dyn PublishTarget>>>,
}

impl Alarm {
    pub fn new() -> Self {
        Alarm {
            data: RwLock::new(AlarmData::default()),
            channels: RwLock::new(Vec::new()),
        }
    }

    /// Attaches a channel's back-reference. Idempotent: attaching the
    /// same channel twice is a no-op.
    pub async fn connect(&self, channel: Weak<dyn PublishTarget>) {
        let mut channels = self.channels.write().await;
        let already = channels.iter().any(|existing| Weak::ptr_eq(existing, &channel));
        if !already {
            channels.push(channel);
        }
    }

    /// Detaches a channel's back-reference. Removing an absent channel
    /// is a no-op.
    pub async fn disconnect(&self, channel: &Weak<dyn PublishTarget>) {
        let mut channels = self.channels.write().await;
        channels.retain(|existing| !Weak::ptr_eq(existing, channel));
    }

    pub async fn read(&self) -> StsAckString {
        let data = self.data.read().await;
        StsAckString {
            status: data.status,
            severity: data.severity,
            must_acknowledge_transient: data.must_acknowledge_transient,
            severity_to_acknowledge: data.severity_to_acknowledge,
            alarm_string: data.alarm_string.clone(),
        }
    }

    pub async fn severity(&self) -> AlarmSeverity {
        self.data.read().await.severity
    }

    pub async fn status(&self) -> AlarmStatus {
        self.data.read().await.status
    }

    /// Applies the requested field updates in the exact order the
    /// protocol specifies, then (unless suppressed) publishes to every
    /// attached channel not present in `except_for`.
    ///
    /// Order: status, severity, must_acknowledge_transient,
    /// severity_to_acknowledge (an acknowledgement request), alarm_string.
    /// Each step that changes state marks the flags it contributes;
    /// `publish` is called once at the end with the union of those flags.
    pub async fn write(&self, update: AlarmUpdate, publish: bool, except_for: &[Weak<dyn PublishTarget>]) {
        let mut flags = SubscriptionType::empty();
        {
            let mut data = self.data.write().await;

            if let Some(status) = update.status {
                data.status = status;
                flags |= SubscriptionType::VALUE;
            }

            if let Some(severity) = update.severity {
                data.severity = severity;
                if !data.must_acknowledge_transient || data.severity_to_acknowledge < severity {
                    data.severity_to_acknowledge = severity;
                }
                flags |= SubscriptionType::ALARM;
                debug!(?severity, "alarm severity updated");
            }

            if let Some(transient) = update.must_acknowledge_transient {
                data.must_acknowledge_transient = transient;
                if !transient && data.severity_to_acknowledge > data.severity {
                    data.severity_to_acknowledge = data.severity;
                }
                flags |= SubscriptionType::ALARM;
            }

            if let Some(requested) = update.severity_to_acknowledge {
                if requested >= data.severity {
                    data.severity_to_acknowledge = AlarmSeverity::NoAlarm;
                    flags |= SubscriptionType::ALARM;
                } else {
                    warn!(?requested, current = ?data.severity, "ignored stale acknowledgement request");
                }
            }

            if let Some(alarm_string) = update.alarm_string {
                data.alarm_string = alarm_string;
                flags |= SubscriptionType::ALARM;
            }
        }

        if publish && !flags.is_empty() {
            self.publish(flags, except_for).await;
        }
    }

    /// Publishes to every attached channel not present in `except_for`.
    /// Dead back-references (channels that have been dropped) are
    /// pruned opportunistically.
    pub async fn publish(&self, flags: SubscriptionType, except_for: &[Weak<dyn PublishTarget>]) {
        let targets: Vec<Arc<dyn PublishTarget>> = {
            let mut channels = self.channels.write().await;
            channels.retain(|c| c.strong_count() > 0);
            channels
                .iter()
                .filter(|c| !except_for.iter().any(|skip| Weak::ptr_eq(c, skip)))
                .filter_map(|c| c.upgrade())
                .collect()
        };
        for target in targets {
            target.publish(flags).await;
        }
    }
}

impl Default for Alarm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU8, Ordering};

    struct RecordingChannel {
        received: AtomicU8,
    }

    #[async_trait]
    impl PublishTarget for RecordingChannel {
        async fn publish(&self, flags: SubscriptionType) {
            self.received.store(flags.bits(), Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn severity_increase_forces_acknowledge_up() {
        let alarm = Alarm::new();
        alarm
            .write(
                AlarmUpdate {
                    must_acknowledge_transient: Some(true),
                    severity: Some(AlarmSeverity::Major),
                    ..Default::default()
                },
                false,
                &[],
            )
            .await;
        assert_eq!(alarm.data.read().await.severity_to_acknowledge, AlarmSeverity::Major);
    }

    #[tokio::test]
    async fn stale_acknowledgement_request_is_ignored() {
        let alarm = Alarm::new();
        alarm
            .write(
                AlarmUpdate {
                    must_acknowledge_transient: Some(true),
                    severity: Some(AlarmSeverity::Major),
                    ..Default::default()
                },
                false,
                &[],
            )
            .await;
        alarm
            .write(
                AlarmUpdate {
                    severity_to_acknowledge: Some(AlarmSeverity::Minor),
                    ..Default::default()
                },
                false,
                &[],
            )
            .await;
        assert_eq!(alarm.data.read().await.severity_to_acknowledge, AlarmSeverity::Major);
    }

    #[tokio::test]
    async fn acknowledge_at_current_severity_clears_latch_even_below_latched_peak() {
        let alarm = Alarm::new();
        alarm
            .write(
                AlarmUpdate {
                    must_acknowledge_transient: Some(true),
                    severity: Some(AlarmSeverity::Major),
                    ..Default::default()
                },
                false,
                &[],
            )
            .await;
        alarm
            .write(AlarmUpdate { severity: Some(AlarmSeverity::Minor), ..Default::default() }, false, &[])
            .await;
        assert_eq!(alarm.data.read().await.severity_to_acknowledge, AlarmSeverity::Major);

        alarm
            .write(
                AlarmUpdate { severity_to_acknowledge: Some(AlarmSeverity::Minor), ..Default::default() },
                false,
                &[],
            )
            .await;
        assert_eq!(alarm.data.read().await.severity_to_acknowledge, AlarmSeverity::NoAlarm);
    }

    #[tokio::test]
    async fn acknowledgement_at_or_above_current_clears_it() {
        let alarm = Alarm::new();
        alarm
            .write(
                AlarmUpdate {
                    must_acknowledge_transient: Some(true),
                    severity: Some(AlarmSeverity::Major),
                    ..Default::default()
                },
                false,
                &[],
            )
            .await;
        alarm
            .write(
                AlarmUpdate {
                    severity_to_acknowledge: Some(AlarmSeverity::Major),
                    ..Default::default()
                },
                false,
                &[],
            )
            .await;
        assert_eq!(alarm.data.read().await.severity_to_acknowledge, AlarmSeverity::NoAlarm);
    }

    #[tokio::test]
    async fn publish_skips_except_for() {
        let alarm = Alarm::new();
        let kept = Arc::new(RecordingChannel { received: AtomicU8::new(0) });
        let skipped = Arc::new(RecordingChannel { received: AtomicU8::new(0) });
        let kept_dyn: Arc<dyn PublishTarget> = kept.clone();
        let skipped_dyn: Arc<dyn PublishTarget> = skipped.clone();
        alarm.connect(Arc::downgrade(&kept_dyn)).await;
        alarm.connect(Arc::downgrade(&skipped_dyn)).await;

        alarm
            .publish(SubscriptionType::ALARM, &[Arc::downgrade(&skipped_dyn)])
            .await;

        assert_eq!(kept.received.load(Ordering::SeqCst), SubscriptionType::ALARM.bits());
        assert_eq!(skipped.received.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn connect_is_idempotent() {
        let alarm = Alarm::new();
        let channel: Arc<dyn PublishTarget> = Arc::new(RecordingChannel { received: AtomicU8::new(0) });
        let weak = Arc::downgrade(&channel);
        alarm.connect(weak.clone()).await;
        alarm.connect(weak.clone()).await;
        assert_eq!(alarm.channels.read().await.len(), 1);
    }
}

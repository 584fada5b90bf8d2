//! `Channel`: the per-PV value store and the read/write/subscribe
//! pipeline that operates on it.

pub mod kind;
pub mod limits;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::access::{AccessControl, AllowAll};
use crate::alarm::{Alarm, AlarmUpdate, PublishTarget};
use crate::convert::convert;
use crate::error::{ChannelError, Result};
use crate::metadata::{DbrMetadata, Limits};
use crate::snapshot::SnapshotMap;
use crate::subscription::{Queue, QueueHandle, SubHandle, SubscriptionSpec, SubscriptionUpdate, SyncTag};
use crate::timestamp::EpicsTimestamp;
use crate::types::{AccessRights, AlarmSeverity, AlarmStatus, ChannelType, DbrForm, StringEncoding, SubscriptionType};
use crate::value::NativeValue;

pub use kind::{ChannelKind, VerifyOutcome};

/// Metadata fields a caller may set alongside a value write, or via
/// `write_metadata` on their own. Fields left `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct WriteMetadata {
    pub units: Option<Vec<u8>>,
    pub precision: Option<i16>,
    pub limits: Option<Limits>,
    pub timestamp: Option<EpicsTimestamp>,
    pub status: Option<AlarmStatus>,
    pub severity: Option<AlarmSeverity>,
}

/// A deep, immutable copy of a channel's observable state, used both by
/// the sync-filter snapshot engine and as the read source for a
/// subscription's cached conversions. Shares the live alarm by owning a
/// reference to it: an acknowledgement applied after the snapshot was
/// taken is still visible through it.
#[derive(Clone)]
struct ChannelSnapshot {
    kind: ChannelKind,
    value: NativeValue,
    timestamp: EpicsTimestamp,
    encoding: StringEncoding,
    alarm: Arc<Alarm>,
}

struct ChannelData {
    kind: ChannelKind,
    value: NativeValue,
    timestamp: EpicsTimestamp,
    max_length: usize,
    encoding: StringEncoding,
    reported_record_type: String,
    /// Limit-check result staged during `verify_value`, merged into the
    /// alarm at commit and then cleared.
    staged_status: Option<AlarmStatus>,
    staged_severity: Option<AlarmSeverity>,
}

type SpecsByType = HashMap<ChannelType, std::collections::HashSet<SubscriptionSpec>>;
type SpecsByFilter = HashMap<Option<SyncTag>, SpecsByType>;

struct SubsState {
    queues: HashMap<QueueHandle, SpecsByFilter>,
    content_cache: HashMap<ChannelType, (Option<DbrMetadata>, NativeValue)>,
}

/// The read/write/subscribe surface for a single PV.
pub struct Channel {
    data: RwLock<ChannelData>,
    alarm: RwLock<Arc<Alarm>>,
    subs: RwLock<SubsState>,
    snapshots: RwLock<SnapshotMap<ChannelSnapshot>>,
    access: Arc<dyn AccessControl>,
    next_sub_id: AtomicU64,
    /// A weak handle to this same channel as a `PublishTarget`, captured
    /// at construction via `Arc::new_cyclic` so the write pipeline can
    /// exclude itself from an alarm's fan-out without needing an owning
    /// `Arc<Self>` it doesn't otherwise hold.
    self_weak: Weak<dyn PublishTarget>,
}

/// Construction parameters for a new channel.
pub struct ChannelConfig {
    pub kind: ChannelKind,
    pub initial_value: NativeValue,
    pub max_length: Option<usize>,
    pub encoding: StringEncoding,
    pub reported_record_type: String,
    pub access: Option<Arc<dyn AccessControl>>,
}

impl ChannelConfig {
    /// Starts a builder, in the teacher's owned-setter-returning-`Self`
    /// mould.
    pub fn builder(kind: ChannelKind, initial_value: NativeValue) -> ChannelConfigBuilder {
        ChannelConfigBuilder {
            kind,
            initial_value,
            max_length: None,
            encoding: StringEncoding::Latin1,
            reported_record_type: None,
            access: None,
        }
    }

    /// Rejects structurally impossible configurations. Equal ctrl limits
    /// mean "no limit configured", not an error, so this never inspects
    /// limits; it only catches a zero `max_length` or an oversized enum
    /// table.
    pub fn validate(&self) -> Result<()> {
        self.kind.validate()?;
        if self.max_length == Some(0) {
            return Err(ChannelError::InvalidConfig { reason: "max_length must be at least 1".into() });
        }
        Ok(())
    }
}

/// Builder for [`ChannelConfig`].
pub struct ChannelConfigBuilder {
    kind: ChannelKind,
    initial_value: NativeValue,
    max_length: Option<usize>,
    encoding: StringEncoding,
    reported_record_type: Option<String>,
    access: Option<Arc<dyn AccessControl>>,
}

impl ChannelConfigBuilder {
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn encoding(mut self, encoding: StringEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn reported_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.reported_record_type = Some(record_type.into());
        self
    }

    pub fn access(mut self, access: Arc<dyn AccessControl>) -> Self {
        self.access = Some(access);
        self
    }

    pub fn build(self) -> Result<ChannelConfig> {
        let config = ChannelConfig {
            kind: self.kind,
            initial_value: self.initial_value,
            max_length: self.max_length,
            encoding: self.encoding,
            reported_record_type: self.reported_record_type.unwrap_or_else(|| "unknown".into()),
            access: self.access,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Channel {
    /// Builds a new channel wrapped in an `Arc` and attaches it to a
    /// fresh alarm. The initial value fixes `max_length` when not
    /// configured explicitly.
    pub async fn new(config: ChannelConfig) -> Result<Arc<Self>> {
        config.validate()?;
        let max_length = config.max_length.unwrap_or_else(|| config.initial_value.len().max(1));

        let channel = Arc::new_cyclic(|weak_self: &Weak<Channel>| {
            let self_weak: Weak<dyn PublishTarget> = weak_self.clone();
            Channel {
                data: RwLock::new(ChannelData {
                    kind: config.kind,
                    value: config.initial_value,
                    timestamp: EpicsTimestamp::now(),
                    max_length,
                    encoding: config.encoding,
                    reported_record_type: config.reported_record_type,
                    staged_status: None,
                    staged_severity: None,
                }),
                alarm: RwLock::new(Arc::new(Alarm::new())),
                subs: RwLock::new(SubsState { queues: HashMap::new(), content_cache: HashMap::new() }),
                snapshots: RwLock::new(SnapshotMap::new()),
                access: config.access.unwrap_or_else(|| Arc::new(AllowAll)),
                next_sub_id: AtomicU64::new(1),
                self_weak,
            }
        });

        let alarm = channel.alarm.read().await.clone();
        alarm.connect(channel.self_weak.clone()).await;

        Ok(channel)
    }

    /// Atomically detaches from the current alarm and attaches to
    /// `new_alarm`. A channel always wears exactly one alarm.
    pub async fn replace_alarm(&self, new_alarm: Arc<Alarm>) {
        let mut current = self.alarm.write().await;
        current.disconnect(&self.self_weak).await;
        new_alarm.connect(self.self_weak.clone()).await;
        *current = new_alarm;
    }

    // ---------------------------------------------------------------
    // Read path
    // ---------------------------------------------------------------

    /// The alarm's current `(status, severity)`, independent of any
    /// particular DBR form.
    pub async fn current_alarm_state(&self) -> (AlarmStatus, AlarmSeverity) {
        let alarm = self.alarm.read().await.clone();
        (alarm.status().await, alarm.severity().await)
    }

    pub async fn auth_read(&self, hostname: &str, username: &str) -> Result<()> {
        let rights = self.access.check_access(hostname, username).await;
        if !rights.contains(AccessRights::READ) {
            return Err(ChannelError::Forbidden { operation: "read", required: AccessRights::READ });
        }
        Ok(())
    }

    /// Reads the channel as `to_type`, performing any required
    /// conversion and metadata population.
    pub async fn read(&self, to_type: ChannelType) -> Result<(Option<DbrMetadata>, NativeValue)> {
        if matches!(to_type, ChannelType::StsackString) {
            let alarm = self.alarm.read().await.clone();
            let stsack = alarm.read().await;
            return Ok((None, NativeValue::String(vec![String::from_utf8_lossy(&stsack.alarm_string).into_owned()])));
        }
        if matches!(to_type, ChannelType::ClassName) {
            let data = self.data.read().await;
            return Ok((None, NativeValue::String(vec![data.reported_record_type.clone()])));
        }

        let data = self.data.read().await;
        let native_to = resolve_native(to_type, &data.kind);
        let values = convert(&data.value, native_to, data.encoding, enum_table(&data.kind))?;

        if to_type.is_bare_native() {
            return Ok((None, values));
        }

        let form = to_type.form().expect("non-native, non-pseudo types always carry a form");
        let mut md = DbrMetadata::blank_for(form);
        let alarm = self.alarm.read().await.clone();
        md.status = alarm.status().await;
        md.severity = alarm.severity().await;
        fill_form_fields(&mut md, &data.kind, data.timestamp, data.encoding, native_to);
        Ok((Some(md), values))
    }

    // ---------------------------------------------------------------
    // Write path
    // ---------------------------------------------------------------

    pub async fn auth_write(&self, hostname: &str, username: &str) -> Result<()> {
        let rights = self.access.check_access(hostname, username).await;
        if !rights.contains(AccessRights::WRITE) {
            return Err(ChannelError::Forbidden { operation: "write", required: AccessRights::WRITE });
        }
        Ok(())
    }

    /// `PUT_ACKS`/`PUT_ACKT` acknowledge-only writes and the general
    /// from-wire write path, keyed on the `from_type` the payload is
    /// shaped as.
    pub async fn write_from_dbr(&self, from_type: ChannelType, data_bytes: NativeValue, flags: SubscriptionType) -> Result<()> {
        match from_type {
            ChannelType::PutAcks => {
                let severity = numeric_to_severity(&data_bytes)?;
                let alarm = self.alarm.read().await.clone();
                alarm
                    .write(AlarmUpdate { severity_to_acknowledge: Some(severity), ..Default::default() }, true, &[])
                    .await;
                return Ok(());
            }
            ChannelType::PutAckt => {
                let transient = numeric_to_severity(&data_bytes)? != AlarmSeverity::NoAlarm;
                let alarm = self.alarm.read().await.clone();
                alarm
                    .write(AlarmUpdate { must_acknowledge_transient: Some(transient), ..Default::default() }, true, &[])
                    .await;
                return Ok(());
            }
            ChannelType::StsackString | ChannelType::ClassName => {
                return Err(ChannelError::BadRequest {
                    reason: "STSACK_STRING and CLASS_NAME cannot be written".into(),
                });
            }
            _ => {}
        }

        let (data_type, enum_tbl) = {
            let data = self.data.read().await;
            (data.kind.data_type(), enum_table(&data.kind).map(|t| t.to_vec()))
        };
        let value = convert(&data_bytes, data_type, StringEncoding::Latin1, enum_tbl.as_deref())?;

        self.write(value, flags, true, WriteMetadata { timestamp: Some(EpicsTimestamp::now()), ..Default::default() })
            .await
    }

    /// The core write pipeline: preprocess, verify, stage alarm fields,
    /// commit, publish. The value/timestamp commit and its publish run
    /// with no suspension in between so a concurrent reader never
    /// observes a value without its corresponding alarm state.
    pub async fn write(&self, value: NativeValue, flags: SubscriptionType, verify: bool, metadata: WriteMetadata) -> Result<()> {
        let preprocessed = {
            let data = self.data.read().await;
            data.kind.preprocess(value, data.max_length, data.encoding)?
        };

        let mut modified: Option<NativeValue> = None;
        let mut skip = false;
        if verify {
            let outcome = {
                let data = self.data.read().await;
                data.kind.verify_value(&preprocessed)
            };
            let outcome = match outcome {
                Ok(o) => o,
                Err(e) => {
                    let alarm = self.alarm.read().await.clone();
                    alarm
                        .write(
                            AlarmUpdate { status: Some(AlarmStatus::Write), severity: Some(AlarmSeverity::Major), ..Default::default() },
                            true,
                            &[],
                        )
                        .await;
                    return Err(e);
                }
            };
            modified = outcome.replacement;
            skip = outcome.skip;
            if let Some(staged) = outcome.staged_alarm {
                let mut data = self.data.write().await;
                data.staged_status = Some(staged.0);
                data.staged_severity = Some(staged.1);
            }
        }

        if skip {
            self.apply_queued_snapshots().await;
            return Ok(());
        }

        let committed = modified.unwrap_or(preprocessed);

        let (staged_status, staged_severity) = {
            let mut data = self.data.write().await;
            (data.staged_status.take(), data.staged_severity.take())
        };

        let mut alarm_update = AlarmUpdate::default();
        {
            let alarm = self.alarm.read().await.clone();
            if let Some(status) = staged_status.or(metadata.status) {
                if status != alarm.status().await {
                    alarm_update.status = Some(status);
                }
            }
            if let Some(severity) = staged_severity.or(metadata.severity) {
                if severity != alarm.severity().await {
                    alarm_update.severity = Some(severity);
                }
            }
        }
        let alarm_touched = alarm_update.status.is_some() || alarm_update.severity.is_some();

        let effective_timestamp = metadata.timestamp.unwrap_or_else(EpicsTimestamp::now);

        self.apply_queued_snapshots().await;

        let kind_flags = {
            let mut data = self.data.write().await;
            data.value = committed;
            data.timestamp = effective_timestamp;
            if let ChannelKind::Numeric { units: slot, precision: p_slot, limits: l_slot, .. } = &mut data.kind {
                if let Some(units) = &metadata.units {
                    *slot = units.clone();
                }
                if let Some(precision) = metadata.precision {
                    *p_slot = precision;
                }
                if let Some(limits) = metadata.limits {
                    *l_slot = limits;
                }
            }
            data.kind.extra_write_flags()
        };

        if alarm_touched {
            let alarm = self.alarm.read().await.clone();
            alarm.write(alarm_update, true, std::slice::from_ref(&self.self_weak)).await;
        }

        self.publish(flags | kind_flags).await;

        Ok(())
    }

    /// Updates a subset of metadata fields (units, precision, limits,
    /// timestamp, status, severity) without touching the value.
    pub async fn write_metadata(&self, metadata: WriteMetadata, publish_flag: bool) -> Result<()> {
        {
            let mut data = self.data.write().await;
            if let ChannelKind::Numeric { units: slot, precision: p_slot, limits: l_slot, .. } = &mut data.kind {
                if let Some(units) = metadata.units {
                    *slot = units;
                }
                if let Some(precision) = metadata.precision {
                    *p_slot = precision;
                }
                if let Some(limits) = metadata.limits {
                    *l_slot = limits;
                }
            }
            if let Some(timestamp) = metadata.timestamp {
                data.timestamp = timestamp;
            }
        }

        if metadata.status.is_some() || metadata.severity.is_some() {
            let alarm = self.alarm.read().await.clone();
            alarm
                .write(AlarmUpdate { status: metadata.status, severity: metadata.severity, ..Default::default() }, publish_flag, &[])
                .await;
        }

        if publish_flag {
            self.publish(SubscriptionType::PROPERTY).await;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Subscription fan-out
    // ---------------------------------------------------------------

    /// Registers `sub_spec` against `queue`, immediately enqueuing one
    /// update reflecting the channel's state at subscribe time.
    pub async fn subscribe(&self, queue: Arc<dyn Queue>, sub_spec: SubscriptionSpec) -> Result<()> {
        let handle = QueueHandle(queue.clone());
        let sub_id = SubHandle(self.next_sub_id.fetch_add(1, Ordering::SeqCst));

        {
            let mut subs = self.subs.write().await;
            subs.queues
                .entry(handle)
                .or_default()
                .entry(sub_spec.filter.clone())
                .or_default()
                .entry(sub_spec.data_type)
                .or_default()
                .insert(sub_spec.clone());
        }

        let (metadata, value) = self.read_or_cache(sub_spec.data_type).await?;
        queue
            .enqueue(SubscriptionUpdate {
                specs: vec![sub_spec],
                metadata: metadata.unwrap_or_default(),
                value,
                flags: SubscriptionType::empty(),
                sub_handle: Some(sub_id),
            })
            .await?;
        debug!(sub_id = sub_id.0, "subscription registered");
        Ok(())
    }

    pub async fn unsubscribe(&self, queue: &Arc<dyn Queue>, sub_spec: &SubscriptionSpec) {
        let handle = QueueHandle(queue.clone());
        let mut subs = self.subs.write().await;
        if let Some(by_filter) = subs.queues.get_mut(&handle) {
            if let Some(by_type) = by_filter.get_mut(&sub_spec.filter) {
                if let Some(specs) = by_type.get_mut(&sub_spec.data_type) {
                    specs.remove(sub_spec);
                }
            }
        }
    }

    async fn read_or_cache(&self, wire_type: ChannelType) -> Result<(Option<DbrMetadata>, NativeValue)> {
        {
            let subs = self.subs.read().await;
            if let Some((md, v)) = subs.content_cache.get(&wire_type) {
                return Ok((md.clone(), v.clone()));
            }
        }
        let (md, v) = self.read(wire_type).await?;
        let mut subs = self.subs.write().await;
        subs.content_cache.insert(wire_type, (md.clone(), v.clone()));
        Ok((md, v))
    }

    /// Computes each requested wire form at most once per publish call
    /// and enqueues an update to every eligible subscriber. Clears the
    /// conversion cache first, so the very next publish recomputes from
    /// scratch.
    pub async fn publish(&self, flags: SubscriptionType) {
        {
            let mut subs = self.subs.write().await;
            subs.content_cache.clear();
        }

        let by_queue: Vec<(Arc<dyn Queue>, SpecsByFilter)> = {
            let subs = self.subs.read().await;
            subs.queues.iter().map(|(handle, by_filter)| (handle.0.clone(), by_filter.clone())).collect()
        };

        for (queue, by_filter) in by_queue {
            for (sync_tag, by_type) in by_filter {
                // `None` source means "read the live channel"; `Some`
                // wraps a snapshot a sync filter resolved to. No entry
                // at all means this sync tag is not currently eligible
                // and the whole group is skipped.
                let source: Option<Option<ChannelSnapshot>> = match &sync_tag {
                    None => Some(None),
                    Some(tag) => {
                        let snapshots = self.snapshots.read().await;
                        snapshots.get(&tag.state_var, tag.mode).cloned().map(Some)
                    }
                };
                let Some(source) = source else { continue };

                for (wire_type, specs) in by_type {
                    if specs.is_empty() {
                        continue;
                    }
                    let result = match &source {
                        None => self.read_or_cache(wire_type).await,
                        Some(snapshot) => read_from_snapshot(snapshot, wire_type).await,
                    };
                    let (md, value) = match result {
                        Ok(v) => v,
                        Err(e) => {
                            warn!(?e, "publish: failed to read channel for subscriber");
                            continue;
                        }
                    };
                    let update = SubscriptionUpdate {
                        specs: specs.into_iter().collect(),
                        metadata: md.unwrap_or_default(),
                        value,
                        flags,
                        sub_handle: None,
                    };
                    if let Err(e) = queue.enqueue(update).await {
                        warn!(?e, "publish: enqueue failed, subscriber queue likely closed");
                    }
                }
            }
        }
    }

    // ---------------------------------------------------------------
    // Snapshot/filter engine
    // ---------------------------------------------------------------

    pub async fn pre_state_change(&self, state: &str, new_value: bool) {
        let live = self.snapshot().await;
        self.snapshots.write().await.pre_state_change(state, new_value, live);
    }

    pub async fn post_state_change(&self, state: &str, new_value: bool) {
        let live = self.snapshot().await;
        self.snapshots.write().await.post_state_change(state, new_value, live);
    }

    async fn apply_queued_snapshots(&self) {
        let queued = self.snapshots.write().await.take_fill_queue();
        if queued.is_empty() {
            return;
        }
        let live = self.snapshot().await;
        let mut snapshots = self.snapshots.write().await;
        for (state, mode) in queued {
            snapshots.fill(&state, mode, live.clone());
        }
    }

    async fn snapshot(&self) -> ChannelSnapshot {
        let data = self.data.read().await;
        let alarm = self.alarm.read().await.clone();
        ChannelSnapshot {
            kind: data.kind.clone(),
            value: data.value.clone(),
            timestamp: data.timestamp,
            encoding: data.encoding,
            alarm,
        }
    }

    /// Captures this channel's current configuration, good for handing
    /// to `Channel::new` to stand up an equivalent channel elsewhere.
    /// Stands in for the upstream's pickling hook without committing
    /// this crate to any particular serialization format.
    pub async fn snapshot_config(&self) -> ChannelConfig {
        let data = self.data.read().await;
        ChannelConfig {
            kind: data.kind.clone(),
            initial_value: data.value.clone(),
            max_length: Some(data.max_length),
            encoding: data.encoding,
            reported_record_type: data.reported_record_type.clone(),
            access: Some(self.access.clone()),
        }
    }
}

#[async_trait]
impl PublishTarget for Channel {
    async fn publish(&self, flags: SubscriptionType) {
        Channel::publish(self, flags).await;
    }
}

fn fill_form_fields(
    md: &mut DbrMetadata,
    kind: &ChannelKind,
    timestamp: EpicsTimestamp,
    encoding: StringEncoding,
    native_to: crate::types::NativeBase,
) {
    if md.timestamp.is_some() {
        md.timestamp = Some(timestamp);
    }
    if let ChannelKind::Numeric { units, precision, limits, .. } = kind {
        if md.units.is_some() {
            md.units = Some(units.clone());
        }
        if md.precision.is_some() {
            md.precision = Some(*precision);
        }
        if md.limits.is_some() {
            md.limits = Some(cast_limits(limits, native_to));
        }
    }
    if let ChannelKind::Enum { strings } = kind {
        if md.enum_strings.is_some() {
            md.enum_strings = Some(
                strings
                    .iter()
                    .map(|s| crate::convert::encode_string(s, encoding))
                    .collect(),
            );
        }
    }
}

/// Casts every limit field through the same native-type conversion a
/// value read as `native_to` goes through, so e.g. a `Double`-backed
/// channel's limits read back as `DBR_CTRL_LONG` reflect what that
/// narrower type actually holds rather than the channel's own precision.
fn cast_limits(limits: &Limits, native_to: crate::types::NativeBase) -> Limits {
    let cast = |v: f64| -> f64 {
        convert(&NativeValue::Double(vec![v]), native_to, StringEncoding::Latin1, None)
            .ok()
            .and_then(|converted| converted.as_scalar_f64())
            .unwrap_or(v)
    };
    Limits {
        upper_disp_limit: cast(limits.upper_disp_limit),
        lower_disp_limit: cast(limits.lower_disp_limit),
        upper_alarm_limit: cast(limits.upper_alarm_limit),
        lower_alarm_limit: cast(limits.lower_alarm_limit),
        upper_warning_limit: cast(limits.upper_warning_limit),
        lower_warning_limit: cast(limits.lower_warning_limit),
        upper_ctrl_limit: cast(limits.upper_ctrl_limit),
        lower_ctrl_limit: cast(limits.lower_ctrl_limit),
    }
}

async fn read_from_snapshot(snapshot: &ChannelSnapshot, to_type: ChannelType) -> Result<(Option<DbrMetadata>, NativeValue)> {
    let native_to = resolve_native(to_type, &snapshot.kind);
    let values = convert(&snapshot.value, native_to, snapshot.encoding, enum_table(&snapshot.kind))?;
    if to_type.is_bare_native() {
        return Ok((None, values));
    }
    let form = to_type.form().expect("non-native, non-pseudo types always carry a form");
    let mut md = DbrMetadata::blank_for(form);
    // The alarm is shared by reference, not captured at snapshot time: an
    // acknowledgement applied after the snapshot still shows up here.
    md.status = snapshot.alarm.status().await;
    md.severity = snapshot.alarm.severity().await;
    fill_form_fields(&mut md, &snapshot.kind, snapshot.timestamp, snapshot.encoding, native_to);
    Ok((Some(md), values))
}

fn resolve_native(ty: ChannelType, kind: &ChannelKind) -> crate::types::NativeBase {
    match ty {
        ChannelType::LongString(_) => crate::types::NativeBase::Char,
        _ => ty.native_base().unwrap_or_else(|| kind.data_type()),
    }
}

fn enum_table(kind: &ChannelKind) -> Option<&[String]> {
    match kind {
        ChannelKind::Enum { strings } => Some(strings.as_slice()),
        _ => None,
    }
}

fn numeric_to_severity(value: &NativeValue) -> Result<AlarmSeverity> {
    let raw = value.as_scalar_f64().ok_or_else(|| ChannelError::BadRequest {
        reason: "PUT_ACKS/PUT_ACKT payload must be a numeric scalar".into(),
    })? as i64;
    match raw {
        0 => Ok(AlarmSeverity::NoAlarm),
        1 => Ok(AlarmSeverity::Minor),
        2 => Ok(AlarmSeverity::Major),
        3 => Ok(AlarmSeverity::Invalid),
        _ => Err(ChannelError::BadRequest { reason: format!("{raw} is not a valid severity ordinal") }),
    }
}

//! Subscription fan-out types: what a monitor asked for, the synchronous
//! filter gating its delivery, and the queue it delivers into.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::metadata::DbrMetadata;
use crate::types::{ChannelType, SubscriptionType};
use crate::value::NativeValue;

/// The six synchronous filter delivery modes a monitor can request
/// against a named boolean state variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncMode {
    Before,
    First,
    While,
    Last,
    After,
    Unless,
}

/// A synchronous filter: deliver only when `state_var`'s snapshot under
/// `mode` exists (i.e. the channel has passed through the corresponding
/// transition).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncTag {
    pub state_var: String,
    pub mode: SyncMode,
}

/// The filter a subscription is gated by. `None` means deliver every
/// publish unconditionally.
pub type ChannelFilter = Option<SyncTag>;

/// What a single monitor asked for: a wire data type plus an optional
/// synchronous gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionSpec {
    pub data_type: ChannelType,
    pub filter: ChannelFilter,
}

/// Opaque handle identifying a subscription to its owner. Passed in the
/// first update a subscription receives; later updates from the same
/// channel carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubHandle(pub u64);

/// One delivery to a queue: the specs it satisfies, the metadata/value
/// pair computed for the wire type they share, the flags describing why
/// this update happened, and the subscription handle (present only on
/// the very first update after a fresh `subscribe`).
#[derive(Debug, Clone)]
pub struct SubscriptionUpdate {
    pub specs: Vec<SubscriptionSpec>,
    pub metadata: DbrMetadata,
    pub value: NativeValue,
    pub flags: SubscriptionType,
    pub sub_handle: Option<SubHandle>,
}

/// A destination for subscription updates, owned by the external server
/// context. Channels only ever enqueue into it.
#[async_trait]
pub trait Queue: Send + Sync {
    async fn enqueue(&self, update: SubscriptionUpdate) -> Result<()>;
}

/// A `Queue` keyed by pointer identity so a channel's subscriber
/// registry can use `Arc<dyn Queue>` as a hash map key despite trait
/// objects having no natural `Eq`/`Hash`.
#[derive(Clone)]
pub struct QueueHandle(pub Arc<dyn Queue>);

impl PartialEq for QueueHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for QueueHandle {}

impl Hash for QueueHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

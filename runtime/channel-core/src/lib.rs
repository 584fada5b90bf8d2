//! # epics-channel-core
//!
//! Typed process-variable channel store and subscription fan-out for an
//! EPICS Channel Access server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      CHANNEL ACCESS DATA LAYER                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ Layer 4: Channel                                                  │
//! │   • read/write/subscribe pipeline, sync-filter snapshots          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ Layer 3: Channel kinds                                            │
//! │   • String, Byte, EncodedChar, Enum, Numeric + limit checking     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ Layer 2: Alarm                                                     │
//! │   • severity/status/acknowledgement state, weak channel back-refs │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ Layer 1: Values, conversion, metadata                             │
//! │   • NativeValue, convert(), DbrMetadata, EpicsTimestamp           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A channel owns one value of a fixed native type and one alarm. Reads
//! convert that value into whichever DBR form a client asked for; writes
//! preprocess and verify the incoming value against the channel kind's
//! own rules, stage any resulting alarm transition, commit, and publish
//! to every subscriber whose synchronous filter currently admits it.
//! Wire framing, request dispatch, and access-policy configuration are
//! external collaborators: this crate exposes the `Queue` and
//! `AccessControl` traits they implement.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use epics_channel_core::{
//!     channel::{Channel, ChannelConfig, ChannelKind},
//!     types::NativeBase,
//!     value::NativeValue,
//! };
//!
//! #[tokio::main]
//! async fn main() -> epics_channel_core::error::Result<()> {
//!     let config = ChannelConfig::builder(ChannelKind::numeric(NativeBase::Double), NativeValue::Double(vec![0.0]))
//!         .reported_record_type("ai")
//!         .build()?;
//!     let channel = Channel::new(config).await?;
//!     Ok(())
//! }
//! ```

pub mod access;
pub mod alarm;
pub mod channel;
pub mod convert;
pub mod error;
pub mod metadata;
pub mod snapshot;
pub mod subscription;
pub mod timestamp;
pub mod types;
pub mod value;

pub use channel::{Channel, ChannelConfig, ChannelConfigBuilder, ChannelKind};
pub use error::{ChannelError, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

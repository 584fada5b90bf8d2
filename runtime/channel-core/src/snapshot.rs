//! Snapshot/filter engine: per-channel state-variable snapshots taken at
//! transition boundaries, backing the six synchronous monitor filters.
//!
//! This module is generic over the snapshot payload type so it has no
//! dependency on the concrete `Channel` it snapshots; `channel::mod`
//! instantiates it with its own lightweight snapshot representation.

use std::collections::HashMap;

use crate::subscription::SyncMode;

/// Per-channel map of named boolean state variables to the snapshots
/// taken at each of their transition boundaries, plus the queue of
/// snapshots still owed after the next write completes.
pub struct SnapshotMap<T> {
    snapshots: HashMap<String, HashMap<SyncMode, T>>,
    fill_at_next_write: Vec<(String, SyncMode)>,
}

impl<T: Clone> SnapshotMap<T> {
    pub fn new() -> Self {
        SnapshotMap {
            snapshots: HashMap::new(),
            fill_at_next_write: Vec::new(),
        }
    }

    /// Called immediately before a state variable's value changes.
    /// Clears any prior snapshots for this state, then records `live`
    /// under `before` (on a false -> true transition) or `last` (on a
    /// true -> false transition).
    pub fn pre_state_change(&mut self, state: &str, new_value: bool, live: T) {
        let entry = self.snapshots.entry(state.to_string()).or_default();
        entry.clear();
        let mode = if new_value { SyncMode::Before } else { SyncMode::Last };
        entry.insert(mode, live);
    }

    /// Called immediately after a state variable's value changes. On
    /// false -> true, records `live` under `while` and queues an `after`
    /// snapshot to be filled from the post-write state. On true ->
    /// false, records `live` under `unless` and queues a `first`
    /// snapshot.
    pub fn post_state_change(&mut self, state: &str, new_value: bool, live: T) {
        let entry = self.snapshots.entry(state.to_string()).or_default();
        if new_value {
            entry.insert(SyncMode::While, live);
            self.fill_at_next_write.push((state.to_string(), SyncMode::After));
        } else {
            entry.insert(SyncMode::Unless, live);
            self.fill_at_next_write.push((state.to_string(), SyncMode::First));
        }
    }

    /// Drains the queue of snapshots owed after the next write, for the
    /// caller to materialize with the post-write live state.
    pub fn take_fill_queue(&mut self) -> Vec<(String, SyncMode)> {
        std::mem::take(&mut self.fill_at_next_write)
    }

    /// Materializes a previously-queued snapshot.
    pub fn fill(&mut self, state: &str, mode: SyncMode, snapshot: T) {
        self.snapshots.entry(state.to_string()).or_default().insert(mode, snapshot);
    }

    /// Looks up a saved snapshot, if one exists for this state/mode pair.
    pub fn get(&self, state: &str, mode: SyncMode) -> Option<&T> {
        self.snapshots.get(state).and_then(|modes| modes.get(&mode))
    }

    /// True if a subscription filter on `state`/`mode` is currently
    /// eligible to receive updates (i.e. a snapshot exists for it).
    pub fn is_eligible(&self, state: &str, mode: SyncMode) -> bool {
        self.get(state, mode).is_some()
    }
}

impl<T: Clone> Default for SnapshotMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

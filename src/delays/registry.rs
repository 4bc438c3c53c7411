//! Keyed table of cancelable single-shot delays.
//!
//! The registry never runs anything by itself: `advance`, `cancel` and `clear`
//! hand the callbacks that must run back to the caller, who owns the `World`
//! they run against. This keeps the registry usable while it is stored as a
//! resource inside that same world.

use bevy::prelude::*;
use std::collections::HashMap;

/// Deferred action, run once against the world.
pub type DelayCallback = Box<dyn FnOnce(&mut World) + Send + Sync + 'static>;

/// What happens to a pending delay when it is canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelPolicy {
    /// Drop the callback without running it.
    #[default]
    Drop,
    /// Run the callback immediately at cancel time.
    Invoke,
}

struct DelayEntry {
    fire_at: f64,
    seq: u64,
    policy: CancelPolicy,
    callback: DelayCallback,
}

/// Delay registry resource. At most one pending entry per key.
#[derive(Resource)]
pub struct DelayRegistry {
    namespace: String,
    entries: HashMap<String, DelayEntry>,
    clock: f64,
    next_seq: u64,
    enabled: bool,
}

impl Default for DelayRegistry {
    fn default() -> Self {
        Self::new("udm")
    }
}

impl DelayRegistry {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: HashMap::new(),
            clock: 0.0,
            next_seq: 0,
            enabled: true,
        }
    }

    fn qualify(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Schedule `callback` to run `seconds` from now under `key`.
    ///
    /// Any entry already pending under `key` is canceled first, following its
    /// own cancel policy; its callback is returned when it must run now.
    /// Nothing is scheduled while the registry is disabled.
    pub fn schedule(
        &mut self,
        key: &str,
        seconds: f32,
        policy: CancelPolicy,
        callback: DelayCallback,
    ) -> Option<DelayCallback> {
        let replaced = self.cancel(key);

        if !self.enabled {
            debug!("Delays disabled, skipping '{}'", key);
            return replaced;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let entry = DelayEntry {
            fire_at: self.clock + f64::from(seconds.max(0.0)),
            seq,
            policy,
            callback,
        };
        self.entries.insert(self.qualify(key), entry);

        replaced
    }

    /// Remove the entry under `key`.
    ///
    /// Returns the callback when the entry asked to be invoked on cancel.
    /// Unknown keys are a no-op.
    pub fn cancel(&mut self, key: &str) -> Option<DelayCallback> {
        let entry = self.entries.remove(&self.qualify(key))?;
        match entry.policy {
            CancelPolicy::Invoke => Some(entry.callback),
            CancelPolicy::Drop => None,
        }
    }

    /// Cancel every pending entry and disable scheduling until `enable`.
    pub fn clear(&mut self) -> Vec<DelayCallback> {
        self.enabled = false;

        let mut canceled: Vec<DelayEntry> = self.entries.drain().map(|(_, entry)| entry).collect();
        canceled.sort_by_key(|entry| entry.seq);

        canceled
            .into_iter()
            .filter(|entry| entry.policy == CancelPolicy::Invoke)
            .map(|entry| entry.callback)
            .collect()
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advance the clock by `seconds` and take every entry that became due,
    /// ordered by fire time and then by registration order.
    pub fn advance(&mut self, seconds: f32) -> Vec<DelayCallback> {
        self.clock += f64::from(seconds.max(0.0));
        let now = self.clock;

        let due_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.fire_at <= now)
            .map(|(key, _)| key.clone())
            .collect();

        let mut due: Vec<DelayEntry> = due_keys
            .iter()
            .filter_map(|key| self.entries.remove(key))
            .collect();
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));

        due.into_iter().map(|entry| entry.callback).collect()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.entries.contains_key(&self.qualify(key))
    }

    /// Seconds left before the entry under `key` fires.
    pub fn remaining(&self, key: &str) -> Option<f32> {
        self.entries
            .get(&self.qualify(key))
            .map(|entry| (entry.fire_at - self.clock).max(0.0) as f32)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

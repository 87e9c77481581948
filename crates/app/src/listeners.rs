//! Listener registry: named-event pub/sub for external observers.
//!
//! Independent of rule processing: emitting a name never touches rules or
//! history, and `process_event` never emits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::sync::lock;

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Zero-argument callbacks keyed by event name.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Mutex<HashMap<String, Vec<Listener>>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `name`.
    pub fn on(&self, name: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) {
        lock(&self.listeners)
            .entry(name.into())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Invoke every callback registered under `name`, in registration order.
    ///
    /// Callbacks run after the registry lock is released, so they may
    /// register further listeners. Returns how many callbacks ran.
    pub fn emit(&self, name: &str) -> usize {
        let callbacks = lock(&self.listeners).get(name).cloned().unwrap_or_default();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Number of callbacks registered under `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        lock(&self.listeners).get(name).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = lock(&self.listeners);
        let mut counts: Vec<(&String, usize)> =
            listeners.iter().map(|(name, l)| (name, l.len())).collect();
        counts.sort();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .finish()
    }
}

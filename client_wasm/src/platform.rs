//! Browser implementations of the core's clock and store seams

use game_core::{Clock, KeyValueStore};
use web_sys::{Performance, Storage};

/// Monotonic milliseconds from `performance.now()`
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}

/// High score persistence over `window.localStorage`.
///
/// Best effort: private browsing or a full quota must never break a session.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, high score will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<u32> {
        let raw = self.storage.as_ref()?.get_item(key).ok().flatten()?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, raw, "ignoring unparseable stored value");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: u32) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(err) = storage.set_item(key, &value.to_string()) {
            tracing::warn!(key, ?err, "failed to persist value");
        }
    }
}

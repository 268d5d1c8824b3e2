//! Tab-scoped key/value storage the session is mirrored into.
//!
//! In the browser this was `sessionStorage`: string values under string
//! keys, surviving a reload but not the tab. [`TabStorage`] is that
//! contract; [`MemoryStorage`] is the in-process implementation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Key holding the JSON-encoded principal.
pub const PRINCIPAL_KEY: &str = "user";

/// Key holding the expiry instant as decimal epoch milliseconds.
pub const EXPIRY_KEY: &str = "tokenExpiry";

/// String-valued storage scoped to one tab (or one console instance).
pub trait TabStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

impl TabStorage for Box<dyn TabStorage> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-memory [`TabStorage`].
///
/// Clones share one map. Opening a second store over a clone is how a
/// page reload is modelled: the old store goes away, the entries stay.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl TabStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

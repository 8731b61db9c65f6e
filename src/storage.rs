//! Key-value storage abstraction
//!
//! Mirrors the browser `localStorage` surface: string keys, string values,
//! synchronous access. The front-end implements it on top of `web_sys`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub trait KeyValueStore {
    /// `None` if the key is absent or storage is unavailable
    fn get(&self, key: &str) -> Option<String>;

    /// Returns `false` if the write failed
    fn set(&self, key: &str, value: &str) -> bool;

    /// Returns `false` if the removal failed
    fn delete(&self, key: &str) -> bool;
}

/// In-memory store. Clones share the same map.
///
/// Used when browser storage is unavailable (private mode, sandboxed
/// iframes) and by the test suites.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("authToken", "t1");
        assert_eq!(b.get("authToken").as_deref(), Some("t1"));
        b.delete("authToken");
        assert!(a.is_empty());
    }
}

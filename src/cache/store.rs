use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};

use crate::value::Value;

/// A `(function, fingerprint)` slot. Empty until its first successful
/// computation, then frozen.
pub type Slot = Arc<OnceCell<Arc<Value>>>;

#[derive(Debug, Default)]
struct FunctionShard {
    slots: Mutex<HashMap<i64, Slot>>,
}

impl FunctionShard {
    fn slot(&self, fingerprint: i64) -> Slot {
        Arc::clone(self.slots.lock().entry(fingerprint).or_default())
    }

    fn get(&self, fingerprint: i64) -> Option<Arc<Value>> {
        self.slots
            .lock()
            .get(&fingerprint)
            .and_then(|slot| slot.get().cloned())
    }

    fn computed(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }
}

/// Results of one cache instance, sharded by function name.
///
/// Entries are only ever added; nothing is evicted or overwritten.
#[derive(Debug, Default)]
pub struct ResultStore {
    shards: RwLock<HashMap<String, Arc<FunctionShard>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn shard(&self, name: &str) -> Arc<FunctionShard> {
        if let Some(shard) = self.shards.read().get(name) {
            return Arc::clone(shard);
        }
        Arc::clone(self.shards.write().entry(name.to_string()).or_default())
    }

    /// Slot for `(name, fingerprint)`, created empty on first access.
    pub fn slot(&self, name: &str, fingerprint: i64) -> Slot {
        self.shard(name).slot(fingerprint)
    }

    /// Stored result, if the slot has been computed.
    pub fn get(&self, name: &str, fingerprint: i64) -> Option<Arc<Value>> {
        let shard = self.shards.read().get(name).cloned()?;
        shard.get(fingerprint)
    }

    /// Number of functions with at least one slot.
    pub fn function_count(&self) -> usize {
        self.shards.read().len()
    }

    /// Number of computed results across all functions.
    pub fn len(&self) -> usize {
        self.shards
            .read()
            .values()
            .map(|shard| shard.computed())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of computed results stored for `name`.
    pub fn entries_for(&self, name: &str) -> usize {
        self.shards
            .read()
            .get(name)
            .map_or(0, |shard| shard.computed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_shared_per_key() {
        let store = ResultStore::new();
        let first = store.slot("f", 7);
        let second = store.slot("f", 7);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &store.slot("g", 7)));
    }

    #[test]
    fn empty_slots_do_not_count_as_entries() {
        let store = ResultStore::new();
        let slot = store.slot("f", 1);
        assert!(store.is_empty());
        assert_eq!(store.get("f", 1), None);

        slot.set(Arc::new(Value::Int(3))).expect("slot starts empty");
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries_for("f"), 1);
        assert_eq!(store.entries_for("g"), 0);
        assert_eq!(store.get("f", 1).as_deref(), Some(&Value::Int(3)));
    }

    #[test]
    fn names_partition_equal_fingerprints() {
        let store = ResultStore::new();
        store
            .slot("f", 99)
            .set(Arc::new(Value::from("from f")))
            .expect("empty");
        assert_eq!(store.get("g", 99), None);
        assert_eq!(store.function_count(), 1);
    }
}

//! Storage implementation for the seen-set.
//!
//! Provides concurrent, sharded storage keyed by call-site fingerprint.

use crate::application::ports::Storage;
use dashmap::DashMap;
use std::hash::Hash;

/// Thread-safe sharded storage backed by DashMap.
///
/// DashMap's entry API holds a shard lock for the duration of the
/// create-or-access closure, which is what makes the cache's check-and-mark
/// a single atomic operation.
#[derive(Debug)]
pub struct ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    map: DashMap<K, V>,
}

impl<K, V> ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new sharded storage instance.
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// Check if a key exists.
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.map.clear();
    }
}

impl<K, V> Default for ShardedStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

// Implement the Storage port
impl<K, V> Storage<K, V> for ShardedStorage<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R,
    {
        let entry = self.map.entry(key);
        let mut value_ref = entry.or_insert_with(factory);
        accessor(&mut value_ref)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn clear(&self) {
        self.map.clear()
    }

    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for entry in self.map.iter() {
            f(entry.key(), entry.value());
        }
    }
}

// Implement Storage for Arc<ShardedStorage> so the shared seen-set can be
// injected directly
impl<K, V> Storage<K, V> for std::sync::Arc<ShardedStorage<K, V>>
where
    K: Hash + Eq + Clone + Send + Sync + std::fmt::Debug,
    V: Send + Sync + std::fmt::Debug,
{
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R,
    {
        (**self).with_entry_mut(key, factory, accessor)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        (**self).for_each(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_created_once() {
        let storage: ShardedStorage<&str, u32> = ShardedStorage::new();

        let first = storage.with_entry_mut("site", || 1, |v| *v);
        let second = storage.with_entry_mut("site", || 99, |v| *v);

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_accessor_can_mutate() {
        let storage: ShardedStorage<&str, u32> = ShardedStorage::new();

        storage.with_entry_mut("site", || 0, |v| *v += 1);
        storage.with_entry_mut("site", || 0, |v| *v += 1);

        let value = storage.with_entry_mut("site", || 0, |v| *v);
        assert_eq!(value, 2);
    }

    #[test]
    fn test_clear() {
        let storage: ShardedStorage<&str, u32> = ShardedStorage::new();

        storage.with_entry_mut("a", || 1, |_| ());
        storage.with_entry_mut("b", || 2, |_| ());
        assert_eq!(storage.len(), 2);

        storage.clear();
        assert!(storage.is_empty());
        assert!(!storage.contains_key(&"a"));
    }

    #[test]
    fn test_for_each_visits_all_entries() {
        let storage: ShardedStorage<u32, u32> = ShardedStorage::new();
        for i in 0..5 {
            storage.with_entry_mut(i, || i * 10, |_| ());
        }

        let mut sum = 0;
        Storage::for_each(&storage, |_k, v| sum += v);
        assert_eq!(sum, 100);
    }

    #[test]
    fn test_concurrent_entry_access() {
        use std::sync::Arc;
        use std::thread;

        let storage: Arc<ShardedStorage<String, u32>> = Arc::new(ShardedStorage::new());
        let mut handles = vec![];

        for i in 0..10 {
            let storage_clone = Arc::clone(&storage);
            let handle = thread::spawn(move || {
                for j in 0..100 {
                    storage_clone.with_entry_mut(format!("key_{}_{}", i, j), || 0, |v| *v += 1);
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(storage.len(), 1000);
    }
}

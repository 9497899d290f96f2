//! Single-key open-addressed hash table with linear probing.
//!
//! This module contains the `LinearProbeTable` type, which is both a usable
//! container on its own and the nested per-key table inside
//! [`DoubleKeyTable`](crate::double_key::DoubleKeyTable).

use crate::util::rolling_hash;
use crate::{Error, Result};

/// Candidate table sizes, ascending primes roughly doubling each step.
///
/// Growth walks this sequence one step at a time and stops silently once it
/// is exhausted; inserts beyond that point may fail with
/// [`Error::TableFull`].
pub const TABLE_SIZES: [usize; 19] = [
    5, 13, 29, 53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613,
    393241, 786433, 1572869,
];

/// An open-addressed hash table resolving collisions with linear probing.
///
/// Keys hash via a polynomial rolling hash over their characters, so `K` must
/// expose its characters through `AsRef<str>`.
///
/// # Examples
///
/// ```
/// use switchback::LinearProbeTable;
///
/// let mut table = LinearProbeTable::<String, u32>::new();
/// table.set("bogong".to_string(), 1986).unwrap();
///
/// assert_eq!(table.get(&"bogong".to_string()), Ok(&1986));
/// assert!(table.get(&"feathertop".to_string()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LinearProbeTable<K, V> {
    /// Slot array; `None` is an empty slot
    array: Vec<Option<(K, V)>>,

    /// Candidate sizes for this table instance
    sizes: Vec<usize>,

    /// Index of the current size within `sizes`; advances monotonically
    size_index: usize,

    /// Number of live entries
    count: usize,
}

impl<K, V> LinearProbeTable<K, V> {
    /// Creates an empty table using the default size sequence.
    pub fn new() -> Self {
        Self::with_sizes(TABLE_SIZES.to_vec())
    }

    /// Creates an empty table with a custom ascending size sequence.
    ///
    /// # Panics
    ///
    /// Panics if `sizes` is empty or contains a size below 2 (the hash
    /// recurrence reduces the multiplier modulo `size - 1`).
    pub fn with_sizes(sizes: Vec<usize>) -> Self {
        assert!(!sizes.is_empty(), "size sequence must not be empty");
        assert!(sizes.iter().all(|&s| s >= 2), "table sizes must be >= 2");

        let mut array = Vec::new();
        array.resize_with(sizes[0], || None);

        LinearProbeTable {
            array,
            sizes,
            size_index: 0,
            count: 0,
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the current slot capacity (distinct from `len`).
    pub fn table_size(&self) -> usize {
        self.array.len()
    }
}

impl<K, V> LinearProbeTable<K, V>
where
    K: AsRef<str> + Eq,
{
    /// Hashes a key into the current slot range.
    pub fn hash(&self, key: &K) -> usize {
        rolling_hash(key.as_ref(), self.table_size())
    }

    /// Finds the slot for `key` by linear probing.
    ///
    /// Starting at the hashed position the scan wraps modulo the table size
    /// until it hits an empty slot (the insertion point when `is_insert`,
    /// otherwise [`Error::KeyNotFound`]) or the key itself. A full cycle
    /// without either fails with [`Error::TableFull`] on insert and
    /// [`Error::KeyNotFound`] on lookup.
    pub(crate) fn probe(&self, key: &K, is_insert: bool) -> Result<usize> {
        let mut position = self.hash(key);

        for _ in 0..self.table_size() {
            match &self.array[position] {
                None => {
                    return if is_insert {
                        Ok(position)
                    } else {
                        Err(Error::KeyNotFound)
                    };
                }
                Some((existing, _)) if existing == key => return Ok(position),
                Some(_) => {
                    // Taken by something else. Time to linear probe.
                    position = (position + 1) % self.table_size();
                }
            }
        }

        if is_insert {
            Err(Error::TableFull)
        } else {
            Err(Error::KeyNotFound)
        }
    }

    /// Retrieves a reference to the value stored for the given key.
    pub fn get(&self, key: &K) -> Result<&V> {
        let position = self.probe(key, false)?;
        match &self.array[position] {
            Some((_, value)) => Ok(value),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Returns `true` if the table contains the given key.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Inserts or updates a key-value pair.
    ///
    /// The count only grows for a genuinely new key. When the occupancy
    /// exceeds half the table size after the insert, the table grows to the
    /// next candidate size and every entry is rehashed.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        let position = self.probe(&key, true)?;

        if self.array[position].is_none() {
            self.count += 1;
        }
        self.array[position] = Some((key, value));

        if self.count > self.table_size() / 2 {
            self.resize()?;
        }

        Ok(())
    }

    /// Removes a key, returning its value.
    ///
    /// After clearing the slot the remainder of the probe cluster is
    /// repaired: each following entry up to the next empty slot is taken out
    /// and re-inserted, so lookups that probed through the cleared slot keep
    /// working.
    pub fn delete(&mut self, key: &K) -> Result<V> {
        let position = self.probe(key, false)?;
        let (_, value) = self.array[position].take().ok_or(Error::KeyNotFound)?;
        self.count -= 1;

        // Start moving over the cluster.
        let mut current = (position + 1) % self.table_size();
        while let Some((k, v)) = self.array[current].take() {
            let new_position = self.probe(&k, true)?;
            self.array[new_position] = Some((k, v));
            current = (current + 1) % self.table_size();
        }

        Ok(value)
    }

    /// Returns all keys in slot order.
    pub fn keys(&self) -> Vec<&K> {
        self.array
            .iter()
            .flatten()
            .map(|(key, _)| key)
            .collect()
    }

    /// Returns all values in slot order.
    pub fn values(&self) -> Vec<&V> {
        self.array
            .iter()
            .flatten()
            .map(|(_, value)| value)
            .collect()
    }

    /// Iterates over key-value pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.array.iter().flatten().map(|(key, value)| (key, value))
    }

    /// Grows the table to the next candidate size and rehashes every entry.
    ///
    /// Once the size sequence is exhausted this is a silent no-op; the table
    /// keeps its current capacity and future inserts may fail with
    /// [`Error::TableFull`].
    fn resize(&mut self) -> Result<()> {
        if self.size_index + 1 == self.sizes.len() {
            // Cannot be resized further.
            return Ok(());
        }
        self.size_index += 1;

        let mut new_array = Vec::new();
        new_array.resize_with(self.sizes[self.size_index], || None);
        let old_array = std::mem::replace(&mut self.array, new_array);

        for (key, value) in old_array.into_iter().flatten() {
            let position = self.probe(&key, true)?;
            self.array[position] = Some((key, value));
        }

        Ok(())
    }
}

impl<K, V> Default for LinearProbeTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumes the table, yielding owned key-value pairs in slot order.
impl<K, V> IntoIterator for LinearProbeTable<K, V> {
    type Item = (K, V);
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Option<(K, V)>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.array.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table() {
        let table: LinearProbeTable<String, u32> = LinearProbeTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.table_size(), 5);
    }

    #[test]
    fn test_set_and_get() {
        let mut table = LinearProbeTable::<String, u32>::new();
        table.set("hello".to_string(), 42).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"hello".to_string()), Ok(&42));
        assert_eq!(table.get(&"world".to_string()), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_set_replace_keeps_count() {
        let mut table = LinearProbeTable::<String, u32>::new();
        table.set("hello".to_string(), 42).unwrap();
        table.set("hello".to_string(), 100).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"hello".to_string()), Ok(&100));
    }

    #[test]
    fn test_colliding_keys_probe_into_cluster() {
        // "a", "f" and "k" all hash to slot 2 in a size-5 table.
        let mut table = LinearProbeTable::<String, u32>::with_sizes(vec![5]);
        table.set("a".to_string(), 1).unwrap();
        table.set("f".to_string(), 2).unwrap();
        table.set("k".to_string(), 3).unwrap();

        assert_eq!(table.get(&"a".to_string()), Ok(&1));
        assert_eq!(table.get(&"f".to_string()), Ok(&2));
        assert_eq!(table.get(&"k".to_string()), Ok(&3));
    }

    #[test]
    fn test_delete_repairs_cluster() {
        let mut table = LinearProbeTable::<String, u32>::with_sizes(vec![5]);
        table.set("a".to_string(), 1).unwrap();
        table.set("f".to_string(), 2).unwrap();
        table.set("k".to_string(), 3).unwrap();

        // Deleting the middle of the cluster must not strand "k" behind an
        // empty slot.
        assert_eq!(table.delete(&"f".to_string()), Ok(2));

        assert_eq!(table.get(&"a".to_string()), Ok(&1));
        assert_eq!(table.get(&"k".to_string()), Ok(&3));
        assert!(!table.contains(&"f".to_string()));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_delete_then_lookup_fails() {
        let mut table = LinearProbeTable::<String, u32>::new();
        table.set("hello".to_string(), 42).unwrap();

        assert_eq!(table.delete(&"hello".to_string()), Ok(42));
        assert!(!table.contains(&"hello".to_string()));
        assert_eq!(table.get(&"hello".to_string()), Err(Error::KeyNotFound));
        assert_eq!(table.delete(&"hello".to_string()), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_resize_preserves_membership() {
        let mut table = LinearProbeTable::<String, u32>::new();
        let keys: Vec<String> = (0..40).map(|i| format!("mountain-{}", i)).collect();

        for (i, key) in keys.iter().enumerate() {
            table.set(key.clone(), i as u32).unwrap();
        }

        // 40 entries cannot fit in the starting size of 5.
        assert!(table.table_size() > 5);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(table.get(key), Ok(&(i as u32)));
        }
    }

    #[test]
    fn test_exhausted_sizes_fill_then_full() {
        let mut table = LinearProbeTable::<String, u32>::with_sizes(vec![5]);
        for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            table.set(key.to_string(), i as u32).unwrap();
        }

        // Size sequence exhausted, all five slots occupied.
        assert_eq!(table.len(), 5);
        assert_eq!(
            table.set("f".to_string(), 99),
            Err(Error::TableFull)
        );
    }

    #[test]
    fn test_keys_values_slot_order_consistent() {
        let mut table = LinearProbeTable::<String, u32>::new();
        table.set("a".to_string(), 1).unwrap();
        table.set("b".to_string(), 2).unwrap();

        let keys = table.keys();
        let values = table.values();
        assert_eq!(keys.len(), 2);
        for (key, value) in keys.iter().zip(values.iter()) {
            assert_eq!(table.get(key), Ok(*value));
        }
    }
}

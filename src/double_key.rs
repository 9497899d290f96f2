//! Composite-key hash table built from two linear-probe layers.
//!
//! This module contains the `DoubleKeyTable` type: an outer open-addressed
//! array keyed by the first key, where each occupied outer slot owns a nested
//! [`LinearProbeTable`] keyed by the second key.

use crate::linear_probe::{LinearProbeTable, TABLE_SIZES};
use crate::util::rolling_hash;
use crate::{Error, Result};

/// A hash table mapping `(K1, K2)` pairs to values.
///
/// Collisions on the first key are resolved by linear probing over the outer
/// array; each outer slot owns a nested table that resolves the second key
/// independently. The outer slot is cleared as soon as its nested table loses
/// its last entry, so an outer key is only ever observable while at least one
/// pair lives under it.
///
/// # Examples
///
/// ```
/// use switchback::DoubleKeyTable;
///
/// let mut table = DoubleKeyTable::<String, String, u32>::new();
/// table.set("3".to_string(), "tali karng".to_string(), 15).unwrap();
/// table.set("3".to_string(), "crinoline".to_string(), 13).unwrap();
/// table.set("5".to_string(), "feathertop".to_string(), 22).unwrap();
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.keys().len(), 2);
/// assert_eq!(table.values_for(&"3".to_string()).unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DoubleKeyTable<K1, K2, V> {
    /// Outer slot array; each occupied slot owns a nested table
    array: Vec<Option<(K1, LinearProbeTable<K2, V>)>>,

    /// Candidate sizes for the outer array
    sizes: Vec<usize>,

    /// Candidate sizes handed to each freshly allocated nested table
    internal_sizes: Vec<usize>,

    /// Index of the current outer size; advances monotonically
    size_index: usize,

    /// Total number of live (key1, key2) pairs
    count: usize,
}

impl<K1, K2, V> DoubleKeyTable<K1, K2, V> {
    /// Creates an empty table with the default size sequences for both
    /// layers.
    pub fn new() -> Self {
        Self::with_sizes(TABLE_SIZES.to_vec(), TABLE_SIZES.to_vec())
    }

    /// Creates an empty table with custom outer and nested size sequences.
    ///
    /// # Panics
    ///
    /// Panics if either sequence is empty or contains a size below 2.
    pub fn with_sizes(sizes: Vec<usize>, internal_sizes: Vec<usize>) -> Self {
        assert!(!sizes.is_empty(), "size sequence must not be empty");
        assert!(
            sizes.iter().chain(internal_sizes.iter()).all(|&s| s >= 2),
            "table sizes must be >= 2"
        );

        let mut array = Vec::new();
        array.resize_with(sizes[0], || None);

        DoubleKeyTable {
            array,
            sizes,
            internal_sizes,
            size_index: 0,
            count: 0,
        }
    }

    /// Returns the total number of (key1, key2) pairs in the table.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the current outer slot capacity (distinct from `len`).
    pub fn table_size(&self) -> usize {
        self.array.len()
    }
}

impl<K1, K2, V> DoubleKeyTable<K1, K2, V>
where
    K1: AsRef<str> + Eq + Clone,
    K2: AsRef<str> + Eq,
{
    /// Hashes the first key into the outer slot range.
    pub fn hash1(&self, key1: &K1) -> usize {
        rolling_hash(key1.as_ref(), self.table_size())
    }

    /// Hashes the second key into a nested table's slot range.
    ///
    /// Same recurrence as [`hash1`](Self::hash1), parameterized by the
    /// nested table's current size.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchback::{DoubleKeyTable, LinearProbeTable};
    ///
    /// let table = DoubleKeyTable::<String, String, u32>::new();
    /// let nested = LinearProbeTable::<String, u32>::new();
    ///
    /// let slot = table.hash2(&"bogong".to_string(), &nested);
    /// assert!(slot < nested.table_size());
    /// ```
    pub fn hash2(&self, key2: &K2, sub_table: &LinearProbeTable<K2, V>) -> usize {
        sub_table.hash(key2)
    }

    /// Finds the outer slot for `key1` by linear probing, ignoring the
    /// second key entirely.
    fn outer_probe(&self, key1: &K1, is_insert: bool) -> Result<usize> {
        let mut position = self.hash1(key1);

        for _ in 0..self.table_size() {
            match &self.array[position] {
                None => {
                    return if is_insert {
                        Ok(position)
                    } else {
                        Err(Error::KeyNotFound)
                    };
                }
                Some((existing, _)) if existing == key1 => return Ok(position),
                Some(_) => {
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

    /// Retrieves a reference to the value stored for the key pair.
    pub fn get(&self, key1: &K1, key2: &K2) -> Result<&V> {
        let position = self.outer_probe(key1, false)?;
        match &self.array[position] {
            Some((_, sub_table)) => sub_table.get(key2),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Returns `true` if the table contains the key pair.
    pub fn contains(&self, key1: &K1, key2: &K2) -> bool {
        self.get(key1, key2).is_ok()
    }

    /// Inserts or updates a value under the key pair.
    ///
    /// A nested table is allocated (sized from the internal sequence) the
    /// first time a `key1` is seen. The composite count grows only when the
    /// nested insert adds a genuinely new `key2`; once it exceeds half the
    /// outer capacity, the whole table is rehashed into the next outer size.
    pub fn set(&mut self, key1: K1, key2: K2, value: V) -> Result<()> {
        let position = self.outer_probe(&key1, true)?;

        if self.array[position].is_none() {
            let sub_table = LinearProbeTable::with_sizes(self.internal_sizes.clone());
            self.array[position] = Some((key1, sub_table));
        }

        // Slot is guaranteed occupied now; delegate the second key.
        if let Some((_, sub_table)) = &mut self.array[position] {
            let before = sub_table.len();
            sub_table.set(key2, value)?;
            if sub_table.len() > before {
                self.count += 1;
            }
        }

        if self.count > self.table_size() / 2 {
            self.rehash()?;
        }

        Ok(())
    }

    /// Removes the value under the key pair, returning it.
    ///
    /// When the nested table loses its last entry the outer slot is cleared
    /// and the outer probe cluster repaired, mirroring the nested table's own
    /// delete behaviour.
    pub fn delete(&mut self, key1: &K1, key2: &K2) -> Result<V> {
        let position = self.outer_probe(key1, false)?;
        let (value, now_empty) = match &mut self.array[position] {
            Some((_, sub_table)) => {
                let value = sub_table.delete(key2)?;
                (value, sub_table.is_empty())
            }
            None => return Err(Error::KeyNotFound),
        };
        self.count -= 1;

        if now_empty {
            self.array[position] = None;

            // Repair the outer cluster past the cleared slot.
            let mut current = (position + 1) % self.table_size();
            while let Some((k1, sub_table)) = self.array[current].take() {
                let new_position = self.outer_probe(&k1, true)?;
                self.array[new_position] = Some((k1, sub_table));
                current = (current + 1) % self.table_size();
            }
        }

        Ok(value)
    }

    /// Returns every live top-level key in bucket order.
    pub fn keys(&self) -> Vec<&K1> {
        self.array.iter().flatten().map(|(k1, _)| k1).collect()
    }

    /// Returns the second-level keys under `key1` in bucket order, failing
    /// with [`Error::KeyNotFound`] when `key1` is absent.
    pub fn keys_for(&self, key1: &K1) -> Result<Vec<&K2>> {
        let position = self.outer_probe(key1, false)?;
        match &self.array[position] {
            Some((_, sub_table)) => Ok(sub_table.keys()),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Returns every value in the table, flattened in bucket order.
    pub fn values(&self) -> Vec<&V> {
        self.array
            .iter()
            .flatten()
            .flat_map(|(_, sub_table)| sub_table.values())
            .collect()
    }

    /// Returns the values under `key1` in bucket order, failing with
    /// [`Error::KeyNotFound`] when `key1` is absent.
    pub fn values_for(&self, key1: &K1) -> Result<Vec<&V>> {
        let position = self.outer_probe(key1, false)?;
        match &self.array[position] {
            Some((_, sub_table)) => Ok(sub_table.values()),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Iterates over all top-level keys in bucket order.
    pub fn iter_keys(&self) -> impl Iterator<Item = &K1> {
        self.array.iter().flatten().map(|(k1, _)| k1)
    }

    /// Iterates over every value in the table in bucket order.
    pub fn iter_values(&self) -> impl Iterator<Item = &V> {
        self.array
            .iter()
            .flatten()
            .flat_map(|(_, sub_table)| sub_table.iter().map(|(_, v)| v))
    }

    /// Grows the outer array to the next candidate size and reinserts every
    /// (key1, key2, value) triple.
    ///
    /// Nested tables are rebuilt from scratch so they also pick up fresh
    /// internal sizing. A no-op once the outer size sequence is exhausted.
    fn rehash(&mut self) -> Result<()> {
        if self.size_index + 1 == self.sizes.len() {
            // Cannot be resized further.
            return Ok(());
        }
        self.size_index += 1;

        let mut new_array = Vec::new();
        new_array.resize_with(self.sizes[self.size_index], || None);
        let old_array = std::mem::replace(&mut self.array, new_array);
        self.count = 0;

        for (key1, sub_table) in old_array.into_iter().flatten() {
            for (key2, value) in sub_table {
                self.set(key1.clone(), key2, value)?;
            }
        }

        Ok(())
    }
}

impl<K1, K2, V> Default for DoubleKeyTable<K1, K2, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DoubleKeyTable<String, String, u32> {
        DoubleKeyTable::new()
    }

    #[test]
    fn test_new_table() {
        let table = table();
        assert!(table.is_empty());
        assert_eq!(table.table_size(), 5);
    }

    #[test]
    fn test_set_and_get() {
        let mut table = table();
        table.set("3".to_string(), "bogong".to_string(), 1).unwrap();

        assert_eq!(table.get(&"3".to_string(), &"bogong".to_string()), Ok(&1));
        assert_eq!(
            table.get(&"3".to_string(), &"feathertop".to_string()),
            Err(Error::KeyNotFound)
        );
        assert_eq!(
            table.get(&"4".to_string(), &"bogong".to_string()),
            Err(Error::KeyNotFound)
        );
    }

    #[test]
    fn test_hash2_uses_nested_table_size() {
        // Outer and nested tables both start at size 5, and the two layers
        // share one recurrence, so the hashes agree until the sizes drift.
        let table = table();
        let nested = LinearProbeTable::<String, u32>::with_sizes(vec![5, 13]);
        let key = "bogong".to_string();

        assert_eq!(table.hash2(&key, &nested), nested.hash(&key));
        assert_eq!(table.hash2(&key, &nested), table.hash1(&key));
        assert!(table.hash2(&key, &nested) < nested.table_size());
    }

    #[test]
    fn test_count_tracks_leaf_pairs() {
        let mut table = table();
        table.set("3".to_string(), "a".to_string(), 1).unwrap();
        table.set("3".to_string(), "b".to_string(), 2).unwrap();
        table.set("3".to_string(), "b".to_string(), 3).unwrap();

        // Overwriting does not add a pair.
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_scoped_keys_and_values() {
        let mut table = table();
        table.set("3".to_string(), "a".to_string(), 1).unwrap();
        table.set("3".to_string(), "b".to_string(), 2).unwrap();
        table.set("5".to_string(), "c".to_string(), 3).unwrap();

        let mut nested = table.keys_for(&"3".to_string()).unwrap();
        nested.sort();
        assert_eq!(nested, vec![&"a".to_string(), &"b".to_string()]);

        let mut scoped: Vec<u32> = table
            .values_for(&"3".to_string())
            .unwrap()
            .into_iter()
            .copied()
            .collect();
        scoped.sort_unstable();
        assert_eq!(scoped, vec![1, 2]);

        assert_eq!(table.values_for(&"9".to_string()), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_deleting_last_pair_clears_outer_key() {
        let mut table = table();
        table.set("3".to_string(), "a".to_string(), 1).unwrap();
        table.set("5".to_string(), "b".to_string(), 2).unwrap();

        table.delete(&"3".to_string(), &"a".to_string()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.keys(), vec![&"5".to_string()]);
        assert_eq!(
            table.get(&"3".to_string(), &"a".to_string()),
            Err(Error::KeyNotFound)
        );
    }

    #[test]
    fn test_delete_repairs_outer_cluster() {
        // Single-character keys "a", "f", "k" collide in a size-5 outer
        // array; keep it at size 5 so the cluster survives inserts.
        let mut table = DoubleKeyTable::<String, String, u32>::with_sizes(
            vec![5],
            vec![5, 13],
        );
        table.set("a".to_string(), "x".to_string(), 1).unwrap();
        table.set("f".to_string(), "x".to_string(), 2).unwrap();
        table.set("k".to_string(), "x".to_string(), 3).unwrap();

        table.delete(&"f".to_string(), &"x".to_string()).unwrap();

        assert_eq!(table.get(&"a".to_string(), &"x".to_string()), Ok(&1));
        assert_eq!(table.get(&"k".to_string(), &"x".to_string()), Ok(&3));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rehash_preserves_membership() {
        let mut table = table();
        for i in 0..30 {
            table
                .set(format!("{}", i % 6), format!("peak-{}", i), i)
                .unwrap();
        }

        assert!(table.table_size() > 5);
        assert_eq!(table.len(), 30);
        for i in 0..30 {
            assert_eq!(
                table.get(&format!("{}", i % 6), &format!("peak-{}", i)),
                Ok(&i)
            );
        }
    }

    #[test]
    fn test_iterators_cover_all_entries() {
        let mut table = table();
        table.set("3".to_string(), "a".to_string(), 1).unwrap();
        table.set("5".to_string(), "b".to_string(), 2).unwrap();

        assert_eq!(table.iter_keys().count(), 2);
        let mut values: Vec<u32> = table.iter_values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2]);
    }
}

//! Dynamically-growing "infinite" hash table.
//!
//! This module contains the `InfiniteHashTable` type: a tree of fixed-width
//! 27-slot node arrays where the nth level is keyed by the nth character of
//! the key. Collisions never probe sideways; instead a deeper level is
//! allocated and both colliding keys are pushed down until their characters
//! diverge.

use crate::{Error, Result};

/// Width of every node array: 26 character buckets plus the terminal slot.
pub const TABLE_SIZE: usize = 27;

/// Index of the terminal slot, reserved for keys that have run out of
/// characters before the current level.
const TERMINAL: usize = TABLE_SIZE - 1;

/// Maps the character at `level` into a bucket index, or the terminal slot
/// when the key is shorter than the level.
fn char_hash(key: &str, level: usize) -> usize {
    match key.chars().nth(level) {
        Some(ch) => (ch as i64 - 'a' as i64).rem_euclid(26) as usize,
        None => TERMINAL,
    }
}

/// Returns `true` if the two keys land in different buckets at `level` or
/// any deeper level. Always true for distinct lowercase ASCII keys; false
/// only when every remaining character pair folds to the same bucket.
fn diverges(key: &str, other: &str, mut level: usize) -> bool {
    loop {
        let position = char_hash(key, level);
        if position != char_hash(other, level) {
            return true;
        }
        if position == TERMINAL {
            return false;
        }
        level += 1;
    }
}

/// A single slot in a node array.
#[derive(Debug, Clone)]
enum Slot<K, V> {
    Empty,
    Leaf(K, V),
    Table(Box<Node<K, V>>),
}

/// One fixed-width level of the table.
#[derive(Debug, Clone)]
struct Node<K, V> {
    slots: Vec<Slot<K, V>>,
}

impl<K, V> Node<K, V> {
    fn new() -> Self {
        Node {
            slots: (0..TABLE_SIZE).map(|_| Slot::Empty).collect(),
        }
    }
}

/// A string-keyed table that grows levels on collision instead of probing.
///
/// Every key's position is fully determined by its character sequence, so
/// the table never rehashes. Deleting can leave a nested node with a single
/// leaf and nothing else; such degenerate branches are collapsed back into
/// the parent slot so the structure mirrors what direct insertion would have
/// produced.
///
/// Keys are expected to be lowercase ASCII. Other characters still hash
/// (they fold into the same 26 buckets, so `'a'` and `'{'` share a bucket),
/// but two distinct keys whose characters fold identically at every position
/// cannot be told apart by the level hash: inserting the second replaces the
/// first. For lowercase ASCII keys this never happens and
/// [`sort_keys`](Self::sort_keys) is exactly lexicographic.
///
/// # Examples
///
/// ```
/// use switchback::InfiniteHashTable;
///
/// let mut table = InfiniteHashTable::new();
/// table.set("lin".to_string(), 1);
/// table.set("leg".to_string(), 2);
/// table.set("mine".to_string(), 3);
///
/// assert_eq!(table.get(&"leg".to_string()), Ok(&2));
/// let keys = table.sort_keys();
/// assert_eq!(keys, vec!["leg", "lin", "mine"]);
/// ```
#[derive(Debug, Clone)]
pub struct InfiniteHashTable<K, V> {
    root: Node<K, V>,
    count: usize,
}

impl<K, V> InfiniteHashTable<K, V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        InfiniteHashTable {
            root: Node::new(),
            count: 0,
        }
    }

    /// Returns the number of leaves in the table.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<K, V> InfiniteHashTable<K, V>
where
    K: AsRef<str> + Eq,
{
    /// Retrieves a reference to the value stored for the given key.
    pub fn get(&self, key: &K) -> Result<&V> {
        let mut node = &self.root;
        let mut level = 0;

        loop {
            match &node.slots[char_hash(key.as_ref(), level)] {
                Slot::Empty => return Err(Error::KeyNotFound),
                Slot::Leaf(existing, value) => {
                    return if existing == key {
                        Ok(value)
                    } else {
                        Err(Error::KeyNotFound)
                    };
                }
                Slot::Table(child) => {
                    node = child;
                    level += 1;
                }
            }
        }
    }

    /// Returns `true` if the table contains the given key.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Returns the sequence of slot indices leading to the key, one per
    /// level, failing with [`Error::KeyNotFound`] when the key is absent.
    pub fn get_location(&self, key: &K) -> Result<Vec<usize>> {
        let mut node = &self.root;
        let mut level = 0;
        let mut location = Vec::new();

        loop {
            let position = char_hash(key.as_ref(), level);
            match &node.slots[position] {
                Slot::Empty => return Err(Error::KeyNotFound),
                Slot::Leaf(existing, _) => {
                    location.push(position);
                    return if existing == key {
                        Ok(location)
                    } else {
                        Err(Error::KeyNotFound)
                    };
                }
                Slot::Table(child) => {
                    location.push(position);
                    node = child;
                    level += 1;
                }
            }
        }
    }

    /// Inserts or updates a key-value pair.
    ///
    /// A collision with a different key allocates nested node arrays level by
    /// level for as long as both keys keep hashing to the same slot, then
    /// places both leaves where they diverge. Terminal slots hold leaves only
    /// and never deepen.
    pub fn set(&mut self, key: K, value: V) {
        if Self::set_in(&mut self.root, 0, key, value) {
            self.count += 1;
        }
    }

    // Returns true when a genuinely new leaf was added.
    fn set_in(node: &mut Node<K, V>, level: usize, key: K, value: V) -> bool {
        let position = char_hash(key.as_ref(), level);
        let slot = std::mem::replace(&mut node.slots[position], Slot::Empty);

        match slot {
            Slot::Empty => {
                node.slots[position] = Slot::Leaf(key, value);
                true
            }
            Slot::Leaf(existing, existing_value) => {
                if existing == key {
                    node.slots[position] = Slot::Leaf(key, value);
                    false
                } else if !diverges(key.as_ref(), existing.as_ref(), level + 1) {
                    // The keys fold to the same bucket at every remaining
                    // level, so no depth separates them; the newer pair wins.
                    node.slots[position] = Slot::Leaf(key, value);
                    false
                } else {
                    let mut child = Node::new();
                    Self::place_pair(&mut child, level + 1, key, value, existing, existing_value);
                    node.slots[position] = Slot::Table(Box::new(child));
                    true
                }
            }
            Slot::Table(mut child) => {
                let added = Self::set_in(&mut child, level + 1, key, value);
                node.slots[position] = Slot::Table(child);
                added
            }
        }
    }

    // Pushes two colliding leaves down until their buckets diverge. The
    // caller has already checked `diverges`, so the recursion is bounded by
    // the first level where the buckets differ.
    fn place_pair(node: &mut Node<K, V>, level: usize, key: K, value: V, other: K, other_value: V) {
        let position = char_hash(key.as_ref(), level);
        let other_position = char_hash(other.as_ref(), level);

        if position == other_position {
            let mut child = Node::new();
            Self::place_pair(&mut child, level + 1, key, value, other, other_value);
            node.slots[position] = Slot::Table(Box::new(child));
        } else {
            node.slots[position] = Slot::Leaf(key, value);
            node.slots[other_position] = Slot::Leaf(other, other_value);
        }
    }

    /// Removes a key, returning its value.
    ///
    /// After clearing the leaf, degenerate branches collapse bottom-up: any
    /// nested node left holding exactly one leaf and no nested child is
    /// replaced in its parent slot by that leaf. The root array itself is
    /// never collapsed.
    pub fn delete(&mut self, key: &K) -> Result<V> {
        let value = Self::delete_in(&mut self.root, 0, key)?;
        self.count -= 1;
        Ok(value)
    }

    fn delete_in(node: &mut Node<K, V>, level: usize, key: &K) -> Result<V> {
        let position = char_hash(key.as_ref(), level);
        let slot = std::mem::replace(&mut node.slots[position], Slot::Empty);

        match slot {
            Slot::Empty => Err(Error::KeyNotFound),
            Slot::Leaf(existing, value) => {
                if existing == *key {
                    Ok(value)
                } else {
                    node.slots[position] = Slot::Leaf(existing, value);
                    Err(Error::KeyNotFound)
                }
            }
            Slot::Table(mut child) => {
                let result = Self::delete_in(&mut child, level + 1, key);
                if result.is_ok() {
                    match Self::take_sole_leaf(&mut child) {
                        Some(leaf) => node.slots[position] = leaf,
                        None => node.slots[position] = Slot::Table(child),
                    }
                } else {
                    node.slots[position] = Slot::Table(child);
                }
                result
            }
        }
    }

    // Extracts the node's only leaf when it has exactly one leaf and no
    // nested child, signalling that the branch should collapse.
    fn take_sole_leaf(node: &mut Node<K, V>) -> Option<Slot<K, V>> {
        let mut leaf_position = None;
        let mut leaf_count = 0;

        for (position, slot) in node.slots.iter().enumerate() {
            match slot {
                Slot::Leaf(..) => {
                    leaf_count += 1;
                    leaf_position = Some(position);
                }
                Slot::Table(_) => return None,
                Slot::Empty => {}
            }
        }

        match (leaf_count, leaf_position) {
            (1, Some(position)) => Some(std::mem::replace(&mut node.slots[position], Slot::Empty)),
            _ => None,
        }
    }

    /// Returns all keys in lexicographic order.
    ///
    /// The traversal visits each node's terminal slot first and then buckets
    /// 0..25 in order, recursing into nested nodes. For lowercase ASCII keys
    /// this is exactly sorted order (a prefix sorts before its extensions).
    pub fn sort_keys(&self) -> Vec<&K> {
        self.items().into_iter().map(|(key, _)| key).collect()
    }

    /// Returns all keys in traversal (sorted) order.
    pub fn keys(&self) -> Vec<&K> {
        self.sort_keys()
    }

    /// Returns all values in the same order as [`keys`](Self::keys).
    pub fn values(&self) -> Vec<&V> {
        self.items().into_iter().map(|(_, value)| value).collect()
    }

    fn items(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.count);
        Self::collect(&self.root, &mut out);
        out
    }

    fn collect<'a>(node: &'a Node<K, V>, out: &mut Vec<(&'a K, &'a V)>) {
        if let Slot::Leaf(key, value) = &node.slots[TERMINAL] {
            out.push((key, value));
        }
        for slot in &node.slots[..TERMINAL] {
            match slot {
                Slot::Leaf(key, value) => out.push((key, value)),
                Slot::Table(child) => Self::collect(child, out),
                Slot::Empty => {}
            }
        }
    }
}

impl<K, V> Default for InfiniteHashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

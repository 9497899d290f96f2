//! Ranked ordering of mountains by difficulty then name.
//!
//! `MountainOrganiser` is thin client code over
//! [`DoubleKeyTable`](crate::double_key::DoubleKeyTable): the table holds the
//! mountains themselves while a sorted key list answers positional queries.

use crate::double_key::DoubleKeyTable;
use crate::mountain::Mountain;
use crate::{Error, Result};

/// Maintains a ranking of every mountain added so far.
///
/// The ranking is sorted by (difficulty_level, name); batches added later
/// merge into the same single ordering.
///
/// # Examples
///
/// ```
/// use switchback::{Mountain, MountainOrganiser};
///
/// let mut organiser = MountainOrganiser::new();
/// organiser.add_mountains(vec![
///     Mountain::new("feathertop", 5),
///     Mountain::new("bogong", 3),
/// ]);
///
/// assert_eq!(organiser.cur_position(&Mountain::new("bogong", 3)), Ok(0));
/// assert_eq!(organiser.cur_position(&Mountain::new("feathertop", 5)), Ok(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MountainOrganiser {
    mountains: DoubleKeyTable<String, String, Mountain>,

    /// (difficulty, name) pairs in sorted order
    organised: Vec<(u32, String)>,
}

impl MountainOrganiser {
    /// Creates an empty organiser.
    pub fn new() -> Self {
        MountainOrganiser {
            mountains: DoubleKeyTable::new(),
            organised: Vec::new(),
        }
    }

    /// Returns the number of ranked mountains.
    pub fn len(&self) -> usize {
        self.organised.len()
    }

    /// Returns `true` if no mountains have been added.
    pub fn is_empty(&self) -> bool {
        self.organised.is_empty()
    }

    /// Merges a batch of mountains into the ranking.
    pub fn add_mountains(&mut self, mountains: Vec<Mountain>) {
        for mountain in mountains {
            let key1 = mountain.difficulty_level.to_string();
            let key2 = mountain.name.clone();
            self.organised
                .push((mountain.difficulty_level, mountain.name.clone()));
            // Default sizing cannot fail to find a slot.
            let _ = self.mountains.set(key1, key2, mountain);
        }
        // Stable merge of old and new entries into one ordering.
        self.organised.sort();
        self.organised.dedup();
    }

    /// Returns the rank of a mountain within the sorted ordering, failing
    /// with [`Error::KeyNotFound`] when the mountain was never added.
    pub fn cur_position(&self, mountain: &Mountain) -> Result<usize> {
        let key = (mountain.difficulty_level, mountain.name.clone());
        self.organised
            .binary_search(&key)
            .map_err(|_| Error::KeyNotFound)
    }

    /// Returns the ranked mountains in order.
    pub fn ranked(&self) -> Vec<Mountain> {
        self.organised
            .iter()
            .filter_map(|(diff, name)| {
                self.mountains
                    .get(&diff.to_string(), name)
                    .ok()
                    .cloned()
            })
            .collect()
    }
}

//! Mountain bookkeeping grouped by difficulty.
//!
//! `MountainManager` is thin client code over
//! [`DoubleKeyTable`](crate::double_key::DoubleKeyTable): mountains are keyed
//! by (difficulty, name) so that one outer key scopes all mountains of a
//! difficulty level.

use crate::double_key::DoubleKeyTable;
use crate::mountain::Mountain;
use crate::Result;

/// Stores mountains keyed by difficulty then name.
///
/// # Examples
///
/// ```
/// use switchback::{Mountain, MountainManager};
///
/// let mut manager = MountainManager::new();
/// manager.add_mountain(Mountain::new("bogong", 3));
/// manager.add_mountain(Mountain::new("feathertop", 3));
///
/// assert_eq!(manager.mountains_with_difficulty(3).len(), 2);
/// assert!(manager.mountains_with_difficulty(9).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MountainManager {
    mountains: DoubleKeyTable<String, String, Mountain>,
}

impl MountainManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        MountainManager {
            mountains: DoubleKeyTable::new(),
        }
    }

    /// Returns the number of managed mountains.
    pub fn len(&self) -> usize {
        self.mountains.len()
    }

    /// Returns `true` if no mountains are managed.
    pub fn is_empty(&self) -> bool {
        self.mountains.is_empty()
    }

    /// Adds a mountain, replacing any previous mountain with the same
    /// difficulty and name.
    pub fn add_mountain(&mut self, mountain: Mountain) {
        let key1 = mountain.difficulty_level.to_string();
        let key2 = mountain.name.clone();
        // Default sizing cannot fail to find a slot.
        let _ = self.mountains.set(key1, key2, mountain);
    }

    /// Removes a mountain, failing with [`Error::KeyNotFound`] when it was
    /// never added.
    pub fn remove_mountain(&mut self, mountain: &Mountain) -> Result<()> {
        self.mountains
            .delete(&mountain.difficulty_level.to_string(), &mountain.name)?;
        Ok(())
    }

    /// Replaces `old` with `new`, even when the difficulty changed.
    pub fn edit_mountain(&mut self, old: &Mountain, new: Mountain) -> Result<()> {
        self.remove_mountain(old)?;
        self.add_mountain(new);
        Ok(())
    }

    /// Returns all mountains with the given difficulty, or an empty list
    /// when none exist.
    ///
    /// This is the canonical client pattern for [`Error::KeyNotFound`]:
    /// swallow it and substitute an empty result.
    pub fn mountains_with_difficulty(&self, diff: u32) -> Vec<Mountain> {
        match self.mountains.values_for(&diff.to_string()) {
            Ok(values) => values.into_iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Returns every difficulty group in ascending difficulty order.
    pub fn group_by_difficulty(&self) -> Vec<Vec<Mountain>> {
        let mut difficulties: Vec<u32> = self
            .mountains
            .keys()
            .iter()
            .filter_map(|key| key.parse().ok())
            .collect();
        difficulties.sort_unstable();

        difficulties
            .into_iter()
            .map(|diff| self.mountains_with_difficulty(diff))
            .collect()
    }
}

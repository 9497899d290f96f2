//! The mountain value type carried by trails and tables.

use std::cmp::Ordering;

/// A named mountain with an ordered difficulty level.
///
/// Mountains order by difficulty first and name second, which is the order
/// the [`MountainOrganiser`](crate::organiser::MountainOrganiser) ranking
/// relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mountain {
    pub name: String,
    pub difficulty_level: u32,
}

impl Mountain {
    /// Creates a new mountain.
    pub fn new(name: impl Into<String>, difficulty_level: u32) -> Self {
        Mountain {
            name: name.into(),
            difficulty_level,
        }
    }
}

impl Ord for Mountain {
    fn cmp(&self, other: &Self) -> Ordering {
        self.difficulty_level
            .cmp(&other.difficulty_level)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Mountain {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

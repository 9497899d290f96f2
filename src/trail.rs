//! Persistent trail model for hiking networks.
//!
//! A trail is a recursive structure of three node kinds: an empty store, a
//! series (one mountain followed by the rest of the trail) and a split (a top
//! and bottom branch that rejoin before a following trail).
//!
//! All structural edits are pure: they return a new `Trail` value and share
//! every untouched sub-trail with the original via `Arc`, so references to an
//! old trail stay valid and unchanged after an edit.

use std::sync::Arc;

use crate::mountain::Mountain;
use crate::personality::{PersonalityDecision, WalkerPersonality};

/// A mountain followed by the rest of the trail.
///
/// ```text
/// --mountain--following--
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailSeries {
    pub mountain: Mountain,
    pub following: Trail,
}

/// A split in the trail.
///
/// ```text
///    _____top______
///   /              \
/// -<                >-following-
///   \____bottom____/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailSplit {
    pub top: Trail,
    pub bottom: Trail,
    pub following: Trail,
}

/// The two non-empty trail node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailStore {
    Series(TrailSeries),
    Split(TrailSplit),
}

/// A trail: either empty or a shared pointer to a series or split node.
///
/// `Trail` is cheap to clone; cloning shares the underlying store.
///
/// # Examples
///
/// ```
/// use switchback::{Mountain, Trail};
///
/// let trail = Trail::new().add_mountain_before(Mountain::new("bogong", 3));
/// let longer = trail.add_mountain_before(Mountain::new("feathertop", 5));
///
/// // The original trail is untouched by the edit.
/// assert_eq!(trail.collect_all_mountains().len(), 1);
/// assert_eq!(longer.collect_all_mountains().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    store: Option<Arc<TrailStore>>,
}

impl TrailSeries {
    /// Returns the trail left after removing this series' mountain.
    pub fn remove_mountain(&self) -> Trail {
        self.following.clone()
    }

    /// Returns a new trail with `mountain` in series before this one.
    pub fn add_mountain_before(&self, mountain: Mountain) -> Trail {
        Trail::series(
            mountain,
            Trail::series(self.mountain.clone(), self.following.clone()),
        )
    }

    /// Returns a new trail with `mountain` in series after this one, before
    /// the following trail.
    pub fn add_mountain_after(&self, mountain: Mountain) -> Trail {
        Trail::series(
            self.mountain.clone(),
            Trail::series(mountain, self.following.clone()),
        )
    }

    /// Returns a new trail with an empty branch before this series.
    pub fn add_empty_branch_before(&self) -> Trail {
        Trail::split(
            Trail::new(),
            Trail::new(),
            Trail::series(self.mountain.clone(), self.following.clone()),
        )
    }

    /// Returns a new trail with an empty branch between this series'
    /// mountain and its following trail.
    pub fn add_empty_branch_after(&self) -> Trail {
        Trail::series(
            self.mountain.clone(),
            Trail::split(Trail::new(), Trail::new(), self.following.clone()),
        )
    }
}

impl TrailSplit {
    /// Removes the branch, leaving just the following trail.
    pub fn remove_branch(&self) -> Trail {
        self.following.clone()
    }
}

impl Trail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Trail { store: None }
    }

    /// Creates a trail starting with a mountain.
    pub fn series(mountain: Mountain, following: Trail) -> Self {
        Trail {
            store: Some(Arc::new(TrailStore::Series(TrailSeries {
                mountain,
                following,
            }))),
        }
    }

    /// Creates a trail starting with a split.
    pub fn split(top: Trail, bottom: Trail, following: Trail) -> Self {
        Trail {
            store: Some(Arc::new(TrailStore::Split(TrailSplit {
                top,
                bottom,
                following,
            }))),
        }
    }

    /// Returns the trail's store, or `None` for an empty trail.
    pub fn store(&self) -> Option<&TrailStore> {
        self.store.as_deref()
    }

    /// Returns `true` if the trail has no store.
    pub fn is_empty(&self) -> bool {
        self.store.is_none()
    }

    /// Returns a new trail with `mountain` before everything currently in
    /// the trail.
    pub fn add_mountain_before(&self, mountain: Mountain) -> Trail {
        Trail::series(mountain, self.clone())
    }

    /// Returns a new trail with an empty branch before everything currently
    /// in the trail.
    pub fn add_empty_branch_before(&self) -> Trail {
        Trail::split(Trail::new(), Trail::new(), self.clone())
    }

    /// Follows a path through the trail, steering at splits via the
    /// personality.
    ///
    /// The walk keeps an explicit stack of pending continuations. Each split
    /// pushes its following trail before descending into the chosen branch;
    /// reaching an empty store pops the next continuation. A
    /// [`PersonalityDecision::Stop`] discards all pending continuations and
    /// ends the walk immediately.
    pub fn follow_path(&self, personality: &mut impl WalkerPersonality) {
        let mut current = self.clone();
        let mut trace: Vec<Trail> = Vec::new();

        loop {
            let store = match &current.store {
                Some(store) => Arc::clone(store),
                None => match trace.pop() {
                    Some(next) => {
                        current = next;
                        continue;
                    }
                    None => break,
                },
            };

            match &*store {
                TrailStore::Series(series) => {
                    personality.add_mountain(&series.mountain);
                    current = series.following.clone();
                }
                TrailStore::Split(split) => {
                    let decision = personality.select_branch(&split.top, &split.bottom);
                    trace.push(split.remove_branch());
                    match decision {
                        PersonalityDecision::Top => current = split.top.clone(),
                        PersonalityDecision::Bottom => current = split.bottom.clone(),
                        PersonalityDecision::Stop => {
                            trace.clear();
                            current = Trail::new();
                        }
                    }
                }
            }
        }
    }

    /// Returns every mountain on the trail.
    ///
    /// Order: a series contributes its mountain then its following trail; a
    /// split contributes all of its top branch, then all of its bottom
    /// branch, then its following trail.
    pub fn collect_all_mountains(&self) -> Vec<Mountain> {
        let mut mountains = Vec::new();
        self.collect_into(&mut mountains);
        mountains
    }

    fn collect_into(&self, mountains: &mut Vec<Mountain>) {
        let mut current = self;
        while let Some(store) = current.store.as_deref() {
            match store {
                TrailStore::Series(series) => {
                    mountains.push(series.mountain.clone());
                    current = &series.following;
                }
                TrailStore::Split(split) => {
                    split.top.collect_into(mountains);
                    split.bottom.collect_into(mountains);
                    current = &split.following;
                }
            }
        }
    }

    /// Returns the greatest difficulty of any mountain on the trail, or
    /// `None` for a trail with no mountains.
    pub fn max_difficulty(&self) -> Option<u32> {
        self.collect_all_mountains()
            .iter()
            .map(|mountain| mountain.difficulty_level)
            .max()
    }

    /// Enumerates every distinct root-to-end path whose mountains all have a
    /// difficulty strictly below `diff`.
    ///
    /// Each split forks the exploration into two independent walks, each
    /// carrying its own copy of the pending-continuation stack and the path
    /// so far; a path is recorded only when a walk reaches an empty store
    /// with no continuations left. The number of paths is exponential in the
    /// number of splits by design.
    pub fn difficulty_maximum_paths(&self, diff: u32) -> Vec<Vec<Mountain>> {
        let mut paths = Vec::new();
        Self::explore(self.clone(), Vec::new(), Vec::new(), diff, &mut paths);
        paths
    }

    fn explore(
        current: Trail,
        mut trace: Vec<Trail>,
        mut path: Vec<Mountain>,
        diff: u32,
        paths: &mut Vec<Vec<Mountain>>,
    ) {
        match current.store.as_deref() {
            None => match trace.pop() {
                None => paths.push(path),
                Some(next) => Self::explore(next, trace, path, diff, paths),
            },
            Some(TrailStore::Series(series)) => {
                // A mountain at or above the bound kills this walk entirely.
                if series.mountain.difficulty_level < diff {
                    path.push(series.mountain.clone());
                    Self::explore(series.following.clone(), trace, path, diff, paths);
                }
            }
            Some(TrailStore::Split(split)) => {
                trace.push(split.remove_branch());
                Self::explore(split.top.clone(), trace.clone(), path.clone(), diff, paths);
                Self::explore(split.bottom.clone(), trace, path, diff, paths);
            }
        }
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

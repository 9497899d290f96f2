//! Walker personality contract consumed by trail traversal.

use crate::mountain::Mountain;
use crate::trail::Trail;

/// The choice a personality makes when a walk reaches a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalityDecision {
    /// Take the top branch
    Top,
    /// Take the bottom branch
    Bottom,
    /// Abort the walk immediately, discarding pending continuations
    Stop,
}

/// Callbacks invoked synchronously by
/// [`Trail::follow_path`](crate::trail::Trail::follow_path).
///
/// Implementors accumulate whatever they like from the mountains they pass
/// and steer the walk at each split.
pub trait WalkerPersonality {
    /// Chooses which branch of a split to descend into, or stops the walk.
    fn select_branch(&mut self, top: &Trail, bottom: &Trail) -> PersonalityDecision;

    /// Called for every mountain the walk passes through.
    fn add_mountain(&mut self, mountain: &Mountain);
}

//! # Switchback
//!
//! Hash-table containers and a persistent trail structure for modelling hiking
//! networks with mountains of varying difficulty.
//!
//! The crate provides three associative containers and a recursive trail model:
//!
//! - **Immutable trail API**: all trail edits return a new `Trail` value
//! - **Structural sharing**: untouched sub-trails are shared via `Arc`
//! - **Open addressing**: `LinearProbeTable` and `DoubleKeyTable` resolve
//!   collisions with linear probing and repair probe clusters on delete
//! - **Level hashing**: `InfiniteHashTable` resolves collisions by growing a
//!   deeper 27-slot bucket level keyed by successive key characters
//!
//! ## Example
//!
//! ```rust
//! use switchback::DoubleKeyTable;
//!
//! let mut table = DoubleKeyTable::<String, String, u32>::new();
//!
//! table.set("5".to_string(), "kosciuszko".to_string(), 2228).unwrap();
//! table.set("5".to_string(), "bogong".to_string(), 1986).unwrap();
//!
//! assert_eq!(table.get(&"5".to_string(), &"bogong".to_string()), Ok(&1986));
//! assert_eq!(table.len(), 2);
//! ```

pub mod double_key;
pub mod infinite;
pub mod linear_probe;
pub mod manager;
pub mod mountain;
pub mod organiser;
pub mod personality;
pub mod trail;
mod util;

// Re-export public types
pub use crate::double_key::DoubleKeyTable;
pub use crate::infinite::InfiniteHashTable;
pub use crate::linear_probe::LinearProbeTable;
pub use crate::manager::MountainManager;
pub use crate::mountain::Mountain;
pub use crate::organiser::MountainOrganiser;
pub use crate::personality::{PersonalityDecision, WalkerPersonality};
pub use crate::trail::{Trail, TrailSeries, TrailSplit, TrailStore};

use thiserror::Error;

/// Errors that can occur in table operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The key (or key pair) is not present in the table
    #[error("key not found")]
    KeyNotFound,
    /// No free slot could be found within one full probe cycle
    #[error("table is full")]
    TableFull,
}

/// Convenience alias used by all fallible table operations.
pub type Result<T> = std::result::Result<T, Error>;

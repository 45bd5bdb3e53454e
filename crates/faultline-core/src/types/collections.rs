//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::{BTreeMap, BTreeSet};

/// SmallVec sized for aggregate port lists (six ports per side).
pub type SmallVec6<T> = SmallVec<[T; 6]>;

//! Shared collection types for Faultline.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet};

//! Hash collections used across spangrid.
//!
//! Re-exports of the AHash-backed map and set so every crate hashes item keys
//! the same way.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

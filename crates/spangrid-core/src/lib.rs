//! Spangrid Core
//!
//! Shared services for the spangrid crates: logging setup, profiling hooks,
//! hash collections and math re-exports.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;

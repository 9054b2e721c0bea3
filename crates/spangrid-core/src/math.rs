//! Math types re-exported from [`glam`].
//!
//! Pointer positions are carried as [`Vec2`] in window coordinates.
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::Vec2;

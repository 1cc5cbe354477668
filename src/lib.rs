//! Shelf application library
//!
//! Application modules and the bootstrap shared by the `shelf-app` and
//! `shelf` binaries.

pub mod app;
pub mod modules;

/// Re-export commonly used types
pub use modules::*;

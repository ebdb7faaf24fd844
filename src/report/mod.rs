//! Human-readable scan diagnostics.

pub mod format;

pub use format::*;

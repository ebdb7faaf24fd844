//! Input/output helpers.
//!
//! - scan estimate JSON read/write (`export`)

pub mod export;

pub use export::*;

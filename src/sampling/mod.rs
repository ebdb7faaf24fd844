//! Noise generation for magnitude dithering.

pub mod dither;
pub mod truncated_exp;

pub use dither::*;
pub use truncated_exp::*;

//! Small helpers shared across layers.

pub mod pattern;
pub mod random;
pub mod validate;

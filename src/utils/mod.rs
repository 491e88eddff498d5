//! Small shared types used across the crate.

mod range;

pub use range::Range;

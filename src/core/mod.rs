//! Core modules shared across the crate: fuzzy comparison traits, the generic
//! scalar trait, and common 2D math.
pub mod math;
pub mod traits;

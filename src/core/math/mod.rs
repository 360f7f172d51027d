//! Core/common math for angles, 2D vectors, closed-form root finding, and
//! circle intersections.
mod base_math;
mod circle_circle_intersect;
mod vector2;

pub use base_math::*;
pub use circle_circle_intersect::{circle_circle_intr, CircleCircleIntr};
pub use vector2::{vec2, Vector2};

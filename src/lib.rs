//! 2D geometry core for vector plotting.
//!
//! Provides cubic Bezier curve queries and subdivision ([bezier]), circular
//! arcs ([arc]), regions bounded by circles and arcs with boolean overlay
//! partitioning ([region]), and an area-proportional three-set Venn diagram
//! layout solver ([venn]).
//!
//! All geometry types are generic over a floating point type implementing
//! [core::traits::Real] (implemented for `f32` and `f64`), and all geometric
//! predicates are tolerance based (see [core::traits::FuzzyEq]).

#[macro_use]
mod macros;

pub mod arc;
pub mod bezier;
pub mod core;
pub mod region;
pub mod venn;

pub use static_aabb2d_index::AABB;

pub use crate::arc::Arc;
pub use crate::bezier::CubicBezier;
pub use crate::core::math::{vec2, Vector2};
pub use crate::core::traits::{FuzzyEq, FuzzyOrd, Real};
pub use crate::region::{
    ArcsRegion, CircleRegion, Contour, OverlayError, Region, RingRegion,
};
pub use crate::venn::{
    calc_distance, calc_triangle, calc_venn, calc_venn_regions, fit_into, lens_area,
    venn_regions, VennAreas, VennRegions,
};

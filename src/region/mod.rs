//! Planar regions bounded by full circles and circular arcs, with boolean
//! "overlay" partitioning against a circle.
mod overlay;

pub use overlay::OVERLAY_POS_EQUAL_EPS;

use crate::arc::Arc;
use crate::core::math::Vector2;
use crate::core::traits::Real;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error from [Region::overlay].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayError {
    /// Overlay is only supported on arc regions with a single two-arc
    /// (lens/lune) contour.
    UnsupportedArcsRegion {
        /// Total arc count of the region the overlay was attempted on.
        arcs: usize,
    },
    /// The intersection configuration did not match any supported overlap
    /// scenario. Unreachable for geometrically valid, non-tangent input;
    /// reaching it from such input is a defect in case coverage.
    UnknownScenario,
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::UnsupportedArcsRegion { arcs } => {
                write!(
                    f,
                    "overlay supports only two-arc regions (region has {} arcs)",
                    arcs
                )
            }
            OverlayError::UnknownScenario => write!(f, "unknown overlap scenario"),
        }
    }
}

impl std::error::Error for OverlayError {}

/// One closed sub-contour of a region boundary handed off to the drawing
/// layer: either a full circle or a closed chain of arc sweeps.
///
/// Multi-contour paths (e.g. a ring's outer boundary plus its hole) are
/// expected to be filled with the even-odd rule.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Contour<T = f64>
where
    T: Real,
{
    /// Full circle boundary.
    Circle {
        center: Vector2<T>,
        radius: T,
    },
    /// Closed chain of arcs: consecutive arcs share endpoints and the last
    /// arc closes back to the first.
    Arcs(Vec<Arc<T>>),
}

/// Region bounded by a single full circle.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CircleRegion<T = f64>
where
    T: Real,
{
    center: Vector2<T>,
    radius: T,
}

impl<T> CircleRegion<T>
where
    T: Real,
{
    pub fn new(center: Vector2<T>, radius: T) -> Self {
        debug_assert!(radius >= T::zero(), "circle radius must not be negative");
        CircleRegion { center, radius }
    }

    #[inline]
    pub fn center(&self) -> Vector2<T> {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> T {
        self.radius
    }

    #[inline]
    pub fn area(&self) -> T {
        T::pi() * self.radius * self.radius
    }

    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        point.distance_to(self.center) < self.radius
    }
}

/// Annular region: the area inside `outer` but outside `hole`. The hole lies
/// strictly inside the outer circle but need not be concentric with it.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RingRegion<T = f64>
where
    T: Real,
{
    outer: CircleRegion<T>,
    hole: CircleRegion<T>,
}

impl<T> RingRegion<T>
where
    T: Real,
{
    pub fn new(outer: CircleRegion<T>, hole: CircleRegion<T>) -> Self {
        debug_assert!(
            outer.center.distance_to(hole.center) + hole.radius
                <= outer.radius + T::fuzzy_epsilon(),
            "hole must lie inside the outer circle"
        );
        RingRegion { outer, hole }
    }

    #[inline]
    pub fn outer(&self) -> &CircleRegion<T> {
        &self.outer
    }

    #[inline]
    pub fn hole(&self) -> &CircleRegion<T> {
        &self.hole
    }

    #[inline]
    pub fn area(&self) -> T {
        self.outer.area() - self.hole.area()
    }

    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.outer.contains_point(point) && !self.hole.contains_point(point)
    }
}

/// Region bounded by one or more closed arc contours.
///
/// Each contour is a closed chain (consecutive arcs share endpoints, the
/// last closes to the first); a single full-circle arc is also a valid
/// contour, which is how untouched circle boundaries (e.g. a ring's hole)
/// are carried through overlay results. Point containment over the contours
/// uses the even-odd rule, so a contour lying inside another one acts as a
/// hole.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArcsRegion<T = f64>
where
    T: Real,
{
    contours: Vec<Vec<Arc<T>>>,
}

impl<T> ArcsRegion<T>
where
    T: Real,
{
    pub fn new(contours: Vec<Vec<Arc<T>>>) -> Self {
        #[cfg(debug_assertions)]
        for contour in &contours {
            debug_assert!(!contour.is_empty(), "contour must not be empty");
            if contour.len() > 1 {
                let eps = T::from(1e-4).unwrap();
                for pair in contour.windows(2) {
                    debug_assert!(
                        pair[0].end_point().fuzzy_eq_eps(pair[1].start_point(), eps),
                        "consecutive arcs must share an endpoint"
                    );
                }
                let first = &contour[0];
                let last = &contour[contour.len() - 1];
                debug_assert!(
                    last.end_point().fuzzy_eq_eps(first.start_point(), eps),
                    "contour must be closed"
                );
            }
        }
        ArcsRegion { contours }
    }

    /// Single-contour construction.
    pub fn from_arcs(arcs: Vec<Arc<T>>) -> Self {
        Self::new(vec![arcs])
    }

    #[inline]
    pub fn contours(&self) -> &[Vec<Arc<T>>] {
        &self.contours
    }

    /// Total arc count over all contours.
    #[inline]
    pub fn arc_count(&self) -> usize {
        self.contours.iter().map(|c| c.len()).sum()
    }

    /// Even-odd point containment: counts crossings of the horizontal ray
    /// from `point` toward +x with every boundary arc.
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        let mut crossings = 0usize;
        for contour in &self.contours {
            for arc in contour {
                crossings += arc_ray_crossings(arc, point);
            }
        }
        crossings % 2 == 1
    }
}

/// Crossing count of the horizontal +x ray from `point` with `arc`.
///
/// Tangent grazes (ray touching the circle) are skipped; they do not change
/// parity.
fn arc_ray_crossings<T>(arc: &Arc<T>, point: Vector2<T>) -> usize
where
    T: Real,
{
    let center = arc.center();
    let radius = arc.radius();
    let dy = point.y - center.y;
    let discriminant = radius * radius - dy * dy;
    if discriminant.fuzzy_eq_zero() || discriminant < T::zero() {
        return 0;
    }

    let dx = discriminant.sqrt();
    let mut count = 0;
    for x in [center.x - dx, center.x + dx] {
        if x <= point.x {
            continue;
        }
        let crossing = Vector2::new(x, point.y);
        if arc.contains_point(crossing) {
            count += 1;
        }
    }
    count
}

/// Planar area bounded by full circles and/or circular arcs.
///
/// Regions are immutable; [Region::overlay] never mutates and instead
/// returns two new regions partitioning the original area.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region<T = f64>
where
    T: Real,
{
    /// Region with no area.
    Empty,
    /// Full circle interior.
    Circle(CircleRegion<T>),
    /// Annulus (outer circle minus a hole).
    Ring(RingRegion<T>),
    /// One or more closed arc contours.
    Arcs(ArcsRegion<T>),
}

impl<T> Region<T>
where
    T: Real,
{
    /// Convenience constructor for a circle region.
    pub fn circle(center: Vector2<T>, radius: T) -> Self {
        Region::Circle(CircleRegion::new(center, radius))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Region::Empty)
    }

    /// Drawable boundary: one [Contour] per closed sub-contour. Empty vector
    /// for the empty region. This is the sole rendering hand-off; the
    /// external path builder converts it into drawing commands and fills
    /// multi-contour results with the even-odd rule.
    pub fn path(&self) -> Vec<Contour<T>> {
        match self {
            Region::Empty => Vec::new(),
            Region::Circle(c) => vec![Contour::Circle {
                center: c.center,
                radius: c.radius,
            }],
            Region::Ring(r) => vec![
                Contour::Circle {
                    center: r.outer.center,
                    radius: r.outer.radius,
                },
                Contour::Circle {
                    center: r.hole.center,
                    radius: r.hole.radius,
                },
            ],
            Region::Arcs(a) => a
                .contours
                .iter()
                .map(|arcs| {
                    if arcs.len() == 1 && arcs[0].is_full_circle() {
                        Contour::Circle {
                            center: arcs[0].center(),
                            radius: arcs[0].radius(),
                        }
                    } else {
                        Contour::Arcs(arcs.clone())
                    }
                })
                .collect(),
        }
    }

    /// Representative interior point for placing a label, or `None` when no
    /// single reasonable point exists (empty or degenerate regions).
    pub fn label(&self) -> Option<Vector2<T>> {
        match self {
            Region::Empty => None,
            Region::Circle(c) => Some(c.center),
            Region::Ring(r) => {
                let d = r.outer.center.distance_to(r.hole.center);
                // widest gap between hole edge and outer edge lies along the
                // direction from the hole center through the outer center
                let u = if d.fuzzy_eq_zero() {
                    Vector2::new(T::one(), T::zero())
                } else {
                    (r.outer.center - r.hole.center).scale(T::one() / d)
                };
                let gap_start = r.hole.radius - d;
                let gap_end = r.outer.radius;
                if (gap_end - gap_start).fuzzy_eq_zero() {
                    return None;
                }
                let m = (gap_start + gap_end) * T::half();
                Some(r.outer.center + u.scale(m))
            }
            Region::Arcs(a) => {
                for contour in &a.contours {
                    let mut sum = Vector2::zero();
                    for arc in contour {
                        sum = sum + arc.mid_point();
                    }
                    let candidate = sum.scale(T::one() / T::from(contour.len()).unwrap());
                    if a.contains_point(candidate) {
                        return Some(candidate);
                    }
                }
                None
            }
        }
    }

    /// Point containment test for the region's area.
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        match self {
            Region::Empty => false,
            Region::Circle(c) => c.contains_point(point),
            Region::Ring(r) => r.contains_point(point),
            Region::Arcs(a) => a.contains_point(point),
        }
    }
}

use crate::core::math::{
    angle, circle_circle_intr, normalize_radians, point_on_circle, CircleCircleIntr, Vector2,
};
use crate::core::traits::Real;
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Circular arc defined by center, radius, start/end angle, and sweep
/// direction.
///
/// Angles are normalized into `[0, 2PI)` at construction. `clockwise == true`
/// means the arc sweeps from `start_angle` toward `end_angle` by increasing
/// angle values; `clockwise == false` sweeps by decreasing values. Equal
/// normalized start and end angles denote a full circle (sweep of `2PI`),
/// never an empty arc, which lets a full circle boundary be carried as a
/// single `Arc` inside region contours.
///
/// The signed sweep is computed once at construction; all derived points are
/// cheap trig over it.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arc<T = f64>
where
    T: Real,
{
    center: Vector2<T>,
    radius: T,
    start_angle: T,
    end_angle: T,
    clockwise: bool,
    sweep: T,
}

impl<T> Arc<T>
where
    T: Real,
{
    /// Create a new arc, normalizing `start_angle` and `end_angle` into
    /// `[0, 2PI)`.
    pub fn new(center: Vector2<T>, radius: T, start_angle: T, end_angle: T, clockwise: bool) -> Self {
        debug_assert!(radius >= T::zero(), "arc radius must not be negative");
        let start_angle = normalize_radians(start_angle);
        let end_angle = normalize_radians(end_angle);

        let magnitude = if clockwise {
            normalize_radians(end_angle - start_angle)
        } else {
            normalize_radians(start_angle - end_angle)
        };
        // equal start/end angles mean a full circle
        let magnitude = if magnitude.fuzzy_eq_zero() {
            T::tau()
        } else {
            magnitude
        };
        let sweep = if clockwise { magnitude } else { -magnitude };

        Arc {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
            sweep,
        }
    }

    /// Create an arc from its start and end points, deriving the angles from
    /// the inclination of each point relative to `center`.
    pub fn from_points(
        center: Vector2<T>,
        start_point: Vector2<T>,
        end_point: Vector2<T>,
        radius: T,
        clockwise: bool,
    ) -> Self {
        Arc::new(
            center,
            radius,
            angle(center, start_point),
            angle(center, end_point),
            clockwise,
        )
    }

    /// Full circle at `center` with `radius` represented as a single arc.
    pub fn full_circle(center: Vector2<T>, radius: T) -> Self {
        Arc::new(center, radius, T::zero(), T::zero(), true)
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
    pub fn start_angle(&self) -> T {
        self.start_angle
    }

    #[inline]
    pub fn end_angle(&self) -> T {
        self.end_angle
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    /// Signed sweep between start and end angle, positive for clockwise arcs,
    /// magnitude at most `2PI`.
    #[inline]
    pub fn angle(&self) -> T {
        self.sweep
    }

    /// True if the arc covers the whole circle.
    #[inline]
    pub fn is_full_circle(&self) -> bool {
        self.sweep.abs().fuzzy_eq(T::tau())
    }

    /// Arc length (`radius * |sweep|`).
    #[inline]
    pub fn length(&self) -> T {
        self.radius * self.sweep.abs()
    }

    /// Area of the circular sector spanned by the arc (`r^2 * theta / 2`).
    #[inline]
    pub fn sector_area(&self) -> T {
        let theta = self.sweep.abs();
        self.radius * self.radius * theta * T::half()
    }

    /// Area of the circular segment between the arc and its chord
    /// (`r^2 * (theta - sin theta) / 2`).
    #[inline]
    pub fn segment_area(&self) -> T {
        let theta = self.sweep.abs();
        self.radius * self.radius * (theta - theta.sin()) * T::half()
    }

    /// Point on the arc's circle at the polar `angle` given.
    #[inline]
    pub fn angle_as_point(&self, angle: T) -> Vector2<T> {
        point_on_circle(self.radius, self.center, angle)
    }

    /// Polar angle (normalized into `[0, 2PI)`) of `point` relative to the
    /// arc's center.
    #[inline]
    pub fn point_as_angle(&self, point: Vector2<T>) -> T {
        normalize_radians(angle(self.center, point))
    }

    #[inline]
    pub fn start_point(&self) -> Vector2<T> {
        self.angle_as_point(self.start_angle)
    }

    #[inline]
    pub fn end_point(&self) -> Vector2<T> {
        self.angle_as_point(self.end_angle)
    }

    /// Point halfway along the arc, computed along the sweep direction (not a
    /// naive average of the endpoint angles).
    #[inline]
    pub fn mid_point(&self) -> Vector2<T> {
        self.angle_as_point(self.start_angle + self.sweep * T::half())
    }

    /// Angular distance from `start_angle` to `test_angle` measured along the
    /// arc's sweep direction, in `[0, 2PI)`.
    #[inline]
    fn sweep_distance(&self, test_angle: T) -> T {
        if self.clockwise {
            normalize_radians(test_angle - self.start_angle)
        } else {
            normalize_radians(self.start_angle - test_angle)
        }
    }

    /// Test if `test_angle` lies within the arc's sweep, fuzzy inclusive of
    /// the endpoints using `epsilon` (radians).
    #[inline]
    pub fn contains_angle_eps(&self, test_angle: T, epsilon: T) -> bool {
        self.sweep_distance(normalize_radians(test_angle))
            .fuzzy_lt_eps(self.sweep.abs(), epsilon)
    }

    /// Same as [Arc::contains_angle_eps] using the default fuzzy epsilon.
    #[inline]
    pub fn contains_angle(&self, test_angle: T) -> bool {
        self.contains_angle_eps(test_angle, T::fuzzy_epsilon())
    }

    /// Test if `point` (assumed to lie on the arc's circle) is within the
    /// arc's sweep.
    #[inline]
    pub fn contains_point_eps(&self, point: Vector2<T>, epsilon: T) -> bool {
        self.contains_angle_eps(self.point_as_angle(point), epsilon)
    }

    /// Same as [Arc::contains_point_eps] using the default fuzzy epsilon.
    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.contains_point_eps(point, T::fuzzy_epsilon())
    }

    /// Axis aligned bounding box of the arc: union of the endpoints and each
    /// axis-extreme circle point (angles 0, PI/2, PI, 3PI/2) covered by the
    /// sweep.
    pub fn bbox(&self) -> AABB<T> {
        let start = self.start_point();
        let mut result = AABB::new(start.x, start.y, start.x, start.y);
        let mut extend = |p: Vector2<T>| {
            result.min_x = num_traits::real::Real::min(result.min_x, p.x);
            result.min_y = num_traits::real::Real::min(result.min_y, p.y);
            result.max_x = num_traits::real::Real::max(result.max_x, p.x);
            result.max_y = num_traits::real::Real::max(result.max_y, p.y);
        };
        extend(self.end_point());

        let quarter = T::pi() * T::half();
        for k in 0..4 {
            let axis_angle = quarter * T::from(k).unwrap();
            if self.contains_angle(axis_angle) {
                extend(self.angle_as_point(axis_angle));
            }
        }

        result
    }

    /// Same arc geometry traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Arc::new(
            self.center,
            self.radius,
            self.end_angle,
            self.start_angle,
            !self.clockwise,
        )
    }

    /// Split the arc at the given points, assumed to lie on the arc and be
    /// ordered by position along the sweep. Sub-arcs of fuzzy zero sweep
    /// (split points coinciding with each other or with an endpoint) are
    /// dropped.
    pub fn split_at(&self, points: &[Vector2<T>], pos_equal_eps: T) -> Vec<Self> {
        let mut result = Vec::with_capacity(points.len() + 1);
        let mut prev = self.start_point();
        for &p in points {
            if p.fuzzy_eq_eps(prev, pos_equal_eps) {
                continue;
            }
            result.push(Arc::from_points(
                self.center,
                prev,
                p,
                self.radius,
                self.clockwise,
            ));
            prev = p;
        }

        let end = self.end_point();
        if !end.fuzzy_eq_eps(prev, pos_equal_eps) {
            result.push(Arc::from_points(
                self.center,
                prev,
                end,
                self.radius,
                self.clockwise,
            ));
        } else if result.is_empty() {
            // no effective split points at all
            result.push(*self);
        }

        result
    }

    /// Intersection points between the arc and the circle given, filtered to
    /// points within the arc's sweep and sorted by position along the sweep.
    ///
    /// A coincident circle yields no discrete points. `pos_equal_eps` is used
    /// both for the circle intersect classification and the sweep containment
    /// filter.
    pub fn intersect_circle_eps(
        &self,
        center: Vector2<T>,
        radius: T,
        pos_equal_eps: T,
    ) -> Vec<Vector2<T>> {
        let mut candidates: Vec<Vector2<T>> = Vec::new();
        match circle_circle_intr(self.radius, self.center, radius, center, pos_equal_eps) {
            CircleCircleIntr::NoIntersect | CircleCircleIntr::Overlapping => {}
            CircleCircleIntr::TangentIntersect { point } => candidates.push(point),
            CircleCircleIntr::TwoIntersects { point1, point2 } => {
                candidates.push(point1);
                candidates.push(point2);
            }
        }

        let angular_eps = pos_equal_eps / num_traits::real::Real::max(self.radius, T::one());
        candidates.retain(|&p| self.contains_point_eps(p, angular_eps));
        candidates.sort_by(|&a, &b| {
            let da = self.sweep_distance(self.point_as_angle(a));
            let db = self.sweep_distance(self.point_as_angle(b));
            da.partial_cmp(&db).unwrap()
        });
        candidates
    }

    /// Same as [Arc::intersect_circle_eps] using the default fuzzy epsilon.
    #[inline]
    pub fn intersect_circle(&self, center: Vector2<T>, radius: T) -> Vec<Vector2<T>> {
        self.intersect_circle_eps(center, radius, T::fuzzy_epsilon())
    }

    /// Intersection points between two arcs: the intersects of the two
    /// circles filtered to points contained by both sweeps, sorted along this
    /// arc.
    pub fn intersect_arc_eps(&self, other: &Self, pos_equal_eps: T) -> Vec<Vector2<T>> {
        let mut points = self.intersect_circle_eps(other.center, other.radius, pos_equal_eps);
        let angular_eps = pos_equal_eps / num_traits::real::Real::max(other.radius, T::one());
        points.retain(|&p| other.contains_point_eps(p, angular_eps));
        points
    }

    /// Same as [Arc::intersect_arc_eps] using the default fuzzy epsilon.
    #[inline]
    pub fn intersect_arc(&self, other: &Self) -> Vec<Vector2<T>> {
        self.intersect_arc_eps(other, T::fuzzy_epsilon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::core::traits::FuzzyEq;
    use std::f64::consts::PI;

    #[test]
    fn sweep_sign_matches_direction() {
        let cw = Arc::new(vec2(0.0, 0.0), 1.0, 0.0, PI / 2.0, true);
        assert!(cw.angle().fuzzy_eq(PI / 2.0));
        let ccw = Arc::new(vec2(0.0, 0.0), 1.0, 0.0, PI / 2.0, false);
        assert!(ccw.angle().fuzzy_eq(-3.0 * PI / 2.0));
    }

    #[test]
    fn mid_point_follows_sweep() {
        let arc = Arc::new(vec2(0.0, 0.0), 2.0, 0.0, PI, true);
        assert!(arc.mid_point().fuzzy_eq_eps(vec2(0.0, 2.0), 1e-12));
        let arc = Arc::new(vec2(0.0, 0.0), 2.0, 0.0, PI, false);
        assert!(arc.mid_point().fuzzy_eq_eps(vec2(0.0, -2.0), 1e-12));
    }

    #[test]
    fn split_preserves_total_sweep() {
        let arc = Arc::new(vec2(0.0, 0.0), 1.0, 0.0, PI, true);
        let p = arc.angle_as_point(PI / 3.0);
        let parts = arc.split_at(&[p], 1e-8);
        assert_eq!(parts.len(), 2);
        let total: f64 = parts.iter().map(|a| a.angle()).sum();
        assert!(total.fuzzy_eq_eps(arc.angle(), 1e-9));
        assert!(parts[0].end_point().fuzzy_eq(parts[1].start_point()));
    }
}

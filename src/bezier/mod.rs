//! Cubic Bezier curves: evaluation, derived geometry, subdivision, and
//! intersection search.
mod intersect;

use crate::core::math::{
    angle, cubic_roots_eps, quad_roots, quad_roots_eps, vec2, Vector2, GAUSS_LEGENDRE_24,
};
use crate::core::traits::Real;
use arrayvec::ArrayVec;
use static_aabb2d_index::AABB;
use std::cell::OnceCell;

pub use intersect::DEFAULT_INTERSECTION_THRESHOLD;

/// Epsilon for treating a leading polynomial coefficient as zero when the
/// curve is aligned to a baseline (degenerate near-linear configurations).
const ALIGNED_LEADING_EPS: f64 = 1e-3;

/// Cubic Bezier curve defined by two anchor points and two control points,
/// parametrized over `t` in `[0, 1]`.
///
/// Control points are immutable after construction. The curve also records
/// the `(t1, t2)` parameter range it occupies within the curve it was split
/// from (`(0, 1)` for a freshly constructed curve); [CubicBezier::split] and
/// [CubicBezier::slice] remap it so that segments produced by
/// [CubicBezier::reduce] can report their position in the root curve's
/// domain.
///
/// Derived values (bounding box, extremes, inflections, arc length, simple
/// flag) are memoized in write-once cells on first access; since the control
/// points never change the memoized values never go stale.
#[derive(Debug, Clone)]
pub struct CubicBezier<T = f64>
where
    T: Real,
{
    p1: Vector2<T>,
    c1: Vector2<T>,
    c2: Vector2<T>,
    p2: Vector2<T>,
    t1: T,
    t2: T,
    bbox: OnceCell<AABB<T>>,
    extremes: OnceCell<[Vec<T>; 2]>,
    inflections: OnceCell<Vec<T>>,
    length: OnceCell<T>,
    simple: OnceCell<bool>,
}

#[inline]
fn lerp<T>(a: Vector2<T>, b: Vector2<T>, t: T) -> Vector2<T>
where
    T: Real,
{
    a + (b - a).scale(t)
}

/// Signed angle at `origin` between the directions toward `a` and `b`.
#[inline]
fn three_point_angle<T>(origin: Vector2<T>, a: Vector2<T>, b: Vector2<T>) -> T
where
    T: Real,
{
    let v1 = a - origin;
    let v2 = b - origin;
    T::atan2(v1.perp_dot(v2), v1.dot(v2))
}

impl<T> CubicBezier<T>
where
    T: Real,
{
    /// Create a new curve from anchor points `p1`/`p2` and control points
    /// `c1`/`c2`.
    pub fn new(p1: Vector2<T>, c1: Vector2<T>, c2: Vector2<T>, p2: Vector2<T>) -> Self {
        Self::with_range(p1, c1, c2, p2, T::zero(), T::one())
    }

    fn with_range(
        p1: Vector2<T>,
        c1: Vector2<T>,
        c2: Vector2<T>,
        p2: Vector2<T>,
        t1: T,
        t2: T,
    ) -> Self {
        CubicBezier {
            p1,
            c1,
            c2,
            p2,
            t1,
            t2,
            bbox: OnceCell::new(),
            extremes: OnceCell::new(),
            inflections: OnceCell::new(),
            length: OnceCell::new(),
            simple: OnceCell::new(),
        }
    }

    /// Create a new curve from raw coordinates
    /// `(p1x, p1y, c1x, c1y, c2x, c2y, p2x, p2y)`.
    pub fn from_coords(coords: [T; 8]) -> Self {
        Self::new(
            vec2(coords[0], coords[1]),
            vec2(coords[2], coords[3]),
            vec2(coords[4], coords[5]),
            vec2(coords[6], coords[7]),
        )
    }

    #[inline]
    pub fn start(&self) -> Vector2<T> {
        self.p1
    }

    #[inline]
    pub fn control1(&self) -> Vector2<T> {
        self.c1
    }

    #[inline]
    pub fn control2(&self) -> Vector2<T> {
        self.c2
    }

    #[inline]
    pub fn end(&self) -> Vector2<T> {
        self.p2
    }

    /// Parameter range this curve occupies within the curve it was split
    /// from; `(0, 1)` unless produced by [CubicBezier::split] or
    /// [CubicBezier::slice].
    #[inline]
    pub fn range(&self) -> (T, T) {
        (self.t1, self.t2)
    }

    /// Point on the curve at parameter `t` (De Casteljau evaluation).
    ///
    /// `t == 0` and `t == 1` return the anchor points exactly, bypassing
    /// interpolation rounding.
    pub fn point(&self, t: T) -> Vector2<T> {
        if t == T::zero() {
            return self.p1;
        }
        if t == T::one() {
            return self.p2;
        }

        let q0 = lerp(self.p1, self.c1, t);
        let q1 = lerp(self.c1, self.c2, t);
        let q2 = lerp(self.c2, self.p2, t);
        let r0 = lerp(q0, q1, t);
        let r1 = lerp(q1, q2, t);
        lerp(r0, r1, t)
    }

    /// First derivative at parameter `t`.
    pub fn derivative(&self, t: T) -> Vector2<T> {
        let three = T::three();
        let d0 = (self.c1 - self.p1).scale(three);
        let d1 = (self.c2 - self.c1).scale(three);
        let d2 = (self.p2 - self.c2).scale(three);
        let q0 = lerp(d0, d1, t);
        let q1 = lerp(d1, d2, t);
        lerp(q0, q1, t)
    }

    /// Unit tangent vector at `t`, or `None` when the derivative has fuzzy
    /// zero length (degenerate configuration, e.g. an anchor coinciding with
    /// its control point at the curve end).
    pub fn tangent(&self, t: T) -> Option<Vector2<T>> {
        let d = self.derivative(t);
        if d.length().fuzzy_eq_zero() {
            return None;
        }
        Some(d.normalize())
    }

    /// Unit normal vector at `t` (tangent rotated 90 degrees counter
    /// clockwise), or `None` for a degenerate zero-length derivative.
    pub fn normal(&self, t: T) -> Option<Vector2<T>> {
        self.tangent(t).map(|tn| tn.perp())
    }

    /// Extreme parameter values per dimension (`[x_extremes, y_extremes]`):
    /// the roots of each dimension's derivative quadratic inside `(0, 1)`.
    /// Computed once and memoized.
    pub fn extremes(&self) -> &[Vec<T>; 2] {
        self.extremes.get_or_init(|| {
            let d0 = self.c1 - self.p1;
            let d1 = self.c2 - self.c1;
            let d2 = self.p2 - self.c2;
            let one_dim = |v0: T, v1: T, v2: T| -> Vec<T> {
                let a = v0 - T::two() * v1 + v2;
                let b = T::two() * (v1 - v0);
                let c = v0;
                let mut roots: Vec<T> = quad_roots(a, b, c)
                    .into_iter()
                    .filter(|&t| t > T::zero() && t < T::one())
                    .collect();
                roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
                roots
            };
            [one_dim(d0.x, d1.x, d2.x), one_dim(d0.y, d1.y, d2.y)]
        })
    }

    /// Axis aligned bounding box: union of both anchor points and the curve
    /// value at every extreme parameter. Computed once and memoized.
    pub fn bbox(&self) -> AABB<T> {
        *self.bbox.get_or_init(|| {
            let mut result = AABB::new(
                num_traits::real::Real::min(self.p1.x, self.p2.x),
                num_traits::real::Real::min(self.p1.y, self.p2.y),
                num_traits::real::Real::max(self.p1.x, self.p2.x),
                num_traits::real::Real::max(self.p1.y, self.p2.y),
            );
            for dim_roots in self.extremes() {
                for &t in dim_roots {
                    let p = self.point(t);
                    result.min_x = num_traits::real::Real::min(result.min_x, p.x);
                    result.min_y = num_traits::real::Real::min(result.min_y, p.y);
                    result.max_x = num_traits::real::Real::max(result.max_x, p.x);
                    result.max_y = num_traits::real::Real::max(result.max_y, p.y);
                }
            }
            result
        })
    }

    /// Arc length by 24-point Gauss-Legendre quadrature of the derivative
    /// magnitude over `[0, 1]` (the 0.5 factors map the rule's `[-1, 1]`
    /// interval). Computed once and memoized.
    pub fn length(&self) -> T {
        *self.length.get_or_init(|| {
            let half = T::half();
            let mut sum = T::zero();
            for &(w, x) in GAUSS_LEGENDRE_24.iter() {
                let w = T::from(w).unwrap();
                let x = T::from(x).unwrap();
                let t = half * x + half;
                sum = sum + w * self.derivative(t).length();
            }
            sum * half
        })
    }

    /// Align the curve's control points so `line_p0 -> line_p1` becomes the
    /// positive x axis.
    fn aligned_points(&self, line_p0: Vector2<T>, line_p1: Vector2<T>) -> [Vector2<T>; 4] {
        let a = angle(line_p0, line_p1);
        let (s, c) = a.sin_cos();
        let align_one = |p: Vector2<T>| -> Vector2<T> {
            let d = p - line_p0;
            vec2(d.x * c + d.y * s, -d.x * s + d.y * c)
        };
        [
            align_one(self.p1),
            align_one(self.c1),
            align_one(self.c2),
            align_one(self.p2),
        ]
    }

    /// Inflection parameter values inside `(0, 1)`: the curve is aligned to
    /// its baseline and the resulting quadratic is solved, with a near-zero
    /// leading coefficient treated as the degenerate linear case. Computed
    /// once and memoized.
    pub fn inflections(&self) -> &[T] {
        self.inflections.get_or_init(|| {
            if self.p1.fuzzy_eq(self.p2) {
                // no baseline to align against
                return Vec::new();
            }
            let [_, a1, a2, a3] = self.aligned_points(self.p1, self.p2);

            let a = a2.x * a1.y;
            let b = a3.x * a1.y;
            let c = a1.x * a2.y;
            let d = a3.x * a2.y;
            let eighteen = T::from(18.0).unwrap();
            let v1 = eighteen * (-T::three() * a + T::two() * b + T::three() * c - d);
            let v2 = eighteen * (T::three() * a - b - T::three() * c);
            let v3 = eighteen * (c - a);

            let mut roots: Vec<T> =
                quad_roots_eps(v1, v2, v3, T::from(ALIGNED_LEADING_EPS).unwrap())
                    .into_iter()
                    .filter(|&t| t > T::zero() && t < T::one())
                    .collect();
            roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
            roots
        })
    }

    /// Heuristic "simple segment" test: both control points lie on the same
    /// side of the baseline and the angle between the end normals is below 60
    /// degrees. Simple segments are guaranteed free of self crossings and
    /// sharp curvature reversals, which is what the subdivision based
    /// algorithms rely on. Computed once and memoized.
    pub fn simple(&self) -> bool {
        *self.simple.get_or_init(|| {
            let a1 = three_point_angle(self.p1, self.p2, self.c1);
            let a2 = three_point_angle(self.p1, self.p2, self.c2);
            if (a1 > T::zero() && a2 < T::zero()) || (a1 < T::zero() && a2 > T::zero()) {
                return false;
            }

            let (n1, n2) = match (self.normal(T::zero()), self.normal(T::one())) {
                (Some(n1), Some(n2)) => (n1, n2),
                _ => return false,
            };
            let s = num_traits::clamp(n1.dot(n2), -T::one(), T::one());
            s.acos().abs() < T::pi() / T::three()
        })
    }

    /// Full De Casteljau triangle at `t`, returned as nested interpolation
    /// levels (4 points, then 3, 2, and 1).
    pub fn hull(&self, t: T) -> Vec<Vec<Vector2<T>>> {
        let mut levels = vec![vec![self.p1, self.c1, self.c2, self.p2]];
        while levels.last().unwrap().len() > 1 {
            let prev = levels.last().unwrap();
            let next: Vec<Vector2<T>> = prev
                .windows(2)
                .map(|pair| lerp(pair[0], pair[1], t))
                .collect();
            levels.push(next);
        }
        levels
    }

    /// Remap a local parameter into this curve's `(t1, t2)` bookkeeping
    /// range.
    #[inline]
    fn map_to_range(&self, t: T) -> T {
        self.t1 + t * (self.t2 - self.t1)
    }

    /// Split into left/right sub-curves at `t` using the De Casteljau hull.
    /// Each half records its parameter range within the root curve.
    pub fn split(&self, t: T) -> (Self, Self) {
        let hull = self.hull(t);
        let split_point = hull[3][0];
        let left = Self::with_range(
            self.p1,
            hull[1][0],
            hull[2][0],
            split_point,
            self.t1,
            self.map_to_range(t),
        );
        let right = Self::with_range(
            split_point,
            hull[2][1],
            hull[1][2],
            self.p2,
            self.map_to_range(t),
            self.t2,
        );
        (left, right)
    }

    /// Sub-curve over the local parameter range `[t1, t2]`, or `None` when
    /// the range is fuzzy empty.
    pub fn slice(&self, t1: T, t2: T) -> Option<Self> {
        if t1.fuzzy_eq(t2) {
            return None;
        }
        let (t1, t2) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

        if t1.fuzzy_eq_zero() {
            if t2.fuzzy_eq(T::one()) {
                return Some(self.clone());
            }
            return Some(self.split(t2).0);
        }

        let right = self.split(t1).1;
        if t2.fuzzy_eq(T::one()) {
            return Some(right);
        }
        let local = (t2 - t1) / (T::one() - t1);
        Some(right.split(local).0)
    }

    fn push_simple_segments(segment: CubicBezier<T>, depth: u32, out: &mut Vec<CubicBezier<T>>) {
        // depth bound guarantees termination for degenerate geometry that
        // never becomes simple (e.g. all control points coincident)
        if depth == 0 || segment.simple() {
            out.push(segment);
            return;
        }
        let (left, right) = segment.split(T::half());
        Self::push_simple_segments(left, depth - 1, out);
        Self::push_simple_segments(right, depth - 1, out);
    }

    /// Decompose the curve into simple sub-segments whose `(t1, t2)` ranges
    /// exactly partition `[0, 1]`: the curve is first split at every extreme
    /// and inflection parameter, then each candidate that still fails
    /// [CubicBezier::simple] is recursively bisected at its midpoint.
    pub fn reduce(&self) -> Vec<Self> {
        const MAX_BISECT_DEPTH: u32 = 10;

        if self.simple() {
            return vec![self.clone()];
        }

        let mut ts: Vec<T> = Vec::new();
        ts.push(T::zero());
        for dim_roots in self.extremes() {
            ts.extend_from_slice(dim_roots);
        }
        ts.extend_from_slice(self.inflections());
        ts.push(T::one());
        ts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        ts.dedup_by(|a, b| a.fuzzy_eq_eps(*b, T::from(1e-6).unwrap()));

        let mut result = Vec::new();
        for pair in ts.windows(2) {
            if let Some(candidate) = self.slice(pair[0], pair[1]) {
                Self::push_simple_segments(candidate, MAX_BISECT_DEPTH, &mut result);
            }
        }
        result
    }

    /// Closest curve point to `target`: a 100-entry lookup table locates the
    /// coarse nearest parameter, then a fine march at 1/100 of the coarse
    /// step refines around it. Returns `(point, t, distance)`.
    ///
    /// The refinement window is fixed rather than adaptive, so extremely
    /// sharp curvature can under-resolve; intended for interactive hit
    /// testing, not CAD-grade projection.
    pub fn project(&self, target: Vector2<T>) -> (Vector2<T>, T, T) {
        const LOOKUP_STEPS: usize = 100;

        let coarse_step = T::one() / T::from(LOOKUP_STEPS).unwrap();
        let mut best_t = T::zero();
        let mut best_dist: T = Real::max_value();
        for i in 0..=LOOKUP_STEPS {
            let t = coarse_step * T::from(i).unwrap();
            let d = self.point(t).distance_to(target);
            if d < best_dist {
                best_dist = d;
                best_t = t;
            }
        }

        let fine_step = coarse_step / T::from(LOOKUP_STEPS).unwrap();
        let window_start = num_traits::real::Real::max(best_t - coarse_step, T::zero());
        let window_end = num_traits::real::Real::min(best_t + coarse_step, T::one());
        let mut t = window_start;
        while t <= window_end {
            let d = self.point(t).distance_to(target);
            if d < best_dist {
                best_dist = d;
                best_t = t;
            }
            t = t + fine_step;
        }

        (self.point(best_t), best_t, best_dist)
    }

    /// Parameter values in `[0, 1]` where the curve crosses the infinite line
    /// through `line_p0` and `line_p1`: the curve is aligned so the line
    /// becomes the x axis and the resulting cubic in the aligned y
    /// coordinates is solved.
    pub fn line_cuts(&self, line_p0: Vector2<T>, line_p1: Vector2<T>) -> ArrayVec<T, 3> {
        let [a0, a1, a2, a3] = self.aligned_points(line_p0, line_p1);
        let (y0, y1, y2, y3) = (a0.y, a1.y, a2.y, a3.y);
        let three = T::three();
        let six = three + three;

        let a = -y0 + three * y1 - three * y2 + y3;
        let b = three * y0 - six * y1 + three * y2;
        let c = -three * y0 + three * y1;
        let d = y0;

        let mut cuts: ArrayVec<T, 3> = cubic_roots_eps(a, b, c, d, T::from(ALIGNED_LEADING_EPS).unwrap())
            .into_iter()
            .filter(|&t| t.fuzzy_in_range(T::zero(), T::one()))
            .collect();
        cuts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        cuts
    }

    /// Parameter values where the curve crosses the vertical line at `x`.
    #[inline]
    pub fn vertical_cuts(&self, x: T) -> ArrayVec<T, 3> {
        self.line_cuts(vec2(x, T::zero()), vec2(x, T::one()))
    }

    /// Parameter values where the curve crosses the horizontal line at `y`.
    #[inline]
    pub fn horizontal_cuts(&self, y: T) -> ArrayVec<T, 3> {
        self.line_cuts(vec2(T::zero(), y), vec2(T::one(), y))
    }
}

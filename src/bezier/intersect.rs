//! Curve-curve and self intersection search by subdivision.
//!
//! Both curves are reduced to simple segments, candidate segment pairs are
//! found by querying a spatial index of bounding boxes, and each candidate
//! pair is recursively bisected until its combined bounding box perimeter
//! falls below a threshold, at which point the pair's midpoint parameters are
//! reported.

use super::CubicBezier;
use crate::core::traits::Real;
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder, AABB};

/// Default combined bbox perimeter threshold used to terminate the pairwise
/// bisection.
pub const DEFAULT_INTERSECTION_THRESHOLD: f64 = 0.1;

/// Epsilon for deduplicating intersection parameter pairs.
const PARAM_DEDUP_EPS: f64 = 1e-3;

#[inline]
fn boxes_overlap<T>(a: &AABB<T>, b: &AABB<T>) -> bool
where
    T: Real,
{
    a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_y <= b.max_y && a.max_y >= b.min_y
}

#[inline]
fn perimeter<T>(b: &AABB<T>) -> T
where
    T: Real,
{
    T::two() * ((b.max_x - b.min_x) + (b.max_y - b.min_y))
}

fn build_segment_index<T>(segments: &[CubicBezier<T>]) -> StaticAABB2DIndex<T>
where
    T: Real,
{
    let mut builder = StaticAABB2DIndexBuilder::new(segments.len());
    for seg in segments {
        let b = seg.bbox();
        builder.add(b.min_x, b.min_y, b.max_x, b.max_y);
    }
    builder
        .build()
        .expect("item count matches and coordinates are finite")
}

/// Recursively bisect a candidate segment pair until its combined bounding
/// box perimeter is below `threshold`, then report the midpoint of each
/// side's root parameter range.
fn bisect_pair<T>(
    seg1: &CubicBezier<T>,
    seg2: &CubicBezier<T>,
    threshold: T,
    depth: u32,
    results: &mut Vec<(T, T)>,
) where
    T: Real,
{
    let b1 = seg1.bbox();
    let b2 = seg2.bbox();
    if !boxes_overlap(&b1, &b2) {
        return;
    }

    if perimeter(&b1) + perimeter(&b2) < threshold || depth == 0 {
        let (s1, e1) = seg1.range();
        let (s2, e2) = seg2.range();
        results.push(((s1 + e1) * T::half(), (s2 + e2) * T::half()));
        return;
    }

    let (l1, r1) = seg1.split(T::half());
    let (l2, r2) = seg2.split(T::half());
    bisect_pair(&l1, &l2, threshold, depth - 1, results);
    bisect_pair(&l1, &r2, threshold, depth - 1, results);
    bisect_pair(&r1, &l2, threshold, depth - 1, results);
    bisect_pair(&r1, &r2, threshold, depth - 1, results);
}

fn dedup_params<T>(mut results: Vec<(T, T)>) -> Vec<(T, T)>
where
    T: Real,
{
    let eps = T::from(PARAM_DEDUP_EPS).unwrap();
    let mut unique: Vec<(T, T)> = Vec::with_capacity(results.len());
    results.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    for (t1, t2) in results {
        let duplicate = unique
            .iter()
            .any(|&(u1, u2)| t1.fuzzy_eq_eps(u1, eps) && t2.fuzzy_eq_eps(u2, eps));
        if !duplicate {
            unique.push((t1, t2));
        }
    }
    unique
}

/// True if the two reduced segments share an endpoint (fuzzy position
/// compare); such pairs always "intersect" at the join and are skipped by
/// the self intersection search.
fn share_endpoint<T>(seg1: &CubicBezier<T>, seg2: &CubicBezier<T>) -> bool
where
    T: Real,
{
    let eps = T::from(1e-6).unwrap();
    let ends1 = [seg1.start(), seg1.end()];
    let ends2 = [seg2.start(), seg2.end()];
    ends1
        .iter()
        .any(|p| ends2.iter().any(|q| p.fuzzy_eq_eps(*q, eps)))
}

impl<T> CubicBezier<T>
where
    T: Real,
{
    /// Intersections with `other` as `(t_self, t_other)` parameter pairs,
    /// deduplicated by fuzzy equality on both parameters.
    ///
    /// `threshold` bounds the combined bounding box perimeter (in coordinate
    /// units) below which a candidate pair is accepted; see
    /// [DEFAULT_INTERSECTION_THRESHOLD].
    pub fn intersections_with_threshold(&self, other: &Self, threshold: T) -> Vec<(T, T)> {
        const MAX_BISECT_DEPTH: u32 = 48;

        let segs1 = self.reduce();
        let segs2 = other.reduce();
        let index = build_segment_index(&segs2);

        let mut results = Vec::new();
        for seg1 in &segs1 {
            let b = seg1.bbox();
            for j in index.query(b.min_x, b.min_y, b.max_x, b.max_y) {
                bisect_pair(seg1, &segs2[j], threshold, MAX_BISECT_DEPTH, &mut results);
            }
        }
        dedup_params(results)
    }

    /// Same as [CubicBezier::intersections_with_threshold] using
    /// [DEFAULT_INTERSECTION_THRESHOLD].
    #[inline]
    pub fn intersections(&self, other: &Self) -> Vec<(T, T)> {
        self.intersections_with_threshold(other, T::from(DEFAULT_INTERSECTION_THRESHOLD).unwrap())
    }

    /// Self intersections as `(t1, t2)` parameter pairs: the curve's reduced
    /// segments are tested pairwise, skipping pairs that share an endpoint
    /// (adjacent segments always touch at their join).
    pub fn self_intersections_with_threshold(&self, threshold: T) -> Vec<(T, T)> {
        const MAX_BISECT_DEPTH: u32 = 48;

        let segs = self.reduce();
        let mut results = Vec::new();
        for i in 0..segs.len() {
            for j in (i + 1)..segs.len() {
                if share_endpoint(&segs[i], &segs[j]) {
                    continue;
                }
                bisect_pair(&segs[i], &segs[j], threshold, MAX_BISECT_DEPTH, &mut results);
            }
        }
        dedup_params(results)
    }

    /// Same as [CubicBezier::self_intersections_with_threshold] using
    /// [DEFAULT_INTERSECTION_THRESHOLD].
    #[inline]
    pub fn self_intersections(&self) -> Vec<(T, T)> {
        self.self_intersections_with_threshold(T::from(DEFAULT_INTERSECTION_THRESHOLD).unwrap())
    }
}

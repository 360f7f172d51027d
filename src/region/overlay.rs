//! Region overlay partitioning.
//!
//! [Region::overlay] splits a region's area against a circle into the part
//! outside the circle ("remaining") and the part inside it ("overlap"). The
//! shared machinery splits every boundary arc at its intersections with the
//! overlaying circle, classifies each sub-arc by which side of the circle its
//! midpoint falls on, splits the overlaying circle at the same points and
//! keeps the pieces running through the region's interior (those pieces bound
//! both results), then chains the kept pieces back into closed contours.
//!
//! Coincident circle boundaries are resolved up front by each variant's
//! dispatcher since midpoint side classification is meaningless for them.

use super::{ArcsRegion, CircleRegion, OverlayError, Region, RingRegion};
use crate::arc::Arc;
use crate::core::math::{angle, normalize_radians, point_on_circle, Vector2};
use crate::core::traits::Real;

/// Default position equal epsilon used by [Region::overlay].
pub const OVERLAY_POS_EQUAL_EPS: f64 = 1e-5;

impl<T> Region<T>
where
    T: Real,
{
    /// Partition the region's area against the circle given, returning
    /// `(remaining, overlap)`: the sub-region outside the circle and the
    /// sub-region inside it. The input region is unchanged; the two results
    /// always tile its area exactly.
    ///
    /// Overlaying an arcs region is only supported for a single two-arc
    /// contour (the lens/lune shapes produced by earlier overlays).
    pub fn overlay(
        &self,
        center: Vector2<T>,
        radius: T,
    ) -> Result<(Region<T>, Region<T>), OverlayError> {
        self.overlay_eps(center, radius, T::from(OVERLAY_POS_EQUAL_EPS).unwrap())
    }

    /// Same as [Region::overlay] with `pos_equal_eps` controlling both the
    /// intersection classification and the fuzzy endpoint joining.
    pub fn overlay_eps(
        &self,
        center: Vector2<T>,
        radius: T,
        pos_equal_eps: T,
    ) -> Result<(Region<T>, Region<T>), OverlayError> {
        match self {
            Region::Empty => Ok((Region::Empty, Region::Empty)),
            Region::Circle(c) => circle_overlay(c, center, radius, pos_equal_eps),
            Region::Ring(r) => ring_overlay(r, center, radius, pos_equal_eps),
            Region::Arcs(a) => arcs_overlay(a, center, radius, pos_equal_eps),
        }
    }
}

fn coincident_circles<T>(
    center1: Vector2<T>,
    radius1: T,
    center2: Vector2<T>,
    radius2: T,
    pos_equal_eps: T,
) -> bool
where
    T: Real,
{
    center1.fuzzy_eq_eps(center2, pos_equal_eps) && radius1.fuzzy_eq_eps(radius2, pos_equal_eps)
}

fn circle_overlay<T>(
    region: &CircleRegion<T>,
    center: Vector2<T>,
    radius: T,
    pos_equal_eps: T,
) -> Result<(Region<T>, Region<T>), OverlayError>
where
    T: Real,
{
    if coincident_circles(region.center(), region.radius(), center, radius, pos_equal_eps) {
        return Ok((Region::Empty, Region::Circle(*region)));
    }

    let boundary = [Arc::full_circle(region.center(), region.radius())];
    let contours: [&[Arc<T>]; 1] = [&boundary];
    let rc = *region;
    let (remaining, overlap) = overlay_boundary(
        &contours,
        |p| rc.contains_point(p),
        center,
        radius,
        pos_equal_eps,
    )?;
    Ok((region_from_contours(remaining), region_from_contours(overlap)))
}

fn ring_overlay<T>(
    region: &RingRegion<T>,
    center: Vector2<T>,
    radius: T,
    pos_equal_eps: T,
) -> Result<(Region<T>, Region<T>), OverlayError>
where
    T: Real,
{
    let outer = region.outer();
    let hole = region.hole();
    if coincident_circles(outer.center(), outer.radius(), center, radius, pos_equal_eps) {
        return Ok((Region::Empty, Region::Ring(*region)));
    }
    if coincident_circles(hole.center(), hole.radius(), center, radius, pos_equal_eps) {
        return Ok((Region::Ring(*region), Region::Empty));
    }

    let outer_arc = [Arc::full_circle(outer.center(), outer.radius())];
    let hole_arc = [Arc::full_circle(hole.center(), hole.radius())];
    let contours: [&[Arc<T>]; 2] = [&outer_arc, &hole_arc];
    let r = *region;
    let (remaining, overlap) = overlay_boundary(
        &contours,
        |p| r.contains_point(p),
        center,
        radius,
        pos_equal_eps,
    )?;
    Ok((region_from_contours(remaining), region_from_contours(overlap)))
}

fn arcs_overlay<T>(
    region: &ArcsRegion<T>,
    center: Vector2<T>,
    radius: T,
    pos_equal_eps: T,
) -> Result<(Region<T>, Region<T>), OverlayError>
where
    T: Real,
{
    let supported = region.contours().len() == 1 && region.contours()[0].len() == 2;
    if !supported {
        return Err(OverlayError::UnsupportedArcsRegion {
            arcs: region.arc_count(),
        });
    }

    let arcs = &region.contours()[0];
    for (i, arc) in arcs.iter().enumerate() {
        if coincident_circles(arc.center(), arc.radius(), center, radius, pos_equal_eps) {
            // the whole region lies on one side of a coincident boundary
            // circle, decided by where the opposite arc runs
            let other_mid = arcs[1 - i].mid_point();
            return if other_mid.distance_to(center) < radius {
                Ok((Region::Empty, Region::Arcs(region.clone())))
            } else {
                Ok((Region::Arcs(region.clone()), Region::Empty))
            };
        }
    }

    let contours: [&[Arc<T>]; 1] = [arcs.as_slice()];
    let (remaining, overlap) = overlay_boundary(
        &contours,
        |p| region.contains_point(p),
        center,
        radius,
        pos_equal_eps,
    )?;
    Ok((region_from_contours(remaining), region_from_contours(overlap)))
}

/// Split `boundary_contours` (closed contours of the region being overlaid)
/// against the circle given and return `(remaining, overlap)` contour sets.
///
/// `region_contains` must answer interior containment for the region the
/// boundary belongs to; it is probed with midpoints of the overlaying
/// circle's pieces, which never lie on the boundary for non-coincident
/// circles.
fn overlay_boundary<T, F>(
    boundary_contours: &[&[Arc<T>]],
    region_contains: F,
    center: Vector2<T>,
    radius: T,
    pos_equal_eps: T,
) -> Result<(Vec<Vec<Arc<T>>>, Vec<Vec<Arc<T>>>), OverlayError>
where
    T: Real,
    F: Fn(Vector2<T>) -> bool,
{
    // collect intersection points per boundary arc first; a single point in
    // total is a tangent graze and is discarded (tangency does not change
    // which side any area is on)
    let mut contour_points: Vec<Vec<Vec<Vector2<T>>>> = Vec::with_capacity(boundary_contours.len());
    let mut total_points = 0usize;
    for contour in boundary_contours {
        let per_arc: Vec<Vec<Vector2<T>>> = contour
            .iter()
            .map(|arc| arc.intersect_circle_eps(center, radius, pos_equal_eps))
            .collect();
        total_points += per_arc.iter().map(|p| p.len()).sum::<usize>();
        contour_points.push(per_arc);
    }
    if total_points == 1 {
        for per_arc in &mut contour_points {
            for pts in per_arc.iter_mut() {
                pts.clear();
            }
        }
        total_points = 0;
    }

    // a closed contour must be crossed an even number of times
    for per_arc in &contour_points {
        let count: usize = per_arc.iter().map(|p| p.len()).sum();
        if count % 2 != 0 {
            return Err(OverlayError::UnknownScenario);
        }
    }

    let mut remaining_pieces: Vec<Arc<T>> = Vec::new();
    let mut overlap_pieces: Vec<Arc<T>> = Vec::new();
    let mut cut_points: Vec<Vector2<T>> = Vec::new();

    for (contour, per_arc) in boundary_contours.iter().zip(&contour_points) {
        for (arc, pts) in contour.iter().zip(per_arc) {
            let pieces = if pts.is_empty() {
                vec![*arc]
            } else if arc.is_full_circle() {
                // a full circle has no real start point, cut it point to
                // point instead of introducing a seam at its start angle
                split_full_circle(arc, pts)
            } else {
                arc.split_at(pts, pos_equal_eps)
            };
            for piece in pieces {
                if piece.mid_point().distance_to(center) < radius {
                    overlap_pieces.push(piece);
                } else {
                    remaining_pieces.push(piece);
                }
            }
            cut_points.extend_from_slice(pts);
        }
    }

    if total_points == 0 {
        // no boundary crossings: the overlaying circle is entirely inside or
        // entirely outside the region; when inside, its full circle bounds
        // both results (a hole in remaining, the whole of overlap)
        let probe = point_on_circle(radius, center, T::zero());
        if region_contains(probe) {
            let k = Arc::full_circle(center, radius);
            remaining_pieces.push(k);
            overlap_pieces.push(k);
        }
    } else {
        // split the overlaying circle at every cut point and keep the pieces
        // running through the region's interior on both sides
        let angular_eps = pos_equal_eps / num_traits::real::Real::max(radius, T::one());
        let mut angles: Vec<T> = cut_points
            .iter()
            .map(|&p| normalize_radians(angle(center, p)))
            .collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        angles.dedup_by(|a, b| a.fuzzy_eq_eps(*b, angular_eps));
        if angles.len() > 1 {
            let wrapped = *angles.last().unwrap() - T::tau();
            if wrapped.fuzzy_eq_eps(angles[0], angular_eps) {
                angles.pop();
            }
        }

        if angles.len() > 1 {
            let n = angles.len();
            for i in 0..n {
                let piece = Arc::new(center, radius, angles[i], angles[(i + 1) % n], true);
                if region_contains(piece.mid_point()) {
                    remaining_pieces.push(piece);
                    overlap_pieces.push(piece);
                }
            }
        }
    }

    let join_eps = pos_equal_eps * T::from(10.0).unwrap();
    Ok((
        chain_contours(remaining_pieces, join_eps)?,
        chain_contours(overlap_pieces, join_eps)?,
    ))
}

/// Cut a full circle arc into pieces running between consecutive cut
/// points. `points` must hold at least two points on the circle, sorted by
/// position along the arc's sweep (as [Arc::intersect_circle_eps] returns
/// them); the last piece wraps back to the first point.
fn split_full_circle<T>(arc: &Arc<T>, points: &[Vector2<T>]) -> Vec<Arc<T>>
where
    T: Real,
{
    debug_assert!(points.len() >= 2);
    let n = points.len();
    let mut pieces = Vec::with_capacity(n);
    for i in 0..n {
        pieces.push(Arc::from_points(
            arc.center(),
            points[i],
            points[(i + 1) % n],
            arc.radius(),
            arc.is_clockwise(),
        ));
    }
    pieces
}

/// Assemble loose arc pieces into closed contours by greedy endpoint
/// matching, reversing pieces as needed. Full circle pieces form standalone
/// contours. Fails with [OverlayError::UnknownScenario] if a contour cannot
/// be closed, which indicates an intersection configuration the splitter
/// does not handle.
fn chain_contours<T>(
    mut pieces: Vec<Arc<T>>,
    join_eps: T,
) -> Result<Vec<Vec<Arc<T>>>, OverlayError>
where
    T: Real,
{
    let mut contours: Vec<Vec<Arc<T>>> = Vec::new();

    let mut i = 0;
    while i < pieces.len() {
        if pieces[i].is_full_circle() {
            contours.push(vec![pieces.swap_remove(i)]);
        } else {
            i += 1;
        }
    }

    while let Some(first) = pieces.pop() {
        let start = first.start_point();
        let mut contour = vec![first];
        loop {
            let tail = contour.last().unwrap().end_point();
            if tail.fuzzy_eq_eps(start, join_eps) {
                break;
            }
            let next_idx = pieces.iter().position(|a| {
                a.start_point().fuzzy_eq_eps(tail, join_eps)
                    || a.end_point().fuzzy_eq_eps(tail, join_eps)
            });
            match next_idx {
                Some(idx) => {
                    let mut next = pieces.swap_remove(idx);
                    if !next.start_point().fuzzy_eq_eps(tail, join_eps) {
                        next = next.reversed();
                    }
                    contour.push(next);
                }
                None => return Err(OverlayError::UnknownScenario),
            }
        }
        contours.push(contour);
    }

    Ok(contours)
}

/// Wrap chained contours in the simplest region variant: a single full
/// circle becomes a circle region, two full circles with one inside the
/// other become a ring, everything else stays an arcs region.
fn region_from_contours<T>(contours: Vec<Vec<Arc<T>>>) -> Region<T>
where
    T: Real,
{
    fn full_circle_of<T: Real>(contour: &[Arc<T>]) -> Option<CircleRegion<T>> {
        if contour.len() == 1 && contour[0].is_full_circle() {
            Some(CircleRegion::new(contour[0].center(), contour[0].radius()))
        } else {
            None
        }
    }

    if contours.is_empty() {
        return Region::Empty;
    }

    if contours.len() == 1 {
        if let Some(c) = full_circle_of(&contours[0]) {
            return Region::Circle(c);
        }
    }

    if contours.len() == 2 {
        if let (Some(a), Some(b)) = (full_circle_of(&contours[0]), full_circle_of(&contours[1])) {
            let d = a.center().distance_to(b.center());
            if d + b.radius() < a.radius() {
                return Region::Ring(RingRegion::new(a, b));
            }
            if d + a.radius() < b.radius() {
                return Region::Ring(RingRegion::new(b, a));
            }
        }
    }

    Region::Arcs(ArcsRegion::new(contours))
}

//! Three-set Venn diagram layout solving and region construction.
//!
//! [calc_venn] turns seven set cardinalities into circle radii and centers,
//! [fit_into] scales the layout into a target rectangle, and [venn_regions]
//! carves the three circles into the seven named regions by chaining
//! [Region::overlay] calls.

use crate::core::math::Vector2;
use crate::core::traits::Real;
use crate::region::{OverlayError, Region};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bisection iteration bound for [calc_distance].
const DISTANCE_MAX_ITERATIONS: usize = 100;

/// Exclusive cardinalities of the seven subsets of a three-set diagram:
/// `a` is the size of A only (excluding every intersection), `ab` the size of
/// A and B only (excluding `abc`), and so on.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VennAreas<T = f64>
where
    T: Real,
{
    pub a: T,
    pub b: T,
    pub ab: T,
    pub c: T,
    pub ac: T,
    pub bc: T,
    pub abc: T,
}

impl<T> VennAreas<T>
where
    T: Real,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(a: T, b: T, ab: T, c: T, ac: T, bc: T, abc: T) -> Self {
        VennAreas {
            a,
            b,
            ab,
            c,
            ac,
            bc,
            abc,
        }
    }

    /// Total area of each circle: sum of every subset it participates in.
    pub fn circle_areas(&self) -> [T; 3] {
        [
            self.a + self.ab + self.ac + self.abc,
            self.b + self.ab + self.bc + self.abc,
            self.c + self.ac + self.bc + self.abc,
        ]
    }

    /// Target pairwise lens areas `[A∩B, A∩C, B∩C]`.
    pub fn pair_overlaps(&self) -> [T; 3] {
        [
            self.ab + self.abc,
            self.ac + self.abc,
            self.bc + self.abc,
        ]
    }
}

/// The seven regions of a laid-out three-set diagram.
#[derive(Debug, Clone)]
pub struct VennRegions<T = f64>
where
    T: Real,
{
    pub a: Region<T>,
    pub b: Region<T>,
    pub ab: Region<T>,
    pub c: Region<T>,
    pub ac: Region<T>,
    pub bc: Region<T>,
    pub abc: Region<T>,
}

/// Area of the lens shared by two circles of radius `r1` and `r2` with
/// centers `d` apart, via the circular segment formula on both sides of the
/// chord through the intersection points.
pub fn lens_area<T>(r1: T, r2: T, d: T) -> T
where
    T: Real,
{
    if d >= r1 + r2 {
        return T::zero();
    }
    let r_min = num_traits::real::Real::min(r1, r2);
    if d <= (r1 - r2).abs() {
        return T::pi() * r_min * r_min;
    }

    let d2 = d * d;
    let theta1 = T::two() * ((d2 + r1 * r1 - r2 * r2) / (T::two() * d * r1)).acos();
    let theta2 = T::two() * ((d2 + r2 * r2 - r1 * r1) / (T::two() * d * r2)).acos();
    let seg1 = r1 * r1 * (theta1 - theta1.sin()) * T::half();
    let seg2 = r2 * r2 * (theta2 - theta2.sin()) * T::half();
    seg1 + seg2
}

/// Center distance at which two circles of radius `r1` and `r2` share a lens
/// of area `overlap`, found by bisection (the lens area is strictly
/// decreasing in the distance).
///
/// A zero or negative overlap returns a disjoint placement with a fixed
/// visual gap of a tenth of the larger radius; an overlap at or beyond full
/// containment of the smaller circle returns `|r1 - r2|`.
pub fn calc_distance<T>(r1: T, r2: T, overlap: T) -> T
where
    T: Real,
{
    if overlap <= T::zero() || overlap.fuzzy_eq_zero() {
        return r1 + r2 + T::from(0.1).unwrap() * num_traits::real::Real::max(r1, r2);
    }

    let r_min = num_traits::real::Real::min(r1, r2);
    let containment = T::pi() * r_min * r_min;
    if overlap >= containment {
        return (r1 - r2).abs();
    }

    let mut lo = (r1 - r2).abs();
    let mut hi = r1 + r2;
    let tolerance = overlap * T::from(1e-3).unwrap();
    let mut mid = (lo + hi) * T::half();
    for _ in 0..DISTANCE_MAX_ITERATIONS {
        mid = (lo + hi) * T::half();
        let area = lens_area(r1, r2, mid);
        if (area - overlap).abs() < tolerance {
            break;
        }
        if area > overlap {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    mid
}

/// Place three circles from their radii and pairwise center distances
/// `[d_ab, d_ac, d_bc]`: A at the origin, B on the positive x axis, C by
/// trilateration above the axis. The triangle is then recentered so the
/// circles' bounding box is centered on the origin.
pub fn calc_triangle<T>(radii: [T; 3], distances: [T; 3]) -> [Vector2<T>; 3]
where
    T: Real,
{
    let [d_ab, d_ac, d_bc] = distances;

    let a = Vector2::zero();
    let b = Vector2::new(d_ab, T::zero());
    let c = if d_ab.fuzzy_eq_zero() {
        Vector2::new(T::zero(), d_ac)
    } else {
        let x = (d_ab * d_ab + d_ac * d_ac - d_bc * d_bc) / (T::two() * d_ab);
        let y = num_traits::real::Real::max(d_ac * d_ac - x * x, T::zero()).sqrt();
        Vector2::new(x, y)
    };

    let mut centers = [a, b, c];
    let (min, max) = circles_bbox(&radii, &centers);
    let shift = (min + max).scale(T::half());
    for center in &mut centers {
        *center = *center - shift;
    }
    centers
}

/// Full three-circle layout from set cardinalities.
///
/// With `proportional` set, each radius is derived from the circle's total
/// area and pairwise distances are solved by [calc_distance] against the
/// target lens areas. Otherwise all three radii are equal (from the mean
/// circle area) and the distance between every pair equals the radius, the
/// classic symmetric layout.
pub fn calc_venn<T>(areas: &VennAreas<T>, proportional: bool) -> ([T; 3], [Vector2<T>; 3])
where
    T: Real,
{
    let circle_areas = areas.circle_areas();
    let (radii, distances) = if proportional {
        let radii = circle_areas.map(|a| (a / T::pi()).sqrt());
        let overlaps = areas.pair_overlaps();
        let distances = [
            calc_distance(radii[0], radii[1], overlaps[0]),
            calc_distance(radii[0], radii[2], overlaps[1]),
            calc_distance(radii[1], radii[2], overlaps[2]),
        ];
        (radii, distances)
    } else {
        let mean = (circle_areas[0] + circle_areas[1] + circle_areas[2]) / T::three();
        let r = (mean / T::pi()).sqrt();
        ([r; 3], [r; 3])
    };

    let centers = calc_triangle(radii, distances);
    (radii, centers)
}

fn circles_bbox<T>(radii: &[T; 3], centers: &[Vector2<T>; 3]) -> (Vector2<T>, Vector2<T>)
where
    T: Real,
{
    let mut min: Vector2<T> = Vector2::new(Real::max_value(), Real::max_value());
    let mut max: Vector2<T> = Vector2::new(Real::min_value(), Real::min_value());
    for (center, &r) in centers.iter().zip(radii) {
        min.x = num_traits::real::Real::min(min.x, center.x - r);
        min.y = num_traits::real::Real::min(min.y, center.y - r);
        max.x = num_traits::real::Real::max(max.x, center.x + r);
        max.y = num_traits::real::Real::max(max.y, center.y + r);
    }
    (min, max)
}

/// Uniformly scale and translate a layout so the circles' bounding box is
/// centered in the rectangle at `(x, y)` with the size given. A single scale
/// factor is applied to every radius and coordinate, so all distance/radius
/// ratios (and therefore all overlap proportions) are preserved.
pub fn fit_into<T>(
    radii: &[T; 3],
    centers: &[Vector2<T>; 3],
    x: T,
    y: T,
    width: T,
    height: T,
) -> ([T; 3], [Vector2<T>; 3])
where
    T: Real,
{
    let (min, max) = circles_bbox(radii, centers);
    let bbox_width = max.x - min.x;
    let bbox_height = max.y - min.y;
    let scale = num_traits::real::Real::min(width / bbox_width, height / bbox_height);

    let scaled_radii = radii.map(|r| r * scale);
    let bbox_center = (min + max).scale(T::half() * scale);
    let target = Vector2::new(x + width * T::half(), y + height * T::half());
    let scaled_centers = centers.map(|c| c.scale(scale) + target - bbox_center);
    (scaled_radii, scaled_centers)
}

/// Carve three placed circles into the seven named diagram regions.
///
/// Every region comes from overlay chains: A is split by B into the A-only
/// side and the A∩B lens, each of which is split again by C, and
/// symmetrically for the other circles. The pieces tile the union of the
/// three circles exactly.
pub fn venn_regions<T>(
    radii: [T; 3],
    centers: [Vector2<T>; 3],
) -> Result<VennRegions<T>, OverlayError>
where
    T: Real,
{
    let [ra, rb, rc] = radii;
    let [ca, cb, cc] = centers;

    let circle_a = Region::circle(ca, ra);
    let circle_b = Region::circle(cb, rb);
    let circle_c = Region::circle(cc, rc);

    let (a_not_b, a_and_b) = circle_a.overlay(cb, rb)?;
    let (b_not_a, _) = circle_b.overlay(ca, ra)?;

    let (a, ac) = a_not_b.overlay(cc, rc)?;
    let (ab, abc) = a_and_b.overlay(cc, rc)?;
    let (b, bc) = b_not_a.overlay(cc, rc)?;

    let (c_not_a, _) = circle_c.overlay(ca, ra)?;
    let (c, _) = c_not_a.overlay(cb, rb)?;

    Ok(VennRegions {
        a,
        b,
        ab,
        c,
        ac,
        bc,
        abc,
    })
}

/// Convenience composition of [calc_venn], [fit_into], and [venn_regions]:
/// solve the layout for `areas`, fit it into the rectangle at `(x, y)` with
/// the size given, and build the seven regions.
pub fn calc_venn_regions<T>(
    areas: &VennAreas<T>,
    proportional: bool,
    x: T,
    y: T,
    width: T,
    height: T,
) -> Result<VennRegions<T>, OverlayError>
where
    T: Real,
{
    let (radii, centers) = calc_venn(areas, proportional);
    let (radii, centers) = fit_into(&radii, &centers, x, y, width, height);
    venn_regions(radii, centers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;
    use std::f64::consts::PI;

    #[test]
    fn lens_area_degenerate_cases() {
        assert_eq!(lens_area(2.0, 3.0, 5.0), 0.0);
        assert_eq!(lens_area(2.0, 3.0, 6.0), 0.0);
        assert!(lens_area(2.0, 3.0, 1.0).fuzzy_eq(PI * 4.0));
        assert!(lens_area(2.0, 3.0, 0.5).fuzzy_eq(PI * 4.0));
    }

    #[test]
    fn zero_overlap_gives_disjoint_spacing() {
        let d = calc_distance(5.0, 3.0, 0.0);
        assert!(d.fuzzy_eq(5.0 + 3.0 + 0.5));
    }

    #[test]
    fn full_containment_overlap_gives_touching_centers() {
        let d = calc_distance(5.0, 3.0, PI * 9.0);
        assert!(d.fuzzy_eq(2.0));
    }

    #[test]
    fn triangle_honors_distances() {
        let radii = [2.0, 2.0, 2.0];
        let [a, b, c] = calc_triangle(radii, [3.0, 3.0, 3.0]);
        assert!(a.distance_to(b).fuzzy_eq_eps(3.0, 1e-12));
        assert!(a.distance_to(c).fuzzy_eq_eps(3.0, 1e-12));
        assert!(b.distance_to(c).fuzzy_eq_eps(3.0, 1e-12));
    }
}

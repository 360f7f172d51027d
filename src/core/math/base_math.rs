use super::Vector2;
use crate::core::traits::Real;
use arrayvec::ArrayVec;

/// Normalize radians to be in `[0, 2PI)`, e.g. `-PI/4` becomes `7PI/4`, `5PI`
/// becomes `PI`, and `2PI` becomes `0`.
///
/// # Examples
///
/// ```
/// # use plot_geom::core::math::*;
/// # use plot_geom::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(normalize_radians(5.0 * PI).fuzzy_eq(PI));
/// assert!(normalize_radians(-PI / 4.0).fuzzy_eq(7.0 * PI / 4.0));
/// assert!(normalize_radians(2.0 * PI).fuzzy_eq(0.0));
/// ```
#[inline]
pub fn normalize_radians<T>(angle: T) -> T
where
    T: Real,
{
    if angle >= T::zero() && angle < T::tau() {
        return angle;
    }

    let r = angle - (angle / T::tau()).floor() * T::tau();
    if r >= T::tau() {
        r - T::tau()
    } else {
        r
    }
}

/// Angle of the direction vector described by `p0` to `p1` (inclination).
#[inline]
pub fn angle<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    T::atan2(p1.y - p0.y, p1.x - p0.x)
}

/// Returns the point on the circle with `radius`, `center`, and polar `angle` in radians given.
#[inline]
pub fn point_on_circle<T>(radius: T, center: Vector2<T>, angle: T) -> Vector2<T>
where
    T: Real,
{
    let (s, c) = angle.sin_cos();
    Vector2::new(center.x + radius * c, center.y + radius * s)
}

/// Real roots of the quadratic `a*t^2 + b*t + c = 0`.
///
/// A near-zero leading coefficient (within `leading_eps`) degenerates to the
/// linear case; a near-zero discriminant yields a single (double) root.
pub fn quad_roots_eps<T>(a: T, b: T, c: T, leading_eps: T) -> ArrayVec<T, 2>
where
    T: Real,
{
    let mut roots = ArrayVec::new();
    if a.fuzzy_eq_zero_eps(leading_eps) {
        // degenerate linear case
        if !b.fuzzy_eq_zero() {
            roots.push(-c / b);
        }
        return roots;
    }

    let discriminant = b * b - T::four() * a * c;
    if discriminant.fuzzy_eq_zero() {
        roots.push(-b / (T::two() * a));
        return roots;
    }

    if discriminant < T::zero() {
        return roots;
    }

    // form avoiding subtractive cancellation between -b and the sqrt term
    let sqrt_d = discriminant.sqrt();
    let denom = T::two() * a;
    let sol1 = if b < T::zero() {
        (-b + sqrt_d) / denom
    } else {
        (-b - sqrt_d) / denom
    };
    roots.push(sol1);
    roots.push((c / a) / sol1);
    roots
}

/// Same as [quad_roots_eps] using the default fuzzy epsilon for the leading
/// coefficient check.
#[inline]
pub fn quad_roots<T>(a: T, b: T, c: T) -> ArrayVec<T, 2>
where
    T: Real,
{
    quad_roots_eps(a, b, c, T::fuzzy_epsilon())
}

/// Real roots of the cubic `a*t^3 + b*t^2 + c*t + d = 0` via Cardano's method
/// (trigonometric branch for the three-real-root case).
///
/// A near-zero leading coefficient (within `leading_eps`) degenerates to
/// [quad_roots_eps].
pub fn cubic_roots_eps<T>(a: T, b: T, c: T, d: T, leading_eps: T) -> ArrayVec<T, 3>
where
    T: Real,
{
    let mut roots = ArrayVec::new();
    if a.fuzzy_eq_zero_eps(leading_eps) {
        roots.extend(quad_roots_eps(b, c, d, leading_eps));
        return roots;
    }

    // depressed cubic t^3 + p*t + q = 0 with t = x + b/(3a)
    let bn = b / a;
    let cn = c / a;
    let dn = d / a;
    let three = T::three();
    let nine = three * three;
    let twenty_seven = nine * three;
    let p = cn - bn * bn / three;
    let q = T::two() * bn * bn * bn / twenty_seven - bn * cn / three + dn;
    let offset = bn / three;

    let discriminant = q * q / T::four() + p * p * p / twenty_seven;

    if discriminant.fuzzy_eq_zero() {
        if q.fuzzy_eq_zero() {
            // triple root
            roots.push(-offset);
        } else {
            let u = (-q * T::half()).cbrt();
            roots.push(T::two() * u - offset);
            roots.push(-u - offset);
        }
        return roots;
    }

    if discriminant > T::zero() {
        // one real root
        let sd = discriminant.sqrt();
        let u = (-q * T::half() + sd).cbrt();
        let v = (-q * T::half() - sd).cbrt();
        roots.push(u + v - offset);
        return roots;
    }

    // three distinct real roots
    let r = (-p / three).sqrt();
    let cos_phi = num_traits::clamp(-q / (T::two() * r * r * r), -T::one(), T::one());
    let phi = cos_phi.acos();
    let m = T::two() * r;
    roots.push(m * (phi / three).cos() - offset);
    roots.push(m * ((phi + T::tau()) / three).cos() - offset);
    roots.push(m * ((phi + T::two() * T::tau()) / three).cos() - offset);
    roots
}

/// Same as [cubic_roots_eps] using the default fuzzy epsilon for the leading
/// coefficient check.
#[inline]
pub fn cubic_roots<T>(a: T, b: T, c: T, d: T) -> ArrayVec<T, 3>
where
    T: Real,
{
    cubic_roots_eps(a, b, c, d, T::fuzzy_epsilon())
}

/// 24-point Gauss-Legendre quadrature rule as (weight, abscissa) pairs over
/// the interval `[-1, 1]`.
pub const GAUSS_LEGENDRE_24: [(f64, f64); 24] = [
    (0.1279381953467522, -0.0640568928626056),
    (0.1279381953467522, 0.0640568928626056),
    (0.1258374563468283, -0.1911188674736163),
    (0.1258374563468283, 0.1911188674736163),
    (0.1216704729278034, -0.3150426796961634),
    (0.1216704729278034, 0.3150426796961634),
    (0.1155056680537256, -0.4337935076260451),
    (0.1155056680537256, 0.4337935076260451),
    (0.1074442701159656, -0.5454214713888396),
    (0.1074442701159656, 0.5454214713888396),
    (0.0976186521041139, -0.6480936519369755),
    (0.0976186521041139, 0.6480936519369755),
    (0.0861901615319533, -0.7401241915785544),
    (0.0861901615319533, 0.7401241915785544),
    (0.0733464814110803, -0.8200019859739029),
    (0.0733464814110803, 0.8200019859739029),
    (0.0592985849154368, -0.8864155270044011),
    (0.0592985849154368, 0.8864155270044011),
    (0.0442774388174198, -0.9382745520027328),
    (0.0442774388174198, 0.9382745520027328),
    (0.0285313886289337, -0.9747285559713095),
    (0.0285313886289337, 0.9747285559713095),
    (0.0123412297999872, -0.9951872199970213),
    (0.0123412297999872, 0.9951872199970213),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    #[test]
    fn quad_roots_two_solutions() {
        // (t - 2)(t + 3) = t^2 + t - 6
        let mut roots: Vec<f64> = quad_roots(1.0, 1.0, -6.0).into_iter().collect();
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(roots.len(), 2);
        assert!(roots[0].fuzzy_eq(-3.0));
        assert!(roots[1].fuzzy_eq(2.0));
    }

    #[test]
    fn quad_roots_degenerate_linear() {
        let roots = quad_roots(0.0, 2.0, -1.0);
        assert_eq!(roots.len(), 1);
        assert!(roots[0].fuzzy_eq(0.5));
    }

    #[test]
    fn quad_roots_no_solution() {
        assert!(quad_roots(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn cubic_roots_three_solutions() {
        // (t - 1)(t - 2)(t - 3) = t^3 - 6t^2 + 11t - 6
        let mut roots: Vec<f64> = cubic_roots(1.0, -6.0, 11.0, -6.0).into_iter().collect();
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(roots.len(), 3);
        assert!(roots[0].fuzzy_eq_eps(1.0, 1e-9));
        assert!(roots[1].fuzzy_eq_eps(2.0, 1e-9));
        assert!(roots[2].fuzzy_eq_eps(3.0, 1e-9));
    }

    #[test]
    fn cubic_roots_single_solution() {
        // t^3 + t + 1 has one real root near -0.6823278
        let roots = cubic_roots(1.0, 0.0, 1.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert!(roots[0].fuzzy_eq_eps(-0.6823278038280193, 1e-9));
    }

    #[test]
    fn normalize_radians_range() {
        use std::f64::consts::PI;
        assert!(normalize_radians(2.0 * PI).fuzzy_eq(0.0));
        assert!(normalize_radians(-PI).fuzzy_eq(PI));
        assert!(normalize_radians(0.0).fuzzy_eq(0.0));
    }
}

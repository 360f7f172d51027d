use plot_geom::{
    calc_distance, calc_venn, calc_venn_regions, fit_into, lens_area, vec2, venn_regions,
    FuzzyEq, Region, VennAreas,
};
use std::f64::consts::PI;

fn example_areas() -> VennAreas {
    VennAreas::new(10.0, 8.0, 22.0, 6.0, 9.0, 4.0, 2.0)
}

#[test]
fn proportional_radii_come_from_circle_totals() {
    let (radii, _) = calc_venn(&example_areas(), true);
    // circle totals: A = 10+22+9+2, B = 8+22+4+2, C = 6+9+4+2
    assert!(radii[0].fuzzy_eq_eps((43.0 / PI).sqrt(), 1e-9));
    assert!(radii[1].fuzzy_eq_eps((36.0 / PI).sqrt(), 1e-9));
    assert!(radii[2].fuzzy_eq_eps((21.0 / PI).sqrt(), 1e-9));
}

#[test]
fn proportional_distances_solve_the_target_overlaps() {
    let areas = example_areas();
    let (radii, centers) = calc_venn(&areas, true);
    let overlaps = [
        areas.ab + areas.abc,
        areas.ac + areas.abc,
        areas.bc + areas.abc,
    ];
    let pairs = [(0, 1, 0), (0, 2, 1), (1, 2, 2)];
    for (i, j, k) in pairs {
        let d = centers[i].distance_to(centers[j]);
        let achieved = lens_area(radii[i], radii[j], d);
        let relative_error = (achieved - overlaps[k]).abs() / overlaps[k];
        assert!(
            relative_error < 1e-2,
            "pair ({}, {}) lens {} vs {}",
            i,
            j,
            achieved,
            overlaps[k]
        );
    }
}

#[test]
fn non_proportional_layout_is_symmetric() {
    let (radii, centers) = calc_venn(&example_areas(), false);
    let r = radii[0];
    assert!(radii[1].fuzzy_eq(r));
    assert!(radii[2].fuzzy_eq(r));
    assert!(centers[0].distance_to(centers[1]).fuzzy_eq_eps(r, 1e-9));
    assert!(centers[0].distance_to(centers[2]).fuzzy_eq_eps(r, 1e-9));
    assert!(centers[1].distance_to(centers[2]).fuzzy_eq_eps(r, 1e-9));
}

#[test]
fn distance_bisection_hits_requested_lens_area() {
    let d: f64 = calc_distance(5.0, 5.0, 10.0);
    let achieved = lens_area(5.0, 5.0, d);
    assert!((achieved - 10.0).abs() / 10.0 < 1e-2);
}

#[test]
fn overlay_lens_area_matches_closed_form() {
    // place two circles at the distance solved for a 10.0 lens, overlay
    // them, and grid-sample the resulting lens region's area
    let (r1, r2) = (5.0, 4.0);
    let d: f64 = calc_distance(r1, r2, 10.0);
    let circle = Region::circle(vec2(0.0, 0.0), r1);
    let (_, lens) = circle.overlay(vec2(d, 0.0), r2).unwrap();

    let steps = 800;
    let (x0, y0, span) = (-r1, -r1, d + r1 + r2);
    let cell = span / steps as f64;
    let mut hits = 0usize;
    for i in 0..steps {
        for j in 0..steps {
            let p = vec2(
                x0 + (i as f64 + 0.5) * cell,
                y0 + (j as f64 + 0.5) * cell,
            );
            if lens.contains_point(p) {
                hits += 1;
            }
        }
    }
    let sampled = hits as f64 * cell * cell;
    let expected = lens_area(r1, r2, d);
    assert!((expected - 10.0).abs() / 10.0 < 1e-2);
    assert!(
        (sampled - expected).abs() / expected < 2e-2,
        "sampled {} vs closed form {}",
        sampled,
        expected
    );
}

#[test]
fn fit_into_preserves_ratios_and_fits() {
    let (radii, centers) = calc_venn(&example_areas(), true);
    let (x, y, width, height) = (50.0, 100.0, 400.0, 300.0);
    let (fit_radii, fit_centers) = fit_into(&radii, &centers, x, y, width, height);

    // a single uniform scale keeps every distance/radius ratio
    let scale = fit_radii[0] / radii[0];
    for i in 0..3 {
        assert!((fit_radii[i] / radii[i]).fuzzy_eq_eps(scale, 1e-9));
        for j in (i + 1)..3 {
            let before = centers[i].distance_to(centers[j]);
            let after = fit_centers[i].distance_to(fit_centers[j]);
            assert!(after.fuzzy_eq_eps(before * scale, 1e-9));
        }
    }

    // every circle inside the requested rectangle
    for (c, &r) in fit_centers.iter().zip(&fit_radii) {
        assert!(c.x - r >= x - 1e-9);
        assert!(c.y - r >= y - 1e-9);
        assert!(c.x + r <= x + width + 1e-9);
        assert!(c.y + r <= y + height + 1e-9);
    }
}

#[test]
fn seven_regions_partition_the_circle_union() {
    let areas = example_areas();
    let (radii, centers) = calc_venn(&areas, true);
    let (radii, centers) = fit_into(&radii, &centers, 0.0, 0.0, 400.0, 400.0);
    let regions = venn_regions(radii, centers).unwrap();

    let named = [
        &regions.a,
        &regions.b,
        &regions.ab,
        &regions.c,
        &regions.ac,
        &regions.bc,
        &regions.abc,
    ];

    let steps = 80;
    let boundary_eps = 0.5;
    let mut checked = 0;
    for i in 0..=steps {
        for j in 0..=steps {
            let p = vec2(
                400.0 * i as f64 / steps as f64,
                400.0 * j as f64 / steps as f64,
            );
            let near_boundary = centers
                .iter()
                .zip(&radii)
                .any(|(&c, &r)| (p.distance_to(c) - r).abs() < boundary_eps);
            if near_boundary {
                continue;
            }

            let inside_union = centers
                .iter()
                .zip(&radii)
                .any(|(&c, &r)| p.distance_to(c) < r);
            let holders = named.iter().filter(|r| r.contains_point(p)).count();
            let expected = usize::from(inside_union);
            assert_eq!(
                holders, expected,
                "point {:?} held by {} regions",
                p, holders
            );
            checked += 1;
        }
    }
    assert!(checked > 1000);
}

#[test]
fn region_membership_matches_circle_membership() {
    let areas = example_areas();
    let (radii, centers) = calc_venn(&areas, true);
    let (radii, centers) = fit_into(&radii, &centers, 0.0, 0.0, 400.0, 400.0);
    let regions = venn_regions(radii, centers).unwrap();

    // which circles a point is in determines which named region holds it
    let expected_region = |in_a: bool, in_b: bool, in_c: bool| -> Option<&Region> {
        match (in_a, in_b, in_c) {
            (true, false, false) => Some(&regions.a),
            (false, true, false) => Some(&regions.b),
            (true, true, false) => Some(&regions.ab),
            (false, false, true) => Some(&regions.c),
            (true, false, true) => Some(&regions.ac),
            (false, true, true) => Some(&regions.bc),
            (true, true, true) => Some(&regions.abc),
            (false, false, false) => None,
        }
    };

    let steps = 60;
    let boundary_eps = 0.5;
    for i in 0..=steps {
        for j in 0..=steps {
            let p = vec2(
                400.0 * i as f64 / steps as f64,
                400.0 * j as f64 / steps as f64,
            );
            let near_boundary = centers
                .iter()
                .zip(&radii)
                .any(|(&c, &r)| (p.distance_to(c) - r).abs() < boundary_eps);
            if near_boundary {
                continue;
            }

            let in_a = p.distance_to(centers[0]) < radii[0];
            let in_b = p.distance_to(centers[1]) < radii[1];
            let in_c = p.distance_to(centers[2]) < radii[2];
            if let Some(region) = expected_region(in_a, in_b, in_c) {
                assert!(region.contains_point(p), "point {:?} missing", p);
            }
        }
    }
}

#[test]
fn calc_venn_regions_composes_the_pipeline() {
    let regions = calc_venn_regions(&example_areas(), true, 0.0, 0.0, 500.0, 500.0).unwrap();
    for region in [
        &regions.a,
        &regions.b,
        &regions.ab,
        &regions.c,
        &regions.ac,
        &regions.bc,
        &regions.abc,
    ] {
        assert!(!region.is_empty());
        let label = region.label().expect("every diagram region has a label");
        assert!(region.contains_point(label));
    }
}

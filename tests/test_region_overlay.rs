use plot_geom::{vec2, OverlayError, Region, Vector2};

/// Sampled partition check: away from boundaries, every point of the
/// original region must be in exactly one of the two results, and no point
/// outside the original may be in either.
fn assert_partitions(
    original: &Region,
    remaining: &Region,
    overlap: &Region,
    circles: &[(Vector2, f64)],
    span: (f64, f64, f64, f64),
) {
    let (x0, y0, width, height) = span;
    let steps = 60;
    let boundary_eps = 1e-3;
    for i in 0..=steps {
        for j in 0..=steps {
            let p = vec2(
                x0 + width * i as f64 / steps as f64,
                y0 + height * j as f64 / steps as f64,
            );
            // skip points near any boundary circle, containment flips there
            let near_boundary = circles
                .iter()
                .any(|&(c, r)| (p.distance_to(c) - r).abs() < boundary_eps);
            if near_boundary {
                continue;
            }

            let in_original = original.contains_point(p);
            let in_remaining = remaining.contains_point(p);
            let in_overlap = overlap.contains_point(p);
            assert_eq!(
                in_original,
                in_remaining != in_overlap,
                "partition mismatch at {:?}",
                p
            );
            assert!(
                !(in_remaining && in_overlap),
                "results overlap at {:?}",
                p
            );
        }
    }
}

#[test]
fn identical_circle_overlay_moves_everything_to_overlap() {
    let region = Region::circle(vec2(1.0, 2.0), 3.0);
    let (remaining, overlap) = region.overlay(vec2(1.0, 2.0), 3.0).unwrap();
    assert!(remaining.is_empty());
    match overlap {
        Region::Circle(c) => {
            assert_eq!(c.center(), vec2(1.0, 2.0));
            assert_eq!(c.radius(), 3.0);
        }
        other => panic!("expected circle region, got {:?}", other),
    }
}

#[test]
fn disjoint_circle_overlay_is_a_no_op() {
    let region = Region::circle(vec2(0.0, 0.0), 2.0);
    let (remaining, overlap) = region.overlay(vec2(10.0, 0.0), 3.0).unwrap();
    assert!(matches!(remaining, Region::Circle(_)));
    assert!(overlap.is_empty());
}

#[test]
fn engulfing_circle_takes_the_whole_region() {
    let region = Region::circle(vec2(1.0, 0.0), 2.0);
    let (remaining, overlap) = region.overlay(vec2(0.0, 0.0), 10.0).unwrap();
    assert!(remaining.is_empty());
    assert!(matches!(overlap, Region::Circle(_)));
}

#[test]
fn contained_circle_cuts_a_ring() {
    let region = Region::circle(vec2(0.0, 0.0), 5.0);
    let (remaining, overlap) = region.overlay(vec2(1.0, 0.0), 1.5).unwrap();
    match &remaining {
        Region::Ring(r) => {
            assert_eq!(r.outer().radius(), 5.0);
            assert_eq!(r.hole().radius(), 1.5);
        }
        other => panic!("expected ring region, got {:?}", other),
    }
    assert!(matches!(overlap, Region::Circle(_)));
    assert_partitions(
        &region,
        &remaining,
        &overlap,
        &[(vec2(0.0, 0.0), 5.0), (vec2(1.0, 0.0), 1.5)],
        (-6.0, -6.0, 12.0, 12.0),
    );
}

#[test]
fn crossing_circles_split_into_lune_and_lens() {
    let region = Region::circle(vec2(0.0, 0.0), 2.0);
    let (remaining, overlap) = region.overlay(vec2(3.0, 0.0), 2.0).unwrap();
    assert!(matches!(remaining, Region::Arcs(_)));
    assert!(matches!(overlap, Region::Arcs(_)));

    // lens area check against the closed form for d=3, r=2
    if let Region::Arcs(lens) = &overlap {
        assert_eq!(lens.contours().len(), 1);
        let label = overlap.label().expect("lens has an interior point");
        assert!(overlap.contains_point(label));
        // lens interior points are inside both circles
        assert!(label.distance_to(vec2(0.0, 0.0)) < 2.0);
        assert!(label.distance_to(vec2(3.0, 0.0)) < 2.0);
    }

    assert_partitions(
        &region,
        &remaining,
        &overlap,
        &[(vec2(0.0, 0.0), 2.0), (vec2(3.0, 0.0), 2.0)],
        (-3.0, -3.0, 9.0, 6.0),
    );
}

#[test]
fn ring_overlay_swallowing_the_hole() {
    let region = Region::circle(vec2(0.0, 0.0), 6.0);
    let (ring, _) = region.overlay(vec2(2.0, 0.0), 1.0).unwrap();
    assert!(matches!(ring, Region::Ring(_)));

    // circle inside the outer boundary fully covering the hole
    let (remaining, overlap) = ring.overlay(vec2(2.0, 0.0), 3.0).unwrap();
    assert!(matches!(remaining, Region::Ring(_)));
    assert!(matches!(overlap, Region::Ring(_)));
    assert_partitions(
        &ring,
        &remaining,
        &overlap,
        &[
            (vec2(0.0, 0.0), 6.0),
            (vec2(2.0, 0.0), 1.0),
            (vec2(2.0, 0.0), 3.0),
        ],
        (-7.0, -7.0, 14.0, 14.0),
    );
}

#[test]
fn ring_overlay_inside_the_band() {
    let region = Region::circle(vec2(0.0, 0.0), 10.0);
    let (ring, _) = region.overlay(vec2(0.0, 0.0), 2.0).unwrap();

    // circle floating in the band, touching neither boundary
    let (remaining, overlap) = ring.overlay(vec2(5.0, 0.0), 1.5).unwrap();
    assert!(matches!(overlap, Region::Circle(_)));
    match &remaining {
        Region::Arcs(a) => assert_eq!(a.contours().len(), 3),
        other => panic!("expected three contour arcs region, got {:?}", other),
    }
    assert_partitions(
        &ring,
        &remaining,
        &overlap,
        &[
            (vec2(0.0, 0.0), 10.0),
            (vec2(0.0, 0.0), 2.0),
            (vec2(5.0, 0.0), 1.5),
        ],
        (-11.0, -11.0, 22.0, 22.0),
    );
}

#[test]
fn ring_overlay_crossing_the_outer_boundary() {
    let region = Region::circle(vec2(0.0, 0.0), 5.0);
    let (ring, _) = region.overlay(vec2(0.0, 0.0), 1.0).unwrap();

    let (remaining, overlap) = ring.overlay(vec2(5.0, 0.0), 2.0).unwrap();
    assert!(matches!(overlap, Region::Arcs(_)));
    assert_partitions(
        &ring,
        &remaining,
        &overlap,
        &[
            (vec2(0.0, 0.0), 5.0),
            (vec2(0.0, 0.0), 1.0),
            (vec2(5.0, 0.0), 2.0),
        ],
        (-6.0, -6.0, 13.0, 12.0),
    );
}

#[test]
fn lens_overlay_by_a_third_circle() {
    let region = Region::circle(vec2(0.0, 0.0), 2.0);
    let (_, lens) = region.overlay(vec2(3.0, 0.0), 2.0).unwrap();
    assert!(matches!(lens, Region::Arcs(_)));

    let (remaining, overlap) = lens.overlay(vec2(1.5, 1.0), 1.0).unwrap();
    assert_partitions(
        &lens,
        &remaining,
        &overlap,
        &[
            (vec2(0.0, 0.0), 2.0),
            (vec2(3.0, 0.0), 2.0),
            (vec2(1.5, 1.0), 1.0),
        ],
        (-0.5, -2.5, 4.0, 5.0),
    );
}

#[test]
fn overlay_of_many_arc_region_is_rejected() {
    let region = Region::circle(vec2(0.0, 0.0), 2.0);
    let (_, lens) = region.overlay(vec2(3.0, 0.0), 2.0).unwrap();
    // carve a corner off the lens to get a region with more than two arcs
    let (remaining, _) = lens.overlay(vec2(1.5, 1.2), 0.7).unwrap();

    let result = remaining.overlay(vec2(1.5, 0.0), 0.5);
    assert!(matches!(
        result,
        Err(OverlayError::UnsupportedArcsRegion { .. })
    ));
}

#[test]
fn empty_region_overlay_stays_empty() {
    let region: Region = Region::Empty;
    let (remaining, overlap) = region.overlay(vec2(0.0, 0.0), 1.0).unwrap();
    assert!(remaining.is_empty());
    assert!(overlap.is_empty());
}

#[test]
fn labels_lie_inside_their_regions() {
    let region = Region::circle(vec2(0.0, 0.0), 4.0);
    let (ring, disk) = region.overlay(vec2(1.0, 0.5), 1.0).unwrap();
    for r in [&ring, &disk] {
        let label = r.label().expect("non-empty region has a label");
        assert!(r.contains_point(label), "label {:?} outside region", label);
    }
    assert!(Region::<f64>::Empty.label().is_none());
}

#[test]
fn paths_describe_the_boundaries() {
    use plot_geom::Contour;

    let region = Region::circle(vec2(0.0, 0.0), 2.0);
    assert_eq!(region.path().len(), 1);

    let (ring, _) = region.overlay(vec2(0.5, 0.0), 1.0).unwrap();
    let path = ring.path();
    assert_eq!(path.len(), 2);
    for contour in &path {
        assert!(matches!(contour, Contour::Circle { .. }));
    }

    let (_, lens) = region.overlay(vec2(3.0, 0.0), 2.0).unwrap();
    let path = lens.path();
    assert_eq!(path.len(), 1);
    match &path[0] {
        Contour::Arcs(arcs) => {
            assert!(arcs.len() >= 2);
            for pair in arcs.windows(2) {
                assert!(pair[0]
                    .end_point()
                    .fuzzy_eq_eps(pair[1].start_point(), 1e-4));
            }
            let first = &arcs[0];
            let last = &arcs[arcs.len() - 1];
            assert!(last.end_point().fuzzy_eq_eps(first.start_point(), 1e-4));
        }
        other => panic!("expected arcs contour, got {:?}", other),
    }
}

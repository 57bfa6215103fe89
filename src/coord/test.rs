use crate::coord::linear::{concat, interpolate, project, substring};
use crate::coord::shift::{delta, out_of_region, to_original, to_shifted};
use crate::coord::{Crs, Normalization};

use approx::assert_relative_eq;
use geo::{LineString, Point, coord, wkt};

#[test]
fn shift_matches_reference_values() {
    let (d_lat, d_lng) = delta(45.74, 126.60);
    assert_relative_eq!(d_lat, 0.0019163638272425905, epsilon = 1e-15);
    assert_relative_eq!(d_lng, 0.005908751404968975, epsilon = 1e-15);

    let (lat, lng) = to_shifted(30.69, 104.08);
    assert_relative_eq!(lat, 30.68760906411058, epsilon = 1e-12);
    assert_relative_eq!(lng, 104.0825306101392, epsilon = 1e-12);
}

#[test]
fn identity_outside_region() {
    let outside = [
        (40.7128, -74.0060),  // New York
        (-33.8688, 151.2093), // Sydney
        (60.0, 100.0),        // North of the region
        (0.5, 110.0),         // South of the region
        (35.0, 140.0),        // East of the region
    ];

    for (lat, lng) in outside {
        assert!(out_of_region(lat, lng));
        assert_eq!(to_shifted(lat, lng), (lat, lng));
        assert_eq!(to_original(lat, lng), (lat, lng));
    }
}

#[test]
fn round_trip_within_tolerance() {
    let mut lat = 1.0;
    while lat < 55.0 {
        let mut lng = 73.0;
        while lng < 137.0 {
            let (s_lat, s_lng) = to_shifted(lat, lng);
            let (o_lat, o_lng) = to_original(s_lat, s_lng);

            assert!(
                (o_lat - lat).abs() < 1e-6 && (o_lng - lng).abs() < 1e-6,
                "Round-trip of ({lat}, {lng}) drifted to ({o_lat}, {o_lng})"
            );
            lng += 3.7;
        }
        lat += 2.3;
    }
}

#[test]
fn shift_is_deterministic() {
    assert_eq!(to_shifted(45.74, 126.60), to_shifted(45.74, 126.60));
    assert_ne!(to_shifted(45.74, 126.60), (45.74, 126.60));
}

#[test]
fn crs_parses_case_insensitively() {
    assert_eq!("wgs".parse::<Crs>().ok(), Some(Crs::Wgs));
    assert_eq!("GCJ".parse::<Crs>().ok(), Some(Crs::Gcj));
    assert!("bd09".parse::<Crs>().is_err());
}

#[test]
fn normalization_round_trips_geometry() {
    let wgs = wkt! { LINESTRING (126.60 45.74, 126.61 45.75) };
    let normalization = Normalization::new(Crs::Gcj, Crs::Wgs);

    let exported = normalization.export(&wgs);
    let ingested = normalization.ingest(&exported);

    for (a, b) in wgs.coords().zip(ingested.coords()) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
    }

    let identity = Normalization::default();
    assert!(identity.is_identity());
    assert_eq!(identity.ingest(&wgs), wgs);
}

#[test]
fn projects_onto_closest_segment() {
    let line = wkt! { LINESTRING (0.0 0.0, 10.0 0.0, 10.0 10.0) };

    let projection = project(&line, Point::new(4.0, 3.0)).expect("projection must exist");
    assert_relative_eq!(projection.distance, 3.0);
    assert_relative_eq!(projection.offset, 4.0);
    assert_relative_eq!(projection.point.x(), 4.0, epsilon = 1e-12);
    assert_relative_eq!(projection.point.y(), 0.0, epsilon = 1e-12);

    let projection = project(&line, Point::new(12.0, 5.0)).expect("projection must exist");
    assert_relative_eq!(projection.distance, 2.0);
    assert_relative_eq!(projection.offset, 15.0);

    // Beyond the end clamps onto the final vertex
    let projection = project(&line, Point::new(10.0, 13.0)).expect("projection must exist");
    assert_relative_eq!(projection.distance, 3.0);
    assert_relative_eq!(projection.offset, 20.0);

    assert!(project(&LineString::new(vec![]), Point::new(0.0, 0.0)).is_none());

    // A collapsed polyline projects onto its only position
    let collapsed = wkt! { LINESTRING (1.0 1.0, 1.0 1.0) };
    let projection = project(&collapsed, Point::new(4.0, 5.0)).expect("projection must exist");
    assert_relative_eq!(projection.distance, 5.0);
    assert_eq!(projection.offset, 0.0);
}

#[test]
fn substring_keeps_interior_vertices() {
    let line = wkt! { LINESTRING (0.0 0.0, 10.0 0.0, 10.0 10.0) };

    let same = |a: LineString, b: LineString| {
        assert_eq!(a.0.len(), b.0.len(), "{a:?} differs from {b:?}");
        for (a, b) in a.coords().zip(b.coords()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        }
    };

    same(
        substring(&line, 5.0, 15.0),
        wkt! { LINESTRING (5.0 0.0, 10.0 0.0, 10.0 5.0) },
    );
    same(
        substring(&line, 2.0, 4.0),
        wkt! { LINESTRING (2.0 0.0, 4.0 0.0) },
    );
    same(
        substring(&line, 15.0, 5.0),
        wkt! { LINESTRING (5.0 0.0, 10.0 0.0, 10.0 5.0) },
    );

    // A zero-length window repeats the position
    same(
        substring(&line, 3.0, 3.0),
        wkt! { LINESTRING (3.0 0.0, 3.0 0.0) },
    );

    assert_eq!(interpolate(&line, 25.0), Some(coord! { x: 10.0, y: 10.0 }));
}

#[test]
fn concat_skips_shared_junction() {
    let mut coords = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }];
    concat(&mut coords, &wkt! { LINESTRING (1.0 0.0, 1.0 1.0) });

    assert_eq!(
        LineString::new(coords),
        wkt! { LINESTRING (0.0 0.0, 1.0 0.0, 1.0 1.0) }
    );
}

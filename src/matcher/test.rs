use crate::config::MatchConfig;
use crate::coord::shift::to_shifted;
use crate::error::Error;
use crate::matcher::Matcher;
use crate::trajectory::Trajectory;

use approx::assert_relative_eq;
use geo::{Coord, LineString};
use snapline_fixtures::{
    DISTANT_POINT_TRIP, EDGE_1_2, EDGE_2_3, EDGE_3_6, GRID_FMM_CONFIG, GRID_NETWORK,
    GRID_STMATCH_CONFIG, STRAIGHT_TRIP, TURNING_TRIP, fixture_path,
};
use std::io::Write;
use std::path::Path;

fn matchers() -> [Matcher; 2] {
    [GRID_STMATCH_CONFIG, GRID_FMM_CONFIG]
        .map(|config| Matcher::from_config_file(fixture_path(config)).expect("matcher must build"))
}

fn write_config(document: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temporary file must open");

    file.write_all(document.as_bytes())
        .expect("temporary file must write");
    file
}

fn network_path() -> String {
    fixture_path(GRID_NETWORK).display().to_string()
}

#[test_log::test]
fn straight_trip_matches_single_edge() {
    for matcher in matchers() {
        let result = matcher.match_wkt(STRAIGHT_TRIP).expect("trip must decode");

        assert!(!result.is_empty());
        assert_eq!(result.cpath, vec![EDGE_1_2]);
        assert_eq!(result.opath, vec![EDGE_1_2; 3]);
        assert_eq!(result.indices, vec![0, 0, 0]);
    }
}

#[test_log::test]
fn covered_trip_has_one_edge_per_point() {
    for matcher in matchers() {
        let trajectory = Trajectory::from_wkt(TURNING_TRIP).expect("trip must decode");
        let result = matcher.match_trajectory(&trajectory);

        assert_eq!(result.opath.len(), trajectory.len());
        assert!(result.opath.iter().all(|edge| result.cpath.contains(edge)));
        assert_eq!(result.cpath, vec![EDGE_1_2, EDGE_2_3, EDGE_3_6]);

        assert_eq!(result.offset.len(), trajectory.len());
        assert_eq!(result.length.len(), trajectory.len());
        assert_eq!(result.spdist.len(), trajectory.len());
        assert_eq!(result.pgeom.0.len(), trajectory.len());
    }
}

#[test]
fn degenerate_trips() {
    for matcher in matchers() {
        let result = matcher.match_wkt(DISTANT_POINT_TRIP).expect("trip must decode");
        assert!(result.is_empty());
        assert!(result.opath.is_empty() && result.cpath.is_empty());

        let result = matcher.match_trajectory(&Trajectory::default());
        assert!(result.is_empty());
    }
}

#[test]
fn malformed_wkt_is_an_error() {
    let [matcher, _] = matchers();

    assert!(matches!(
        matcher.match_wkt("POINT (1 2)"),
        Err(Error::Trajectory(_))
    ));
}

#[test]
fn unsupported_model_fails_build() {
    let config = write_config(&format!(
        r#"{{ "input": {{ "network": {{ "file": "{}" }} }}, "model": "hmm" }}"#,
        network_path()
    ));

    assert!(matches!(
        Matcher::from_config_file(config.path()),
        Err(Error::UnsupportedModel(model)) if model == "hmm"
    ));
}

#[test]
fn missing_table_fails_engine_init() {
    let config = write_config(&format!(
        r#"{{
            "input": {{
                "network": {{ "file": "{}", "id": "fid", "source": "u", "target": "v" }},
                "ubodt": {{ "file": "/nonexistent/ubodt.csv" }}
            }},
            "model": "fmm"
        }}"#,
        network_path()
    ));

    assert!(matches!(
        Matcher::from_config_file(config.path()),
        Err(Error::EngineInit(_))
    ));
}

#[test]
fn unreadable_network_fails_load() {
    let config = write_config(
        r#"{ "input": { "network": { "file": "/nonexistent/edges.csv" } }, "model": "stmatch" }"#,
    );

    assert!(matches!(
        Matcher::from_config_file(config.path()),
        Err(Error::NetworkLoad(_))
    ));

    assert!(matches!(
        Matcher::from_config_file(Path::new("/nonexistent/config.json")),
        Err(Error::Config(_))
    ));
}

#[test_log::test]
fn shifted_trajectories_are_normalized() {
    let config = write_config(&format!(
        r#"{{
            "input": {{
                "network": {{ "file": "{}", "id": "fid", "source": "u", "target": "v", "crs": "wgs" }},
                "trajectory": {{ "crs": "gcj" }}
            }},
            "model": "stmatch",
            "parameters": {{ "k": 4, "r": 0.01, "e": 0.002 }}
        }}"#,
        network_path()
    ));

    let config = MatchConfig::load(config.path()).expect("configuration must load");
    let matcher = Matcher::build(config).expect("matcher must build");

    let wgs = Trajectory::from_wkt(STRAIGHT_TRIP).expect("trip must decode");
    let shifted = wgs
        .geometry
        .coords()
        .map(|coord| {
            let (lat, lng) = to_shifted(coord.y, coord.x);
            Coord { x: lng, y: lat }
        })
        .collect::<LineString>();

    let result = matcher.match_trajectory(&Trajectory::new(shifted.clone()));

    assert_eq!(result.cpath, vec![EDGE_1_2]);
    assert_eq!(result.opath, vec![EDGE_1_2; 3]);

    // Projected positions are reported back in the shifted system.
    for (projected, observed) in result.pgeom.coords().zip(shifted.coords()) {
        assert_relative_eq!(projected.x, observed.x, epsilon = 1e-6);
        assert_relative_eq!(projected.y, observed.y, epsilon = 1e-6);
    }
}

#[test]
fn matcher_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Matcher>();
}

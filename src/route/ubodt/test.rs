use crate::config::NetworkConfig;
use crate::network::Network;
use crate::route::ubodt::{Record, Ubodt, UbodtError};

use approx::assert_relative_eq;
use snapline_fixtures::{EDGE_1_2, EDGE_2_3, GRID_NETWORK, GRID_UBODT, fixture_path};
use std::io::Write;

fn grid() -> Network {
    Network::load(&NetworkConfig {
        file: fixture_path(GRID_NETWORK),
        id: "fid".to_string(),
        source: "u".to_string(),
        target: "v".to_string(),
    })
    .expect("grid must load")
}

#[test_log::test]
fn reads_fixture_table() {
    let network = grid();
    let ubodt = Ubodt::read(fixture_path(GRID_UBODT), &network).expect("table must load");
    let node = |id: i64| network.node_index(id).expect("node must exist");

    assert_eq!(ubodt.len(), 72);
    assert_relative_eq!(ubodt.delta(), 0.04, epsilon = 1e-9);

    let entry = ubodt.lookup(node(1), node(3)).expect("pair must exist");
    assert_relative_eq!(entry.distance, 0.02, epsilon = 1e-9);
    assert_eq!(entry.next_node, node(2));
    assert_eq!(entry.prev_node, node(2));

    let path = ubodt
        .path(&network, node(1), node(3))
        .expect("path must exist")
        .into_iter()
        .map(|edge| network.edge(edge).fid)
        .collect::<Vec<_>>();
    assert_eq!(path, vec![EDGE_1_2, EDGE_2_3]);

    assert_eq!(ubodt.path(&network, node(5), node(5)), Some(vec![]));
    assert!(ubodt.lookup(node(5), node(5)).is_none());
}

#[test]
fn generation_matches_fixture() {
    let network = grid();
    let fixture = Ubodt::read(fixture_path(GRID_UBODT), &network).expect("table must load");
    let generated = Ubodt::generate(&network, 0.05);

    assert_eq!(generated.len(), fixture.len());

    for record in fixture.records(&network) {
        let source = network.node_index(record.source).expect("node must exist");
        let target = network.node_index(record.target).expect("node must exist");

        let entry = generated
            .lookup(source, target)
            .expect("generated table must hold every fixture pair");
        assert_relative_eq!(entry.distance, record.distance, epsilon = 1e-12);
    }
}

#[test]
fn generation_respects_delta() {
    let network = grid();
    let ubodt = Ubodt::generate(&network, 0.015);

    // Only adjacent intersections lie within the bound: one pair per edge.
    assert_eq!(ubodt.len(), network.edge_count());
    assert!(ubodt.records(&network).all(|record| record.distance <= 0.015));
}

#[test]
fn round_trips_through_both_formats() {
    let network = grid();
    let generated = Ubodt::generate(&network, 0.025);
    let directory = tempfile::tempdir().expect("temporary directory must open");

    for name in ["ubodt.csv", "ubodt.bin"] {
        let path = directory.path().join(name);
        generated.write(&path, &network).expect("table must write");

        let read = Ubodt::read(&path, &network).expect("table must read back");
        assert_eq!(
            read.records(&network).collect::<Vec<_>>(),
            generated.records(&network).collect::<Vec<_>>()
        );
    }
}

#[test]
fn rejects_corrupt_tables() {
    let network = grid();

    let mut binary = tempfile::Builder::new()
        .suffix(".bin")
        .tempfile()
        .expect("temporary file must open");
    binary
        .write_all(&[0u8; 53])
        .expect("temporary file must write");

    assert!(matches!(
        Ubodt::read(binary.path(), &network),
        Err(UbodtError::Truncated(5))
    ));

    let mut csv = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temporary file must open");
    csv.write_all(b"source;target;next_n;prev_n;next_e;distance\n1;42;2;1;100;0.5\n")
        .expect("temporary file must write");

    assert!(matches!(
        Ubodt::read(csv.path(), &network),
        Err(UbodtError::UnknownNode(42))
    ));

    let unknown_edge = Record {
        source: 1,
        target: 2,
        next_n: 2,
        prev_n: 1,
        next_e: 999,
        distance: 0.01,
    };
    assert!(matches!(
        Ubodt::from_records(&network, [unknown_edge]),
        Err(UbodtError::UnknownEdge(999))
    ));

    assert!(matches!(
        Ubodt::read("ubodt.txt", &network),
        Err(UbodtError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        Ubodt::read("/nonexistent/ubodt.bin", &network),
        Err(UbodtError::Io { .. })
    ));
}

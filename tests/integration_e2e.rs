//! End-to-end exercise of the five external operations: load a network,
//! snap points, and solve, following the scenarios in spec §8.

use tournet::api;
use tournet::geometry::Coordinate;
use tournet::session::SessionState;
use tournet::solvers::Algorithm;

const COLLINEAR_OSM: &str = r#"
    <osm version="0.6">
      <node id="1" lat="0.0" lon="-74.05"/>
      <node id="2" lat="0.0" lon="-74.04"/>
      <node id="3" lat="0.0" lon="-74.03"/>
      <node id="4" lat="0.0" lon="-74.02"/>
      <way id="100">
        <nd ref="1"/>
        <nd ref="2"/>
        <nd ref="3"/>
        <nd ref="4"/>
        <tag k="highway" v="residential"/>
      </way>
    </osm>
"#;

#[test]
fn loads_a_network_and_reports_bounds_and_stats() {
    let session = SessionState::new();
    let output = api::load_network(&session, COLLINEAR_OSM.as_bytes()).unwrap();
    assert_eq!(output.network_stats.nodes, 4);
    assert!(output.bounds.max_lon > output.bounds.min_lon);
    assert!(!output.network_geojson.features.is_empty());
}

#[test]
fn snap_points_requires_a_loaded_network() {
    let session = SessionState::new();
    let result = api::snap_points(&session, b"id,X,Y\n1,-74.04,0.0\n");
    assert!(result.is_err());
}

#[test]
fn full_pipeline_snaps_and_solves_a_collinear_chain_s3() {
    let session = SessionState::new();
    api::load_network(&session, COLLINEAR_OSM.as_bytes()).unwrap();

    // Points snapped at nodes 0 (-74.05), 1 (-74.04), and 3 (-74.02).
    let points_csv = b"id,X,Y\n0,-74.05,0.0\n1,-74.04,0.0\n2,-74.02,0.0\n";
    let (snapped, geojson) = api::snap_points(&session, points_csv).unwrap();
    assert_eq!(snapped.len(), 3);
    assert_eq!(geojson.features.len(), 9);

    let output = api::solve(&session, Algorithm::Exhaustive).unwrap();

    // On a straight chain, any 3 of 4 collinear points produce a closed
    // tour of twice the span covered by the outer two chosen points (the
    // path is walked out and back). Here that span is nodes 0..3.
    let n0 = Coordinate::new(-74.05, 0.0);
    let n1 = Coordinate::new(-74.04, 0.0);
    let n2 = Coordinate::new(-74.03, 0.0);
    let n3 = Coordinate::new(-74.02, 0.0);
    let full_span =
        n0.haversine_distance_m(&n1) + n1.haversine_distance_m(&n2) + n2.haversine_distance_m(&n3);
    assert!((output.route.total_length - 2.0 * full_span).abs() < 1e-6);
    assert_eq!(output.route.algorithm_tour_ids[0], 0);
    assert!(output.warning.is_none());
}

#[test]
fn solve_fails_cleanly_without_any_snapped_points() {
    let session = SessionState::new();
    api::load_network(&session, COLLINEAR_OSM.as_bytes()).unwrap();
    let result = api::solve(&session, Algorithm::Exhaustive);
    assert!(result.is_err());
}

#[test]
fn malformed_network_upload_is_rejected() {
    let session = SessionState::new();
    let result = api::load_network(&session, b"not xml");
    assert!(result.is_err());
}

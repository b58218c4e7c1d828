/*!
# External API

The five operations a caller drives the whole crate through (spec §6):
[`load_network`], [`snap_points`], and [`solve`], plus the size-guard
truncation applied at the `solve` boundary. Every operation logs a
`tracing` event at its error-construction boundary (structured logging,
gated by the `logging` feature).
*/

use crate::core::error::Result;
use crate::geojson::FeatureCollection;
use crate::graph::RoadGraph;
use crate::matrix::{MatrixValidation, build_cost_matrix, validate_matrix};
use crate::osm::{Bounds, NetworkStats};
use crate::points_io::{RawPoint, parse_points};
use crate::route::Route;
use crate::session::SessionState;
use crate::snap::SnappedPoint;
use crate::solvers::{Algorithm, solve as dispatch_solve};

/// `load_network`'s full output: the graph plus everything a caller needs
/// to render a preview before any points are snapped.
#[derive(Debug, Clone)]
pub struct LoadNetworkOutput {
    pub network_stats: NetworkStats,
    pub bounds: Bounds,
    pub network_geojson: FeatureCollection,
}

/// Parses OSM XML bytes into a Road Graph, stores it as the session's
/// current network (discarding any previously snapped points), and
/// returns summary stats, bounds, and a GeoJSON preview of every edge.
///
/// # Errors
///
/// [`crate::core::error::TourError::BadNetworkFile`] if the bytes are not
/// well-formed OSM XML or contain no usable road network.
pub fn load_network(session: &SessionState, bytes: &[u8]) -> Result<LoadNetworkOutput> {
    let (graph, network_stats, bounds, network_geojson) = match crate::osm::load_network(bytes) {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "load_network failed");
            return Err(err);
        }
    };

    session.load_network(graph, network_stats, bounds, network_geojson.clone());
    tracing::info!(
        nodes = network_stats.nodes,
        edges = network_stats.edges,
        "loaded network"
    );

    Ok(LoadNetworkOutput {
        network_stats,
        bounds,
        network_geojson,
    })
}

/// Parses a points file, snaps every point against the currently loaded
/// network, and stores the snapped points in the session.
///
/// # Errors
///
/// [`crate::core::error::TourError::BadPointsFile`] if the upload is
/// malformed, and [`crate::core::error::TourError::EmptyGraph`] if no
/// network has been loaded yet or the loaded graph has no edges.
pub fn snap_points(
    session: &SessionState,
    bytes: &[u8],
) -> Result<(Vec<SnappedPoint>, FeatureCollection)> {
    let raw_points: Vec<RawPoint> = match parse_points(bytes) {
        Ok(points) => points,
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "snap_points failed to parse upload");
            return Err(err);
        }
    };

    let guard = session.read();
    let session_data = guard.as_ref().ok_or_else(|| {
        let err = crate::core::error::TourError::empty_graph("no network has been loaded yet");
        tracing::error!(kind = err.kind(), error = %err, "snap_points failed");
        err
    })?;

    let (snapped, geojson) = match crate::snap::snap_points(&session_data.graph, &raw_points) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "snap_points failed");
            return Err(err);
        }
    };
    drop(guard);

    session.set_snapped_points(snapped.clone());
    tracing::info!(points = snapped.len(), "snapped points");

    Ok((snapped, geojson))
}

/// Size-guard truncation thresholds applied at the `solve` entry point
/// (spec §6): beyond these, the point list is silently truncated and a
/// warning is returned rather than the solver raising `SizeExceeded`.
const EXHAUSTIVE_TRUNCATE_AT: usize = 12;
const HELDKARP_TRUNCATE_AT: usize = 20;
const GREEDY_ADVISORY_AT: usize = 200;

/// The full output of a `solve` request: the materialized route plus any
/// size-guard warning.
#[derive(Debug, Clone)]
pub struct SolveOutput {
    pub route: Route,
    pub matrix_validation: MatrixValidation,
    pub warning: Option<String>,
}

/// Builds the cost matrix over the session's snapped points and runs the
/// requested solver, applying the entry-point size guard for
/// `Exhaustive`/`HeldKarp` before the solver itself ever runs.
///
/// # Errors
///
/// [`crate::core::error::TourError::EmptyInput`] if no points have been
/// snapped yet, [`crate::core::error::TourError::Disconnected`] if the
/// cost matrix has an unreachable pair, and
/// [`crate::core::error::TourError::SizeExceeded`] if truncation was
/// bypassed and the underlying solver's hard cap is still exceeded.
pub fn solve(session: &SessionState, algorithm: Algorithm) -> Result<SolveOutput> {
    let guard = session.read();
    let session_data = guard.as_ref().ok_or_else(|| {
        let err = crate::core::error::TourError::empty_input("no network has been loaded yet");
        tracing::error!(kind = err.kind(), error = %err, "solve failed");
        err
    })?;
    let all_points = session_data.snapped_points.clone().ok_or_else(|| {
        let err = crate::core::error::TourError::empty_input("no points have been snapped yet");
        tracing::error!(kind = err.kind(), error = %err, "solve failed");
        err
    })?;
    let graph: RoadGraph = session_data.graph.clone();
    drop(guard);

    let (points, warning) = apply_size_guard(algorithm, all_points);

    let matrix = build_cost_matrix(&graph, &points);
    let matrix_validation = validate_matrix(&matrix);
    let point_ids: Vec<i64> = points.iter().map(|p| p.id).collect();

    let solve_result = match dispatch_solve(algorithm, &matrix, &point_ids) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, algorithm = ?algorithm, "solve failed");
            return Err(err);
        }
    };

    let route = crate::route::materialize(&graph, &points, &matrix, &solve_result);
    tracing::info!(
        algorithm = ?algorithm,
        n = points.len(),
        tour_length = route.total_length,
        "solved tour"
    );

    Ok(SolveOutput {
        route,
        matrix_validation,
        warning,
    })
}

/// Applies the entry-point truncation for `Exhaustive`/`HeldKarp` and the
/// advisory log for `GreedyTwoOpt`. Returns the (possibly truncated) point
/// list and an optional warning describing what was dropped.
fn apply_size_guard(
    algorithm: Algorithm,
    points: Vec<SnappedPoint>,
) -> (Vec<SnappedPoint>, Option<String>) {
    let cap = match algorithm {
        Algorithm::Exhaustive => Some(EXHAUSTIVE_TRUNCATE_AT),
        Algorithm::HeldKarp => Some(HELDKARP_TRUNCATE_AT),
        Algorithm::GreedyTwoOpt => None,
    };

    if let Some(cap) = cap {
        if points.len() > cap {
            let ignored_from = cap + 1;
            let ignored_to = points.len();
            let warning = format!("points {ignored_from}-{ignored_to} ignored");
            tracing::warn!(
                algorithm = ?algorithm,
                cap,
                total = points.len(),
                "truncating snapped points at solve boundary"
            );
            let mut truncated = points;
            truncated.truncate(cap);
            return (truncated, Some(warning));
        }
    } else if points.len() > GREEDY_ADVISORY_AT {
        tracing::warn!(
            n = points.len(),
            threshold = GREEDY_ADVISORY_AT,
            "greedy+2-opt solving a large instance"
        );
    }

    (points, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;

    fn sample_points(n: usize) -> Vec<SnappedPoint> {
        (0..n)
            .map(|i| SnappedPoint {
                id: i as i64,
                original: Coordinate::new(0.0, 0.0),
                snapped: Coordinate::new(0.0, 0.0),
                edge: (
                    crate::core::types::NodeId::new(petgraph::graph::NodeIndex::new(0)),
                    crate::core::types::NodeId::new(petgraph::graph::NodeIndex::new(1)),
                    0,
                ),
                offset_distance: 0.0,
            })
            .collect()
    }

    #[test]
    fn exhaustive_truncates_above_twelve_with_a_warning() {
        let (truncated, warning) = apply_size_guard(Algorithm::Exhaustive, sample_points(15));
        assert_eq!(truncated.len(), 12);
        assert_eq!(warning.as_deref(), Some("points 13-15 ignored"));
    }

    #[test]
    fn heldkarp_truncates_above_twenty() {
        let (truncated, warning) = apply_size_guard(Algorithm::HeldKarp, sample_points(25));
        assert_eq!(truncated.len(), 20);
        assert!(warning.is_some());
    }

    #[test]
    fn greedy_two_opt_never_truncates() {
        let (kept, warning) = apply_size_guard(Algorithm::GreedyTwoOpt, sample_points(500));
        assert_eq!(kept.len(), 500);
        assert!(warning.is_none());
    }

    #[test]
    fn below_cap_is_left_untouched() {
        let (kept, warning) = apply_size_guard(Algorithm::Exhaustive, sample_points(5));
        assert_eq!(kept.len(), 5);
        assert!(warning.is_none());
    }
}

/*!
# Path Materializer

Expands a solved tour into a concrete geometric polyline by stitching
together shortest paths between consecutive snapped points (including the
wrap-around last-to-first pair), suppressing the duplicate joining vertex
between segments. Also reports per-segment tour statistics, supplementing
the polyline with the summary the original's `get_tour_statistics`
produced.
*/

use crate::core::types::NodeId;
use crate::geojson::Geometry;
use crate::geometry::Coordinate;
use crate::graph::RoadGraph;
use crate::matrix::CostMatrix;
use crate::paths::shortest_path;
use crate::snap::SnappedPoint;
use crate::solvers::{SolveResult, Telemetry};
use std::collections::HashMap;

/// Per-segment length statistics over a closed tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourStatistics {
    pub num_points: usize,
    pub total_length: f64,
    pub avg_segment_length: f64,
    pub min_segment_length: f64,
    pub max_segment_length: f64,
}

fn tour_statistics(matrix: &CostMatrix, tour_indices: &[usize]) -> TourStatistics {
    if tour_indices.is_empty() {
        return TourStatistics {
            num_points: 0,
            total_length: 0.0,
            avg_segment_length: 0.0,
            min_segment_length: 0.0,
            max_segment_length: 0.0,
        };
    }

    let n = tour_indices.len();
    let segment_lengths: Vec<f64> = (0..n)
        .map(|i| {
            let current = tour_indices[i];
            let next = tour_indices[(i + 1) % n];
            matrix.get(current, next)
        })
        .collect();

    let total_length: f64 = segment_lengths.iter().sum();
    TourStatistics {
        num_points: n,
        total_length,
        avg_segment_length: total_length / segment_lengths.len() as f64,
        min_segment_length: segment_lengths.iter().cloned().fold(f64::INFINITY, f64::min),
        max_segment_length: segment_lengths
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max),
    }
}

/// The materialized geometric output of a solved tour: a polyline plus
/// the metadata the external `solve` operation returns.
#[derive(Debug, Clone)]
pub struct Route {
    pub algorithm_tour_ids: Vec<i64>,
    pub total_length: f64,
    pub telemetry: Telemetry,
    pub statistics: TourStatistics,
    pub polyline: Vec<Coordinate>,
}

impl Route {
    /// The polyline as an RFC 7946 `LineString` geometry.
    pub fn polyline_geojson(&self) -> Geometry {
        Geometry::line_string(&self.polyline)
    }
}

/// Builds the concrete polyline and statistics for a solved tour.
///
/// `snapped_points` must be the same ordered list whose ids were supplied
/// to the solver producing `solve_result` (so point ids can be mapped back
/// to their snapped coordinates), and `matrix` the cost matrix the solver
/// ran against (so segment statistics reuse already-computed distances
/// instead of re-querying the oracle).
pub fn materialize(
    graph: &RoadGraph,
    snapped_points: &[SnappedPoint],
    matrix: &CostMatrix,
    solve_result: &SolveResult,
) -> Route {
    let id_to_index: HashMap<i64, usize> = snapped_points
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id, idx))
        .collect();
    let id_to_coord: HashMap<i64, Coordinate> =
        snapped_points.iter().map(|p| (p.id, p.snapped)).collect();

    let tour_indices: Vec<usize> = solve_result
        .tour_ids
        .iter()
        .map(|id| id_to_index[id])
        .collect();
    let statistics = tour_statistics(matrix, &tour_indices);

    let mut polyline: Vec<Coordinate> = Vec::new();
    let n = solve_result.tour_ids.len();
    for i in 0..n {
        let from_id = solve_result.tour_ids[i];
        let to_id = solve_result.tour_ids[(i + 1) % n];
        let from_coord = id_to_coord[&from_id];
        let to_coord = id_to_coord[&to_id];

        if from_coord == to_coord {
            continue;
        }

        let segment = shortest_path(graph, from_coord, to_coord);
        let segment_coords: Vec<Coordinate> = segment
            .nodes
            .iter()
            .filter_map(|node: &NodeId| graph.node_coordinate(*node))
            .collect();

        if polyline.last() == segment_coords.first() {
            polyline.extend(segment_coords.into_iter().skip(1));
        } else {
            polyline.extend(segment_coords);
        }
    }

    if n == 1 {
        polyline.push(id_to_coord[&solve_result.tour_ids[0]]);
    }

    Route {
        algorithm_tour_ids: solve_result.tour_ids.clone(),
        total_length: solve_result.tour_length,
        telemetry: solve_result.telemetry.clone(),
        statistics,
        polyline,
    }
}

//! Property-based tests for the cost matrix and the three solvers, using
//! randomly generated instances rather than the fixed scenarios in spec §8.

use proptest::prelude::*;
use std::collections::HashSet;
use tournet::geometry::Coordinate;
use tournet::graph::RoadGraph;
use tournet::matrix::{CostMatrix, build_cost_matrix, validate_matrix};
use tournet::snap::SnappedPoint;
use tournet::solvers::{Algorithm, Telemetry, solve};

/// Builds a random symmetric, zero-diagonal distance matrix of size `n`.
fn symmetric_matrix(n: usize, weights: Vec<f64>) -> CostMatrix {
    let mut rows = vec![vec![0.0; n]; n];
    let mut idx = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let w = weights[idx % weights.len()];
            rows[i][j] = w;
            rows[j][i] = w;
            idx += 1;
        }
    }
    CostMatrix::from_rows(rows)
}

fn small_instance_size() -> impl Strategy<Value = usize> {
    2usize..8usize
}

fn positive_weights() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..200.0, 4..40)
}

proptest! {
    /// Property: every solver returns a permutation of the input ids, anchored at ids[0].
    #[test]
    fn prop_every_solver_returns_a_valid_permutation(
        n in small_instance_size(),
        weights in positive_weights(),
    ) {
        let matrix = symmetric_matrix(n, weights);
        let ids: Vec<i64> = (0..n as i64).collect();
        for algorithm in [Algorithm::Exhaustive, Algorithm::HeldKarp, Algorithm::GreedyTwoOpt] {
            let result = solve(algorithm, &matrix, &ids).unwrap();
            prop_assert_eq!(result.tour_ids[0], ids[0]);
            let unique: HashSet<i64> = result.tour_ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), n);
            prop_assert_eq!(result.tour_ids.len(), n);
        }
    }

    /// Property: Exhaustive and Held-Karp always find the same optimal length.
    #[test]
    fn prop_exhaustive_and_heldkarp_agree_on_optimal_length(
        n in 2usize..9usize,
        weights in positive_weights(),
    ) {
        let matrix = symmetric_matrix(n, weights);
        let ids: Vec<i64> = (0..n as i64).collect();
        let exhaustive = solve(Algorithm::Exhaustive, &matrix, &ids).unwrap();
        let heldkarp = solve(Algorithm::HeldKarp, &matrix, &ids).unwrap();
        prop_assert!((exhaustive.tour_length - heldkarp.tour_length).abs() < 1e-6);
    }

    /// Property: 2-Opt never leaves a tour longer than its nearest-neighbor construction.
    #[test]
    fn prop_two_opt_never_worsens_the_construction(
        n in small_instance_size(),
        weights in positive_weights(),
    ) {
        let matrix = symmetric_matrix(n, weights);
        let ids: Vec<i64> = (0..n as i64).collect();
        let result = solve(Algorithm::GreedyTwoOpt, &matrix, &ids).unwrap();
        if let Telemetry::GreedyTwoOpt(t) = result.telemetry {
            prop_assert!(t.improved_length <= t.construction_length + 1e-9);
        } else {
            prop_assert!(false, "expected GreedyTwoOpt telemetry");
        }
    }

    /// Property: a cost matrix built from real coordinates is always symmetric,
    /// non-negative, and zero on the diagonal, regardless of point count.
    #[test]
    fn prop_cost_matrix_from_points_is_symmetric_and_nonnegative(
        lons in prop::collection::vec(-74.2f64..-73.9, 2..10),
        lats in prop::collection::vec(40.6f64..40.9, 2..10),
    ) {
        let n = lons.len().min(lats.len());
        prop_assume!(n >= 2);
        let mut graph = RoadGraph::new();
        let mut node_ids = Vec::new();
        for i in 0..n {
            node_ids.push(graph.add_node(Coordinate::new(lons[i], lats[i])));
        }
        for w in node_ids.windows(2) {
            graph.add_edge(w[0], w[1], 1.0, None);
            graph.add_edge(w[1], w[0], 1.0, None);
        }
        let edge = graph.edges_sorted()[0];
        let points: Vec<SnappedPoint> = node_ids
            .iter()
            .enumerate()
            .map(|(i, &node)| SnappedPoint {
                id: i as i64,
                original: graph.node_coordinate(node).unwrap(),
                snapped: graph.node_coordinate(node).unwrap(),
                edge: (edge.0, edge.1, edge.2.key),
                offset_distance: 0.0,
            })
            .collect();

        let matrix = build_cost_matrix(&graph, &points);
        let validation = validate_matrix(&matrix);
        prop_assert!(validation.is_symmetric);
        prop_assert!(validation.diagonal_zero);
        prop_assert!(!validation.has_negative);
    }
}

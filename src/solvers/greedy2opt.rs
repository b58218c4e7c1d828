/*!
# Greedy + 2-Opt Solver

Phase 1 builds a tour by nearest-neighbor construction; Phase 2 improves
it with first-improvement 2-Opt local search. No size cap, offered
specifically for instances too large for the exact solvers.
*/

use super::{SolveResult, Telemetry, check_common_preconditions};
use crate::core::error::Result;
use crate::matrix::CostMatrix;

/// Default cap on the number of 2-Opt improvement sweeps.
pub const DEFAULT_MAX_SWEEPS: u32 = 1000;

/// Above this many points, [`solve`] logs an advisory (no error, no cap).
pub const ADVISORY_THRESHOLD: usize = 200;

/// Tolerance below which a 2-Opt delta is not considered an improvement,
/// guarding against floating-point noise causing an infinite loop.
const EPSILON: f64 = 1e-9;

/// Telemetry for a greedy+2-opt solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyTwoOptTelemetry {
    pub swap_count: u64,
    pub construction_length: f64,
    pub improved_length: f64,
    pub relative_improvement: f64,
    pub distance_lookups: u64,
}

fn cycle_length(matrix: &CostMatrix, order: &[usize]) -> f64 {
    let n = order.len();
    let mut total = 0.0;
    for i in 0..n {
        let next = (i + 1) % n;
        total += matrix.get(order[i], order[next]);
    }
    total
}

fn nearest_neighbor_tour(matrix: &CostMatrix, n: usize) -> (Vec<usize>, u64) {
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = 0;
    visited[0] = true;
    tour.push(0);
    let mut lookups = 0u64;

    for _ in 1..n {
        let mut best_next = None;
        let mut best_dist = f64::INFINITY;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            lookups += 1;
            let dist = matrix.get(current, candidate);
            if dist < best_dist {
                best_dist = dist;
                best_next = Some(candidate);
            }
        }
        let next = best_next.expect("an unvisited candidate must exist while tour is incomplete");
        visited[next] = true;
        tour.push(next);
        current = next;
    }

    (tour, lookups)
}

/// Runs first-improvement 2-Opt on `tour` in place until a full sweep
/// finds no improving move or `max_sweeps` is reached. Returns the number
/// of accepted swaps.
fn two_opt(matrix: &CostMatrix, tour: &mut [usize], max_sweeps: u32) -> u64 {
    let n = tour.len();
    let mut swap_count = 0u64;

    for _ in 0..max_sweeps {
        let mut improved = false;
        'sweep: for i in 0..n.saturating_sub(2) {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let a = tour[i];
                let b = tour[i + 1];
                let c = tour[j];
                let d = tour[(j + 1) % n];
                let old_cost = matrix.get(a, b) + matrix.get(c, d);
                let new_cost = matrix.get(a, c) + matrix.get(b, d);
                if new_cost + EPSILON < old_cost {
                    tour[(i + 1)..=j].reverse();
                    swap_count += 1;
                    improved = true;
                    break 'sweep;
                }
            }
        }
        if !improved {
            break;
        }
    }

    swap_count
}

/// Runs the greedy construction + 2-Opt improvement solver, with a default
/// sweep cap of [`DEFAULT_MAX_SWEEPS`].
///
/// # Errors
///
/// [`crate::core::error::TourError::EmptyInput`] if `point_ids` is empty,
/// [`crate::core::error::TourError::Disconnected`] if the matrix has any
/// unreachable pair. This solver has no size cap.
pub fn solve(matrix: &CostMatrix, point_ids: &[i64]) -> Result<SolveResult> {
    solve_with_sweep_cap(matrix, point_ids, DEFAULT_MAX_SWEEPS)
}

/// Like [`solve`], but with an explicit cap on 2-Opt sweeps.
pub fn solve_with_sweep_cap(
    matrix: &CostMatrix,
    point_ids: &[i64],
    max_sweeps: u32,
) -> Result<SolveResult> {
    check_common_preconditions(matrix, point_ids)?;
    let n = point_ids.len();

    if n > ADVISORY_THRESHOLD {
        tracing::warn!(
            n,
            threshold = ADVISORY_THRESHOLD,
            "greedy+2-opt solving a large instance"
        );
    }

    if n == 1 {
        return Ok(SolveResult {
            tour_ids: vec![point_ids[0]],
            tour_length: 0.0,
            telemetry: Telemetry::GreedyTwoOpt(GreedyTwoOptTelemetry {
                swap_count: 0,
                construction_length: 0.0,
                improved_length: 0.0,
                relative_improvement: 0.0,
                distance_lookups: 0,
            }),
        });
    }

    let (mut tour, distance_lookups) = nearest_neighbor_tour(matrix, n);
    let construction_length = cycle_length(matrix, &tour);

    let swap_count = two_opt(matrix, &mut tour, max_sweeps);
    let improved_length = cycle_length(matrix, &tour);

    let relative_improvement = if construction_length > 0.0 {
        (construction_length - improved_length) / construction_length
    } else {
        0.0
    };

    let tour_ids = tour.iter().map(|&i| point_ids[i]).collect();
    Ok(SolveResult {
        tour_ids,
        tour_length: improved_length,
        telemetry: Telemetry::GreedyTwoOpt(GreedyTwoOptTelemetry {
            swap_count,
            construction_length,
            improved_length,
            relative_improvement,
            distance_lookups,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_opt_improves_the_s4_starting_tour() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ]);
        let result = solve(&matrix, &[0, 1, 2, 3]).unwrap();
        assert!(result.tour_length <= 80.0 + 1e-9);
        if let Telemetry::GreedyTwoOpt(t) = result.telemetry {
            assert!(t.improved_length <= t.construction_length);
        } else {
            panic!("expected GreedyTwoOpt telemetry");
        }
    }

    #[test]
    fn n_equals_one_is_trivial() {
        let matrix = CostMatrix::from_rows(vec![vec![0.0]]);
        let result = solve(&matrix, &[5]).unwrap();
        assert_eq!(result.tour_ids, vec![5]);
        assert_eq!(result.tour_length, 0.0);
    }

    #[test]
    fn improved_length_never_exceeds_construction_length() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0, 10.0, 7.0],
            vec![2.0, 0.0, 6.0, 4.0, 3.0],
            vec![9.0, 6.0, 0.0, 8.0, 5.0],
            vec![10.0, 4.0, 8.0, 0.0, 6.0],
            vec![7.0, 3.0, 5.0, 6.0, 0.0],
        ]);
        let result = solve(&matrix, &[0, 1, 2, 3, 4]).unwrap();
        if let Telemetry::GreedyTwoOpt(t) = result.telemetry {
            assert!(t.improved_length <= t.construction_length + 1e-9);
        } else {
            panic!("expected GreedyTwoOpt telemetry");
        }
    }

    #[test]
    fn disconnected_matrix_is_rejected() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 10.0, f64::INFINITY],
            vec![10.0, 0.0, f64::INFINITY],
            vec![f64::INFINITY, f64::INFINITY, 0.0],
        ]);
        let result = solve(&matrix, &[0, 1, 2]);
        assert!(matches!(
            result,
            Err(crate::core::error::TourError::Disconnected(_))
        ));
    }
}

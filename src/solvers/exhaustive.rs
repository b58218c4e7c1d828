/*!
# Exhaustive Solver

Enumerates all `(n-1)!` permutations of the non-anchor indices, retaining
the minimum-cost closed cycle. Exact, but only tractable for small `n`.
*/

use super::{SolveResult, Telemetry, check_common_preconditions};
use crate::core::error::{Result, TourError};
use crate::matrix::CostMatrix;

/// The largest `n` the exhaustive solver will run on before refusing with
/// [`TourError::SizeExceeded`].
pub const MAX_N: usize = 12;

/// Telemetry for an exhaustive solve: the number of permutations examined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExhaustiveTelemetry {
    pub permutations_examined: u64,
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

/// Advances `indices` to its next permutation in lexicographic order,
/// returning `false` once the last (fully descending) permutation has been
/// reached. Starting from a sorted ascending slice and calling this
/// repeatedly enumerates every permutation in canonical lexicographic
/// order, which is what lets the solver's tie-break ("first one found
/// wins") land on the lexicographically-first optimal tour.
fn next_permutation(indices: &mut [usize]) -> bool {
    let n = indices.len();
    if n < 2 {
        return false;
    }
    let mut k = n - 1;
    loop {
        if k == 0 {
            return false;
        }
        k -= 1;
        if indices[k] < indices[k + 1] {
            break;
        }
    }
    let mut l = n - 1;
    while indices[l] <= indices[k] {
        l -= 1;
    }
    indices.swap(k, l);
    indices[(k + 1)..].reverse();
    true
}

/// Runs the exhaustive solver.
///
/// # Errors
///
/// [`TourError::EmptyInput`] if `point_ids` is empty, [`TourError::Disconnected`]
/// if the matrix has any unreachable pair, [`TourError::SizeExceeded`] if
/// `point_ids.len() > `[`MAX_N`].
pub fn solve(matrix: &CostMatrix, point_ids: &[i64]) -> Result<SolveResult> {
    check_common_preconditions(matrix, point_ids)?;
    let n = point_ids.len();
    if n > MAX_N {
        return Err(TourError::size_exceeded(format!(
            "n = {n} exceeds the exhaustive solver's cap of {MAX_N}"
        )));
    }

    if n == 1 {
        return Ok(SolveResult {
            tour_ids: vec![point_ids[0]],
            tour_length: 0.0,
            telemetry: Telemetry::Exhaustive(ExhaustiveTelemetry {
                permutations_examined: 1,
            }),
        });
    }

    if n == 2 {
        let length = 2.0 * matrix.get(0, 1);
        return Ok(SolveResult {
            tour_ids: vec![point_ids[0], point_ids[1]],
            tour_length: length,
            telemetry: Telemetry::Exhaustive(ExhaustiveTelemetry {
                permutations_examined: 1,
            }),
        });
    }

    let mut rest: Vec<usize> = (1..n).collect();
    let mut best_order: Vec<usize> = std::iter::once(0).chain(rest.iter().copied()).collect();
    let mut best_length = cycle_length(matrix, &best_order);
    let mut examined: u64 = 1;

    while next_permutation(&mut rest) {
        examined += 1;
        let order: Vec<usize> = std::iter::once(0).chain(rest.iter().copied()).collect();
        let length = cycle_length(matrix, &order);
        if length < best_length {
            best_length = length;
            best_order = order;
        }
    }

    let tour_ids = best_order.iter().map(|&idx| point_ids[idx]).collect();
    Ok(SolveResult {
        tour_ids,
        tour_length: best_length,
        telemetry: Telemetry::Exhaustive(ExhaustiveTelemetry {
            permutations_examined: examined,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_permutation_visits_every_ordering_in_lexicographic_order() {
        let mut indices = vec![1, 2, 3];
        let mut seen = vec![indices.clone()];
        while next_permutation(&mut indices) {
            seen.push(indices.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn ties_resolve_to_the_lexicographically_first_optimal_tour() {
        // A 4-city instance where two distinct non-anchor orderings (1,2,3)
        // and (1,3,2) both produce the same optimal cycle length; the
        // lexicographically-first one, (1,2,3), must win.
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 10.0, 10.0, 10.0],
            vec![10.0, 0.0, 10.0, 10.0],
            vec![10.0, 10.0, 0.0, 10.0],
            vec![10.0, 10.0, 10.0, 0.0],
        ]);
        let result = solve(&matrix, &[0, 1, 2, 3]).unwrap();
        assert_eq!(result.tour_ids, vec![0, 1, 2, 3]);
        assert_eq!(result.tour_length, 40.0);
    }

    #[test]
    fn three_city_triangle_s1() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 10.0, 15.0],
            vec![10.0, 0.0, 20.0],
            vec![15.0, 20.0, 0.0],
        ]);
        let result = solve(&matrix, &[0, 1, 2]).unwrap();
        assert_eq!(result.tour_length, 45.0);
        assert_eq!(result.tour_ids[0], 0);
        assert_eq!(result.tour_ids.len(), 3);
    }

    #[test]
    fn four_city_asymmetric_optimum_s2() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ]);
        let result = solve(&matrix, &[0, 1, 2, 3]).unwrap();
        assert_eq!(result.tour_length, 80.0);
    }

    #[test]
    fn n_equals_one_is_trivial() {
        let matrix = CostMatrix::from_rows(vec![vec![0.0]]);
        let result = solve(&matrix, &[42]).unwrap();
        assert_eq!(result.tour_ids, vec![42]);
        assert_eq!(result.tour_length, 0.0);
    }

    #[test]
    fn n_equals_two_doubles_the_single_edge() {
        let matrix = CostMatrix::from_rows(vec![vec![0.0, 7.0], vec![7.0, 0.0]]);
        let result = solve(&matrix, &[10, 20]).unwrap();
        assert_eq!(result.tour_ids, vec![10, 20]);
        assert_eq!(result.tour_length, 14.0);
    }

    #[test]
    fn rejects_n_greater_than_twelve() {
        let n = 13;
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
            .collect();
        let matrix = CostMatrix::from_rows(rows);
        let ids: Vec<i64> = (0..n as i64).collect();
        let result = solve(&matrix, &ids);
        assert!(matches!(result, Err(TourError::SizeExceeded(_))));
    }

    #[test]
    fn disconnected_matrix_is_rejected() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 10.0, f64::INFINITY],
            vec![10.0, 0.0, f64::INFINITY],
            vec![f64::INFINITY, f64::INFINITY, 0.0],
        ]);
        let result = solve(&matrix, &[0, 1, 2]);
        assert!(matches!(result, Err(TourError::Disconnected(_))));
    }
}

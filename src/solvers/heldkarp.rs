/*!
# Held-Karp Solver

Classic bitmask dynamic program over subsets of `{0,...,n-1}` containing
the anchor. State `(S, i)` holds the minimum cost of a path starting at
0, visiting exactly the cities in `S`, ending at `i`. Exact, tractable up
to [`MAX_N`] because of the `n * 2^n` table.
*/

use super::{SolveResult, Telemetry, check_common_preconditions};
use crate::core::error::{Result, TourError};
use crate::matrix::CostMatrix;

/// The largest `n` the Held-Karp solver will run on before refusing with
/// [`TourError::SizeExceeded`] (a dense 24-city table would need ~192 MiB).
pub const MAX_N: usize = 23;

/// Telemetry for a Held-Karp solve: the number of `(S, i)` states filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldKarpTelemetry {
    pub states_filled: u64,
}

const NONE: usize = usize::MAX;

/// Runs the Held-Karp dynamic program.
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
            "n = {n} exceeds the Held-Karp solver's cap of {MAX_N}"
        )));
    }

    if n == 1 {
        return Ok(SolveResult {
            tour_ids: vec![point_ids[0]],
            tour_length: 0.0,
            telemetry: Telemetry::HeldKarp(HeldKarpTelemetry { states_filled: 1 }),
        });
    }
    if n == 2 {
        return Ok(SolveResult {
            tour_ids: vec![point_ids[0], point_ids[1]],
            tour_length: 2.0 * matrix.get(0, 1),
            telemetry: Telemetry::HeldKarp(HeldKarpTelemetry { states_filled: 1 }),
        });
    }

    let num_subsets = 1usize << n;
    let mut dp = vec![f64::INFINITY; num_subsets * n];
    let mut parent = vec![NONE; num_subsets * n];
    let mut states_filled: u64 = 0;

    let idx = |subset: usize, i: usize| subset * n + i;

    dp[idx(1 << 0, 0)] = 0.0;
    states_filled += 1;

    for subset in 1..num_subsets {
        if subset & 1 == 0 {
            continue;
        }
        for i in 0..n {
            if subset & (1 << i) == 0 {
                continue;
            }
            let current = dp[idx(subset, i)];
            if current.is_infinite() {
                continue;
            }
            for j in 0..n {
                if subset & (1 << j) != 0 {
                    continue;
                }
                let next_subset = subset | (1 << j);
                let candidate = current + matrix.get(i, j);
                if candidate < dp[idx(next_subset, j)] {
                    dp[idx(next_subset, j)] = candidate;
                    parent[idx(next_subset, j)] = i;
                    states_filled += 1;
                }
            }
        }
    }

    let full = num_subsets - 1;
    let mut best_end = NONE;
    let mut best_length = f64::INFINITY;
    for i in 1..n {
        let candidate = dp[idx(full, i)] + matrix.get(i, 0);
        if candidate < best_length {
            best_length = candidate;
            best_end = i;
        }
    }

    if best_end == NONE || best_length.is_infinite() {
        return Err(TourError::disconnected(
            "Held-Karp found no finite closed tour over the full point set",
        ));
    }

    let mut order = Vec::with_capacity(n);
    let mut subset = full;
    let mut node = best_end;
    while node != NONE {
        order.push(node);
        let prev_subset = subset & !(1 << node);
        let prev_node = parent[idx(subset, node)];
        subset = prev_subset;
        node = prev_node;
    }
    order.reverse();

    let tour_ids = order.iter().map(|&i| point_ids[i]).collect();
    Ok(SolveResult {
        tour_ids,
        tour_length: best_length,
        telemetry: Telemetry::HeldKarp(HeldKarpTelemetry { states_filled }),
    })
}

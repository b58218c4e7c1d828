/*!
# TSP Solvers

Three interchangeable solvers over a [`CostMatrix`]: [`exhaustive`],
[`heldkarp`], and [`greedy2opt`]. All three share the same contract
(spec §4.5): given `(D, point_ids)`, return a tour starting at
`point_ids[0]`, its length, and algorithm-specific telemetry.
*/

pub mod exhaustive;
pub mod greedy2opt;
pub mod heldkarp;

use crate::core::error::{Result, TourError};
use crate::matrix::CostMatrix;

/// Which solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Exhaustive,
    HeldKarp,
    GreedyTwoOpt,
}

/// Per-algorithm telemetry, returned alongside every tour.
#[derive(Debug, Clone, PartialEq)]
pub enum Telemetry {
    Exhaustive(exhaustive::ExhaustiveTelemetry),
    HeldKarp(heldkarp::HeldKarpTelemetry),
    GreedyTwoOpt(greedy2opt::GreedyTwoOptTelemetry),
}

/// A solved tour: point-id permutation, total length, and telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub tour_ids: Vec<i64>,
    pub tour_length: f64,
    pub telemetry: Telemetry,
}

/// Validates the common preconditions every solver shares: non-empty
/// input and a fully connected matrix.
///
/// # Errors
///
/// [`TourError::EmptyInput`] if `point_ids` is empty, [`TourError::Disconnected`]
/// if `matrix` has any unreachable (`+∞`) pair.
pub(crate) fn check_common_preconditions(matrix: &CostMatrix, point_ids: &[i64]) -> Result<()> {
    if point_ids.is_empty() {
        return Err(TourError::empty_input("solver invoked with zero points"));
    }
    for (_, _, distance) in matrix.upper_triangle() {
        if distance.is_infinite() {
            return Err(TourError::disconnected(
                "cost matrix contains an unreachable pair; no tour exists",
            ));
        }
    }
    Ok(())
}

/// Dispatches to the requested solver.
pub fn solve(algorithm: Algorithm, matrix: &CostMatrix, point_ids: &[i64]) -> Result<SolveResult> {
    match algorithm {
        Algorithm::Exhaustive => exhaustive::solve(matrix, point_ids),
        Algorithm::HeldKarp => heldkarp::solve(matrix, point_ids),
        Algorithm::GreedyTwoOpt => greedy2opt::solve(matrix, point_ids),
    }
}

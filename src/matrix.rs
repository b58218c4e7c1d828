/*!
# Cost Matrix Builder

Fills an n×n symmetric matrix of inter-point shortest-path distances using
the [`crate::paths`] oracle, plus a validation pass that inspects the
result for the invariants solvers depend on.
*/

use crate::graph::RoadGraph;
use crate::paths::shortest_path;
use crate::snap::SnappedPoint;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A square matrix of shortest-path distances in meters, row-major.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    pub n: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    fn zeroed(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.n + j] = value;
    }

    /// Builds a matrix directly from a dense row-major grid, for callers
    /// (and tests) that already have distances in hand rather than a graph
    /// to query. Panics if the grid isn't square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let n = rows.len();
        let mut matrix = Self::zeroed(n);
        for (i, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), n, "cost matrix rows must all have length n");
            for (j, value) in row.into_iter().enumerate() {
                matrix.set(i, j, value);
            }
        }
        matrix
    }

    /// Every off-diagonal, upper-triangle `(i, j, distance)` entry.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n).flat_map(move |i| ((i + 1)..self.n).map(move |j| (i, j, self.get(i, j))))
    }
}

/// Builds the symmetric cost matrix for an ordered list of snapped points.
/// The diagonal is always `0.0`. With the `parallel` feature enabled, the
/// upper triangle is filled with `rayon` instead of a serial loop; both
/// code paths produce identical results since each cell's shortest-path
/// query is independent of every other.
pub fn build_cost_matrix(graph: &RoadGraph, points: &[SnappedPoint]) -> CostMatrix {
    let n = points.len();
    let mut matrix = CostMatrix::zeroed(n);
    if n < 2 {
        return matrix;
    }

    let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))).collect();

    #[cfg(feature = "parallel")]
    let results: Vec<((usize, usize), f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let length = shortest_path(graph, points[i].snapped, points[j].snapped).length_m;
            ((i, j), length)
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<((usize, usize), f64)> = pairs
        .iter()
        .map(|&(i, j)| {
            let length = shortest_path(graph, points[i].snapped, points[j].snapped).length_m;
            ((i, j), length)
        })
        .collect();

    for ((i, j), length) in results {
        matrix.set(i, j, length);
        matrix.set(j, i, length);
    }

    matrix
}

/// Result of inspecting a [`CostMatrix`] for the invariants downstream
/// solvers rely on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixValidation {
    pub is_symmetric: bool,
    pub diagonal_zero: bool,
    pub has_negative: bool,
    pub has_infinite: bool,
    pub min_off_diagonal: f64,
    pub max_off_diagonal: f64,
    pub avg_off_diagonal: f64,
}

/// Floating-point tolerance for the symmetry check.
const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// Inspects a cost matrix, reporting symmetry, diagonal, sign, and
/// finiteness properties plus summary statistics of its off-diagonal
/// finite entries.
pub fn validate_matrix(matrix: &CostMatrix) -> MatrixValidation {
    let n = matrix.n;
    let mut is_symmetric = true;
    let mut diagonal_zero = true;
    let mut has_negative = false;
    let mut has_infinite = false;
    let mut min_off_diagonal = f64::INFINITY;
    let mut max_off_diagonal = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for i in 0..n {
        if matrix.get(i, i) != 0.0 {
            diagonal_zero = false;
        }
        for j in 0..n {
            if i == j {
                continue;
            }
            let value = matrix.get(i, j);
            if (value - matrix.get(j, i)).abs() > SYMMETRY_TOLERANCE {
                is_symmetric = false;
            }
            if value.is_sign_negative() && value != 0.0 {
                has_negative = true;
            }
            if value.is_infinite() {
                has_infinite = true;
                continue;
            }
            min_off_diagonal = min_off_diagonal.min(value);
            max_off_diagonal = max_off_diagonal.max(value);
            sum += value;
            count += 1;
        }
    }

    let avg_off_diagonal = if count > 0 { sum / count as f64 } else { 0.0 };
    if count == 0 {
        min_off_diagonal = 0.0;
        max_off_diagonal = 0.0;
    }

    MatrixValidation {
        is_symmetric,
        diagonal_zero,
        has_negative,
        has_infinite,
        min_off_diagonal,
        max_off_diagonal,
        avg_off_diagonal,
    }
}

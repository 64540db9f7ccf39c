use crate::math::grid::Grid;

pub struct LinearLoss;

impl LinearLoss {
    /// Signed per-cell error: expected - actual
    pub fn cell(expected: f64, actual: f64) -> f64 {
        expected - actual
    }

    /// Sum of absolute per-cell errors over two equally shaped grids.
    /// Cells outside the smaller grid are ignored.
    pub fn total_abs(expected: &Grid, actual: &Grid) -> f64 {
        expected
            .data
            .iter()
            .zip(actual.data.iter())
            .flat_map(|(e, a)| e.iter().zip(a.iter()))
            .map(|(&e, &a)| LinearLoss::cell(e, a).abs())
            .sum()
    }
}

pub struct MseLoss;

impl MseLoss {
    /// Per-cell squared error: 0.5 * (expected - actual)²
    pub fn cell(expected: f64, actual: f64) -> f64 {
        0.5 * (expected - actual).powi(2)
    }
}

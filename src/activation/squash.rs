use serde::{Deserialize, Serialize};
use std::f64::consts::E;

/// Bounded, monotonic squashing curves used by firing and by both
/// learning rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Squash {
    /// `1 / (1 + e^-x)`, range (0, 1).
    Logistic,
    /// `x / sqrt(1 + x²)`, range (-1, 1). Odd, so the sign of `x` survives.
    Algebraic,
}

impl Squash {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Squash::Logistic => 1.0 / (1.0 + E.powf(-x)),
            Squash::Algebraic => x / (1.0 + x * x).sqrt(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Which way a neuron's weights should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Increase => 1.0,
            Direction::Decrease => -1.0,
        }
    }
}

/// Error carried by one neuron during a proportional adjustment pass.
///
/// Sign and size are kept apart: `magnitude` is never negative once
/// `normalize` has run, and `direction` holds the sign. Summing several
/// downstream contributions therefore cannot cancel out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronError {
    pub direction: Direction,
    pub magnitude: f64,
    /// Raw weight summed over the neuron's incoming connections when the
    /// error was recorded.
    pub total_weight: f64,
}

impl NeuronError {
    /// Zero error pointing up.
    pub fn new(total_weight: f64) -> NeuronError {
        NeuronError {
            direction: Direction::Increase,
            magnitude: 0.0,
            total_weight,
        }
    }

    /// Moves a negative magnitude's sign into `direction`.
    pub fn normalize(&mut self) {
        if self.magnitude < 0.0 {
            self.direction = Direction::Decrease;
            self.magnitude = -self.magnitude;
        }
    }
}

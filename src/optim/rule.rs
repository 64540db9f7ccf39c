use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::math::grid::Grid;
use crate::network::network::Network;
use crate::optim::delta_rule::DeltaRule;
use crate::optim::proportional::Proportional;
use crate::optim::strategy::LearningStrategy;

/// Selects which learning strategy the training loop uses.
///
/// - `Proportional` — error-proportional adjustment with sign/magnitude
///   separation; `gain` scales every step.
/// - `DeltaRule`    — delta rule on actual vs. target potential.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LearningRule {
    Proportional { gain: f64 },
    DeltaRule { learning_rate: f64 },
}

impl Default for LearningRule {
    fn default() -> Self {
        LearningRule::DeltaRule { learning_rate: 0.1 }
    }
}

impl LearningStrategy for LearningRule {
    fn adjust(&self, network: &mut Network, expected: &Grid) -> Result<(), NetworkError> {
        match *self {
            LearningRule::Proportional { gain } => {
                Proportional::new(gain).adjust(network, expected)
            }
            LearningRule::DeltaRule { learning_rate } => {
                DeltaRule::new(learning_rate).adjust(network, expected)
            }
        }
    }
}

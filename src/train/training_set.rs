use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::math::grid::Grid;

/// One labelled input with its relative sampling weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub input: Grid,
    pub expected: Grid,
    weight: f64,
}

impl TrainingExample {
    /// Fails with `InvalidWeight` for negative or non-finite weights.
    pub fn new(input: Grid, expected: Grid, weight: f64) -> Result<TrainingExample, NetworkError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(NetworkError::InvalidWeight(weight));
        }
        Ok(TrainingExample {
            input,
            expected,
            weight,
        })
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Ordered, weighted collection of examples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    examples: Vec<TrainingExample>,
}

impl TrainingSet {
    pub fn new(examples: Vec<TrainingExample>) -> TrainingSet {
        TrainingSet { examples }
    }

    pub fn push(&mut self, example: TrainingExample) {
        self.examples.push(example);
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn total_weight(&self) -> f64 {
        self.examples.iter().map(|e| e.weight).sum()
    }

    /// Draws an example with probability proportional to its weight.
    ///
    /// Walks the examples in order with a running weight and takes the first
    /// whose cumulative share exceeds a uniform draw in `[0, 1)`, falling back
    /// to the last example.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&TrainingExample, NetworkError> {
        let last = self.examples.last().ok_or(NetworkError::EmptyTrainingSet)?;
        let total = self.total_weight();
        if total == 0.0 {
            return Err(NetworkError::ZeroTotalWeight);
        }

        let pick = rng.gen::<f64>();
        let mut running = 0.0;
        for example in &self.examples {
            running += example.weight;
            if running / total > pick {
                return Ok(example);
            }
        }

        Ok(last)
    }
}

pub mod delta_rule;
pub mod neuron_error;
pub mod proportional;
pub mod rule;
pub mod strategy;

pub use delta_rule::DeltaRule;
pub use neuron_error::{Direction, NeuronError};
pub use proportional::Proportional;
pub use rule::LearningRule;
pub use strategy::{back_propagate, LearningStrategy, PropagationRule};

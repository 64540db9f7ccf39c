use crate::error::NetworkError;
use crate::graph::Graph;
use crate::layers::layer::Layer;
use crate::math::grid::Grid;
use crate::network::network::Network;

/// Per-connection math of a backward pass.
///
/// The traversal itself lives in `back_propagate`: it seeds one signal per
/// output neuron, then hands every adjacent layer pair to `adjust_layer`,
/// from the output backwards, feeding each call's result into the next.
pub trait PropagationRule {
    /// What one layer passes to the layer before it, one value per neuron.
    type Signal;

    /// Signals for the output layer, row-major. `expected` already has the
    /// output layer's shape.
    fn seed(&self, network: &Network, expected: &Grid) -> Vec<Self::Signal>;

    /// Adjusts every connection from `upstream` into `downstream`, given the
    /// downstream signals, and returns the signals for `upstream`.
    fn adjust_layer(
        &self,
        graph: &mut Graph,
        upstream: &Layer,
        downstream: &Layer,
        signals: &[Self::Signal],
    ) -> Vec<Self::Signal>;
}

/// A backward pass that moves connection weights toward `expected`.
pub trait LearningStrategy {
    fn adjust(&self, network: &mut Network, expected: &Grid) -> Result<(), NetworkError>;
}

impl<R: PropagationRule> LearningStrategy for R {
    fn adjust(&self, network: &mut Network, expected: &Grid) -> Result<(), NetworkError> {
        back_propagate(self, network, expected)
    }
}

/// Runs `rule` over `network`, output layer first. Incoming weights of the
/// input layer are never touched (it has none).
pub fn back_propagate<R: PropagationRule + ?Sized>(
    rule: &R,
    network: &mut Network,
    expected: &Grid,
) -> Result<(), NetworkError> {
    let output = *network.layers().last().ok_or(NetworkError::EmptyNetwork)?;
    output.check_shape(expected)?;

    let mut signals = rule.seed(network, expected);
    let layers = network.layers().to_vec();
    for pair in layers.windows(2).rev() {
        signals = rule.adjust_layer(network.graph_mut(), &pair[0], &pair[1], &signals);
    }

    Ok(())
}

use crate::activation::squash::Squash;
use crate::graph::Graph;
use crate::layers::layer::Layer;
use crate::math::grid::Grid;
use crate::network::network::Network;
use crate::optim::strategy::PropagationRule;

/// Delta-rule weight adjustment keyed on actual vs. target potential.
///
/// For a connection into a neuron with target `t`:
/// `delta = learning_rate * (t - target.potential) * squash(weight + source.bias)`.
/// The delta is added to the weight and summed per source neuron; those sums
/// become the targets of the layer before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaRule {
    pub learning_rate: f64,
    pub squash: Squash,
}

impl Default for DeltaRule {
    fn default() -> Self {
        DeltaRule {
            learning_rate: 0.1,
            squash: Squash::Logistic,
        }
    }
}

impl DeltaRule {
    pub fn new(learning_rate: f64) -> DeltaRule {
        DeltaRule {
            learning_rate,
            ..DeltaRule::default()
        }
    }
}

impl PropagationRule for DeltaRule {
    /// Target value of each neuron.
    type Signal = f64;

    fn seed(&self, network: &Network, expected: &Grid) -> Vec<f64> {
        network
            .output_layer()
            .neurons_indexed()
            .map(|(row, col, _)| expected.get(row, col))
            .collect()
    }

    fn adjust_layer(
        &self,
        graph: &mut Graph,
        upstream: &Layer,
        downstream: &Layer,
        signals: &[f64],
    ) -> Vec<f64> {
        // Every upstream neuron gets a target, zero if nothing flows back to it.
        let mut targets = vec![0.0; upstream.len()];

        for (id, &target_value) in downstream.neurons().zip(signals) {
            for conn_id in graph.neuron(id).incoming().to_vec() {
                let conn = graph.connection(conn_id);
                let source = graph.neuron(conn.source);
                let actual = graph.neuron(conn.target).potential;
                let delta = self.learning_rate
                    * (target_value - actual)
                    * self.squash.apply(conn.weight + source.bias);

                if let Some(i) = upstream.index_of(conn.source) {
                    targets[i] += delta;
                }
                graph.connection_mut(conn_id).weight += delta;
            }
        }

        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::config::NetworkConfig;
    use crate::optim::strategy::LearningStrategy;
    use crate::{ConnectionId, NetworkError};

    #[test]
    fn seeds_targets_in_row_major_order() {
        let mut network = Network::with_seed(NetworkConfig::default(), 1);
        network.add_layer(2, 3);

        let expected = Grid::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let targets = DeltaRule::default().seed(&network, &expected);
        assert_eq!(targets, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn single_step_matches_formula() {
        let mut network = Network::with_seed(NetworkConfig::default(), 2);
        network.add_layer(1, 2).add_layer(1, 1);
        network.run(&Grid::from([[1.0, 1.0]])).unwrap();

        let output = network.output_at(0, 0);
        let before: Vec<f64> =
            (0..2).map(|i| network.graph().connection(ConnectionId(i)).weight).collect();

        DeltaRule::new(0.5).adjust(&mut network, &Grid::from([[0.0]])).unwrap();

        for (i, old) in before.iter().enumerate() {
            let expected = old + 0.5 * (0.0 - output) * Squash::Logistic.apply(old + 1.0);
            assert_eq!(network.graph().connection(ConnectionId(i)).weight, expected);
        }
    }

    #[test]
    fn pulls_output_toward_target() {
        let mut network = Network::with_seed(NetworkConfig::default(), 3);
        network.add_layer(3, 3).add_layer(3, 3).add_layer(2, 2);
        let input = Grid::filled(3, 3, 0.5);
        let expected = Grid::from([[0.25, 0.5], [0.75, 1.0]]);

        network.run(&input).unwrap();
        let before = crate::LinearLoss::total_abs(&expected, &network.output());

        for _ in 0..50 {
            network.run(&input).unwrap();
            DeltaRule::default().adjust(&mut network, &expected).unwrap();
        }
        network.run(&input).unwrap();
        let after = crate::LinearLoss::total_abs(&expected, &network.output());

        assert!(after < before, "error grew from {before} to {after}");
    }

    #[test]
    fn empty_network_is_rejected() {
        let mut network = Network::new(NetworkConfig::default());
        assert_eq!(
            DeltaRule::default().adjust(&mut network, &Grid::zeros(1, 1)),
            Err(NetworkError::EmptyNetwork)
        );
    }

    #[test]
    fn hidden_targets_are_the_summed_output_deltas() {
        let mut network = Network::with_seed(NetworkConfig::default(), 5);
        network.add_layer(1, 2).add_layer(1, 2).add_layer(1, 1);
        network.run(&Grid::from([[0.3, 0.9]])).unwrap();

        let graph = network.graph();
        let weight = |i: usize| graph.connection(ConnectionId(i)).weight;
        let input = network.input_layer().neurons().collect::<Vec<_>>();
        let hidden = network.layers()[1].neurons().collect::<Vec<_>>();
        let output = network.output_layer().neuron_at(0, 0);
        let squash = |w: f64, source: crate::NeuronId| {
            Squash::Logistic.apply(w + graph.neuron(source).bias)
        };

        // Ids 0..4 wire input to hidden source-major, 4 and 5 wire hidden to output.
        let output_potential = graph.neuron(output).potential;
        let hidden_deltas: Vec<f64> = (0..2)
            .map(|h| 0.2 * (0.5 - output_potential) * squash(weight(4 + h), hidden[h]))
            .collect();
        let mut expected_weights: Vec<f64> = (0..6).map(weight).collect();
        for h in 0..2 {
            expected_weights[4 + h] += hidden_deltas[h];
        }
        for h in 0..2 {
            let actual = graph.neuron(hidden[h]).potential;
            for a in 0..2 {
                let id = a * 2 + h;
                expected_weights[id] +=
                    0.2 * (hidden_deltas[h] - actual) * squash(weight(id), input[a]);
            }
        }

        DeltaRule::new(0.2).adjust(&mut network, &Grid::from([[0.5]])).unwrap();

        let adjusted: Vec<f64> =
            (0..6).map(|i| network.graph().connection(ConnectionId(i)).weight).collect();
        assert_eq!(adjusted, expected_weights);
    }
}

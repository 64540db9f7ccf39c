use crate::activation::squash::Squash;
use crate::graph::Graph;
use crate::layers::layer::Layer;
use crate::loss::mse::MseLoss;
use crate::math::grid::Grid;
use crate::network::network::Network;
use crate::optim::neuron_error::{Direction, NeuronError};
use crate::optim::strategy::PropagationRule;

/// Error-proportional weight adjustment.
///
/// Each connection takes a share of its target's error equal to its share of
/// the target's total incoming weight at the moment it is adjusted. The
/// squashed error, scaled by that share and by `gain`, is both applied to the
/// weight (in the target error's direction) and accumulated as the source
/// neuron's own error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportional {
    pub gain: f64,
    pub squash: Squash,
}

impl Default for Proportional {
    fn default() -> Self {
        Proportional {
            gain: 0.1,
            squash: Squash::Algebraic,
        }
    }
}

impl Proportional {
    pub fn new(gain: f64) -> Proportional {
        Proportional {
            gain,
            ..Proportional::default()
        }
    }

    /// Error of every output neuron against `expected`, row-major.
    ///
    /// Callers must have checked `expected` against the output layer's shape.
    pub fn output_error(&self, network: &Network, expected: &Grid) -> Vec<NeuronError> {
        let graph = network.graph();
        network
            .output_layer()
            .neurons_indexed()
            .map(|(row, col, id)| {
                let target = expected.get(row, col);
                let potential = graph.neuron(id).potential;
                NeuronError {
                    direction: if target >= potential {
                        Direction::Increase
                    } else {
                        Direction::Decrease
                    },
                    magnitude: MseLoss::cell(target, potential),
                    total_weight: graph.total_input_weight(id),
                }
            })
            .collect()
    }
}

impl PropagationRule for Proportional {
    type Signal = NeuronError;

    fn seed(&self, network: &Network, expected: &Grid) -> Vec<NeuronError> {
        self.output_error(network, expected)
    }

    fn adjust_layer(
        &self,
        graph: &mut Graph,
        upstream: &Layer,
        downstream: &Layer,
        signals: &[NeuronError],
    ) -> Vec<NeuronError> {
        let mut errors = Vec::with_capacity(upstream.len());

        for id in upstream.neurons() {
            let mut error = NeuronError::new(graph.total_input_weight(id));

            for conn_id in graph.neuron(id).outgoing().to_vec() {
                let conn = graph.connection(conn_id);
                let Some(downstream_error) = downstream.index_of(conn.target).map(|i| signals[i])
                else {
                    continue;
                };

                // Share of the target's current incoming weight, which already
                // includes steps taken earlier in this pass. A target with no
                // incoming weight takes no adjustment.
                let target_weight = graph.total_input_weight(conn.target);
                let proportional_weight = if target_weight == 0.0 {
                    0.0
                } else {
                    conn.weight / target_weight
                };
                let step =
                    self.gain * proportional_weight * self.squash.apply(downstream_error.magnitude);

                error.magnitude += step;
                graph.connection_mut(conn_id).weight += step * downstream_error.direction.sign();
            }

            error.normalize();
            errors.push(error);
        }

        errors
    }
}

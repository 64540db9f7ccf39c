use serde::{Deserialize, Serialize};

use crate::activation::squash::Squash;
use crate::graph::neuron::{Neuron, NeuronId};
use crate::network::config::{FiringMode, NetworkConfig};

/// Stable index of a connection inside its `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub usize);

/// Directed, weighted edge between two neurons.
///
/// Both endpoints hold this connection's id (source in `outgoing`, target in
/// `incoming`), so there is exactly one record per edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: NeuronId,
    pub target: NeuronId,
    pub weight: f64,
    count: u32,
}

impl Connection {
    pub fn new(source: NeuronId, target: NeuronId, weight: f64) -> Connection {
        Connection {
            source,
            target,
            weight,
            count: 1,
        }
    }

    /// Discrete connection strength; only read by `FiringMode::Discrete`.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn set_count(&mut self, count: u32) {
        self.count = count;
    }

    pub fn strengthen(&mut self, step: u32) {
        self.count = self.count.saturating_add(step);
    }

    /// Never drops below `minimum`.
    pub fn weaken(&mut self, step: u32, minimum: u32) {
        self.count = self.count.saturating_sub(step).max(minimum);
    }

    /// Signed contribution of this edge, without touching any state.
    pub fn intensity(&self, neurons: &[Neuron], mode: FiringMode) -> f64 {
        let polarity = neurons[self.source.0].kind().polarity();
        match mode {
            FiringMode::Continuous => polarity * self.weight,
            FiringMode::Discrete => polarity * self.count as f64 * self.weight,
        }
    }

    /// Pushes potential into the target when the source is at or above the
    /// threshold. Returns whether the edge fired.
    ///
    /// # Panics
    /// Panics if the target potential becomes NaN or infinite; the weights
    /// have diverged and continuing would only corrupt the network further.
    pub fn fire(&self, neurons: &mut [Neuron], config: &NetworkConfig) -> bool {
        let source = &neurons[self.source.0];
        if source.potential < config.potential_threshold {
            return false;
        }

        let contribution = match config.firing {
            FiringMode::Continuous => Squash::Logistic.apply(self.weight + source.bias),
            FiringMode::Discrete => self.intensity(neurons, FiringMode::Discrete),
        };

        let target = &mut neurons[self.target.0];
        target.potential += contribution;

        if !target.potential.is_finite() {
            panic!(
                "potential of neuron {} became {} after firing from neuron {} (weight {})",
                self.target.0, target.potential, self.source.0, self.weight
            );
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::neuron::NeuronKind;

    fn pair(source_kind: NeuronKind) -> Vec<Neuron> {
        vec![
            Neuron::new(source_kind, 1.0),
            Neuron::new(NeuronKind::Excitatory, 1.0),
        ]
    }

    fn config(threshold: f64, firing: FiringMode) -> NetworkConfig {
        NetworkConfig {
            potential_threshold: threshold,
            firing,
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn intensity_follows_source_polarity() {
        let conn = Connection::new(NeuronId(0), NeuronId(1), 0.1);

        let excitatory = pair(NeuronKind::Excitatory);
        assert_eq!(conn.intensity(&excitatory, FiringMode::Continuous), 0.1);

        let inhibitory = pair(NeuronKind::Inhibitory);
        assert_eq!(conn.intensity(&inhibitory, FiringMode::Continuous), -0.1);
    }

    #[test]
    fn discrete_intensity_scales_with_count() {
        let mut conn = Connection::new(NeuronId(0), NeuronId(1), 0.5);
        conn.strengthen(2);

        let inhibitory = pair(NeuronKind::Inhibitory);
        assert_eq!(conn.intensity(&inhibitory, FiringMode::Discrete), -1.5);
    }

    #[test]
    fn does_not_fire_below_threshold() {
        let mut neurons = pair(NeuronKind::Excitatory);
        let conn = Connection::new(NeuronId(0), NeuronId(1), 0.1);

        assert!(!conn.fire(&mut neurons, &config(0.5, FiringMode::Continuous)));
        assert_eq!(neurons[1].potential, 0.0);
    }

    #[test]
    fn fires_at_threshold_with_squashed_weight() {
        let mut neurons = pair(NeuronKind::Excitatory);
        neurons[0].potential = 0.5;
        let conn = Connection::new(NeuronId(0), NeuronId(1), 0.1);

        assert!(conn.fire(&mut neurons, &config(0.5, FiringMode::Continuous)));
        assert_eq!(neurons[1].potential, Squash::Logistic.apply(0.1 + 1.0));
    }

    #[test]
    fn discrete_fire_subtracts_for_inhibitory_source() {
        let mut neurons = pair(NeuronKind::Inhibitory);
        let conn = Connection::new(NeuronId(0), NeuronId(1), 0.25);

        assert!(conn.fire(&mut neurons, &config(0.0, FiringMode::Discrete)));
        assert_eq!(neurons[1].potential, -0.25);
    }

    #[test]
    fn weaken_clamps_at_minimum() {
        let mut conn = Connection::new(NeuronId(0), NeuronId(1), 0.1);
        conn.weaken(1, 0);
        conn.weaken(1, 0);
        assert_eq!(conn.count(), 0);

        conn.strengthen(5);
        conn.weaken(3, 1);
        assert_eq!(conn.count(), 2);
    }

    #[test]
    #[should_panic(expected = "became")]
    fn non_finite_potential_aborts() {
        let mut neurons = pair(NeuronKind::Excitatory);
        neurons[1].potential = f64::MAX;
        let conn = Connection::new(NeuronId(0), NeuronId(1), f64::MAX);

        conn.fire(&mut neurons, &config(0.0, FiringMode::Discrete));
    }
}

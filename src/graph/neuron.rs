use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::connection::ConnectionId;

/// Stable index of a neuron inside its `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NeuronId(pub usize);

/// Polarity of a neuron's outgoing contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuronKind {
    Excitatory,
    Inhibitory,
}

impl NeuronKind {
    /// Inhibitory with probability `inhibitory_density`, excitatory otherwise.
    pub fn sample<R: Rng + ?Sized>(inhibitory_density: f64, rng: &mut R) -> NeuronKind {
        if rng.gen::<f64>() < inhibitory_density {
            NeuronKind::Inhibitory
        } else {
            NeuronKind::Excitatory
        }
    }

    /// `1.0` for excitatory, `-1.0` for inhibitory.
    pub fn polarity(&self) -> f64 {
        match self {
            NeuronKind::Excitatory => 1.0,
            NeuronKind::Inhibitory => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    pub potential: f64,
    pub bias: f64,
    kind: NeuronKind,
    /// Simulated time step of the last successful fire.
    pub fired_at: Option<f64>,
    pub(crate) incoming: Vec<ConnectionId>,
    pub(crate) outgoing: Vec<ConnectionId>,
}

impl Neuron {
    pub fn new(kind: NeuronKind, bias: f64) -> Neuron {
        Neuron {
            potential: 0.0,
            bias,
            kind,
            fired_at: None,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn kind(&self) -> NeuronKind {
        self.kind
    }

    pub fn incoming(&self) -> &[ConnectionId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[ConnectionId] {
        &self.outgoing
    }

    /// `bias + potential`.
    pub fn output(&self) -> f64 {
        self.bias + self.potential
    }

    /// Copy of the neuron's state with no connections; the owning network
    /// rebuilds topology itself.
    pub fn detached(&self) -> Neuron {
        Neuron {
            potential: self.potential,
            bias: self.bias,
            kind: self.kind,
            fired_at: self.fired_at,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_adds_bias_to_potential() {
        let mut neuron = Neuron::new(NeuronKind::Excitatory, 1.0);
        neuron.potential = 0.25;
        assert_eq!(neuron.output(), 1.25);
    }

    #[test]
    fn detached_copy_drops_connections_only() {
        let mut neuron = Neuron::new(NeuronKind::Inhibitory, 1.0);
        neuron.potential = 0.7;
        neuron.fired_at = Some(3.0);
        neuron.incoming.push(ConnectionId(0));
        neuron.outgoing.push(ConnectionId(1));

        let copy = neuron.detached();
        assert_eq!(copy.kind(), NeuronKind::Inhibitory);
        assert_eq!(copy.potential, 0.7);
        assert_eq!(copy.fired_at, Some(3.0));
        assert!(copy.incoming().is_empty());
        assert!(copy.outgoing().is_empty());
    }
}

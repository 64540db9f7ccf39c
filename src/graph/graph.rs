use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::graph::connection::{Connection, ConnectionId};
use crate::graph::neuron::{Neuron, NeuronId};
use crate::network::config::{FiringMode, NetworkConfig};

/// Arena owning every neuron and connection of a network.
///
/// Connections refer to neurons by index, so the structure has no ownership
/// cycles and ids stay valid for the lifetime of the graph (nothing is ever
/// removed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    neurons: Vec<Neuron>,
    connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn add_neuron(&mut self, neuron: Neuron) -> NeuronId {
        self.neurons.push(neuron);
        NeuronId(self.neurons.len() - 1)
    }

    /// Creates a `source -> target` edge and registers it on both ends.
    /// Multiple edges between the same pair are allowed.
    pub fn connect(&mut self, source: NeuronId, target: NeuronId, weight: f64) -> ConnectionId {
        let id = ConnectionId(self.connections.len());
        self.connections.push(Connection::new(source, target, weight));
        self.neurons[source.0].outgoing.push(id);
        self.neurons[target.0].incoming.push(id);
        id
    }

    /// `connect` with the configured default weight.
    pub fn connect_default(
        &mut self,
        source: NeuronId,
        target: NeuronId,
        config: &NetworkConfig,
    ) -> ConnectionId {
        self.connect(source, target, config.connection_weight)
    }

    /// Raises the discrete count of `id` by the configured step.
    pub fn strengthen(&mut self, id: ConnectionId, config: &NetworkConfig) {
        self.connections[id.0].strengthen(config.connection_count_step);
    }

    /// Lowers the discrete count of `id` by the configured step, never below
    /// the configured minimum.
    pub fn weaken(&mut self, id: ConnectionId, config: &NetworkConfig) {
        self.connections[id.0]
            .weaken(config.connection_count_step, config.connection_count_minimum);
    }

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        &self.neurons[id.0]
    }

    pub fn neuron_mut(&mut self, id: NeuronId) -> &mut Neuron {
        &mut self.neurons[id.0]
    }

    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.connections[id.0]
    }

    pub fn connection_mut(&mut self, id: ConnectionId) -> &mut Connection {
        &mut self.connections[id.0]
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn incoming(&self, id: NeuronId) -> impl Iterator<Item = &Connection> + '_ {
        self.neurons[id.0]
            .incoming
            .iter()
            .map(move |c| &self.connections[c.0])
    }

    pub fn outgoing(&self, id: NeuronId) -> impl Iterator<Item = &Connection> + '_ {
        self.neurons[id.0]
            .outgoing
            .iter()
            .map(move |c| &self.connections[c.0])
    }

    /// Fires every outgoing connection of `id`. Each connection re-checks the
    /// source potential against the threshold on its own; if any of them
    /// fired, the neuron records `now` and drops to zero potential.
    ///
    /// A neuron with no outgoing connections never fires.
    pub fn fire_neuron(&mut self, id: NeuronId, config: &NetworkConfig, now: f64) -> bool {
        let outgoing = self.neurons[id.0].outgoing.clone();
        let mut fired = false;
        for conn in outgoing {
            fired = self.connections[conn.0].fire(&mut self.neurons, config) || fired;
        }

        if fired {
            let neuron = &mut self.neurons[id.0];
            neuron.fired_at = Some(now);
            neuron.potential = 0.0;
        }

        fired
    }

    /// Sum of signed intensities over incoming connections.
    pub fn total_input(&self, id: NeuronId, mode: FiringMode) -> f64 {
        self.incoming(id).map(|c| c.intensity(&self.neurons, mode)).sum()
    }

    /// Sum of signed intensities over outgoing connections.
    pub fn total_output(&self, id: NeuronId, mode: FiringMode) -> f64 {
        self.outgoing(id).map(|c| c.intensity(&self.neurons, mode)).sum()
    }

    /// Every connection joins two existing neurons and every neuron lists
    /// exactly the connections that name it as source or target.
    pub fn check_consistency(&self) -> Result<(), NetworkError> {
        for (i, conn) in self.connections.iter().enumerate() {
            if conn.source.0 >= self.neurons.len() || conn.target.0 >= self.neurons.len() {
                return Err(NetworkError::InconsistentTopology(format!(
                    "connection {i} joins missing neurons {} -> {}",
                    conn.source.0, conn.target.0
                )));
            }
            let id = ConnectionId(i);
            if !self.neurons[conn.source.0].outgoing.contains(&id)
                || !self.neurons[conn.target.0].incoming.contains(&id)
            {
                return Err(NetworkError::InconsistentTopology(format!(
                    "connection {i} is not registered on its endpoints"
                )));
            }
        }

        for (i, neuron) in self.neurons.iter().enumerate() {
            let listed = neuron.incoming.iter().map(|c| (c, false));
            let listed = listed.chain(neuron.outgoing.iter().map(|c| (c, true)));
            for (conn, outgoing) in listed {
                let endpoint = self.connections.get(conn.0).map(|c| {
                    if outgoing {
                        c.source.0
                    } else {
                        c.target.0
                    }
                });
                if endpoint != Some(i) {
                    return Err(NetworkError::InconsistentTopology(format!(
                        "neuron {i} lists connection {} that does not touch it",
                        conn.0
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn total_input_weight(&self, id: NeuronId) -> f64 {
        self.incoming(id).map(|c| c.weight).sum()
    }

    pub fn total_output_weight(&self, id: NeuronId) -> f64 {
        self.outgoing(id).map(|c| c.weight).sum()
    }
}

pub mod connection;
pub mod graph;
pub mod neuron;

pub use connection::{Connection, ConnectionId};
pub use graph::Graph;
pub use neuron::{Neuron, NeuronId, NeuronKind};

pub mod activation;
pub mod error;
pub mod graph;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::squash::Squash;
pub use error::NetworkError;
pub use graph::{Connection, ConnectionId, Graph, Neuron, NeuronId, NeuronKind};
pub use layers::layer::{Layer, LayerField};
pub use loss::{linear::LinearLoss, mse::MseLoss};
pub use math::grid::Grid;
pub use network::config::{FiringMode, NetworkConfig};
pub use network::network::{render_layer, Network};
pub use network::spec::{LayerSpec, NetworkSpec};
pub use optim::{
    DeltaRule, Direction, LearningRule, LearningStrategy, NeuronError, Proportional,
    PropagationRule,
};
pub use train::{
    train_loop, train_network, IterationStats, TrainConfig, TrainingExample, TrainingSet,
};

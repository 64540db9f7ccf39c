pub mod config;
pub mod network;
pub mod spec;

pub use config::{FiringMode, NetworkConfig};
pub use network::{render_layer, Network};
pub use spec::{LayerSpec, NetworkSpec};

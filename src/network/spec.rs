use serde::{Deserialize, Serialize};

use crate::network::config::NetworkConfig;
use crate::network::network::Network;

/// Shape of one layer in a network specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub width: usize,
    pub height: usize,
}

/// A fully serializable description of a network: layer shapes (input
/// first) plus the tunables it runs with.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of any
/// trained weights, so the same architecture can be rebuilt with fresh or
/// seeded random state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used as the file stem by callers.
    pub name: String,
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub config: NetworkConfig,
}

impl NetworkSpec {
    pub fn build(&self) -> Network {
        self.populate(Network::new(self.config.clone()))
    }

    /// Same seed, same neuron kinds and initial weights.
    pub fn build_with_seed(&self, seed: u64) -> Network {
        self.populate(Network::with_seed(self.config.clone(), seed))
    }

    fn populate(&self, mut network: Network) -> Network {
        for layer in &self.layers {
            network.add_layer(layer.width, layer.height);
        }
        network
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

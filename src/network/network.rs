use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::graph::{Graph, NeuronId};
use crate::layers::layer::{Layer, LayerField};
use crate::math::grid::Grid;
use crate::network::config::NetworkConfig;

/// An ordered stack of fully connected 2D layers.
///
/// Layer `i` is wired to layer `i + 1` as soon as the latter is added. The
/// first layer is the input, the last one the output. A network without
/// layers can be built and grown but not run.
#[derive(Debug, Serialize, Deserialize)]
pub struct Network {
    graph: Graph,
    layers: Vec<Layer>,
    config: NetworkConfig,
    current_time_step: f64,
    debug: bool,
    #[serde(skip, default = "entropy_rng")]
    rng: ChaCha8Rng,
}

fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(rand::thread_rng().gen())
}

impl Network {
    /// Empty network whose neuron kinds and weights come from a fresh seed.
    pub fn new(config: NetworkConfig) -> Network {
        Network::with_rng(config, entropy_rng())
    }

    /// Empty network with reproducible construction.
    pub fn with_seed(config: NetworkConfig, seed: u64) -> Network {
        Network::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// `depth` layers of identical shape.
    pub fn with_layers(
        depth: usize,
        width: usize,
        height: usize,
        config: NetworkConfig,
    ) -> Network {
        let mut network = Network::new(config);
        for _ in 0..depth {
            network.add_layer(width, height);
        }
        network
    }

    fn with_rng(config: NetworkConfig, rng: ChaCha8Rng) -> Network {
        Network {
            graph: Graph::new(),
            layers: Vec::new(),
            config,
            current_time_step: 0.0,
            debug: false,
            rng,
        }
    }

    /// Appends a `width × height` layer and wires the previous tail to it.
    pub fn add_layer(&mut self, width: usize, height: usize) -> &mut Self {
        let layer = Layer::new(&mut self.graph, width, height, &self.config, &mut self.rng);
        if let Some(tail) = self.layers.last() {
            tail.connect(&layer, &mut self.graph, &mut self.rng);
        }
        log::trace!(
            "added {width}x{height} layer, {} neurons and {} connections in total",
            self.graph.neuron_count(),
            self.graph.connection_count()
        );
        self.layers.push(layer);
        self
    }

    /// Forward pass.
    ///
    /// Clears the network, loads `input` straight into the input layer's
    /// potentials and fires every layer but the output, in order. The result
    /// is left in the output layer's potentials (see `output`).
    pub fn run(&mut self, input: &Grid) -> Result<(), NetworkError> {
        let input_layer = *self.layers.first().ok_or(NetworkError::EmptyNetwork)?;
        input_layer.check_shape(input)?;

        self.clear();
        for (row, col, id) in input_layer.neurons_indexed() {
            self.graph.neuron_mut(id).potential = input.get(row, col);
        }

        if self.debug {
            log::debug!("starting run at t={}", self.current_time_step);
        }

        let now = self.current_time_step;
        for layer in &self.layers[..self.layers.len() - 1] {
            if self.debug {
                log::debug!("\n{}", render_layer(&self.graph, layer, LayerField::Potential));
            }

            for id in layer.neurons() {
                self.graph.fire_neuron(id, &self.config, now);
            }
        }

        if self.debug {
            let output = render_layer(&self.graph, self.output_layer(), LayerField::Potential);
            log::debug!("\n{output}");
        }

        self.current_time_step += self.config.time_step_size;
        Ok(())
    }

    /// Zeroes every potential in every layer; topology is kept.
    pub fn clear(&mut self) {
        for layer in &self.layers {
            layer.clear(&mut self.graph);
        }
    }

    /// # Panics
    /// Panics if the network has no layers.
    pub fn input_layer(&self) -> &Layer {
        assert!(!self.layers.is_empty(), "network has no layers");
        &self.layers[0]
    }

    /// # Panics
    /// Panics if the network has no layers.
    pub fn output_layer(&self) -> &Layer {
        assert!(!self.layers.is_empty(), "network has no layers");
        &self.layers[self.layers.len() - 1]
    }

    /// Output layer potentials as a grid.
    ///
    /// # Panics
    /// Panics if the network has no layers.
    pub fn output(&self) -> Grid {
        self.output_layer().potentials(&self.graph)
    }

    /// Potential of the output neuron at `(row, col)`.
    pub fn output_at(&self, row: usize, col: usize) -> f64 {
        self.graph.neuron(self.output_layer().neuron_at(row, col)).potential
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn current_time_step(&self) -> f64 {
        self.current_time_step
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Signed intensity summed over the incoming connections of `id`.
    pub fn total_input(&self, id: NeuronId) -> f64 {
        self.graph.total_input(id, self.config.firing)
    }

    /// Signed intensity summed over the outgoing connections of `id`.
    pub fn total_output(&self, id: NeuronId) -> f64 {
        self.graph.total_output(id, self.config.firing)
    }

    /// Row-by-row dump of `field` for every layer, input first.
    pub fn render(&self, field: LayerField) -> String {
        let body = self
            .layers
            .iter()
            .map(|layer| render_layer(&self.graph, layer, field))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("-----------------------------\n{body}\n-----------------------------")
    }

    /// Serializes the network (topology, weights and state) to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    /// The loaded network draws any further layers from a fresh seed.
    ///
    /// A file whose layers or connections do not line up with its neurons is
    /// rejected with `ErrorKind::InvalidData`.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        network
            .validate()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(network)
    }

    /// Checks that the layers tile the graph's neurons in order, input first,
    /// and that the graph's connection lists agree with each other.
    pub fn validate(&self) -> Result<(), NetworkError> {
        let mut next = 0;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.offset() != next {
                return Err(NetworkError::InconsistentTopology(format!(
                    "layer {i} starts at neuron {} instead of {next}",
                    layer.offset()
                )));
            }
            next += layer.len();
        }
        if next != self.graph.neuron_count() {
            return Err(NetworkError::InconsistentTopology(format!(
                "layers cover {next} neurons but the graph holds {}",
                self.graph.neuron_count()
            )));
        }

        self.graph.check_consistency()
    }
}

impl Clone for Network {
    /// Deep copy that rebuilds every connection between the copied neurons
    /// through an original-to-clone lookup, preserving weight and count.
    fn clone(&self) -> Self {
        let mut graph = Graph::new();
        let mut layers = Vec::with_capacity(self.layers.len());
        let mut clones: Vec<Option<NeuronId>> = vec![None; self.graph.neuron_count()];

        for layer in &self.layers {
            let offset = graph.neuron_count();

            for id in layer.neurons() {
                let copy = graph.add_neuron(self.graph.neuron(id).detached());
                clones[id.0] = Some(copy);

                // Sources always live in an earlier layer, so they are mapped already.
                for conn in self.graph.incoming(id) {
                    if let Some(source) = clones[conn.source.0] {
                        let cloned = graph.connect(source, copy, conn.weight);
                        graph.connection_mut(cloned).set_count(conn.count());
                    }
                }
            }

            layers.push(Layer::from_parts(offset, layer.width, layer.height));
        }

        Network {
            graph,
            layers,
            config: self.config.clone(),
            current_time_step: self.current_time_step,
            debug: self.debug,
            rng: self.rng.clone(),
        }
    }
}

/// Row-by-row text view of one layer, three decimals per value.
pub fn render_layer(graph: &Graph, layer: &Layer, field: LayerField) -> String {
    layer
        .values(graph, field)
        .data
        .iter()
        .map(|row| row.iter().map(|v| format!(" {v:.3}")).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

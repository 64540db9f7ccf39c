use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::graph::{Graph, Neuron, NeuronId, NeuronKind};
use crate::math::grid::Grid;
use crate::network::config::NetworkConfig;

/// Per-neuron quantity shown by the diagnostic dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerField {
    Potential,
    /// Raw weight summed over incoming connections.
    TotalIn,
    /// Raw weight summed over outgoing connections.
    TotalOut,
}

/// A `width × height` block of neurons.
///
/// The neurons occupy the contiguous id range `offset..offset + width * height`
/// of the owning `Graph`, in row-major order: `width` rows of `height`
/// neurons. The shape is fixed once the layer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    offset: usize,
    pub width: usize,
    pub height: usize,
}

impl Layer {
    /// Allocates `width × height` neurons in `graph`, each independently
    /// inhibitory with probability `config.inhibitory_density`.
    pub fn new<R: Rng + ?Sized>(
        graph: &mut Graph,
        width: usize,
        height: usize,
        config: &NetworkConfig,
        rng: &mut R,
    ) -> Layer {
        let offset = graph.neuron_count();
        for _ in 0..width * height {
            let kind = NeuronKind::sample(config.inhibitory_density, rng);
            graph.add_neuron(Neuron::new(kind, config.bias));
        }

        Layer { offset, width, height }
    }

    /// Re-describes neurons that were already allocated contiguously.
    pub(crate) fn from_parts(offset: usize, width: usize, height: usize) -> Layer {
        Layer { offset, width, height }
    }

    /// Id of the first neuron.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(width, height)`, comparable with `Grid::shape`.
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// `RaggedGrid` if the grid's rows disagree with its declared shape,
    /// `ShapeMismatch` if the declared shape is not this layer's.
    pub fn check_shape(&self, grid: &Grid) -> Result<(), NetworkError> {
        if !grid.is_rectangular() {
            return Err(NetworkError::RaggedGrid);
        }
        if grid.shape() != self.shape() {
            return Err(NetworkError::ShapeMismatch {
                expected: self.shape(),
                found: grid.shape(),
            });
        }
        Ok(())
    }

    pub fn neuron_at(&self, row: usize, col: usize) -> NeuronId {
        assert!(row < self.width && col < self.height, "({row}, {col}) is outside the layer");
        NeuronId(self.offset + row * self.height + col)
    }

    /// Row-major position of `id` within this layer, if it belongs here.
    pub fn index_of(&self, id: NeuronId) -> Option<usize> {
        id.0.checked_sub(self.offset).filter(|&i| i < self.len())
    }

    pub fn neurons(&self) -> impl Iterator<Item = NeuronId> {
        (self.offset..self.offset + self.len()).map(NeuronId)
    }

    /// `(row, col, id)` in row-major order, matching `Grid::iter_indexed`.
    pub fn neurons_indexed(&self) -> impl Iterator<Item = (usize, usize, NeuronId)> {
        let height = self.height;
        self.neurons()
            .enumerate()
            .map(move |(i, id)| (i / height, i % height, id))
    }

    /// Zeroes every potential; weights, biases and counts are untouched.
    pub fn clear(&self, graph: &mut Graph) {
        for id in self.neurons() {
            graph.neuron_mut(id).potential = 0.0;
        }
    }

    /// Fully connects this layer to `target`: every neuron here gets one
    /// connection to every neuron there, each with a uniform random weight in
    /// `[0, 1)`.
    pub fn connect<R: Rng + ?Sized>(&self, target: &Layer, graph: &mut Graph, rng: &mut R) {
        for src in self.neurons() {
            for tgt in target.neurons() {
                graph.connect(src, tgt, rng.gen::<f64>());
            }
        }
    }

    pub fn potentials(&self, graph: &Graph) -> Grid {
        self.values(graph, LayerField::Potential)
    }

    pub fn values(&self, graph: &Graph, field: LayerField) -> Grid {
        let mut grid = Grid::zeros(self.width, self.height);
        for (row, col, id) in self.neurons_indexed() {
            let value = match field {
                LayerField::Potential => graph.neuron(id).potential,
                LayerField::TotalIn => graph.total_input_weight(id),
                LayerField::TotalOut => graph.total_output_weight(id),
            };
            grid.set(row, col, value);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn layer(graph: &mut Graph, width: usize, height: usize, density: f64, seed: u64) -> Layer {
        let config = NetworkConfig {
            inhibitory_density: density,
            ..NetworkConfig::default()
        };
        Layer::new(graph, width, height, &config, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn fully_connects_two_layers() {
        let mut graph = Graph::new();
        let a = layer(&mut graph, 5, 5, 0.0, 1);
        let b = layer(&mut graph, 10, 10, 0.0, 2);

        a.connect(&b, &mut graph, &mut ChaCha8Rng::seed_from_u64(3));

        for id in a.neurons() {
            assert_eq!(graph.neuron(id).outgoing().len(), 100);
            assert!(graph.neuron(id).incoming().is_empty());
        }
        for id in b.neurons() {
            assert_eq!(graph.neuron(id).incoming().len(), 25);
            assert!(graph.neuron(id).outgoing().is_empty());
        }
    }

    #[test]
    fn new_connections_get_random_weights() {
        let mut graph = Graph::new();
        let a = layer(&mut graph, 5, 5, 0.0, 1);
        let b = layer(&mut graph, 5, 5, 0.0, 2);
        a.connect(&b, &mut graph, &mut ChaCha8Rng::seed_from_u64(9));

        let weights: Vec<f64> = a
            .neurons()
            .flat_map(|id| graph.outgoing(id).map(|c| c.weight).collect::<Vec<_>>())
            .collect();
        assert!(weights.iter().any(|&w| w != 0.0));
        assert!(weights.iter().all(|w| (0.0..1.0).contains(w)));
    }

    #[test]
    fn inhibitory_share_tracks_density() {
        let mut graph = Graph::new();
        let l = layer(&mut graph, 10, 10, 0.5, 42);

        let inhibitory = l
            .neurons()
            .filter(|&id| graph.neuron(id).kind() == NeuronKind::Inhibitory)
            .count();
        assert!((25..=75).contains(&inhibitory), "got {inhibitory} inhibitory neurons");
    }

    #[test]
    fn clear_zeroes_potentials() {
        let mut graph = Graph::new();
        let l = layer(&mut graph, 5, 5, 0.0, 1);
        for (i, id) in l.neurons().enumerate() {
            graph.neuron_mut(id).potential = i as f64 + 0.5;
        }

        l.clear(&mut graph);

        assert!(l.neurons().all(|id| graph.neuron(id).potential == 0.0));
    }

    #[test]
    fn indexing_is_row_major() {
        let mut graph = Graph::new();
        let _pad = layer(&mut graph, 1, 2, 0.0, 1);
        let l = layer(&mut graph, 3, 2, 0.0, 1);

        assert_eq!(l.shape(), (3, 2));
        assert_eq!(l.neuron_at(0, 0), NeuronId(2));
        assert_eq!(l.neuron_at(2, 1), NeuronId(7));
        assert_eq!(l.index_of(NeuronId(5)), Some(3));
        assert_eq!(l.index_of(NeuronId(1)), None);
        assert_eq!(l.index_of(NeuronId(8)), None);

        let cells: Vec<(usize, usize)> = l.neurons_indexed().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn check_shape_reports_both_shapes() {
        let mut graph = Graph::new();
        let l = layer(&mut graph, 2, 2, 0.0, 1);

        assert!(l.check_shape(&Grid::zeros(2, 2)).is_ok());
        assert_eq!(
            l.check_shape(&Grid::zeros(3, 2)),
            Err(NetworkError::ShapeMismatch {
                expected: (2, 2),
                found: (3, 2)
            })
        );
    }

    #[test]
    fn check_shape_rejects_rows_shorter_than_declared() {
        let mut graph = Graph::new();
        let layer = layer(&mut graph, 2, 2, 0.0, 1);
        let grid = Grid {
            rows: 2,
            cols: 2,
            data: vec![vec![0.5, 0.5], vec![0.5]],
        };

        assert_eq!(layer.check_shape(&grid), Err(NetworkError::RaggedGrid));
    }
}

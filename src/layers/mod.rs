pub mod layer;

pub use layer::{Layer, LayerField};

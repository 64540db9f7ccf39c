pub mod iteration_stats;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;
pub mod training_set;

pub use iteration_stats::IterationStats;
pub use loop_fn::train_loop;
pub use train_config::TrainConfig;
pub use trainer::train_network;
pub use training_set::{TrainingExample, TrainingSet};

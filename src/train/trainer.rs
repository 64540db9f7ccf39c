use crate::{
    error::NetworkError,
    network::network::Network,
    optim::rule::LearningRule,
    train::{loop_fn::train_loop, train_config::TrainConfig, training_set::TrainingSet},
};

/// Trains `network` for `iterations` weighted draws from `set` using `rule`,
/// with no progress channel, no stop flag and a fresh random seed.
///
/// Returns the total absolute output error of the last iteration.
pub fn train_network(
    network: &mut Network,
    set: &TrainingSet,
    rule: LearningRule,
    iterations: usize,
) -> Result<f64, NetworkError> {
    train_loop(network, set, &TrainConfig::new(iterations, rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::grid::Grid;
    use crate::network::config::NetworkConfig;
    use crate::train::training_set::TrainingExample;

    #[test]
    fn zero_iterations_only_validates_the_set() {
        let mut network = Network::with_seed(NetworkConfig::default(), 1);
        network.add_layer(1, 1).add_layer(1, 1);
        let set = TrainingSet::new(vec![
            TrainingExample::new(Grid::zeros(1, 1), Grid::zeros(1, 1), 1.0).unwrap()
        ]);

        let error = train_network(&mut network, &set, LearningRule::default(), 0).unwrap();
        assert_eq!(error, 0.0);
        assert_eq!(network.current_time_step(), 0.0);
    }
}

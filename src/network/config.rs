use serde::{Deserialize, Serialize};

/// How a firing connection turns its weight into target potential.
///
/// Chosen once per network; mixing the two inside one network changes the
/// dynamics in ways neither learning rule accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiringMode {
    /// Adds `logistic(weight + source.bias)`; intensity is `±weight`.
    #[default]
    Continuous,
    /// Adds `count × weight`, negated for inhibitory sources.
    Discrete,
}

/// Tunables threaded through construction and every run.
///
/// Fields:
/// - `potential_threshold`      — a connection fires when its source potential is `>=` this
/// - `inhibitory_density`       — probability that a newly created neuron is inhibitory
/// - `connection_weight`        — weight of connections created without an explicit weight
/// - `bias`                     — bias given to every new neuron
/// - `time_step_size`           — simulated time added by each successful run
/// - `firing`                   — see `FiringMode`
/// - `connection_count_minimum` — floor for `Connection::weaken`
/// - `connection_count_step`    — step for strengthen/weaken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub potential_threshold: f64,
    pub inhibitory_density: f64,
    pub connection_weight: f64,
    pub bias: f64,
    pub time_step_size: f64,
    pub firing: FiringMode,
    pub connection_count_minimum: u32,
    pub connection_count_step: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            // Always fire: continuous neurons.
            potential_threshold: 0.0,
            inhibitory_density: 0.0,
            connection_weight: 0.1,
            bias: 1.0,
            time_step_size: 1.0,
            firing: FiringMode::Continuous,
            connection_count_minimum: 0,
            connection_count_step: 1,
        }
    }
}

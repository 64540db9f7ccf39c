use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::NetworkError;
use crate::loss::linear::LinearLoss;
use crate::math::grid::Grid;
use crate::network::network::Network;
use crate::optim::strategy::LearningStrategy;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainConfig;
use crate::train::training_set::TrainingSet;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on weighted samples from `set` for `config.iterations`
/// iterations and returns the total absolute error seen on the **last
/// completed iteration** (`0.0` if none ran).
///
/// Each iteration runs the sampled example forward, then applies one
/// backward pass of `config.rule` against the example's expected grid.
///
/// # Reporting
/// Every `max(iterations / 100, 1)` iterations, and on the final one, the
/// loop measures the output error, logs it at `debug` level when
/// `config.debug` is set and sends an `IterationStats` on `progress_tx`.
/// With `config.debug` set the network's own debug flag is raised for those
/// iterations only, so their forward runs dump each layer.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `EmptyTrainingSet` / `ZeroTotalWeight` for an unusable set, and any
/// `EmptyNetwork` / `ShapeMismatch` raised by the forward or backward pass.
/// The network is left consistent after every completed iteration.
pub fn train_loop(
    network: &mut Network,
    set: &TrainingSet,
    config: &TrainConfig,
) -> Result<f64, NetworkError> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::thread_rng().gen()),
    };

    // Fail fast on an unusable set even when no iteration will run.
    let mut example = set.pick(&mut rng)?;

    let report_tick = (config.iterations / 100).max(1);
    let resample_every = config.resample_every.max(1);
    let network_debug = network.debug();
    let t_start = Instant::now();
    let mut last_error = 0.0;

    log::info!(
        "training for {} iterations over {} example(s) with {:?}",
        config.iterations,
        set.len(),
        config.rule
    );

    for i in 0..config.iterations {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                log::info!("stop requested after {i} iterations");
                break;
            }
        }

        if i > 0 && i % resample_every == 0 {
            example = set.pick(&mut rng)?;
        }

        let is_last = i + 1 == config.iterations;
        let report = i % report_tick == 0 || is_last;
        network.set_debug(network_debug || (config.debug && report));

        if config.clear_before_run {
            network.clear();
        }

        let result = iterate(network, &example.input, &example.expected, &config.rule);
        network.set_debug(network_debug);
        last_error = result?;

        if report {
            if config.debug {
                log::debug!(
                    "iteration {}/{}: total error {:.3}",
                    i + 1,
                    config.iterations,
                    last_error
                );
            }

            let stats = IterationStats {
                iteration: i,
                total_iterations: config.iterations,
                total_error: last_error,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };

            if let Some(ref tx) = config.progress_tx {
                // If the receiver has been dropped, stop training.
                if tx.send(stats).is_err() {
                    break;
                }
            }
        }
    }

    log::info!("training finished: total error {last_error:.6}");
    Ok(last_error)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One forward run plus one backward pass. Returns the output error measured
/// between the two.
fn iterate<S: LearningStrategy + ?Sized>(
    network: &mut Network,
    input: &Grid,
    expected: &Grid,
    strategy: &S,
) -> Result<f64, NetworkError> {
    network.run(input)?;
    let error = LinearLoss::total_abs(expected, &network.output());
    strategy.adjust(network, expected)?;
    Ok(error)
}

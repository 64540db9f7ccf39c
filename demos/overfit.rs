use std::sync::mpsc;
use std::thread;

use ferrite_neurons::{
    train_loop, Grid, LayerField, LearningRule, Network, NetworkConfig, NetworkError, TrainConfig,
    TrainingExample, TrainingSet,
};

/// Overfits a single example on a 3x3 -> 3x3 -> 2x2 network with the delta
/// rule, printing progress every 1% of the run.
///
/// Run with:
///   RUST_LOG=debug cargo run --example overfit
/// to also see the per-layer dumps of each report iteration.
fn main() -> Result<(), NetworkError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut network = Network::new(NetworkConfig::default());
    network.add_layer(3, 3).add_layer(3, 3).add_layer(2, 2);

    let input = Grid::from([[0.1, 0.9, 1.03], [0.51, 0.5, 0.5], [0.9, 0.85, 0.01]]);
    let expected = Grid::from([[0.25, 0.5], [0.75, 1.0]]);
    let set = TrainingSet::new(vec![TrainingExample::new(input.clone(), expected, 1.0)?]);

    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(20_000, LearningRule::DeltaRule { learning_rate: 0.1 });
    config.debug = true;
    config.progress_tx = Some(tx);

    let printer = thread::spawn(move || {
        for stats in rx {
            if stats.iteration % 2_000 == 0 || stats.iteration + 1 == stats.total_iterations {
                println!(
                    "Iteration {:>5}/{}: total error = {:.6} ({} ms)",
                    stats.iteration + 1,
                    stats.total_iterations,
                    stats.total_error,
                    stats.elapsed_ms
                );
            }
        }
    });

    let error = train_loop(&mut network, &set, &config)?;
    drop(config);
    if printer.join().is_err() {
        log::error!("progress printer panicked");
    }

    network.run(&input)?;
    println!("Final error: {error:.6}");
    println!("{}", network.render(LayerField::Potential));
    Ok(())
}

use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use crate::optim::rule::LearningRule;
use crate::train::iteration_stats::IterationStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `iterations`       — forward + backward passes to perform
/// - `rule`             — learning strategy applied after every forward run
/// - `debug`            — on every report tick (about every 1% of the run,
///                        plus the final iteration) log the error and dump
///                        the network's layers
/// - `resample_every`   — draw a new example every this many iterations;
///                        `1` samples every iteration, `0` is treated as `1`
/// - `clear_before_run` — zero the network before each iteration
/// - `seed`             — seed for example sampling; `None` draws a fresh one
/// - `progress_tx`      — optional channel sender; one `IterationStats` is
///                        sent per report tick. If the receiver is dropped the
///                        loop terminates early.
/// - `stop_flag`        — optional atomic flag; when set to `true` from another
///                        thread the loop stops before the next iteration.
pub struct TrainConfig {
    pub iterations: usize,
    pub rule: LearningRule,
    pub debug: bool,
    pub resample_every: usize,
    pub clear_before_run: bool,
    pub seed: Option<u64>,
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig`: per-iteration sampling, no debug
    /// output, no progress channel and no stop flag.
    pub fn new(iterations: usize, rule: LearningRule) -> Self {
        TrainConfig {
            iterations,
            rule,
            debug: false,
            resample_every: 1,
            clear_before_run: false,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

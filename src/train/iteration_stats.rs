use serde::{Deserialize, Serialize};

/// Convergence snapshot emitted by `train_loop` on every report tick.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `IterationStats` value roughly every 1% of the run and on
/// the final iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// 0-based iteration index.
    pub iteration: usize,
    /// Total iterations requested for this run.
    pub total_iterations: usize,
    /// Sum of absolute per-cell linear errors on this iteration's example,
    /// measured after its forward run.
    pub total_error: f64,
    /// Wall-clock time since the loop started, in milliseconds.
    pub elapsed_ms: u64,
}

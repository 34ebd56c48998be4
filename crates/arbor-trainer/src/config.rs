//! Training configuration.

/// Default number of passes over the training data.
pub const DEFAULT_EPOCHS: usize = 5;

/// Default number of sentences between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Settings for one perceptron training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerConfig {
    /// Passes over the training data. Always run to completion.
    pub epochs: usize,
    /// Shuffle seed. `None` seeds from the system clock.
    pub seed: Option<u64>,
    /// Log progress every this many sentences; `0` disables it.
    pub progress_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            seed: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl TrainerConfig {
    /// Create a new trainer configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of epochs.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Fix the shuffle seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the progress logging interval.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

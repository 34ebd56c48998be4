//! # Arbor Trainer
//!
//! Structured perceptron training for the Arbor dependency parser, model
//! persistence, and the file workflows behind the `arbor` command.

pub mod config;
pub mod data;
pub mod model;
pub mod trainer;

pub use config::TrainerConfig;
pub use data::{prediction_output_path, run_evaluation, run_prediction, PredictionSummary};
pub use model::{ParserModel, FORMAT_VERSION};
pub use trainer::{report_path, run_training, train_sentence, EpochReport, Trainer, TrainingReport};

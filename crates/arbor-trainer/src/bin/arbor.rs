//! Command-line front end: `train`, `test` and `eval`.

use std::path::PathBuf;

use anyhow::Result;
use arbor_trainer::{run_evaluation, run_prediction, run_training, TrainerConfig};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Train and run a projective dependency parser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model on a CoNLL treebank
    Train {
        /// Training data
        #[arg(short, long)]
        train_file: PathBuf,

        /// Where to write the model
        #[arg(short, long)]
        model: PathBuf,

        /// Passes over the training data
        #[arg(short, long, default_value_t = arbor_trainer::config::DEFAULT_EPOCHS)]
        epochs: usize,

        /// Shuffle seed (random when unset)
        #[arg(short, long, env = "ARBOR_SEED")]
        seed: Option<u64>,
    },
    /// Parse a CoNLL file with a trained model
    Test {
        /// Trained model
        #[arg(short, long)]
        model: PathBuf,

        /// Sentences to parse
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: <input name>.pred in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Score a prediction file against gold heads
    Eval {
        /// Gold treebank
        #[arg(short, long)]
        gold: PathBuf,

        /// Predicted treebank
        #[arg(short, long)]
        predicted: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            train_file,
            model,
            epochs,
            seed,
        } => {
            let mut config = TrainerConfig::new().with_epochs(epochs);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let report = run_training(&train_file, &model, config)?;
            if let Some(last) = report.last() {
                info!(seed = report.seed, "training finished - {}", last.score);
            }
        }
        Commands::Test { model, input, output } => {
            let summary = run_prediction(&model, &input, output.as_deref())?;
            info!(
                sentences = summary.sentences,
                parsed = summary.parsed,
                "wrote {}",
                summary.output.display()
            );
        }
        Commands::Eval { gold, predicted } => {
            let score = run_evaluation(&gold, &predicted)?;
            info!("{score}");
        }
    }

    Ok(())
}

//! Structured perceptron training loop.

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context};
use arbor_core::{read_file, Arc, AttachmentScore, Sentence};
use oorandom::Rand64;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::TrainerConfig;
use crate::model::ParserModel;

/// Outcome of one pass over the training data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochReport {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Attachment score of the decoded trees, measured before each sentence's update.
    pub score: AttachmentScore,
    /// `score` as a fraction, kept alongside for the JSON report.
    pub uas: f64,
    /// Sentences without words or without gold heads.
    pub skipped: usize,
    /// Wall-clock time of the pass.
    pub elapsed_secs: f64,
}

/// Every epoch of a run, plus the seed that ordered them.
///
/// Serialized to `<model>.report.json` by [`run_training`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Shuffle seed in effect; pass it back as `--seed` to replay the run.
    pub seed: u64,
    /// One entry per epoch, in order.
    pub epochs: Vec<EpochReport>,
}

impl TrainingReport {
    pub fn last(&self) -> Option<&EpochReport> {
        self.epochs.last()
    }
}

/// Online perceptron trainer.
///
/// Owns the shuffle RNG, so consecutive epochs on one trainer see different
/// sentence orders while a fixed seed replays the same sequence of orders.
pub struct Trainer {
    config: TrainerConfig,
    seed: u64,
    rng: Rand64,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            config,
            seed,
            rng: Rand64::new(u128::from(seed)),
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Seed actually in use, including one drawn from the clock.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs every configured epoch over `sentences`, reshuffling each time.
    ///
    /// The accuracy reported per epoch is for diagnostics only: there is no
    /// early stopping.
    pub fn train(&mut self, model: &mut ParserModel, sentences: &[Sentence]) -> arbor_core::Result<TrainingReport> {
        let epochs = self.config.epochs;
        info!(sentences = sentences.len(), epochs, seed = self.seed, "starting perceptron training");

        let mut reports = Vec::with_capacity(epochs);
        for epoch in 1..=epochs {
            let report = self.train_epoch(epoch, model, sentences)?;
            info!(
                "Epoch {}/{} complete - {} - {} skipped - {:.2}s",
                epoch, epochs, report.score, report.skipped, report.elapsed_secs
            );
            reports.push(report);
        }

        Ok(TrainingReport {
            seed: self.seed,
            epochs: reports,
        })
    }

    /// One pass over a freshly shuffled copy of the sentence order.
    pub fn train_epoch(
        &mut self,
        epoch: usize,
        model: &mut ParserModel,
        sentences: &[Sentence],
    ) -> arbor_core::Result<EpochReport> {
        let start = Instant::now();
        let order = self.shuffled_order(sentences.len());

        let mut score = AttachmentScore::new();
        let mut skipped = 0;
        for (step, &index) in order.iter().enumerate() {
            match train_sentence(model, &sentences[index])? {
                Some(sentence_score) => score.merge(sentence_score),
                None => {
                    skipped += 1;
                    if epoch == 1 {
                        warn!(index, "skipping sentence without words or gold heads");
                    }
                }
            }

            let interval = self.config.progress_interval;
            if interval > 0 && (step + 1) % interval == 0 {
                debug!(epoch, step = step + 1, total = order.len(), uas = score.uas(), "training progress");
            }
        }

        Ok(EpochReport {
            epoch,
            uas: score.uas(),
            score,
            skipped,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }

    /// Fisher-Yates shuffle of `0..len`.
    fn shuffled_order(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.rng.rand_range(0..(i as u64 + 1)) as usize;
            indices.swap(i, j);
        }
        indices
    }
}

/// Decodes `sentence`, compares every word's head with gold, and applies a
/// perceptron update for each disagreement.
///
/// Returns `None` when the sentence has no words or no gold tree; such
/// sentences are skipped rather than treated as errors.
pub fn train_sentence(model: &mut ParserModel, sentence: &Sentence) -> arbor_core::Result<Option<AttachmentScore>> {
    if sentence.is_empty() {
        return Ok(None);
    }
    let Some(gold) = sentence.gold_tree() else {
        return Ok(None);
    };

    let predicted = model.predictor().parse(sentence)?;

    let mut score = AttachmentScore::new();
    for dependent in 1..sentence.len() {
        let (Some(gold_head), Some(predicted_head)) = (gold.head(dependent), predicted.head(dependent)) else {
            continue;
        };
        score.record(gold_head == predicted_head);
        if gold_head != predicted_head {
            model.update(
                sentence,
                Arc::new(gold_head, dependent),
                Arc::new(predicted_head, dependent),
            );
        }
    }
    Ok(Some(score))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Where the JSON epoch report for `model_path` is written.
pub fn report_path(model_path: &Path) -> PathBuf {
    let mut name = model_path.as_os_str().to_owned();
    name.push(".report.json");
    PathBuf::from(name)
}

/// Reads a treebank, trains a fresh model on it, and saves the model plus
/// its epoch report.
pub fn run_training(train_path: &Path, model_path: &Path, config: TrainerConfig) -> anyhow::Result<TrainingReport> {
    let sentences = read_file(train_path)
        .with_context(|| format!("failed to read training data {}", train_path.display()))?;
    if sentences.is_empty() {
        bail!("no sentences in training data: {}", train_path.display());
    }
    info!(sentences = sentences.len(), path = %train_path.display(), "loaded training data");

    let mut model = ParserModel::from_sentences(&sentences);
    let mut trainer = Trainer::new(config);
    let report = trainer.train(&mut model, &sentences)?;

    model
        .save(model_path)
        .with_context(|| format!("failed to save model to {}", model_path.display()))?;

    let report_file = report_path(model_path);
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&report_file, json)
        .with_context(|| format!("failed to write report {}", report_file.display()))?;
    info!(path = %report_file.display(), "training report written");

    Ok(report)
}

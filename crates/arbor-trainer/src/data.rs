//! File-level workflows: predicting a treebank with a saved model and
//! scoring a prediction file against gold.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use arbor_core::{read_file, write_file, AttachmentScore, HeadColumn};
use tracing::info;

use crate::model::ParserModel;

/// Extension added to prediction files.
pub const PREDICTION_EXTENSION: &str = "pred";

/// What a prediction run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionSummary {
    pub sentences: usize,
    pub parsed: usize,
    pub output: PathBuf,
    /// UAS against the input's own HEAD column, when it has gold heads.
    pub score: Option<AttachmentScore>,
}

/// `<input file name>.pred`, in the current directory.
pub fn prediction_output_path(input: &Path) -> PathBuf {
    let mut name = input.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(PREDICTION_EXTENSION);
    PathBuf::from(name)
}

/// Parses `input_path` with the model at `model_path` and writes the result
/// with predicted heads in the HEAD column.
pub fn run_prediction(model_path: &Path, input_path: &Path, output: Option<&Path>) -> anyhow::Result<PredictionSummary> {
    let model = ParserModel::load(model_path)
        .with_context(|| format!("failed to load model {}", model_path.display()))?;
    let mut sentences =
        read_file(input_path).with_context(|| format!("failed to read {}", input_path.display()))?;
    info!(sentences = sentences.len(), path = %input_path.display(), "loaded input");

    let parsed = model.predictor().predict(&mut sentences)?;

    let score = AttachmentScore::of_sentences(&sentences);
    let score = (score.total > 0).then_some(score);
    if let Some(score) = score {
        info!("{score} against input heads");
    }

    let output = output.map_or_else(|| prediction_output_path(input_path), Path::to_path_buf);
    write_file(&output, &sentences, HeadColumn::Predicted)
        .with_context(|| format!("failed to write predictions to {}", output.display()))?;
    info!(parsed, path = %output.display(), "predictions written");

    Ok(PredictionSummary {
        sentences: sentences.len(),
        parsed,
        output,
        score,
    })
}

/// UAS of the HEAD column of `predicted_path` against `gold_path`.
pub fn run_evaluation(gold_path: &Path, predicted_path: &Path) -> anyhow::Result<AttachmentScore> {
    let gold = read_file(gold_path).with_context(|| format!("failed to read {}", gold_path.display()))?;
    let predicted =
        read_file(predicted_path).with_context(|| format!("failed to read {}", predicted_path.display()))?;
    if gold.is_empty() {
        bail!("no sentences in gold file: {}", gold_path.display());
    }

    let score = AttachmentScore::compare(&gold, &predicted)?;
    info!(sentences = gold.len(), "{score}");
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_basename() {
        assert_eq!(
            prediction_output_path(Path::new("data/dev/english.blind")),
            PathBuf::from("english.blind.pred")
        );
        assert_eq!(prediction_output_path(Path::new("test.conll")), PathBuf::from("test.conll.pred"));
    }

    #[test]
    fn test_evaluation_of_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gold.conll");
        std::fs::write(
            &path,
            "1\tJohn\t_\tPROPN\t_\t_\t2\t_\t_\t_\n2\tsaw\t_\tVERB\t_\t_\t0\t_\t_\t_\n",
        )
        .unwrap();

        let score = run_evaluation(&path, &path).unwrap();
        assert_eq!(score, AttachmentScore { correct: 2, total: 2 });
    }

    #[test]
    fn test_evaluation_rejects_empty_gold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.conll");
        std::fs::write(&path, "").unwrap();
        assert!(run_evaluation(&path, &path).is_err());
    }
}

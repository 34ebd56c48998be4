pub mod matrix;
pub mod weights;

pub use matrix::ScoreMatrix;
pub use weights::WeightVector;

use crate::features::FeatureStore;
use crate::types::Sentence;

/// Scores every candidate arc of `sentence` under `weights`.
///
/// Cell `[h][d]` holds the summed weight of the features of arc `h → d`.
/// Cells for ROOT-as-dependent and self-loops stay at zero.
#[must_use]
pub fn build_scores(sentence: &Sentence, features: &FeatureStore, weights: &WeightVector) -> ScoreMatrix {
    let mut scores = ScoreMatrix::zeros(sentence.len());
    for arc in sentence.candidate_arcs() {
        let ids = features.lookup(sentence, arc);
        scores.set(arc.head, arc.dependent, weights.score(&ids));
    }
    scores
}

//! # Inference
//!
//! Scores and decodes sentences with a fixed feature vocabulary and weight
//! vector, writing the result into each token's predicted-head slot.

use tracing::debug;

use crate::error::Result;
use crate::features::FeatureStore;
use crate::parser::eisner::EisnerDecoder;
use crate::scoring::{build_scores, WeightVector};
use crate::types::{DependencyTree, Sentence};

/// Read-only view of a trained parser.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    features: &'a FeatureStore,
    weights: &'a WeightVector,
    decoder: EisnerDecoder,
}

impl<'a> Predictor<'a> {
    pub fn new(features: &'a FeatureStore, weights: &'a WeightVector) -> Self {
        Self {
            features,
            weights,
            decoder: EisnerDecoder::new(),
        }
    }

    /// Best projective tree for one sentence.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::InvalidInput` for a sentence without words.
    pub fn parse(&self, sentence: &Sentence) -> Result<DependencyTree> {
        let scores = build_scores(sentence, self.features, self.weights);
        self.decoder.decode(&scores)
    }

    /// Parses every sentence in place. Sentences without words are skipped.
    ///
    /// Returns the number of sentences that were parsed.
    pub fn predict(&self, sentences: &mut [Sentence]) -> Result<usize> {
        let mut parsed = 0;
        for (index, sentence) in sentences.iter_mut().enumerate() {
            if sentence.is_empty() {
                debug!(index, "skipping sentence without words");
                continue;
            }
            let tree = self.parse(sentence)?;
            sentence.apply_predictions(&tree);
            parsed += 1;
        }
        Ok(parsed)
    }
}

/// Convenience wrapper around [`Predictor::predict`].
pub fn predict(sentences: &mut [Sentence], features: &FeatureStore, weights: &WeightVector) -> Result<usize> {
    Predictor::new(features, weights).predict(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sentence::tests::john_saw_mary;
    use crate::types::Arc;

    #[test]
    fn test_predict_fills_predicted_heads_only() {
        let mut sentences = vec![john_saw_mary()];
        let mut features = FeatureStore::new();
        features.populate(sentences.iter());
        features.freeze();

        let mut weights = WeightVector::zeros(features.len());
        for (head, dep) in [(2, 1), (0, 2), (2, 3)] {
            let ids = features.lookup(&sentences[0], Arc::new(head, dep));
            weights.update(&ids, 1.0);
        }

        let parsed = predict(&mut sentences, &features, &weights).unwrap();
        assert_eq!(parsed, 1);

        let words = sentences[0].words();
        let predicted: Vec<_> = words.iter().map(|t| t.predicted_head).collect();
        assert_eq!(predicted, vec![Some(2), Some(0), Some(2)]);
        // gold column untouched
        assert_eq!(words[0].head, Some(2));
    }

    #[test]
    fn test_predict_skips_empty_sentences() {
        let mut sentences = vec![Sentence::new(Vec::new()).unwrap(), john_saw_mary()];
        let features = FeatureStore::new();
        let weights = WeightVector::zeros(0);

        let parsed = predict(&mut sentences, &features, &weights).unwrap();
        assert_eq!(parsed, 1);
        assert!(sentences[1].words().iter().all(|t| t.predicted_head.is_some()));
    }

    #[test]
    fn test_unknown_features_score_zero() {
        let sentence = john_saw_mary();
        let mut features = FeatureStore::new();
        features.freeze();
        let weights = WeightVector::zeros(0);

        let tree = Predictor::new(&features, &weights).parse(&sentence).unwrap();
        assert!(tree.is_well_formed());
    }
}

//! # Attachment Scores
//!
//! Unlabeled attachment score (UAS): the share of words whose predicted head
//! equals the gold head. ROOT is never counted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ArborError, Result};
use crate::types::Sentence;

/// Running tally of correctly attached words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentScore {
    pub correct: usize,
    pub total: usize,
}

impl AttachmentScore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one word.
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Fraction in `[0, 1]`. An empty tally scores 0.
    #[must_use]
    pub fn uas(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn merge(&mut self, other: AttachmentScore) {
        self.correct += other.correct;
        self.total += other.total;
    }

    /// Scores the predicted-head column against the gold-head column.
    ///
    /// Words lacking either head are left out of the tally.
    pub fn of_sentences<'a, I>(sentences: I) -> Self
    where
        I: IntoIterator<Item = &'a Sentence>,
    {
        let mut score = Self::new();
        for token in sentences.into_iter().flat_map(Sentence::words) {
            if let (Some(gold), Some(predicted)) = (token.head, token.predicted_head) {
                score.record(gold == predicted);
            }
        }
        score
    }

    /// Scores two parallel files: gold heads from `gold`, and the HEAD column
    /// of `predicted` taken as the system output.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::InvalidInput` if the sentence or word counts differ.
    pub fn compare(gold: &[Sentence], predicted: &[Sentence]) -> Result<Self> {
        if gold.len() != predicted.len() {
            return Err(ArborError::invalid_input(format!(
                "gold has {} sentences, predictions have {}",
                gold.len(),
                predicted.len()
            )));
        }

        let mut score = Self::new();
        for (index, (g, p)) in gold.iter().zip(predicted).enumerate() {
            if g.len() != p.len() {
                return Err(ArborError::invalid_input(format!(
                    "sentence {} has {} words in gold but {} in predictions",
                    index + 1,
                    g.words().len(),
                    p.words().len()
                )));
            }
            for (gold_token, predicted_token) in g.words().iter().zip(p.words()) {
                let Some(gold_head) = gold_token.head else {
                    continue;
                };
                let predicted_head = predicted_token.head.or(predicted_token.predicted_head);
                score.record(predicted_head == Some(gold_head));
            }
        }
        Ok(score)
    }
}

impl fmt::Display for AttachmentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UAS {:.2}% ({}/{})", self.uas() * 100.0, self.correct, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sentence::tests::john_saw_mary;
    use crate::types::{DependencyTree, Token};

    #[test]
    fn empty_score_is_zero() {
        let score = AttachmentScore::new();
        assert_eq!(score.uas(), 0.0);
        assert_eq!(score.to_string(), "UAS 0.00% (0/0)");
    }

    #[test]
    fn counts_words_but_not_root() {
        let mut sentence = john_saw_mary();
        sentence.apply_predictions(&DependencyTree::from_heads(vec![None, Some(2), Some(0), Some(0)]));

        let score = AttachmentScore::of_sentences([&sentence]);
        assert_eq!(score, AttachmentScore { correct: 2, total: 3 });
        assert_eq!(score.to_string(), "UAS 66.67% (2/3)");
    }

    #[test]
    fn merge_adds_tallies() {
        let mut a = AttachmentScore { correct: 1, total: 2 };
        a.merge(AttachmentScore { correct: 3, total: 3 });
        assert_eq!(a, AttachmentScore { correct: 4, total: 5 });
        assert!((a.uas() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn compare_reads_head_column_of_predictions() {
        let gold = vec![john_saw_mary()];
        let predicted = vec![
            Sentence::new(vec![
                Token::new(1, "John", "PROPN").with_head(2),
                Token::new(2, "saw", "VERB").with_head(0),
                Token::new(3, "Mary", "PROPN").with_head(1),
            ])
            .unwrap(),
        ];
        let score = AttachmentScore::compare(&gold, &predicted).unwrap();
        assert_eq!(score, AttachmentScore { correct: 2, total: 3 });
    }

    #[test]
    fn compare_rejects_misaligned_files() {
        let gold = vec![john_saw_mary()];
        assert!(AttachmentScore::compare(&gold, &[]).is_err());

        let short = vec![Sentence::new(vec![Token::new(1, "John", "PROPN")]).unwrap()];
        assert!(matches!(
            AttachmentScore::compare(&gold, &short),
            Err(ArborError::InvalidInput(_))
        ));
    }
}

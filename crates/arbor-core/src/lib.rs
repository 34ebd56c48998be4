//! # Arbor Core
//!
//! Projective dependency parsing: arc feature templates, a sparse feature
//! vocabulary, linear arc scoring, and an Eisner decoder that returns the
//! highest-scoring projective tree. CoNLL-X reading and writing and
//! attachment-score evaluation live here too.
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor_core::{EisnerDecoder, ScoreMatrix};
//!
//! // scores[head][dependent] for ROOT, John, saw, Mary
//! let mut scores = ScoreMatrix::zeros(4);
//! scores.set(2, 1, 10.0);
//! scores.set(0, 2, 10.0);
//! scores.set(2, 3, 10.0);
//!
//! let tree = EisnerDecoder::new().decode(&scores).unwrap();
//! assert_eq!(tree.head(1), Some(2));
//! assert_eq!(tree.head(2), Some(0));
//! assert_eq!(tree.head(3), Some(2));
//! ```
pub mod error;
pub mod eval;
pub mod features;
pub mod io;
pub mod parser;
pub mod scoring;
pub mod types;

// Re-export primary API
pub use error::{ArborError, Result};
pub use eval::AttachmentScore;
pub use features::{FeatureId, FeatureStore, FeatureTemplates, VocabularyMode};
pub use io::{read_file, read_sentences, write_file, ConllWriter, HeadColumn};
pub use parser::{predict, EisnerDecoder, Predictor};
pub use scoring::{build_scores, ScoreMatrix, WeightVector};
pub use types::{Arc, DependencyTree, Direction, Sentence, Token};

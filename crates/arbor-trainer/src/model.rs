//! Trained parser state and its on-disk format.
//!
//! The artifact is a gzip stream holding a bincode-encoded format version
//! followed by the feature vocabulary and the weight vector.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use arbor_core::{
    build_scores, Arc, ArborError, FeatureStore, Predictor, Result, ScoreMatrix, Sentence, WeightVector,
};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, info};

/// Version written at the start of every model file.
pub const FORMAT_VERSION: u32 = 1;

/// A frozen feature vocabulary paired with one weight per feature.
#[derive(Debug, Clone)]
pub struct ParserModel {
    features: FeatureStore,
    weights: WeightVector,
}

impl ParserModel {
    /// Wraps a vocabulary, freezing it and sizing a zero weight vector to it.
    pub fn new(mut features: FeatureStore) -> Self {
        features.freeze();
        let weights = WeightVector::zeros(features.len());
        Self { features, weights }
    }

    /// Pairs an existing vocabulary with trained weights.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::InvalidInput` if there is not exactly one weight per feature.
    pub fn from_parts(mut features: FeatureStore, weights: WeightVector) -> Result<Self> {
        if weights.len() != features.len() {
            return Err(ArborError::InvalidInput(format!(
                "{} weights for {} features",
                weights.len(),
                features.len()
            )));
        }
        features.freeze();
        Ok(Self { features, weights })
    }

    /// Builds the vocabulary from every candidate arc of `sentences`.
    pub fn from_sentences(sentences: &[Sentence]) -> Self {
        let mut features = FeatureStore::new();
        let added = features.populate(sentences);
        info!(sentences = sentences.len(), features = added, "feature vocabulary built");
        Self::new(features)
    }

    pub fn features(&self) -> &FeatureStore {
        &self.features
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn predictor(&self) -> Predictor<'_> {
        Predictor::new(&self.features, &self.weights)
    }

    pub fn score_matrix(&self, sentence: &Sentence) -> ScoreMatrix {
        build_scores(sentence, &self.features, &self.weights)
    }

    /// Perceptron step for one wrongly attached word: +1 on the features of
    /// the gold arc, -1 on the features of the predicted arc.
    pub fn update(&mut self, sentence: &Sentence, gold: Arc, predicted: Arc) {
        let gold_ids = self.features.lookup(sentence, gold);
        let predicted_ids = self.features.lookup(sentence, predicted);
        self.weights.update(&gold_ids, 1.0);
        self.weights.update(&predicted_ids, -1.0);
    }

    /// Writes the compressed model artifact to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());

        bincode::serialize_into(&mut encoder, &FORMAT_VERSION)
            .and_then(|()| bincode::serialize_into(&mut encoder, &(&self.features, &self.weights)))
            .map_err(|e| ArborError::ModelSave(e.to_string()))?;

        let mut writer = encoder.finish()?;
        writer.flush()?;

        info!(path = %path.display(), features = self.features.len(), "model saved");
        Ok(())
    }

    /// Reads a model written by [`ParserModel::save`]. The vocabulary comes
    /// back frozen.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut decoder = GzDecoder::new(BufReader::new(file));

        let version: u32 =
            bincode::deserialize_from(&mut decoder).map_err(|e| ArborError::ModelLoad(e.to_string()))?;
        if version != FORMAT_VERSION {
            return Err(ArborError::ModelLoad(format!(
                "unsupported model format version {version}, expected {FORMAT_VERSION}"
            )));
        }

        let (features, weights): (FeatureStore, WeightVector) =
            bincode::deserialize_from(&mut decoder).map_err(|e| ArborError::ModelLoad(e.to_string()))?;
        let model = Self::from_parts(features, weights).map_err(|e| ArborError::ModelLoad(e.to_string()))?;

        debug!(path = %path.display(), features = model.features.len(), "model loaded");
        Ok(model)
    }
}

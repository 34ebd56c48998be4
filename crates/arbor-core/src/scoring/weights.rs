use serde::{Deserialize, Serialize};

use crate::features::FeatureId;

/// Dense weights indexed by feature id.
///
/// Owned by a single model and changed only through [`WeightVector::update`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    values: Vec<f32>,
}

impl WeightVector {
    /// `len` zero weights, one per vocabulary entry.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Weight of one feature; ids past the end read as zero.
    #[must_use]
    pub fn get(&self, id: FeatureId) -> f32 {
        self.values.get(id).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Sum of the weights of `ids`.
    #[must_use]
    pub fn score(&self, ids: &[FeatureId]) -> f32 {
        ids.iter().map(|&id| self.get(id)).sum()
    }

    /// Adds `delta` to the weight of every id in `ids`.
    pub fn update(&mut self, ids: &[FeatureId], delta: f32) {
        for &id in ids {
            if let Some(weight) = self.values.get_mut(id) {
                *weight += delta;
            }
        }
    }
}

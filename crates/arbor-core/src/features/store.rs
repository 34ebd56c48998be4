use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::templates::FeatureTemplates;
use crate::types::{Arc, Sentence};

/// Dense index of a feature string in the vocabulary.
pub type FeatureId = usize;

/// How the store treats feature strings it has not seen before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VocabularyMode {
    /// Unseen strings are assigned the next free id.
    Growing,
    /// Unseen strings are dropped from lookups.
    Frozen,
}

/// Maps (sentence, arc) pairs to ordered lists of feature ids.
///
/// Starts in [`VocabularyMode::Growing`]; [`FeatureStore::freeze`] moves it to
/// [`VocabularyMode::Frozen`] once and for all, after which the id space is fixed
/// and can be used to size a weight vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureStore {
    ids: HashMap<String, FeatureId>,
    mode: VocabularyMode,
    #[serde(skip)]
    templates: FeatureTemplates,
}

impl FeatureStore {
    /// An empty, growing store.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            mode: VocabularyMode::Growing,
            templates: FeatureTemplates::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> VocabularyMode {
        self.mode
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.mode == VocabularyMode::Frozen
    }

    /// Number of distinct features known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Stops vocabulary growth. Calling it again has no effect.
    pub fn freeze(&mut self) {
        if self.mode == VocabularyMode::Growing {
            self.mode = VocabularyMode::Frozen;
            info!(features = self.ids.len(), "feature vocabulary frozen");
        }
    }

    /// Id of a single feature string, if known.
    #[must_use]
    pub fn id_of(&self, feature: &str) -> Option<FeatureId> {
        self.ids.get(feature).copied()
    }

    /// Feature ids for `arc`, in template order.
    ///
    /// While growing, unseen strings get fresh ids. Once frozen, unseen
    /// strings are omitted from the result.
    pub fn features_for(&mut self, sentence: &Sentence, arc: Arc) -> Vec<FeatureId> {
        match self.mode {
            VocabularyMode::Frozen => self.lookup(sentence, arc),
            VocabularyMode::Growing => self
                .templates
                .extract(sentence, arc)
                .into_iter()
                .map(|feature| {
                    let next = self.ids.len();
                    *self.ids.entry(feature).or_insert(next)
                })
                .collect(),
        }
    }

    /// Read-only lookup: ids of the known features of `arc`, unknown ones dropped.
    #[must_use]
    pub fn lookup(&self, sentence: &Sentence, arc: Arc) -> Vec<FeatureId> {
        self.templates
            .extract(sentence, arc)
            .iter()
            .filter_map(|feature| self.ids.get(feature).copied())
            .collect()
    }

    /// Registers the features of every candidate arc of every sentence.
    ///
    /// Returns how many new features were added. Does nothing once frozen.
    pub fn populate<'a, I>(&mut self, sentences: I) -> usize
    where
        I: IntoIterator<Item = &'a Sentence>,
    {
        let before = self.ids.len();
        if self.is_frozen() {
            return 0;
        }

        for (count, sentence) in sentences.into_iter().enumerate() {
            for arc in sentence.candidate_arcs() {
                self.features_for(sentence, arc);
            }
            if (count + 1) % 1000 == 0 {
                debug!(sentences = count + 1, features = self.ids.len(), "mapping features");
            }
        }

        self.ids.len() - before
    }
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::NUM_TEMPLATES;
    use crate::types::sentence::tests::john_saw_mary;
    use crate::types::Token;

    #[test]
    fn growing_store_allocates_sequential_ids() {
        let sentence = john_saw_mary();
        let mut store = FeatureStore::new();
        assert_eq!(store.mode(), VocabularyMode::Growing);

        let ids = store.features_for(&sentence, Arc::new(2, 1));
        assert_eq!(ids, (0..NUM_TEMPLATES).collect::<Vec<_>>());

        // same arc again: no growth, same ids
        let again = store.features_for(&sentence, Arc::new(2, 1));
        assert_eq!(again, ids);
        assert_eq!(store.len(), NUM_TEMPLATES);
    }

    #[test]
    fn frozen_store_drops_unknown_features() {
        let sentence = john_saw_mary();
        let mut store = FeatureStore::new();
        store.features_for(&sentence, Arc::new(2, 1));
        store.freeze();
        assert!(store.is_frozen());

        let known = store.features_for(&sentence, Arc::new(2, 1));
        assert_eq!(known.len(), NUM_TEMPLATES);

        let other = Sentence::new(vec![
            Token::new(1, "Kim", "PROPN"),
            Token::new(2, "saw", "VERB"),
        ])
        .unwrap();
        let partial = store.features_for(&other, Arc::new(2, 1));
        // every template that mentions "Kim" is unknown; head-only ones survive
        assert!(!partial.is_empty());
        assert!(partial.len() < NUM_TEMPLATES);
        assert_eq!(store.len(), NUM_TEMPLATES);
    }

    #[test]
    fn freeze_is_one_way() {
        let mut store = FeatureStore::new();
        store.freeze();
        store.freeze();
        assert_eq!(store.mode(), VocabularyMode::Frozen);
        assert_eq!(store.populate([&john_saw_mary()]), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn populate_covers_every_candidate_arc() {
        let sentence = john_saw_mary();
        let mut store = FeatureStore::new();
        let added = store.populate([&sentence]);
        assert_eq!(added, store.len());
        store.freeze();

        for arc in sentence.candidate_arcs() {
            assert_eq!(store.lookup(&sentence, arc).len(), NUM_TEMPLATES);
        }
        assert_eq!(store.id_of("hform=saw+R+1"), store.lookup(&sentence, Arc::new(2, 3)).first().copied());
    }
}

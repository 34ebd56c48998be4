pub mod store;
pub mod templates;

pub use store::{FeatureId, FeatureStore, VocabularyMode};
pub use templates::{FeatureTemplates, NULL_VALUE, NUM_TEMPLATES};

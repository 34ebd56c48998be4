pub mod eisner;
pub mod predictor;

pub use eisner::EisnerDecoder;
pub use predictor::{predict, Predictor};

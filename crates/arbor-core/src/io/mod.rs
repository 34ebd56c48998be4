//! # CoNLL I/O
//!
//! Tab-separated, one token per line, sentences separated by blank lines.

pub mod reader;
pub mod writer;

pub use reader::{read_file, read_sentences, NUM_COLUMNS};
pub use writer::{write_file, ConllWriter, HeadColumn};

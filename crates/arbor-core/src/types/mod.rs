pub mod arc;
pub mod sentence;
pub mod token;
pub mod tree;

pub use arc::{Arc, Direction};
pub use sentence::Sentence;
pub use token::{EMPTY_FIELD, ROOT_FORM, Token};
pub use tree::DependencyTree;

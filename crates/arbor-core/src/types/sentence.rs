use crate::error::{ArborError, Result};

use super::arc::Arc;
use super::token::Token;
use super::tree::DependencyTree;

/// An ordered sequence of tokens with the synthetic ROOT at position 0.
///
/// Token ids are always contiguous `0..len()`; constructors reject anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Builds a sentence from its words, prepending ROOT.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::InvalidInput` if word ids are not `1..=words.len()`
    /// in order, or if a gold head points outside the sentence or at itself.
    pub fn new(words: Vec<Token>) -> Result<Self> {
        let mut tokens = Vec::with_capacity(words.len() + 1);
        tokens.push(Token::root());
        tokens.extend(words);
        Self::from_tokens(tokens)
    }

    /// Builds a sentence from a token list that already starts with ROOT.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::InvalidInput` if the invariants in [`Sentence::validate`] fail.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let sentence = Self { tokens };
        sentence.validate()?;
        Ok(sentence)
    }

    /// Checks the structural invariants: exactly one ROOT at position 0,
    /// contiguous ids, and in-range, non-reflexive heads.
    pub fn validate(&self) -> Result<()> {
        match self.tokens.first() {
            Some(root) if root.is_root() => {}
            _ => return Err(ArborError::invalid_input("sentence is missing ROOT at position 0")),
        }

        let len = self.tokens.len();
        for (position, token) in self.tokens.iter().enumerate().skip(1) {
            if token.id != position {
                return Err(ArborError::invalid_input(format!(
                    "non-contiguous token ids: expected {position}, found {}",
                    token.id
                )));
            }
            for (column, head) in [("head", token.head), ("predicted head", token.predicted_head)] {
                match head {
                    Some(h) if h >= len => {
                        return Err(ArborError::invalid_input(format!(
                            "token {position} has {column} {h} outside sentence of {} words",
                            len - 1
                        )));
                    }
                    Some(h) if h == position => {
                        return Err(ArborError::invalid_input(format!(
                            "token {position} is its own {column}"
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Number of tokens including ROOT.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` when the sentence holds no real words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.len() < 2
    }

    /// All tokens, ROOT first.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens after ROOT.
    #[must_use]
    pub fn words(&self) -> &[Token] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// Mutable access to the tokens after ROOT.
    ///
    /// Ids are not re-validated; callers are expected to touch only
    /// annotation columns.
    pub(crate) fn words_mut(&mut self) -> &mut [Token] {
        self.tokens.get_mut(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn token(&self, id: usize) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Every arc the decoder may build: all ordered pairs of distinct words,
    /// plus ROOT → word. ROOT is never a dependent.
    pub fn candidate_arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        let n = self.tokens.len();
        (1..n).flat_map(move |dependent| {
            (0..n)
                .filter(move |&head| head != dependent)
                .map(move |head| Arc::new(head, dependent))
        })
    }

    /// The gold tree, or `None` if any word lacks a gold head (blind input).
    #[must_use]
    pub fn gold_tree(&self) -> Option<DependencyTree> {
        let mut heads = Vec::with_capacity(self.tokens.len());
        heads.push(None);
        for token in self.words() {
            heads.push(Some(token.head?));
        }
        Some(DependencyTree::from_heads(heads))
    }

    /// Writes `tree` into every word's predicted-head slot. Gold heads are untouched.
    pub fn apply_predictions(&mut self, tree: &DependencyTree) {
        for token in self.words_mut() {
            token.predicted_head = tree.head(token.id);
        }
    }
}

/// Placeholder used by CoNLL files for an empty column.
pub const EMPTY_FIELD: &str = "_";

/// Surface form and part of speech given to the synthetic ROOT token.
pub const ROOT_FORM: &str = "ROOT";

/// One row of a CoNLL sentence.
///
/// Column order follows the 10-column CoNLL-X layout:
/// `id form lemma cpos fpos feats head deprel phead pdeprel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Position in the sentence. `0` is reserved for ROOT.
    pub id: usize,
    /// Surface form.
    pub form: String,
    /// Lemma (carried through, never scored).
    pub lemma: String,
    /// Coarse part of speech.
    pub cpos: String,
    /// Fine part of speech.
    pub fpos: String,
    /// Morphological features (carried through, never scored).
    pub feats: String,
    /// Gold head. `None` for ROOT and for blind input.
    pub head: Option<usize>,
    /// Gold dependency label (unused by scoring).
    pub deprel: String,
    /// Head written by the decoder. Never aliases `head`.
    pub predicted_head: Option<usize>,
    /// Second scratch column, carried through untouched.
    pub pdeprel: String,
}

impl Token {
    /// Creates a bare token with every optional column set to `_`.
    #[must_use]
    pub fn new(id: usize, form: impl Into<String>, cpos: impl Into<String>) -> Self {
        let cpos = cpos.into();
        Self {
            id,
            form: form.into(),
            lemma: EMPTY_FIELD.to_string(),
            fpos: cpos.clone(),
            cpos,
            feats: EMPTY_FIELD.to_string(),
            head: None,
            deprel: EMPTY_FIELD.to_string(),
            predicted_head: None,
            pdeprel: EMPTY_FIELD.to_string(),
        }
    }

    /// The synthetic ROOT token prepended to every sentence.
    #[must_use]
    pub fn root() -> Self {
        let mut root = Self::new(0, ROOT_FORM, ROOT_FORM);
        root.fpos = EMPTY_FIELD.to_string();
        root
    }

    /// Sets the gold head, builder style.
    #[must_use]
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    /// Returns `true` for the synthetic ROOT.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id == 0
    }
}

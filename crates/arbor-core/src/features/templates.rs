//! # Arc Feature Templates
//!
//! Turns a (sentence, arc) pair into a fixed, ordered list of feature strings.
//! Every string carries the arc direction and distance so that the same
//! lexical pair is learned separately per orientation and length.

use crate::types::{Arc, Sentence, EMPTY_FIELD};

/// Value substituted for empty columns and positions outside the sentence.
pub const NULL_VALUE: &str = "_NULL_";

/// Number of feature strings produced per arc.
pub const NUM_TEMPLATES: usize = 16;

/// An atomic lookup into the arc's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Atom {
    HeadForm,
    HeadPos,
    DepForm,
    DepPos,
    HeadPosPrev,
    HeadPosNext,
    DepPosPrev,
    DepPosNext,
}

impl Atom {
    fn name(self) -> &'static str {
        match self {
            Atom::HeadForm => "hform",
            Atom::HeadPos => "hpos",
            Atom::DepForm => "dform",
            Atom::DepPos => "dpos",
            Atom::HeadPosPrev => "hpos-1",
            Atom::HeadPosNext => "hpos+1",
            Atom::DepPosPrev => "dpos-1",
            Atom::DepPosNext => "dpos+1",
        }
    }
}

use Atom::*;

/// Unigram templates first, then bigram and in-between context templates.
const TEMPLATES: [&[Atom]; NUM_TEMPLATES] = [
    &[HeadForm],
    &[HeadPos],
    &[DepForm],
    &[DepPos],
    &[HeadForm, HeadPos],
    &[DepForm, DepPos],
    &[HeadForm, HeadPos, DepForm, DepPos],
    &[HeadPos, DepForm, DepPos],
    &[HeadForm, DepForm, DepPos],
    &[HeadForm, HeadPos, DepForm],
    &[HeadForm, HeadPos, DepPos],
    &[HeadForm, DepForm],
    &[HeadPos, DepPos],
    &[HeadPos, DepPos, HeadPosNext, DepPosPrev],
    &[HeadPos, DepPos, HeadPosPrev, DepPosPrev],
    &[HeadPos, DepPos, HeadPosPrev, DepPosNext],
];

/// Deterministic feature-string generator for candidate arcs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureTemplates;

impl FeatureTemplates {
    pub fn new() -> Self {
        Self
    }

    /// Builds the [`NUM_TEMPLATES`] feature strings for `arc`.
    ///
    /// Strings look like `hform,hpos=saw+VERB+R+1`.
    ///
    /// # Examples
    /// ```
    /// use arbor_core::features::FeatureTemplates;
    /// use arbor_core::types::{Arc, Sentence, Token};
    ///
    /// let sentence = Sentence::new(vec![
    ///     Token::new(1, "John", "PROPN"),
    ///     Token::new(2, "saw", "VERB"),
    /// ]).unwrap();
    /// let features = FeatureTemplates::new().extract(&sentence, Arc::new(2, 1));
    /// assert_eq!(features.len(), 16);
    /// assert_eq!(features[0], "hform=saw+L+1");
    /// ```
    pub fn extract(&self, sentence: &Sentence, arc: Arc) -> Vec<String> {
        let context = ArcContext::new(sentence, arc);
        let suffix = format!("+{}+{}", arc.direction(), arc.distance());

        TEMPLATES
            .iter()
            .map(|atoms| {
                let names: Vec<&str> = atoms.iter().map(|a| a.name()).collect();
                let values: Vec<&str> = atoms.iter().map(|a| context.value(*a)).collect();
                format!("{}={}{}", names.join(","), values.join("+"), suffix)
            })
            .collect()
    }
}

/// Resolved atom values for one arc.
struct ArcContext<'a> {
    sentence: &'a Sentence,
    head: usize,
    dependent: usize,
}

impl<'a> ArcContext<'a> {
    fn new(sentence: &'a Sentence, arc: Arc) -> Self {
        Self {
            sentence,
            head: arc.head,
            dependent: arc.dependent,
        }
    }

    fn value(&self, atom: Atom) -> &'a str {
        match atom {
            HeadForm => self.form(Some(self.head)),
            HeadPos => self.pos(Some(self.head)),
            DepForm => self.form(Some(self.dependent)),
            DepPos => self.pos(Some(self.dependent)),
            HeadPosPrev => self.pos(self.head.checked_sub(1)),
            HeadPosNext => self.pos(Some(self.head + 1)),
            DepPosPrev => self.pos(self.dependent.checked_sub(1)),
            DepPosNext => self.pos(Some(self.dependent + 1)),
        }
    }

    fn form(&self, position: Option<usize>) -> &'a str {
        normalize(position.and_then(|p| self.sentence.token(p)).map(|t| t.form.as_str()))
    }

    fn pos(&self, position: Option<usize>) -> &'a str {
        normalize(position.and_then(|p| self.sentence.token(p)).map(|t| t.cpos.as_str()))
    }
}

fn normalize(value: Option<&str>) -> &str {
    match value {
        Some(v) if v != EMPTY_FIELD && !v.is_empty() => v,
        _ => NULL_VALUE,
    }
}

//! CoNLL-X writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::{Sentence, Token, EMPTY_FIELD};

/// Which head goes into the HEAD column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadColumn {
    /// Gold head in HEAD, predicted head in PHEAD. Round-trips a file.
    #[default]
    Gold,
    /// Predicted head in HEAD, `_` in PHEAD. Output of the `test` action.
    Predicted,
}

/// Streams sentences in the 10-column format. ROOT is never written and
/// every sentence is followed by one blank line.
pub struct ConllWriter<W: Write> {
    inner: W,
    heads: HeadColumn,
}

impl<W: Write> ConllWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            heads: HeadColumn::default(),
        }
    }

    #[must_use]
    pub fn with_heads(mut self, heads: HeadColumn) -> Self {
        self.heads = heads;
        self
    }

    pub fn write_sentence(&mut self, sentence: &Sentence) -> Result<()> {
        for token in sentence.words() {
            let (head, phead) = match self.heads {
                HeadColumn::Gold => (token.head, token.predicted_head),
                HeadColumn::Predicted => (token.predicted_head, None),
            };
            self.write_token(token, head, phead)?;
        }
        writeln!(self.inner)?;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, sentences: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Sentence>,
    {
        for sentence in sentences {
            self.write_sentence(sentence)?;
        }
        self.inner.flush()?;
        Ok(())
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_token(&mut self, token: &Token, head: Option<usize>, phead: Option<usize>) -> Result<()> {
        writeln!(
            self.inner,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            token.id,
            token.form,
            token.lemma,
            token.cpos,
            token.fpos,
            token.feats,
            head_field(head),
            token.deprel,
            head_field(phead),
            token.pdeprel,
        )?;
        Ok(())
    }
}

fn head_field(head: Option<usize>) -> String {
    head.map_or_else(|| EMPTY_FIELD.to_string(), |h| h.to_string())
}

/// Writes `sentences` to `path`, creating or truncating it.
pub fn write_file<P: AsRef<Path>>(path: P, sentences: &[Sentence], heads: HeadColumn) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = ConllWriter::new(BufWriter::new(file)).with_heads(heads);
    writer.write_all(sentences)
}

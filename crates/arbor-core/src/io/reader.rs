//! CoNLL-X reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ArborError, Result};
use crate::types::{Sentence, Token, EMPTY_FIELD};

/// Number of tab-separated columns in a token line.
pub const NUM_COLUMNS: usize = 10;

/// Reads every sentence of a CoNLL file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<Sentence>> {
    let file = File::open(path)?;
    read_sentences(BufReader::new(file))
}

/// Reads sentences from any buffered source.
///
/// A blank line ends a sentence; the last sentence does not need a trailing
/// blank line. Lines starting with `#` are comments. ROOT is prepended to
/// every sentence.
pub fn read_sentences<R: BufRead>(reader: R) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut first_line = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            if !current.is_empty() {
                sentences.push(finish(std::mem::take(&mut current), first_line)?);
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        if current.is_empty() {
            first_line = line_no;
        }
        current.push(parse_token(line, line_no)?);
    }

    // trailing sentence without a blank line
    if !current.is_empty() {
        sentences.push(finish(current, first_line)?);
    }

    Ok(sentences)
}

fn finish(words: Vec<Token>, first_line: usize) -> Result<Sentence> {
    Sentence::new(words).map_err(|err| match err {
        ArborError::InvalidInput(reason) => ArborError::malformed(first_line, reason),
        other => other,
    })
}

fn parse_token(line: &str, line_no: usize) -> Result<Token> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() != NUM_COLUMNS {
        return Err(ArborError::malformed(
            line_no,
            format!("expected {NUM_COLUMNS} columns, found {}", columns.len()),
        ));
    }

    let id = columns[0]
        .parse::<usize>()
        .map_err(|_| ArborError::malformed(line_no, format!("invalid token id {:?}", columns[0])))?;

    Ok(Token {
        id,
        form: columns[1].to_string(),
        lemma: columns[2].to_string(),
        cpos: columns[3].to_string(),
        fpos: columns[4].to_string(),
        feats: columns[5].to_string(),
        head: parse_head(columns[6], line_no)?,
        deprel: columns[7].to_string(),
        predicted_head: parse_head(columns[8], line_no)?,
        pdeprel: columns[9].to_string(),
    })
}

fn parse_head(value: &str, line_no: usize) -> Result<Option<usize>> {
    if value == EMPTY_FIELD || value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ArborError::malformed(line_no, format!("invalid head {value:?}")))
}

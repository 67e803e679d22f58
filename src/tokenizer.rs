//! Splits input into maximal runs of one character category.

use crate::unicode::{is_devanagari, is_devanagari_digit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    Devanagari,
    Latin,
    Digit,
    Whitespace,
    Punctuation,
    Other,
}

impl RunKind {
    pub fn of(c: char) -> Self {
        if c.is_ascii_digit() || is_devanagari_digit(c) {
            RunKind::Digit
        } else if is_devanagari(c) {
            RunKind::Devanagari
        } else if c.is_whitespace() {
            RunKind::Whitespace
        } else if c.is_alphabetic() {
            RunKind::Latin
        } else if c.is_ascii_punctuation() || ('\u{2000}'..='\u{206F}').contains(&c) {
            RunKind::Punctuation
        } else {
            RunKind::Other
        }
    }
}

/// A maximal, non-empty slice of the input with a single `RunKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRun<'a> {
    pub kind: RunKind,
    pub text: &'a str,
    /// Char offset of the run's first codepoint in the tokenized input.
    pub offset: usize,
}

impl CodepointRun<'_> {
    /// Digit runs containing at least one Devanagari numeral.
    pub fn has_devanagari_digits(&self) -> bool {
        self.kind == RunKind::Digit && self.text.chars().any(is_devanagari_digit)
    }
}

pub fn tokenize(input: &str) -> Vec<CodepointRun<'_>> {
    let mut runs = Vec::new();
    let mut start = 0usize;
    let mut start_offset = 0usize;
    let mut current: Option<RunKind> = None;

    for (char_index, (byte_index, c)) in input.char_indices().enumerate() {
        let kind = RunKind::of(c);
        match current {
            Some(k) if k == kind => {}
            Some(k) => {
                runs.push(CodepointRun {
                    kind: k,
                    text: &input[start..byte_index],
                    offset: start_offset,
                });
                start = byte_index;
                start_offset = char_index;
                current = Some(kind);
            }
            None => current = Some(kind),
        }
    }

    if let Some(k) = current {
        runs.push(CodepointRun {
            kind: k,
            text: &input[start..],
            offset: start_offset,
        });
    }

    runs
}

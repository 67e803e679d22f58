use tracing::debug;

use crate::position::position;
use crate::syllable::parse_syllables;
use crate::tables::Tables;
use crate::tokenizer::{CodepointRun, RunKind};
use crate::unicode::{NUKTA, VIRAMA};

use super::{ConvertOptions, UnmappedChar};

pub(crate) struct RenderedRun {
    pub text: String,
    pub kruti: bool,
    pub unmapped: Vec<UnmappedChar>,
}

impl RenderedRun {
    fn verbatim(run: &CodepointRun<'_>) -> Self {
        Self {
            text: run.text.to_string(),
            kruti: false,
            unmapped: Vec::new(),
        }
    }
}

/// Render `runs[i]`, mapping punctuation through the context table when the
/// options ask for it and a neighbouring run is Hindi.
pub(crate) fn render_at(
    runs: &[CodepointRun<'_>],
    i: usize,
    tables: &Tables,
    options: ConvertOptions,
) -> RenderedRun {
    let run = &runs[i];
    match run.kind {
        RunKind::Punctuation if options.map_context_punctuation && hindi_context(runs, i) => {
            context_punctuation(run, tables)
        }
        _ => render_run(run, tables),
    }
}

/// Whether the nearest non-whitespace run on either side is Hindi text.
fn hindi_context(runs: &[CodepointRun<'_>], i: usize) -> bool {
    let is_hindi = |r: &CodepointRun<'_>| {
        r.kind == RunKind::Devanagari || r.has_devanagari_digits()
    };
    let before = runs[..i]
        .iter()
        .rev()
        .find(|r| r.kind != RunKind::Whitespace);
    let after = runs[i + 1..].iter().find(|r| r.kind != RunKind::Whitespace);
    before.is_some_and(is_hindi) || after.is_some_and(is_hindi)
}

pub(crate) fn render_run(run: &CodepointRun<'_>, tables: &Tables) -> RenderedRun {
    match run.kind {
        RunKind::Devanagari => render_devanagari(run, tables),
        RunKind::Digit => {
            let mut text = String::with_capacity(run.text.len());
            for c in run.text.chars() {
                match tables.digit(c) {
                    Some(d) => text.push_str(d),
                    None => text.push(c),
                }
            }
            RenderedRun {
                text,
                kruti: run.has_devanagari_digits(),
                unmapped: Vec::new(),
            }
        }
        RunKind::Latin
        | RunKind::Whitespace
        | RunKind::Punctuation
        | RunKind::Other => RenderedRun::verbatim(run),
    }
}

fn context_punctuation(run: &CodepointRun<'_>, tables: &Tables) -> RenderedRun {
    let mut text = String::with_capacity(run.text.len());
    for c in run.text.chars() {
        match tables.context_punctuation(c) {
            Some(glyph) => text.push_str(glyph),
            None => text.push(c),
        }
    }
    RenderedRun {
        text,
        kruti: true,
        unmapped: Vec::new(),
    }
}

fn render_devanagari(run: &CodepointRun<'_>, tables: &Tables) -> RenderedRun {
    let mut text = String::with_capacity(run.text.len());
    let mut unmapped = Vec::new();

    for parsed in parse_syllables(run.text) {
        let source: Vec<char> = parsed.source.chars().collect();
        let mut cursor = 0;
        for fragment in position(&parsed.syllable, tables) {
            if fragment.is_passthrough() {
                for c in fragment.glyph.chars().filter(|&c| c != NUKTA && c != VIRAMA) {
                    let within = source[cursor..]
                        .iter()
                        .position(|&s| s == c)
                        .map(|p| cursor + p)
                        .or_else(|| source.iter().position(|&s| s == c))
                        .unwrap_or(0);
                    cursor = (within + 1).min(source.len());
                    let offset = run.offset + parsed.offset + within;
                    debug!(ch = %c, codepoint = c as u32, offset, "unmapped passthrough");
                    unmapped.push(UnmappedChar { ch: c, offset });
                }
            }
            text.push_str(&fragment.glyph);
        }
    }

    RenderedRun {
        text,
        kruti: true,
        unmapped,
    }
}

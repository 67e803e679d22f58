//! Diagnostic breakdown of a conversion.
//!
//! Used by `krutitool explain` to show how each syllable was parsed, which
//! conjunct or half forms were chosen and in what order the glyphs were
//! emitted.

use std::fmt::Write;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::normalizer::normalize;
use crate::position::{position, Fragment, FragmentRole};
use crate::syllable::{parse_syllables, Syllable};
use crate::tables::Tables;
use crate::tokenizer::{tokenize, RunKind};

use super::{render, ConvertOptions, UnmappedChar};

#[derive(Debug, Clone, Serialize)]
pub struct SyllableExplanation {
    pub source: String,
    /// Char offset in the normalized input.
    pub offset: usize,
    pub shape: &'static str,
    pub reph: bool,
    pub rakar: bool,
    pub virama: bool,
    pub matra: Option<char>,
    pub fragments: Vec<Fragment>,
    pub output: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunExplanation {
    pub kind: RunKind,
    pub offset: usize,
    pub source: String,
    pub output: String,
    pub kruti: bool,
    /// Empty for non-Devanagari runs.
    pub syllables: Vec<SyllableExplanation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub input: String,
    pub normalized: String,
    pub output: String,
    pub runs: Vec<RunExplanation>,
    pub unmapped: Vec<UnmappedChar>,
}

pub fn explain(tables: &'static Tables, options: ConvertOptions, input: &str) -> Explanation {
    let normalized = normalize(input, tables, options.strip_zero_width);
    let runs = tokenize(&normalized);

    let mut explained = Vec::with_capacity(runs.len());
    let mut unmapped = Vec::new();
    for (i, run) in runs.iter().enumerate() {
        let rendered = render::render_at(&runs, i, tables, options);

        let syllables = if run.kind == RunKind::Devanagari {
            parse_syllables(run.text)
                .into_iter()
                .map(|parsed| {
                    let fragments = position(&parsed.syllable, tables);
                    let output = fragments.iter().map(|f| f.glyph.as_str()).collect();
                    let (shape, reph, rakar, virama, matra) = match &parsed.syllable {
                        Syllable::Consonant(s) => ("consonant", s.reph, s.rakar, s.virama, s.matra),
                        Syllable::Vowel { .. } => ("vowel", false, false, false, None),
                        Syllable::Mark(_) => ("mark", false, false, false, None),
                    };
                    SyllableExplanation {
                        source: parsed.source.to_string(),
                        offset: run.offset + parsed.offset,
                        shape,
                        reph,
                        rakar,
                        virama,
                        matra,
                        fragments,
                        output,
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        unmapped.extend(rendered.unmapped.iter().copied());
        explained.push(RunExplanation {
            kind: run.kind,
            offset: run.offset,
            source: run.text.to_string(),
            output: rendered.text,
            kruti: rendered.kruti,
            syllables,
        });
    }

    Explanation {
        input: input.to_string(),
        output: explained.iter().map(|r| r.output.as_str()).collect(),
        normalized: normalized.into_owned(),
        runs: explained,
        unmapped,
    }
}

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

/// Render an explanation as aligned plain text.
pub fn format_text(result: &Explanation) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Input: {} ===", result.input);
    if result.normalized != result.input {
        let _ = writeln!(out, "normalized: {}", result.normalized);
    }
    let _ = writeln!(out, "output:     {}", result.output);
    let _ = writeln!(out);

    let source_width = result
        .runs
        .iter()
        .flat_map(|r| r.syllables.iter().map(|s| s.source.as_str()))
        .chain(result.runs.iter().map(|r| r.source.as_str()))
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
        .max(6);

    for run in &result.runs {
        if run.kind == RunKind::Whitespace {
            continue;
        }
        let font = if run.kruti { "kruti" } else { "plain" };
        let _ = writeln!(
            out,
            "[{:?} @{}] {} -> {} ({font})",
            run.kind, run.offset, run.source, run.output
        );
        for syl in &run.syllables {
            let mut flags = Vec::new();
            if syl.reph {
                flags.push("reph");
            }
            if syl.rakar {
                flags.push("rakar");
            }
            if syl.virama {
                flags.push("virama");
            }
            let pieces: Vec<String> = syl
                .fragments
                .iter()
                .map(|f| format!("{}={}", f.role.label(), f.glyph))
                .collect();
            let _ = writeln!(
                out,
                "  {} {} {:<9} {}{}",
                pad(&syl.source, source_width),
                pad(&syl.output, 8),
                syl.shape,
                pieces.join(" "),
                if flags.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", flags.join(","))
                },
            );
        }
    }

    if !result.unmapped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "unmapped:");
        for u in &result.unmapped {
            let _ = writeln!(out, "  U+{:04X} {} @{}", u.ch as u32, u.ch, u.offset);
        }
    }

    out
}

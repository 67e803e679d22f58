//! Unicode → Kruti Dev conversion entry points.
//!
//! A `Converter` runs normalize → tokenize → parse → resolve → position and
//! concatenates the per-run output. Conversion is total: codepoints without
//! a table entry are copied through and reported in `Converted::Partial`.

pub mod explain;
mod render;

#[cfg(test)]
mod tests;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::normalizer::normalize;
use crate::settings::settings;
use crate::tables::Tables;
use crate::tokenizer::tokenize;

pub use explain::{Explanation, RunExplanation, SyllableExplanation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub strip_zero_width: bool,
    /// Map ASCII punctuation next to Hindi text through the Kruti Dev
    /// punctuation table instead of copying it.
    pub map_context_punctuation: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strip_zero_width: true,
            map_context_punctuation: false,
        }
    }
}

impl ConvertOptions {
    /// Options taken from the active settings.
    pub fn from_settings() -> Self {
        let s = settings();
        Self {
            strip_zero_width: s.normalize.strip_zero_width,
            map_context_punctuation: s.punctuation.map_context_punctuation,
        }
    }
}

/// A Devanagari codepoint that had no table entry and was copied through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnmappedChar {
    pub ch: char,
    /// Char offset in the normalized input.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converted {
    Mapped(String),
    Partial {
        text: String,
        unmapped: Vec<UnmappedChar>,
    },
}

impl Converted {
    pub fn text(&self) -> &str {
        match self {
            Converted::Mapped(text) | Converted::Partial { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Converted::Mapped(text) | Converted::Partial { text, .. } => text,
        }
    }

    pub fn unmapped(&self) -> &[UnmappedChar] {
        match self {
            Converted::Mapped(_) => &[],
            Converted::Partial { unmapped, .. } => unmapped,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Converted::Mapped(_))
    }
}

/// A piece of output together with the font it must be shown in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    /// True when the text is Kruti Dev encoded.
    pub kruti: bool,
}

#[derive(Clone, Copy)]
pub struct Converter {
    tables: &'static Tables,
    options: ConvertOptions,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Tables::global(), ConvertOptions::from_settings())
    }
}

impl Converter {
    pub fn new(tables: &'static Tables, options: ConvertOptions) -> Self {
        Self { tables, options }
    }

    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    pub fn convert(&self, input: &str) -> Converted {
        let mut text = String::with_capacity(input.len());
        let mut unmapped = Vec::new();
        for rendered in self.render_runs(input) {
            text.push_str(&rendered.text);
            unmapped.extend(rendered.unmapped);
        }
        if unmapped.is_empty() {
            Converted::Mapped(text)
        } else {
            Converted::Partial { text, unmapped }
        }
    }

    pub fn convert_text(&self, input: &str) -> String {
        self.convert(input).into_text()
    }

    /// Output split into maximal runs that share a font requirement.
    pub fn convert_segments(&self, input: &str) -> Vec<Segment> {
        self.segments_with_unmapped(input).0
    }

    pub(crate) fn segments_with_unmapped(&self, input: &str) -> (Vec<Segment>, Vec<UnmappedChar>) {
        let mut segments: Vec<Segment> = Vec::new();
        let mut unmapped = Vec::new();
        for rendered in self.render_runs(input) {
            unmapped.extend(rendered.unmapped);
            if rendered.text.is_empty() {
                continue;
            }
            match segments.last_mut() {
                Some(last) if last.kruti == rendered.kruti => last.text.push_str(&rendered.text),
                _ => segments.push(Segment {
                    text: rendered.text,
                    kruti: rendered.kruti,
                }),
            }
        }
        (segments, unmapped)
    }

    pub fn explain(&self, input: &str) -> Explanation {
        explain::explain(self.tables, self.options, input)
    }

    fn render_runs(&self, input: &str) -> Vec<render::RenderedRun> {
        let _span = debug_span!("convert", len = input.len()).entered();
        let normalized = normalize(input, self.tables, self.options.strip_zero_width);
        let runs = tokenize(&normalized);

        let rendered: Vec<render::RenderedRun> = (0..runs.len())
            .map(|i| render::render_at(&runs, i, self.tables, self.options))
            .collect();

        debug!(
            runs = runs.len(),
            unmapped = rendered.iter().map(|r| r.unmapped.len()).sum::<usize>(),
            "converted"
        );
        rendered
    }
}

/// Convert with the global tables and options from the active settings.
pub fn convert_text(input: &str) -> String {
    Converter::default().convert_text(input)
}

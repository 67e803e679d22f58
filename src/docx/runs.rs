//! Rewrites the text runs (`<w:r>`) of one story part.

use tracing::debug;

use crate::converter::{Converter, Segment};
use crate::unicode::contains_devanagari;

use super::xml::{escape_attr, escape_text, matching_end, tokenize, unescape, Token, XmlError};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PartStats {
    pub runs_converted: usize,
    pub runs_split: usize,
    pub unmapped: usize,
}

pub(crate) struct RunRewriter<'c> {
    converter: &'c Converter,
    rfonts: String,
}

impl<'c> RunRewriter<'c> {
    pub fn new(converter: &'c Converter, font_name: &str) -> Self {
        let font = escape_attr(font_name);
        Self {
            converter,
            rfonts: format!(
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}" w:eastAsia="{font}"/>"#
            ),
        }
    }

    pub fn rewrite_part(&self, xml: &str) -> Result<(String, PartStats), XmlError> {
        let tokens = tokenize(xml)?;
        let mut out = String::with_capacity(xml.len() + xml.len() / 8);
        let mut stats = PartStats::default();
        self.rewrite_tokens(&tokens, &mut out, &mut stats)?;
        Ok((out, stats))
    }

    fn rewrite_tokens(
        &self,
        tokens: &[Token<'_>],
        out: &mut String,
        stats: &mut PartStats,
    ) -> Result<(), XmlError> {
        let mut i = 0;
        while i < tokens.len() {
            if !tokens[i].is_start("w:r") {
                out.push_str(tokens[i].raw());
                i += 1;
                continue;
            }
            let end = matching_end(tokens, i).ok_or_else(|| XmlError {
                reason: "unclosed <w:r>".to_string(),
                offset: start_offset(&tokens[i]),
            })?;
            self.rewrite_run(&tokens[i..=end], out, stats)?;
            i = end + 1;
        }
        Ok(())
    }

    /// `run` spans the `<w:r>` start tag through its `</w:r>`.
    fn rewrite_run(
        &self,
        run: &[Token<'_>],
        out: &mut String,
        stats: &mut PartStats,
    ) -> Result<(), XmlError> {
        let inner = &run[1..run.len() - 1];

        // Text boxes nest whole paragraphs inside a run.
        if inner.iter().any(|t| t.is_start("w:r")) {
            out.push_str(run[0].raw());
            self.rewrite_tokens(inner, out, stats)?;
            out.push_str(run[run.len() - 1].raw());
            return Ok(());
        }

        let shape = RunShape::scan(inner);
        let text = shape.text(inner)?;
        if text.trim().is_empty() || !contains_devanagari(&text) {
            push_raw(run, out);
            return Ok(());
        }

        let (segments, unmapped) = self.converter.segments_with_unmapped(&text);
        if !segments.iter().any(|s| s.kruti) {
            push_raw(run, out);
            return Ok(());
        }
        stats.runs_converted += 1;
        stats.unmapped += unmapped.len();

        if shape.simple {
            if segments.len() > 1 {
                stats.runs_split += 1;
            }
            let rpr = shape.rpr.map(|(s, e)| concat_raw(&inner[s..=e]));
            for segment in &segments {
                self.push_segment_run(run[0].raw(), rpr.as_deref(), segment, out);
            }
        } else {
            debug!(tokens = inner.len(), "complex run converted in place");
            self.push_complex_run(run, &shape, out)?;
        }
        Ok(())
    }

    fn push_segment_run(&self, start: &str, rpr: Option<&str>, segment: &Segment, out: &mut String) {
        out.push_str(start);
        match (rpr, segment.kruti) {
            (Some(rpr), true) => out.push_str(&self.with_font(rpr)),
            (Some(rpr), false) => out.push_str(rpr),
            (None, true) => {
                out.push_str("<w:rPr>");
                out.push_str(&self.rfonts);
                out.push_str("</w:rPr>");
            }
            (None, false) => {}
        }
        push_text_element(&segment.text, out);
        out.push_str("</w:r>");
    }

    /// Converts each `<w:t>` on its own and puts the whole run in the Kruti font.
    fn push_complex_run(&self, run: &[Token<'_>], shape: &RunShape, out: &mut String) -> Result<(), XmlError> {
        let inner = &run[1..run.len() - 1];
        out.push_str(run[0].raw());
        if shape.rpr.is_none() {
            out.push_str("<w:rPr>");
            out.push_str(&self.rfonts);
            out.push_str("</w:rPr>");
        }

        let mut i = 0;
        while i < inner.len() {
            match shape.rpr {
                Some((s, e)) if i == s => {
                    out.push_str(&self.with_font(&concat_raw(&inner[s..=e])));
                    i = e + 1;
                    continue;
                }
                _ => {}
            }
            if inner[i].is_start("w:t") {
                if let Some(end) = matching_end(inner, i) {
                    let text = text_content(&inner[i + 1..end])?;
                    push_text_element(&self.converter.convert_text(&text), out);
                    i = end + 1;
                    continue;
                }
            }
            out.push_str(inner[i].raw());
            i += 1;
        }

        out.push_str(run[run.len() - 1].raw());
        Ok(())
    }

    /// Replaces or inserts `<w:rFonts>` inside a run-properties element.
    fn with_font(&self, rpr: &str) -> String {
        if rpr.trim_end().ends_with("/>") && !rpr.contains("</w:rPr>") {
            return format!("<w:rPr>{}</w:rPr>", self.rfonts);
        }

        if let Some(start) = find_tag(rpr, "w:rFonts") {
            let end = element_end(rpr, start, "w:rFonts");
            return format!("{}{}{}", &rpr[..start], self.rfonts, &rpr[end..]);
        }

        // rFonts follows rStyle in the schema order.
        let insert_at = match find_tag(rpr, "w:rStyle") {
            Some(start) => element_end(rpr, start, "w:rStyle"),
            None => rpr.find('>').map_or(rpr.len(), |i| i + 1),
        };
        format!("{}{}{}", &rpr[..insert_at], self.rfonts, &rpr[insert_at..])
    }
}

/// Direct-child layout of a run.
struct RunShape {
    /// Token range of the `<w:rPr>` element, inclusive.
    rpr: Option<(usize, usize)>,
    /// Token indices of `<w:t>` start tags.
    texts: Vec<usize>,
    /// Only run properties and text elements.
    simple: bool,
}

impl RunShape {
    fn scan(inner: &[Token<'_>]) -> Self {
        let mut shape = RunShape {
            rpr: None,
            texts: Vec::new(),
            simple: true,
        };
        let mut i = 0;
        while i < inner.len() {
            let token = inner[i];
            match token {
                Token::Start { name, .. } => {
                    let end = matching_end(inner, i).unwrap_or(inner.len() - 1);
                    match name {
                        "w:rPr" => shape.rpr = Some((i, end)),
                        "w:t" => shape.texts.push(i),
                        _ => shape.simple = false,
                    }
                    i = end + 1;
                    continue;
                }
                Token::Empty { name, .. } => {
                    if name == "w:rPr" {
                        shape.rpr = Some((i, i));
                    } else {
                        shape.simple = false;
                    }
                }
                Token::Text(raw) if raw.trim().is_empty() => {}
                Token::Text(_) | Token::Opaque(_) | Token::End { .. } => shape.simple = false,
            }
            i += 1;
        }
        if shape.texts.is_empty() {
            shape.simple = false;
        }
        shape
    }

    fn text(&self, inner: &[Token<'_>]) -> Result<String, XmlError> {
        let mut text = String::new();
        for &start in &self.texts {
            if let Some(end) = matching_end(inner, start) {
                text.push_str(&text_content(&inner[start + 1..end])?);
            }
        }
        Ok(text)
    }
}

fn text_content(tokens: &[Token<'_>]) -> Result<String, XmlError> {
    let mut text = String::new();
    for token in tokens {
        if let Token::Text(raw) = token {
            text.push_str(&unescape(raw)?);
        }
    }
    Ok(text)
}

fn start_offset(token: &Token<'_>) -> usize {
    match *token {
        Token::Start { offset, .. } => offset,
        _ => 0,
    }
}

fn push_raw(tokens: &[Token<'_>], out: &mut String) {
    for token in tokens {
        out.push_str(token.raw());
    }
}

fn concat_raw(tokens: &[Token<'_>]) -> String {
    let mut s = String::new();
    push_raw(tokens, &mut s);
    s
}

fn push_text_element(text: &str, out: &mut String) {
    let padded = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
    out.push_str(if padded {
        r#"<w:t xml:space="preserve">"#
    } else {
        "<w:t>"
    });
    out.push_str(&escape_text(text));
    out.push_str("</w:t>");
}

/// Byte offset of a `<name` tag, not matching longer names sharing the prefix.
fn find_tag(xml: &str, name: &str) -> Option<usize> {
    let needle = format!("<{name}");
    let mut from = 0;
    while let Some(i) = xml[from..].find(&needle) {
        let at = from + i;
        let after = xml[at + needle.len()..].chars().next();
        if matches!(after, Some(c) if c.is_whitespace() || c == '/' || c == '>') {
            return Some(at);
        }
        from = at + needle.len();
    }
    None
}

/// Byte offset just past the element starting at `start`.
fn element_end(xml: &str, start: usize, name: &str) -> usize {
    let tag_close = xml[start..].find('>').map_or(xml.len(), |i| start + i + 1);
    if xml[..tag_close].ends_with("/>") {
        return tag_close;
    }
    let closing = format!("</{name}>");
    xml[tag_close..]
        .find(&closing)
        .map_or(tag_close, |i| tag_close + i + closing.len())
}

//! Minimal WordprocessingML scanner.
//!
//! Splits a part into tags and character data without building a tree, so
//! untouched markup is written back byte-for-byte. Only what run rewriting
//! needs is recognized: start/end/empty tags, text, and opaque constructs
//! (comments, processing instructions, CDATA, doctype).

use std::borrow::Cow;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{reason} at byte {offset}")]
pub struct XmlError {
    pub reason: String,
    pub offset: usize,
}

impl XmlError {
    fn new(reason: impl Into<String>, offset: usize) -> Self {
        Self {
            reason: reason.into(),
            offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `offset` is the byte position of the `<` in the scanned part.
    Start { name: &'a str, raw: &'a str, offset: usize },
    Empty { name: &'a str, raw: &'a str },
    End { name: &'a str, raw: &'a str },
    Text(&'a str),
    Opaque(&'a str),
}

impl<'a> Token<'a> {
    pub fn raw(&self) -> &'a str {
        match *self {
            Token::Start { raw, .. } | Token::Empty { raw, .. } | Token::End { raw, .. } => raw,
            Token::Text(raw) | Token::Opaque(raw) => raw,
        }
    }

    pub fn is_start(&self, tag: &str) -> bool {
        matches!(*self, Token::Start { name, .. } if name == tag)
    }

    pub fn is_end(&self, tag: &str) -> bool {
        matches!(*self, Token::End { name, .. } if name == tag)
    }
}

pub fn tokenize(xml: &str) -> Result<Vec<Token<'_>>, XmlError> {
    let bytes = xml.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            let end = xml[pos..].find('<').map_or(xml.len(), |i| pos + i);
            tokens.push(Token::Text(&xml[pos..end]));
            pos = end;
            continue;
        }

        let rest = &xml[pos..];
        let opaque_end = if rest.starts_with("<!--") {
            Some(("-->", "unterminated comment"))
        } else if rest.starts_with("<![CDATA[") {
            Some(("]]>", "unterminated CDATA section"))
        } else if rest.starts_with("<?") {
            Some(("?>", "unterminated processing instruction"))
        } else if rest.starts_with("<!") {
            Some((">", "unterminated declaration"))
        } else {
            None
        };
        if let Some((terminator, reason)) = opaque_end {
            let end = rest
                .find(terminator)
                .map(|i| pos + i + terminator.len())
                .ok_or_else(|| XmlError::new(reason, pos))?;
            tokens.push(Token::Opaque(&xml[pos..end]));
            pos = end;
            continue;
        }

        let end = tag_end(bytes, pos).ok_or_else(|| XmlError::new("unterminated tag", pos))?;
        let raw = &xml[pos..end];
        let closing = raw.starts_with("</");
        let body = raw
            .trim_start_matches("</")
            .trim_start_matches('<')
            .trim_end_matches('>');
        let name_len = body
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(body.len());
        let name = &body[..name_len];
        if name.is_empty() {
            return Err(XmlError::new("tag without a name", pos));
        }

        tokens.push(if closing {
            Token::End { name, raw }
        } else if body.ends_with('/') {
            Token::Empty { name, raw }
        } else {
            Token::Start { name, raw, offset: pos }
        });
        pos = end;
    }

    Ok(tokens)
}

/// Byte index just past the `>` closing the tag at `start`, skipping quoted
/// attribute values.
fn tag_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            (None, b'<') => return None,
            _ => {}
        }
    }
    None
}

/// Index of the token closing the element opened at `open`.
pub fn matching_end(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let Token::Start { name, .. } = tokens.get(open)? else {
        return None;
    };
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.is_start(name) {
            depth += 1;
        } else if token.is_end(name) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

pub fn unescape(text: &str) -> Result<Cow<'_, str>, XmlError> {
    if !text.contains('&') {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let offset = text.len() - rest.len() + amp;
        let semi = rest[amp..]
            .find(';')
            .ok_or_else(|| XmlError::new("unterminated entity", offset))?;
        let entity = &rest[amp + 1..amp + semi];
        let ch = match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    None
                };
                code.and_then(char::from_u32).ok_or_else(|| {
                    XmlError::new(format!("unknown entity &{entity};"), offset)
                })?
            }
        };
        out.push(ch);
        rest = &rest[amp + semi + 1..];
    }
    out.push_str(rest);
    Ok(Cow::Owned(out))
}

pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

pub fn escape_attr(text: &str) -> Cow<'_, str> {
    escape(text, true)
}

fn escape(text: &str, attr: bool) -> Cow<'_, str> {
    let needs = |c: char| matches!(c, '&' | '<' | '>') || (attr && c == '"');
    if !text.contains(needs) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

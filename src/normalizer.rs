//! Canonicalizes input before tokenizing.
//!
//! Precomposed nukta letters are decomposed into base consonant + nukta so
//! that the parser and conjunct resolver see a single representation.
//! Typographic dashes and quotes fold to ASCII. Zero-width characters next
//! to Devanagari text are optionally removed; elsewhere they are kept.
//! Anything else passes through unchanged.

use std::borrow::Cow;

use crate::tables::Tables;
use crate::unicode::{is_devanagari, is_zero_width, NUKTA};

pub fn normalize<'a>(input: &'a str, tables: &Tables, strip_zero_width: bool) -> Cow<'a, str> {
    let chars: Vec<char> = input.chars().collect();
    let strip = |i: usize| strip_zero_width && is_zero_width(chars[i]) && touches_devanagari(&chars, i);

    let untouched = chars.iter().enumerate().all(|(i, &c)| {
        tables.nukta_base(c).is_none() && tables.typographic(c).is_none() && !strip(i)
    });
    if untouched {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if let Some(base) = tables.nukta_base(c) {
            out.push(base);
            out.push(NUKTA);
        } else if let Some(ascii) = tables.typographic(c) {
            out.push(ascii);
        } else if strip(i) {
            continue;
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Whether the nearest non-zero-width neighbour on either side is Devanagari.
fn touches_devanagari(chars: &[char], i: usize) -> bool {
    let before = chars[..i].iter().rev().find(|&&c| !is_zero_width(c));
    let after = chars[i + 1..].iter().find(|&&c| !is_zero_width(c));
    before.is_some_and(|&c| is_devanagari(c)) || after.is_some_and(|&c| is_devanagari(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        normalize(s, Tables::global(), true).into_owned()
    }

    #[test]
    fn test_precomposed_nukta_decomposes() {
        assert_eq!(norm("\u{095C}"), "ड\u{093C}");
        assert_eq!(norm("\u{095B}रा"), "ज\u{093C}रा");
    }

    #[test]
    fn test_decomposed_nukta_unchanged() {
        assert!(matches!(
            normalize("ड\u{093C}", Tables::global(), true),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_typographic_punctuation() {
        assert_eq!(norm("a\u{2013}b\u{2014}c"), "a-b-c");
        assert_eq!(norm("\u{201C}राम\u{201D}"), "\"राम\"");
        assert_eq!(norm("\u{2018}x\u{2019}"), "'x'");
    }

    #[test]
    fn test_zero_width_stripped() {
        assert_eq!(norm("क\u{200D}्ष"), "क्ष");
        assert_eq!(norm("\u{FEFF}राम"), "राम");
    }

    #[test]
    fn test_zero_width_stripped_across_neighbouring_joiners() {
        assert_eq!(norm("क\u{200D}\u{200C}्ष"), "क्ष");
        assert_eq!(norm("a\u{200B}क"), "aक");
    }

    #[test]
    fn test_zero_width_away_from_devanagari_kept() {
        assert_eq!(norm("\u{200B}"), "\u{200B}");
        assert_eq!(norm("a\u{200C}b \u{FEFF}"), "a\u{200C}b \u{FEFF}");
        assert!(matches!(
            normalize("x\u{200D}y", Tables::global(), true),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_zero_width_kept_when_disabled() {
        let out = normalize("क\u{200C}ख", Tables::global(), false);
        assert_eq!(out, "क\u{200C}ख");
    }

    #[test]
    fn test_unknown_passthrough() {
        assert!(matches!(
            normalize("plain ascii ✓", Tables::global(), true),
            Cow::Borrowed(_)
        ));
    }
}

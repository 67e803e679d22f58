//! Static Unicode → Kruti Dev mapping tables.
//!
//! The raw data lives in `data.rs` as plain slices; `Tables` indexes it
//! once into hash maps and a conjunct trie. The indexed form is built lazily
//! and shared read-only by every conversion.

mod data;
mod trie;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use trie::{ConjunctTrie, TrieLookupResult};

/// A virama-joined consonant sequence with a dedicated Kruti Dev rendering.
#[derive(Debug, PartialEq, Eq)]
pub struct ConjunctPattern {
    pub consonants: &'static [char],
    /// Rendering when the conjunct closes its cluster.
    pub full: &'static str,
    /// Rendering when another consonant of the same cluster follows.
    pub half: Option<&'static str>,
}

pub struct Tables {
    vowels: HashMap<char, &'static str>,
    consonants: HashMap<char, &'static str>,
    half_forms: HashMap<char, &'static str>,
    matras: HashMap<char, &'static str>,
    modifiers: HashMap<char, &'static str>,
    nukta_consonants: HashMap<char, &'static str>,
    matra_ligatures: HashMap<(char, char), &'static str>,
    signs: HashMap<char, &'static str>,
    digits: HashMap<char, &'static str>,
    context_punctuation: HashMap<char, &'static str>,
    typographic: HashMap<char, char>,
    precomposed_nukta: HashMap<char, char>,
    pub(crate) conjuncts: ConjunctTrie,
}

impl Tables {
    /// Get or initialize the global singleton.
    pub fn global() -> &'static Tables {
        static INSTANCE: OnceLock<Tables> = OnceLock::new();
        INSTANCE.get_or_init(Tables::build)
    }

    fn build() -> Self {
        fn index<V: Copy>(pairs: &[(char, V)]) -> HashMap<char, V> {
            pairs.iter().copied().collect()
        }

        Tables {
            vowels: index(data::VOWELS),
            consonants: index(data::CONSONANTS),
            half_forms: index(data::HALF_FORMS),
            matras: index(data::MATRAS),
            modifiers: index(data::MODIFIERS),
            nukta_consonants: index(data::NUKTA_CONSONANTS),
            matra_ligatures: data::MATRA_LIGATURES
                .iter()
                .map(|&(c, m, glyph)| ((c, m), glyph))
                .collect(),
            signs: index(data::SIGNS),
            digits: index(data::DIGITS),
            context_punctuation: index(data::CONTEXT_PUNCTUATION),
            typographic: index(data::TYPOGRAPHIC),
            precomposed_nukta: index(data::PRECOMPOSED_NUKTA),
            conjuncts: ConjunctTrie::build(data::CONJUNCTS),
        }
    }

    pub fn vowel(&self, c: char) -> Option<&'static str> {
        self.vowels.get(&c).copied()
    }

    pub fn consonant(&self, c: char) -> Option<&'static str> {
        self.consonants.get(&c).copied()
    }

    pub fn half_form(&self, c: char) -> Option<&'static str> {
        self.half_forms.get(&c).copied()
    }

    pub fn matra(&self, c: char) -> Option<&'static str> {
        self.matras.get(&c).copied()
    }

    pub fn is_pre_base(&self, matra: char) -> bool {
        data::PRE_BASE_MATRAS.contains(&matra)
    }

    pub fn modifier(&self, c: char) -> Option<&'static str> {
        self.modifiers.get(&c).copied()
    }

    pub fn nukta_consonant(&self, base: char) -> Option<&'static str> {
        self.nukta_consonants.get(&base).copied()
    }

    pub fn matra_ligature(&self, consonant: char, matra: char) -> Option<&'static str> {
        self.matra_ligatures.get(&(consonant, matra)).copied()
    }

    pub fn sign(&self, c: char) -> Option<&'static str> {
        self.signs.get(&c).copied()
    }

    pub fn digit(&self, c: char) -> Option<&'static str> {
        self.digits.get(&c).copied()
    }

    pub fn context_punctuation(&self, c: char) -> Option<&'static str> {
        self.context_punctuation.get(&c).copied()
    }

    pub fn typographic(&self, c: char) -> Option<char> {
        self.typographic.get(&c).copied()
    }

    /// Base consonant of a precomposed nukta letter (e.g. ड़ → ड).
    pub fn nukta_base(&self, c: char) -> Option<char> {
        self.precomposed_nukta.get(&c).copied()
    }

    pub fn conjuncts(&self) -> &ConjunctTrie {
        &self.conjuncts
    }

    pub fn rakar_glyph(&self, after: char) -> &'static str {
        if data::ROUND_BOTTOM.contains(&after) {
            data::RAKAR_ROUND_GLYPH
        } else {
            data::RAKAR_GLYPH
        }
    }

    pub fn reph_glyph(&self) -> &'static str {
        data::REPH_GLYPH
    }

    pub fn virama_glyph(&self) -> &'static str {
        data::VIRAMA_GLYPH
    }

    pub fn nukta_glyph(&self) -> &'static str {
        data::NUKTA_GLYPH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_consonant_has_half_form() {
        let t = Tables::global();
        for &(c, _) in data::CONSONANTS {
            assert!(t.half_form(c).is_some(), "missing half form for {c}");
        }
    }

    #[test]
    fn test_nukta_keys_are_consonants() {
        let t = Tables::global();
        for &(base, glyph) in data::NUKTA_CONSONANTS {
            assert!(t.consonant(base).is_some(), "{base} is not a mapped consonant");
            assert!(glyph.ends_with('+'));
        }
    }

    #[test]
    fn test_nukta_glyph_differs_from_base() {
        let t = Tables::global();
        assert_eq!(t.nukta_consonant('ड'), Some("M+"));
        assert_eq!(t.consonant('ड'), Some("M"));
    }

    #[test]
    fn test_conjunct_members_are_consonants() {
        let t = Tables::global();
        for p in data::CONJUNCTS {
            assert!((2..=4).contains(&p.consonants.len()));
            for &c in p.consonants {
                assert!(t.consonant(c).is_some(), "{c} in {:?}", p.consonants);
            }
        }
    }

    #[test]
    fn test_pre_base_matra() {
        let t = Tables::global();
        assert!(t.is_pre_base('ि'));
        assert!(!t.is_pre_base('ी'));
    }

    #[test]
    fn test_rakar_glyph_choice() {
        let t = Tables::global();
        assert_eq!(t.rakar_glyph('ब'), "z");
        assert_eq!(t.rakar_glyph('ठ'), "ª");
    }

    #[test]
    fn test_digits_cover_all_ten() {
        let t = Tables::global();
        let mapped: String = "०१२३४५६७८९"
            .chars()
            .filter_map(|c| t.digit(c))
            .collect();
        assert_eq!(mapped, "0123456789");
    }
}

//! Groups a normalized Devanagari run into syllables.
//!
//! A consonant syllable is a virama-joined cluster (each member optionally
//! carrying a nukta), an optional subscript र (rakar), an optional matra and
//! trailing modifiers. A र + virama directly before a consonant is not a
//! cluster member: it becomes the reph of the syllable that starts at that
//! consonant.

use tracing::debug_span;

use crate::unicode::{is_consonant, is_independent_vowel, is_matra, is_modifier, NUKTA, RA, VIRAMA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consonant {
    pub base: char,
    pub nukta: bool,
}

impl Consonant {
    pub fn plain(base: char) -> Self {
        Self { base, nukta: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsonantSyllable {
    pub consonants: Vec<Consonant>,
    /// A subscript र follows the last consonant (not stored in `consonants`).
    pub rakar: bool,
    pub matra: Option<char>,
    pub modifiers: Vec<char>,
    /// A र् preceded this syllable and is drawn as a reph at its end.
    pub reph: bool,
    /// Terminal virama: the last consonant has no inherent vowel.
    pub virama: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Syllable {
    Consonant(ConsonantSyllable),
    Vowel { vowel: char, modifiers: Vec<char> },
    /// A codepoint that cannot start or join a syllable: dandas, avagraha,
    /// or a matra/modifier/nukta/virama with nothing to attach to.
    Mark(char),
}

/// A syllable together with the slice of the run it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSyllable<'a> {
    pub syllable: Syllable,
    pub source: &'a str,
    /// Char offset within the run.
    pub offset: usize,
}

pub fn parse_syllables(run: &str) -> Vec<ParsedSyllable<'_>> {
    let _span = debug_span!("parse_syllables", len = run.len()).entered();
    let cs: Vec<(usize, char)> = run.char_indices().collect();
    let n = cs.len();
    let at = |i: usize| cs.get(i).map(|&(_, c)| c);
    let byte_at = |i: usize| cs.get(i).map_or(run.len(), |&(b, _)| b);

    let mut out = Vec::new();
    let mut i = 0;

    while i < n {
        let start = i;

        let mut reph = false;
        if at(i) == Some(RA)
            && at(i + 1) == Some(VIRAMA)
            && at(i + 2).is_some_and(is_consonant)
        {
            reph = true;
            i += 2;
        }

        let syllable = match at(i) {
            Some(c) if is_consonant(c) => {
                let mut syl = parse_cluster(&cs, &mut i);
                syl.reph = reph;
                Syllable::Consonant(syl)
            }
            Some(c) if is_independent_vowel(c) => {
                i += 1;
                let modifiers = take_modifiers(&cs, &mut i);
                Syllable::Vowel { vowel: c, modifiers }
            }
            Some(c) => {
                i += 1;
                Syllable::Mark(c)
            }
            None => break,
        };

        out.push(ParsedSyllable {
            syllable,
            source: &run[byte_at(start)..byte_at(i)],
            offset: start,
        });
    }

    out
}

fn parse_cluster(cs: &[(usize, char)], i: &mut usize) -> ConsonantSyllable {
    let at = |i: usize| cs.get(i).map(|&(_, c)| c);
    let mut syl = ConsonantSyllable::default();

    while let Some(base) = at(*i).filter(|&c| is_consonant(c)) {
        *i += 1;
        let nukta = at(*i) == Some(NUKTA);
        if nukta {
            *i += 1;
        }
        syl.consonants.push(Consonant { base, nukta });

        if at(*i) != Some(VIRAMA) {
            break;
        }
        match at(*i + 1) {
            Some(next) if is_consonant(next) => {
                // A plain र closing the cluster is a rakar.
                let ra_closes =
                    next == RA && !matches!(at(*i + 2), Some(VIRAMA) | Some(NUKTA));
                if ra_closes {
                    syl.rakar = true;
                    *i += 2;
                    break;
                }
                *i += 1;
            }
            _ => {
                syl.virama = true;
                *i += 1;
                break;
            }
        }
    }

    if !syl.virama {
        if let Some(m) = at(*i).filter(|&c| is_matra(c)) {
            syl.matra = Some(m);
            *i += 1;
        }
    }
    syl.modifiers = take_modifiers(cs, i);
    syl
}

fn take_modifiers(cs: &[(usize, char)], i: &mut usize) -> Vec<char> {
    let mut modifiers = Vec::new();
    while let Some(&(_, c)) = cs.get(*i) {
        if !is_modifier(c) {
            break;
        }
        modifiers.push(c);
        *i += 1;
    }
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syllables(run: &str) -> Vec<Syllable> {
        parse_syllables(run).into_iter().map(|p| p.syllable).collect()
    }

    fn consonant(run: &str) -> ConsonantSyllable {
        match syllables(run).as_slice() {
            [Syllable::Consonant(s)] => s.clone(),
            other => panic!("expected one consonant syllable, got {:?}", other),
        }
    }

    #[test]
    fn test_simple_consonant_with_matra() {
        let s = consonant("कि");
        assert_eq!(s.consonants, vec![Consonant::plain('क')]);
        assert_eq!(s.matra, Some('ि'));
        assert!(!s.reph && !s.rakar && !s.virama);
    }

    #[test]
    fn test_cluster_members() {
        let s = consonant("स्त");
        assert_eq!(
            s.consonants,
            vec![Consonant::plain('स'), Consonant::plain('त')]
        );
    }

    #[test]
    fn test_reph_attaches_to_following_syllable() {
        let syls = syllables("धर्म");
        assert_eq!(syls.len(), 2);
        match &syls[1] {
            Syllable::Consonant(s) => {
                assert!(s.reph);
                assert_eq!(s.consonants, vec![Consonant::plain('म')]);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &syls[0] {
            Syllable::Consonant(s) => assert!(!s.reph),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_reph_at_run_start() {
        let s = consonant("र्क");
        assert!(s.reph);
        assert_eq!(s.consonants, vec![Consonant::plain('क')]);
    }

    #[test]
    fn test_rakar() {
        let s = consonant("प्रे");
        assert!(s.rakar);
        assert_eq!(s.consonants, vec![Consonant::plain('प')]);
        assert_eq!(s.matra, Some('े'));
    }

    #[test]
    fn test_ra_inside_cluster_is_not_rakar() {
        let s = consonant("क्र्य");
        assert!(!s.rakar);
        assert_eq!(s.consonants.len(), 3);
    }

    #[test]
    fn test_reph_and_rakar_together() {
        let s = consonant("र्क्र");
        assert!(s.reph);
        assert!(s.rakar);
        assert_eq!(s.consonants, vec![Consonant::plain('क')]);
    }

    #[test]
    fn test_terminal_virama() {
        let s = consonant("क्");
        assert!(s.virama);
        assert_eq!(s.matra, None);
    }

    #[test]
    fn test_dangling_ra_virama_is_half_form() {
        let s = consonant("र्");
        assert!(s.virama);
        assert!(!s.reph);
    }

    #[test]
    fn test_nukta_member() {
        let s = consonant("ड\u{093C}");
        assert_eq!(s.consonants, vec![Consonant { base: 'ड', nukta: true }]);
    }

    #[test]
    fn test_vowel_with_modifier() {
        assert_eq!(
            syllables("अं"),
            vec![Syllable::Vowel {
                vowel: 'अ',
                modifiers: vec!['ं']
            }]
        );
    }

    #[test]
    fn test_isolated_marks() {
        assert_eq!(
            syllables("ि्।"),
            vec![
                Syllable::Mark('ि'),
                Syllable::Mark('्'),
                Syllable::Mark('।'),
            ]
        );
    }

    #[test]
    fn test_second_matra_is_isolated() {
        let syls = syllables("कीी");
        assert_eq!(syls.len(), 2);
        assert_eq!(syls[1], Syllable::Mark('ी'));
    }

    #[test]
    fn test_sources_cover_run() {
        let run = "विद्यार्थी।";
        let parsed = parse_syllables(run);
        let joined: String = parsed.iter().map(|p| p.source).collect();
        assert_eq!(joined, run);
        let sources: Vec<&str> = parsed.iter().map(|p| p.source).collect();
        assert_eq!(sources, vec!["वि", "द्या", "र्थी", "।"]);
    }

    #[test]
    fn test_offsets() {
        let parsed = parse_syllables("कमल");
        let offsets: Vec<usize> = parsed.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
    }
}

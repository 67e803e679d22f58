//! Orders a syllable's glyph fragments into Kruti Dev visual order.
//!
//! Consonant syllables come out as
//! `[pre-base matra] cluster [rakar] [matra] [reph] [modifiers]`.
//! The rakar is produced by the conjunct resolver as the last cluster piece,
//! so a syllable carrying both a reph and a rakar reads rakar…reph. Anusvara
//! and candrabindu sit after the reph.

use serde::Serialize;

use crate::conjunct::{resolve_cluster, PieceKind};
use crate::syllable::{ConsonantSyllable, Syllable};
use crate::tables::Tables;
use crate::unicode::{NUKTA, VIRAMA};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentRole {
    PreBaseMatra,
    Cluster(PieceKind),
    /// Consonant + matra drawn as one glyph.
    Ligature,
    Matra,
    Modifier,
    Reph,
    Vowel,
    Sign,
    /// No table entry: the source codepoints are copied through.
    Passthrough,
}

impl FragmentRole {
    pub fn label(self) -> &'static str {
        match self {
            FragmentRole::PreBaseMatra => "pre_base_matra",
            FragmentRole::Cluster(kind) => kind.label(),
            FragmentRole::Ligature => "ligature",
            FragmentRole::Matra => "matra",
            FragmentRole::Modifier => "modifier",
            FragmentRole::Reph => "reph",
            FragmentRole::Vowel => "vowel",
            FragmentRole::Sign => "sign",
            FragmentRole::Passthrough => "passthrough",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub role: FragmentRole,
    pub glyph: String,
}

impl Fragment {
    fn new(role: FragmentRole, glyph: impl Into<String>) -> Self {
        Self {
            role,
            glyph: glyph.into(),
        }
    }

    fn passthrough(c: char) -> Self {
        Self::new(FragmentRole::Passthrough, c)
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(
            self.role,
            FragmentRole::Passthrough | FragmentRole::Cluster(PieceKind::Passthrough)
        )
    }
}

pub fn position(syllable: &Syllable, tables: &Tables) -> Vec<Fragment> {
    match syllable {
        Syllable::Consonant(syl) => position_consonant(syl, tables),
        Syllable::Vowel { vowel, modifiers } => {
            let mut out = vec![tables
                .vowel(*vowel)
                .map_or_else(|| Fragment::passthrough(*vowel), |g| Fragment::new(FragmentRole::Vowel, g))];
            push_modifiers(&mut out, modifiers, tables);
            out
        }
        Syllable::Mark(c) => vec![mark(*c, tables)],
    }
}

fn position_consonant(syl: &ConsonantSyllable, tables: &Tables) -> Vec<Fragment> {
    let mut out = Vec::new();

    if let Some(glyph) = ligature(syl, tables) {
        out.push(Fragment::new(FragmentRole::Ligature, glyph));
    } else {
        let pre_base = syl.matra.filter(|&m| tables.is_pre_base(m));
        if let Some(m) = pre_base {
            out.push(matra_fragment(m, FragmentRole::PreBaseMatra, tables));
        }
        out.extend(
            resolve_cluster(syl, tables)
                .into_iter()
                .map(|p| Fragment::new(FragmentRole::Cluster(p.kind), p.glyph)),
        );
        if let Some(m) = syl.matra.filter(|_| pre_base.is_none()) {
            out.push(matra_fragment(m, FragmentRole::Matra, tables));
        }
    }

    if syl.reph {
        out.push(Fragment::new(FragmentRole::Reph, tables.reph_glyph()));
    }
    push_modifiers(&mut out, &syl.modifiers, tables);
    out
}

/// कृ, दृ, हृ, रु, रू: a lone plain consonant whose matra has a combined glyph.
fn ligature(syl: &ConsonantSyllable, tables: &Tables) -> Option<&'static str> {
    match (syl.consonants.as_slice(), syl.matra) {
        ([c], Some(m)) if !c.nukta && !syl.rakar && !syl.virama => {
            tables.matra_ligature(c.base, m)
        }
        _ => None,
    }
}

fn matra_fragment(m: char, role: FragmentRole, tables: &Tables) -> Fragment {
    tables
        .matra(m)
        .map_or_else(|| Fragment::passthrough(m), |g| Fragment::new(role, g))
}

fn push_modifiers(out: &mut Vec<Fragment>, modifiers: &[char], tables: &Tables) {
    for &m in modifiers {
        out.push(
            tables
                .modifier(m)
                .map_or_else(|| Fragment::passthrough(m), |g| Fragment::new(FragmentRole::Modifier, g)),
        );
    }
}

/// A codepoint standing on its own.
fn mark(c: char, tables: &Tables) -> Fragment {
    if let Some(g) = tables.sign(c) {
        return Fragment::new(FragmentRole::Sign, g);
    }
    if let Some(g) = tables.matra(c) {
        return Fragment::new(FragmentRole::Matra, g);
    }
    if let Some(g) = tables.modifier(c) {
        return Fragment::new(FragmentRole::Modifier, g);
    }
    match c {
        VIRAMA => Fragment::new(FragmentRole::Sign, tables.virama_glyph()),
        NUKTA => Fragment::new(FragmentRole::Sign, tables.nukta_glyph()),
        _ => Fragment::passthrough(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllable::{parse_syllables, Consonant};

    fn render(run: &str) -> String {
        parse_syllables(run)
            .iter()
            .flat_map(|p| position(&p.syllable, Tables::global()))
            .map(|f| f.glyph)
            .collect()
    }

    fn roles(run: &str) -> Vec<FragmentRole> {
        parse_syllables(run)
            .iter()
            .flat_map(|p| position(&p.syllable, Tables::global()))
            .map(|f| f.role)
            .collect()
    }

    #[test]
    fn test_pre_base_matra_moves_left() {
        assert_eq!(render("कि"), "fd");
        assert_eq!(
            roles("कि"),
            vec![
                FragmentRole::PreBaseMatra,
                FragmentRole::Cluster(PieceKind::Full)
            ]
        );
    }

    #[test]
    fn test_pre_base_matra_before_whole_cluster() {
        // The i-matra goes before the half form too.
        assert_eq!(render("स्थि"), "fLFk");
    }

    #[test]
    fn test_post_base_matra() {
        assert_eq!(render("की"), "dh");
        assert_eq!(render("को"), "dks");
    }

    #[test]
    fn test_reph_follows_matra() {
        assert_eq!(render("र्मा"), "ekZ");
        assert_eq!(render("र्मि"), "feZ");
    }

    #[test]
    fn test_modifiers_follow_reph() {
        assert_eq!(render("र्मों"), "eksZa");
        assert_eq!(render("र्मं"), "eZa");
        assert_eq!(
            roles("र्यों"),
            vec![
                FragmentRole::Cluster(PieceKind::Full),
                FragmentRole::Matra,
                FragmentRole::Reph,
                FragmentRole::Modifier,
            ]
        );
    }

    #[test]
    fn test_reph_with_rakar() {
        assert_eq!(render("र्क्र"), "ØZ");
        assert_eq!(render("र्ब्र"), "czZ");
        assert_eq!(render("र्ब्रा"), "czkZ");
    }

    #[test]
    fn test_rakar_before_post_matra() {
        assert_eq!(render("ब्रा"), "czk");
        assert_eq!(render("प्रि"), "fç");
    }

    #[test]
    fn test_ligatures() {
        assert_eq!(render("कृ"), "\u{2014}");
        assert_eq!(render("हृ"), "â");
        assert_eq!(render("रु"), "#");
        assert_eq!(render("रू"), ":");
        // No ligature once the cluster grows.
        assert_eq!(render("क्रु"), "Øq");
    }

    #[test]
    fn test_modifiers_follow_matra() {
        assert_eq!(render("में"), "esa");
        assert_eq!(render("हैं"), "gSa");
    }

    #[test]
    fn test_vowel_syllable() {
        assert_eq!(render("ऐसा"), ",slk");
        assert_eq!(render("अं"), "va");
    }

    #[test]
    fn test_isolated_marks() {
        assert_eq!(render("ि"), "f");
        assert_eq!(render("्"), "~");
        assert_eq!(render("\u{093C}"), "+");
        assert_eq!(render("।"), "A");
    }

    #[test]
    fn test_unmapped_matra_is_passthrough() {
        let syl = Syllable::Consonant(ConsonantSyllable {
            consonants: vec![Consonant::plain('क')],
            matra: Some('\u{0944}'),
            ..Default::default()
        });
        let frags = position(&syl, Tables::global());
        assert_eq!(frags.len(), 2);
        assert!(frags[1].is_passthrough());
        assert_eq!(frags[1].glyph, "\u{0944}");
    }
}

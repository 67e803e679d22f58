//! Resolves a consonant cluster into Kruti Dev glyph pieces.
//!
//! Matching is greedy from the left: at each position the longest
//! registered conjunct wins. A conjunct that does not close the cluster is
//! only used if it has a half glyph; otherwise shorter matches are tried,
//! down to a single consonant rendered in its half form.

use serde::Serialize;

use crate::syllable::{Consonant, ConsonantSyllable};
use crate::tables::Tables;
use crate::unicode::{NUKTA, RA, VIRAMA};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    /// A registered conjunct spanning `len` cluster members (rakar included).
    Conjunct { len: usize },
    Full,
    Half,
    Nukta,
    Rakar,
    /// No table entry: the source codepoints are copied through.
    Passthrough,
}

impl PieceKind {
    pub fn label(self) -> &'static str {
        match self {
            PieceKind::Conjunct { .. } => "conjunct",
            PieceKind::Full => "full",
            PieceKind::Half => "half",
            PieceKind::Nukta => "nukta",
            PieceKind::Rakar => "rakar",
            PieceKind::Passthrough => "passthrough",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterPiece {
    pub kind: PieceKind,
    pub glyph: String,
}

impl ClusterPiece {
    fn new(kind: PieceKind, glyph: impl Into<String>) -> Self {
        Self {
            kind,
            glyph: glyph.into(),
        }
    }
}

pub fn resolve_cluster(syl: &ConsonantSyllable, tables: &Tables) -> Vec<ClusterPiece> {
    let members = syl.consonants.len();
    let mut keys: Vec<Consonant> = syl.consonants.clone();
    if syl.rakar {
        keys.push(Consonant::plain(RA));
    }

    let mut pieces = Vec::with_capacity(keys.len());
    let mut pos = 0;
    while pos < keys.len() {
        if pos == members {
            // Only the subscript र is left.
            let last = syl.consonants.last().map_or(RA, |c| c.base);
            pieces.push(ClusterPiece::new(PieceKind::Rakar, tables.rakar_glyph(last)));
            break;
        }

        if let Some((len, glyph)) = match_conjunct(&keys[pos..], pos, members, syl.virama, tables) {
            pieces.push(ClusterPiece::new(PieceKind::Conjunct { len }, glyph));
            pos += len;
            continue;
        }

        let closes = pos + 1 == members && !syl.virama;
        pieces.push(single(keys[pos], closes, tables));
        pos += 1;
    }
    pieces
}

/// Longest conjunct starting at `rest[0]` that can be drawn at this position.
fn match_conjunct(
    rest: &[Consonant],
    pos: usize,
    members: usize,
    virama: bool,
    tables: &Tables,
) -> Option<(usize, String)> {
    let plain: Vec<char> = rest
        .iter()
        .take_while(|c| !c.nukta)
        .map(|c| c.base)
        .collect();
    if plain.len() < 2 {
        return None;
    }

    for pattern in tables.conjuncts().common_prefix_search(&plain) {
        let len = pattern.consonants.len();
        let closes = pos + len >= members;
        let glyph = match (closes, virama) {
            (true, false) => pattern.full.to_string(),
            (true, true) => pattern
                .half
                .map_or_else(|| format!("{}{}", pattern.full, tables.virama_glyph()), str::to_string),
            (false, _) => match pattern.half {
                Some(half) => half.to_string(),
                None => continue,
            },
        };
        return Some((len, glyph));
    }
    None
}

fn single(c: Consonant, closes: bool, tables: &Tables) -> ClusterPiece {
    let Some(full) = tables.consonant(c.base) else {
        let mut raw = String::from(c.base);
        if c.nukta {
            raw.push(NUKTA);
        }
        if !closes {
            raw.push(VIRAMA);
        }
        return ClusterPiece::new(PieceKind::Passthrough, raw);
    };

    if closes {
        if c.nukta {
            let glyph = tables
                .nukta_consonant(c.base)
                .map_or_else(|| format!("{full}{}", tables.nukta_glyph()), str::to_string);
            return ClusterPiece::new(PieceKind::Nukta, glyph);
        }
        return ClusterPiece::new(PieceKind::Full, full);
    }

    let mut glyph = tables
        .half_form(c.base)
        .map_or_else(|| format!("{full}{}", tables.virama_glyph()), str::to_string);
    if c.nukta {
        glyph.push_str(tables.nukta_glyph());
    }
    ClusterPiece::new(PieceKind::Half, glyph)
}

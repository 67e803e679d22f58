//! Unicode → Kruti Dev 010 glyph tables (Remington layout).

use super::ConjunctPattern;

pub(super) static VOWELS: &[(char, &str)] = &[
    ('अ', "v"),
    ('आ', "vk"),
    ('इ', "b"),
    ('ई', "bZ"),
    ('उ', "m"),
    ('ऊ', "Å"),
    ('ऋ', "_"),
    // ए is a bare comma; the trailing "s" belongs to ऐ only.
    ('ए', ","),
    ('ऐ', ",s"),
    ('ओ', "vks"),
    ('औ', "vkS"),
    ('ऑ', "v‚"),
];

pub(super) static CONSONANTS: &[(char, &str)] = &[
    // velar
    ('क', "d"),
    ('ख', "[k"),
    ('ग', "x"),
    ('घ', "?k"),
    ('ङ', "³"),
    // palatal
    ('च', "p"),
    ('छ', "N"),
    ('ज', "t"),
    ('झ', ">"),
    ('ञ', "¥"),
    // retroflex
    ('ट', "V"),
    ('ठ', "B"),
    ('ड', "M"),
    ('ढ', "<"),
    ('ण', ".k"),
    // dental
    ('त', "r"),
    ('थ', "Fk"),
    ('द', "n"),
    ('ध', "/k"),
    ('न', "u"),
    // labial
    ('प', "i"),
    ('फ', "Q"),
    ('ब', "c"),
    ('भ', "Hk"),
    ('म', "e"),
    // semi-vowels
    ('य', ";"),
    ('र', "j"),
    ('ल', "y"),
    ('व', "o"),
    // sibilants
    ('श', "'k"),
    ('ष', "\"k"),
    ('स', "l"),
    ('ह', "g"),
    ('ळ', "G"),
];

/// Half forms used when a consonant precedes another consonant in a cluster.
/// Entries ending in "~" have no dedicated half glyph.
pub(super) static HALF_FORMS: &[(char, &str)] = &[
    ('क', "D"),
    ('ख', "["),
    ('ग', "X"),
    ('घ', "?"),
    ('च', "P"),
    ('छ', "N~"),
    ('ज', "T"),
    ('झ', "÷"),
    ('ञ', "¥~"),
    ('ट', "V~"),
    ('ठ', "B~"),
    ('ड', "M~"),
    ('ढ', "<~"),
    ('ण', "."),
    ('त', "R"),
    ('थ', "F"),
    ('द', "n~"),
    ('ध', "/"),
    ('न', "U"),
    ('प', "I"),
    ('फ', "¶"),
    ('ब', "C"),
    ('भ', "H"),
    ('म', "E"),
    ('य', "¸"),
    ('र', "j~"),
    ('ल', "Y"),
    ('व', "O"),
    ('श', "'"),
    ('ष', "\""),
    ('स', "L"),
    ('ह', "º"),
    ('ळ', "G~"),
];

pub(super) static MATRAS: &[(char, &str)] = &[
    ('ा', "k"),
    ('ि', "f"),
    ('ी', "h"),
    ('ु', "q"),
    ('ू', "w"),
    ('ृ', "`"),
    ('े', "s"),
    ('ै', "S"),
    ('ो', "ks"),
    ('ौ', "kS"),
    ('ॉ', "‚"),
    ('ॅ', "W"),
];

/// Matras drawn to the left of the consonant cluster.
pub(super) static PRE_BASE_MATRAS: &[char] = &['ि'];

pub(super) static MODIFIERS: &[(char, &str)] = &[('ं', "a"), ('ँ', "¡"), ('ः', "%")];

/// Nukta consonants keyed by their base consonant.
pub(super) static NUKTA_CONSONANTS: &[(char, &str)] = &[
    ('क', "d+"),
    ('ख', "[k+"),
    ('ग', "x+"),
    ('ज', "t+"),
    ('ड', "M+"),
    ('ढ', "<+"),
    ('फ', "Q+"),
    ('य', ";+"),
];

/// Consonant + matra pairs that render as a single glyph.
pub(super) static MATRA_LIGATURES: &[(char, char, &str)] = &[
    ('क', 'ृ', "\u{2014}"),
    ('द', 'ृ', "\u{2013}"),
    ('ह', 'ृ', "\u{00E2}"),
    ('र', 'ु', "#"),
    ('र', 'ू', ":"),
];

/// Standalone Devanagari signs: dandas, abbreviation sign, avagraha.
pub(super) static SIGNS: &[(char, &str)] = &[('।', "A"), ('॥', "AA"), ('॰', "Œ"), ('ऽ', "·")];

pub(super) static DIGITS: &[(char, &str)] = &[
    ('०', "0"),
    ('१', "1"),
    ('२', "2"),
    ('३', "3"),
    ('४', "4"),
    ('५', "5"),
    ('६', "6"),
    ('७', "7"),
    ('८', "8"),
    ('९', "9"),
];

/// ASCII punctuation as typed inside Hindi text.
pub(super) static CONTEXT_PUNCTUATION: &[(char, &str)] = &[
    ('(', "¼"),
    (')', "½"),
    (',', "]"),
    ('.', "-"),
    ('?', "\\"),
    (':', "%"),
    (';', "^"),
    ('-', "&"),
];

/// Typographic punctuation folded to ASCII during normalization.
pub(super) static TYPOGRAPHIC: &[(char, char)] = &[
    ('\u{2013}', '-'),
    ('\u{2014}', '-'),
    ('\u{2212}', '-'),
    ('\u{2010}', '-'),
    ('\u{2011}', '-'),
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
];

/// Precomposed nukta letters and their base consonant.
pub(super) static PRECOMPOSED_NUKTA: &[(char, char)] = &[
    ('\u{0929}', 'न'),
    ('\u{0931}', 'र'),
    ('\u{0934}', 'ळ'),
    ('\u{0958}', 'क'),
    ('\u{0959}', 'ख'),
    ('\u{095A}', 'ग'),
    ('\u{095B}', 'ज'),
    ('\u{095C}', 'ड'),
    ('\u{095D}', 'ढ'),
    ('\u{095E}', 'फ'),
    ('\u{095F}', 'य'),
];

pub(super) const VIRAMA_GLYPH: &str = "~";
pub(super) const NUKTA_GLYPH: &str = "+";
pub(super) const REPH_GLYPH: &str = "Z";
pub(super) const RAKAR_GLYPH: &str = "z";
/// Rakar under a round-bottomed consonant.
pub(super) const RAKAR_ROUND_GLYPH: &str = "ª";
pub(super) static ROUND_BOTTOM: &[char] = &['ट', 'ठ', 'ड', 'ढ', 'छ'];

const fn pattern(
    consonants: &'static [char],
    full: &'static str,
    half: Option<&'static str>,
) -> ConjunctPattern {
    ConjunctPattern {
        consonants,
        full,
        half,
    }
}

/// Conjuncts keyed by their virama-joined consonant sequence.
pub(super) static CONJUNCTS: &[ConjunctPattern] = &[
    pattern(&['क', 'ष'], "{k", Some("{")),
    pattern(&['त', 'र'], "=", Some("«")),
    pattern(&['ज', 'ञ'], "K", None),
    pattern(&['श', 'र'], "J", None),
    pattern(&['क', 'क'], "ô", None),
    pattern(&['क', 'त'], "Dr", None),
    pattern(&['त', 'त'], "Ùk", Some("Ù")),
    pattern(&['द', 'द'], "í", None),
    pattern(&['द', 'ध'], ")", None),
    pattern(&['द', 'व'], "}", None),
    pattern(&['द', 'य'], "|", None),
    pattern(&['ट', 'ट'], "ê", None),
    pattern(&['ट', 'ठ'], "ë", None),
    pattern(&['ड', 'ड'], "ì", None),
    pattern(&['ड', 'ढ'], "ï", None),
    pattern(&['न', 'न'], "é", None),
    // ha conjuncts
    pattern(&['ह', 'न'], "à", None),
    pattern(&['ह', 'य'], "á", None),
    pattern(&['ह', 'म'], "ã", None),
    pattern(&['ह', 'र'], "ºz", None),
    pattern(&['ह', 'ल'], "ày", None),
    // ya-phala under round-bottomed consonants
    pattern(&['छ', 'य'], "Nî", None),
    pattern(&['ट', 'य'], "Vî", None),
    pattern(&['ठ', 'य'], "Bî", None),
    pattern(&['ड', 'य'], "Mî", None),
    pattern(&['ढ', 'य'], "<î", None),
    // dedicated rakar glyphs
    pattern(&['क', 'र'], "Ø", None),
    pattern(&['ग', 'र'], "xz", None),
    pattern(&['प', 'र'], "ç", None),
    pattern(&['फ', 'र'], "Ý", None),
    pattern(&['द', 'र'], "æ", None),
    pattern(&['ट', 'र'], "Vª", None),
    pattern(&['ड', 'र'], "Mª", None),
    pattern(&['ढ', 'र'], "<ª", None),
    pattern(&['छ', 'र'], "Nª", None),
    pattern(&['थ', 'र'], "Fkz", None),
    pattern(&['भ', 'र'], "Hkz", None),
    pattern(&['स', 'र'], "lz", None),
    // three-consonant clusters
    pattern(&['क', 'त', 'र'], "D=", None),
    pattern(&['त', 'त', 'र'], "R=", None),
    pattern(&['क', 'ष', 'म'], "{e", None),
    pattern(&['क', 'ष', 'य'], "{;", None),
    pattern(&['त', 'र', 'य'], "«;", None),
    pattern(&['स', 'त', 'र'], "L=", None),
    pattern(&['ष', 'ट', 'र'], "\"Vª", None),
    pattern(&['न', 'द', 'र'], "Uæ", None),
];

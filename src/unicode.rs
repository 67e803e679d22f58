/// Character-level Unicode classification for Devanagari text.

pub const VIRAMA: char = '\u{094D}';
pub const NUKTA: char = '\u{093C}';
pub const RA: char = '\u{0930}';

pub fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

pub fn is_devanagari_digit(c: char) -> bool {
    ('\u{0966}'..='\u{096F}').contains(&c)
}

/// Base consonants, including the precomposed nukta letters and the
/// additional consonants at the end of the block.
pub fn is_consonant(c: char) -> bool {
    ('\u{0915}'..='\u{0939}').contains(&c)
        || ('\u{0958}'..='\u{095F}').contains(&c)
        || ('\u{0978}'..='\u{097F}').contains(&c)
}

pub fn is_independent_vowel(c: char) -> bool {
    ('\u{0904}'..='\u{0914}').contains(&c)
        || ('\u{0960}'..='\u{0961}').contains(&c)
        || ('\u{0972}'..='\u{0977}').contains(&c)
}

/// Dependent vowel signs.
pub fn is_matra(c: char) -> bool {
    ('\u{093A}'..='\u{093B}').contains(&c)
        || ('\u{093E}'..='\u{094C}').contains(&c)
        || ('\u{094E}'..='\u{094F}').contains(&c)
        || ('\u{0955}'..='\u{0957}').contains(&c)
        || ('\u{0962}'..='\u{0963}').contains(&c)
}

/// Candrabindu, anusvara and visarga (and the inverted candrabindu).
pub fn is_modifier(c: char) -> bool {
    ('\u{0900}'..='\u{0903}').contains(&c)
}

pub fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}')
}

/// True if the string contains at least one Devanagari codepoint.
pub fn contains_devanagari(s: &str) -> bool {
    s.chars().any(is_devanagari)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_devanagari('क'));
        assert!(is_devanagari('।'));
        assert!(!is_devanagari('a'));
        assert!(is_devanagari_digit('१'));
        assert!(!is_devanagari_digit('1'));
        assert!(is_consonant('क'));
        assert!(is_consonant('ह'));
        assert!(is_consonant('\u{095C}'));
        assert!(!is_consonant('अ'));
        assert!(is_independent_vowel('अ'));
        assert!(is_independent_vowel('ऋ'));
        assert!(!is_independent_vowel('ा'));
        assert!(is_matra('ि'));
        assert!(is_matra('ौ'));
        assert!(!is_matra(VIRAMA));
        assert!(!is_matra(NUKTA));
        assert!(is_modifier('ं'));
        assert!(is_modifier('ः'));
        assert!(is_zero_width('\u{200D}'));
    }

    #[test]
    fn test_contains_devanagari() {
        assert!(contains_devanagari("Hello हिंदी"));
        assert!(!contains_devanagari("Hello world"));
        assert!(!contains_devanagari(""));
    }
}

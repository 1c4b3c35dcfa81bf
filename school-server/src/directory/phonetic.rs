//! Initial-consonant (초성) keys for Hangul names.
//!
//! Korean users often type only the leading consonant of each syllable
//! (`ㅅㅇㄱ` for 서울고). Collapsing each precomposed syllable of a school
//! name to its leading consonant gives a key that such queries can match.

/// First precomposed Hangul syllable (가).
const SYLLABLE_FIRST: u32 = 0xAC00;

/// Last precomposed Hangul syllable (힣).
const SYLLABLE_LAST: u32 = 0xD7A3;

/// Syllables per leading consonant: 21 vowels × 28 trailing slots.
const SYLLABLES_PER_LEAD: u32 = 21 * 28;

/// The 19 leading consonants, in syllable-block order.
const LEADING_CONSONANTS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Whether `c` is a precomposed Hangul syllable.
pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&(c as u32))
}

/// The leading consonant of a precomposed syllable, or `None` for any other character.
pub fn leading_consonant(c: char) -> Option<char> {
    if !is_syllable(c) {
        return None;
    }
    let lead = (c as u32 - SYLLABLE_FIRST) / SYLLABLES_PER_LEAD;
    Some(LEADING_CONSONANTS[lead as usize])
}

/// Derive the phonetic key of a name.
///
/// Syllables collapse to their leading consonant, spaces are dropped, and
/// every other character passes through unchanged.
///
/// # Examples
///
/// ```
/// use school_server::directory::phonetic_key;
///
/// assert_eq!(phonetic_key("한빛고"), "ㅎㅂㄱ");
/// assert_eq!(phonetic_key("서울 Global 고"), "ㅅㅇGlobalㄱ");
/// ```
pub fn phonetic_key(name: &str) -> String {
    name.chars()
        .filter(|&c| c != ' ')
        .map(|c| leading_consonant(c).unwrap_or(c))
        .collect()
}

/// Whether a query should be compared verbatim against phonetic keys.
///
/// True when the query contains no syllables, ASCII letters or ASCII
/// digits, i.e. it is made of bare consonants (and punctuation). Mixed
/// queries such as `서울a` or `ㅅ1` are not initial-only.
pub fn is_initial_only(query: &str) -> bool {
    query
        .chars()
        .all(|c| !is_syllable(c) && !c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_syllables() {
        assert_eq!(phonetic_key("한빛고"), "ㅎㅂㄱ");
        assert_eq!(phonetic_key("서울고등학교"), "ㅅㅇㄱㄷㅎㄱ");
        assert_eq!(phonetic_key("부산고등학교"), "ㅂㅅㄱㄷㅎㄱ");
    }

    #[test]
    fn block_boundaries() {
        assert_eq!(leading_consonant('가'), Some('ㄱ'));
        assert_eq!(leading_consonant('힣'), Some('ㅎ'));
        assert_eq!(leading_consonant('까'), Some('ㄲ'));
        assert_eq!(leading_consonant('ㄱ'), None);
        assert_eq!(leading_consonant('a'), None);
    }

    #[test]
    fn drops_spaces_keeps_everything_else() {
        assert_eq!(phonetic_key("서울 과학 고"), "ㅅㅇㄱㅎㄱ");
        assert_eq!(phonetic_key("KAIST (부설)"), "KAIST(ㅂㅅ)");
        assert_eq!(phonetic_key(""), "");
    }

    #[test]
    fn initial_only_classification() {
        assert!(is_initial_only("ㅅㅇ"));
        assert!(is_initial_only("ㅅ-ㅇ"));
        assert!(!is_initial_only("서울"));
        assert!(!is_initial_only("ㅅ울"));
        assert!(!is_initial_only("seoul"));
        assert!(!is_initial_only("ㅅ1"));
        assert!(!is_initial_only("서울a"));
    }
}

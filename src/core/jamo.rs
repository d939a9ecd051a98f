// src/core/jamo.rs
//
// Static Dubeolsik key tables and Hangul syllable composition.
// All tables are immutable; lookups are plain matches and array scans.

/// Implicit leading consonant used when a vowel opens a block on its own.
pub const NULL_INITIAL: char = 'ㅇ';

/// First code point of the precomposed syllable block range (가).
const SYLLABLE_BASE: u32 = 0xAC00;

/// Leading consonants in canonical order (19 forms).
const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowels in canonical order (21 forms, compounds included).
const JUNGSEONG: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Trailing consonants in canonical order. Slot 0 of the 28-entry trailing
/// index is "no final" and is handled by offsetting positions here by one.
const JONGSEONG: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ',
    'ㅁ', 'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Maps a Dubeolsik key to its consonant jamo. Uppercase keys give the
/// tense (doubled) consonants, so the mapping is case-sensitive.
pub fn consonant_for_key(key: char) -> Option<char> {
    match key {
        'r' => Some('ㄱ'),
        'R' => Some('ㄲ'),
        's' | 'S' => Some('ㄴ'),
        'e' => Some('ㄷ'),
        'E' => Some('ㄸ'),
        'f' | 'F' => Some('ㄹ'),
        'a' | 'A' => Some('ㅁ'),
        'q' => Some('ㅂ'),
        'Q' => Some('ㅃ'),
        't' => Some('ㅅ'),
        'T' => Some('ㅆ'),
        'd' | 'D' => Some('ㅇ'),
        'w' => Some('ㅈ'),
        'W' => Some('ㅉ'),
        'c' | 'C' => Some('ㅊ'),
        'z' | 'Z' => Some('ㅋ'),
        'x' | 'X' => Some('ㅌ'),
        'v' | 'V' => Some('ㅍ'),
        'g' | 'G' => Some('ㅎ'),
        _ => None,
    }
}

/// Maps a Dubeolsik key to its vowel jamo. `O` and `P` are the shifted
/// forms ㅒ and ㅖ; the seven remaining compound vowels are reached by
/// typing their two constituents in sequence.
pub fn vowel_for_key(key: char) -> Option<char> {
    match key {
        'k' | 'K' => Some('ㅏ'),
        'o' => Some('ㅐ'),
        'i' | 'I' => Some('ㅑ'),
        'O' => Some('ㅒ'),
        'j' | 'J' => Some('ㅓ'),
        'p' => Some('ㅔ'),
        'u' | 'U' => Some('ㅕ'),
        'P' => Some('ㅖ'),
        'h' | 'H' => Some('ㅗ'),
        'y' | 'Y' => Some('ㅛ'),
        'n' | 'N' => Some('ㅜ'),
        'b' | 'B' => Some('ㅠ'),
        'm' | 'M' => Some('ㅡ'),
        'l' | 'L' => Some('ㅣ'),
        _ => None,
    }
}

/// Merges two simple vowels into a compound vowel, if the pair is defined.
pub fn merge_vowels(first: char, second: char) -> Option<char> {
    match (first, second) {
        ('ㅗ', 'ㅏ') => Some('ㅘ'),
        ('ㅗ', 'ㅐ') => Some('ㅙ'),
        ('ㅗ', 'ㅣ') => Some('ㅚ'),
        ('ㅜ', 'ㅓ') => Some('ㅝ'),
        ('ㅜ', 'ㅔ') => Some('ㅞ'),
        ('ㅜ', 'ㅣ') => Some('ㅟ'),
        ('ㅡ', 'ㅣ') => Some('ㅢ'),
        _ => None,
    }
}

/// Merges two simple trailing consonants into a compound final, if defined.
pub fn merge_finals(first: char, second: char) -> Option<char> {
    match (first, second) {
        ('ㄱ', 'ㅅ') => Some('ㄳ'),
        ('ㄴ', 'ㅈ') => Some('ㄵ'),
        ('ㄴ', 'ㅎ') => Some('ㄶ'),
        ('ㄹ', 'ㄱ') => Some('ㄺ'),
        ('ㄹ', 'ㅁ') => Some('ㄻ'),
        ('ㄹ', 'ㅂ') => Some('ㄼ'),
        ('ㄹ', 'ㅅ') => Some('ㄽ'),
        ('ㄹ', 'ㅌ') => Some('ㄾ'),
        ('ㄹ', 'ㅍ') => Some('ㄿ'),
        ('ㄹ', 'ㅎ') => Some('ㅀ'),
        ('ㅂ', 'ㅅ') => Some('ㅄ'),
        _ => None,
    }
}

/// Splits a compound final back into its two constituents. Used when a
/// block gives up its final consonant to lead the next block.
pub fn split_final(compound: char) -> Option<(char, char)> {
    match compound {
        'ㄳ' => Some(('ㄱ', 'ㅅ')),
        'ㄵ' => Some(('ㄴ', 'ㅈ')),
        'ㄶ' => Some(('ㄴ', 'ㅎ')),
        'ㄺ' => Some(('ㄹ', 'ㄱ')),
        'ㄻ' => Some(('ㄹ', 'ㅁ')),
        'ㄼ' => Some(('ㄹ', 'ㅂ')),
        'ㄽ' => Some(('ㄹ', 'ㅅ')),
        'ㄾ' => Some(('ㄹ', 'ㅌ')),
        'ㄿ' => Some(('ㄹ', 'ㅍ')),
        'ㅀ' => Some(('ㄹ', 'ㅎ')),
        'ㅄ' => Some(('ㅂ', 'ㅅ')),
        _ => None,
    }
}

/// Composes a syllable block from its jamo. Returns None if any index
/// lookup fails (e.g. a consonant that cannot stand in the final slot).
pub fn compose_syllable(initial: char, medial: char, trailing: Option<char>) -> Option<char> {
    let lead_idx = CHOSEONG.iter().position(|&c| c == initial)? as u32;
    let vowel_idx = JUNGSEONG.iter().position(|&c| c == medial)? as u32;
    let trail_idx = match trailing {
        None => 0,
        Some(t) => JONGSEONG.iter().position(|&c| c == t)? as u32 + 1,
    };
    char::from_u32(SYLLABLE_BASE + (lead_idx * 21 + vowel_idx) * 28 + trail_idx)
}

/// Whether a character is Hangul: a composed syllable block or a
/// standalone compatibility jamo.
pub fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{3131}'..='\u{3163}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        assert_eq!(CHOSEONG.len(), 19);
        assert_eq!(JUNGSEONG.len(), 21);
        assert_eq!(JONGSEONG.len(), 27);
    }

    #[test]
    fn composes_known_syllables() {
        assert_eq!(compose_syllable('ㄱ', 'ㅏ', None), Some('가'));
        assert_eq!(compose_syllable('ㅎ', 'ㅏ', Some('ㄴ')), Some('한'));
        assert_eq!(compose_syllable('ㄱ', 'ㅡ', Some('ㄹ')), Some('글'));
        assert_eq!(compose_syllable('ㄷ', 'ㅏ', Some('ㄺ')), Some('닭'));
    }

    #[test]
    fn compose_rejects_invalid_final() {
        // Tense ㄸ cannot stand in the trailing slot.
        assert_eq!(compose_syllable('ㄱ', 'ㅏ', Some('ㄸ')), None);
    }

    #[test]
    fn tense_consonants_are_case_sensitive() {
        assert_eq!(consonant_for_key('r'), Some('ㄱ'));
        assert_eq!(consonant_for_key('R'), Some('ㄲ'));
        assert_eq!(vowel_for_key('o'), Some('ㅐ'));
        assert_eq!(vowel_for_key('O'), Some('ㅒ'));
    }

    #[test]
    fn merge_and_split_are_inverses() {
        for compound in ['ㄳ', 'ㄵ', 'ㄶ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅄ'] {
            let (a, b) = split_final(compound).unwrap();
            assert_eq!(merge_finals(a, b), Some(compound));
        }
    }

    #[test]
    fn undefined_pairs_do_not_merge() {
        assert_eq!(merge_vowels('ㅏ', 'ㅏ'), None);
        assert_eq!(merge_vowels('ㅣ', 'ㅡ'), None);
        assert_eq!(merge_finals('ㄴ', 'ㄱ'), None);
    }

    #[test]
    fn hangul_detection() {
        assert!(is_hangul('한'));
        assert!(is_hangul('ㄱ'));
        assert!(is_hangul('ㅢ'));
        assert!(!is_hangul('a'));
        assert!(!is_hangul(' '));
        assert!(!is_hangul('漢'));
    }
}

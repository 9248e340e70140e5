//! QWERTY adjacency typos and the stuck-key word list.

/// Words a sticky typebar tends to double ("the" → "thethe").
pub const STUCK_KEY_WORDS: [&str; 10] = [
    "the", "and", "that", "with", "have", "this", "will", "your", "from", "they",
];

/// Plausible neighbouring keys for a lowercase letter, in table order.
///
/// `q` and `w` have no entry, nor does anything outside `a..=z`.
pub fn substitutes(letter: char) -> Option<&'static [char]> {
    let keys: &'static [char] = match letter {
        'e' => &['3', 'r', 'w'],
        'r' => &['t', 'e', 'f'],
        't' => &['y', 'r', 'g'],
        'y' => &['t', 'u', 'h'],
        'u' => &['i', 'y', 'j'],
        'i' => &['o', 'u', 'k'],
        'o' => &['p', 'i', 'l'],
        'p' => &['o', 'l', ';'],
        'a' => &['s', 'q'],
        's' => &['d', 'a', 'w'],
        'd' => &['f', 's', 'e'],
        'f' => &['g', 'd', 'r'],
        'g' => &['h', 'f', 't'],
        'h' => &['j', 'g', 'y'],
        'j' => &['k', 'h', 'u'],
        'k' => &['l', 'j', 'i'],
        'l' => &['k', 'o', ';'],
        'z' => &['x', 'a'],
        'x' => &['c', 'z', 's'],
        'c' => &['v', 'x', 'd'],
        'v' => &['b', 'c', 'f'],
        'b' => &['n', 'v', 'g'],
        'n' => &['m', 'b', 'h'],
        'm' => &['n', 'j'],
        _ => return None,
    };
    Some(keys)
}

pub fn is_stuck_key_word(word: &str) -> bool {
    STUCK_KEY_WORDS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_has_one_to_three_substitutes() {
        for letter in 'a'..='z' {
            if let Some(keys) = substitutes(letter) {
                assert!((1..=3).contains(&keys.len()), "{letter}: {keys:?}");
                assert!(!keys.contains(&letter), "{letter} substitutes itself");
            }
        }
    }

    #[test]
    fn test_table_covers_24_letters() {
        let covered = ('a'..='z').filter(|c| substitutes(*c).is_some()).count();
        assert_eq!(covered, 24);
        assert!(substitutes('q').is_none());
        assert!(substitutes('w').is_none());
    }

    #[test]
    fn test_non_letters_and_uppercase_have_no_entry() {
        for c in ['1', ';', ' ', 'E', 'é', '\n'] {
            assert!(substitutes(c).is_none(), "{c:?}");
        }
    }

    #[test]
    fn test_stuck_key_words_match_case_insensitively() {
        assert!(is_stuck_key_word("the"));
        assert!(is_stuck_key_word("The"));
        assert!(is_stuck_key_word("THEY"));
        assert!(!is_stuck_key_word("then"));
        assert!(!is_stuck_key_word("the,"));
    }
}

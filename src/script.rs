use std::ops::RangeInclusive;

/// Lowercase Russian alphabet, `а` through `ё`.
const TARGET_ALPHABET: RangeInclusive<char> = 'а'..='ё';
/// Lowercase Latin alphabet.
const FOREIGN_ALPHABET: RangeInclusive<char> = 'a'..='z';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Unknown,
    Target,
    Foreign,
}

/// Decides which alphabet a word is written in.
///
/// A heuristic, not a language detector: words mixing both alphabets
/// come back as `Unknown`.
pub fn classify(word: &str) -> Script {
    if word.is_empty() {
        return Script::Unknown;
    }

    let Some((min, max)) = letter_bounds(word) else {
        return Script::Unknown;
    };

    if within(&TARGET_ALPHABET, min, max) {
        Script::Target
    } else if within(&FOREIGN_ALPHABET, min, max) {
        Script::Foreign
    } else {
        Script::Unknown
    }
}

/// Smallest and largest letter of the lowercased word.
/// Digits, punctuation and whitespace are skipped; `None` when no letter is left.
pub fn letter_bounds(word: &str) -> Option<(char, char)> {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .fold(None, |bounds, c| match bounds {
            None => Some((c, c)),
            Some((min, max)) => Some((min.min(c), max.max(c))),
        })
}

fn within(alphabet: &RangeInclusive<char>, min: char, max: char) -> bool {
    min >= *alphabet.start() && max <= *alphabet.end()
}

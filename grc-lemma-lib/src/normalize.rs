// Canonical lookup keys for Greek text.
//
// Every call site (synthesis, resolution, indexing, runtime query) must go
// through `normalize` so that keys compare bit-for-bit.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::NormalizedForm;

const FINAL_SIGMA: char = 'ς';
const MEDIAL_SIGMA: char = 'σ';

/// Greek and Coptic, then Greek Extended.
const GREEK_RANGES: &[(char, char)] = &[('\u{0370}', '\u{03FF}'), ('\u{1F00}', '\u{1FFF}')];

/// True for letters inside the accepted Greek blocks.
pub fn is_greek_letter(c: char) -> bool {
    c.is_alphabetic() && GREEK_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Normalize a Greek fragment into a lookup key.
///
/// NFD, drop combining marks, lowercase, final sigma to medial, then keep only
/// Greek letters. Anything else (digits, punctuation, Latin, whitespace) is
/// discarded, so non-Greek input yields the empty key.
pub fn normalize(text: &str) -> NormalizedForm {
    NormalizedForm::from_normalized(fold(text).filter(|&c| is_greek_letter(c)).collect())
}

/// Normalize a line while keeping word boundaries: every run of non-letters
/// becomes a single space.
pub fn normalize_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in fold(text) {
        if is_greek_letter(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Split running text into `(token, key)` pairs. Tokens are the raw
/// whitespace-separated words with surrounding punctuation removed; tokens
/// that normalize to nothing are skipped.
pub fn words(text: &str) -> Vec<(String, NormalizedForm)> {
    text.split_whitespace()
        .flat_map(|chunk| chunk.split(|c: char| !c.is_alphanumeric() && !is_combining_mark(c)))
        .filter(|t| !t.is_empty())
        .filter_map(|t| {
            let key = normalize(t);
            (!key.is_empty()).then(|| (t.to_string(), key))
        })
        .collect()
}

fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == FINAL_SIGMA { MEDIAL_SIGMA } else { c })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menin() {
        assert_eq!(normalize("Μῆνιν"), "μηνιν");
    }

    #[test]
    fn test_final_sigma() {
        assert_eq!(normalize("λόγος"), "λογοσ");
        assert_eq!(normalize("ΛΟΓΟΣ"), "λογοσ");
    }

    #[test]
    fn test_breathing_and_subscript() {
        assert_eq!(normalize("ἄειδε"), "αειδε");
        assert_eq!(normalize("τῷ"), "τω");
        assert_eq!(normalize("Ἀχιλῆος"), "αχιληοσ");
    }

    #[test]
    fn test_non_greek_dropped() {
        assert_eq!(normalize("abc 123 !?"), "");
        assert_eq!(normalize("θεά, 1.1"), "θεα");
        assert!(normalize("").is_empty());
    }

    #[test]
    fn test_idempotent() {
        for s in ["Πηληϊάδεω Ἀχιλῆος", "οὐλομένην, ἣ", "ΣΩΚΡΑΤΗΣ", "ᾄσω", "ϴϐϗ"] {
            let once = normalize(s);
            assert_eq!(normalize(once.as_str()), once, "not idempotent for {s}");
        }
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(
            normalize_line("Μῆνιν ἄειδε, θεά, Πηληϊάδεω Ἀχιλῆος"),
            "μηνιν αειδε θεα πηληιαδεω αχιληοσ"
        );
        assert_eq!(normalize_line("  ... "), "");
    }

    #[test]
    fn test_words_keeps_tokens() {
        let w = words("ἄειδε, θεά·");
        assert_eq!(w.len(), 2);
        assert_eq!(w[0].0, "ἄειδε");
        assert_eq!(w[0].1, "αειδε");
        assert_eq!(w[1].1, "θεα");
    }
}

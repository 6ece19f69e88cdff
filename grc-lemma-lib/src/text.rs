// Line-level resolution: split running text into words and resolve each
// independently.

use rayon::prelude::*;

use crate::dictionary::HeadwordIndex;
use crate::normalize;
use crate::resolve;
use crate::types::*;

/// Resolve every word of a line of running Greek. Punctuation and non-Greek
/// tokens are skipped; the token as written is kept next to its key.
pub fn resolve_line(input: &str, headwords: &HeadwordIndex) -> LineResolution {
    let words = normalize::words(input)
        .into_iter()
        .map(|(token, normalized)| {
            let candidates = resolve::resolve(&normalized, headwords);
            WordResolution {
                token,
                normalized,
                candidates,
            }
        })
        .collect();
    LineResolution {
        input: input.to_string(),
        words,
    }
}

/// Resolve many lines in parallel, preserving input order.
pub fn resolve_lines<S: AsRef<str> + Sync>(lines: &[S], headwords: &HeadwordIndex) -> Vec<LineResolution> {
    lines
        .par_iter()
        .map(|l| resolve_line(l.as_ref(), headwords))
        .collect()
}

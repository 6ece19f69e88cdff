// Compact text rendering of resolution results.

use crate::types::*;

/// Render one candidate as `{lemma:confidence:reason}`.
///
/// Confidence is printed with two decimals, e.g. `{λογοσ:0.60:stem-strip}`.
pub fn to_bracketed(c: &Candidate) -> String {
    let lemma = &c.lemma;
    let reason = c.reason.as_str();
    format!("{{{lemma}:{:.2}:{reason}}}", c.confidence)
}

/// All candidates for one form, best first.
pub fn candidates_to_bracketed(candidates: &[Candidate]) -> String {
    candidates.iter().map(to_bracketed).collect::<Vec<_>>().join(", ")
}

/// Top candidate per word of a line. Words with no candidate render as
/// `{token:?}`.
pub fn line_to_bracketed(line: &LineResolution) -> String {
    line.words
        .iter()
        .map(|w| {
            w.candidates
                .first()
                .map(to_bracketed)
                .unwrap_or_else(|| format!("{{{}:?}}", w.token))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Index lookup rows as `{lemma:confidence:source}`.
pub fn hits_to_bracketed(hits: &[LookupHit]) -> String {
    hits.iter()
        .map(|h| format!("{{{}:{:.2}:{}}}", h.lemma, h.confidence, h.source))
        .collect::<Vec<_>>()
        .join(", ")
}

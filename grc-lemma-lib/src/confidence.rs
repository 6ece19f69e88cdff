// Rule → confidence table and candidate ordering.
//
// Confidence is decided by which rule fired, never computed from the form.

use std::cmp::Ordering;

use crate::types::*;

// Confidence per rule.
const EXACT: f64 = 0.9;
const SUFFIX_ADD: f64 = 0.7;
const STEM_BARE: f64 = 0.5;
const STEM_DICT_ENDING: f64 = 0.6;
const STEM_CONTRACT_ENDING: f64 = 0.5;
const AUGMENT_EXACT: f64 = 0.6;
const AUGMENT_STRIPPED: f64 = 0.5;
const AUGMENT_EXCEPTION: f64 = 0.5;
const PARTICIPLE_THEMATIC: f64 = 0.6;
const PARTICIPLE_CONTRACT: f64 = 0.5;
// χολωθείς: the ω before θ is a lengthened ο.
const PARTICIPLE_LENGTHENED_O: f64 = 0.6;
const PATRONYMIC: f64 = 0.75;

/// Every way the resolver can reach a headword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Exact,
    SuffixAdd,
    StemBare,
    StemDictEnding,
    StemContractEnding,
    AugmentExact,
    AugmentStripped,
    AugmentException,
    ParticipleThematic,
    ParticipleContract,
    ParticipleLengthenedO,
    Patronymic,
}

impl Rule {
    pub fn confidence(self) -> f64 {
        match self {
            Rule::Exact => EXACT,
            Rule::SuffixAdd => SUFFIX_ADD,
            Rule::StemBare => STEM_BARE,
            Rule::StemDictEnding => STEM_DICT_ENDING,
            Rule::StemContractEnding => STEM_CONTRACT_ENDING,
            Rule::AugmentExact => AUGMENT_EXACT,
            Rule::AugmentStripped => AUGMENT_STRIPPED,
            Rule::AugmentException => AUGMENT_EXCEPTION,
            Rule::ParticipleThematic => PARTICIPLE_THEMATIC,
            Rule::ParticipleContract => PARTICIPLE_CONTRACT,
            Rule::ParticipleLengthenedO => PARTICIPLE_LENGTHENED_O,
            Rule::Patronymic => PATRONYMIC,
        }
    }

    pub fn reason(self) -> ReasonCode {
        match self {
            Rule::Exact => ReasonCode::Exact,
            Rule::SuffixAdd => ReasonCode::SuffixAdd,
            Rule::StemBare | Rule::StemDictEnding | Rule::StemContractEnding => ReasonCode::StemStrip,
            Rule::AugmentExact | Rule::AugmentStripped | Rule::AugmentException => ReasonCode::Augment,
            Rule::ParticipleThematic | Rule::ParticipleContract | Rule::ParticipleLengthenedO => {
                ReasonCode::PassiveParticiple
            }
            Rule::Patronymic => ReasonCode::Patronymic,
        }
    }

    pub fn candidate(self, lemma: NormalizedForm) -> Candidate {
        Candidate {
            lemma,
            confidence: self.confidence(),
            reason: self.reason(),
        }
    }
}

/// Clamp an externally supplied confidence into `[0, 1]`. Returns None for
/// NaN and infinities.
pub fn clamp(confidence: f64) -> Option<f64> {
    confidence.is_finite().then(|| confidence.clamp(0.0, 1.0))
}

fn by_confidence_then_lemma(ac: f64, al: &NormalizedForm, bc: f64, bl: &NormalizedForm) -> Ordering {
    // Higher confidence first.
    bc.partial_cmp(&ac).unwrap_or(Ordering::Equal).then_with(|| al.cmp(bl))
}

/// Best candidate first; ties alphabetical by lemma.
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    by_confidence_then_lemma(a.confidence, &a.lemma, b.confidence, &b.lemma)
}

/// Same ordering for index rows.
pub fn compare_records(a: &MappingRecord, b: &MappingRecord) -> Ordering {
    by_confidence_then_lemma(a.confidence, &a.lemma, b.confidence, &b.lemma)
}

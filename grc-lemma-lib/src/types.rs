use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::normalize::normalize;

/// A lookup key produced by [`normalize`]. Lowercase, unaccented Greek letters
/// only, with medial sigma everywhere.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedForm(String);

impl NormalizedForm {
    // Only the normalizer builds these.
    pub(crate) fn from_normalized(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in letters (not bytes).
    pub fn letters(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedForm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedForm {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NormalizedForm {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedForm {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// Anything read from outside goes through the normalizer again, which is a
// no-op for keys that were already normalized.
impl<'de> Deserialize<'de> for NormalizedForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(normalize(&raw))
    }
}

/// A dictionary headword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headword {
    pub normalized_form: NormalizedForm,
    pub language: String,
    /// The citation form as printed in the lexicon (e.g. "λόγος").
    pub raw_display_form: String,
}

impl Headword {
    /// Build a headword from its display form.
    pub fn new(display: &str, language: &str) -> Self {
        Self {
            normalized_form: normalize(display),
            language: language.to_string(),
            raw_display_form: display.to_string(),
        }
    }
}

/// Provenance of a mapping record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceTag(String);

impl SourceTag {
    /// Forms synthesized from a headword's paradigm.
    pub const GENERATED: &'static str = "generated";
    /// Candidates proposed by the resolver for corpus forms.
    pub const ALGORITHMIC: &'static str = "algorithmic";
    /// Hand-curated common forms (pronouns, particles, elisions).
    pub const MANUAL: &'static str = "manual_common_forms";
    /// Hand-curated proper names.
    pub const PROPER_NOUNS: &'static str = "proper_nouns";
    /// Movable-nu variants derived from other records.
    pub const NU_MOVABLE: &'static str = "generated:nu-movable";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One (surface form → lemma) mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub word_form: NormalizedForm,
    pub lemma: NormalizedForm,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub source: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morph_info: Option<String>,
}

impl MappingRecord {
    /// Composite primary key.
    pub fn key(&self) -> (&NormalizedForm, &NormalizedForm) {
        (&self.word_form, &self.lemma)
    }
}

/// An ordered stream of records sharing one provenance tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSource {
    pub tag: SourceTag,
    pub records: Vec<MappingRecord>,
}

impl MappingSource {
    pub fn new(tag: SourceTag, records: Vec<MappingRecord>) -> Self {
        Self { tag, records }
    }
}

/// Optional part-of-speech hint for synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstDecl {
    /// χώρα, χώρας
    AlphaLong,
    /// θάλαττα, θαλάττης
    AlphaShort,
    /// τιμή, τιμῆς
    Eta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThirdDecl {
    /// φύλαξ, φύλακος
    Consonant,
    /// γένος, γένους
    Sigma,
    /// σῶμα, σώματος
    DentalNeuter,
}

/// Which inflection table drives synthesis for a headword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParadigmClass {
    FirstDeclFem(FirstDecl),
    SecondDeclMasc,
    SecondDeclNeut,
    ThirdDecl(ThirdDecl),
    VerbThematic,
    VerbAthematic,
    AdjTwoOneTwo,
    AdjTwoOneTwoCompound,
    /// Table-driven paradigm, named by its citation form.
    Irregular(&'static str),
}

/// One synthesized form with the paradigm cell that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inflection {
    pub form: NormalizedForm,
    pub class: ParadigmClass,
    /// Cell label, e.g. "gen sg" or "aor act ind 3sg".
    pub cell: String,
}

/// Which resolver rule produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    Exact,
    SuffixAdd,
    StemStrip,
    Augment,
    PassiveParticiple,
    Patronymic,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::Exact => "exact",
            ReasonCode::SuffixAdd => "suffix-add",
            ReasonCode::StemStrip => "stem-strip",
            ReasonCode::Augment => "augment",
            ReasonCode::PassiveParticiple => "passive-participle",
            ReasonCode::Patronymic => "patronymic",
        }
    }
}

/// A validated lemma proposed for a surface form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub lemma: NormalizedForm,
    pub confidence: f64,
    pub reason: ReasonCode,
}

/// Candidates for every word of a line of running text.
#[derive(Debug, Clone, Serialize)]
pub struct WordResolution {
    /// The token as written.
    pub token: String,
    pub normalized: NormalizedForm,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineResolution {
    pub input: String,
    pub words: Vec<WordResolution>,
}

/// One row of a form lookup against the built index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupHit {
    pub lemma: NormalizedForm,
    pub confidence: f64,
    pub source: SourceTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morph_info: Option<String>,
}

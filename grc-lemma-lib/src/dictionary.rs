use ahash::{AHashMap, AHashSet};

use crate::normalize::normalize;
use crate::types::{Headword, NormalizedForm};

/// In-memory headword set, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct HeadwordIndex {
    entries: AHashMap<NormalizedForm, Vec<Headword>>,
    /// Keys in sorted order, for deterministic iteration.
    order: Vec<NormalizedForm>,
}

impl HeadwordIndex {
    /// Build the index. Headwords that normalize to the empty key are ignored;
    /// several display forms may share a key (e.g. εἰμί and εἶμι).
    pub fn new(headwords: impl IntoIterator<Item = Headword>) -> Self {
        let mut entries: AHashMap<NormalizedForm, Vec<Headword>> = AHashMap::new();
        for hw in headwords {
            if hw.normalized_form.is_empty() {
                continue;
            }
            let bucket = entries.entry(hw.normalized_form.clone()).or_default();
            if !bucket.contains(&hw) {
                bucket.push(hw);
            }
        }
        let mut order: Vec<_> = entries.keys().cloned().collect();
        order.sort();
        Self { entries, order }
    }

    /// Convenience constructor from display forms in one language.
    pub fn from_display_forms<'a>(forms: impl IntoIterator<Item = &'a str>, language: &str) -> Self {
        Self::new(forms.into_iter().map(|f| Headword::new(f, language)))
    }

    /// Look up all headwords sharing a key.
    pub fn lookup(&self, key: &str) -> Option<&[Headword]> {
        self.entries.get(key).map(|v| v.as_slice())
    }

    /// Check whether any headword has this key.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The stored key equal to `key`, if any.
    pub fn canonical(&self, key: &str) -> Option<&NormalizedForm> {
        self.entries.get_key_value(key).map(|(k, _)| k)
    }

    /// Distinct keys in sorted order.
    pub fn keys(&self) -> &[NormalizedForm] {
        &self.order
    }

    /// One representative headword per key, in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Headword> {
        self.order.iter().filter_map(|k| self.entries.get(k).and_then(|v| v.first()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Forms observed in the indexed corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusVocabulary {
    forms: AHashSet<NormalizedForm>,
}

impl CorpusVocabulary {
    pub fn new(forms: impl IntoIterator<Item = NormalizedForm>) -> Self {
        Self {
            forms: forms.into_iter().filter(|f| !f.is_empty()).collect(),
        }
    }

    /// Normalize and collect raw words.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(words.into_iter().map(normalize))
    }

    pub fn contains(&self, form: &str) -> bool {
        self.forms.contains(form)
    }

    /// Forms in sorted order.
    pub fn sorted(&self) -> Vec<&NormalizedForm> {
        let mut v: Vec<_> = self.forms.iter().collect();
        v.sort();
        v
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

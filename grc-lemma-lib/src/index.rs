// Multi-source reconciliation and the resulting form → lemma index.
//
// Sources are merged in a fixed order into a sharded working set with
// insert-if-absent semantics on (word_form, lemma): the first writer wins and
// later records for the same key are counted and dropped. After merging,
// movable-nu twins are derived, records pointing at unknown lemmas are
// removed, and (optionally) the set is pruned to the corpus vocabulary.

use std::io::Write;

use ahash::{AHashMap, RandomState};
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{BuildConfig, SourceSlot};
use crate::confidence;
use crate::dictionary::{CorpusVocabulary, HeadwordIndex};
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::paradigm;
use crate::resolve;
use crate::tables::{COMMON_FORMS, COMMON_FORM_CONFIDENCE, PROPER_NAMES, PROPER_NAME_CONFIDENCE};
use crate::types::*;

const NU: char = 'ν';
const NU_THIRD_PERSON_CONFIDENCE: f64 = 0.9;
const NU_GUESSED_CONFIDENCE: f64 = 0.8;
const NU_GUESSED_MIN_LETTERS: usize = 4;
const NU_GUESSED_MORPH: &str = "3 s (nu-movable)";

// ---------------------------------------------------------------------------
// Working set
// ---------------------------------------------------------------------------

type Shard = AHashMap<NormalizedForm, Vec<MappingRecord>>;

/// Records grouped by word form, split across mutex-guarded shards by a hash
/// of the form. A key lives in exactly one shard, so insert-if-absent is
/// atomic under that shard's lock.
struct ShardedStore {
    shards: Vec<Mutex<Shard>>,
    hasher: RandomState,
}

#[derive(Debug, Default, Clone, Copy)]
struct Ingested {
    inserted: usize,
    duplicates: usize,
}

impl ShardedStore {
    fn new(shards: usize) -> Self {
        Self {
            shards: (0..shards.max(1)).map(|_| Mutex::new(Shard::default())).collect(),
            hasher: RandomState::new(),
        }
    }

    fn shard_of(&self, form: &NormalizedForm) -> usize {
        (self.hasher.hash_one(form) % self.shards.len() as u64) as usize
    }

    /// Insert every record whose key is new. Records are partitioned by shard
    /// keeping their relative order, then each shard ingests its slice in
    /// parallel with the others.
    fn ingest(&self, records: Vec<MappingRecord>) -> Ingested {
        let mut parts: Vec<Vec<MappingRecord>> = vec![Vec::new(); self.shards.len()];
        for r in records {
            parts[self.shard_of(&r.word_form)].push(r);
        }
        parts
            .into_par_iter()
            .enumerate()
            .map(|(i, part)| {
                let mut shard = self.shards[i].lock();
                let mut counts = Ingested::default();
                for r in part {
                    let bucket = shard.entry(r.word_form.clone()).or_default();
                    if bucket.iter().any(|existing| existing.lemma == r.lemma) {
                        counts.duplicates += 1;
                    } else {
                        bucket.push(r);
                        counts.inserted += 1;
                    }
                }
                counts
            })
            .reduce(Ingested::default, |a, b| Ingested {
                inserted: a.inserted + b.inserted,
                duplicates: a.duplicates + b.duplicates,
            })
    }

    fn has_form(&self, form: &NormalizedForm) -> bool {
        self.shards[self.shard_of(form)]
            .lock()
            .get(form)
            .map_or(false, |v| !v.is_empty())
    }

    /// Drop every record failing `keep`; returns how many were dropped.
    fn retain<F>(&self, keep: F) -> usize
    where
        F: Fn(&MappingRecord) -> bool + Sync,
    {
        self.shards
            .par_iter()
            .map(|m| {
                let mut shard = m.lock();
                let mut dropped = 0;
                shard.retain(|_, bucket| {
                    let before = bucket.len();
                    bucket.retain(|r| keep(r));
                    dropped += before - bucket.len();
                    !bucket.is_empty()
                });
                dropped
            })
            .sum()
    }

    /// Clone of every record, for passes that derive new records.
    fn snapshot(&self) -> Vec<MappingRecord> {
        self.shards
            .par_iter()
            .flat_map_iter(|m| m.lock().values().flatten().cloned().collect::<Vec<_>>())
            .collect()
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|m| m.lock().values().map(Vec::len).sum::<usize>()).sum()
    }

    fn into_records(self) -> impl Iterator<Item = MappingRecord> {
        self.shards
            .into_iter()
            .flat_map(|m| m.into_inner().into_iter().flat_map(|(_, bucket)| bucket))
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Per-source ingestion counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub tag: String,
    pub offered: usize,
    pub inserted: usize,
    pub duplicates: usize,
}

/// What the build did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub sources: Vec<SourceReport>,
    pub nu_movable_added: usize,
    /// External records whose confidence was clamped into `[0, 1]`.
    pub clamped_confidence: usize,
    /// External records dropped for a NaN or infinite confidence.
    pub rejected_confidence: usize,
    /// Records removed because their lemma is not a headword.
    pub dropped_unknown_lemma: usize,
    /// Records removed because their form is not in the corpus.
    pub pruned: usize,
    pub final_size: usize,
}

impl BuildReport {
    pub fn duplicates(&self) -> usize {
        self.sources.iter().map(|s| s.duplicates).sum()
    }

    pub fn source(&self, tag: &str) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.tag == tag)
    }
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Merge every source into a deduplicated, validated and (optionally)
/// corpus-pruned index.
///
/// `external` feeds fill the [`SourceSlot::External`] slot in the order
/// given. Fails only on missing required inputs.
pub fn build(
    external: &[MappingSource],
    headwords: &HeadwordIndex,
    corpus: Option<&CorpusVocabulary>,
    config: &BuildConfig,
) -> Result<(MappingIndex, BuildReport)> {
    if headwords.is_empty() {
        return Err(Error::MissingHeadwords);
    }
    if config.prune_to_corpus && corpus.is_none() {
        return Err(Error::MissingCorpus);
    }
    config.validate()?;

    info!(
        headwords = headwords.len(),
        corpus = corpus.map_or(0, |c| c.len()),
        external = external.len(),
        "Building mapping index"
    );

    let store = ShardedStore::new(config.shard_count());
    let mut report = BuildReport::default();
    let ingest = |tag: &str, records: Vec<MappingRecord>, report: &mut BuildReport| {
        let offered = records.len();
        let counts = store.ingest(records);
        debug!(
            source = tag,
            offered,
            inserted = counts.inserted,
            duplicates = counts.duplicates,
            "Ingested source"
        );
        report.sources.push(SourceReport {
            tag: tag.to_string(),
            offered,
            inserted: counts.inserted,
            duplicates: counts.duplicates,
        });
    };

    for slot in &config.order {
        match slot {
            SourceSlot::Generated => {
                let records = generated_records(headwords, config);
                ingest(SourceTag::GENERATED, records, &mut report);
            }
            SourceSlot::External => {
                for source in external {
                    let records = bounded_confidences(source, &mut report);
                    ingest(source.tag.as_str(), records, &mut report);
                }
            }
            SourceSlot::Algorithmic => match corpus {
                Some(corpus) => {
                    let records = algorithmic_records(corpus, headwords, &store);
                    ingest(SourceTag::ALGORITHMIC, records, &mut report);
                }
                None => warn!("No corpus vocabulary; skipping algorithmic resolution"),
            },
            SourceSlot::Curated => {
                let (common, proper) = curated_records();
                ingest(SourceTag::MANUAL, common, &mut report);
                ingest(SourceTag::PROPER_NOUNS, proper, &mut report);
            }
        }
    }
    info!(records = store.len(), duplicates = report.duplicates(), "Merged sources");

    if config.movable_nu {
        let variants = nu_movable_records(&store);
        let offered = variants.len();
        let counts = store.ingest(variants);
        report.nu_movable_added = counts.inserted;
        report.sources.push(SourceReport {
            tag: SourceTag::NU_MOVABLE.to_string(),
            offered,
            inserted: counts.inserted,
            duplicates: counts.duplicates,
        });
        info!(added = counts.inserted, "Derived movable-nu variants");
    }

    report.dropped_unknown_lemma = store.retain(|r| headwords.contains(r.lemma.as_str()));
    if report.dropped_unknown_lemma > 0 {
        warn!(dropped = report.dropped_unknown_lemma, "Dropped records with unknown lemma");
    }

    if config.prune_to_corpus {
        if let Some(corpus) = corpus {
            report.pruned = store.retain(|r| corpus.contains(r.word_form.as_str()));
            info!(pruned = report.pruned, "Pruned to corpus vocabulary");
        }
    }

    let index = MappingIndex::from_records(store.into_records());
    report.final_size = index.len();
    info!(size = report.final_size, forms = index.form_count(), "Index built");
    Ok((index, report))
}

/// Caller-supplied records with confidences forced into `[0, 1]`:
/// out-of-range values are clamped, non-finite ones rejected.
fn bounded_confidences(source: &MappingSource, report: &mut BuildReport) -> Vec<MappingRecord> {
    let mut out = Vec::with_capacity(source.records.len());
    for r in &source.records {
        let Some(confidence) = confidence::clamp(r.confidence) else {
            warn!(source = %source.tag, word_form = %r.word_form, lemma = %r.lemma, "Rejecting record with non-finite confidence");
            report.rejected_confidence += 1;
            continue;
        };
        if confidence != r.confidence {
            warn!(source = %source.tag, word_form = %r.word_form, given = r.confidence, "Clamped confidence into [0, 1]");
            report.clamped_confidence += 1;
        }
        out.push(MappingRecord {
            confidence,
            ..r.clone()
        });
    }
    out
}

/// Synthesized forms of every headword. The lemma maps to itself at the
/// self-mapping confidence, every other form at the generated confidence.
fn generated_records(headwords: &HeadwordIndex, config: &BuildConfig) -> Vec<MappingRecord> {
    let all: Vec<&Headword> = headwords.iter().collect();
    all.par_iter()
        .map(|hw| {
            let mut seen: Vec<&NormalizedForm> = Vec::new();
            let cells = paradigm::paradigm(hw, None);
            let mut out = Vec::with_capacity(cells.len());
            for inflection in &cells {
                if seen.contains(&&inflection.form) {
                    continue;
                }
                seen.push(&inflection.form);
                let is_lemma = inflection.form == hw.normalized_form;
                out.push(MappingRecord {
                    word_form: inflection.form.clone(),
                    lemma: hw.normalized_form.clone(),
                    confidence: if is_lemma {
                        config.self_mapping_confidence
                    } else {
                        config.generated_confidence
                    },
                    source: SourceTag::new(SourceTag::GENERATED),
                    morph_info: (!is_lemma).then(|| inflection.cell.clone()),
                });
            }
            out
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Resolver candidates for corpus forms nothing has mapped yet.
fn algorithmic_records(
    corpus: &CorpusVocabulary,
    headwords: &HeadwordIndex,
    store: &ShardedStore,
) -> Vec<MappingRecord> {
    let unseen: Vec<&NormalizedForm> = corpus.sorted().into_iter().filter(|f| !store.has_form(f)).collect();
    debug!(unseen = unseen.len(), "Resolving unmapped corpus forms");
    unseen
        .par_iter()
        .map(|form| {
            resolve::resolve(form, headwords)
                .into_iter()
                .map(|c| MappingRecord {
                    word_form: (*form).clone(),
                    lemma: c.lemma,
                    confidence: c.confidence,
                    source: SourceTag::new(SourceTag::ALGORITHMIC),
                    morph_info: None,
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Built-in common forms and proper names.
pub fn curated_records() -> (Vec<MappingRecord>, Vec<MappingRecord>) {
    let make = |table: &[(&str, &str, &str)], tag: &str, confidence: f64| {
        table
            .iter()
            .map(|&(form, lemma, morph)| MappingRecord {
                word_form: normalize(form),
                lemma: normalize(lemma),
                confidence,
                source: SourceTag::new(tag),
                morph_info: Some(morph.to_string()),
            })
            .collect::<Vec<_>>()
    };
    (
        make(COMMON_FORMS, SourceTag::MANUAL, COMMON_FORM_CONFIDENCE),
        make(PROPER_NAMES, SourceTag::PROPER_NOUNS, PROPER_NAME_CONFIDENCE),
    )
}

fn marks_third_person(morph: &str) -> bool {
    let m = morph.to_lowercase();
    m.starts_with("third") || m.find('3').map_or(false, |i| m[i..].contains(|c: char| c == 's' || c == 'p'))
}

/// Movable-nu twins of existing records whose twin form has no record at all.
///
/// Third-person records get both directions (-ε ↔ -εν) at high confidence;
/// any other form in -ε of four letters or more gets the -εν twin at a lower
/// confidence.
fn nu_movable_records(store: &ShardedStore) -> Vec<MappingRecord> {
    let mut existing = store.snapshot();
    existing.sort_by(|a, b| a.word_form.cmp(&b.word_form).then_with(|| a.lemma.cmp(&b.lemma)));

    let known: ahash::AHashSet<&str> = existing.iter().map(|r| r.word_form.as_str()).collect();
    let mut out = Vec::new();
    for r in &existing {
        let source = r.source.as_str();
        if source == SourceTag::NU_MOVABLE {
            continue;
        }
        // Only resolver and feed records without morphology are guessed at.
        let may_guess = r.morph_info.is_none() && source != SourceTag::GENERATED;
        let form = r.word_form.as_str();
        let third = r.morph_info.as_deref().map_or(false, marks_third_person);

        let (variant, confidence, morph) = if form.ends_with("εν") {
            if !third {
                continue;
            }
            let trimmed = &form[..form.len() - NU.len_utf8()];
            (trimmed.to_string(), NU_THIRD_PERSON_CONFIDENCE, r.morph_info.clone())
        } else if form.ends_with('ε') {
            if third {
                (format!("{form}{NU}"), NU_THIRD_PERSON_CONFIDENCE, r.morph_info.clone())
            } else if may_guess && r.word_form.letters() >= NU_GUESSED_MIN_LETTERS {
                (format!("{form}{NU}"), NU_GUESSED_CONFIDENCE, Some(NU_GUESSED_MORPH.to_string()))
            } else {
                continue;
            }
        } else {
            continue;
        };

        if known.contains(variant.as_str()) {
            continue;
        }
        out.push(MappingRecord {
            word_form: normalize(&variant),
            lemma: r.lemma.clone(),
            confidence,
            source: SourceTag::new(SourceTag::NU_MOVABLE),
            morph_info: morph,
        });
    }
    out
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// The built form → lemma mapping. Primary key `(word_form, lemma)`; rows for
/// a form are kept sorted best-first.
#[derive(Debug, Clone, Default)]
pub struct MappingIndex {
    by_form: AHashMap<NormalizedForm, Vec<MappingRecord>>,
    by_lemma: AHashMap<NormalizedForm, Vec<NormalizedForm>>,
    forms: Vec<NormalizedForm>,
    len: usize,
}

impl MappingIndex {
    /// Build from raw records. A repeated key keeps its first record.
    pub fn from_records(records: impl IntoIterator<Item = MappingRecord>) -> Self {
        let mut by_form: AHashMap<NormalizedForm, Vec<MappingRecord>> = AHashMap::new();
        let mut len = 0;
        for r in records {
            let bucket = by_form.entry(r.word_form.clone()).or_default();
            if !bucket.iter().any(|e| e.lemma == r.lemma) {
                bucket.push(r);
                len += 1;
            }
        }

        let mut by_lemma: AHashMap<NormalizedForm, Vec<NormalizedForm>> = AHashMap::new();
        for (form, bucket) in by_form.iter_mut() {
            bucket.sort_by(confidence::compare_records);
            for r in bucket.iter() {
                by_lemma.entry(r.lemma.clone()).or_default().push(form.clone());
            }
        }
        for forms in by_lemma.values_mut() {
            forms.sort();
        }

        let mut forms: Vec<NormalizedForm> = by_form.keys().cloned().collect();
        forms.sort();
        Self {
            by_form,
            by_lemma,
            forms,
            len,
        }
    }

    /// Candidate lemmas for a word, best first. The word is normalized
    /// first; unknown words give an empty list.
    pub fn lookup(&self, word: &str) -> Vec<LookupHit> {
        self.records(normalize(word).as_str())
            .iter()
            .map(|r| LookupHit {
                lemma: r.lemma.clone(),
                confidence: r.confidence,
                source: r.source.clone(),
                morph_info: r.morph_info.clone(),
            })
            .collect()
    }

    /// Rows for an already normalized form, best first.
    pub fn records(&self, form: &str) -> &[MappingRecord] {
        self.by_form.get(form).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every form mapped to `lemma`, sorted.
    pub fn forms_of(&self, lemma: &str) -> &[NormalizedForm] {
        self.by_lemma.get(normalize(lemma).as_str()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, form: &str, lemma: &str) -> bool {
        self.records(form).iter().any(|r| r.lemma == lemma)
    }

    /// All rows, by form then best-first.
    pub fn iter(&self) -> impl Iterator<Item = &MappingRecord> {
        self.forms.iter().flat_map(|f| self.records(f.as_str()).iter())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    /// One JSON object per line, in [`iter`](Self::iter) order.
    pub fn write_jsonl<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for r in self.iter() {
            serde_json::to_writer(&mut out, r)?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(form: &str, lemma: &str, confidence: f64, source: &str) -> MappingRecord {
        MappingRecord {
            word_form: normalize(form),
            lemma: normalize(lemma),
            confidence,
            source: SourceTag::new(source),
            morph_info: None,
        }
    }

    fn no_prune() -> BuildConfig {
        BuildConfig {
            prune_to_corpus: false,
            ..BuildConfig::default()
        }
    }

    #[test]
    fn test_store_first_writer_wins() {
        let store = ShardedStore::new(4);
        let a = store.ingest(vec![record("μάλιστα", "μάλα", 0.9, "a")]);
        let b = store.ingest(vec![record("μάλιστα", "μάλα", 0.5, "b")]);
        assert_eq!((a.inserted, a.duplicates), (1, 0));
        assert_eq!((b.inserted, b.duplicates), (0, 1));
        let all = store.snapshot();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].confidence, 0.9);
    }

    #[test]
    fn test_store_keeps_order_within_a_source() {
        let store = ShardedStore::new(3);
        let counts = store.ingest(vec![
            record("λόγου", "λόγος", 0.4, "x"),
            record("λόγου", "λόγος", 0.8, "x"),
        ]);
        assert_eq!(counts.duplicates, 1);
        assert_eq!(store.snapshot()[0].confidence, 0.4);
    }

    #[test]
    fn test_missing_headwords_is_fatal() {
        let err = build(&[], &HeadwordIndex::default(), None, &no_prune()).unwrap_err();
        assert!(matches!(err, Error::MissingHeadwords));
    }

    #[test]
    fn test_pruning_without_corpus_is_fatal() {
        let hw = HeadwordIndex::from_display_forms(["λόγος"], "greek");
        let err = build(&[], &hw, None, &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingCorpus));
    }

    #[test]
    fn test_unknown_lemma_dropped_and_counted() {
        let hw = HeadwordIndex::from_display_forms(["λόγος"], "greek");
        let feed = MappingSource::new(
            SourceTag::new("test"),
            vec![record("ἄλλου", "ἄλλος", 1.0, "test"), record("λόγοιο", "λόγος", 1.0, "test")],
        );
        let config = BuildConfig {
            order: vec![SourceSlot::External],
            movable_nu: false,
            ..no_prune()
        };
        let (index, report) = build(&[feed], &hw, None, &config).unwrap();
        assert_eq!(report.dropped_unknown_lemma, 1);
        assert_eq!(index.len(), 1);
        assert!(index.contains("λογοιο", "λογοσ"));
    }

    #[test]
    fn test_generated_self_mapping_and_cells() {
        let hw = HeadwordIndex::from_display_forms(["λόγος"], "greek");
        let config = BuildConfig {
            order: vec![SourceSlot::Generated],
            ..no_prune()
        };
        let (index, _) = build(&[], &hw, None, &config).unwrap();
        let own = index.lookup("λόγος");
        assert_eq!(own[0].lemma, "λογοσ");
        assert_eq!(own[0].confidence, 0.9);
        let gen = index.records("λογου");
        assert_eq!(gen[0].confidence, 0.8);
        assert_eq!(gen[0].source.as_str(), SourceTag::GENERATED);
        assert!(gen[0].morph_info.is_some());
    }

    #[test]
    fn test_algorithmic_only_for_unmapped_forms() {
        let hw = HeadwordIndex::from_display_forms(["λόγος", "ἀείδω"], "greek");
        let corpus = CorpusVocabulary::from_words(["λόγου", "ἀείδ'"]);
        let config = BuildConfig {
            order: vec![SourceSlot::Generated, SourceSlot::Algorithmic],
            movable_nu: false,
            ..BuildConfig::default()
        };
        let (index, report) = build(&[], &hw, Some(&corpus), &config).unwrap();
        // λογου was generated; the elided ἀείδ' only the resolver reaches.
        assert_eq!(index.records("λογου")[0].source.as_str(), SourceTag::GENERATED);
        assert_eq!(index.records("αειδ")[0].source.as_str(), SourceTag::ALGORITHMIC);
        assert_eq!(index.records("αειδ")[0].lemma, "αειδω");
        assert_eq!(report.source(SourceTag::ALGORITHMIC).map(|s| s.offered), Some(1));
    }

    #[test]
    fn test_movable_nu_third_person() {
        let hw = HeadwordIndex::from_display_forms(["λέγω"], "greek");
        let mut r = record("ἔλεγε", "λέγω", 1.0, "feed");
        r.morph_info = Some("impf act ind 3sg".to_string());
        let config = BuildConfig {
            order: vec![SourceSlot::External],
            ..no_prune()
        };
        let (index, report) =
            build(&[MappingSource::new(SourceTag::new("feed"), vec![r])], &hw, None, &config).unwrap();
        assert_eq!(report.nu_movable_added, 1);
        let hit = &index.records("ελεγεν")[0];
        assert_eq!(hit.confidence, 0.9);
        assert_eq!(hit.source.as_str(), SourceTag::NU_MOVABLE);
    }

    #[test]
    fn test_movable_nu_guess_and_existing_form() {
        let hw = HeadwordIndex::from_display_forms(["λέγω", "ἔχω"], "greek");
        let feed = MappingSource::new(
            SourceTag::new("feed"),
            vec![
                record("ἔλεγε", "λέγω", 1.0, "feed"),
                record("εἶχε", "ἔχω", 1.0, "feed"),
                record("εἶχεν", "ἔχω", 1.0, "feed"),
            ],
        );
        let config = BuildConfig {
            order: vec![SourceSlot::External],
            ..no_prune()
        };
        let (index, report) = build(&[feed], &hw, None, &config).unwrap();
        assert_eq!(index.records("ελεγεν")[0].confidence, 0.8);
        assert_eq!(index.records("ελεγεν")[0].morph_info.as_deref(), Some("3 s (nu-movable)"));
        // εἶχεν already existed.
        assert_eq!(index.records("ειχεν")[0].source.as_str(), "feed");
        assert_eq!(report.nu_movable_added, 1);
    }

    #[test]
    fn test_external_confidences_bounded() {
        let hw = HeadwordIndex::from_display_forms(["μάλα", "λόγος"], "greek");
        let feed = MappingSource::new(
            SourceTag::new("feed"),
            vec![
                record("μάλιστα", "μάλα", 1.5, "feed"),
                record("λόγου", "λόγος", f64::NAN, "feed"),
                record("λόγοι", "λόγος", -0.2, "feed"),
            ],
        );
        let config = BuildConfig {
            order: vec![SourceSlot::External],
            ..no_prune()
        };
        let (index, report) = build(&[feed], &hw, None, &config).unwrap();
        assert_eq!(index.records("μαλιστα")[0].confidence, 1.0);
        assert_eq!(index.records("λογοι")[0].confidence, 0.0);
        assert!(index.records("λογου").is_empty());
        assert_eq!(report.clamped_confidence, 2);
        assert_eq!(report.rejected_confidence, 1);
        assert!(index.iter().all(|r| (0.0..=1.0).contains(&r.confidence)));
    }

    #[test]
    fn test_no_movable_nu_guess_for_generated_vocatives() {
        let hw = HeadwordIndex::from_display_forms(["λόγος", "καλός"], "greek");
        let config = BuildConfig {
            order: vec![SourceSlot::Generated],
            ..no_prune()
        };
        let (index, _) = build(&[], &hw, None, &config).unwrap();
        assert!(!index.records("λογε").is_empty());
        assert!(index.records("λογεν").is_empty());
        assert!(index.records("καλεν").is_empty());
    }

    #[test]
    fn test_third_person_marker() {
        assert!(marks_third_person("aor act ind 3sg"));
        assert!(marks_third_person("3 p"));
        assert!(marks_third_person("third-person singular"));
        assert!(!marks_third_person("gen sg"));
        assert!(!marks_third_person("1s_dat"));
    }

    #[test]
    fn test_index_lookup_sorted_and_empty() {
        let index = MappingIndex::from_records(vec![
            record("λόγον", "λόγη", 0.6, "a"),
            record("λόγον", "λόγος", 0.8, "a"),
            record("λόγον", "ἄλογος", 0.6, "a"),
        ]);
        let lemmas: Vec<String> = index.lookup("λόγον").into_iter().map(|h| h.lemma.into_string()).collect();
        assert_eq!(lemmas, vec!["λογοσ", "αλογοσ", "λογη"]);
        assert!(index.lookup("ξψζ").is_empty());
    }

    #[test]
    fn test_forms_of() {
        let index = MappingIndex::from_records(vec![
            record("λόγου", "λόγος", 0.8, "a"),
            record("λόγῳ", "λόγος", 0.8, "a"),
        ]);
        let forms: Vec<&str> = index.forms_of("λόγος").iter().map(|f| f.as_str()).collect();
        assert_eq!(forms, vec!["λογου", "λογω"]);
        assert!(index.forms_of("τιμή").is_empty());
    }

    #[test]
    fn test_write_jsonl() {
        let index = MappingIndex::from_records(vec![record("λόγου", "λόγος", 0.8, "a")]);
        let mut buf = Vec::new();
        index.write_jsonl(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"word_form\":\"λογου\""));
    }
}

// Regression tests for known forms and build scenarios.

use grc_lemma_lib::output::candidates_to_bracketed;
use grc_lemma_lib::{
    build, normalize, resolve, synthesize, BuildConfig, CorpusVocabulary, Headword, HeadwordIndex,
    MappingRecord, MappingSource, PartOfSpeech, ReasonCode, SourceSlot, SourceTag,
};

fn headwords() -> HeadwordIndex {
    HeadwordIndex::from_display_forms(
        [
            "λόγος", "μῆνις", "ἀείδω", "θεά", "Πηλεύς", "Ἀχιλλεύς", "μάλα", "τίθημι", "χολόω", "Ἀτρεύς",
        ],
        "greek",
    )
}

fn record(form: &str, lemma: &str, confidence: f64, source: &str) -> MappingRecord {
    MappingRecord {
        word_form: normalize(form),
        lemma: normalize(lemma),
        confidence,
        source: SourceTag::new(source),
        morph_info: None,
    }
}

#[test]
fn menin_normalizes() {
    assert_eq!(normalize("Μῆνιν"), "μηνιν");
}

#[test]
fn logos_synthesis_and_resolution() {
    let logos = Headword::new("λόγος", "greek");
    let forms = synthesize(&logos, Some(PartOfSpeech::Noun));
    assert!(forms.iter().any(|f| f == "λογου"), "λόγου should be synthesized");

    let hits = resolve(&normalize("λογου"), &headwords());
    let top = &hits[0];
    assert_eq!(top.lemma, "λογοσ");
    assert_eq!(top.confidence, 0.6);
    assert_eq!(top.reason, ReasonCode::StemStrip);
}

#[test]
fn malista_first_writer_wins() {
    let first = MappingSource::new(SourceTag::new("a"), vec![record("μαλιστα", "μαλα", 0.9, "a")]);
    let second = MappingSource::new(SourceTag::new("b"), vec![record("μαλιστα", "μαλα", 0.5, "b")]);
    let config = BuildConfig {
        order: vec![SourceSlot::External],
        prune_to_corpus: false,
        ..BuildConfig::default()
    };
    let (index, report) = build(&[first, second], &headwords(), None, &config).unwrap();
    let hits = index.lookup("μάλιστα");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].confidence, 0.9);
    assert_eq!(hits[0].source.as_str(), "a");
    assert_eq!(report.duplicates(), 1);
}

#[test]
fn curated_malista_loses_to_earlier_feed() {
    // With the default order the external feed precedes the curated list.
    let feed = MappingSource::new(SourceTag::new("feed"), vec![record("μαλιστα", "μαλα", 0.9, "feed")]);
    let corpus = CorpusVocabulary::from_words(["μάλιστα"]);
    let (index, _) = build(&[feed], &headwords(), Some(&corpus), &BuildConfig::default()).unwrap();
    let hits = index.lookup("μαλιστα");
    assert_eq!(hits[0].confidence, 0.9);
    assert_eq!(hits[0].source.as_str(), "feed");
}

#[test]
fn nonexistent_form_is_empty() {
    assert!(resolve(&normalize("ξψζ"), &headwords()).is_empty());
}

#[test]
fn iliad_line_candidates() {
    let idx = headwords();
    let bracketed: Vec<String> = ["Πηληϊάδεω", "Ἀχιλῆος", "ἔθηκε", "χολωθείς", "Ἀτρείδης"]
        .iter()
        .map(|w| candidates_to_bracketed(&resolve(&normalize(w), &idx)))
        .collect();
    assert_eq!(bracketed[0], "{πηλευσ:0.75:patronymic}");
    assert_eq!(bracketed[1], "{αχιλλευσ:0.75:patronymic}");
    assert_eq!(bracketed[2], "{τιθημι:0.50:augment}");
    assert_eq!(bracketed[3], "{χολοω:0.60:passive-participle}");
    assert_eq!(bracketed[4], "{ατρευσ:0.75:patronymic}");
}

#[test]
fn pruned_build_only_keeps_corpus_forms() {
    let corpus = CorpusVocabulary::from_words("Μῆνιν ἄειδε θεὰ Πηληϊάδεω Ἀχιλῆος".split_whitespace());
    let (index, report) = build(&[], &headwords(), Some(&corpus), &BuildConfig::default()).unwrap();
    assert!(report.pruned > 0);
    for r in index.iter() {
        assert!(corpus.contains(r.word_form.as_str()), "{} not in corpus", r.word_form);
    }
    assert_eq!(index.lookup("Ἀχιλῆος")[0].lemma, "αχιλλευσ");
    assert_eq!(index.lookup("θεά")[0].lemma, "θεα");
}

#[test]
fn generated_forms_cover_irregular_verbs() {
    let hw = HeadwordIndex::from_display_forms(["εἰμί"], "greek");
    let config = BuildConfig {
        order: vec![SourceSlot::Generated],
        prune_to_corpus: false,
        ..BuildConfig::default()
    };
    let (index, _) = build(&[], &hw, None, &config).unwrap();
    assert_eq!(index.lookup("ἐστίν")[0].lemma, "ειμι");
    assert_eq!(index.lookup("ἦσαν")[0].lemma, "ειμι");
}

// Reverse resolution: surface form → candidate headwords.
//
// Every rule family is tried on every form; nothing short-circuits. A
// transformation only counts when its result is a headword. When several
// rules reach the same lemma the highest confidence is kept, ties going to
// the rule that fired first:
//   1. exact self-match
//   2. dictionary ending added to the form as-is (elision)
//   3. inflectional ending stripped, dictionary ending re-added
//   4. syllabic augment removed
//   5. aorist passive participle reconstructed
//   6. patronymic → father's name
//   7. movable ν dropped, then 3 and 4 again

use ahash::AHashMap;

use crate::confidence::{self, Rule};
use crate::dictionary::HeadwordIndex;
use crate::tables::{
    AUGMENT_EXCEPTIONS, DOUBLING_LIQUIDS, EUS_GENITIVE, PATRONYMIC_ALTERNATION_ENDING,
    PATRONYMIC_NOMINATIVES, PATRONYMIC_SUFFIXES,
};
use crate::types::*;

// ---------------------------------------------------------------------------
// Ending tables
// ---------------------------------------------------------------------------

/// Endings that turn a stem into a citation form.
pub const DICTIONARY_ENDINGS: &[&str] = &["οσ", "η", "ον", "α", "ω", "ημι", "μι"];

/// Citation endings of contract verbs, re-added after a contracted ending.
const CONTRACT_ENDINGS: &[&str] = &["αω", "εω", "οω"];

/// Inflectional endings tried by the stripping rule, in order.
pub const INFLECTIONAL_ENDINGS: &[&str] = &[
    // nominal
    "ων", "ου", "ω", "ον", "ε", "α", "ασ", "ησ", "η", "αν", "ην",
    "οι", "οισ", "ουσ", "αι", "αισ", "οσ", "εσ", "ι", "σι", "εσι",
    "των", "τοσ", "τησ", "τον", "την", "τα", "ται", "τι",
    // verbal: present, future, aorist, perfect
    "ει", "εισ", "ομεν", "ετε", "ουσι", "ουσιν", "ειν",
    "ομαι", "εται", "ομεθα", "εσθε", "ονται", "εσθαι",
    "ωμεν", "ατε", "ωσι", "ουμεν", "ειτε", "ουτε",
    "μι", "σ", "μεν", "τε", "ασι",
    "ομην", "ετο", "οντο",
    "σω", "σεισ", "σει", "σομεν", "σετε", "σουσι",
    "σα", "σασ", "σε", "σαμεν", "σατε", "σαν",
    "σαμην", "σατο", "σαμεθα", "σασθε", "σαντο",
    "κα", "κασ", "κε", "καμεν", "κατε", "κασι",
    // participles
    "μενοσ", "μενη", "μενον", "μενου", "μενησ", "μενω",
    "ντοσ", "ντι", "ντα", "ντεσ", "ντων",
    // aorist passive participles
    "θεισ", "θεντοσ", "θεντι", "θεντα", "θεντεσ", "θεντων",
    "θεισα", "θεισαν", "θεν",
];

const AUGMENT: char = 'ε';
const MIN_AUGMENTED_LETTERS: usize = 4;
// Stems shorter than this are too ambiguous to test.
const MIN_STEM_LETTERS: usize = 3;

const PARTICIPLE_SUFFIX: &str = "θεισ";
const PARTICIPLE_THEMATIC_ENDING: &str = "ω";
const PARTICIPLE_CONTRACT_ENDINGS: &[&str] = &["εω", "αω", "οω", "υω"];
const LENGTHENED_O: char = 'ω';
const SHORT_O_ENDING: &str = "οω";

const MOVABLE_NU_ENDINGS: &[&str] = &["εν", "σιν"];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve one normalized form against the headword set. Returns every
/// validated lemma once, best first; an empty vec when nothing matches.
pub fn resolve(form: &NormalizedForm, headwords: &HeadwordIndex) -> Vec<Candidate> {
    let mut found = Found::new(headwords);
    let word = form.as_str();
    if word.is_empty() {
        return Vec::new();
    }

    // 1.
    found.offer(word, Rule::Exact);

    // 2.
    for ending in DICTIONARY_ENDINGS {
        found.offer(&format!("{word}{ending}"), Rule::SuffixAdd);
    }

    // 3.
    strip_endings(word, &mut found, Rule::StemBare, Rule::StemDictEnding, Rule::StemContractEnding);

    // 4.
    remove_augment(word, &mut found);

    // 5.
    passive_participle(word, &mut found);

    // 6.
    patronymic(word, &mut found);

    // 7.
    if MOVABLE_NU_ENDINGS.iter().any(|e| word.ends_with(e)) {
        let dropped = &word[..word.len() - 'ν'.len_utf8()];
        strip_endings(dropped, &mut found, Rule::StemBare, Rule::StemDictEnding, Rule::StemContractEnding);
        remove_augment(dropped, &mut found);
    }

    found.into_candidates()
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Validated lemmas reached so far, with the best rule for each.
struct Found<'a> {
    headwords: &'a HeadwordIndex,
    best: AHashMap<NormalizedForm, Rule>,
    order: Vec<NormalizedForm>,
}

impl<'a> Found<'a> {
    fn new(headwords: &'a HeadwordIndex) -> Self {
        Self {
            headwords,
            best: AHashMap::new(),
            order: Vec::new(),
        }
    }

    /// Keep `transformed` if it is a headword.
    fn offer(&mut self, transformed: &str, rule: Rule) {
        let Some(lemma) = self.headwords.canonical(transformed) else {
            return;
        };
        match self.best.get_mut(lemma) {
            Some(prev) => {
                if rule.confidence() > prev.confidence() {
                    *prev = rule;
                }
            }
            None => {
                self.best.insert(lemma.clone(), rule);
                self.order.push(lemma.clone());
            }
        }
    }

    fn into_candidates(mut self) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = self
            .order
            .drain(..)
            .filter_map(|lemma| {
                let rule = *self.best.get(&lemma)?;
                Some(rule.candidate(lemma))
            })
            .collect();
        out.sort_by(confidence::compare);
        out
    }
}

// ---------------------------------------------------------------------------
// Rule families
// ---------------------------------------------------------------------------

fn letters(s: &str) -> usize {
    s.chars().count()
}

fn strip_endings(word: &str, found: &mut Found<'_>, bare: Rule, with_dict: Rule, with_contract: Rule) {
    let len = letters(word);
    for ending in INFLECTIONAL_ENDINGS {
        let Some(stem) = word.strip_suffix(ending) else {
            continue;
        };
        if len < letters(ending) + MIN_STEM_LETTERS {
            continue;
        }
        found.offer(stem, bare);
        for dict in DICTIONARY_ENDINGS {
            found.offer(&format!("{stem}{dict}"), with_dict);
        }
        for contract in CONTRACT_ENDINGS {
            found.offer(&format!("{stem}{contract}"), with_contract);
        }
    }
}

fn remove_augment(word: &str, found: &mut Found<'_>) {
    let Some(unaugmented) = word.strip_prefix(AUGMENT) else {
        return;
    };
    if letters(word) < MIN_AUGMENTED_LETTERS {
        return;
    }
    found.offer(unaugmented, Rule::AugmentExact);
    strip_endings(
        unaugmented,
        found,
        Rule::AugmentStripped,
        Rule::AugmentStripped,
        Rule::AugmentStripped,
    );
    for (prefix, lemma) in AUGMENT_EXCEPTIONS {
        if word.starts_with(prefix) {
            found.offer(lemma, Rule::AugmentException);
        }
    }
}

fn passive_participle(word: &str, found: &mut Found<'_>) {
    let Some(stem) = word.strip_suffix(PARTICIPLE_SUFFIX) else {
        return;
    };
    if stem.is_empty() {
        return;
    }
    if let Some(base) = stem.strip_suffix(LENGTHENED_O) {
        found.offer(&format!("{base}{SHORT_O_ENDING}"), Rule::ParticipleLengthenedO);
    }
    found.offer(&format!("{stem}{PARTICIPLE_THEMATIC_ENDING}"), Rule::ParticipleThematic);
    for ending in PARTICIPLE_CONTRACT_ENDINGS {
        found.offer(&format!("{stem}{ending}"), Rule::ParticipleContract);
    }
}

fn patronymic(word: &str, found: &mut Found<'_>) {
    let len = letters(word);
    for &(suffix, father) in PATRONYMIC_SUFFIXES {
        let Some(base) = word.strip_suffix(suffix) else {
            continue;
        };
        if len <= letters(suffix) + 2 {
            continue;
        }
        if father == PATRONYMIC_ALTERNATION_ENDING {
            if let Some(b) = base.strip_suffix('η') {
                // Πηλη-ιάδης → Πηλ-εύς
                found.offer(&format!("{b}{father}"), Rule::Patronymic);
            } else if base.ends_with('ε') {
                // Ἀτρε-ίδης → Ἀτρε-ύς
                found.offer(&format!("{base}{}", &father['ε'.len_utf8()..]), Rule::Patronymic);
            }
        } else if let Some(b) = base.strip_suffix('η') {
            found.offer(&format!("{b}ε{father}"), Rule::Patronymic);
        }
        found.offer(&format!("{base}{father}"), Rule::Patronymic);
    }

    // The patronymic itself may be a headword.
    for &(oblique, nominative) in PATRONYMIC_NOMINATIVES {
        if let Some(base) = word.strip_suffix(oblique) {
            if !base.is_empty() {
                found.offer(&format!("{base}{nominative}"), Rule::Patronymic);
            }
        }
    }

    // Epic genitive of -εύς names, with the liquid written single.
    let (genitive, nominative) = EUS_GENITIVE;
    if let Some(base) = word.strip_suffix(genitive) {
        found.offer(&format!("{base}{nominative}"), Rule::Patronymic);
        if let Some(last) = base.chars().last().filter(|c| DOUBLING_LIQUIDS.contains(c)) {
            found.offer(&format!("{base}{last}{nominative}"), Rule::Patronymic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn headwords() -> HeadwordIndex {
        HeadwordIndex::from_display_forms(
            [
                "λόγος", "λόγη", "λύω", "παιδεύω", "τίθημι", "χολόω", "Ἀτρεύς", "Πηλεύς",
                "Ἀχιλλεύς", "ἀγαθός", "τιμάω", "Πηλεΐδης",
            ],
            "greek",
        )
    }

    fn res(form: &str) -> Vec<Candidate> {
        resolve(&normalize(form), &headwords())
    }

    fn top(form: &str) -> (String, f64, ReasonCode) {
        let c = res(form).into_iter().next().expect("no candidates");
        (c.lemma.into_string(), c.confidence, c.reason)
    }

    #[test]
    fn test_logou_strips_to_logos() {
        let hits = resolve(&normalize("λογου"), &HeadwordIndex::from_display_forms(["λόγος"], "greek"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].lemma, "λογοσ");
        assert_eq!(hits[0].confidence, 0.6);
        assert_eq!(hits[0].reason, ReasonCode::StemStrip);
    }

    #[test]
    fn test_unknown_form_is_empty() {
        assert!(res("ξψζ").is_empty());
        assert!(res("").is_empty());
    }

    #[test]
    fn test_exact_collapses_weaker_rules() {
        let hits = res("λόγος");
        let logos: Vec<_> = hits.iter().filter(|c| c.lemma == "λογοσ").collect();
        assert_eq!(logos.len(), 1);
        assert_eq!(logos[0].reason, ReasonCode::Exact);
        assert_eq!(logos[0].confidence, 0.9);
    }

    #[test]
    fn test_ambiguity_preserved_and_sorted() {
        let hits = res("λόγον");
        let lemmas: Vec<&str> = hits.iter().map(|c| c.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["λογη", "λογοσ"]);
    }

    #[test]
    fn test_suffix_add_for_elided_form() {
        assert_eq!(top("ἀγαθ'"), ("αγαθοσ".to_string(), 0.7, ReasonCode::SuffixAdd));
    }

    #[test]
    fn test_augment_exact() {
        assert_eq!(top("ἔλυω"), ("λυω".to_string(), 0.6, ReasonCode::Augment));
    }

    #[test]
    fn test_augment_then_strip() {
        assert_eq!(top("ἐπαίδευον"), ("παιδευω".to_string(), 0.5, ReasonCode::Augment));
    }

    #[test]
    fn test_augment_exception_tithemi() {
        assert_eq!(top("ἔθηκε"), ("τιθημι".to_string(), 0.5, ReasonCode::Augment));
    }

    #[test]
    fn test_passive_participle_lengthened_o() {
        assert_eq!(
            top("χολωθείς"),
            ("χολοω".to_string(), 0.6, ReasonCode::PassiveParticiple)
        );
    }

    #[test]
    fn test_passive_participle_short_stem() {
        // λυ- is too short for stripping; only the participle rule reaches λύω.
        assert_eq!(top("λυθείς"), ("λυω".to_string(), 0.6, ReasonCode::PassiveParticiple));
    }

    #[test]
    fn test_contract_stem_strip() {
        let hits = res("τιμῶμεν");
        assert!(hits.iter().any(|c| c.lemma == "τιμαω" && c.confidence == 0.5));
    }

    #[test]
    fn test_patronymics() {
        assert_eq!(top("Ἀτρείδης"), ("ατρευσ".to_string(), 0.75, ReasonCode::Patronymic));
        assert_eq!(top("Πηληϊάδης"), ("πηλευσ".to_string(), 0.75, ReasonCode::Patronymic));
        assert_eq!(top("Πηληϊάδεω"), ("πηλευσ".to_string(), 0.75, ReasonCode::Patronymic));
    }

    #[test]
    fn test_patronymic_own_nominative() {
        let hits = res("Πηλεΐδου");
        assert!(hits.iter().any(|c| c.lemma == "πηλειδησ" && c.reason == ReasonCode::Patronymic));
    }

    #[test]
    fn test_eus_genitive_doubles_liquid() {
        assert_eq!(top("Ἀχιλῆος"), ("αχιλλευσ".to_string(), 0.75, ReasonCode::Patronymic));
    }

    #[test]
    fn test_movable_nu_dropped() {
        assert_eq!(top("ἐπαίδευσεν"), ("παιδευω".to_string(), 0.5, ReasonCode::Augment));
        assert_eq!(top("παιδεύουσιν"), ("παιδευω".to_string(), 0.6, ReasonCode::StemStrip));
    }

    #[test]
    fn test_all_candidates_are_headwords() {
        let idx = headwords();
        for form in ["λογου", "επαιδευον", "χολωθεισ", "αχιληοσ", "τιμωμεν"] {
            for c in resolve(&normalize(form), &idx) {
                assert!(idx.contains(c.lemma.as_str()));
            }
        }
    }
}

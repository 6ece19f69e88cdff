// Forward paradigm synthesis: headword → inflected forms.
//
// Each paradigm class contributes a stem (the headword minus the class's
// dictionary ending) and a table of (ending, cell) pairs. Classes are not
// exclusive: without a hint every compatible class is tried and the results
// are unioned. Irregular verbs are listed, not generated.

use std::collections::BTreeSet;

use crate::normalize::normalize;
use crate::tables::IRREGULAR_VERBS;
use crate::types::*;

// ---------------------------------------------------------------------------
// Ending tables (normalized)
// ---------------------------------------------------------------------------

type Table = &'static [(&'static str, &'static str)];

const FIRST_DECL_ALPHA_LONG: Table = &[
    ("α", "nom sg"), ("ασ", "gen sg"), ("α", "dat sg"), ("αν", "acc sg"), ("α", "voc sg"),
    ("αι", "nom pl"), ("ων", "gen pl"), ("αισ", "dat pl"), ("ασ", "acc pl"),
];
const FIRST_DECL_ALPHA_SHORT: Table = &[
    ("α", "nom sg"), ("ησ", "gen sg"), ("η", "dat sg"), ("αν", "acc sg"), ("α", "voc sg"),
    ("αι", "nom pl"), ("ων", "gen pl"), ("αισ", "dat pl"), ("ασ", "acc pl"),
];
const FIRST_DECL_ETA: Table = &[
    ("η", "nom sg"), ("ησ", "gen sg"), ("η", "dat sg"), ("ην", "acc sg"), ("η", "voc sg"),
    ("αι", "nom pl"), ("ων", "gen pl"), ("αισ", "dat pl"), ("ασ", "acc pl"),
];
const SECOND_DECL_MASC: Table = &[
    ("οσ", "nom sg"), ("ου", "gen sg"), ("ω", "dat sg"), ("ον", "acc sg"), ("ε", "voc sg"),
    ("οι", "nom pl"), ("ων", "gen pl"), ("οισ", "dat pl"), ("ουσ", "acc pl"),
];
const SECOND_DECL_NEUT: Table = &[
    ("ον", "nom sg"), ("ου", "gen sg"), ("ω", "dat sg"), ("ον", "acc sg"), ("ον", "voc sg"),
    ("α", "nom pl"), ("ων", "gen pl"), ("οισ", "dat pl"), ("α", "acc pl"),
];
const THIRD_DECL_CONSONANT: Table = &[
    ("", "nom sg"), ("οσ", "gen sg"), ("ι", "dat sg"), ("α", "acc sg"), ("", "voc sg"),
    ("εσ", "nom pl"), ("ων", "gen pl"), ("σι", "dat pl"), ("ασ", "acc pl"),
];
const THIRD_DECL_SIGMA: Table = &[
    ("οσ", "nom sg"), ("ουσ", "gen sg"), ("ει", "dat sg"), ("οσ", "acc sg"), ("οσ", "voc sg"),
    ("η", "nom pl"), ("ων", "gen pl"), ("εσι", "dat pl"), ("η", "acc pl"),
];
const THIRD_DECL_DENTAL_NEUTER: Table = &[
    ("", "nom sg"), ("τοσ", "gen sg"), ("τι", "dat sg"), ("", "acc sg"), ("", "voc sg"),
    ("τα", "nom pl"), ("των", "gen pl"), ("σι", "dat pl"), ("τα", "acc pl"),
];

const PRESENT_ACTIVE: Table = &[
    ("ω", "pres act ind 1sg"), ("εισ", "pres act ind 2sg"), ("ει", "pres act ind 3sg"),
    ("ομεν", "pres act ind 1pl"), ("ετε", "pres act ind 2pl"), ("ουσι", "pres act ind 3pl"),
    ("ειν", "pres act inf"),
];
const PRESENT_MIDDLE: Table = &[
    ("ομαι", "pres mp ind 1sg"), ("η", "pres mp ind 2sg"), ("εται", "pres mp ind 3sg"),
    ("ομεθα", "pres mp ind 1pl"), ("εσθε", "pres mp ind 2pl"), ("ονται", "pres mp ind 3pl"),
    ("εσθαι", "pres mp inf"),
];
const CONTRACT_ALPHA: Table = &[
    ("ω", "pres act ind 1sg"), ("ασ", "pres act ind 2sg"), ("α", "pres act ind 3sg"),
    ("ωμεν", "pres act ind 1pl"), ("ατε", "pres act ind 2pl"), ("ωσι", "pres act ind 3pl"),
];
const CONTRACT_EPSILON: Table = &[
    ("ω", "pres act ind 1sg"), ("εισ", "pres act ind 2sg"), ("ει", "pres act ind 3sg"),
    ("ουμεν", "pres act ind 1pl"), ("ειτε", "pres act ind 2pl"), ("ουσι", "pres act ind 3pl"),
];
const CONTRACT_OMICRON: Table = &[
    ("ω", "pres act ind 1sg"), ("οισ", "pres act ind 2sg"), ("οι", "pres act ind 3sg"),
    ("ουμεν", "pres act ind 1pl"), ("ουτε", "pres act ind 2pl"), ("ουσι", "pres act ind 3pl"),
];
const ATHEMATIC_ACTIVE: Table = &[
    ("μι", "pres act ind 1sg"), ("σ", "pres act ind 2sg"), ("σι", "pres act ind 3sg"),
    ("μεν", "pres act ind 1pl"), ("τε", "pres act ind 2pl"), ("ασι", "pres act ind 3pl"),
];
const IMPERFECT_ACTIVE: Table = &[
    ("ον", "impf act ind 1sg"), ("εσ", "impf act ind 2sg"), ("ε", "impf act ind 3sg"),
    ("ομεν", "impf act ind 1pl"), ("ετε", "impf act ind 2pl"), ("ον", "impf act ind 3pl"),
];
const IMPERFECT_MIDDLE: Table = &[
    ("ομην", "impf mp ind 1sg"), ("ου", "impf mp ind 2sg"), ("ετο", "impf mp ind 3sg"),
    ("ομεθα", "impf mp ind 1pl"), ("εσθε", "impf mp ind 2pl"), ("οντο", "impf mp ind 3pl"),
];
// Sigmatic: the σ belongs to the ending.
const AORIST_WEAK_ACTIVE: Table = &[
    ("σα", "aor act ind 1sg"), ("σασ", "aor act ind 2sg"), ("σε", "aor act ind 3sg"),
    ("σαμεν", "aor act ind 1pl"), ("σατε", "aor act ind 2pl"), ("σαν", "aor act ind 3pl"),
];
const AORIST_WEAK_MIDDLE: Table = &[
    ("σαμην", "aor mid ind 1sg"), ("σω", "aor mid ind 2sg"), ("σατο", "aor mid ind 3sg"),
    ("σαμεθα", "aor mid ind 1pl"), ("σασθε", "aor mid ind 2pl"), ("σαντο", "aor mid ind 3pl"),
];
const AORIST_STRONG_ACTIVE: Table = &[
    ("ον", "aor2 act ind 1sg"), ("εσ", "aor2 act ind 2sg"), ("ε", "aor2 act ind 3sg"),
    ("ομεν", "aor2 act ind 1pl"), ("ετε", "aor2 act ind 2pl"), ("ον", "aor2 act ind 3pl"),
];
// Unaugmented.
const AORIST_PASSIVE_PARTICIPLE: Table = &[
    ("θεισ", "aor pass ptcp masc nom sg"), ("θεντοσ", "aor pass ptcp masc gen sg"),
    ("θεντι", "aor pass ptcp masc dat sg"), ("θεντα", "aor pass ptcp masc acc sg"),
    ("θεντεσ", "aor pass ptcp masc nom pl"), ("θεντων", "aor pass ptcp gen pl"),
    ("θεισα", "aor pass ptcp fem nom sg"), ("θεν", "aor pass ptcp neut nom sg"),
];

const VOWELS: &[char] = &['α', 'ε', 'η', 'ι', 'ο', 'υ', 'ω'];
const SYLLABIC_AUGMENT: &str = "ε";
const MOVABLE_NU: char = 'ν';
// Adjective feminines take long α after these, η elsewhere.
const ALPHA_PURE_AFTER: &[char] = &['ε', 'ι', 'ρ'];
// Third-declension consonant stems end in one of these in the nominative.
const CONSONANT_STEM_FINALS: &[char] = &['ξ', 'ψ', 'ρ', 'ν'];
const DENTAL_NEUTER_FINAL: &str = "μα";
const MIN_STEM_LETTERS: usize = 2;
const MIN_FORM_LETTERS: usize = 2;

// ---------------------------------------------------------------------------
// Paradigm classes
// ---------------------------------------------------------------------------

const NOMINAL_CLASSES: &[ParadigmClass] = &[
    ParadigmClass::FirstDeclFem(FirstDecl::AlphaLong),
    ParadigmClass::FirstDeclFem(FirstDecl::AlphaShort),
    ParadigmClass::FirstDeclFem(FirstDecl::Eta),
    ParadigmClass::SecondDeclMasc,
    ParadigmClass::SecondDeclNeut,
    ParadigmClass::ThirdDecl(ThirdDecl::Consonant),
    ParadigmClass::ThirdDecl(ThirdDecl::Sigma),
    ParadigmClass::ThirdDecl(ThirdDecl::DentalNeuter),
];
const ADJECTIVE_CLASSES: &[ParadigmClass] =
    &[ParadigmClass::AdjTwoOneTwo, ParadigmClass::AdjTwoOneTwoCompound];
const VERB_CLASSES: &[ParadigmClass] = &[ParadigmClass::VerbThematic, ParadigmClass::VerbAthematic];

impl ParadigmClass {
    /// Every regular class, in the order synthesis tries them.
    pub const REGULAR: &'static [ParadigmClass] = &[
        ParadigmClass::FirstDeclFem(FirstDecl::AlphaLong),
        ParadigmClass::FirstDeclFem(FirstDecl::AlphaShort),
        ParadigmClass::FirstDeclFem(FirstDecl::Eta),
        ParadigmClass::SecondDeclMasc,
        ParadigmClass::SecondDeclNeut,
        ParadigmClass::ThirdDecl(ThirdDecl::Consonant),
        ParadigmClass::ThirdDecl(ThirdDecl::Sigma),
        ParadigmClass::ThirdDecl(ThirdDecl::DentalNeuter),
        ParadigmClass::VerbThematic,
        ParadigmClass::VerbAthematic,
        ParadigmClass::AdjTwoOneTwo,
        ParadigmClass::AdjTwoOneTwoCompound,
    ];

    /// Classes to try for a part-of-speech hint. Adjectives also try the
    /// nominal classes; no hint means everything.
    pub fn candidates(hint: Option<PartOfSpeech>) -> Vec<ParadigmClass> {
        match hint {
            Some(PartOfSpeech::Noun) => NOMINAL_CLASSES.to_vec(),
            Some(PartOfSpeech::Verb) => VERB_CLASSES.to_vec(),
            Some(PartOfSpeech::Adjective) => {
                ADJECTIVE_CLASSES.iter().chain(NOMINAL_CLASSES).copied().collect()
            }
            None => Self::REGULAR.to_vec(),
        }
    }

    /// The ending the headword must carry, stripped to obtain the stem.
    pub fn dictionary_ending(self) -> &'static str {
        match self {
            ParadigmClass::FirstDeclFem(FirstDecl::Eta) => "η",
            ParadigmClass::FirstDeclFem(_) => "α",
            ParadigmClass::SecondDeclMasc
            | ParadigmClass::ThirdDecl(ThirdDecl::Sigma)
            | ParadigmClass::AdjTwoOneTwo
            | ParadigmClass::AdjTwoOneTwoCompound => "οσ",
            ParadigmClass::SecondDeclNeut => "ον",
            ParadigmClass::ThirdDecl(_) => "",
            ParadigmClass::VerbThematic => "ω",
            ParadigmClass::VerbAthematic => "μι",
            ParadigmClass::Irregular(_) => "",
        }
    }

    /// Stem of `lemma` under this class, or None if the class does not apply.
    pub fn stem(self, lemma: &str) -> Option<&str> {
        let ok = match self {
            ParadigmClass::ThirdDecl(ThirdDecl::Consonant) => lemma
                .chars()
                .last()
                .map_or(false, |c| CONSONANT_STEM_FINALS.contains(&c)),
            ParadigmClass::ThirdDecl(ThirdDecl::DentalNeuter) => lemma.ends_with(DENTAL_NEUTER_FINAL),
            ParadigmClass::Irregular(_) => false,
            _ => true,
        };
        if !ok {
            return None;
        }
        let stem = lemma.strip_suffix(self.dictionary_ending())?;
        (stem.chars().count() >= MIN_STEM_LETTERS).then_some(stem)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// All surface forms `headword` can take. The lemma itself is always present
/// unless its key is shorter than two letters, in which case nothing is.
pub fn synthesize(headword: &Headword, class_hint: Option<PartOfSpeech>) -> BTreeSet<NormalizedForm> {
    paradigm(headword, class_hint).into_iter().map(|i| i.form).collect()
}

/// Like [`synthesize`] but keeps the class and cell of every form. The first
/// entry is the lemma; a form reachable from several cells appears once per
/// cell.
pub fn paradigm(headword: &Headword, class_hint: Option<PartOfSpeech>) -> Vec<Inflection> {
    let lemma = &headword.normalized_form;
    if lemma.letters() < MIN_FORM_LETTERS {
        return Vec::new();
    }
    let mut raw: Vec<(String, ParadigmClass, String)> = Vec::new();

    let irregular: Vec<_> = IRREGULAR_VERBS
        .iter()
        .filter(|p| normalize(p.lemma) == *lemma)
        .collect();
    let verbs_allowed = matches!(class_hint, None | Some(PartOfSpeech::Verb));

    if verbs_allowed && !irregular.is_empty() {
        // Listed paradigms replace generation entirely.
        for p in irregular {
            for &(form, cell) in p.forms {
                raw.push((normalize(form).into_string(), ParadigmClass::Irregular(p.lemma), cell.to_string()));
            }
        }
    } else {
        for class in ParadigmClass::candidates(class_hint) {
            if let Some(stem) = class.stem(lemma.as_str()) {
                class_forms(class, stem, &mut raw);
            }
        }
    }

    let mut out = Vec::with_capacity(raw.len() + 1);
    let first_class = raw.first().map(|(_, c, _)| *c).unwrap_or(ParadigmClass::Irregular(""));
    out.push(Inflection {
        form: lemma.clone(),
        class: first_class,
        cell: "lemma".to_string(),
    });

    for (form, class, cell) in with_movable_nu(raw) {
        // Keep only strings that are already pure normalized Greek.
        let key = normalize(&form);
        if key.as_str() != form || key.letters() < MIN_FORM_LETTERS {
            continue;
        }
        if out.iter().any(|i| i.form == key && i.cell == cell) {
            continue;
        }
        out.push(Inflection { form: key, class, cell });
    }
    out
}

/// Prepend the syllabic augment to a consonant-initial stem.
pub fn augment(stem: &str) -> String {
    match stem.chars().next() {
        Some(c) if !VOWELS.contains(&c) => format!("{SYLLABIC_AUGMENT}{stem}"),
        _ => stem.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Per-class generation
// ---------------------------------------------------------------------------

fn class_forms(class: ParadigmClass, stem: &str, out: &mut Vec<(String, ParadigmClass, String)>) {
    let mut push_table = |stem: &str, table: Table, prefix: &str| {
        for &(ending, cell) in table {
            let cell = if prefix.is_empty() {
                cell.to_string()
            } else {
                format!("{prefix} {cell}")
            };
            out.push((format!("{stem}{ending}"), class, cell));
        }
    };

    match class {
        ParadigmClass::FirstDeclFem(FirstDecl::AlphaLong) => push_table(stem, FIRST_DECL_ALPHA_LONG, ""),
        ParadigmClass::FirstDeclFem(FirstDecl::AlphaShort) => push_table(stem, FIRST_DECL_ALPHA_SHORT, ""),
        ParadigmClass::FirstDeclFem(FirstDecl::Eta) => push_table(stem, FIRST_DECL_ETA, ""),
        ParadigmClass::SecondDeclMasc => push_table(stem, SECOND_DECL_MASC, ""),
        ParadigmClass::SecondDeclNeut => push_table(stem, SECOND_DECL_NEUT, ""),
        ParadigmClass::ThirdDecl(ThirdDecl::Consonant) => push_table(stem, THIRD_DECL_CONSONANT, ""),
        ParadigmClass::ThirdDecl(ThirdDecl::Sigma) => push_table(stem, THIRD_DECL_SIGMA, ""),
        ParadigmClass::ThirdDecl(ThirdDecl::DentalNeuter) => {
            push_table(stem, THIRD_DECL_DENTAL_NEUTER, "")
        }
        ParadigmClass::AdjTwoOneTwo => {
            let feminine = if stem.chars().last().map_or(false, |c| ALPHA_PURE_AFTER.contains(&c)) {
                FIRST_DECL_ALPHA_LONG
            } else {
                FIRST_DECL_ETA
            };
            push_table(stem, SECOND_DECL_MASC, "masc");
            push_table(stem, feminine, "fem");
            push_table(stem, SECOND_DECL_NEUT, "neut");
        }
        ParadigmClass::AdjTwoOneTwoCompound => {
            push_table(stem, SECOND_DECL_MASC, "masc/fem");
            push_table(stem, SECOND_DECL_NEUT, "neut");
        }
        ParadigmClass::VerbThematic => {
            push_table(stem, PRESENT_ACTIVE, "");
            push_table(stem, PRESENT_MIDDLE, "");
            if let Some((contracted, table)) = contract_stem(stem) {
                push_table(contracted, table, "contr");
            }
            past_forms(stem, &mut push_table);
        }
        ParadigmClass::VerbAthematic => {
            push_table(stem, ATHEMATIC_ACTIVE, "");
            past_forms(stem, &mut push_table);
        }
        ParadigmClass::Irregular(_) => {}
    }
}

fn past_forms(stem: &str, push_table: &mut impl FnMut(&str, Table, &str)) {
    let augmented = augment(stem);
    push_table(&augmented, IMPERFECT_ACTIVE, "");
    push_table(&augmented, IMPERFECT_MIDDLE, "");
    push_table(&augmented, AORIST_WEAK_ACTIVE, "");
    push_table(&augmented, AORIST_WEAK_MIDDLE, "");
    push_table(&augmented, AORIST_STRONG_ACTIVE, "");
    push_table(stem, AORIST_PASSIVE_PARTICIPLE, "");
}

/// For α/ε/ο stems, the stem without its vowel and the contracted table.
fn contract_stem(stem: &str) -> Option<(&str, Table)> {
    let last = stem.chars().last()?;
    let table = match last {
        'α' => CONTRACT_ALPHA,
        'ε' => CONTRACT_EPSILON,
        'ο' => CONTRACT_OMICRON,
        _ => return None,
    };
    let contracted = &stem[..stem.len() - last.len_utf8()];
    (contracted.chars().count() >= MIN_STEM_LETTERS).then_some((contracted, table))
}

/// Add the -ν variant of third-person forms in -ε and of forms in -σι.
fn with_movable_nu(
    forms: Vec<(String, ParadigmClass, String)>,
) -> Vec<(String, ParadigmClass, String)> {
    let mut out = Vec::with_capacity(forms.len() + forms.len() / 8);
    for (form, class, cell) in forms {
        let takes_nu = (form.ends_with('ε') && cell.contains("3sg")) || form.ends_with("σι");
        if takes_nu {
            let variant = format!("{form}{MOVABLE_NU}");
            let variant_cell = format!("{cell} (movable nu)");
            out.push((form, class, cell));
            out.push((variant, class, variant_cell));
        } else {
            out.push((form, class, cell));
        }
    }
    out
}

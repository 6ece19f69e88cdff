// Static lookup tables. Kept as data so entries can be added without touching
// the synthesis or resolution code.
//
// Entries are written in ordinary accented orthography and normalized where
// they are used.

// ---------------------------------------------------------------------------
// Irregular verbs
// ---------------------------------------------------------------------------

/// A verb whose paradigm is listed rather than generated.
#[derive(Debug, Clone, Copy)]
pub struct IrregularParadigm {
    /// Citation form; also the paradigm's name.
    pub lemma: &'static str,
    /// (form, cell) pairs.
    pub forms: &'static [(&'static str, &'static str)],
}

pub const IRREGULAR_VERBS: &[IrregularParadigm] = &[
    IrregularParadigm {
        lemma: "εἰμί",
        forms: &[
            ("εἰμί", "pres ind 1sg"),
            ("εἶ", "pres ind 2sg"),
            ("ἐστί", "pres ind 3sg"),
            ("ἐστίν", "pres ind 3sg"),
            ("ἐσμέν", "pres ind 1pl"),
            ("ἐστέ", "pres ind 2pl"),
            ("εἰσί", "pres ind 3pl"),
            ("εἰσίν", "pres ind 3pl"),
            ("ἦν", "impf ind 1sg"),
            ("ἦσθα", "impf ind 2sg"),
            ("ἦς", "impf ind 2sg"),
            ("ἦν", "impf ind 3sg"),
            ("ἦμεν", "impf ind 1pl"),
            ("ἦτε", "impf ind 2pl"),
            ("ἦσαν", "impf ind 3pl"),
            ("εἶναι", "pres inf"),
        ],
    },
    IrregularParadigm {
        lemma: "φημί",
        forms: &[
            ("φημί", "pres ind 1sg"),
            ("φῄς", "pres ind 2sg"),
            ("φησί", "pres ind 3sg"),
            ("φησίν", "pres ind 3sg"),
            ("φαμέν", "pres ind 1pl"),
            ("φατέ", "pres ind 2pl"),
            ("φασί", "pres ind 3pl"),
            ("φασίν", "pres ind 3pl"),
            ("ἔφην", "impf ind 1sg"),
            ("ἔφη", "impf ind 3sg"),
            ("ἔφασαν", "impf ind 3pl"),
            ("φάναι", "pres inf"),
        ],
    },
    IrregularParadigm {
        lemma: "οἶδα",
        forms: &[
            ("οἶδα", "perf ind 1sg"),
            ("οἶσθα", "perf ind 2sg"),
            ("οἶδε", "perf ind 3sg"),
            ("οἶδεν", "perf ind 3sg"),
            ("ἴσμεν", "perf ind 1pl"),
            ("ἴστε", "perf ind 2pl"),
            ("ἴσασι", "perf ind 3pl"),
            ("ἴσασιν", "perf ind 3pl"),
            ("ᾔδει", "plpf ind 3sg"),
            ("εἰδέναι", "perf inf"),
        ],
    },
    IrregularParadigm {
        lemma: "εἶμι",
        forms: &[
            ("εἶμι", "pres ind 1sg"),
            ("εἶ", "pres ind 2sg"),
            ("εἶσι", "pres ind 3sg"),
            ("εἶσιν", "pres ind 3sg"),
            ("ἴμεν", "pres ind 1pl"),
            ("ἴτε", "pres ind 2pl"),
            ("ἴασι", "pres ind 3pl"),
            ("ἴασιν", "pres ind 3pl"),
            ("ᾖα", "impf ind 1sg"),
            ("ἰέναι", "pres inf"),
        ],
    },
];

// ---------------------------------------------------------------------------
// Augment exceptions
// ---------------------------------------------------------------------------

/// (normalized form prefix, lemma) pairs for verbs whose augmented stem does
/// not reduce to the present stem by dropping `ε`. ἔθηκε → τίθημι.
pub const AUGMENT_EXCEPTIONS: &[(&str, &str)] = &[("εθ", "τιθημι")];

// ---------------------------------------------------------------------------
// Patronymics
// ---------------------------------------------------------------------------

/// (inflected patronymic suffix, father-name ending), normalized. Tried in
/// order. Ἀτρείδης → Ἀτρεύς, Πηληϊάδεω → Πηλεύς.
pub const PATRONYMIC_SUFFIXES: &[(&str, &str)] = &[
    ("ιδησ", "ευσ"),
    ("ιαδησ", "ευσ"),
    ("ιδου", "ευσ"),
    ("ιαδεω", "ευσ"),
    ("ιδη", "ευσ"),
    ("ιαδη", "ευσ"),
    ("ιδα", "ευσ"),
    ("ιαδα", "ευσ"),
    ("ιδησ", "οσ"),
    ("ιαδησ", "οσ"),
    ("ιδησ", "ησ"),
    ("ιαδησ", "ησ"),
];

/// Oblique patronymic endings and the nominative they belong to, for forms
/// whose patronymic is itself a headword.
pub const PATRONYMIC_NOMINATIVES: &[(&str, &str)] = &[
    ("ιδου", "ιδησ"),
    ("ιαδεω", "ιαδησ"),
    ("ιδη", "ιδησ"),
    ("ιαδη", "ιαδησ"),
    ("ιδα", "ιδησ"),
    ("ιαδα", "ιαδησ"),
    ("ιδην", "ιδησ"),
    ("ιαδην", "ιαδησ"),
];

/// Father-name ending that triggers the η → ε alternation.
pub const PATRONYMIC_ALTERNATION_ENDING: &str = "ευσ";

/// Epic genitive of -εύς names: Ἀχιλῆος → Ἀχιλλεύς.
pub const EUS_GENITIVE: (&str, &str) = ("ηοσ", "ευσ");

/// Consonants that may be written single in the genitive but doubled in the
/// nominative.
pub const DOUBLING_LIQUIDS: &[char] = &['λ', 'μ', 'ν', 'ρ'];

// ---------------------------------------------------------------------------
// Curated common forms
// ---------------------------------------------------------------------------

/// (form, lemma, morphology) for adverbs, pronouns, particles and elided
/// prepositions the rule tables cannot reach.
pub const COMMON_FORMS: &[(&str, &str, &str)] = &[
    // adverbs
    ("κακῶς", "κακός", "adverb"),
    ("ὀρθῶς", "ὀρθός", "adverb"),
    ("καλῶς", "καλός", "adverb"),
    ("εὖ", "εὐς", "adverb"),
    ("σαφῶς", "σαφής", "adverb"),
    ("ἀληθῶς", "ἀληθής", "adverb"),
    ("ὁμοίως", "ὅμοιος", "adverb"),
    ("ἧττον", "ἥσσων", "adverb_comparative"),
    ("μᾶλλον", "μάλα", "adverb_comparative"),
    // superlatives
    ("μάλιστα", "μάλα", "adverb_superlative"),
    ("πρῶτον", "πρῶτος", "neuter_acc_sg"),
    ("μέγιστον", "μέγας", "superlative_neut_acc_sg"),
    // pronouns
    ("ἡμῖν", "ἐγώ", "1p_dat_pl"),
    ("ἡμᾶς", "ἐγώ", "1p_acc_pl"),
    ("ἡμεῖς", "ἐγώ", "1p_nom_pl"),
    ("ὑμῖν", "σύ", "2p_dat_pl"),
    ("ὑμᾶς", "σύ", "2p_acc_pl"),
    ("ὑμεῖς", "σύ", "2p_nom_pl"),
    ("ὑμῶν", "σύ", "2p_gen_pl"),
    ("ἐμοί", "ἐγώ", "1s_dat"),
    ("ἐμέ", "ἐγώ", "1s_acc"),
    ("μου", "ἐγώ", "1s_gen"),
    ("μοι", "ἐγώ", "1s_dat"),
    ("σου", "σύ", "2s_gen"),
    ("σοι", "σύ", "2s_dat"),
    ("σε", "σύ", "2s_acc"),
    ("ἔγωγε", "ἐγώ", "pronoun_emphatic"),
    // negatives
    ("οὐχ", "οὐ", "negative_rough"),
    ("οὐχί", "οὐ", "negative_emphatic"),
    ("οὐκ", "οὐ", "negative_smooth"),
    ("μήτ", "μή", "negative_elided"),
    ("οὐδ", "οὐδέ", "conjunction_elided"),
    // elided and prevocalic prepositions
    ("ὑπ", "ὑπό", "preposition_elided"),
    ("ἀπ", "ἀπό", "preposition_elided"),
    ("ἐφ", "ἐπί", "preposition_elided_rough"),
    ("ἐπ", "ἐπί", "preposition_elided"),
    ("ἐξ", "ἐκ", "preposition_prevocalic"),
    // elided conjunctions, demonstratives, crasis
    ("ὥστ", "ὥστε", "conjunction_elided"),
    ("τόδ", "ὅδε", "demonstrative_neut_acc"),
    ("τάδ", "ὅδε", "demonstrative_neut_acc_pl"),
    ("τοῦτ", "οὗτος", "demonstrative_neut_nom_acc"),
    ("τἆλλα", "ἄλλος", "pronoun_neut_acc_pl_crasis"),
    // verbs
    ("ἔχοντα", "ἔχω", "participle_pres_act_masc_acc_sg"),
    ("ἔχοντες", "ἔχω", "participle_pres_act_masc_nom_pl"),
    ("πράττειν", "πράσσω", "infinitive_pres_act"),
    ("χαίρειν", "χαίρω", "infinitive_pres_act"),
    ("φρονεῖν", "φρονέω", "infinitive_pres_act"),
    ("γενομένης", "γίγνομαι", "participle_aor_mid_fem_gen_sg"),
];

/// (form, lemma, morphology) for proper names.
pub const PROPER_NAMES: &[(&str, &str, &str)] = &[
    ("Ῥωμαίων", "Ῥωμαῖος", "proper_noun_gen_pl"),
    ("Καίσαρος", "Καῖσαρ", "proper_noun_gen_sg"),
    ("Καῖσαρ", "Καῖσαρ", "proper_noun_nom"),
    ("Πομπήιον", "Πομπήιος", "proper_noun_acc_sg"),
    ("Πομπήιος", "Πομπήιος", "proper_noun_nom"),
    ("Πομπηίου", "Πομπήιος", "proper_noun_gen_sg"),
];

/// Confidence assigned to curated common forms.
pub const COMMON_FORM_CONFIDENCE: f64 = 1.0;
/// Confidence assigned to curated proper names.
pub const PROPER_NAME_CONFIDENCE: f64 = 0.9;

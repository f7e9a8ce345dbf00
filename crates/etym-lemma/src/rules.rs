//! Rule-based lemmatizer: irregular-form exceptions first, then per-category
//! suffix detachment with e-restoration, consonant un-doubling and
//! y-restoration, every candidate checked against the lexicon.

use etym_core::PartOfSpeech;

use crate::lexicon::Lexicon;
use crate::LemmaOracle;

// ─── Irregular forms ─────────────────────────────────────────────

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("wives", "wife"),
    ("women", "woman"),
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("are", "be"),
    ("ate", "eat"),
    ("been", "be"),
    ("began", "begin"),
    ("came", "come"),
    ("did", "do"),
    ("done", "do"),
    ("gave", "give"),
    ("gone", "go"),
    ("had", "have"),
    ("has", "have"),
    ("is", "be"),
    ("made", "make"),
    ("ran", "run"),
    ("said", "say"),
    ("saw", "see"),
    ("took", "take"),
    ("was", "be"),
    ("went", "go"),
    ("were", "be"),
    ("wrote", "write"),
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("best", "good"),
    ("better", "good"),
    ("further", "far"),
    ("worse", "bad"),
    ("worst", "bad"),
];

const ADVERB_EXCEPTIONS: &[(&str, &str)] = &[("best", "well"), ("better", "well")];

// ─── Detachment rules ────────────────────────────────────────────

// (suffix, replacement) pairs, tried in order. A candidate only counts
// when the lexicon lists it under the requested category.
const NOUN_SUFFIXES: &[(&str, &str)] = &[
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
    ("es", ""),
    ("s", ""),
];

const VERB_SUFFIXES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ing", "e"),
    ("ing", ""),
    ("ed", "e"),
    ("ed", ""),
    ("es", "e"),
    ("es", ""),
    ("s", ""),
];

const ADJECTIVE_SUFFIXES: &[(&str, &str)] = &[
    ("iest", "y"),
    ("ier", "y"),
    ("est", "e"),
    ("est", ""),
    ("er", "e"),
    ("er", ""),
];

const ADVERB_SUFFIXES: &[(&str, &str)] = &[];

fn exceptions(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => NOUN_EXCEPTIONS,
        PartOfSpeech::Verb => VERB_EXCEPTIONS,
        PartOfSpeech::Adjective => ADJECTIVE_EXCEPTIONS,
        PartOfSpeech::Adverb => ADVERB_EXCEPTIONS,
    }
}

fn suffixes(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => NOUN_SUFFIXES,
        PartOfSpeech::Verb => VERB_SUFFIXES,
        PartOfSpeech::Adjective => ADJECTIVE_SUFFIXES,
        PartOfSpeech::Adverb => ADVERB_SUFFIXES,
    }
}

/// Whether the stem ends in a doubled consonant ("stopp", "runn").
fn ends_doubled(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    if bytes.len() < 2 {
        return false;
    }
    let last = bytes[bytes.len() - 1];
    last == bytes[bytes.len() - 2]
        && last.is_ascii_alphabetic()
        && !matches!(last, b'a' | b'e' | b'i' | b'o' | b'u')
}

// ─── RuleLemmatizer ──────────────────────────────────────────────

pub struct RuleLemmatizer {
    lexicon: Lexicon,
}

impl RuleLemmatizer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Lemmatizer over the embedded built-in lexicon.
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Base form of a lowercased word under `pos`, or `None` when no known
    /// base form exists.
    fn base_form(&self, lower: &str, pos: PartOfSpeech) -> Option<String> {
        for (inflected, base) in exceptions(pos) {
            if lower == *inflected {
                return Some((*base).to_string());
            }
        }
        if self.lexicon.has_sense(lower, pos) {
            return Some(lower.to_string());
        }
        for (suffix, replacement) in suffixes(pos) {
            let Some(stem) = lower.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let candidate = format!("{stem}{replacement}");
            if self.lexicon.has_sense(&candidate, pos) {
                return Some(candidate);
            }
            // stopped -> stopp -> stop
            if replacement.is_empty() && ends_doubled(stem) {
                let undoubled = &stem[..stem.len() - 1];
                if self.lexicon.has_sense(undoubled, pos) {
                    return Some(undoubled.to_string());
                }
            }
        }
        None
    }
}

impl LemmaOracle for RuleLemmatizer {
    fn senses(&self, word: &str) -> Vec<PartOfSpeech> {
        let lower = word.to_lowercase();
        if let Some(senses) = self.lexicon.senses(&lower) {
            return senses.to_vec();
        }
        // Inflected form: inherit the base form's senses per category, so
        // "running" votes with run's verb senses.
        let mut senses = Vec::new();
        for pos in PartOfSpeech::ALL {
            if let Some(base) = self.base_form(&lower, pos) {
                if base != lower {
                    let count = self
                        .lexicon
                        .senses(&base)
                        .map(|s| s.iter().filter(|p| **p == pos).count())
                        .unwrap_or(0);
                    // Exception targets may be absent from the lexicon;
                    // still count the category once.
                    senses.extend(std::iter::repeat(pos).take(count.max(1)));
                }
            }
        }
        senses
    }

    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        let lower = word.to_lowercase();
        match self.base_form(&lower, pos) {
            Some(base) => base,
            None => word.to_string(),
        }
    }

    fn name(&self) -> &str {
        "rule-lemmatizer"
    }
}

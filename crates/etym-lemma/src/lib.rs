//! Lemmatization oracle: part-of-speech classification and reduction of
//! inflected words to their dictionary base forms.
//!
//! The resolver only talks to the `LemmaOracle` trait; `RuleLemmatizer`
//! is the built-in backend (embedded lexicon + detachment rules).

pub mod lexicon;
pub mod rules;

pub use lexicon::Lexicon;
pub use rules::RuleLemmatizer;

use etym_core::PartOfSpeech;

/// Pluggable lemmatization backend.
///
/// The trait is object-safe and uses `&self` (sync). `lemmatize` must
/// return its input unchanged when no base form is known — that fixed
/// point is what terminates the resolver's retry loop.
pub trait LemmaOracle {
    /// All senses known for `word`, one entry per sense. Empty when the
    /// word is unknown.
    fn senses(&self, word: &str) -> Vec<PartOfSpeech>;

    /// The dictionary base form of `word` under `pos`, or the input
    /// unchanged when none is known.
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String;

    /// Human-readable backend name (for logging).
    fn name(&self) -> &str;

    /// Dominant lexical category: majority vote over all known senses.
    /// Ties break toward the earlier entry in `PartOfSpeech::ALL`;
    /// unknown words default to noun.
    fn dominant_pos(&self, word: &str) -> PartOfSpeech {
        let senses = self.senses(word);
        let mut best = PartOfSpeech::Noun;
        let mut best_count = 0usize;
        for pos in PartOfSpeech::ALL {
            let count = senses.iter().filter(|s| **s == pos).count();
            if count > best_count {
                best = pos;
                best_count = count;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSenses(Vec<PartOfSpeech>);

    impl LemmaOracle for FixedSenses {
        fn senses(&self, _word: &str) -> Vec<PartOfSpeech> {
            self.0.clone()
        }
        fn lemmatize(&self, word: &str, _pos: PartOfSpeech) -> String {
            word.to_string()
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn dominant_pos_majority_wins() {
        let oracle = FixedSenses(vec![
            PartOfSpeech::Verb,
            PartOfSpeech::Verb,
            PartOfSpeech::Noun,
        ]);
        assert_eq!(oracle.dominant_pos("run"), PartOfSpeech::Verb);
    }

    #[test]
    fn dominant_pos_defaults_to_noun_when_unknown() {
        let oracle = FixedSenses(vec![]);
        assert_eq!(oracle.dominant_pos("xyzzyplugh"), PartOfSpeech::Noun);
    }

    #[test]
    fn dominant_pos_tie_prefers_noun() {
        let oracle = FixedSenses(vec![PartOfSpeech::Verb, PartOfSpeech::Noun]);
        assert_eq!(oracle.dominant_pos("walk"), PartOfSpeech::Noun);
    }
}

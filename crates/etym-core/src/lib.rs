//! Shared data model for the etym workspace.
//!
//! `Lookup` is the one structure the whole pipeline produces and the API
//! serves. `PartOfSpeech` is the finite lexical-category enumeration used
//! by the lemmatization oracle.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Lookup result ───────────────────────────────────────────────

/// Result of one top-level etymology lookup.
///
/// All failure is encoded in `None` fields; a lookup never fails outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    /// The word the caller asked about. Only when the entire chain failed
    /// does this hold the deepest attempted form instead.
    pub word: String,
    /// The dictionary root form that was actually looked up, when
    /// normalization changed the word. `None` when the word resolved
    /// directly or normalization never moved off the input.
    pub root: Option<String>,
    /// Lexical category label from the source page, stripped of its
    /// surrounding parentheses.
    pub word_type: Option<String>,
    /// First etymology entry on the page, whitespace-collapsed.
    #[serde(rename = "first-attested-meaning")]
    pub first_attested_meaning: Option<String>,
}

impl Lookup {
    /// An all-`None` result for a word. Starting point for every resolution.
    pub fn empty(word: &str) -> Self {
        Self {
            word: word.to_string(),
            root: None,
            word_type: None,
            first_attested_meaning: None,
        }
    }

    /// Whether this lookup found an etymology entry.
    pub fn found(&self) -> bool {
        self.first_attested_meaning.is_some()
    }
}

// ─── Part of speech ──────────────────────────────────────────────

/// Lexical category used to select lemmatization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// All categories, in tie-break precedence order (noun first).
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        }
    }

    /// Parse a single-letter lexicon tag: n, v, a, r.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(PartOfSpeech::Noun),
            "v" => Some(PartOfSpeech::Verb),
            "a" => Some(PartOfSpeech::Adjective),
            "r" => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Text helpers ────────────────────────────────────────────────

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                result.push(' ');
            }
            prev_space = true;
        } else {
            result.push(ch);
            prev_space = false;
        }
    }
    result.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lookup_has_no_fields() {
        let lookup = Lookup::empty("dog");
        assert_eq!(lookup.word, "dog");
        assert!(lookup.root.is_none());
        assert!(lookup.word_type.is_none());
        assert!(!lookup.found());
    }

    #[test]
    fn lookup_serializes_hyphenated_meaning_field() {
        let lookup = Lookup {
            word: "dog".to_string(),
            root: None,
            word_type: Some("n.".to_string()),
            first_attested_meaning: Some("a common pet".to_string()),
        };
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(json["first-attested-meaning"], "a common pet");
        assert_eq!(json["word_type"], "n.");
        assert_eq!(json["root"], serde_json::Value::Null);
    }

    #[test]
    fn pos_tags_round_trip() {
        for pos in PartOfSpeech::ALL {
            let tag = match pos {
                PartOfSpeech::Noun => "n",
                PartOfSpeech::Verb => "v",
                PartOfSpeech::Adjective => "a",
                PartOfSpeech::Adverb => "r",
            };
            assert_eq!(PartOfSpeech::from_tag(tag), Some(pos));
        }
        assert_eq!(PartOfSpeech::from_tag("x"), None);
    }

    #[test]
    fn collapse_whitespace_works() {
        assert_eq!(collapse_whitespace("a  b\n\tc"), "a b c");
        assert_eq!(collapse_whitespace("  leading and trailing  "), "leading and trailing");
        assert_eq!(collapse_whitespace(""), "");
    }
}

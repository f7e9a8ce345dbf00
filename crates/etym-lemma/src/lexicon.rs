//! Word → sense-tag lexicon backing the rule lemmatizer.
//!
//! A small table of common English base forms is embedded in the binary;
//! a larger table can be loaded from a file of the same format. Format:
//! one word per line followed by one tag per known sense (n / v / a / r),
//! `#` starts a comment.

use std::collections::HashMap;
use std::path::Path;

use etym_core::PartOfSpeech;

const BUILTIN: &str = include_str!("../data/lexicon.txt");

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    senses: HashMap<String, Vec<PartOfSpeech>>,
}

impl Lexicon {
    /// The embedded built-in lexicon.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN)
    }

    pub fn parse(text: &str) -> Self {
        let mut senses: HashMap<String, Vec<PartOfSpeech>> = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else { continue };
            let tags: Vec<PartOfSpeech> = parts.filter_map(PartOfSpeech::from_tag).collect();
            if tags.is_empty() {
                tracing::warn!("lexicon line for '{}' has no usable sense tags", word);
                continue;
            }
            senses.entry(word.to_lowercase()).or_default().extend(tags);
        }
        Self { senses }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// All senses recorded for `word` (already lowercased by callers).
    pub fn senses(&self, word: &str) -> Option<&[PartOfSpeech]> {
        self.senses.get(word).map(|v| v.as_slice())
    }

    /// Whether `word` has at least one sense under `pos`.
    pub fn has_sense(&self, word: &str, pos: PartOfSpeech) -> bool {
        self.senses.get(word).map(|v| v.contains(&pos)).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }
}

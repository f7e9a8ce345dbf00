//! The resolution loop: fetch the page for a word, extract its fields,
//! and when no meaning is found, lemmatize toward a dictionary root form
//! and retry, bounded by a configured maximum depth.

use etym_core::Lookup;
use etym_lemma::LemmaOracle;

use crate::fetch::PageFetcher;
use crate::page;

// ─── Configuration ───────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Source site base URL; word pages live under `<base>/word/<word>`.
    pub base_url: String,
    /// Maximum number of lemmatization retries. The depth bound is a hard
    /// invariant guarding against oracle cycles, not an optimization.
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.etymonline.com".to_string(),
            max_depth: 5,
        }
    }
}

// ─── Resolver ────────────────────────────────────────────────────

/// Resolves a word to its etymological origin. Holds no cross-call state;
/// concurrent resolutions share nothing but the fetcher's agent.
pub struct Resolver {
    fetcher: Box<dyn PageFetcher + Send + Sync>,
    oracle: Box<dyn LemmaOracle + Send + Sync>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(
        fetcher: Box<dyn PageFetcher + Send + Sync>,
        oracle: Box<dyn LemmaOracle + Send + Sync>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            fetcher,
            oracle,
            config,
        }
    }

    fn word_url(&self, word: &str) -> String {
        format!("{}/word/{}", self.config.base_url.trim_end_matches('/'), word)
    }

    /// Resolve `word`. Never fails: transport and markup problems become
    /// `None` fields, and the retry loop always terminates — at a found
    /// meaning, at a lemmatization fixed point, or at the depth bound.
    pub fn resolve(&self, word: &str) -> Lookup {
        let original = word.to_string();
        let mut current = word.to_string();
        let mut word_type: Option<String> = None;
        let mut meaning: Option<String> = None;

        for depth in 0..=self.config.max_depth {
            let url = self.word_url(&current);
            match self.fetcher.fetch_page(&url) {
                Some(raw) => {
                    word_type = page::extract_word_type(&raw);
                    meaning = page::extract_first_meaning(&raw);
                }
                None => {
                    word_type = None;
                    meaning = None;
                }
            }

            if meaning.is_some() {
                tracing::debug!("'{}' resolved at depth {} as '{}'", original, depth, current);
                break;
            }

            if depth == self.config.max_depth {
                // Depth exhausted: no meaning, and any word type scraped
                // along the way is discarded.
                tracing::debug!(
                    "'{}' exhausted lemmatization depth {} at '{}'",
                    original,
                    self.config.max_depth,
                    current
                );
                word_type = None;
                break;
            }

            let pos = self.oracle.dominant_pos(&current);
            let lemma = self.oracle.lemmatize(&current, pos);
            if lemma == current {
                // Fixed point: nothing further to try. The word type from
                // the last page (if any) is kept.
                tracing::debug!("'{}' is a lemmatization fixed point ({})", current, pos);
                break;
            }
            tracing::debug!("no entry for '{}', retrying as {} lemma '{}'", current, pos, lemma);
            current = lemma;
        }

        let root = if current != original {
            Some(current)
        } else {
            None
        };
        Lookup {
            word: original,
            root,
            word_type,
            first_attested_meaning: meaning,
        }
    }
}

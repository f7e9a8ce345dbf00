//! Etymology resolver engine.
//!
//! Composes three pieces: a `PageFetcher` (outbound HTTP), markup
//! extraction (two independent optional-field lookups on the source
//! page), and a `LemmaOracle` (part-of-speech guess + lemmatization)
//! driving the bounded lemmatize-and-retry loop.

pub mod fetch;
pub mod page;
pub mod resolver;

pub use fetch::{HttpFetcher, PageFetcher};
pub use resolver::{Resolver, ResolverConfig};

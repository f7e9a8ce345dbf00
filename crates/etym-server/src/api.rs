//! HTTP API: `GET /etymology/:word`.
//!
//! The shell's responsibilities live here: word-shape validation, rate
//! limiting, cache consult/populate, and mapping of resolver outcomes and
//! internal faults onto status codes. The resolver itself never errors.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;

use etym_core::Lookup;

use crate::service::EtymologyService;

// ─── Error mapping ───────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid word")]
    InvalidWord,
    #[error("Etymology not found")]
    NotFound,
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidWord => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

// ─── Routes ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct EtymologyResponse {
    etymology: Lookup,
}

pub fn routes() -> Router<Arc<EtymologyService>> {
    Router::new().route("/etymology/:word", get(get_etymology))
}

/// A well-formed lookup word: non-empty, ASCII letters and hyphens only.
pub fn valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}

async fn get_etymology(
    State(svc): State<Arc<EtymologyService>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(word): Path<String>,
) -> Result<Json<EtymologyResponse>, ApiError> {
    if !valid_word(&word) {
        return Err(ApiError::InvalidWord);
    }
    if !svc.limiter.allow(addr.ip()) {
        tracing::debug!("rate limit hit for {}", addr.ip());
        return Err(ApiError::RateLimited);
    }

    let lookup = match svc.cache.get(&word) {
        Some(hit) => hit,
        None => {
            // The resolver blocks on network fetches; keep it off the
            // async worker threads.
            let resolver_svc = Arc::clone(&svc);
            let target = word.clone();
            let lookup = match tokio::task::spawn_blocking(move || {
                resolver_svc.resolver.resolve(&target)
            })
            .await
            {
                Ok(lookup) => lookup,
                Err(e) => {
                    tracing::error!("resolver task failed for '{}': {}", word, e);
                    return Err(ApiError::Internal);
                }
            };
            svc.cache.insert(&word, lookup.clone());
            lookup
        }
    };

    if !lookup.found() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(EtymologyResponse { etymology: lookup }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use etym_core::PartOfSpeech;
    use etym_engine::{PageFetcher, Resolver, ResolverConfig};
    use etym_lemma::LemmaOracle;

    use super::*;

    const HEADING_CLASS: &str =
        "scroll-m-16 text-2xl font-serif font-bold text-foreground text-4xl";

    struct MapFetcher {
        pages: HashMap<String, String>,
        calls: Arc<AtomicUsize>,
    }

    impl PageFetcher for MapFetcher {
        fn fetch_page(&self, url: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages.get(url).cloned()
        }
        fn name(&self) -> &str {
            "map"
        }
    }

    struct NoopOracle;

    impl LemmaOracle for NoopOracle {
        fn senses(&self, _word: &str) -> Vec<PartOfSpeech> {
            Vec::new()
        }
        fn lemmatize(&self, word: &str, _pos: PartOfSpeech) -> String {
            word.to_string()
        }
        fn name(&self) -> &str {
            "noop"
        }
    }

    fn word_page(word: &str) -> String {
        format!(
            r#"<h2 class="{HEADING_CLASS}"><span>{word}</span> <span>(n.)</span></h2>
<div class="space-y-2 pb-2">an origin</div>"#
        )
    }

    fn test_service(words: &[&str], per_minute: u32) -> (Arc<EtymologyService>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = MapFetcher {
            pages: words
                .iter()
                .map(|w| (format!("http://test/word/{w}"), word_page(w)))
                .collect(),
            calls: Arc::clone(&calls),
        };
        let resolver = Resolver::new(
            Box::new(fetcher),
            Box::new(NoopOracle),
            ResolverConfig {
                base_url: "http://test".to_string(),
                max_depth: 3,
            },
        );
        let svc = Arc::new(EtymologyService::new(
            resolver,
            Duration::from_secs(60),
            per_minute,
            10_000,
        ));
        (svc, calls)
    }

    async fn send(svc: Arc<EtymologyService>, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = routes().with_state(svc);
        let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[test]
    fn word_shape_check() {
        assert!(valid_word("hello"));
        assert!(valid_word("mother-in-law"));
        assert!(!valid_word("hello123"));
        assert!(!valid_word(""));
        assert!(!valid_word("hello world"));
        assert!(!valid_word("caf\u{e9}"));
    }

    #[tokio::test]
    async fn known_word_returns_etymology() {
        let (svc, _) = test_service(&["dog"], 100);
        let (status, body) = send(svc, "/etymology/dog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["etymology"]["word"], "dog");
        assert_eq!(body["etymology"]["first-attested-meaning"], "an origin");
    }

    #[tokio::test]
    async fn malformed_word_rejected_before_resolving() {
        let (svc, calls) = test_service(&["dog"], 100);
        let (status, body) = send(svc, "/etymology/hello123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid word");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_etymology_maps_to_not_found() {
        let (svc, _) = test_service(&[], 100);
        let (status, body) = send(svc, "/etymology/xyzzyplugh").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Etymology not found");
    }

    #[tokio::test]
    async fn repeated_lookup_is_served_from_cache() {
        let (svc, calls) = test_service(&["dog"], 100);
        let (status, _) = send(Arc::clone(&svc), "/etymology/dog").await;
        assert_eq!(status, StatusCode::OK);
        let fetches_after_first = calls.load(Ordering::SeqCst);
        let (status, _) = send(svc, "/etymology/dog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), fetches_after_first);
    }

    #[tokio::test]
    async fn rate_limit_rejects_excess_calls() {
        let (svc, _) = test_service(&["dog"], 2);
        assert_eq!(
            send(Arc::clone(&svc), "/etymology/dog").await.0,
            StatusCode::OK
        );
        assert_eq!(
            send(Arc::clone(&svc), "/etymology/dog").await.0,
            StatusCode::OK
        );
        let (status, body) = send(svc, "/etymology/dog").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Rate limit exceeded");
    }
}

mod api;
mod cache;
mod ratelimit;
mod service;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use etym_engine::{HttpFetcher, Resolver, ResolverConfig};
use etym_lemma::RuleLemmatizer;

use service::EtymologyService;

#[derive(Parser)]
#[command(name = "etym-server", about = "Etymology lookup API server")]
struct Cli {
    /// Bind address
    #[arg(long, env = "ETYM_HOST", default_value = "0.0.0.0")]
    host: String,
    /// HTTP port
    #[arg(long, env = "ETYM_PORT", default_value = "3000")]
    port: u16,
    /// Response cache time-to-live in seconds
    #[arg(long, env = "ETYM_CACHE_TTL_SECS", default_value = "3600")]
    cache_ttl_secs: u64,
    /// Outbound fetch timeout in seconds
    #[arg(long, env = "ETYM_FETCH_TIMEOUT_SECS", default_value = "10")]
    fetch_timeout_secs: u64,
    /// Lookups allowed per client per minute
    #[arg(long, env = "ETYM_RATE_PER_MINUTE", default_value = "30")]
    rate_per_minute: u32,
    /// Lookups allowed per client per day
    #[arg(long, env = "ETYM_RATE_PER_DAY", default_value = "1000")]
    rate_per_day: u32,
    /// Maximum lemmatization retry depth
    #[arg(long, env = "ETYM_MAX_DEPTH", default_value = "5")]
    max_depth: usize,
    /// Etymology source base URL
    #[arg(long, env = "ETYM_SOURCE_BASE_URL", default_value = "https://www.etymonline.com")]
    source_base_url: String,
    /// Log level
    #[arg(long, env = "ETYM_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "etym-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let resolver = Resolver::new(
        Box::new(HttpFetcher::new(Duration::from_secs(cli.fetch_timeout_secs))),
        Box::new(RuleLemmatizer::builtin()),
        ResolverConfig {
            base_url: cli.source_base_url.clone(),
            max_depth: cli.max_depth,
        },
    );
    let svc = Arc::new(EtymologyService::new(
        resolver,
        Duration::from_secs(cli.cache_ttl_secs),
        cli.rate_per_minute,
        cli.rate_per_day,
    ));

    let app = Router::new()
        .merge(api::routes())
        .route("/", get(root))
        .layer(CorsLayer::permissive())
        .with_state(svc);

    let addr = format!("{}:{}", cli.host, cli.port);
    tracing::info!("etym server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

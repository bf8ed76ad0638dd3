mod config;
mod errors;
mod extract;
mod matching;
mod nlp;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, NlpBackendKind};
use crate::nlp::{HeuristicPhraseExtractor, PhraseExtractor, RemotePhraseExtractor, StopWords};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume matcher v{}", env!("CARGO_PKG_VERSION"));

    // Stop-words and the phrase extractor are built once and shared read-only
    let stop_words = Arc::new(StopWords::new(config.stop_words));
    anyhow::ensure!(
        !stop_words.is_empty(),
        "Stop-word list {:?} has no entries",
        config.stop_words
    );
    info!(
        "Stop-word list loaded: {:?} ({} words)",
        config.stop_words,
        stop_words.len()
    );

    let phrase_extractor = build_phrase_extractor(&config)?;
    info!("Phrase extractor: {}", phrase_extractor.backend_name());

    // Build app state
    let state = AppState {
        config: config.clone(),
        stop_words,
        phrase_extractor,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the NLP backend named by `NLP_BACKEND`.
fn build_phrase_extractor(config: &Config) -> Result<Arc<dyn PhraseExtractor>> {
    match config.nlp_backend {
        NlpBackendKind::Heuristic => Ok(Arc::new(HeuristicPhraseExtractor)),
        NlpBackendKind::Remote => {
            let url = config
                .nlp_service_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("NLP_SERVICE_URL is not set"))?;
            info!("Using remote NLP service at {url}");
            let extractor =
                RemotePhraseExtractor::new(url, Duration::from_secs(config.nlp_timeout_secs))?;
            Ok(Arc::new(extractor))
        }
    }
}

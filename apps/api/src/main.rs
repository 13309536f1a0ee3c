mod analytics;
mod career;
mod config;
mod conversation;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod profile;
mod quiz;
mod routes;
mod state;
mod store;
mod warehouse;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_lazy_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::LearnerStore;
use crate::warehouse::postgres::PgChatLog;
use crate::warehouse::{ChatLogSink, DisabledChatLog};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; nothing is required, so this only fails on a bad PORT
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Learning Companion API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        &config.gemini_api_base,
        &config.gemini_model,
    )?
    .with_retry_policy(config.retry_policy())
    .with_timeouts(config.attempt_timeouts());
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm.model());
    } else {
        warn!("GEMINI_API_KEY not set; chat will use local fallback answers");
    }

    // Initialize chat-log warehouse (best effort, off by default)
    let chat_log = build_chat_log(&config)?;

    // Build app state
    let state = AppState {
        llm,
        store: Arc::new(LearnerStore::new()),
        chat_log,
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

/// Chooses the chat-log sink: PostgreSQL when enabled and configured, otherwise disabled.
fn build_chat_log(config: &Config) -> Result<Arc<dyn ChatLogSink>> {
    let configured = config.database_url.is_some();

    match (&config.database_url, config.chat_logging_enabled) {
        (Some(url), true) => {
            let pool = create_lazy_pool(url)?;
            info!("Chat logging enabled");
            Ok(Arc::new(PgChatLog::new(pool)))
        }
        (None, true) => {
            warn!("ENABLE_CHAT_LOGGING is set but DATABASE_URL is missing; chat logging disabled");
            Ok(Arc::new(DisabledChatLog { configured }))
        }
        _ => {
            info!("Chat logging disabled");
            Ok(Arc::new(DisabledChatLog { configured }))
        }
    }
}

//! elva – entry point.
//!
//! Startup order:
//! 1. Load and validate configuration.
//! 2. Initialise structured tracing (JSON in production, pretty in dev).
//! 3. Open the message store (PostgreSQL when configured, in-memory otherwise).
//! 4. Build the LLM collaborators and the webhook dispatcher.
//! 5. Build the Axum router and serve with graceful shutdown.

use std::sync::Arc;

use tracing::{info, warn};

use elva::adapters::ai::{OpenAIConfig, OpenAIProvider};
use elva::adapters::assistant::{LlmChatResponder, LlmDraftGenerator, LlmIntentClassifier};
use elva::adapters::http::{build_router, ChatHandlers, SystemHandlers};
use elva::adapters::postgres::{connect_lazy, PostgresChatMessageRepository};
use elva::adapters::storage::InMemoryChatMessageRepository;
use elva::adapters::webhook::N8nWebhookDispatcher;
use elva::application::handlers::chat::{
    ApproveActionHandler, ClearHistoryHandler, GetHistoryHandler, SendChatMessageHandler,
};
use elva::application::handlers::system::CheckHealthHandler;
use elva::config::AppConfig;
use elva::ports::{AIProvider, ChatMessageRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let config = AppConfig::load()?;
    config.validate()?;

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match config.server.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: log level '{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    config.server.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if config.server.emits_json_logs() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "elva starting"
    );

    // ── 3. Message store ───────────────────────────────────────────────────────
    let mut pool = None;
    let repository: Arc<dyn ChatMessageRepository> = match config.database.url() {
        Some(url) => {
            let pg = connect_lazy(url, &config.database)?;
            let repo = PostgresChatMessageRepository::new(pg.clone());
            if config.database.ensure_schema {
                if let Err(e) = repo.ensure_schema().await {
                    warn!(error = %e, "could not ensure chat schema; store may be unreachable");
                }
            }
            info!("using PostgreSQL message store");
            pool = Some(pg);
            Arc::new(repo)
        }
        None => {
            warn!("no database URL configured; messages are kept in memory only");
            Arc::new(InMemoryChatMessageRepository::new())
        }
    };

    // ── 4. Collaborators ───────────────────────────────────────────────────────
    if !config.ai.has_groq_key() {
        warn!("GROQ API key missing; LLM calls will fail until it is configured");
    }
    let provider_config = OpenAIConfig::new(config.ai.groq_api_key.clone().unwrap_or_default())
        .with_name("groq")
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());
    let provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(provider_config)?);

    let dispatcher = N8nWebhookDispatcher::new(
        config.webhook.url().map(str::to_string),
        config.webhook.timeout(),
    )?;
    if !dispatcher.is_configured() {
        warn!("n8n webhook URL missing; approved actions will report a dispatch failure");
    }

    // ── 5. Handlers and router ─────────────────────────────────────────────────
    let chat = ChatHandlers::new(
        Arc::new(SendChatMessageHandler::new(
            repository.clone(),
            Arc::new(LlmIntentClassifier::new(provider.clone())),
            Arc::new(LlmDraftGenerator::new(provider.clone())),
            Arc::new(LlmChatResponder::new(provider)),
        )),
        Arc::new(ApproveActionHandler::new(
            repository.clone(),
            Arc::new(dispatcher),
        )),
        Arc::new(GetHistoryHandler::new(repository.clone())),
        Arc::new(ClearHistoryHandler::new(repository.clone())),
    );
    let system = SystemHandlers::new(Arc::new(CheckHealthHandler::new(
        repository,
        config.ai.has_groq_key(),
        config.webhook.is_configured(),
    )));

    let app = build_router(chat, system, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    info!("elva stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}

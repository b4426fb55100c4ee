use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_catalog::{
    config::ServerConfig,
    http::{router, AppState},
    news::ArticleNumber,
    store::InMemoryStore,
};

#[derive(Parser)]
#[command(name = "news-catalog")]
#[command(about = "Paginated news article catalog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Overrides NEWS_PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Overrides NEWS_HOST
    #[arg(long)]
    host: Option<String>,

    /// Number of generated articles to start with, overrides NEWS_SEED_ARTICLES
    #[arg(long)]
    seed: Option<ArticleNumber>,

    #[arg(long)]
    debug: bool,
}

impl Args {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(seed) = self.seed {
            config.seed_articles = seed;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("news_catalog={filter_level},tower_http=info").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = args.apply(
        ServerConfig::from_env().context("Failed to load server configuration from environment")?,
    );

    let store = Arc::new(InMemoryStore::seeded(config.seed_articles));
    let app = router(AppState::new(store));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;

    info!("News catalog started on {}", bind_addr);
    info!("   curl http://{}/news?pageNumber=0", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Why the server stopped accepting connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Interrupt,
    Terminate,
}

async fn shutdown_signal() {
    let reason = tokio::select! {
        _ = interrupted() => StopReason::Interrupt,
        _ = terminated() => StopReason::Terminate,
    };

    info!("Stopping news catalog ({:?}), draining in-flight requests", reason);
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Ctrl+C handler unavailable: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminated() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("SIGTERM handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminated() {
    std::future::pending::<()>().await;
}

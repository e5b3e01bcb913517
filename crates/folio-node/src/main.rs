//! Folio Node - portfolio backend server.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

use folio_node::api::{create_router, AppState};
use folio_node::config::Settings;
use folio_node::observability::{init_logging, LogFormat};
use folio_session::SessionStore;

/// How often expired sessions are purged.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Folio - personal portfolio backend
#[derive(Parser, Debug)]
#[command(name = "folio-node")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error); defaults from DEBUG
    #[arg(long)]
    log_level: Option<String>,

    /// Log format, pretty or json (overrides LOG_FORMAT)
    #[arg(long)]
    log_format: Option<String>,

    /// Start without the sample posts
    #[arg(long)]
    no_seed: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(format) = &self.log_format {
            settings.log_format = format.clone();
        }
        if self.no_seed {
            settings.seed_posts = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load().context("failed to load configuration")?;
    args.apply(&mut settings);

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| settings.log_level().to_string());
    init_logging(&level, LogFormat::parse(&settings.log_format));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Folio node");

    if settings.uses_default_password() {
        tracing::warn!("ADMIN_PASSWORD is not set; using the default admin password");
    }
    if settings.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; session cookies are signed with the default key");
    }

    tracing::info!(
        addr = %settings.bind_addr(),
        environment = %settings.environment,
        audit_dir = ?settings.audit_dir(),
        seed_posts = settings.seed_posts,
        session_ttl_days = settings.session_ttl_days,
        "Node configuration"
    );

    let addr = settings.bind_addr();
    let state = AppState::from_settings(settings);
    spawn_session_sweeper(state.sessions.clone());

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Folio node stopped");
    Ok(())
}

/// Periodically remove expired sessions.
fn spawn_session_sweeper(sessions: Arc<SessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sessions.sweep_expired();
            if removed > 0 {
                tracing::debug!(removed, "Swept expired sessions");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

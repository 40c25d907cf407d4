//! gchat relay server binary.
//!
//! Serves `POST /api/gemini`, forwarding prompts to Gemini with the API key
//! taken from `GEMINI_API_KEY` (a `.env` file is honoured).

use clap::Parser;
use gchat_api::config::{ApiConfig, DEFAULT_HOST, DEFAULT_PORT};
use gchat_core::gemini::GEMINI_API_URL;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const DEFAULT_LOG_FILTER: &str = "info,gchat_api=debug,gchat_core=debug";

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "gchat_api_server", version, about = "gchat Gemini relay server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Interface to bind.
    #[arg(long, env = "BIND_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Gemini API key appended to every upstream call.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Upstream generateContent endpoint.
    #[arg(long, env = "GEMINI_API_URL", default_value = GEMINI_API_URL)]
    upstream_url: String,
}

impl Args {
    fn into_config(self) -> ApiConfig {
        ApiConfig {
            bind_addr: format!("{}:{}", self.host, self.port),
            gemini_api_key: self.api_key,
            gemini_api_url: self.upstream_url,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Args::parse().into_config();
    config.validate()?;

    if config.gemini_api_url != GEMINI_API_URL {
        warn!(upstream = %config.gemini_api_url, "using non-default upstream endpoint");
    }

    let state = gchat_api::AppState::from_config(config.clone())?;
    let app = gchat_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        version = gchat_core::version(),
        "Server running on port {}",
        local_addr.port()
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received, shutting down");
            }
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}

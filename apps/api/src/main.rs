mod auth;
mod config;
mod errors;
mod generation;
mod interview;
mod llm_client;
mod models;
mod outreach;
mod routes;
mod schema;
mod state;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::auth::{issue_token, DEFAULT_TOKEN_TTL_SECS};
use crate::config::{token_config_from_env, Config};
use crate::interview::registry::InterviewRegistry;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::PgPlanStore;

#[derive(Parser)]
#[command(name = "careercraft", about = "Career plan, outreach and mock interview API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve,
    /// Print a signed bearer token for a user id (needs TOKEN_SECRET only)
    IssueToken {
        /// User the token identifies
        user_id: Uuid,
        /// Lifetime in seconds
        #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_SECS)]
        ttl_secs: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::IssueToken { user_id, ttl_secs } => {
            let tokens = token_config_from_env()?;
            println!("{}", issue_token(&tokens, user_id, ttl_secs));
            Ok(())
        }
    }
}

async fn serve() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerCraft API v{}", env!("CARGO_PKG_VERSION"));

    let plans = PgPlanStore::connect(&config.database_url).await?;

    let backend = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_api_base.clone());
    info!(
        "Generative backend initialized (default model: {}, reasoning model: {})",
        llm_client::DEFAULT_MODEL,
        llm_client::REASONING_MODEL
    );

    let state = AppState {
        backend: Arc::new(backend),
        plans: Arc::new(plans),
        tokens: config.tokens.clone(),
        interviews: InterviewRegistry::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

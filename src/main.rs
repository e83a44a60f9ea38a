use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use postboard_api::auth::GoogleProvider;
use postboard_api::config::{AppConfig, SecurityConfig};
use postboard_api::database::models::{Comment, Post};
use postboard_api::database::{DatabaseManager, PgCommentRepo, PgPostRepo};
use postboard_api::routes;
use postboard_api::services::CrudService;
use postboard_api::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "postboard-api", version, about = "Posts and comments REST API")]
struct Args {
    /// Listen port, overrides POSTBOARD_PORT / PORT
    #[arg(long)]
    port: Option<u16>,

    /// Do not create missing tables at startup
    #[arg(long)]
    skip_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, CLIENT_ID, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("postboard_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting Postboard API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.ensure_schema && !args.skip_schema {
        DatabaseManager::ensure_schema(&pool).await?;
    }

    let state = AppState {
        posts: Arc::new(CrudService::<Post>::new(Arc::new(PgPostRepo::new(pool.clone())))),
        comments: Arc::new(CrudService::<Comment>::new(Arc::new(PgCommentRepo::new(pool.clone())))),
        identity: Arc::new(GoogleProvider::new(config.oauth.clone())),
        health: Arc::new(pool.clone()),
        oauth_state: config.oauth.auth_code_state.clone(),
    };

    let mut app = routes::app(state).layer(TraceLayer::new_for_http());
    if config.security.enable_cors {
        app = app.layer(cors_layer(&config.security));
    }

    let bind_addr = format!("{}:{}", config.server.bind_host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Postboard API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<_> = security
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

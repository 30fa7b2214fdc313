use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gym::api::{create_routes, AppState};
use gym::auth::{AuthService, JwtService, PasswordHasher};
use gym::config::{AppConfig, DatabaseConfig, DatabaseSeeder};
use gym::services::ExerciseCatalogClient;
use gym::storage::{MemoryStorage, PostgresStorage, Storage};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Gym membership and exercise API
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Insert a demo member after initializing the schema
    #[arg(long, env = "GYM_SEED")]
    seed: bool,

    /// Keep all data in process memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gym=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let storage: Arc<dyn Storage> = if cli.in_memory {
        warn!("running with in-memory storage; data is lost on exit");
        Arc::new(MemoryStorage::new())
    } else {
        let db_config = DatabaseConfig::from_env()?;
        let pool = db_config.create_pool().await?;
        info!(max_connections = db_config.max_connections, "connected to PostgreSQL");
        Arc::new(PostgresStorage::new(pool, db_config.query_timeout))
    };

    storage.init().await.context("failed to initialize schema")?;

    let hasher = PasswordHasher::new(config.bcrypt_cost);

    if cli.seed {
        info!("seeding the database");
        for member in DatabaseSeeder::new(storage.clone(), hasher).seed_all().await? {
            info!(number = member.number, "new member");
        }
    }

    let catalog = config
        .exercise_catalog_url
        .as_deref()
        .map(ExerciseCatalogClient::new)
        .transpose()?;

    let jwt_service = JwtService::new(config.jwt_secret.clone(), config.jwt_expires_in);
    let auth_service = AuthService::new(storage.clone(), jwt_service, hasher);
    let app = create_routes(AppState::new(storage, auth_service, hasher, catalog));

    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Gym API listening on http://{}", config.server_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::app::build_router;
use api::gql::build_schema;
use api::services::NotificationHub;
use api::{AppConfig, AppState};
use infra::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            let pool = infra::db::connect(database_url, config.database_max_connections).await?;
            tracing::info!(
                "Connected to Postgres with max {} connections",
                config.database_max_connections
            );

            // Run database migrations automatically on startup (can be disabled with SKIP_MIGRATIONS=true)
            if config.skip_migrations {
                tracing::info!("Skipping database migrations (SKIP_MIGRATIONS=true)");
            } else {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("../../migrations").run(&pool).await?;
                tracing::info!("Database migrations completed successfully");
            }

            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    if config.seed_demo_data {
        infra::seed::seed_demo_data(store.as_ref()).await?;
    }

    let hub = NotificationHub::new(config.hub_channel_capacity);
    let port = config.port;
    let state = AppState::new(store, hub, config);

    // Build GraphQL schema from the gql module
    let schema = build_schema(state.clone());

    let app = build_router(state, schema);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

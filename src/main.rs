//! Server: reads config from the environment, prepares the store, serves the API.

use pokereview::{app, apply_migrations, ensure_database_exists, AppConfig, AppState, StoreKind};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pokereview=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let state = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            apply_migrations(&pool).await?;
            AppState::postgres(pool)
        }
        StoreKind::Memory => {
            tracing::warn!("using the in-memory store; data is lost on exit");
            AppState::in_memory()
        }
    };

    let app = app(state, config.max_body_bytes);
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

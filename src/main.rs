//! Server entry point: config from env, database bootstrap, router, serve.

use registrar::{
    app_router, ensure_database_exists, AppState, Config, PgStore, STUDENT,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("registrar=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    let store = PgStore::new(pool);
    store.ensure_tables(&[&STUDENT]).await?;

    let state = AppState {
        store: Arc::new(store),
        entity: &STUDENT,
    };
    let app = app_router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

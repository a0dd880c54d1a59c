use std::sync::Arc;

use color_eyre::eyre::Result;
use sqlx::PgPool;
use tokio::sync::RwLock;

use project_tracker::{
    app_state::AppState,
    get_postgres_pool,
    services::data_stores::PostgresEntityStore,
    utils::{
        constants::{prod, DATABASE_URL},
        tracing::init_tracing,
    },
    Application,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pg_pool = configure_postgresql().await;
    let entity_store = Arc::new(RwLock::new(PostgresEntityStore::new(pg_pool)));
    let app_state = AppState::new(entity_store);

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .expect("Failed to build app");

    app.run().await?;

    Ok(())
}

async fn configure_postgresql() -> PgPool {
    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .expect("Failed to create Postgres connection pool!");

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

use std::sync::Arc;

use anyhow::Context;
use lead_dashboard::{
    app,
    database::{DatabaseManager, LeadRepository, MemoryLeadRepository, PgLeadRepository},
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = lead_dashboard::config::config().clone();
    tracing::info!("Starting lead dashboard in {:?} mode", config.environment);

    let mut manager = None;
    let leads: Arc<dyn LeadRepository> = if config.database.use_memory_store {
        tracing::warn!("LEADS_STORE=memory: serving an empty in-memory lead store");
        Arc::new(MemoryLeadRepository::default())
    } else {
        let db = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to the lead database")?;
        db.ensure_schema(&config.database.leads_table).await?;
        let repository = PgLeadRepository::new(&config.database.leads_table, db.pool().clone())?;
        manager = Some(db);
        Arc::new(repository)
    };

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let state = AppState::new(config, leads)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Lead dashboard listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = manager {
        db.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

//! Account Service - Main Application Entry Point
//!
//! A REST API server for creating bank accounts, moving money in and out of
//! them (withdraw/deposit) and deleting them.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, or an in-memory store when no
//!   database is configured
//! - **Format**: JSON requests/responses
//!
//! Requests flow handler → `AccountService` → `AccountRepository`.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool and run migrations (if configured)
//! 3. Build HTTP router
//! 4. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod repository;
mod routes;
mod services;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use repository::{
    AccountRepository, memory::InMemoryAccountRepository, postgres::PostgresAccountRepository,
};
use services::account_service::AccountService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let repository: Arc<dyn AccountRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.database_max_connections).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            Arc::new(PostgresAccountRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, accounts are kept in memory only");
            Arc::new(InMemoryAccountRepository::new())
        }
    };

    let app = routes::router(AccountService::new(repository));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

//! User Service Library
//!
//! User management over HTTP: entity rules from `domain`, a repository with
//! in-memory and SeaORM implementations, the domain and application
//! services, and the axum API. The binary in `main.rs` is a thin CLI over
//! the functions below.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::error::Error;
use std::sync::Arc;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::{StorageBackend, UserServiceConfig};
use crate::infra::Database;
use crate::repository::{InMemoryUserRepository, UserRepository, UserStore};
use crate::service::UserManager;
use domain::UserId;

/// Wire repository, services and state for the configured backend.
pub async fn build_state(config: &UserServiceConfig) -> Result<AppState, Box<dyn Error>> {
    let (repo, database): (Arc<dyn UserRepository>, Option<Arc<Database>>) = match config.storage
    {
        StorageBackend::Database => {
            let db = Database::connect(&config.database).await?;
            let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));
            (repo, Some(Arc::new(db)))
        }
        StorageBackend::Memory => {
            let repo = if config.seed_demo_users {
                InMemoryUserRepository::with_demo_users()?
            } else {
                InMemoryUserRepository::new()
            };
            let repo: Arc<dyn UserRepository> = Arc::new(repo);
            (repo, None)
        }
    };

    info!(backend = %config.storage, "User repository ready");

    let user_service = Arc::new(UserManager::new(repo));
    Ok(AppState::new(user_service, database))
}

/// Run the HTTP server until Ctrl-C or SIGTERM.
pub async fn run_server(config: UserServiceConfig) -> Result<(), Box<dyn Error>> {
    let state = build_state(&config).await?;
    let app = create_router(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    info!("User service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Permanently remove a user row from the database.
pub async fn purge_user(id: UserId) -> Result<(), Box<dyn Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect(&config.database).await?;

    UserStore::new(db.get_connection()).hard_delete(id).await?;
    println!("User {} permanently deleted", id);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, stopping server...");
}

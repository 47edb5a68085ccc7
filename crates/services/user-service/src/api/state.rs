//! Application state shared by all handlers.

use std::sync::Arc;

use crate::infra::Database;
use crate::service::UserService;

/// Application state (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User application service
    pub user_service: Arc<dyn UserService>,
    /// Database handle; `None` when users live in memory
    pub database: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserService>, database: Option<Arc<Database>>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}

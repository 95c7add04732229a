// Application state (AppState)

use crate::core::config::Config;
use crate::security::sessions::AdminSessions;
use crate::stores::VaultStore;
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// Persistence adapter for users and chat logs
    pub store: Arc<dyn VaultStore>,

    /// Live admin panel session tokens
    pub sessions: Arc<AdminSessions>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn VaultStore>) -> Self {
        let sessions = Arc::new(AdminSessions::new(config.admin.session_ttl_seconds));

        Self {
            store,
            sessions,
            config: Arc::new(config),
        }
    }
}

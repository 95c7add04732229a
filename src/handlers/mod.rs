pub mod admin;
pub mod auth;
pub mod chat;
pub mod health;
pub mod wallet;

#[cfg(test)]
pub(crate) fn test_state() -> std::sync::Arc<crate::core::state::AppState> {
    use crate::core::config::Config;
    use crate::core::state::AppState;
    use crate::stores::journal_store::JournalStore;
    use std::sync::Arc;

    let config: Config = toml::from_str(
        r#"
            [server]
            port = 3000

            [admin]
            master_username = "admin"
            master_password = "master-secret"
            panel_password = "panel-secret"
        "#,
    )
    .unwrap();

    Arc::new(AppState::new(config, Arc::new(JournalStore::in_memory())))
}

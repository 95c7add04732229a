pub mod journal;
pub mod journal_store;

use crate::models::chat::ChatMessage;
use crate::models::user::{User, WalletStatus};
use thiserror::Error;

/// Failures below the storage contract. Callers surface these as a generic
/// 500; the detail stays in the server log.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of a conditional user save.
#[derive(Debug, PartialEq, Eq)]
pub enum CasOutcome {
    /// The stored status matched and the record was replaced.
    Applied,
    /// No record for that username.
    Missing,
    /// The stored status differed from the expected one; nothing was written.
    StatusMismatch(WalletStatus),
}

/// Persistence contract for the portal.
///
/// Backends are swappable without touching any caller: the shipped
/// implementation is a journal-backed in-process store, but a remote
/// document store would implement the same surface. Every write must be
/// durable before the call returns `Ok`.
///
/// `compare_and_save` is the serialization point for wallet transitions:
/// the save applies only if the stored wallet status still matches what the
/// caller read, so two racing transitions on the same username cannot
/// silently clobber each other.
pub trait VaultStore: Send + Sync {
    fn get_user(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user. Returns `false` (and writes nothing) if the
    /// username is already taken.
    fn create_user(&self, user: User) -> Result<bool, StoreError>;

    fn save_user(&self, user: User) -> Result<(), StoreError>;

    fn compare_and_save(
        &self,
        expected: WalletStatus,
        user: User,
    ) -> Result<CasOutcome, StoreError>;

    fn list_users(&self) -> Result<Vec<User>, StoreError>;

    fn append_message(&self, username: &str, message: ChatMessage) -> Result<(), StoreError>;

    /// Full ordered log for one owner; empty if none, never an error.
    fn list_messages(&self, username: &str) -> Result<Vec<ChatMessage>, StoreError>;
}

use crate::models::chat::ChatMessage;
use crate::models::user::{User, WalletStatus};
use crate::stores::journal::{Journal, JournalOp};
use crate::stores::{CasOutcome, StoreError, VaultStore};
use anyhow::{Context, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::path::PathBuf;

/// Journal-backed implementation of [`VaultStore`].
///
/// All reads are served from DashMap tables; every mutation is appended to
/// the journal and flushed before the in-memory record changes, so a crash
/// never loses an acknowledged write. Mutations hold the per-key map entry
/// lock across the whole read-check-journal-write cycle, which is what makes
/// `create_user` and `compare_and_save` atomic per username.
pub struct JournalStore {
    users: DashMap<String, User>,
    messages: DashMap<String, Vec<ChatMessage>>,
    journal: Option<Journal>,
}

impl JournalStore {
    /// Open the journal at `path`, replaying it to rebuild state.
    pub fn open(path: PathBuf) -> Result<Self> {
        let journal = Journal::open(path).context("Failed to open store journal")?;
        let operations = journal.replay().context("Failed to replay store journal")?;

        let store = Self {
            users: DashMap::new(),
            messages: DashMap::new(),
            journal: Some(journal),
        };
        store.apply(&operations);

        tracing::info!(
            operations_replayed = operations.len(),
            users_loaded = store.users.len(),
            chat_logs_loaded = store.messages.len(),
            "Store journal replay completed"
        );

        Ok(store)
    }

    /// Volatile store with no journal; used by tests.
    pub fn in_memory() -> Self {
        Self {
            users: DashMap::new(),
            messages: DashMap::new(),
            journal: None,
        }
    }

    fn apply(&self, operations: &[JournalOp]) {
        for op in operations {
            match op {
                JournalOp::UserCreated { user } | JournalOp::UserSaved { user } => {
                    self.users.insert(user.username.clone(), user.clone());
                }
                JournalOp::MessageAppended { username, message } => {
                    self.messages
                        .entry(username.clone())
                        .or_default()
                        .push(message.clone());
                }
            }
        }
    }

    fn log(&self, op: JournalOp) -> Result<(), StoreError> {
        match &self.journal {
            Some(journal) => journal.append(&op),
            None => Ok(()),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.iter().map(|entry| entry.value().len()).sum()
    }
}

impl VaultStore for JournalStore {
    fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }

    fn create_user(&self, user: User) -> Result<bool, StoreError> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                self.log(JournalOp::UserCreated { user: user.clone() })?;
                slot.insert(user);
                Ok(true)
            }
        }
    }

    fn save_user(&self, user: User) -> Result<(), StoreError> {
        self.log(JournalOp::UserSaved { user: user.clone() })?;
        self.users.insert(user.username.clone(), user);
        Ok(())
    }

    fn compare_and_save(
        &self,
        expected: WalletStatus,
        user: User,
    ) -> Result<CasOutcome, StoreError> {
        match self.users.entry(user.username.clone()) {
            Entry::Vacant(_) => Ok(CasOutcome::Missing),
            Entry::Occupied(mut slot) => {
                let current = slot.get().wallet_status;
                if current != expected {
                    return Ok(CasOutcome::StatusMismatch(current));
                }
                self.log(JournalOp::UserSaved { user: user.clone() })?;
                slot.insert(user);
                Ok(CasOutcome::Applied)
            }
        }
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    fn append_message(&self, username: &str, message: ChatMessage) -> Result<(), StoreError> {
        let mut log = self.messages.entry(username.to_string()).or_default();
        self.log(JournalOp::MessageAppended {
            username: username.to_string(),
            message: message.clone(),
        })?;
        log.push(message);
        Ok(())
    }

    fn list_messages(&self, username: &str) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self
            .messages
            .get(username)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

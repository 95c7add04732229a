use crate::models::chat::ChatMessage;
use crate::models::user::User;
use crate::stores::StoreError;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// One durable record in the append-only journal, serialized as a single
/// JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum JournalOp {
    UserCreated { user: User },
    UserSaved { user: User },
    MessageAppended { username: String, message: ChatMessage },
}

/// Append-only journal backing the in-memory store.
///
/// Every mutation is appended and flushed before the store reports success;
/// on boot the whole file is replayed to rebuild state. The file handle sits
/// behind a mutex so appends are totally ordered.
pub struct Journal {
    file: Mutex<File>,
    path: PathBuf,
}

impl Journal {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Journal {
            file: Mutex::new(file),
            path,
        })
    }

    pub fn append(&self, op: &JournalOp) -> Result<(), StoreError> {
        let line = serde_json::to_string(op)?;
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{}", line)?;
        file.flush()?;
        Ok(())
    }

    /// Read back every operation in order. Lines that fail to parse are
    /// skipped with a warning rather than aborting the replay.
    pub fn replay(&self) -> Result<Vec<JournalOp>, StoreError> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<JournalOp>(line) {
                Ok(op) => operations.push(op),
                Err(e) => {
                    tracing::warn!(
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse journal line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Sender;
    use std::fs;
    use tempfile::TempDir;

    fn sample_user(name: &str) -> User {
        User::new(name.to_string(), "hash".to_string(), 10000.0, 1000.0)
    }

    #[test]
    fn test_journal_append_and_replay() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.journal");

        let journal = Journal::open(path).unwrap();

        journal
            .append(&JournalOp::UserCreated {
                user: sample_user("alice"),
            })
            .unwrap();
        journal
            .append(&JournalOp::MessageAppended {
                username: "alice".to_string(),
                message: ChatMessage::new(Sender::User, "hello".to_string()),
            })
            .unwrap();
        journal
            .append(&JournalOp::UserSaved {
                user: sample_user("alice"),
            })
            .unwrap();

        let ops = journal.replay().unwrap();
        assert_eq!(ops.len(), 3);

        match &ops[0] {
            JournalOp::UserCreated { user } => assert_eq!(user.username, "alice"),
            _ => panic!("Expected UserCreated"),
        }
        match &ops[1] {
            JournalOp::MessageAppended { username, message } => {
                assert_eq!(username, "alice");
                assert_eq!(message.text, "hello");
            }
            _ => panic!("Expected MessageAppended"),
        }
        match &ops[2] {
            JournalOp::UserSaved { user } => assert_eq!(user.username, "alice"),
            _ => panic!("Expected UserSaved"),
        }
    }

    #[test]
    fn test_journal_skips_corrupt_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.journal");

        let user_json = serde_json::to_string(&JournalOp::UserCreated {
            user: sample_user("bob"),
        })
        .unwrap();
        fs::write(&path, format!("not json at all\n{}\n{{\"op\":\"unknown\"}}\n", user_json))
            .unwrap();

        let journal = Journal::open(path).unwrap();
        let ops = journal.replay().unwrap();

        assert_eq!(ops.len(), 1);
        match &ops[0] {
            JournalOp::UserCreated { user } => assert_eq!(user.username, "bob"),
            _ => panic!("Expected UserCreated"),
        }
    }

    #[test]
    fn test_journal_replay_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.journal");

        let journal = Journal::open(path).unwrap();
        assert!(journal.replay().unwrap().is_empty());
    }
}

use crate::utils::time::clock_time;
use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Admin,
}

/// One entry in a user's support chat log.
///
/// Messages are append-only and belong to exactly one username (the store
/// keys the log by owner). The timestamp is a display string (hour:minute),
/// stamped when the message is accepted, not a sortable epoch value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: String) -> Self {
        Self {
            sender,
            text,
            timestamp: clock_time(),
        }
    }
}

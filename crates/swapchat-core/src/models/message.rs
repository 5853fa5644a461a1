use serde::{Deserialize, Serialize};

/// Which side of the conversation authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    /// Authored by the local user through the send path.
    Local,
    /// Delivered by a counterpart (or the inbound simulator standing in for one).
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    /// Unix seconds. Display only - insertion order is the ordering authority,
    /// two messages may share a timestamp.
    pub created_at: u64,
    pub origin: MessageOrigin,
    pub conversation_id: String,
}

impl Message {
    pub fn is_own(&self) -> bool {
        self.origin == MessageOrigin::Local
    }
}

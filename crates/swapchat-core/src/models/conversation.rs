use serde::{Deserialize, Serialize};

use super::message::Message;

/// Where a swap negotiation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    Active,
    Interested,
    Proposal,
    SwapAgreed,
    Completed,
}

impl SwapStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SwapStatus::Active => "Active",
            SwapStatus::Interested => "Interested",
            SwapStatus::Proposal => "Proposal",
            SwapStatus::SwapAgreed => "Swap Agreed",
            SwapStatus::Completed => "Completed",
        }
    }
}

/// One thread of messages between participants, scoped to a single item discussion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    /// Two participants in every observed conversation, but nothing here
    /// depends on that.
    pub participants: Vec<String>,
    /// Cache of the newest message; always equals the tail of the
    /// conversation's history when non-empty.
    pub last_message: Option<Message>,
    /// External messages not yet acknowledged via mark_read.
    pub unread_count: u32,
    pub item_id: String,
    pub item_title: String,
    pub status: SwapStatus,
}

impl Conversation {
    /// First participant that is not the given user.
    pub fn counterpart(&self, user_id: &str) -> Option<&str> {
        self.participants
            .iter()
            .map(String::as_str)
            .find(|p| *p != user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counterpart_skips_the_local_user() {
        let conversation = Conversation {
            id: "conv-1".to_string(),
            participants: vec!["user-1".to_string(), "user-2".to_string()],
            last_message: None,
            unread_count: 0,
            item_id: "item-1".to_string(),
            item_title: "Vintage Denim Jacket".to_string(),
            status: SwapStatus::Active,
        };

        assert_eq!(conversation.counterpart("user-1"), Some("user-2"));
        assert_eq!(conversation.counterpart("user-2"), Some("user-1"));
        assert_eq!(conversation.counterpart("user-9"), Some("user-1"));
    }

    #[test]
    fn status_labels_match_ui_copy() {
        assert_eq!(SwapStatus::SwapAgreed.label(), "Swap Agreed");
        assert_eq!(SwapStatus::Active.label(), "Active");
    }
}

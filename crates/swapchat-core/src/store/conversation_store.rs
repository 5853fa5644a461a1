use std::collections::HashMap;

use crate::config::ServiceConfig;
use crate::error::StoreError;
use crate::models::{Conversation, Message, MessageOrigin, SwapStatus};

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Payload handed to `receive_external` by the simulator (or, in a real
/// deployment, a transport adapter). The store mints the message id so that
/// ids stay unique and creation-ordered regardless of origin.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub created_at: u64,
}

/// Authoritative mapping of conversation id -> summary and id -> ordered
/// history. Sole mutator of conversation and message state; locking and
/// notification fan-out live in [`crate::service::MessagingService`].
pub struct ConversationStore {
    conversations: HashMap<String, Conversation>,
    messages: HashMap<String, Vec<Message>>,
    /// Participant id -> display name, used to label inbound senders.
    profiles: HashMap<String, String>,
    local_user_id: String,
    local_user_name: String,
    next_conversation_seq: u64,
    next_message_seq: u64,
}

impl ConversationStore {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            conversations: HashMap::new(),
            messages: HashMap::new(),
            profiles: HashMap::new(),
            local_user_id: config.local_user_id.clone(),
            local_user_name: config.local_user_name.clone(),
            next_conversation_seq: 1,
            next_message_seq: 1,
        }
    }

    pub fn local_user_id(&self) -> &str {
        &self.local_user_id
    }

    pub fn local_user_name(&self) -> &str {
        &self.local_user_name
    }

    // ===== Getters =====

    /// Snapshot of every conversation. Iteration order is not meaningful;
    /// callers sort for display.
    pub fn conversations(&self) -> Vec<Conversation> {
        self.conversations.values().cloned().collect()
    }

    pub fn conversation(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.get(conversation_id)
    }

    /// Full history for a conversation in insertion order. Unknown ids yield
    /// an empty slice rather than an error: the thread view probes ids freely
    /// and treats missing history the same as empty history.
    pub fn messages(&self, conversation_id: &str) -> &[Message] {
        self.messages
            .get(conversation_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn profile_name(&self, user_id: &str) -> Option<&str> {
        self.profiles.get(user_id).map(String::as_str)
    }

    // ===== Mutations =====

    pub fn set_profile(&mut self, user_id: &str, display_name: &str) {
        self.profiles
            .insert(user_id.to_string(), display_name.to_string());
    }

    /// Append a message authored by the local user. Leaves the unread counter
    /// untouched.
    pub fn send(&mut self, conversation_id: &str, content: &str) -> Result<Message, StoreError> {
        self.ensure_known(conversation_id)?;
        let message = Message {
            id: self.next_message_id(),
            sender_id: self.local_user_id.clone(),
            sender_name: self.local_user_name.clone(),
            content: content.to_string(),
            created_at: unix_now(),
            origin: MessageOrigin::Local,
            conversation_id: conversation_id.to_string(),
        };
        self.append(message.clone());
        Ok(message)
    }

    /// Append a message from a counterpart and bump the unread counter.
    pub fn receive_external(
        &mut self,
        conversation_id: &str,
        inbound: InboundMessage,
    ) -> Result<Message, StoreError> {
        self.ensure_known(conversation_id)?;
        let message = Message {
            id: self.next_message_id(),
            sender_id: inbound.sender_id,
            sender_name: inbound.sender_name,
            content: inbound.content,
            created_at: inbound.created_at,
            origin: MessageOrigin::External,
            conversation_id: conversation_id.to_string(),
        };
        self.append(message.clone());
        Ok(message)
    }

    /// Reset the unread counter. No-op when already zero.
    pub fn mark_read(&mut self, conversation_id: &str) -> Result<(), StoreError> {
        let conversation = self
            .conversations
            .get_mut(conversation_id)
            .ok_or_else(|| StoreError::ConversationNotFound(conversation_id.to_string()))?;
        conversation.unread_count = 0;
        Ok(())
    }

    /// Open a new conversation about an item. Status starts at Active with an
    /// empty history.
    pub fn create_conversation(
        &mut self,
        participant_id: &str,
        item_id: &str,
        item_title: &str,
    ) -> String {
        let conversation_id = self.next_conversation_id();
        let conversation = Conversation {
            id: conversation_id.clone(),
            participants: vec![self.local_user_id.clone(), participant_id.to_string()],
            last_message: None,
            unread_count: 0,
            item_id: item_id.to_string(),
            item_title: item_title.to_string(),
            status: SwapStatus::Active,
        };
        self.conversations
            .insert(conversation_id.clone(), conversation);
        self.messages.insert(conversation_id.clone(), Vec::new());
        conversation_id
    }

    /// Bootstrap entry point: install seeded conversations and histories
    /// wholesale. Seeded unread counts are taken as given, not derived from
    /// the seeded history. Only the last-message caches are recomputed.
    pub(crate) fn load(&mut self, conversations: Vec<Conversation>, messages: Vec<Message>) {
        for conversation in conversations {
            self.messages.entry(conversation.id.clone()).or_default();
            self.conversations
                .insert(conversation.id.clone(), conversation);
        }
        for message in messages {
            self.messages
                .entry(message.conversation_id.clone())
                .or_default()
                .push(message);
        }
        for (conversation_id, conversation) in &mut self.conversations {
            conversation.last_message = self
                .messages
                .get(conversation_id)
                .and_then(|history| history.last().cloned());
        }
        self.next_conversation_seq = self.conversations.len() as u64 + 1;
        self.next_message_seq = self.messages.values().map(Vec::len).sum::<usize>() as u64 + 1;
    }

    // ===== Internals =====

    fn ensure_known(&self, conversation_id: &str) -> Result<(), StoreError> {
        if self.conversations.contains_key(conversation_id) {
            Ok(())
        } else {
            Err(StoreError::ConversationNotFound(
                conversation_id.to_string(),
            ))
        }
    }

    fn next_message_id(&mut self) -> String {
        let id = format!("msg-{}", self.next_message_seq);
        self.next_message_seq += 1;
        id
    }

    fn next_conversation_id(&mut self) -> String {
        let id = format!("conv-{}", self.next_conversation_seq);
        self.next_conversation_seq += 1;
        id
    }

    /// Single insertion routine shared by the send and receive paths: append
    /// to history, refresh the last-message cache, and bump unread for
    /// external messages, all before the caller's lock is released.
    fn append(&mut self, message: Message) {
        let conversation = self
            .conversations
            .get_mut(&message.conversation_id)
            .expect("append targets a conversation verified by the caller");
        if message.origin == MessageOrigin::External {
            conversation.unread_count += 1;
        }
        conversation.last_message = Some(message.clone());
        self.messages
            .entry(message.conversation_id.clone())
            .or_default()
            .push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConversationStore {
        ConversationStore::new(&ServiceConfig::default())
    }

    fn inbound(content: &str) -> InboundMessage {
        InboundMessage {
            sender_id: "user-2".to_string(),
            sender_name: "Emma L.".to_string(),
            content: content.to_string(),
            created_at: unix_now(),
        }
    }

    #[test]
    fn create_then_send_hello() {
        let mut store = store();
        let id = store.create_conversation("user-9", "item-42", "Leather Boots");

        let conversation = store.conversation(&id).unwrap();
        assert_eq!(conversation.status, SwapStatus::Active);
        assert_eq!(conversation.unread_count, 0);
        assert!(conversation.last_message.is_none());
        assert_eq!(
            conversation.participants,
            vec!["user-1".to_string(), "user-9".to_string()]
        );

        store.send(&id, "Hello").unwrap();
        let history = store.messages(&id);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "Hello");
        assert_eq!(history[0].origin, MessageOrigin::Local);
        assert_eq!(store.conversation(&id).unwrap().unread_count, 0);
    }

    #[test]
    fn history_keeps_insertion_order_and_last_message_cache() {
        let mut store = store();
        let id = store.create_conversation("user-2", "item-1", "Vintage Denim Jacket");

        store.send(&id, "first").unwrap();
        store.receive_external(&id, inbound("second")).unwrap();
        store.send(&id, "third").unwrap();

        let contents: Vec<&str> = store
            .messages(&id)
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);

        let last = store.conversation(&id).unwrap().last_message.clone().unwrap();
        assert_eq!(last, store.messages(&id).last().cloned().unwrap());
    }

    #[test]
    fn message_ids_are_creation_ordered() {
        let mut store = store();
        let id = store.create_conversation("user-2", "item-1", "Vintage Denim Jacket");
        let a = store.send(&id, "a").unwrap();
        let b = store.receive_external(&id, inbound("b")).unwrap();
        assert_eq!(a.id, "msg-1");
        assert_eq!(b.id, "msg-2");
    }

    #[test]
    fn unread_counts_only_external_messages() {
        let mut store = store();
        let id = store.create_conversation("user-2", "item-1", "Vintage Denim Jacket");

        store.send(&id, "own").unwrap();
        assert_eq!(store.conversation(&id).unwrap().unread_count, 0);

        for _ in 0..3 {
            store.receive_external(&id, inbound("hi")).unwrap();
        }
        assert_eq!(store.conversation(&id).unwrap().unread_count, 3);

        store.mark_read(&id).unwrap();
        assert_eq!(store.conversation(&id).unwrap().unread_count, 0);

        store.receive_external(&id, inbound("again")).unwrap();
        assert_eq!(store.conversation(&id).unwrap().unread_count, 1);
    }

    #[test]
    fn mark_read_leaves_history_alone() {
        let mut store = store();
        let conversation = Conversation {
            id: "conv-1".to_string(),
            participants: vec!["user-1".to_string(), "user-2".to_string()],
            last_message: None,
            unread_count: 1,
            item_id: "item-1".to_string(),
            item_title: "Vintage Denim Jacket".to_string(),
            status: SwapStatus::SwapAgreed,
        };
        store.load(vec![conversation], Vec::new());

        store.mark_read("conv-1").unwrap();
        assert_eq!(store.conversation("conv-1").unwrap().unread_count, 0);
        assert!(store.messages("conv-1").is_empty());

        // Already zero: still fine.
        store.mark_read("conv-1").unwrap();
        assert_eq!(store.conversation("conv-1").unwrap().unread_count, 0);
    }

    #[test]
    fn unknown_conversation_fails_mutations_but_not_reads() {
        let mut store = store();

        assert_eq!(
            store.send("nope", "hi"),
            Err(StoreError::ConversationNotFound("nope".to_string()))
        );
        assert_eq!(
            store.receive_external("nope", inbound("hi")),
            Err(StoreError::ConversationNotFound("nope".to_string()))
        );
        assert_eq!(
            store.mark_read("nope"),
            Err(StoreError::ConversationNotFound("nope".to_string()))
        );

        // Reads stay silent for unknown ids.
        assert!(store.messages("nope").is_empty());
    }

    #[test]
    fn load_recomputes_last_message_and_advances_id_sequences() {
        let mut store = store();
        let conversation = Conversation {
            id: "conv-1".to_string(),
            participants: vec!["user-1".to_string(), "user-2".to_string()],
            last_message: None,
            unread_count: 1,
            item_id: "item-1".to_string(),
            item_title: "Vintage Denim Jacket".to_string(),
            status: SwapStatus::SwapAgreed,
        };
        let seeded = Message {
            id: "msg-1".to_string(),
            sender_id: "user-2".to_string(),
            sender_name: "Emma L.".to_string(),
            content: "hello".to_string(),
            created_at: unix_now() - 60,
            origin: MessageOrigin::External,
            conversation_id: "conv-1".to_string(),
        };
        store.load(vec![conversation], vec![seeded.clone()]);

        assert_eq!(
            store.conversation("conv-1").unwrap().last_message,
            Some(seeded)
        );
        // Seeded unread is taken as given.
        assert_eq!(store.conversation("conv-1").unwrap().unread_count, 1);

        let next = store.send("conv-1", "reply").unwrap();
        assert_eq!(next.id, "msg-2");
        assert_eq!(store.create_conversation("user-3", "i", "t"), "conv-2");
    }
}

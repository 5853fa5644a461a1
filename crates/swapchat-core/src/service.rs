use parking_lot::Mutex;

use crate::config::ServiceConfig;
use crate::error::StoreError;
use crate::fixtures;
use crate::hub::{NotificationHub, Subscription};
use crate::models::{Conversation, Message};
use crate::store::{ConversationStore, InboundMessage};

/// Process-wide messaging state: the conversation store behind a mutex, plus
/// the notification hub. Constructed once at startup and passed explicitly to
/// whoever needs it (the TUI, the simulator, tests), never a hidden global.
///
/// Every mutating operation publishes to the hub before releasing the store
/// lock, so notification order per conversation always matches insertion
/// order.
pub struct MessagingService {
    store: Mutex<ConversationStore>,
    hub: NotificationHub,
    config: ServiceConfig,
}

impl MessagingService {
    /// Empty service, no conversations. What tests and a real deployment use.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            store: Mutex::new(ConversationStore::new(&config)),
            hub: NotificationHub::new(),
            config,
        }
    }

    /// Service pre-seeded with the demo marketplace fixtures.
    pub fn with_fixtures(config: ServiceConfig) -> Self {
        let service = Self::new(config);
        fixtures::load_demo_data(&mut service.store.lock());
        service
    }

    pub fn local_user_id(&self) -> String {
        self.config.local_user_id.clone()
    }

    // ===== Reads =====

    pub fn conversations(&self) -> Vec<Conversation> {
        self.store.lock().conversations()
    }

    pub fn conversation(&self, conversation_id: &str) -> Option<Conversation> {
        self.store.lock().conversation(conversation_id).cloned()
    }

    /// History in insertion order; empty (never an error) for unknown ids.
    pub fn messages(&self, conversation_id: &str) -> Vec<Message> {
        self.store.lock().messages(conversation_id).to_vec()
    }

    pub fn profile_name(&self, user_id: &str) -> Option<String> {
        self.store
            .lock()
            .profile_name(user_id)
            .map(str::to_string)
    }

    // ===== Writes =====

    pub fn send(&self, conversation_id: &str, content: &str) -> Result<Message, StoreError> {
        let mut store = self.store.lock();
        let message = store.send(conversation_id, content)?;
        tracing::debug!(conversation_id, message_id = %message.id, "sent message");
        self.hub.publish(conversation_id, &message);
        Ok(message)
    }

    /// Injection path for inbound traffic. Same insertion and notify behavior
    /// as [`send`](Self::send), plus the unread counter bump.
    pub fn receive_external(
        &self,
        conversation_id: &str,
        inbound: InboundMessage,
    ) -> Result<Message, StoreError> {
        let mut store = self.store.lock();
        let message = store.receive_external(conversation_id, inbound)?;
        tracing::debug!(conversation_id, message_id = %message.id, "received external message");
        self.hub.publish(conversation_id, &message);
        Ok(message)
    }

    pub fn mark_read(&self, conversation_id: &str) -> Result<(), StoreError> {
        self.store.lock().mark_read(conversation_id)
    }

    pub fn create_conversation(
        &self,
        participant_id: &str,
        item_id: &str,
        item_title: &str,
    ) -> String {
        self.store
            .lock()
            .create_conversation(participant_id, item_id, item_title)
    }

    // ===== Notifications =====

    /// See [`NotificationHub::subscribe`]: callbacks run on the inserting
    /// thread while the store lock is held, so forward to a channel rather
    /// than calling back into this service.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str, &Message) + Send + Sync + 'static,
    {
        self.hub.subscribe(callback)
    }
}

pub mod conversation_store;

pub use conversation_store::{unix_now, ConversationStore, InboundMessage};

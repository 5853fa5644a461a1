pub mod conversation;
pub mod message;

pub use conversation::{Conversation, SwapStatus};
pub use message::{Message, MessageOrigin};

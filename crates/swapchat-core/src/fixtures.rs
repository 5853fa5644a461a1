//! Demo bootstrap data: three conversations about marketplace items and a
//! short history on the first one. Static configuration for development and
//! demos; a production deployment replaces this with a real data source.

use crate::models::{Conversation, Message, MessageOrigin, SwapStatus};
use crate::store::{unix_now, ConversationStore};

const MINUTE: u64 = 60;
const HOUR: u64 = 3600;

pub(crate) fn load_demo_data(store: &mut ConversationStore) {
    store.set_profile("user-2", "Emma L.");
    store.set_profile("user-3", "Sofia M.");
    store.set_profile("user-4", "Maya K.");

    let local_user = store.local_user_id().to_string();
    let local_name = store.local_user_name().to_string();
    store.load(
        demo_conversations(&local_user),
        demo_messages(&local_user, &local_name),
    );
}

fn conversation(
    id: &str,
    local_user: &str,
    counterpart: &str,
    unread_count: u32,
    item_id: &str,
    item_title: &str,
    status: SwapStatus,
) -> Conversation {
    Conversation {
        id: id.to_string(),
        participants: vec![local_user.to_string(), counterpart.to_string()],
        last_message: None,
        unread_count,
        item_id: item_id.to_string(),
        item_title: item_title.to_string(),
        status,
    }
}

fn demo_conversations(local_user: &str) -> Vec<Conversation> {
    vec![
        conversation(
            "conv-1",
            local_user,
            "user-2",
            1,
            "item-1",
            "Vintage Denim Jacket",
            SwapStatus::SwapAgreed,
        ),
        conversation(
            "conv-2",
            local_user,
            "user-3",
            0,
            "item-2",
            "Designer Sneakers",
            SwapStatus::Interested,
        ),
        conversation(
            "conv-3",
            local_user,
            "user-4",
            0,
            "item-3",
            "Silk Blouse",
            SwapStatus::Completed,
        ),
    ]
}

/// The seeded negotiation on conv-1, alternating between Emma and the local
/// user, timestamped from two hours to two minutes ago.
fn demo_messages(local_user: &str, local_name: &str) -> Vec<Message> {
    let now = unix_now();
    let emma = |seq: u64, content: &str, age: u64| Message {
        id: format!("msg-{seq}"),
        sender_id: "user-2".to_string(),
        sender_name: "Emma L.".to_string(),
        content: content.to_string(),
        created_at: now - age,
        origin: MessageOrigin::External,
        conversation_id: "conv-1".to_string(),
    };
    let own = |seq: u64, content: &str, age: u64| Message {
        id: format!("msg-{seq}"),
        sender_id: local_user.to_string(),
        sender_name: local_name.to_string(),
        content: content.to_string(),
        created_at: now - age,
        origin: MessageOrigin::Local,
        conversation_id: "conv-1".to_string(),
    };

    vec![
        emma(
            1,
            "Hi! I'm really interested in your vintage denim jacket. Would you be open to a direct swap?",
            2 * HOUR,
        ),
        own(
            2,
            "Hi Emma! Yes, I'd definitely be interested. What item were you thinking of swapping?",
            HOUR,
        ),
        emma(
            3,
            "I have a wool winter coat from Zara that's in excellent condition. Here are some photos:",
            45 * MINUTE,
        ),
        own(
            4,
            "That coat looks perfect! I love the color. It seems like a fair swap to me.",
            30 * MINUTE,
        ),
        emma(
            5,
            "Wonderful! I'm so excited. The jacket is exactly what I've been looking for.",
            15 * MINUTE,
        ),
        emma(
            6,
            "Sounds great! When would you like to meet for the exchange?",
            2 * MINUTE,
        ),
    ]
}

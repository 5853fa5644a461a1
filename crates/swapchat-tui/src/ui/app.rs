use std::sync::Arc;

use swapchat_core::models::{Conversation, Message};
use swapchat_core::MessagingService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
    Searching,
}

/// All UI state. Reads and writes go through the injected
/// [`MessagingService`]; nothing here owns message data.
pub struct App {
    pub service: Arc<MessagingService>,
    pub running: bool,
    pub input_mode: InputMode,
    /// Snapshot of conversations, newest activity first.
    pub conversations: Vec<Conversation>,
    /// History of the selected conversation, insertion order.
    pub messages: Vec<Message>,
    /// Index into the visible (search-filtered) conversation list.
    pub selected: usize,
    pub selected_conversation_id: Option<String>,
    /// Message draft being typed.
    pub input: String,
    /// Case-insensitive filter over item titles.
    pub search_query: String,
    /// Lines scrolled up from the bottom of the chat; 0 = pinned to bottom.
    pub scroll_from_bottom: usize,
    /// Transient error/status line.
    pub status: Option<String>,
}

impl App {
    pub fn new(service: Arc<MessagingService>) -> Self {
        let mut app = Self {
            service,
            running: true,
            input_mode: InputMode::Normal,
            conversations: Vec::new(),
            messages: Vec::new(),
            selected: 0,
            selected_conversation_id: None,
            input: String::new(),
            search_query: String::new(),
            scroll_from_bottom: 0,
            status: None,
        };
        app.refresh_conversations();
        app.apply_selection();
        app
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    // ===== Conversation list =====

    /// Re-fetch the conversation snapshot, newest activity first, and keep
    /// the selection pointed at the same conversation.
    pub fn refresh_conversations(&mut self) {
        self.conversations = self.service.conversations();
        self.conversations.sort_by(|a, b| {
            let a_activity = a.last_message.as_ref().map(|m| m.created_at).unwrap_or(0);
            let b_activity = b.last_message.as_ref().map(|m| m.created_at).unwrap_or(0);
            b_activity.cmp(&a_activity).then_with(|| a.id.cmp(&b.id))
        });
        self.sync_selected_index();
    }

    /// Conversations passing the current search filter.
    pub fn visible_conversations(&self) -> Vec<&Conversation> {
        let query = self.search_query.to_lowercase();
        self.conversations
            .iter()
            .filter(|c| query.is_empty() || c.item_title.to_lowercase().contains(&query))
            .collect()
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        let id = self.selected_conversation_id.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn select_next(&mut self) {
        let len = self.visible_conversations().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
        self.apply_selection();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.apply_selection();
    }

    /// Load the highlighted conversation: fetch its history, acknowledge its
    /// unread messages, and pin the view to the bottom. While a search filter
    /// is being typed the selection only previews; unread stays untouched
    /// until the user confirms with Enter.
    pub fn apply_selection(&mut self) {
        self.clamp_selection();
        let Some(conversation_id) = self
            .visible_conversations()
            .get(self.selected)
            .map(|c| c.id.clone())
        else {
            self.selected_conversation_id = None;
            self.messages.clear();
            return;
        };

        self.selected_conversation_id = Some(conversation_id.clone());
        self.messages = self.service.messages(&conversation_id);
        if self.input_mode != InputMode::Searching {
            if let Err(err) = self.service.mark_read(&conversation_id) {
                tracing::warn!(%conversation_id, %err, "failed to mark conversation read");
                self.set_status(err.to_string());
            }
        }
        self.refresh_conversations();
        self.scroll_from_bottom = 0;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_conversations().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Keep `selected` pointed at `selected_conversation_id` after the list
    /// reorders underneath it.
    fn sync_selected_index(&mut self) {
        if let Some(id) = self.selected_conversation_id.clone() {
            if let Some(index) = self
                .visible_conversations()
                .iter()
                .position(|c| c.id == id)
            {
                self.selected = index;
                return;
            }
        }
        self.clamp_selection();
    }

    // ===== Chat =====

    pub fn send_current_input(&mut self) {
        let content = self.input.trim().to_string();
        if content.is_empty() {
            return;
        }
        let Some(conversation_id) = self.selected_conversation_id.clone() else {
            return;
        };

        match self.service.send(&conversation_id, &content) {
            Ok(_) => {
                self.input.clear();
                self.status = None;
                // The echo arrives through the notification channel.
            }
            Err(err) => {
                tracing::warn!(%conversation_id, %err, "send failed");
                self.set_status(err.to_string());
            }
        }
    }

    /// A message was inserted somewhere (own echo or inbound). Refresh the
    /// list; append to the open thread when it is the one that grew.
    pub fn on_message(&mut self, conversation_id: &str, message: Message) {
        if self.selected_conversation_id.as_deref() == Some(conversation_id) {
            self.messages.push(message);
            self.scroll_from_bottom = 0;
        }
        self.refresh_conversations();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        // Clamped against the rendered height at draw time.
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    // ===== Search =====

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected = 0;
        self.apply_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.apply_selection();
    }

    /// Keep the filter and commit to the highlighted conversation, which also
    /// acknowledges its unread messages.
    pub fn confirm_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.apply_selection();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.input_mode = InputMode::Normal;
        self.apply_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapchat_core::store::{unix_now, InboundMessage};
    use swapchat_core::ServiceConfig;

    fn app() -> App {
        App::new(Arc::new(MessagingService::with_fixtures(
            ServiceConfig::default(),
        )))
    }

    #[test]
    fn startup_selects_the_most_recent_conversation_and_marks_it_read() {
        let app = app();
        // conv-1 holds the only seeded history, so it sorts first.
        assert_eq!(app.selected_conversation_id.as_deref(), Some("conv-1"));
        assert_eq!(app.messages.len(), 6);
        assert_eq!(app.selected_conversation().unwrap().unread_count, 0);
    }

    #[test]
    fn search_filters_by_item_title() {
        let mut app = app();
        app.start_search();
        for c in "sneak".chars() {
            app.push_search_char(c);
        }

        let visible = app.visible_conversations();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].item_title, "Designer Sneakers");
        // Selection follows the filtered list.
        assert_eq!(app.selected_conversation_id.as_deref(), Some("conv-2"));

        app.clear_search();
        assert_eq!(app.visible_conversations().len(), 3);
    }

    #[test]
    fn typing_a_search_filter_does_not_clear_unread_badges() {
        let mut app = app();
        app.service
            .receive_external(
                "conv-2",
                InboundMessage {
                    sender_id: "user-3".to_string(),
                    sender_name: "Sofia M.".to_string(),
                    content: "Still interested?".to_string(),
                    created_at: unix_now(),
                },
            )
            .unwrap();
        app.refresh_conversations();

        app.start_search();
        for c in "sneak".chars() {
            app.push_search_char(c);
        }

        // The filter previews conv-2 without acknowledging its unread.
        assert_eq!(app.selected_conversation_id.as_deref(), Some("conv-2"));
        assert_eq!(app.selected_conversation().unwrap().unread_count, 1);

        app.confirm_search();
        assert_eq!(app.selected_conversation().unwrap().unread_count, 0);
    }

    #[test]
    fn sending_drains_the_draft_into_the_store() {
        let mut app = app();
        app.input = "  See you at noon  ".to_string();
        app.send_current_input();

        assert!(app.input.is_empty());
        let history = app.service.messages("conv-1");
        assert_eq!(history.last().unwrap().content, "See you at noon");
        assert!(history.last().unwrap().is_own());
    }

    #[test]
    fn empty_drafts_are_not_sent() {
        let mut app = app();
        app.input = "   ".to_string();
        app.send_current_input();
        assert_eq!(app.service.messages("conv-1").len(), 6);
    }

    #[test]
    fn incoming_message_appends_to_the_open_thread() {
        let mut app = app();
        let message = app.service.send("conv-1", "echo me").unwrap();

        app.scroll_from_bottom = 12;
        app.on_message("conv-1", message.clone());
        assert_eq!(app.messages.last(), Some(&message));
        assert_eq!(app.scroll_from_bottom, 0);
    }

    #[test]
    fn incoming_message_elsewhere_only_refreshes_the_list() {
        let mut app = app();
        let before = app.messages.len();
        let message = app.service.send("conv-2", "other thread").unwrap();

        app.on_message("conv-2", message);
        assert_eq!(app.messages.len(), before);
        // conv-2 now has the newest activity and sorts first, but the
        // selection stays on conv-1.
        assert_eq!(app.selected_conversation_id.as_deref(), Some("conv-1"));
        assert_eq!(app.visible_conversations()[0].id, "conv-2");
        assert_eq!(app.selected, 1);
    }
}

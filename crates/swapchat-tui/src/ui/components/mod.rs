pub mod chat_view;
pub mod conversation_list;
pub mod statusbar;

// Centralized theme - all colors and styles live here.

use ratatui::style::{Color, Modifier, Style};
use swapchat_core::models::SwapStatus;

/// App background.
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Selected conversation row.
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Sidebar background - very dark, almost black.
pub const BG_SIDEBAR: Color = Color::Rgb(12, 12, 12);

/// Primary text - off-white for readability.
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

/// Secondary/muted text.
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Dimmed text for hints and placeholders.
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

/// Muted blue - interactive elements, focus.
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);

/// Muted green.
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);

/// Muted amber/orange.
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);

/// Muted red.
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// Muted yellow.
pub const ACCENT_PENDING: Color = Color::Rgb(180, 180, 120);

pub const BORDER_ACTIVE: Color = Color::Rgb(100, 100, 100);
pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

pub fn text_primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn text_dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(BORDER_ACTIVE)
}

pub fn border_inactive() -> Style {
    Style::default().fg(BORDER_INACTIVE)
}

pub fn status_error() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

/// Item-initial avatar block in the conversation list.
pub fn avatar() -> Style {
    Style::default()
        .fg(BG_APP)
        .bg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Unread badge next to a conversation title.
pub fn unread_badge() -> Style {
    Style::default()
        .fg(BG_APP)
        .bg(ACCENT_WARNING)
        .add_modifier(Modifier::BOLD)
}

/// Color-coded swap status badge, mirroring the negotiation stages.
pub fn status_style(status: SwapStatus) -> Style {
    let color = match status {
        SwapStatus::SwapAgreed => ACCENT_WARNING,
        SwapStatus::Interested => ACCENT_PRIMARY,
        SwapStatus::Proposal => ACCENT_PENDING,
        SwapStatus::Completed => TEXT_MUTED,
        SwapStatus::Active => ACCENT_SUCCESS,
    };
    Style::default().fg(color)
}

/// Style for the body of a chat bubble.
pub fn message_style(is_own: bool) -> Style {
    if is_own {
        Style::default().fg(ACCENT_WARNING)
    } else {
        text_primary()
    }
}

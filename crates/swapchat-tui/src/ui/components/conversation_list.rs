use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use swapchat_core::models::Conversation;

use crate::ui::format::{format_relative_time, truncate_with_ellipsis};
use crate::ui::{theme, App, InputMode};

/// Left column: search header plus the filtered conversation list, one
/// two-line entry per conversation.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let sections = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);
    render_search(f, app, sections[0]);

    let visible = app.visible_conversations();
    let width = (sections[1].width as usize).saturating_sub(4);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|conversation| ListItem::new(entry_text(conversation, width)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Messages ")
                .borders(Borders::ALL)
                .border_style(theme::border_inactive()),
        )
        .style(Style::default().bg(theme::BG_SIDEBAR))
        .highlight_style(Style::default().bg(theme::BG_SELECTED));

    let mut state = ListState::default().with_selected(if visible.is_empty() {
        None
    } else {
        Some(app.selected)
    });
    f.render_stateful_widget(list, sections[1], &mut state);
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let searching = app.input_mode == InputMode::Searching;
    let content = if app.search_query.is_empty() && !searching {
        Span::styled("Search conversations...", theme::text_dim())
    } else {
        Span::styled(app.search_query.clone(), theme::text_primary())
    };
    let border = if searching {
        theme::border_active()
    } else {
        theme::border_inactive()
    };

    let search = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title(" / ")
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(search, area);
}

fn entry_text(conversation: &Conversation, width: usize) -> Text<'static> {
    let initial = conversation
        .item_title
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());

    let title_style = if conversation.unread_count > 0 {
        theme::text_primary().add_modifier(Modifier::BOLD)
    } else {
        theme::text_primary()
    };

    let mut header = vec![
        Span::styled(format!(" {initial} "), theme::avatar()),
        Span::raw(" "),
        Span::styled(
            truncate_with_ellipsis(&conversation.item_title, width.saturating_sub(14)),
            title_style,
        ),
    ];
    if conversation.unread_count > 0 {
        header.push(Span::raw(" "));
        header.push(Span::styled(
            format!(" {} ", conversation.unread_count),
            theme::unread_badge(),
        ));
    }
    if let Some(last) = &conversation.last_message {
        header.push(Span::raw(" "));
        header.push(Span::styled(
            format_relative_time(last.created_at),
            theme::text_dim(),
        ));
    }

    let preview = conversation
        .last_message
        .as_ref()
        .map(|m| m.content.clone())
        .unwrap_or_else(|| "No messages yet".to_string());
    let badge = conversation.status.label();
    let preview_width = width.saturating_sub(badge.len() + 6);
    let detail = vec![
        Span::raw("    "),
        Span::styled(
            truncate_with_ellipsis(&preview, preview_width),
            theme::text_muted(),
        ),
        Span::raw(" "),
        Span::styled(format!("[{badge}]"), theme::status_style(conversation.status)),
    ];

    Text::from(vec![Line::from(header), Line::from(detail)])
}

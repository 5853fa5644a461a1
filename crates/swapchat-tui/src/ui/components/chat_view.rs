use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use swapchat_core::models::Message;

use crate::ui::format::{format_relative_time, wrap_text};
use crate::ui::{theme, App, InputMode};

/// Right column: conversation header, message bubbles, input line.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let sections = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(area);

    render_header(f, app, sections[0]);
    render_messages(f, app, sections[1]);
    render_input(f, app, sections[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.selected_conversation() {
        Some(conversation) => Line::from(vec![
            Span::styled(conversation.item_title.clone(), theme::text_primary()),
            Span::styled("  ·  Item Discussion  ", theme::text_dim()),
            Span::styled(
                format!("[{}]", conversation.status.label()),
                theme::status_style(conversation.status),
            ),
        ]),
        None => Line::from(Span::styled("No conversation selected", theme::text_dim())),
    };

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_inactive()),
    );
    f.render_widget(header, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let inner_width = (area.width as usize).saturating_sub(2);
    let inner_height = (area.height as usize).saturating_sub(2);
    let bubble_width = (inner_width * 2 / 3).max(20).min(inner_width.max(1));

    let mut lines: Vec<Line> = Vec::new();
    for message in &app.messages {
        lines.extend(bubble_lines(message, bubble_width));
        lines.push(Line::from(""));
    }

    // Clamp the scrollback offset, then show the window ending
    // `scroll_from_bottom` lines above the newest message.
    let total = lines.len();
    let from_bottom = app.scroll_from_bottom.min(total.saturating_sub(inner_height));
    let start = total.saturating_sub(inner_height + from_bottom);
    let window: Vec<Line> = lines.into_iter().skip(start).take(inner_height).collect();

    let messages = Paragraph::new(window)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_inactive()),
        )
        .style(Style::default().bg(theme::BG_APP));
    f.render_widget(messages, area);
}

/// One message as pre-wrapped lines: sender tag, body, relative timestamp.
/// Own messages hug the right edge, external ones the left.
fn bubble_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let own = message.is_own();
    let alignment = if own {
        Alignment::Right
    } else {
        Alignment::Left
    };
    let body_style = theme::message_style(own);

    let mut lines = Vec::new();
    lines.push(
        Line::from(Span::styled(message.sender_name.clone(), theme::text_muted()))
            .alignment(alignment),
    );
    for row in wrap_text(&message.content, width) {
        lines.push(Line::from(Span::styled(row, body_style)).alignment(alignment));
    }
    lines.push(
        Line::from(Span::styled(
            format_relative_time(message.created_at),
            theme::text_dim(),
        ))
        .alignment(alignment),
    );
    lines
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let content = if app.input.is_empty() && !editing {
        Span::styled("Type your message...", theme::text_dim())
    } else {
        Span::styled(app.input.clone(), theme::text_primary())
    };
    let border = if editing {
        theme::border_active()
    } else {
        theme::border_inactive()
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(input, area);

    if editing {
        let max_x = (area.width as usize).saturating_sub(2);
        let cursor_x = area.x + 1 + app.input.chars().count().min(max_x) as u16;
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

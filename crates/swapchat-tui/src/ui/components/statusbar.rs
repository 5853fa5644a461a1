use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::{theme, App, InputMode};

/// Bottom line: transient errors when present, key hints otherwise.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(status) = &app.status {
        Line::from(Span::styled(status.clone(), theme::status_error()))
    } else {
        let hints = match app.input_mode {
            InputMode::Normal => " q quit · j/k select · Enter reply · / search",
            InputMode::Editing => " Enter send · Esc back",
            InputMode::Searching => " type to filter · Enter apply · Esc clear",
        };
        Line::from(Span::styled(hints, theme::text_dim()))
    };
    f.render_widget(Paragraph::new(line), area);
}

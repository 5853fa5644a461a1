use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use crate::ui::components::{chat_view, conversation_list, statusbar};
use crate::ui::App;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(f.area());
    let columns =
        Layout::horizontal([Constraint::Percentage(33), Constraint::Percentage(67)]).split(rows[0]);

    conversation_list::render(f, app, columns[0]);
    chat_view::render(f, app, columns[1]);
    statusbar::render(f, app, rows[1]);
}

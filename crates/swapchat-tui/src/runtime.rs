use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;

use swapchat_core::models::Message;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{App, Tui};

pub(crate) async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    mut message_rx: UnboundedReceiver<(String, Message)>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    // Redraw on a timer so the relative timestamps stay fresh.
    let mut tick_interval = tokio::time::interval(Duration::from_secs(1));

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            // Terminal UI events
            maybe_event = event_stream.next() => {
                if let Some(Ok(event)) = maybe_event {
                    match event {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            if key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL)
                            {
                                app.quit();
                            } else {
                                handle_key(app, key);
                            }
                        }
                        Event::Mouse(mouse) => match mouse.kind {
                            MouseEventKind::ScrollUp => app.scroll_up(3),
                            MouseEventKind::ScrollDown => app.scroll_down(3),
                            _ => {}
                        },
                        _ => {}
                    }
                }
            }

            // Hub notifications forwarded by the subscription in main
            Some((conversation_id, message)) = message_rx.recv() => {
                app.on_message(&conversation_id, message);
            }

            _ = tick_interval.tick() => {}
        }
    }
    Ok(())
}

mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use swapchat_core::{
    tracing_setup, InboundSimulator, MessagingService, ServiceConfig, SimulatorConfig,
};

use crate::runtime::run_app;
use crate::ui::App;

#[derive(Parser, Debug)]
#[command(name = "swapchat", about = "Marketplace swap chat with simulated counterparts")]
struct Args {
    /// Append logs to this file (stdout belongs to the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Disable the simulated inbound message generator
    #[arg(long)]
    no_simulator: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = args.log_file.as_deref() {
        tracing_setup::init_file_tracing(path)?;
    }

    // Restore the terminal before any panic output hits the screen. Panics
    // the notification hub contains never unwind the app, so leave the
    // terminal alone for those and let the hub's logging report them.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if swapchat_core::hub::panic_is_contained() {
            return;
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));

    let service = Arc::new(MessagingService::with_fixtures(ServiceConfig::default()));

    // Hub callbacks run under the store lock; forward into the event loop
    // instead of touching the service here.
    let (message_tx, message_rx) = tokio::sync::mpsc::unbounded_channel();
    let _subscription = service.subscribe(move |conversation_id, message| {
        let _ = message_tx.send((conversation_id.to_string(), message.clone()));
    });

    let simulator = if args.no_simulator {
        None
    } else {
        Some(InboundSimulator::spawn(
            service.clone(),
            SimulatorConfig::default(),
        ))
    };

    let mut app = App::new(service);
    let mut terminal = ui::init_terminal()?;

    let result = run_app(&mut terminal, &mut app, message_rx).await;

    if let Some(simulator) = simulator {
        simulator.shutdown();
        simulator.join().await;
    }
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }
    Ok(())
}

mod action;
mod analysis;
mod app;
mod cli;
mod config;
mod error;
mod event;
mod history;
mod http;
mod logging;
mod service;
mod store;
mod tui;
mod types;
mod ui;

use std::panic;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;
use crate::event::Event;
use crate::http::HttpService;
use crate::service::SentimentService;
use crate::store::{AppState, Store};
use crate::tui::EventHandler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_file.as_deref());
    let config = cli.resolve_config();

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let service = HttpService::new(&config.server.base_url, config.request_timeout())?;
    let result = run(Arc::new(service), &config).await;

    tui::restore()?;

    result
}

async fn run(
    service: Arc<dyn SentimentService>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Session-scoped state, shared by both controllers and the renderer
    let store = Store::new(AppState::default());
    let mut state_rx = store.subscribe();
    let mut app = App::new(store, service, action_tx.clone());
    app.spawn_health_probe();

    let mut events = EventHandler::new(config.tick_rate());

    terminal.draw(|frame| ui::render(frame, &state_rx.borrow_and_update()))?;

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                if matches!(event, Event::Resize) {
                    terminal.draw(|frame| ui::render(frame, &state_rx.borrow()))?;
                }

                let action = app.handle_event(event);
                if !matches!(action, Action::None) {
                    action_tx.send(action)?;
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
            Ok(()) = state_rx.changed() => {
                terminal.draw(|frame| ui::render(frame, &state_rx.borrow_and_update()))?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

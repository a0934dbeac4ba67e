mod app;
mod cli;
mod components;
mod curation;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::cli::CliCommand;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crossterm::event::{
    self as crossterm_event, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::{cursor, execute, terminal};
use game2match_api::client::RecommendApi;
use log::{LevelFilter, error};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Capture everything up front so settings warnings are not lost; the
    // visible level is narrowed once settings are loaded.
    tui_logger::init_logger(LevelFilter::Trace)?;

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n\n{}", cli::usage_text());
            std::process::exit(2);
        }
    };

    let mut settings = AppSettings::load();

    let (variant, once) = match command {
        CliCommand::Help => {
            println!("{}", cli::usage_text());
            return Ok(());
        }
        CliCommand::Version => {
            println!("game2match {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        CliCommand::Run { variant, once } => (variant, once),
    };
    if let Some(variant) = variant {
        settings.set_variant(variant);
    }

    let client = RecommendApi::new(settings.api_url.clone()).with_timeout(settings.timeout);

    if let Some(prompt) = once {
        let code = cli::run_once(&client, &settings, &prompt).await;
        std::process::exit(code);
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let level = settings.log_level.unwrap_or(LevelFilter::Info);
    log::set_max_level(level);
    tui_logger::set_default_level(level);

    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Backend health probe thread (every 30s)
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Probe the backend and paint the first frame on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = network_requests.send(NetworkRequest::CheckHealth).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Paste(text) => {
            app.lock().await.state.prompt.push_str(&text);
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            true
        }
        NetworkResponse::RecommendationsLoaded { seq, recommendations } => {
            app.lock().await.on_recommendations_loaded(seq, recommendations)
        }
        NetworkResponse::RecommendationsFailed { seq, message } => {
            error!("Network error: {message}");
            app.lock().await.on_recommendations_failed(seq, &message)
        }
        NetworkResponse::HealthChecked { health } => {
            app.lock().await.on_health_checked(health);
            true
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let event = match tokio::task::spawn_blocking(crossterm_event::read).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                error!("terminal input error: {e}");
                continue;
            }
            Err(_) => break,
        };

        let ui_event = match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Some(UiEvent::KeyPressed(key_event))
            }
            Event::Paste(text) => Some(UiEvent::Paste(text)),
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, EnableBracketedPaste)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Best effort: called from the panic hook and on quit, so errors are ignored.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, DisableBracketedPaste);
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

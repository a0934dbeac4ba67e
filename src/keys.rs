use crate::app::App;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

const PAGE: u16 = 5;

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    match (key_event.code, key_event.modifiers) {
        // Quit
        (KeyCode::Esc, _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Submit, or newline with a modifier
        (KeyCode::Enter, m) if m.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) => {
            guard.state.prompt.newline()
        }
        (Char('j'), KeyModifiers::CONTROL) => guard.state.prompt.newline(),
        (KeyCode::Enter, _) => {
            if let Some(request) = guard.submit_prompt() {
                drop(guard);
                let _ = network_requests.send(request).await;
                return;
            }
        }

        // Preset chips
        (KeyCode::F(n @ 1..=4), _) => guard.apply_chip(usize::from(n - 1)),

        // Editing
        (KeyCode::Backspace, m) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            guard.state.prompt.delete_word()
        }
        (KeyCode::Backspace, _) => guard.state.prompt.backspace(),
        (Char('w'), KeyModifiers::CONTROL) => guard.state.prompt.delete_word(),
        (Char('u'), KeyModifiers::CONTROL) => guard.state.prompt.clear(),

        // Results scrolling
        (KeyCode::Down, _) => guard.results_scroll_down(1),
        (KeyCode::Up, _) => guard.results_scroll_up(1),
        (KeyCode::PageDown, _) => guard.results_scroll_down(PAGE),
        (KeyCode::PageUp, _) => guard.results_scroll_up(PAGE),

        // Global
        (Char('l'), KeyModifiers::CONTROL) => guard.toggle_show_logs(),
        (Char('f'), KeyModifiers::CONTROL) => guard.toggle_full_screen(),

        (Char(c), _) if !ctrl && !alt => guard.state.prompt.push_char(c),

        _ => {}
    }
}

use crate::curation::render::render_results;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, BackendState, PRESET_CHIPS, Status};
use crate::state::messages::NetworkRequest;
use chrono::Local;
use game2match_api::{Health, Recommendations};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    rng: StdRng,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Build with a fixed random source so curator lines are reproducible.
    pub fn with_rng(settings: AppSettings, rng: StdRng) -> Self {
        Self {
            state: AppState::new(),
            settings,
            rng,
        }
    }

    // -----------------------------------------------------------------------
    // Input capture
    // -----------------------------------------------------------------------

    /// Validate the prompt and, if there is one, hand back the request to send.
    ///
    /// An empty prompt only updates the status line. Otherwise the previous
    /// results are cleared and a new sequence number is issued.
    pub fn submit_prompt(&mut self) -> Option<NetworkRequest> {
        let Some(prompt) = self.state.prompt.trimmed().map(str::to_string) else {
            self.state.status = Status::EmptyInput;
            return None;
        };

        let seq = self.state.dispatch.next();
        info!("submitting prompt #{seq}: {prompt:?}");
        self.state.status = Status::Loading;
        self.state.results.clear();

        Some(NetworkRequest::Recommend {
            seq,
            prompt,
            contract: self.settings.page.contract,
        })
    }

    /// Overwrite the prompt with preset `index` (0-based). Does not submit.
    pub fn apply_chip(&mut self, index: usize) {
        if let Some(chip) = PRESET_CHIPS.get(index) {
            self.state.prompt.replace(chip.prompt);
            if self.state.status == Status::EmptyInput {
                self.state.status = Status::Idle;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Returns false when the response belongs to a superseded request.
    pub fn on_recommendations_loaded(&mut self, seq: u64, recommendations: Recommendations) -> bool {
        if !self.state.dispatch.is_current(seq) {
            debug!("discarding stale recommendations #{seq} (latest #{})", self.state.dispatch.latest());
            return false;
        }

        let view = render_results(&recommendations, &self.settings.page, &mut self.rng);
        self.state.status = Status::Loaded {
            count: view.game_count(),
            at: Local::now().format("%H:%M").to_string(),
        };
        self.state.results.replace(view);
        true
    }

    pub fn on_recommendations_failed(&mut self, seq: u64, message: &str) -> bool {
        if !self.state.dispatch.is_current(seq) {
            debug!("discarding stale failure #{seq}: {message}");
            return false;
        }
        warn!("request #{seq} failed: {message}");
        self.state.status = Status::RequestFailed;
        self.state.results.clear();
        true
    }

    pub fn on_health_checked(&mut self, health: Option<Health>) {
        self.state.backend = BackendState::from_health(health);
    }

    // -----------------------------------------------------------------------
    // View toggles and scrolling
    // -----------------------------------------------------------------------

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn results_scroll_down(&mut self, by: u16) {
        self.state.results.scroll_offset = self.state.results.scroll_offset.saturating_add(by);
    }

    pub fn results_scroll_up(&mut self, by: u16) {
        self.state.results.scroll_offset = self.state.results.scroll_offset.saturating_sub(by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curation::render::NO_MATCHES;
    use crate::curation::vibe::VibeBucket;
    use crate::state::app_settings::Variant;
    use crate::state::app_state::{EMPTY_INPUT_MESSAGE, REQUEST_FAILED_MESSAGE};
    use game2match_api::{Game, RequestField};

    fn app(variant: Variant) -> App {
        let mut settings = AppSettings::default();
        settings.set_variant(variant);
        App::with_rng(settings, StdRng::seed_from_u64(5))
    }

    fn recs(titles: &[&str], tags: &[&str]) -> Recommendations {
        Recommendations {
            results: titles
                .iter()
                .map(|t| Game {
                    title: Some(t.to_string()),
                    tags: tags.iter().map(|s| s.to_string()).collect(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn submit(app: &mut App, prompt: &str) -> u64 {
        app.state.prompt.replace(prompt);
        match app.submit_prompt() {
            Some(NetworkRequest::Recommend { seq, .. }) => seq,
            other => panic!("expected a recommend request, got {other:?}"),
        }
    }

    #[test]
    fn blank_prompt_sends_nothing() {
        let mut app = app(Variant::Curator);
        for blank in ["", "   ", "\n\t  \n"] {
            app.state.prompt.replace(blank);
            assert!(app.submit_prompt().is_none());
            assert_eq!(app.state.status, Status::EmptyInput);
            assert_eq!(app.state.status.message(), EMPTY_INPUT_MESSAGE);
        }
        assert_eq!(app.state.dispatch.latest(), 0);
    }

    #[test]
    fn submit_trims_and_uses_configured_contract() {
        let mut app = app(Variant::Classic);
        app.state.prompt.replace("  cozy space  ");
        let Some(NetworkRequest::Recommend { seq, prompt, contract }) = app.submit_prompt() else {
            panic!("expected a request");
        };
        assert_eq!(seq, 1);
        assert_eq!(prompt, "cozy space");
        assert_eq!(contract.field, RequestField::Preferences);
        assert_eq!(app.state.status, Status::Loading);
    }

    #[test]
    fn results_for_latest_request_are_rendered() {
        let mut app = app(Variant::Vibes);
        let seq = submit(&mut app, "rpg please");
        assert!(app.on_recommendations_loaded(seq, recs(&["A", "B", "C"], &["rpg"])));

        let view = &app.state.results.view;
        assert_eq!(view.cards.len(), 3);
        assert_eq!(view.vibe, VibeBucket::Rpg);
        assert!(view.curator_line.contains("indie RPG"));
        assert!(matches!(app.state.status, Status::Loaded { count: 3, .. }));
    }

    #[test]
    fn stale_response_does_not_touch_the_display() {
        let mut app = app(Variant::Curator);
        let first = submit(&mut app, "horror");
        let second = submit(&mut app, "rpg");

        assert!(app.on_recommendations_loaded(second, recs(&["Newer"], &["rpg"])));
        assert!(!app.on_recommendations_loaded(first, recs(&["Older"], &["horror"])));
        assert_eq!(app.state.results.view.cards[0].title, "Newer");

        assert!(!app.on_recommendations_failed(first, "late timeout"));
        assert!(matches!(app.state.status, Status::Loaded { .. }));
    }

    #[test]
    fn stale_success_after_newer_submit_is_dropped_even_if_it_resolves_first() {
        let mut app = app(Variant::Curator);
        let first = submit(&mut app, "horror");
        let _second = submit(&mut app, "rpg");
        assert!(!app.on_recommendations_loaded(first, recs(&["Older"], &[])));
        assert!(app.state.results.view.is_empty());
        assert_eq!(app.state.status, Status::Loading);
    }

    #[test]
    fn empty_results_show_placeholder_and_no_curator_line() {
        let mut app = app(Variant::Curator);
        let seq = submit(&mut app, "something obscure");
        assert!(app.on_recommendations_loaded(seq, Recommendations::default()));
        assert_eq!(app.state.results.view.placeholder, Some(NO_MATCHES));
        assert_eq!(app.state.results.view.curator_line, "");
        assert!(!app.state.status.is_error());
    }

    #[test]
    fn failure_shows_troubleshooting_and_clears_panels() {
        let mut app = app(Variant::Curator);
        let seq = submit(&mut app, "horror");
        app.on_recommendations_loaded(seq, recs(&["A"], &["horror"]));

        let seq = submit(&mut app, "again");
        assert!(app.on_recommendations_failed(seq, "HTTP 503"));
        assert_eq!(app.state.status.message(), REQUEST_FAILED_MESSAGE);
        assert!(app.state.results.view.is_empty());
        assert_eq!(app.state.results.view.curator_line, "");
        assert!(app.state.results.view.raw_explanations.is_none());
    }

    #[test]
    fn chip_overwrites_prompt_without_dispatch() {
        let mut app = app(Variant::Curator);
        app.state.prompt.replace("old text");
        app.apply_chip(0);
        assert_eq!(app.state.prompt.input, PRESET_CHIPS[0].prompt);
        assert_eq!(app.state.dispatch.latest(), 0);

        app.apply_chip(99);
        assert_eq!(app.state.prompt.input, PRESET_CHIPS[0].prompt);
    }

    #[test]
    fn health_updates_backend_state() {
        let mut app = app(Variant::Curator);
        app.on_health_checked(Some(Health { status: "ok".into(), games_loaded: 3 }));
        assert_eq!(app.state.backend, BackendState::Online { games_loaded: 3 });
        app.on_health_checked(None);
        assert_eq!(app.state.backend, BackendState::Offline);
    }
}

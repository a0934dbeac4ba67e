use crate::curation::render::RenderedView;
use game2match_api::Health;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter your game preferences";
pub const LOADING_MESSAGE: &str = "Finding games that match your vibe...";
pub const REQUEST_FAILED_MESSAGE: &str =
    "Couldn't get recommendations. Check that the Game2Match backend is running and reachable, then try again.";

/// Canned prompts bound to F1–F4. Activating one overwrites the prompt field.
pub const PRESET_CHIPS: [PresetChip; 4] = [
    PresetChip { label: "Spooky & cozy", prompt: "spooky but cozy horror game" },
    PresetChip { label: "Unwind", prompt: "something wholesome and cozy to unwind after work" },
    PresetChip { label: "Space weird", prompt: "weird sci-fi exploration in deep space" },
    PresetChip { label: "Deep RPG", prompt: "a story-rich indie RPG I can sink a weekend into" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetChip {
    pub label: &'static str,
    pub prompt: &'static str,
}

// ---------------------------------------------------------------------------
// Prompt input
// ---------------------------------------------------------------------------

/// The multi-line prompt field. Editing always happens at the end of the text.
#[derive(Debug, Default)]
pub struct PromptState {
    pub input: String,
}

impl PromptState {
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.input.push_str(&s.replace("\r\n", "\n").replace('\r', "\n"));
    }

    pub fn newline(&mut self) {
        self.input.push('\n');
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Drop the last whitespace-delimited word, like a shell's Ctrl+W.
    pub fn delete_word(&mut self) {
        let trimmed = self.input.trim_end().len();
        self.input.truncate(trimmed);
        let cut = self
            .input
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        self.input.truncate(cut);
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    pub fn replace(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// The trimmed prompt, or `None` when there is nothing to send.
    pub fn trimmed(&self) -> Option<&str> {
        let prompt = self.input.trim();
        (!prompt.is_empty()).then_some(prompt)
    }
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Status {
    #[default]
    Idle,
    EmptyInput,
    Loading,
    Loaded { count: usize, at: String },
    RequestFailed,
}

impl Status {
    pub fn message(&self) -> String {
        match self {
            Status::Idle => "Describe what you're in the mood for and press Enter.".to_string(),
            Status::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
            Status::Loading => LOADING_MESSAGE.to_string(),
            Status::Loaded { count: 0, at } => format!("No matches this time · updated {at}"),
            Status::Loaded { count: 1, at } => format!("Found 1 hidden gem · updated {at}"),
            Status::Loaded { count, at } => format!("Found {count} hidden gems · updated {at}"),
            Status::RequestFailed => REQUEST_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::EmptyInput | Status::RequestFailed)
    }
}

// ---------------------------------------------------------------------------
// Dispatch bookkeeping
// ---------------------------------------------------------------------------

/// Hands out request sequence numbers and remembers the newest one.
/// Only the newest request's outcome may touch the display.
#[derive(Debug, Default)]
pub struct DispatchState {
    latest: u64,
}

impl DispatchState {
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultsState {
    pub view: RenderedView,
    pub scroll_offset: u16,
}

impl ResultsState {
    pub fn replace(&mut self, view: RenderedView) {
        self.view = view;
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.replace(RenderedView::default());
    }
}

// ---------------------------------------------------------------------------
// Backend health
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq)]
pub enum BackendState {
    #[default]
    Unknown,
    Online { games_loaded: usize },
    Offline,
}

impl BackendState {
    pub fn from_health(health: Option<Health>) -> Self {
        match health {
            Some(h) if h.is_ok() => BackendState::Online { games_loaded: h.games_loaded },
            _ => BackendState::Offline,
        }
    }

    pub fn label(&self) -> String {
        match self {
            BackendState::Unknown => "backend: checking".to_string(),
            BackendState::Online { games_loaded } => format!("backend online ({games_loaded} games)"),
            BackendState::Offline => "backend offline".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub show_logs: bool,
    pub prompt: PromptState,
    pub status: Status,
    pub dispatch: DispatchState,
    pub results: ResultsState,
    pub backend: BackendState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use game2match_api::{Health, Recommendations, RequestContract};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// `seq` is echoed back so stale responses can be dropped.
    Recommend {
        seq: u64,
        prompt: String,
        contract: RequestContract,
    },
    CheckHealth,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    RecommendationsLoaded { seq: u64, recommendations: Recommendations },
    RecommendationsFailed { seq: u64, message: String },
    HealthChecked { health: Option<Health> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Paste(String),
    Resize,
    AppStarted,
}

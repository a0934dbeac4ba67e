/// Wire types for the Game2Match backend.
/// Endpoints: `POST /recommend`, `GET /health`.
///
/// The backend is loose about which keys it sends, so everything defaults.
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct RecommendResponse {
    /// Older backends call this `recommendations`.
    #[serde(default, alias = "recommendations")]
    pub results: Option<Vec<WireGame>>,
    #[serde(default)]
    pub explanations_raw: Option<String>,
    /// The backend's LLM-parsed reading of the prompt. Kept as raw JSON because
    /// the model does not always return the documented shape.
    #[serde(default)]
    pub preferences: Option<serde_json::Value>,
    /// Echo of the submitted prompt; not used for rendering.
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct WireGame {
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
    pub player_quote: Option<String>,
    pub explanation: Option<String>,
    /// Single-genre, platform and rating fields from the legacy catalogue.
    pub genre: Option<String>,
    pub platform: Option<String>,
    /// Sent as a number or a string depending on the backend version.
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
}

#[derive(Deserialize, Default, Debug)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub games_loaded: usize,
}

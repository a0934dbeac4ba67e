use crate::wire::{HealthResponse, RecommendResponse, WireGame};
use crate::{Game, Health, ParsedPreferences, RequestContract, Recommendations};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Game2Match recommendation backend.
#[derive(Debug, Clone)]
pub struct RecommendApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for RecommendApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl RecommendApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::builder()
                .user_agent("game2match/0.1 (terminal recommender)")
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend for games matching `prompt`.
    ///
    /// One request, no retry. Any non-success status is an error, including 4xx:
    /// the caller only distinguishes "worked" from "didn't".
    pub async fn recommend(
        &self,
        prompt: &str,
        contract: RequestContract,
    ) -> ApiResult<Recommendations> {
        let url = format!("{}/recommend", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&contract.body(prompt))
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        let raw: RecommendResponse = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.clone()))?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url.clone()))?;

        Ok(map_recommendations(raw))
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> ApiResult<Health> {
        let url = format!("{}/health", self.base_url);
        let raw: HealthResponse = self.get(&url).await?;
        Ok(Health {
            status: raw.status,
            games_loaded: raw.games_loaded,
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_recommendations(raw: RecommendResponse) -> Recommendations {
    Recommendations {
        results: raw
            .results
            .unwrap_or_default()
            .into_iter()
            .map(map_game)
            .collect(),
        explanations_raw: raw.explanations_raw.unwrap_or_default(),
        preferences: raw.preferences.as_ref().map(map_preferences).unwrap_or_default(),
    }
}

fn map_game(g: WireGame) -> Game {
    Game {
        title: g.title.filter(|t| !t.trim().is_empty()),
        genres: g.genres.unwrap_or_default(),
        tags: g.tags.unwrap_or_default(),
        description: g.description.unwrap_or_default(),
        player_quote: g.player_quote.filter(|q| !q.trim().is_empty()),
        explanation: g.explanation.filter(|e| !e.trim().is_empty()),
        genre: non_blank(g.genre),
        platform: non_blank(g.platform),
        rating: g.rating.and_then(|r| match r {
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::String(s) => non_blank(Some(s)),
            _ => None,
        }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Pull the three string lists out of whatever JSON the backend sent.
/// Non-string entries and missing keys are skipped.
fn map_preferences(value: &serde_json::Value) -> ParsedPreferences {
    let list = |key: &str| -> Vec<String> {
        value
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    ParsedPreferences {
        preferred_genres: list("preferred_genres"),
        style_tags: list("style_tags"),
        avoid_tags: list("avoid_tags"),
    }
}

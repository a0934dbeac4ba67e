pub mod client;
pub mod wire;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Domain types: independent of the backend wire format
// ---------------------------------------------------------------------------

/// One recommended game. Everything except the position in the result list is
/// optional on the wire, so every field here has a usable default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub title: Option<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub player_quote: Option<String>,
    /// Per-game explanation sent by older backends instead of `explanations_raw`.
    pub explanation: Option<String>,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub rating: Option<String>,
}

impl Game {
    /// Lower-cased genres and tags as one blob, used for substring matching.
    pub fn genre_tag_text(&self) -> String {
        let mut text = self.genres.join(" ");
        text.push(' ');
        text.push_str(&self.tags.join(" "));
        text.to_lowercase()
    }
}

/// How the backend read the prompt. Purely informational.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPreferences {
    pub preferred_genres: Vec<String>,
    pub style_tags: Vec<String>,
    pub avoid_tags: Vec<String>,
}

impl ParsedPreferences {
    pub fn is_empty(&self) -> bool {
        self.preferred_genres.is_empty() && self.style_tags.is_empty() && self.avoid_tags.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    /// Display order is authoritative.
    pub results: Vec<Game>,
    pub explanations_raw: String,
    pub preferences: ParsedPreferences,
}

impl Recommendations {
    /// Non-empty trimmed lines of `explanations_raw`. Line `i` explains `results[i]`.
    pub fn explanation_lines(&self) -> Vec<&str> {
        self.explanations_raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Health {
    pub status: String,
    pub games_loaded: usize,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

// ---------------------------------------------------------------------------
// Request contract
// ---------------------------------------------------------------------------

/// Which JSON key carries the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestField {
    #[default]
    Prompt,
    /// Legacy backends read `{"preferences": ...}` and ignore `max_results`.
    Preferences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContract {
    pub field: RequestField,
    pub max_results: Option<u32>,
}

impl Default for RequestContract {
    fn default() -> Self {
        Self { field: RequestField::Prompt, max_results: Some(3) }
    }
}

impl RequestContract {
    pub fn legacy() -> Self {
        Self { field: RequestField::Preferences, max_results: None }
    }

    /// Build the JSON body for a `/recommend` call.
    pub fn body<'a>(&self, prompt: &'a str) -> RecommendBody<'a> {
        match self.field {
            RequestField::Prompt => RecommendBody::Prompt {
                prompt,
                max_results: self.max_results,
            },
            RequestField::Preferences => RecommendBody::Preferences { preferences: prompt },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RecommendBody<'a> {
    Prompt {
        prompt: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_results: Option<u32>,
    },
    Preferences {
        preferences: &'a str,
    },
}

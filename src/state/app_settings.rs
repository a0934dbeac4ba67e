use crate::curation::phrases::{CLASSIC_TEMPLATES, CURATOR_TEMPLATES, TemplateTable, VIBES_TEMPLATES};
use game2match_api::client::DEFAULT_BASE_URL;
use game2match_api::{RequestContract, RequestField};
use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_URL: &str = "GAME2MATCH_API_URL";
pub const ENV_VARIANT: &str = "GAME2MATCH_VARIANT";
pub const ENV_TIMEOUT: &str = "GAME2MATCH_TIMEOUT_SECS";
pub const ENV_LOG: &str = "GAME2MATCH_LOG";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The three page flavours the client can run as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Oldest contract: `{"preferences": ...}`, no result cap, no emoji.
    Classic,
    #[default]
    Curator,
    /// Curator plus per-card emoji.
    Vibes,
}

impl Variant {
    pub fn page_config(self) -> PageConfig {
        match self {
            Variant::Classic => PageConfig {
                include_emoji: false,
                catalogue_details: true,
                templates: CLASSIC_TEMPLATES,
                contract: RequestContract::legacy(),
            },
            Variant::Curator => PageConfig {
                include_emoji: false,
                catalogue_details: false,
                templates: CURATOR_TEMPLATES,
                contract: RequestContract { field: RequestField::Prompt, max_results: Some(3) },
            },
            Variant::Vibes => PageConfig {
                include_emoji: true,
                catalogue_details: false,
                templates: VIBES_TEMPLATES,
                contract: RequestContract { field: RequestField::Prompt, max_results: Some(3) },
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Curator => "curator",
            Variant::Vibes => "vibes",
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "curator" => Ok(Variant::Curator),
            "vibes" | "emoji" => Ok(Variant::Vibes),
            other => Err(format!("unknown variant '{other}' (expected classic, curator or vibes)")),
        }
    }
}

/// Everything that differs between page variants, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub include_emoji: bool,
    /// Genre/platform/rating line and a description fallback on every card.
    pub catalogue_details: bool,
    pub templates: TemplateTable,
    pub contract: RequestContract,
}

impl Default for PageConfig {
    fn default() -> Self {
        Variant::default().page_config()
    }
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_url: String,
    pub timeout: Duration,
    pub variant: Variant,
    pub page: PageConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            variant: Variant::default(),
            page: PageConfig::default(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values fall back to the
    /// defaults with a warning rather than aborting startup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get(ENV_API_URL) {
            settings.api_url = url;
        }

        if let Some(raw) = get(ENV_VARIANT) {
            match raw.parse::<Variant>() {
                Ok(variant) => settings.set_variant(variant),
                Err(e) => log::warn!("{ENV_VARIANT}: {e}"),
            }
        }

        if let Some(raw) = get(ENV_TIMEOUT) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => settings.timeout = Duration::from_secs(secs),
                _ => log::warn!("{ENV_TIMEOUT}: expected a positive number of seconds, got '{raw}'"),
            }
        }

        if let Some(raw) = get(ENV_LOG) {
            match raw.parse::<LevelFilter>() {
                Ok(level) => settings.log_level = Some(level),
                Err(_) => log::warn!("{ENV_LOG}: unknown log level '{raw}'"),
            }
        }

        settings
    }

    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
        self.page = variant.page_config();
    }
}

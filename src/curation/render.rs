use crate::curation::phrases::pick_phrase;
use crate::curation::vibe::{VibeBucket, infer_vibe};
use crate::state::app_settings::PageConfig;
use game2match_api::{Game, ParsedPreferences, Recommendations};
use rand::Rng;
use std::fmt::Write;

pub const NO_MATCHES: &str = "No games found matching your preferences. Try different criteria!";
pub const UNTITLED: &str = "Untitled Game";
pub const HIDDEN_GEM_LABEL: &str = "hidden gem";
pub const GENRE_SEPARATOR: &str = " • ";
pub const NO_DESCRIPTION: &str = "No description available";
const NOT_AVAILABLE: &str = "N/A";

/// One display card per returned game.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub decoration: Option<&'static str>,
    /// `None` when the game has no genres.
    pub genres: Option<String>,
    /// "Genre: … | Platform: … | Rating: …", only in catalogue mode.
    pub details: Option<String>,
    pub description: String,
    pub quote: Option<String>,
    pub explanation: Option<String>,
}

impl Card {
    pub fn heading(&self) -> String {
        match self.decoration {
            Some(emoji) => format!("{} {emoji}", self.title),
            None => self.title.clone(),
        }
    }
}

/// Everything the results area shows for one response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedView {
    pub cards: Vec<Card>,
    /// Set instead of cards when the backend returned nothing.
    pub placeholder: Option<&'static str>,
    pub vibe: VibeBucket,
    /// Empty when there is nothing to curate.
    pub curator_line: String,
    /// The explanation blob, verbatim, when at least one line of it was used.
    pub raw_explanations: Option<String>,
    /// "read as" summary of the backend's parsed preferences.
    pub read_as: Option<String>,
}

impl RenderedView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.placeholder.is_none()
    }

    pub fn game_count(&self) -> usize {
        self.cards.len()
    }

    /// Plain-text rendering used by `--once`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        if let Some(placeholder) = self.placeholder {
            let _ = writeln!(out, "{placeholder}");
            return out;
        }
        if !self.curator_line.is_empty() {
            let _ = writeln!(out, "{}\n", self.curator_line);
        }
        if let Some(read_as) = &self.read_as {
            let _ = writeln!(out, "{read_as}\n");
        }
        for (i, card) in self.cards.iter().enumerate() {
            let _ = writeln!(out, "{}. {}  [{HIDDEN_GEM_LABEL}]", i + 1, card.heading());
            if let Some(genres) = &card.genres {
                let _ = writeln!(out, "   {genres}");
            }
            if let Some(details) = &card.details {
                let _ = writeln!(out, "   {details}");
            }
            if !card.description.is_empty() {
                let _ = writeln!(out, "   {}", card.description);
            }
            if let Some(quote) = &card.quote {
                let _ = writeln!(out, "   \"{quote}\"");
            }
            if let Some(explanation) = &card.explanation {
                let _ = writeln!(out, "   → {explanation}");
            }
            out.push('\n');
        }
        if let Some(raw) = &self.raw_explanations {
            let _ = writeln!(out, "Why these games:\n{raw}");
        }
        out
    }
}

/// Build the full view for a response. Fully replaces whatever was shown before.
pub fn render_results<R>(recs: &Recommendations, config: &PageConfig, rng: &mut R) -> RenderedView
where
    R: Rng + ?Sized,
{
    if recs.results.is_empty() {
        return RenderedView {
            placeholder: Some(NO_MATCHES),
            ..Default::default()
        };
    }

    let lines = recs.explanation_lines();
    let cards = recs
        .results
        .iter()
        .enumerate()
        .map(|(i, game)| build_card(game, lines.get(i).copied(), config))
        .collect();

    let vibe = infer_vibe(&recs.results);
    let curator_line = pick_phrase(vibe.display_phrase(), &config.templates, rng);

    RenderedView {
        cards,
        placeholder: None,
        vibe,
        curator_line,
        raw_explanations: (!lines.is_empty()).then(|| recs.explanations_raw.clone()),
        read_as: summarize_preferences(&recs.preferences),
    }
}

fn build_card(game: &Game, explanation_line: Option<&str>, config: &PageConfig) -> Card {
    let decoration = if config.include_emoji {
        infer_vibe(std::slice::from_ref(game)).emoji()
    } else {
        None
    };

    let explanation = explanation_line
        .map(ToString::to_string)
        .or_else(|| game.explanation.as_ref().map(|e| e.trim().to_string()));

    Card {
        title: game.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
        decoration,
        genres: (!game.genres.is_empty()).then(|| game.genres.join(GENRE_SEPARATOR)),
        details: config.catalogue_details.then(|| catalogue_line(game)),
        description: if config.catalogue_details && game.description.trim().is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            game.description.clone()
        },
        quote: game.player_quote.clone().filter(|q| !q.trim().is_empty()),
        explanation,
    }
}

fn catalogue_line(game: &Game) -> String {
    let or_na = |field: &Option<String>| field.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!(
        "Genre: {} | Platform: {} | Rating: {}",
        or_na(&game.genre),
        or_na(&game.platform),
        or_na(&game.rating)
    )
}

fn summarize_preferences(prefs: &ParsedPreferences) -> Option<String> {
    if prefs.is_empty() {
        return None;
    }
    let mut wants: Vec<&str> = prefs.preferred_genres.iter().map(String::as_str).collect();
    wants.extend(prefs.style_tags.iter().map(String::as_str));

    let mut summary = String::from("Read as: ");
    if wants.is_empty() {
        summary.push_str("anything");
    } else {
        summary.push_str(&wants.join(", "));
    }
    if !prefs.avoid_tags.is_empty() {
        let _ = write!(summary, " · avoiding {}", prefs.avoid_tags.join(", "));
    }
    Some(summary)
}

use game2match_api::Game;

/// Mood category inferred from the genres and tags of a result set.
///
/// Declaration order matters: it is the tie-break order in [`infer_vibe`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VibeBucket {
    Horror,
    Cozy,
    SciFi,
    Rpg,
    Narrative,
    #[default]
    Default,
}

impl VibeBucket {
    /// The five countable buckets, in tie-break order. `Default` is never counted.
    pub const NAMED: [VibeBucket; 5] = [
        VibeBucket::Horror,
        VibeBucket::Cozy,
        VibeBucket::SciFi,
        VibeBucket::Rpg,
        VibeBucket::Narrative,
    ];

    /// Substrings that put a game's genre/tag text into this bucket.
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            VibeBucket::Horror => &["horror"],
            VibeBucket::Cozy => &["cozy", "wholesome"],
            VibeBucket::SciFi => &["sci", "space"],
            VibeBucket::Rpg => &["rpg"],
            VibeBucket::Narrative => &["narrative", "adventure"],
            VibeBucket::Default => &[],
        }
    }

    /// Human-readable phrase shown to the user and substituted into curator lines.
    pub fn display_phrase(self) -> &'static str {
        match self {
            VibeBucket::Horror => "cozy horror",
            VibeBucket::Cozy => "cozy narrative",
            VibeBucket::SciFi => "weird sci-fi",
            VibeBucket::Rpg => "indie RPG",
            VibeBucket::Narrative => "story-driven",
            VibeBucket::Default => DEFAULT_PHRASE,
        }
    }

    pub fn emoji(self) -> Option<&'static str> {
        match self {
            VibeBucket::Horror => Some("👻"),
            VibeBucket::Cozy => Some("🍵"),
            VibeBucket::SciFi => Some("🚀"),
            VibeBucket::Rpg => Some("⚔️"),
            VibeBucket::Narrative => Some("📖"),
            VibeBucket::Default => None,
        }
    }

    fn index(self) -> Option<usize> {
        Self::NAMED.iter().position(|b| *b == self)
    }

    /// Re-derive a bucket from a display phrase.
    ///
    /// Precedence is horror, cozy, sci, rpg, story/narrative. "cozy horror" is
    /// therefore horror and "cozy narrative" is cozy.
    pub fn from_phrase(phrase: &str) -> VibeBucket {
        let phrase = phrase.to_lowercase();
        if phrase.contains("horror") {
            VibeBucket::Horror
        } else if phrase.contains("cozy") {
            VibeBucket::Cozy
        } else if phrase.contains("sci") {
            VibeBucket::SciFi
        } else if phrase.contains("rpg") {
            VibeBucket::Rpg
        } else if phrase.contains("story") || phrase.contains("narrative") {
            VibeBucket::Narrative
        } else {
            VibeBucket::Default
        }
    }
}

pub const DEFAULT_PHRASE: &str = "good-taste";

/// Per-bucket hit counts for one inference pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts([u32; 5]);

impl BucketCounts {
    pub fn get(&self, bucket: VibeBucket) -> u32 {
        bucket.index().map(|i| self.0[i]).unwrap_or(0)
    }

    /// Each game adds at most one to each bucket, however many triggers it hits.
    pub fn add_game(&mut self, game: &Game) {
        let text = game.genre_tag_text();
        for (i, bucket) in VibeBucket::NAMED.iter().enumerate() {
            if bucket.triggers().iter().any(|t| text.contains(t)) {
                self.0[i] += 1;
            }
        }
    }

    /// Highest count wins; a later bucket only takes over on a strictly greater
    /// count, so ties go to the earlier bucket. All zero → `Default`.
    pub fn winner(&self) -> VibeBucket {
        let mut best = VibeBucket::Default;
        let mut best_count = 0;
        for bucket in VibeBucket::NAMED {
            let count = self.get(bucket);
            if count > best_count {
                best = bucket;
                best_count = count;
            }
        }
        best
    }
}

pub fn count_buckets(games: &[Game]) -> BucketCounts {
    let mut counts = BucketCounts::default();
    for game in games {
        counts.add_game(game);
    }
    counts
}

pub fn infer_vibe(games: &[Game]) -> VibeBucket {
    count_buckets(games).winner()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(genres: &[&str], tags: &[&str]) -> Game {
        Game {
            genres: genres.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn no_games_is_default() {
        assert_eq!(infer_vibe(&[]), VibeBucket::Default);
        assert_eq!(VibeBucket::Default.display_phrase(), "good-taste");
    }

    #[test]
    fn unmatched_text_is_default() {
        let games = [game(&["Puzzle"], &["relaxing"])];
        assert_eq!(infer_vibe(&games), VibeBucket::Default);
    }

    #[test]
    fn horror_and_adventure_game_counts_in_two_buckets() {
        let games = [game(&["Horror", "Adventure"], &[])];
        let counts = count_buckets(&games);
        assert_eq!(counts.get(VibeBucket::Horror), 1);
        assert_eq!(counts.get(VibeBucket::Narrative), 1);
        // Tie goes to the earlier-declared bucket.
        assert_eq!(counts.winner(), VibeBucket::Horror);
    }

    #[test]
    fn one_game_adds_at_most_one_per_bucket() {
        let games = [game(&["Space Sim", "Sci-Fi"], &["space", "scifi"])];
        assert_eq!(count_buckets(&games).get(VibeBucket::SciFi), 1);
    }

    #[test]
    fn winner_has_the_highest_count() {
        let games = [game(&["Cozy"], &["rpg"]), game(&[], &["rpg", "cozy"]), game(&["RPG"], &[])];
        let counts = count_buckets(&games);
        assert_eq!(counts.get(VibeBucket::Default), 0);
        assert_eq!(counts.get(VibeBucket::Cozy), 2);
        assert_eq!(counts.get(VibeBucket::Rpg), 3);
        assert_eq!(counts.winner(), VibeBucket::Rpg);
    }

    #[test]
    fn three_rpgs_win_rpg() {
        let games = [game(&[], &["rpg"]), game(&[], &["rpg"]), game(&[], &["rpg"])];
        let vibe = infer_vibe(&games);
        assert_eq!(vibe, VibeBucket::Rpg);
        assert_eq!(vibe.display_phrase(), "indie RPG");
    }

    #[test]
    fn ties_favor_earlier_bucket_regardless_of_game_order() {
        let rpg = game(&["RPG"], &[]);
        let cozy = game(&[], &["Wholesome"]);
        assert_eq!(infer_vibe(&[rpg.clone(), cozy.clone()]), VibeBucket::Cozy);
        assert_eq!(infer_vibe(&[cozy, rpg]), VibeBucket::Cozy);
    }

    #[test]
    fn strictly_greater_count_beats_earlier_bucket() {
        let games = [
            game(&["Horror"], &[]),
            game(&["Space"], &[]),
            game(&[], &["sci-fi"]),
        ];
        assert_eq!(infer_vibe(&games), VibeBucket::SciFi);
    }

    #[test]
    fn inference_is_deterministic() {
        let games = [game(&["Narrative"], &["cozy"]), game(&["RPG"], &["space"])];
        assert_eq!(infer_vibe(&games), infer_vibe(&games));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let games = [game(&["HORROR"], &[])];
        assert_eq!(infer_vibe(&games), VibeBucket::Horror);
    }

    #[test]
    fn phrase_round_trips_to_its_bucket() {
        for bucket in VibeBucket::NAMED {
            assert_eq!(VibeBucket::from_phrase(bucket.display_phrase()), bucket);
        }
        assert_eq!(VibeBucket::from_phrase("good-taste"), VibeBucket::Default);
        assert_eq!(VibeBucket::from_phrase(""), VibeBucket::Default);
    }

    #[test]
    fn phrase_precedence_prefers_horror_over_cozy() {
        assert_eq!(VibeBucket::from_phrase("Cozy HORROR nights"), VibeBucket::Horror);
        assert_eq!(VibeBucket::from_phrase("a Story about rpg"), VibeBucket::Rpg);
    }
}

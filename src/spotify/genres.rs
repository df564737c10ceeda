use std::{fmt, str::FromStr};

use rand::{Rng, seq::IndexedRandom};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const EASY_GENRES: &[&str] = &[
    "ambient",
    "chill-out",
    "acoustic",
    "classical",
    "piano",
    "lofi",
    "new age",
    "soundtrack",
];

const MEDIUM_GENRES: &[&str] = &[
    "jazz",
    "funk",
    "downtempo",
    "lounge",
    "fusion",
    "nu jazz",
    "electro jazz",
    "instrumental",
];

const HARD_GENRES: &[&str] = &[
    "techno",
    "trance",
    "minimal",
    "drum and bass",
    "idm",
    "deep house",
    "electronic",
    "synthwave",
];

/// How demanding the task the agent is about to work on is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "invalid difficulty '{other}', expected one of: easy, medium, hard"
            )),
        }
    }
}

/// Ordered genre palette of one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreSet {
    genres: &'static [&'static str],
}

impl GenreSet {
    pub fn as_slice(&self) -> &'static [&'static str] {
        self.genres
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> {
        self.genres.iter().copied()
    }

    /// Case-insensitive membership test against the literal tag spellings.
    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == tag)
    }

    /// True when at least one of `tags` is part of this palette.
    pub fn intersects<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|t| self.contains(t.as_ref()))
    }

    /// Picks a genre uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        // Every palette is a non-empty constant.
        self.genres.choose(rng).copied().unwrap_or_else(|| self.genres[0])
    }
}

/// Returns the genre palette played for `difficulty`.
///
/// Pure lookup over static palettes; every difficulty has a non-empty
/// palette and the three palettes are disjoint.
///
/// # Example
///
/// ```
/// let genres = genres_for(Difficulty::Hard);
/// assert!(genres.contains("Techno"));
/// ```
pub fn genres_for(difficulty: Difficulty) -> GenreSet {
    let genres = match difficulty {
        Difficulty::Easy => EASY_GENRES,
        Difficulty::Medium => MEDIUM_GENRES,
        Difficulty::Hard => HARD_GENRES,
    };
    GenreSet { genres }
}

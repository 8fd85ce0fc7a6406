//! Name normalization: turns sheet titles and labels into canonical,
//! length-bounded names that fit a target's filename rules.
//!
//! ```text
//! "The Great Giana Sisters"  →  "Great Giana Sisters"
//! "Impossible Mission II"    →  "Impossible Mission 2"
//! "Ghosts 'n Goblins"        →  "Ghosts N Goblins"
//! ```

use c64dreams_core::util::{char_count, truncate_chars};
use c64dreams_core::{Game, NormalizedGame, NormalizedName, NormalizedVariant, Region, TargetDevice};

/// Words dropped entirely from names.
const STOP_WORDS: &[&str] = &[
    "the", "of", "and", "a", "an", "for", "to", "in", "on", "at", "by", "with", "from",
];

/// Roman numerals folded to decimal, as (numeral, digits).
const ROMAN_NUMERALS: &[(&str, &str)] = &[
    ("i", "1"),
    ("ii", "2"),
    ("iii", "3"),
    ("iv", "4"),
    ("v", "5"),
    ("vi", "6"),
    ("vii", "7"),
    ("viii", "8"),
    ("ix", "9"),
    ("x", "10"),
];

/// Options controlling normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub target: TargetDevice,
    /// Explicit name length budget; 0 defers to the target profile
    pub max_name_len: usize,
}

impl NormalizeOptions {
    pub fn new(target: TargetDevice) -> Self {
        Self {
            target,
            max_name_len: 0,
        }
    }

    pub fn max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }

    /// The budget actually applied: the override when set, else the target's.
    pub fn effective_max_len(&self) -> usize {
        if self.max_name_len > 0 {
            self.max_name_len
        } else {
            self.target.profile().max_name_len
        }
    }
}

/// Normalize a single raw name.
///
/// Strips apostrophes and punctuation, folds Roman numerals, drops stop
/// words, title-cases what's left, then cuts to `max_len` characters when
/// `max_len > 0`. Never fails; input with nothing worth keeping gives an
/// empty name.
pub fn normalize_name(raw: &str, max_len: usize) -> NormalizedName {
    let without_apostrophes = raw.trim().replace('\'', "");
    let spaced = replace_punctuation(&without_apostrophes);

    let kept: Vec<String> = spaced
        .split_ascii_whitespace()
        .filter_map(|word| {
            let lower = word.to_ascii_lowercase();
            if let Some((_, digits)) = ROMAN_NUMERALS.iter().find(|(numeral, _)| *numeral == lower) {
                return Some(digits.to_string());
            }
            if STOP_WORDS.contains(&lower.as_str()) {
                return None;
            }
            Some(title_case(&lower))
        })
        .collect();

    let mut normalized = kept.join(" ");
    let mut truncated = false;
    if max_len > 0 && char_count(&normalized) > max_len {
        normalized = truncate_chars(&normalized, max_len).to_string();
        truncated = true;
    }

    NormalizedName {
        original: raw.to_string(),
        normalized,
        truncated,
        ..Default::default()
    }
}

/// Normalize a game and all of its variants for `options.target`.
///
/// Variants without their own region inherit the game's.
pub fn normalize_game(game: &Game, options: &NormalizeOptions) -> NormalizedGame {
    let max_len = options.effective_max_len();

    let variants = game
        .variants
        .iter()
        .map(|v| NormalizedVariant {
            label: normalize_name(&v.label, max_len),
            region: v.region.unwrap_or(game.region),
            preferred_target: v.preferred_target,
            content_type: v.content_type,
            source_path: v.source_path.clone(),
            notes: v.notes.clone(),
        })
        .collect();

    NormalizedGame {
        id: game.id.clone(),
        title: game.title.clone(),
        name: normalize_name(&game.title, max_len),
        region: game.region,
        target: options.target,
        variants,
    }
}

/// Normalize every game that passes the region filter, preserving order.
pub fn normalize_games(
    games: &[Game],
    region_filter: Region,
    options: &NormalizeOptions,
) -> Vec<NormalizedGame> {
    games
        .iter()
        .filter(|g| g.region.matches_filter(region_filter))
        .map(|g| normalize_game(g, options))
        .collect()
}

/// Replace every run of characters that isn't an ASCII letter, digit or
/// whitespace with a single space.
fn replace_punctuation(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c.is_ascii_whitespace() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push(' ');
            in_run = true;
        }
    }
    out
}

/// Upper-case the first character of an already lower-cased word.
fn title_case(lower: &str) -> String {
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;

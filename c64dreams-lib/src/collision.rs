//! Deterministic disambiguation of normalized names that collide.
//!
//! Names are grouped per (target, region, lower-cased name). Within a group
//! of two or more, the first name found keeps its value and every later one
//! gets a `~N` suffix, re-truncated so the suffixed name still fits the
//! length budget:
//!
//! ```text
//! "Impossible Missi"  →  "Impossible Missi"   (index 0)
//! "Impossible Missi"  →  "Impossible Mis~1"   (index 1)
//! "Impossible Missi"  →  "Impossible Mis~2"   (index 2)
//! ```

use std::collections::HashMap;

use c64dreams_core::util::{char_count, truncate_chars};
use c64dreams_core::{NormalizedGame, NormalizedName, Region, TargetDevice};

use crate::normalize::NormalizeOptions;

/// The scope within which two normalized names collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollisionKey {
    pub target: TargetDevice,
    pub region: Region,
    /// Lower-cased normalized name
    pub name: String,
}

impl CollisionKey {
    pub fn new(target: TargetDevice, region: Region, name: &str) -> Self {
        Self {
            target,
            region,
            name: name.to_lowercase(),
        }
    }
}

impl std::fmt::Display for CollisionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.target, self.region, self.name)
    }
}

/// Where a name lives inside the game list.
#[derive(Debug, Clone, Copy)]
enum NameSlot {
    Game(usize),
    Variant(usize, usize),
}

impl NameSlot {
    fn get_mut(self, games: &mut [NormalizedGame]) -> &mut NormalizedName {
        match self {
            Self::Game(g) => &mut games[g].name,
            Self::Variant(g, v) => &mut games[g].variants[v].label,
        }
    }
}

/// Resolve collisions using the budget from `options`.
pub fn resolve_collisions_for(games: &mut [NormalizedGame], options: &NormalizeOptions) {
    resolve_collisions(games, options.effective_max_len());
}

/// Mark and suffix colliding names in place.
///
/// Discovery order is games in slice order and, within a game, its own name
/// before its variant labels in listed order. Groups are kept as
/// insertion-ordered lists, so `collision_index` depends only on that order.
/// A `max_len` of 0 means unbounded: suffixes are appended without cutting.
pub fn resolve_collisions(games: &mut [NormalizedGame], max_len: usize) {
    let mut order: Vec<Vec<NameSlot>> = Vec::new();
    let mut positions: HashMap<CollisionKey, usize> = HashMap::new();

    let mut file = |key: CollisionKey, slot: NameSlot, name: &mut NormalizedName| {
        name.collision_group = key.to_string();
        let pos = *positions.entry(key).or_insert_with(|| {
            order.push(Vec::new());
            order.len() - 1
        });
        order[pos].push(slot);
    };

    for (gi, game) in games.iter_mut().enumerate() {
        let key = CollisionKey::new(game.target, game.region, &game.name.normalized);
        file(key, NameSlot::Game(gi), &mut game.name);

        for (vi, variant) in game.variants.iter_mut().enumerate() {
            let key = CollisionKey::new(game.target, variant.region, &variant.label.normalized);
            file(key, NameSlot::Variant(gi, vi), &mut variant.label);
        }
    }

    for group in order.iter().filter(|group| group.len() > 1) {
        log::debug!(
            "Collision group of {}: {}",
            group.len(),
            group[0].get_mut(games).collision_group
        );
        for (idx, slot) in group.iter().enumerate() {
            let name = slot.get_mut(games);
            name.collision = true;
            name.collision_index = idx;
            if idx > 0 {
                name.normalized = suffixed(&name.normalized, idx, max_len);
            }
        }
    }
}

/// Append `~idx` to `base`, cutting `base` first so the result fits `max_len`.
fn suffixed(base: &str, idx: usize, max_len: usize) -> String {
    let suffix = format!("~{}", idx);
    let base = if max_len > 0 {
        let safe_len = max_len.saturating_sub(char_count(&suffix));
        truncate_chars(base, safe_len)
    } else {
        base
    };
    format!("{}{}", base, suffix)
}

#[cfg(test)]
#[path = "tests/collision_tests.rs"]
mod tests;

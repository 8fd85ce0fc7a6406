//! Output layout planning.
//!
//! Turns normalized games into relative destination paths without touching
//! the filesystem:
//!
//! ```text
//! [base_dir]/[media group]/[alpha bucket]/<game dir>/<file name>
//! games/disks/j/jumpman/disk1.d64
//! ```

use serde::{Deserialize, Serialize};

use c64dreams_core::content::{clean_extension, media_group_for_extension};
use c64dreams_core::util::{sanitize_name, split_extension};
use c64dreams_core::{ContentType, NormalizedGame, NormalizedVariant, TargetDevice};

use crate::error::LayoutError;

/// Bucket size used when alphabetical grouping is on but no size was given.
const DEFAULT_ALPHA_BUCKET_SIZE: usize = 1;

/// How output paths are organized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Prefix for every path, cleaned and stripped of surrounding slashes
    pub base_dir: String,
    /// Insert a `disks`/`tape`/`cart` directory
    pub group_by_media: bool,
    /// Insert an alphabetical bucket directory
    pub group_by_alpha: bool,
    /// Letters per bucket in thirds of the alphabet; 0 means the default
    pub alpha_bucket_size: usize,
}

/// One variant placed at a relative output path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedFile {
    pub game_id: String,
    /// `{game_id}-{variant index}`
    pub variant_id: String,
    pub target: TargetDevice,
    /// Where the source is expected, relative to the input root
    pub source: Option<String>,
    /// The game's display title, used for fuzzy source lookup
    pub title: String,
    pub content_type: ContentType,
    /// Final destination, forward-slash separated and relative
    pub path: String,
}

/// Lay out every variant of every game, in input order.
///
/// Fails only when media grouping is requested and a variant's extension has
/// no media group; no partial plan is returned in that case.
pub fn plan(games: &[NormalizedGame], options: &LayoutOptions) -> Result<Vec<PlannedFile>, LayoutError> {
    let bucket_size = if options.alpha_bucket_size == 0 {
        DEFAULT_ALPHA_BUCKET_SIZE
    } else {
        options.alpha_bucket_size
    };
    let base_dir = clean_base_dir(&options.base_dir);

    let mut planned = Vec::new();

    for game in games {
        let game_dir = sanitize_name(&game.name.normalized);
        let bucket = options
            .group_by_alpha
            .then(|| alpha_bucket(&game.name.normalized, bucket_size));

        for (vi, variant) in game.variants.iter().enumerate() {
            let ext = variant.content_type.canonical_extension();
            let mut components: Vec<&str> = Vec::with_capacity(5);

            if !base_dir.is_empty() {
                components.push(&base_dir);
            }

            if options.group_by_media {
                let media = ext
                    .and_then(media_group_for_extension)
                    .ok_or_else(|| LayoutError::unknown_media(&game.id, ext.unwrap_or("")))?;
                components.push(media);
            }

            if let Some(bucket) = &bucket {
                components.push(bucket);
            }

            components.push(&game_dir);

            let file_name = file_name_for(variant, &game_dir);
            components.push(&file_name);

            planned.push(PlannedFile {
                game_id: game.id.clone(),
                variant_id: format!("{}-{}", game.id, vi),
                target: game.target,
                source: variant.source_path.clone(),
                title: game.title.clone(),
                content_type: variant.content_type,
                path: join_components(&components),
            });
        }
    }

    log::debug!("Planned {} files from {} games", planned.len(), games.len());
    Ok(planned)
}

/// Alphabetical bucket for a name.
///
/// Digits bucket under themselves, anything else that isn't a letter goes in
/// `misc`. With a bucket size above 1, letters are split into ranges keyed
/// on the second character (`a` when missing or not a letter), each range
/// `size * 3` letters wide: size 2 puts "Alpha" in `ag-al`.
pub fn alpha_bucket(name: &str, size: usize) -> String {
    let clean = name.trim().to_lowercase();
    let mut chars = clean.chars();

    let first = match chars.next() {
        Some(c) if c.is_ascii_digit() => return c.to_string(),
        Some(c) if c.is_ascii_lowercase() => c,
        _ => return "misc".to_string(),
    };

    if size <= 1 {
        return first.to_string();
    }

    let second = chars
        .next()
        .filter(|c| c.is_ascii_lowercase())
        .unwrap_or('a');

    let group_size = size.saturating_mul(3);
    let idx = (second as usize - 'a' as usize) / group_size;
    let start = idx * group_size;
    let end = start.saturating_add(group_size - 1).min(25);

    format!(
        "{first}{}-{first}{}",
        letter_at(start),
        letter_at(end),
    )
}

/// Output file name for a variant: sanitized source base name (or label),
/// with the content type's canonical extension.
fn file_name_for(variant: &NormalizedVariant, game_dir: &str) -> String {
    let canonical = variant.content_type.canonical_extension();

    let stem = match variant.source_path.as_deref().and_then(base_name) {
        Some(base) => {
            let (stem, ext) = split_extension(base);
            match ext {
                Some(ext) if is_own_extension(variant.content_type, ext) => stem,
                _ => base,
            }
        }
        None => variant.label.normalized.as_str(),
    };

    let mut name = sanitize_name(stem);
    if name.is_empty() {
        name = game_dir.to_string();
    }

    match canonical {
        Some(ext) if !name.ends_with(&format!(".{}", ext)) => format!("{}.{}", name, ext),
        _ => name,
    }
}

/// Whether `ext` is the canonical extension or an alias of `content_type`.
fn is_own_extension(content_type: ContentType, ext: &str) -> bool {
    let ext = clean_extension(ext);
    content_type.canonical_extension() == Some(ext.as_str())
        || content_type.aliases().contains(&ext.as_str())
}

/// Last non-empty segment of a slash- or backslash-separated path.
fn base_name(path: &str) -> Option<&str> {
    path.rsplit(['/', '\\']).find(|s| !s.trim().is_empty())
}

/// Clean a base directory lexically and strip surrounding slashes.
///
/// In a rooted base (`/games`) leading `..` segments are dropped. In a
/// relative one they are kept, not clamped, so that an escaping base
/// directory is caught when the plan is applied.
fn clean_base_dir(base: &str) -> String {
    let rooted = base.starts_with(['/', '\\']);
    let mut parts: Vec<&str> = Vec::new();
    for segment in base.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." if parts.last().is_some_and(|last| *last != "..") => {
                parts.pop();
            }
            // nothing above the root to climb to
            ".." if rooted && parts.is_empty() => {}
            other => parts.push(other),
        }
    }
    parts.join("/")
}

fn join_components(components: &[&str]) -> String {
    components
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

fn letter_at(offset: usize) -> char {
    char::from(b'a' + offset as u8)
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;

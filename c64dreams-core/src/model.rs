//! Game and variant records, raw and normalized.

use serde::{Deserialize, Serialize};

use crate::{ContentType, Region, TargetDevice};

/// A title as read from the metadata sheet, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Stable identifier derived from the title
    pub id: String,
    /// Display title exactly as the sheet has it
    pub title: String,
    pub region: Region,
    pub variants: Vec<Variant>,
}

/// One playable build of a game (disk version, tape version, a crack...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Human-friendly label like "Disk", "Tape" or crack info
    pub label: String,
    /// Variant-specific region; `None` inherits the game's
    pub region: Option<Region>,
    pub preferred_target: TargetDevice,
    pub content_type: ContentType,
    /// Best-guess path of the source file, relative to the input root
    pub source_path: Option<String>,
    /// Free-form notes collected from the sheet
    pub notes: String,
}

/// Result of normalizing one name, plus the collision bookkeeping added
/// by the collision pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedName {
    pub original: String,
    pub normalized: String,
    /// The name was cut to fit the length budget
    pub truncated: bool,
    /// Another name shares this name's collision group
    pub collision: bool,
    /// Key of the group this name was filed under (empty until resolved)
    pub collision_group: String,
    /// Position within the group; 0 is the canonical, unsuffixed entry
    pub collision_index: usize,
}

/// A variant ready for layout decisions, without filesystem details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedVariant {
    pub label: NormalizedName,
    pub region: Region,
    pub preferred_target: TargetDevice,
    pub content_type: ContentType,
    pub source_path: Option<String>,
    pub notes: String,
}

/// A game normalized for one hardware target.
///
/// Owns its name and variants outright; nothing is shared between games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedGame {
    pub id: String,
    pub title: String,
    pub name: NormalizedName,
    pub region: Region,
    pub target: TargetDevice,
    pub variants: Vec<NormalizedVariant>,
}

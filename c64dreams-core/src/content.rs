//! Storage-medium classification and the extension tables that hang off it.
//!
//! All tables here are fixed at compile time. Extensions are always compared
//! lower-case and without a leading dot.

use serde::{Deserialize, Serialize};

/// Every extension the tool recognizes as part of a C64 collection.
///
/// Used for sibling discovery, directory sources and input scans.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[
    "d64", "d71", "d81", "g64", "tap", "t64", "crt", "ef", "prg", "zip",
];

/// Storage medium a variant ships on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Unknown,
    /// Floppy disk images (1541/1571/1581, GCR)
    Disk,
    /// Datasette images
    Tape,
    /// Cartridge images, including EasyFlash
    Cart,
    /// Single program files
    Prg,
    /// Zip archives
    Zip,
}

impl ContentType {
    /// Classify the free-text "Type" column of the metadata sheet.
    ///
    /// Anything not in the table is [`ContentType::Unknown`].
    pub fn from_type_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "d64" | "d71" | "d81" | "d1m" | "g64" => Self::Disk,
            "t64" | "tap" => Self::Tape,
            "prg" => Self::Prg,
            "crt" | "ef" | "easyflash" => Self::Cart,
            "zip" => Self::Zip,
            _ => Self::Unknown,
        }
    }

    /// Lower-case name used in serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Disk => "disk",
            Self::Tape => "tape",
            Self::Cart => "cart",
            Self::Prg => "prg",
            Self::Zip => "zip",
        }
    }

    /// The extension output files of this type are written with.
    pub fn canonical_extension(&self) -> Option<&'static str> {
        match self {
            Self::Disk => Some("d64"),
            Self::Tape => Some("tap"),
            Self::Cart => Some("crt"),
            Self::Prg => Some("prg"),
            Self::Zip => Some("zip"),
            Self::Unknown => None,
        }
    }

    /// Every extension a source file of this type may carry.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Disk => &["d64", "d71", "d81", "g64"],
            Self::Tape => &["tap", "t64"],
            Self::Cart => &["crt", "ef"],
            Self::Prg => &["prg"],
            Self::Zip => &["zip"],
            Self::Unknown => &[],
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Media-group directory for an extension, if it belongs to one.
///
/// Accepts the extension with or without a leading dot, in any case.
pub fn media_group_for_extension(ext: &str) -> Option<&'static str> {
    match clean_extension(ext).as_str() {
        "d64" | "d71" | "d81" | "g64" => Some("disks"),
        "tap" | "t64" => Some("tape"),
        "crt" => Some("cart"),
        _ => None,
    }
}

/// Whether `ext` is in [`RECOGNIZED_EXTENSIONS`].
pub fn is_recognized_extension(ext: &str) -> bool {
    let clean = clean_extension(ext);
    RECOGNIZED_EXTENSIONS.contains(&clean.as_str())
}

/// Lower-case an extension and strip surrounding whitespace and a leading dot.
pub fn clean_extension(ext: &str) -> String {
    let trimmed = ext.trim();
    trimmed
        .strip_prefix('.')
        .unwrap_or(trimmed)
        .to_lowercase()
}

#[cfg(test)]
#[path = "tests/content_tests.rs"]
mod tests;

//! Fuzzy source lookup for planned files whose source hint doesn't exist.
//!
//! The input tree is indexed once, then an ordered list of finders is tried
//! until one produces a candidate. Each finder is a plain function over the
//! index and the hints, and returns the lexicographically smallest match.

use std::io;
use std::path::{Path, PathBuf};

use c64dreams_core::content::clean_extension;
use c64dreams_core::util::{slug, slug_matches, split_extension};

use crate::layout::PlannedFile;

/// Every directory and file under an input root, sorted.
///
/// The root itself is not listed among the directories.
#[derive(Debug, Default, Clone)]
pub struct SourceIndex {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl SourceIndex {
    /// Walk `root` recursively. A missing root yields an empty index.
    pub fn build(root: &Path) -> io::Result<Self> {
        let mut index = Self::default();
        if root.is_dir() {
            index.walk(root)?;
        }
        index.dirs.sort();
        index.files.sort();
        log::debug!(
            "Indexed {} directories and {} files under {}",
            index.dirs.len(),
            index.files.len(),
            root.display()
        );
        Ok(index)
    }

    fn walk(&mut self, dir: &Path) -> io::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                self.dirs.push(path.clone());
                self.walk(&path)?;
            } else {
                self.files.push(path);
            }
        }
        Ok(())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Files directly inside `dir`, in sorted order.
    fn files_in<'a>(&'a self, dir: &'a Path) -> impl Iterator<Item = &'a PathBuf> + 'a {
        self.files.iter().filter(move |f| f.parent() == Some(dir))
    }
}

/// Everything the finders know about the file they're looking for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceHints {
    /// Base name of the planned destination's parent directory
    pub planned_dir: String,
    /// Base name of the source hint (or of the planned path when no hint)
    pub expected_name: String,
    pub dir_slug: String,
    pub title_slug: String,
    /// Slug of the source hint's stem
    pub file_slug: String,
    /// Slug of the planned destination's stem
    pub planned_slug: String,
    /// Lower-cased extensions acceptable for this content type
    pub allowed_extensions: Vec<String>,
}

impl SourceHints {
    /// Derive hints from a planned file and its relative source hint.
    pub fn new(planned: &PlannedFile, source_rel: &str) -> Self {
        let planned_name = last_segment(&planned.path);
        let planned_dir = parent_segment(&planned.path);
        let expected_name = last_segment(source_rel);

        let (planned_stem, planned_ext) = split_extension(planned_name);
        let (source_stem, _) = split_extension(expected_name);

        let mut allowed: Vec<String> = planned
            .content_type
            .aliases()
            .iter()
            .map(|ext| ext.to_string())
            .collect();
        if let Some(ext) = planned_ext {
            let ext = clean_extension(ext);
            if !allowed.contains(&ext) {
                allowed.push(ext);
            }
        }
        allowed.sort();

        Self {
            planned_dir: planned_dir.to_string(),
            expected_name: expected_name.to_string(),
            dir_slug: slug(planned_dir),
            title_slug: slug(&planned.title),
            file_slug: slug(source_stem),
            planned_slug: slug(planned_stem),
            allowed_extensions: allowed,
        }
    }

    fn allows(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(clean_extension)
            .unwrap_or_default();
        self.allowed_extensions.contains(&ext)
    }
}

/// A single lookup strategy.
pub type Finder = fn(&SourceIndex, &SourceHints) -> Option<PathBuf>;

/// The lookup cascade, in the order it is tried.
pub const FINDERS: &[(&str, Finder)] = &[
    ("slug directory", find_in_slug_dir),
    ("matching directory", find_in_matching_dir),
    ("case-insensitive name", find_by_name),
    ("case-insensitive stem", find_by_stem),
    ("slug anywhere", find_by_slug),
    ("extension anywhere", find_by_extension),
];

/// Run the cascade; returns the first hit along with the finder's name.
pub fn resolve(index: &SourceIndex, hints: &SourceHints) -> Option<(&'static str, PathBuf)> {
    for &(name, finder) in FINDERS {
        match finder(index, hints) {
            Some(path) => {
                log::debug!("{}: found {}", name, path.display());
                return Some((name, path));
            }
            None => log::debug!("{}: no match for '{}'", name, hints.expected_name),
        }
    }
    None
}

/// Files in directories whose slug matches the game's directory or title.
///
/// Prefers files whose stem slug matches the source or planned stem; falls
/// back to any allowed file in those directories.
pub fn find_in_slug_dir(index: &SourceIndex, hints: &SourceHints) -> Option<PathBuf> {
    let dir_slugs = [hints.dir_slug.as_str(), hints.title_slug.as_str()];
    let file_slugs = [hints.file_slug.as_str(), hints.planned_slug.as_str()];

    let mut by_name: Option<&PathBuf> = None;
    let mut by_ext: Option<&PathBuf> = None;

    for dir in index.dirs() {
        if !slug_matches(&slug(&file_name(dir)), &dir_slugs) {
            continue;
        }
        for file in index.files_in(dir).filter(|f| hints.allows(f)) {
            let slot = if slug_matches(&stem_slug(file), &file_slugs) {
                &mut by_name
            } else {
                &mut by_ext
            };
            keep_smallest(slot, file);
        }
    }

    by_name.or(by_ext).cloned()
}

/// Allowed files in any directory named like the planned parent directory.
pub fn find_in_matching_dir(index: &SourceIndex, hints: &SourceHints) -> Option<PathBuf> {
    if hints.planned_dir.is_empty() {
        return None;
    }
    let mut found: Option<&PathBuf> = None;
    for dir in index.dirs() {
        if !file_name(dir).eq_ignore_ascii_case(&hints.planned_dir) {
            continue;
        }
        for file in index.files_in(dir).filter(|f| hints.allows(f)) {
            keep_smallest(&mut found, file);
        }
    }
    found.cloned()
}

/// Files named exactly like the expected name, ignoring case.
pub fn find_by_name(index: &SourceIndex, hints: &SourceHints) -> Option<PathBuf> {
    if hints.expected_name.is_empty() {
        return None;
    }
    smallest(
        index
            .files()
            .iter()
            .filter(|f| file_name(f).eq_ignore_ascii_case(&hints.expected_name)),
    )
}

/// Files whose stem equals the expected stem, ignoring case and extension.
pub fn find_by_stem(index: &SourceIndex, hints: &SourceHints) -> Option<PathBuf> {
    let (expected, _) = split_extension(&hints.expected_name);
    if expected.is_empty() {
        return None;
    }
    smallest(index.files().iter().filter(|f| {
        let name = file_name(f);
        split_extension(&name).0.eq_ignore_ascii_case(expected)
    }))
}

/// Allowed files anywhere whose stem slug matches the title, source or
/// planned stem.
pub fn find_by_slug(index: &SourceIndex, hints: &SourceHints) -> Option<PathBuf> {
    let slugs = [
        hints.title_slug.as_str(),
        hints.file_slug.as_str(),
        hints.planned_slug.as_str(),
    ];
    smallest(
        index
            .files()
            .iter()
            .filter(|f| hints.allows(f) && slug_matches(&stem_slug(f), &slugs)),
    )
}

/// Any allowed file anywhere.
pub fn find_by_extension(index: &SourceIndex, hints: &SourceHints) -> Option<PathBuf> {
    smallest(index.files().iter().filter(|f| hints.allows(f)))
}

fn smallest<'a>(candidates: impl Iterator<Item = &'a PathBuf>) -> Option<PathBuf> {
    candidates.min().cloned()
}

fn keep_smallest<'a>(slot: &mut Option<&'a PathBuf>, candidate: &'a PathBuf) {
    if slot.is_none_or(|current| candidate < current) {
        *slot = Some(candidate);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn stem_slug(path: &Path) -> String {
    let name = file_name(path);
    slug(split_extension(&name).0)
}

fn last_segment(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or("")
}

fn parent_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(idx) => last_segment(&trimmed[..idx]),
        None => "",
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;

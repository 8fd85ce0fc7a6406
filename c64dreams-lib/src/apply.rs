//! Executes a planned layout against the filesystem.
//!
//! Entries are validated up front, then processed in destination order.
//! Mutation is limited to creating directories and copying files; nothing is
//! ever deleted. Any failure stops the run, but the results gathered so far
//! are always returned alongside the error.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use c64dreams_core::content::is_recognized_extension;
use c64dreams_core::util::sanitize_file_name;

use crate::error::ApplyError;
use crate::layout::PlannedFile;
use crate::progress::ApplyProgress;
use crate::resolver::{self, SourceHints, SourceIndex};

/// Where to read from, where to write to, and how careful to be.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    /// Report what would happen without touching the output tree
    pub dry_run: bool,
    /// Replace existing destination files instead of skipping them
    pub overwrite: bool,
    /// Resolve sources only; every copy is reported as a skip
    pub verify_only: bool,
}

impl ApplyOptions {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            ..Default::default()
        }
    }

    fn writes_nothing(&self) -> bool {
        self.dry_run || self.verify_only
    }
}

/// What happened (or would happen) for one filesystem operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyAction {
    Copy,
    Skip,
    Mkdir,
    Error,
}

impl ApplyAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Skip => "skip",
            Self::Mkdir => "mkdir",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ApplyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One attempted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub action: ApplyAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApplyResult {
    fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>, action: ApplyAction) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            action,
            error: None,
        }
    }
}

/// Everything an apply run produced.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Results in processing order
    pub results: Vec<ApplyResult>,
    /// The fatal error that stopped the run, if any
    pub error: Option<ApplyError>,
}

impl ApplyReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Number of results with the given action.
    pub fn count(&self, action: ApplyAction) -> usize {
        self.results.iter().filter(|r| r.action == action).count()
    }

    /// Drop the partial results on failure.
    pub fn into_result(self) -> Result<Vec<ApplyResult>, ApplyError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.results),
        }
    }
}

/// Apply `planned` without progress reporting.
pub fn apply(planned: &[PlannedFile], options: &ApplyOptions) -> ApplyReport {
    apply_with_progress(planned, options, &|_| {})
}

/// Apply `planned`, reporting progress through `progress`.
pub fn apply_with_progress(
    planned: &[PlannedFile],
    options: &ApplyOptions,
    progress: &dyn Fn(ApplyProgress),
) -> ApplyReport {
    let mut report = ApplyReport::default();
    if let Err(err) = run(planned, options, progress, &mut report.results) {
        log::error!("Apply stopped: {}", err);
        report.error = Some(err);
    }
    report
}

/// A planned file with its paths checked and resolved.
struct Entry<'a> {
    planned: &'a PlannedFile,
    dest: PathBuf,
    source_rel: String,
}

fn run(
    planned: &[PlannedFile],
    options: &ApplyOptions,
    progress: &dyn Fn(ApplyProgress),
    results: &mut Vec<ApplyResult>,
) -> Result<(), ApplyError> {
    if options.output_root.as_os_str().is_empty() {
        return Err(ApplyError::MissingOutputRoot);
    }
    let output_root = std::path::absolute(&options.output_root)
        .map_err(|e| ApplyError::io("resolve output root", &options.output_root, e))?;
    check_roots(&options.input_root, &output_root)?;

    let mut sorted: Vec<&PlannedFile> = planned.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    // Nothing is touched until every entry has passed validation.
    let mut entries = Vec::with_capacity(sorted.len());
    for p in sorted {
        match validate(p, &output_root) {
            Ok(entry) => entries.push(entry),
            Err(err) => return Err(fail(results, p.source.as_deref().unwrap_or(""), &p.path, err)),
        }
    }

    let total = entries.len();
    progress(ApplyProgress::Started { total });

    let mut index: Option<SourceIndex> = None;

    for (i, entry) in entries.iter().enumerate() {
        progress(ApplyProgress::entry(i + 1, total, &entry.planned.path));
        apply_entry(entry, options, &mut index, progress, results)?;
    }

    let copied = results.iter().filter(|r| r.action == ApplyAction::Copy).count();
    let skipped = results.iter().filter(|r| r.action == ApplyAction::Skip).count();
    log::debug!("Applied {} entries: {} copied, {} skipped", total, copied, skipped);
    progress(ApplyProgress::Completed { copied, skipped });

    Ok(())
}

/// Refuse an output tree that overlaps the input: copies would land on their
/// own sources, and the lazily built index would pick up earlier copies.
fn check_roots(input_root: &Path, output_root: &Path) -> Result<(), ApplyError> {
    if input_root.as_os_str().is_empty() {
        return Ok(());
    }
    let input = std::path::absolute(input_root)
        .map_err(|e| ApplyError::io("resolve input root", input_root, e))?;
    let input = resolve_root(&input);
    let output = resolve_root(output_root);
    if output.starts_with(&input) {
        return Err(ApplyError::OutputInsideInput { input, output });
    }
    Ok(())
}

/// Canonical form of an absolute `path`, resolved through its deepest
/// existing ancestor so a root that doesn't exist yet still compares.
fn resolve_root(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = fs::canonicalize(existing) {
            return rest.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name);
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

fn validate<'a>(planned: &'a PlannedFile, output_root: &Path) -> Result<Entry<'a>, ApplyError> {
    let dest_rel = &planned.path;
    if is_absolute(dest_rel) {
        return Err(ApplyError::AbsoluteDestination(dest_rel.clone()));
    }
    let segments = clean_segments(dest_rel)
        .ok_or_else(|| ApplyError::EscapesOutputRoot(dest_rel.clone()))?;
    if segments.is_empty() {
        return Err(ApplyError::EmptyDestination);
    }
    let dest = segments.iter().fold(output_root.to_path_buf(), |acc, s| acc.join(s));

    let source_rel = match planned.source.as_deref() {
        Some(source) if !source.trim().is_empty() => source,
        _ => dest_rel.as_str(),
    };
    if is_absolute(source_rel) {
        return Err(ApplyError::AbsoluteSource(source_rel.to_string()));
    }
    let source_rel = clean_lexically(source_rel);

    Ok(Entry {
        planned,
        dest,
        source_rel,
    })
}

fn apply_entry(
    entry: &Entry<'_>,
    options: &ApplyOptions,
    index: &mut Option<SourceIndex>,
    progress: &dyn Fn(ApplyProgress),
    results: &mut Vec<ApplyResult>,
) -> Result<(), ApplyError> {
    let source = options.input_root.join(&entry.source_rel);
    let dest_dir = entry.dest.parent().unwrap_or(&entry.dest).to_path_buf();

    if options.writes_nothing() {
        results.push(ApplyResult::new(&source, &dest_dir, ApplyAction::Mkdir));
    } else if let Err(e) = fs::create_dir_all(&dest_dir) {
        return Err(fail(results, &source, &entry.dest, ApplyError::io("mkdir", &dest_dir, e)));
    }

    let (source, meta) = match fs::metadata(&source) {
        Ok(meta) => (source, meta),
        Err(_) => {
            let index = source_index(index, &options.input_root)?;
            let hints = SourceHints::new(entry.planned, &entry.source_rel);
            let Some((finder, found)) = resolver::resolve(index, &hints) else {
                let err = ApplyError::SourceMissing(source.clone());
                return Err(fail(results, &source, &entry.dest, err));
            };
            log::debug!(
                "Source for {} located by {}: {}",
                entry.planned.path,
                finder,
                found.display()
            );
            progress(ApplyProgress::Resolved {
                finder,
                source: found.display().to_string(),
            });
            match fs::metadata(&found) {
                Ok(meta) => (found, meta),
                Err(e) => {
                    let err = ApplyError::io("stat source", &found, e);
                    return Err(fail(results, &found, &entry.dest, err));
                }
            }
        }
    };

    let copies = if meta.is_dir() {
        let files = recognized_files_in(&source)
            .map_err(|e| ApplyError::io("read source directory", &source, e))?;
        if files.is_empty() {
            let err = ApplyError::EmptySourceDirectory(source.clone());
            return Err(fail(results, &source, &entry.dest, err));
        }
        files
            .into_iter()
            .map(|f| {
                let dest = dest_dir.join(sanitized_name(&f));
                (f, dest)
            })
            .collect()
    } else {
        with_siblings(&source, &entry.dest, &dest_dir)
    };

    for (src, dest) in copies {
        copy_one(&src, &dest, options, results)?;
    }

    Ok(())
}

/// The primary file plus every recognized file next to it, each source
/// listed once. Siblings land in the destination directory under their
/// sanitized names.
fn with_siblings(source: &Path, dest: &Path, dest_dir: &Path) -> Vec<(PathBuf, PathBuf)> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut copies = vec![(source.to_path_buf(), dest.to_path_buf())];
    seen.insert(source.to_path_buf());

    for sibling in sibling_files(source) {
        if seen.insert(sibling.clone()) {
            let sibling_dest = dest_dir.join(sanitized_name(&sibling));
            copies.push((sibling, sibling_dest));
        }
    }
    copies
}

/// Recognized files next to `source`. An unreadable parent gives none.
fn sibling_files(source: &Path) -> Vec<PathBuf> {
    let Some(parent) = source.parent() else {
        return Vec::new();
    };
    match recognized_files_in(parent) {
        Ok(files) => files,
        Err(e) => {
            log::warn!("Cannot list companions of {}: {}", source.display(), e);
            Vec::new()
        }
    }
}

fn copy_one(
    source: &Path,
    dest: &Path,
    options: &ApplyOptions,
    results: &mut Vec<ApplyResult>,
) -> Result<(), ApplyError> {
    if options.verify_only {
        results.push(ApplyResult::new(source, dest, ApplyAction::Skip));
        return Ok(());
    }

    if let Ok(meta) = fs::metadata(dest) {
        if meta.is_dir() {
            let err = ApplyError::DestinationIsDirectory(dest.to_path_buf());
            return Err(fail(results, source, dest, err));
        }
        if is_same_file(source, dest) {
            log::debug!("{} is its own source, skipping", dest.display());
            results.push(ApplyResult::new(source, dest, ApplyAction::Skip));
            return Ok(());
        }
        if !options.overwrite {
            log::debug!("Skipping existing {}", dest.display());
            results.push(ApplyResult::new(source, dest, ApplyAction::Skip));
            return Ok(());
        }
    }

    if !options.dry_run {
        if let Err(err) = copy_file(source, dest) {
            return Err(fail(results, source, dest, err));
        }
        log::debug!("Copied {} -> {}", source.display(), dest.display());
    }
    results.push(ApplyResult::new(source, dest, ApplyAction::Copy));
    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    matches!((fs::canonicalize(a), fs::canonicalize(b)), (Ok(a), Ok(b)) if a == b)
}

fn copy_file(source: &Path, dest: &Path) -> Result<(), ApplyError> {
    let mut reader = File::open(source).map_err(|e| ApplyError::io("open source", source, e))?;
    let mut writer = File::create(dest).map_err(|e| ApplyError::io("create destination", dest, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| ApplyError::io("copy", dest, e))?;
    Ok(())
}

/// Build the input index on first use.
fn source_index<'a>(
    slot: &'a mut Option<SourceIndex>,
    input_root: &Path,
) -> Result<&'a SourceIndex, ApplyError> {
    let index = match slot.take() {
        Some(index) => index,
        None => SourceIndex::build(input_root)
            .map_err(|e| ApplyError::io("index input", input_root, e))?,
    };
    Ok(slot.insert(index))
}

/// Files directly inside `dir` with a recognized extension, sorted.
fn recognized_files_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let path = entry.path();
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(is_recognized_extension);
        if recognized {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn sanitized_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_file_name(&name)
}

/// Record an error result and hand the error back for propagation.
fn fail(
    results: &mut Vec<ApplyResult>,
    source: impl Into<PathBuf>,
    dest: impl Into<PathBuf>,
    err: ApplyError,
) -> ApplyError {
    let mut result = ApplyResult::new(source, dest, ApplyAction::Error);
    result.error = Some(err.to_string());
    results.push(result);
    err
}

fn is_absolute(rel: &str) -> bool {
    rel.starts_with(['/', '\\']) || Path::new(rel).is_absolute()
}

/// Relative path segments with `.` dropped and `..` collapsed, or `None`
/// when a `..` would climb above the starting point.
fn clean_segments(rel: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in rel.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments)
}

/// Lexically cleaned relative path, keeping leading `..` segments.
fn clean_lexically(rel: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in rel.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." if segments.last().is_some_and(|last| *last != "..") => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
#[path = "tests/apply_tests.rs"]
mod tests;

//! Input tree scanner.
//!
//! Lists every file under the input root that carries a recognized C64
//! extension. Used by the CLI `scan` command.

use serde::{Deserialize, Serialize};
use std::path::Path;

use c64dreams_core::content::{clean_extension, is_recognized_extension};

/// A recognized file found under the input root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Slash-separated path relative to the scanned root
    pub path: String,
    /// Lower-cased extension without the dot
    pub ext: String,
}

/// Walk `root` recursively and return its recognized files, sorted by path.
pub fn scan_input(root: &Path) -> std::io::Result<Vec<ScannedFile>> {
    let mut files = Vec::new();
    walk(root, root, &mut files)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!("Scanned {}: {} recognized files", root.display(), files.len());
    Ok(files)
}

fn walk(root: &Path, dir: &Path, files: &mut Vec<ScannedFile>) -> std::io::Result<()> {
    let mut entries: Vec<std::fs::DirEntry> = std::fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk(root, &path, files)?;
            continue;
        }

        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !is_recognized_extension(ext) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(&path);
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        files.push(ScannedFile {
            path: rel,
            ext: clean_extension(ext),
        });
    }

    Ok(())
}

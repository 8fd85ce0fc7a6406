use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort layout planning.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Media grouping was requested for a variant whose extension has no group
    #[error("no media group for extension '{extension}' (game '{game_id}')")]
    UnknownMediaGroup { game_id: String, extension: String },
}

impl LayoutError {
    pub fn unknown_media(game_id: impl Into<String>, extension: impl Into<String>) -> Self {
        Self::UnknownMediaGroup {
            game_id: game_id.into(),
            extension: extension.into(),
        }
    }
}

/// Errors that abort an apply run.
///
/// Every variant is fatal for the whole run; results gathered before the
/// failure are still returned alongside it.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// No output root was given
    #[error("output root is required")]
    MissingOutputRoot,

    /// Output root is the input root or lies inside it
    #[error("output root {} is inside input root {}", .output.display(), .input.display())]
    OutputInsideInput { input: PathBuf, output: PathBuf },

    /// Planned destination is an absolute path
    #[error("destination path must be relative: {0}")]
    AbsoluteDestination(String),

    /// Planned destination resolves outside the output root
    #[error("destination escapes output root: {0}")]
    EscapesOutputRoot(String),

    /// Planned destination has no path components at all
    #[error("destination path is empty")]
    EmptyDestination,

    /// Source hint is an absolute path
    #[error("source path must be relative: {0}")]
    AbsoluteSource(String),

    /// Neither the direct path nor any fallback search found a source
    #[error("source missing: {}", .0.display())]
    SourceMissing(PathBuf),

    /// A directory source holds no recognized files
    #[error("no files in {} match recognized extensions", .0.display())]
    EmptySourceDirectory(PathBuf),

    /// Something other than a file sits at the destination
    #[error("destination is directory: {}", .0.display())]
    DestinationIsDirectory(PathBuf),

    /// Filesystem failure, with what was being attempted
    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApplyError {
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

/// Errors while reading the metadata spreadsheet.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("open csv {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors while loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

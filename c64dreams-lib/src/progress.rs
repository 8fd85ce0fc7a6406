/// Progress update sent while a plan is applied.
///
/// Delivered through a `&dyn Fn(ApplyProgress)` callback so the CLI can
/// drive a spinner without the library knowing about terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyProgress {
    /// Validation passed, entries are about to be processed
    Started {
        /// Number of planned entries
        total: usize,
    },

    /// Working on one planned entry
    Entry {
        /// 1-based position in destination order
        current: usize,
        total: usize,
        /// Planned relative destination
        path: String,
    },

    /// The source hint was missing and a fallback finder located one
    Resolved {
        /// Name of the finder that matched
        finder: &'static str,
        /// Where the source was found
        source: String,
    },

    /// Every entry was processed
    Completed {
        copied: usize,
        skipped: usize,
    },
}

impl ApplyProgress {
    pub fn entry(current: usize, total: usize, path: impl Into<String>) -> Self {
        Self::Entry {
            current,
            total,
            path: path.into(),
        }
    }

    /// Fraction of entries handled so far (0.0 to 1.0), if known.
    pub fn percentage(&self) -> Option<f64> {
        match self {
            Self::Entry { current, total, .. } if *total > 0 => {
                Some(*current as f64 / *total as f64)
            }
            Self::Completed { .. } => Some(1.0),
            _ => None,
        }
    }
}

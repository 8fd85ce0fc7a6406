use thiserror::Error;

/// A string that doesn't name a supported hardware target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown target device: '{0}'")]
pub struct TargetParseError(pub String);

/// A string that isn't one of `pal`, `ntsc` or `both`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region: '{0}' (expected pal, ntsc, or both)")]
pub struct RegionParseError(pub String);


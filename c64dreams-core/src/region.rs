use serde::{Deserialize, Serialize};

/// Television standard a title supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// PAL (Europe, Australia)
    Pal,
    /// NTSC (North America, Japan)
    Ntsc,
    /// Runs equally well on PAL and NTSC machines
    #[default]
    Both,
}

impl Region {
    /// Returns the lower-case code used in flags, keys and serialized output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pal => "pal",
            Self::Ntsc => "ntsc",
            Self::Both => "both",
        }
    }

    /// Returns the display name of this region.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pal => "PAL",
            Self::Ntsc => "NTSC",
            Self::Both => "PAL/NTSC",
        }
    }

    /// Whether a title released for `self` should be kept under `filter`.
    ///
    /// A `Both` filter keeps everything; a `Pal` or `Ntsc` filter keeps
    /// titles for that standard plus titles that run on both.
    pub fn matches_filter(&self, filter: Region) -> bool {
        match filter {
            Self::Both => true,
            other => *self == other || *self == Self::Both,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Region {
    type Err = crate::error::RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pal" => Ok(Self::Pal),
            "ntsc" => Ok(Self::Ntsc),
            "both" => Ok(Self::Both),
            _ => Err(crate::error::RegionParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_known_codes() {
        assert_eq!("pal".parse::<Region>().unwrap(), Region::Pal);
        assert_eq!("NTSC".parse::<Region>().unwrap(), Region::Ntsc);
        assert_eq!(" both ".parse::<Region>().unwrap(), Region::Both);
        assert!("secam".parse::<Region>().is_err());
    }

    #[test]
    fn test_filter_semantics() {
        assert!(Region::Pal.matches_filter(Region::Both));
        assert!(Region::Ntsc.matches_filter(Region::Both));
        assert!(Region::Pal.matches_filter(Region::Pal));
        assert!(Region::Both.matches_filter(Region::Pal));
        assert!(!Region::Ntsc.matches_filter(Region::Pal));
        assert!(!Region::Pal.matches_filter(Region::Ntsc));
    }

    #[test]
    fn test_names() {
        assert_eq!(Region::Pal.name(), "PAL");
        assert_eq!(Region::Both.name(), "PAL/NTSC");
    }
}

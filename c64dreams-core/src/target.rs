use serde::{Deserialize, Serialize};

/// Hardware targets the collection can be laid out for.
///
/// Each target carries a [`TargetProfile`] describing its filename
/// constraints, so name normalization never has to special-case devices.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TargetDevice {
    /// SD2IEC: SD card adapter speaking Commodore DOS
    #[default]
    Sd2iec,
    /// Pi1541: Raspberry Pi 1541 drive emulator
    Pi1541,
    /// Kung Fu Flash cartridge
    KungFuFlash,
    /// Ultimate 64 / Ultimate-II+
    Ultimate,
}

/// All targets in registration order.
const ALL_TARGETS: &[TargetDevice] = &[
    TargetDevice::Sd2iec,
    TargetDevice::Pi1541,
    TargetDevice::KungFuFlash,
    TargetDevice::Ultimate,
];

/// Filename constraints for a hardware target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProfile {
    pub target: TargetDevice,
    /// Maximum normalized name length, in characters.
    pub max_name_len: usize,
    /// Length the device menu truncates names to when displaying them.
    /// Informational only; it never affects normalization.
    pub display_name_len: Option<usize>,
    pub notes: &'static str,
}

impl TargetDevice {
    /// Canonical short name used for CLI flags and serialized output.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Sd2iec => "sd2iec",
            Self::Pi1541 => "pi1541",
            Self::KungFuFlash => "kungfuflash",
            Self::Ultimate => "ultimate",
        }
    }

    /// Full display name for the device.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sd2iec => "SD2IEC",
            Self::Pi1541 => "Pi1541",
            Self::KungFuFlash => "Kung Fu Flash",
            Self::Ultimate => "Ultimate",
        }
    }

    /// Hardware constraints for this target.
    pub fn profile(&self) -> TargetProfile {
        match self {
            Self::Sd2iec => TargetProfile {
                target: *self,
                max_name_len: 16,
                display_name_len: None,
                notes: "Commodore DOS filename length",
            },
            Self::Pi1541 => TargetProfile {
                target: *self,
                max_name_len: 16,
                display_name_len: None,
                notes: "Behaves like 1541/Commodore DOS",
            },
            Self::KungFuFlash => TargetProfile {
                target: *self,
                max_name_len: 255,
                display_name_len: Some(32),
                notes: "Menu display truncates around 32 chars",
            },
            Self::Ultimate => TargetProfile {
                target: *self,
                max_name_len: 255,
                display_name_len: None,
                notes: "Filesystem long filename typical maximum",
            },
        }
    }

    /// All supported targets.
    pub fn all() -> &'static [TargetDevice] {
        ALL_TARGETS
    }
}

impl std::fmt::Display for TargetDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl std::str::FromStr for TargetDevice {
    type Err = crate::error::TargetParseError;

    /// Parse a target from its short name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_TARGETS
            .iter()
            .copied()
            .find(|t| t.short_name() == lower)
            .ok_or_else(|| crate::error::TargetParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/target_tests.rs"]
mod tests;

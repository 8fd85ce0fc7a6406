//! Persistent defaults read from `~/.config/c64dreams/settings.toml`.
//!
//! Every value is optional. The CLI resolves each option with the priority
//! chain: command-line flag, then this file, then the built-in default.
//!
//! ```toml
//! [defaults]
//! target = "pi1541"
//! region = "pal"
//! max_name_len = 0
//! alpha_bucket_size = 2
//!
//! [paths]
//! input = "/media/c64/dreams"
//! output = "/media/sd"
//! sheet = "/media/c64/dreams/C64 Dreams.csv"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use c64dreams_core::{Region, TargetDevice};

use crate::error::SettingsError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub defaults: Defaults,
    pub paths: Paths,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub target: Option<TargetDevice>,
    pub region: Option<Region>,
    pub max_name_len: Option<usize>,
    pub alpha_bucket_size: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub sheet: Option<PathBuf>,
}

/// Canonical path to the settings file: `~/.config/c64dreams/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("c64dreams").join("settings.toml")
}

/// Load the settings file from its canonical location.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(&settings_path())
}

/// Load settings from `path`. A missing file gives the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Render as TOML, in the same layout the file is read in.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings_from(&tmp.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse_full_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[defaults]
target = "kungfuflash"
region = "ntsc"
max_name_len = 20
alpha_bucket_size = 2

[paths]
input = "/in"
output = "/out"
"#,
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.defaults.target, Some(TargetDevice::KungFuFlash));
        assert_eq!(settings.defaults.region, Some(Region::Ntsc));
        assert_eq!(settings.defaults.max_name_len, Some(20));
        assert_eq!(settings.defaults.alpha_bucket_size, Some(2));
        assert_eq!(settings.paths.input, Some(PathBuf::from("/in")));
        assert_eq!(settings.paths.output, Some(PathBuf::from("/out")));
        assert_eq!(settings.paths.sheet, None);
    }

    #[test]
    fn test_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[defaults]\ntarget = \"pi1541\"\n").unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.defaults.target, Some(TargetDevice::Pi1541));
        assert_eq!(settings.paths, Paths::default());
    }

    #[test]
    fn test_bad_value_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[defaults]\ntarget = \"c128\"\n").unwrap();

        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_to_toml_reads_back() {
        let mut settings = Settings::default();
        settings.defaults.target = Some(TargetDevice::Ultimate);
        settings.paths.output = Some(PathBuf::from("/media/sd"));

        let rendered = settings.to_toml().unwrap();
        assert!(rendered.contains("target = \"ultimate\""));
        let parsed: Settings = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_settings_path_location() {
        let path = settings_path();
        assert!(path.ends_with("c64dreams/settings.toml"));
    }
}

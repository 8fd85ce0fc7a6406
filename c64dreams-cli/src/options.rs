//! Resolves effective pipeline options: command-line flag, then the
//! settings file, then the built-in default.

use std::path::{Path, PathBuf};

use c64dreams_core::Region;
use c64dreams_lib::{ApplyOptions, LayoutOptions, NormalizeOptions, Settings};

use crate::cli_types::{GroupBy, PipelineArgs};
use crate::error::CliError;

const DEFAULT_ALPHA_BUCKET_SIZE: usize = 1;

#[derive(Debug, Clone)]
pub(crate) struct RunOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub sheet: Option<PathBuf>,
    pub normalize: NormalizeOptions,
    pub region: Region,
    pub layout: LayoutOptions,
    pub dry_run: bool,
    pub overwrite: bool,
    pub json: bool,
}

impl RunOptions {
    pub(crate) fn resolve(args: &PipelineArgs, settings: &Settings) -> Self {
        let defaults = &settings.defaults;
        let paths = &settings.paths;

        let target = args.target.or(defaults.target).unwrap_or_default();
        let max_name_len = args.max_name_len.or(defaults.max_name_len).unwrap_or(0);

        Self {
            input: args.input.clone().or_else(|| paths.input.clone()),
            output: args.output.clone().or_else(|| paths.output.clone()),
            sheet: args.sheet.clone().or_else(|| paths.sheet.clone()),
            normalize: NormalizeOptions::new(target).max_name_len(max_name_len),
            region: args.region.or(defaults.region).unwrap_or_default(),
            layout: LayoutOptions {
                group_by_media: args.group_media,
                group_by_alpha: args.group_alpha || args.group_by == Some(GroupBy::Letter),
                alpha_bucket_size: args
                    .alpha_bucket_size
                    .or(defaults.alpha_bucket_size)
                    .unwrap_or(DEFAULT_ALPHA_BUCKET_SIZE),
                ..Default::default()
            },
            dry_run: args.dry_run,
            overwrite: args.overwrite,
            json: args.json,
        }
    }

    pub(crate) fn sheet(&self) -> Result<&Path, CliError> {
        self.sheet.as_deref().ok_or(CliError::missing("sheet"))
    }

    pub(crate) fn input(&self) -> Result<&Path, CliError> {
        self.input.as_deref().ok_or(CliError::missing("input"))
    }

    pub(crate) fn output(&self) -> Result<&Path, CliError> {
        self.output.as_deref().ok_or(CliError::missing("output"))
    }

    pub(crate) fn apply_options(&self, verify_only: bool) -> Result<ApplyOptions, CliError> {
        Ok(ApplyOptions {
            dry_run: self.dry_run,
            overwrite: self.overwrite,
            verify_only,
            ..ApplyOptions::new(self.input()?, self.output()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_types::{Cli, Commands};
    use c64dreams_core::TargetDevice;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("c64dreams").chain(args.iter().copied())).unwrap()
    }

    fn rejects(args: &[&str]) -> bool {
        Cli::try_parse_from(std::iter::once("c64dreams").chain(args.iter().copied())).is_err()
    }

    #[test]
    fn test_builtin_defaults() {
        let cli = parse(&["normalize"]);
        let opts = RunOptions::resolve(&cli.pipeline, &Settings::default());

        assert_eq!(opts.normalize.target, TargetDevice::Sd2iec);
        assert_eq!(opts.normalize.max_name_len, 0);
        assert_eq!(opts.normalize.effective_max_len(), 16);
        assert_eq!(opts.region, Region::Both);
        assert_eq!(opts.layout.alpha_bucket_size, 1);
        assert!(!opts.layout.group_by_alpha);
        assert!(!opts.layout.group_by_media);
        assert!(opts.dry_run);
        assert!(!opts.overwrite);
        assert!(!opts.json);
        assert!(opts.sheet.is_none());
    }

    #[test]
    fn test_settings_fill_unset_flags() {
        let mut settings = Settings::default();
        settings.defaults.target = Some(TargetDevice::KungFuFlash);
        settings.defaults.region = Some(Region::Pal);
        settings.defaults.alpha_bucket_size = Some(3);
        settings.paths.sheet = Some(PathBuf::from("/sheets/dreams.csv"));

        let cli = parse(&["normalize"]);
        let opts = RunOptions::resolve(&cli.pipeline, &settings);
        assert_eq!(opts.normalize.target, TargetDevice::KungFuFlash);
        assert_eq!(opts.region, Region::Pal);
        assert_eq!(opts.layout.alpha_bucket_size, 3);
        assert_eq!(opts.sheet().unwrap(), Path::new("/sheets/dreams.csv"));
    }

    #[test]
    fn test_flags_beat_settings() {
        let mut settings = Settings::default();
        settings.defaults.target = Some(TargetDevice::KungFuFlash);
        settings.defaults.max_name_len = Some(40);
        settings.paths.sheet = Some(PathBuf::from("/sheets/dreams.csv"));

        let cli = parse(&[
            "--target",
            "pi1541",
            "--max-name-len",
            "12",
            "--sheet",
            "mine.csv",
            "normalize",
        ]);
        let opts = RunOptions::resolve(&cli.pipeline, &settings);
        assert_eq!(opts.normalize.target, TargetDevice::Pi1541);
        assert_eq!(opts.normalize.effective_max_len(), 12);
        assert_eq!(opts.sheet().unwrap(), Path::new("mine.csv"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["build", "--verify-only", "--region", "ntsc", "--json"]);
        let opts = RunOptions::resolve(&cli.pipeline, &Settings::default());
        assert_eq!(opts.region, Region::Ntsc);
        assert!(opts.json);
        assert!(matches!(cli.command, Commands::Build { verify_only: true }));
    }

    #[test]
    fn test_dry_run_values() {
        assert!(parse(&["build"]).pipeline.dry_run);
        assert!(parse(&["build", "--dry-run"]).pipeline.dry_run);
        assert!(parse(&["build", "--dry-run", "true"]).pipeline.dry_run);
        assert!(!parse(&["build", "--dry-run", "false"]).pipeline.dry_run);
        assert!(!parse(&["build", "--dry-run=false"]).pipeline.dry_run);
    }

    #[test]
    fn test_group_by_letter_enables_alpha() {
        let cli = parse(&["build", "--group-by", "letter"]);
        let opts = RunOptions::resolve(&cli.pipeline, &Settings::default());
        assert!(opts.layout.group_by_alpha);

        let cli = parse(&["build", "--group-by", "none"]);
        let opts = RunOptions::resolve(&cli.pipeline, &Settings::default());
        assert!(!opts.layout.group_by_alpha);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(rejects(&["--target", "c128", "build"]));
        assert!(rejects(&["--region", "secam", "build"]));
        assert!(rejects(&["--group-by", "genre", "build"]));
        assert!(rejects(&["--max-name-len", "-1", "build"]));
        assert!(rejects(&["--alpha-bucket-size", "-2", "build"]));
        assert!(rejects(&["--dry-run", "maybe", "build"]));
    }

    #[test]
    fn test_target_is_case_insensitive() {
        let cli = parse(&["--target", "KungFuFlash", "normalize"]);
        assert_eq!(cli.pipeline.target, Some(TargetDevice::KungFuFlash));
    }

    #[test]
    fn test_required_paths() {
        let cli = parse(&["build"]);
        let opts = RunOptions::resolve(&cli.pipeline, &Settings::default());
        assert!(matches!(opts.sheet(), Err(CliError::MissingOption("sheet"))));
        assert!(matches!(opts.apply_options(false), Err(CliError::MissingOption("input"))));

        let cli = parse(&["build", "--input", "in", "--output", "out", "--dry-run", "false"]);
        let opts = RunOptions::resolve(&cli.pipeline, &Settings::default());
        let apply = opts.apply_options(true).unwrap();
        assert_eq!(apply.input_root, PathBuf::from("in"));
        assert_eq!(apply.output_root, PathBuf::from("out"));
        assert!(!apply.dry_run);
        assert!(apply.verify_only);
    }
}

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use c64dreams_lib::{ScannedFile, scan_input};

use super::{PREVIEW_FILES, log_remaining, print_json};
use crate::error::CliError;
use crate::options::RunOptions;

#[derive(Serialize)]
struct ScanReport<'a> {
    input: &'a Path,
    count: usize,
    files: &'a [ScannedFile],
}

/// List recognized C64 files under the input directory.
pub(crate) fn run_scan(opts: &RunOptions) -> Result<(), CliError> {
    let input = opts.input()?;
    let files = scan_input(input)?;

    if opts.json {
        return print_json(&ScanReport {
            input,
            count: files.len(),
            files: &files,
        });
    }

    log::info!(
        "Found {} C64-related files under {}",
        files.len().if_supports_color(Stdout, |t| t.bold()),
        input.display().if_supports_color(Stdout, |t| t.cyan())
    );
    for file in files.iter().take(PREVIEW_FILES) {
        log::info!("  - {}", file.path);
    }
    log_remaining(files.len(), PREVIEW_FILES);

    Ok(())
}

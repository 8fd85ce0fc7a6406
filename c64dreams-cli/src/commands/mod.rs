pub(crate) mod build;
pub(crate) mod config;
pub(crate) mod ingest;
pub(crate) mod normalize;
pub(crate) mod scan;

use serde::Serialize;

use c64dreams_core::NormalizedGame;
use c64dreams_lib::{load_csv, normalize_games, resolve_collisions_for};

use crate::error::CliError;
use crate::options::RunOptions;

/// Entries shown in text listings before the "... (N more)" line.
const PREVIEW_GAMES: usize = 5;
const PREVIEW_FILES: usize = 10;

/// Print a JSON document to stdout, pretty-printed.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ingest the sheet, keep games passing the region filter, normalize them
/// and resolve name collisions.
fn load_normalized(opts: &RunOptions) -> Result<Vec<NormalizedGame>, CliError> {
    let games = load_csv(opts.sheet()?)?;
    let mut normalized = normalize_games(&games, opts.region, &opts.normalize);
    log::debug!(
        "{} of {} games kept by region filter '{}'",
        normalized.len(),
        games.len(),
        opts.region
    );
    resolve_collisions_for(&mut normalized, &opts.normalize);
    Ok(normalized)
}

/// Log the "... (N more)" line when a listing was cut at `shown`.
fn log_remaining(total: usize, shown: usize) {
    if total > shown {
        log::info!("  ... ({} more)", total - shown);
    }
}

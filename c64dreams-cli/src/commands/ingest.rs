use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use c64dreams_lib::load_csv;

use super::{PREVIEW_GAMES, log_remaining, print_json};
use crate::error::CliError;
use crate::options::RunOptions;

/// Load the spreadsheet and echo what was read.
pub(crate) fn run_ingest(opts: &RunOptions) -> Result<(), CliError> {
    let games = load_csv(opts.sheet()?)?;

    if opts.json {
        return print_json(&games);
    }

    log::info!(
        "Loaded {} games",
        games.len().if_supports_color(Stdout, |t| t.bold())
    );
    for game in games.iter().take(PREVIEW_GAMES) {
        let label = game.variants.first().map(|v| v.label.as_str()).unwrap_or("");
        log::info!(
            "  - {} {}",
            game.title,
            format!("(id={} variant={})", game.id, label).if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    log_remaining(games.len(), PREVIEW_GAMES);

    Ok(())
}

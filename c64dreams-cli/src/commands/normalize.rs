use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use c64dreams_core::NormalizedGame;

use super::{PREVIEW_GAMES, load_normalized, log_remaining, print_json};
use crate::error::CliError;
use crate::options::RunOptions;

#[derive(Serialize)]
struct NormalizeReport<'a> {
    games: &'a [NormalizedGame],
}

/// Normalize every game for the chosen target and show the resulting names.
pub(crate) fn run_normalize(opts: &RunOptions) -> Result<(), CliError> {
    let games = load_normalized(opts)?;

    if opts.json {
        return print_json(&NormalizeReport { games: &games });
    }

    log::info!(
        "Normalized {} games for {} ({}, max-len={})",
        games.len().if_supports_color(Stdout, |t| t.bold()),
        opts.normalize.target.display_name(),
        opts.region.name(),
        opts.normalize.effective_max_len()
    );
    for game in games.iter().take(PREVIEW_GAMES) {
        let mut flags = Vec::new();
        if game.name.truncated {
            flags.push("truncated");
        }
        if game.name.collision {
            flags.push("collision");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        log::info!(
            "  - {} -> {}{}",
            game.title,
            game.name.normalized.if_supports_color(Stdout, |t| t.cyan()),
            flags.if_supports_color(Stdout, |t| t.yellow())
        );
    }
    log_remaining(games.len(), PREVIEW_GAMES);

    Ok(())
}

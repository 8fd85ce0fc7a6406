use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use c64dreams_lib::{ApplyAction, ApplyResult, PlannedFile, apply_with_progress, plan};

use super::{load_normalized, print_json};
use crate::error::CliError;
use crate::options::RunOptions;
use crate::spinner::ApplySpinner;

#[derive(Serialize)]
struct BuildReport<'a> {
    plan: &'a [PlannedFile],
    results: &'a [ApplyResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the whole pipeline: ingest, normalize, collide, plan, apply.
///
/// An apply failure is reported after whatever results were gathered, in
/// both text and JSON mode, and still fails the command.
pub(crate) fn run_build(opts: &RunOptions, verify_only: bool, quiet: bool) -> Result<(), CliError> {
    opts.sheet()?;
    let apply_options = opts.apply_options(verify_only)?;

    let games = load_normalized(opts)?;
    let planned = plan(&games, &opts.layout)?;

    let spinner = ApplySpinner::new(quiet || opts.json);
    let report = apply_with_progress(&planned, &apply_options, &|p| spinner.update(p));
    spinner.finish();

    if opts.json {
        print_json(&BuildReport {
            plan: &planned,
            results: &report.results,
            error: report.error.as_ref().map(|e| e.to_string()),
        })?;
        return report.into_result().map(|_| ()).map_err(CliError::from);
    }

    log::info!(
        "Planned {} files",
        planned.len().if_supports_color(Stdout, |t| t.bold())
    );
    for result in &report.results {
        log_result(result);
    }
    log::info!(
        "{} copied, {} skipped",
        report.count(ApplyAction::Copy),
        report.count(ApplyAction::Skip)
    );

    if verify_only {
        log::info!(
            "{}",
            "Verify-only: sources checked, nothing written".if_supports_color(Stdout, |t| t.yellow())
        );
    } else if opts.dry_run {
        log::info!(
            "{}",
            "Dry-run enabled: no changes written".if_supports_color(Stdout, |t| t.yellow())
        );
    }

    report.into_result().map(|_| ()).map_err(CliError::from)
}

fn log_result(result: &ApplyResult) {
    let action = result.action.name();
    let action = match result.action {
        ApplyAction::Copy => action.if_supports_color(Stdout, |t| t.green()).to_string(),
        ApplyAction::Skip => action.if_supports_color(Stdout, |t| t.dimmed()).to_string(),
        ApplyAction::Mkdir => action.if_supports_color(Stdout, |t| t.cyan()).to_string(),
        ApplyAction::Error => action.if_supports_color(Stdout, |t| t.red()).to_string(),
    };
    match &result.error {
        Some(err) => log::info!(
            "{} -> {} ({}: {})",
            result.source.display(),
            result.dest.display(),
            action,
            err
        ),
        None => log::info!(
            "{} -> {} ({})",
            result.source.display(),
            result.dest.display(),
            action
        ),
    }
}

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use c64dreams_lib::{load_settings, settings_path};

use crate::error::CliError;

/// Show the settings file location and its contents.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "c64dreams Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if !path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("");
        log::info!("  Built-in defaults apply: target=sd2iec region=both alpha-bucket-size=1");
        return Ok(());
    }

    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        "(exists)".if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("");

    // Parse first so a broken file is reported instead of echoed.
    let settings = load_settings()?;
    let contents = settings.to_toml().map_err(|e| CliError::other(e.to_string()))?;
    for line in contents.lines() {
        log::info!("  {}", line);
    }

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

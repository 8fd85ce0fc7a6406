//! Logger setup.
//!
//! Commands print their reports through `log::info!`, so the info level is
//! rendered as the bare message. Warnings and errors get a coloured prefix,
//! and `--verbose` adds timestamps and module targets to every line.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use env_logger::{Builder, Target};
use log::{Level, LevelFilter, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

pub(crate) struct LogConfig<'a> {
    pub quiet: bool,
    pub verbose: bool,
    /// JSON mode keeps stdout for the document and logs warnings to stderr
    pub json: bool,
    pub logfile: Option<&'a Path>,
}

impl LogConfig<'_> {
    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet || self.json {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

pub(crate) fn init(config: &LogConfig<'_>) -> Result<(), CliError> {
    let mirror = match config.logfile {
        Some(path) => Some(Arc::new(Mutex::new(File::create(path)?))),
        None => None,
    };
    let verbose = config.verbose;

    let mut builder = Builder::new();
    builder
        .filter_level(config.level())
        .parse_default_env()
        .target(if config.json { Target::Stderr } else { Target::Stdout })
        .format(move |buf, record| {
            let line = if verbose {
                format!(
                    "[{} {:<5} {}] {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.target(),
                    render(record)
                )
            } else {
                render(record)
            };

            if let Some(file) = &mirror {
                if let Ok(mut file) = file.lock() {
                    writeln!(file, "{}", strip_ansi_escapes::strip_str(&line))?;
                }
            }
            writeln!(buf, "{}", line)
        });

    builder.try_init().map_err(|e| CliError::other(e.to_string()))
}

fn render(record: &Record<'_>) -> String {
    match record.level() {
        Level::Error => format!(
            "{} {}",
            "error:".if_supports_color(Stdout, |t| t.red()),
            record.args()
        ),
        Level::Warn => format!(
            "{} {}",
            "warning:".if_supports_color(Stdout, |t| t.yellow()),
            record.args()
        ),
        _ => record.args().to_string(),
    }
}

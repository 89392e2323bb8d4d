use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context as _;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Logging options taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryConfig<'a> {
    pub verbose: bool,
    pub json: bool,
    pub output: Option<&'a Path>,
}

/// Configures structured logging with runtime control via `RUST_LOG` environment variable.
///
/// Logs go to stderr (or the given file) so stdout carries only the timing
/// report. Defaults to WARN; `--verbose` lowers it to DEBUG.
pub fn init_tracing(config: TelemetryConfig<'_>) -> anyhow::Result<()> {
    let directive = if config.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN }.into();

    let make_writer = match config.output {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;

            BoxMakeWriter::new(file)
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(config.output.is_none() && std::io::stderr().is_terminal())
        .with_env_filter(EnvFilter::builder().with_default_directive(directive).from_env_lossy())
        .with_writer(make_writer);

    let installed = if config.json { subscriber.json().try_init() } else { subscriber.try_init() };
    installed.map_err(|err| anyhow::anyhow!("install tracing subscriber: {err}"))?;

    tracing::debug!("tracing is set up");
    Ok(())
}

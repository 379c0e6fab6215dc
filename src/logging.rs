use crate::consts;
use anyhow::Context;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Send log messages to the file at `path`, appending to it if it already
/// exists.  If `path` is `None`, nothing is logged, as the terminal belongs to
/// the game.
///
/// The filter directives are taken from the environment variable
/// [`LOG_FILTER_ENV`][consts::LOG_FILTER_ENV] if it is set, otherwise from
/// `filter`, otherwise only messages at `INFO` level and above are logged.
pub(crate) fn init(path: Option<&Path>, filter: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let directives = filter_directives(std::env::var(consts::LOG_FILTER_ENV).ok(), filter);
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log filter {directives:?}"))?;
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn filter_directives(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|s| !s.is_empty())
        .or_else(|| configured.map(String::from))
        .unwrap_or_else(|| String::from(DEFAULT_FILTER))
}

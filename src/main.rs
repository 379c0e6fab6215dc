mod app;
mod command;
mod config;
mod consts;
mod game;
mod grid;
mod highscores;
mod logging;
mod surface;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

/// Play snake on a grid in the terminal
#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    /// Configuration file to read instead of the default one
    config: Option<PathBuf>,

    /// File to write log messages to, overriding the configuration
    log_file: Option<PathBuf>,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Cli::Run(args) => args.run(),
            Cli::Help => {
                println!("Usage: gridsnake [--config <path>] [--log-file <path>]");
                println!();
                println!("Play snake on a grid in the terminal");
                println!();
                println!("Options:");
                println!("  -c, --config <path>  Read configuration from the given file");
                println!("      --log-file <path>");
                println!("                       Write log messages to the given file");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
                Ok(())
            }
            Cli::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let config = match self.config {
            Some(path) => Config::load(&path, false),
            None => Config::default_path().and_then(|path| Config::load(&path, true)),
        }
        .context("failed to load configuration")?;
        let log_file = self.log_file.or_else(|| config.logging.file.clone());
        logging::init(log_file.as_deref(), config.logging.filter.as_deref())?;
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting up");
        let app = App::new(&config);
        let terminal = ratatui::init();
        let r = crossterm::execute!(io::stdout(), EnableFocusChange)
            .and_then(|()| app.run(terminal));
        let _ = crossterm::execute!(io::stdout(), DisableFocusChange);
        ratatui::restore();
        r.map_err(Into::into)
    }
}

fn main() -> ExitCode {
    let r = Cli::from_parser(Parser::from_env())
        .map_err(Into::into)
        .and_then(Cli::run);
    anyhow_exit(r)
}

fn anyhow_exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|src| src.downcast_ref::<io::Error>())
        .any(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}

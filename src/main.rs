mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod options;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::highscores::HighScores;
use crate::options::{Arguments, RunOptions, USAGE};
use crate::util::Globals;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::execute;
use ratatui::layout::Size;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable from which the log filter is read
const LOG_ENV_VAR: &str = "FLIPSNAKE_LOG";

fn main() -> ExitCode {
    match Arguments::from_parser(lexopt::Parser::from_env()) {
        Ok(Arguments::Run(opts)) => match run(opts) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("flipsnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("flipsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("flipsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(opts: RunOptions) -> anyhow::Result<()> {
    let config = match opts.config {
        Some(ref path) => Config::load(path, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    if let Some(path) = opts.log_file.as_deref().or(config.files.log_file.as_deref()) {
        init_logging(path)?;
    }
    tracing::debug!(?config, "Loaded configuration");
    let high_scores = config.load_high_scores().unwrap_or_else(|e| {
        tracing::warn!("Could not load high scores: {:#}", anyhow::Error::new(e));
        HighScores::default()
    });
    let (columns, lines) = crossterm::terminal::size().context("failed to get terminal size")?;
    let board_size = opts.size.resolve(Size::new(columns, lines), &config.game)?;
    let game = Game::new(Globals {
        config,
        high_scores,
        board_size,
    })?;
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableFocusChange)
        .and_then(|()| App::new(game).run(terminal))
        .and_then(|()| execute!(io::stdout(), DisableFocusChange));
    ratatui::restore();
    r.map_err(Into::into)
}

/// Send diagnostic logs to the file at `path`.  The terminal belongs to the
/// game, so logs are never written there.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}

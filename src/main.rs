//! Blockfall runner.
//!
//! `play` runs the game in the terminal; `serve` exposes it over the JSON
//! line protocol.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use blockfall::adapter::{run_server, ServerConfig};
use blockfall::engine::{Session, SessionConfig, TickSchedule};
use blockfall::input::{key_from_event, should_quit, InputCommand};
use blockfall::term::{render_lines, TerminalRenderer};

#[derive(Debug, Clone, Args)]
struct PlayArgs {
    #[arg(long, env = "BLOCKFALL_SEED", default_value_t = 1, help = "Piece stream seed")]
    seed: u32,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Play in this terminal (the default).
    Play(PlayArgs),
    /// Serve the game over line-delimited JSON on TCP.
    Serve {
        #[arg(long, env = "BLOCKFALL_HOST", default_value = "127.0.0.1", help = "Bind address")]
        host: String,

        #[arg(long, env = "BLOCKFALL_PORT", default_value_t = 7777, help = "Port to listen on")]
        port: u16,

        #[arg(long, env = "BLOCKFALL_SEED", default_value_t = 1, help = "Piece stream seed")]
        seed: u32,
    },
}

#[derive(Debug, Parser)]
#[command(version, about = "Falling-block puzzle game", args_conflicts_with_subcommands = true)]
struct Cli {
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments for `play` when no subcommand is given.
    #[command(flatten)]
    play: PlayArgs,
}

impl Cli {
    fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Play(self.play))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let command = cli.into_command();

    // Log lines would tear the playfield, so `play` stays silent unless asked.
    let quiet_default = matches!(command, Commands::Play(_));
    init_logging(verbose, quiet_default);

    match command {
        Commands::Play(args) => play(SessionConfig { seed: args.seed }),
        Commands::Serve { host, port, seed } => {
            let config = ServerConfig { host, port, seed };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_server(config, None))
        }
    }
}

fn init_logging(verbose: u8, quiet_default: bool) {
    let level = match verbose {
        0 if quiet_default => return,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    info!("Logging initialized at level: {}", level);
}

fn play(config: SessionConfig) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: SessionConfig) -> Result<()> {
    let mut session = Session::new(config);
    let mut schedule = TickSchedule::new(session.state());
    let mut last_tick = Instant::now();

    term.draw(&render_lines(session.state()))?;

    loop {
        // Input with timeout until next tick.
        let timeout = schedule
            .interval()
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        let mut dirty = false;

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }

                    let applied = match key_from_event(key) {
                        Some(InputCommand::Key(k)) => session.press(k).is_some(),
                        Some(InputCommand::Control(c)) => session.click(c).is_some(),
                        None => false,
                    };

                    if applied {
                        dirty = true;
                        if schedule.rearm(session.state()).is_some() {
                            last_tick = Instant::now();
                        }
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= schedule.interval() {
            last_tick = Instant::now();
            session.tick();
            schedule.rearm(session.state());
            dirty = true;
        }

        if dirty {
            term.draw(&render_lines(session.state()))?;
        }
    }
}

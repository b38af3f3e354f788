use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use pixel_snake::config::{FRAME_INTERVAL_MS, SimConfig, THEME_SEASHELL};
use pixel_snake::game::{GameState, GameStatus};
use pixel_snake::input::{Command, InputHandler, TickInput};
use pixel_snake::renderer;
use pixel_snake::score::{BestRun, ScoreStore, update_record};
use pixel_snake::settings::{Settings, load_settings};
use pixel_snake::terminal_runtime::TerminalSession;
use pixel_snake::ui::hud::HudInfo;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file while the terminal UI is active.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Run this many ticks without a terminal, logging to stderr.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let settings = load_settings(cli.config.as_deref())?;

    match cli.headless {
        Some(ticks) => run_headless(settings, cli.seed, ticks),
        None => run_terminal(settings, cli.seed),
    }
}

fn init_tracing(cli: &Cli) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(io::Error::other)?;
    } else if cli.headless.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
            .map_err(io::Error::other)?;
    }

    Ok(())
}

fn new_state(config: SimConfig, seed: Option<u64>) -> GameState {
    match seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    }
}

fn run_headless(settings: Settings, seed: Option<u64>, ticks: u64) -> io::Result<()> {
    let mut state = new_state(settings.sim, seed);
    info!(ticks, ?seed, "starting headless run");

    for _ in 0..ticks {
        if !state.tick(TickInput::default()).is_running() {
            break;
        }
    }

    let head = state.snake().head();
    let outcome = match state.status() {
        GameStatus::Running => "running".to_owned(),
        GameStatus::Stopped(reason) => format!("stopped: snake {reason}"),
    };
    println!(
        "{outcome} after {} ticks, length {}, head ({}, {})",
        state.tick_count(),
        state.snake().len(),
        head.x,
        head.y
    );

    Ok(())
}

fn run_terminal(settings: Settings, seed: Option<u64>) -> io::Result<()> {
    let store = ScoreStore::at_default_location();
    let mut best: Option<BestRun> = store.load().unwrap_or_else(|error| {
        eprintln!("Failed to load best run: {error}");
        warn!(%error, "failed to load best run, starting without one");
        None
    });
    let mut new_best = false;

    let mut state = new_state(settings.sim, seed);
    let mut input = InputHandler::new();
    let mut paused = false;
    let mut last_tick = Instant::now();

    let mut session = TerminalSession::enter()?;
    info!("terminal session started");

    loop {
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                &state,
                &HudInfo {
                    best_length: best.map_or(0, |run| run.length),
                    new_best,
                    paused,
                    theme: &THEME_SEASHELL,
                },
            );
        })?;

        match input.poll()? {
            Some(Command::Quit) => break,
            Some(Command::Pause) if state.status().is_running() => {
                paused = !paused;
                let _ = input.take_tick_input();
                last_tick = Instant::now();
            }
            Some(Command::Restart) if !state.status().is_running() => {
                new_best = false;
                state.restart();
                let _ = input.take_tick_input();
                last_tick = Instant::now();
            }
            _ => {}
        }

        if !paused && state.status().is_running() && last_tick.elapsed() >= settings.tick_interval
        {
            state.tick(input.take_tick_input());
            last_tick = Instant::now();

            if let Some(run) = update_record(&mut best, &state) {
                new_best = true;
                if let Err(error) = store.save(&run) {
                    warn!(%error, "failed to save best run");
                }
            }
        }

        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }

    Ok(())
}

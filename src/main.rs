//! Terminal 3D falling-block game (default binary).
//!
//! `play` runs the interactive game: crossterm for input and a
//! framebuffer-based renderer for output. `simulate` drops pieces headlessly
//! and prints a summary.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::event::{self, Event};
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use tetris3d::core::{Engine, EngineConfig, GameSnapshot};
use tetris3d::input::{handle_key_event, is_press, should_quit};
use tetris3d::sim::simulate;
use tetris3d::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris3d::types::{SpawnMode, TICK_MS};

#[derive(Parser)]
#[command(name = "tetris3d", version, about = "3D falling-block game for the terminal")]
struct Cli {
    /// JSON engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spawn seed (overrides the config file)
    #[arg(long)]
    seed: Option<u32>,

    /// How the next piece is chosen (overrides the config file)
    #[arg(long, value_enum)]
    spawn_mode: Option<SpawnModeArg>,

    /// Write logs to this file; `play` logs nowhere otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SpawnModeArg {
    Cyclic,
    Random,
}

impl From<SpawnModeArg> for SpawnMode {
    fn from(value: SpawnModeArg) -> Self {
        match value {
            SpawnModeArg::Cyclic => SpawnMode::Cyclic,
            SpawnModeArg::Random => SpawnMode::Random,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal (default)
    Play,
    /// Hard-drop pieces without a terminal and print a summary
    Simulate {
        /// Number of pieces to lock
        #[arg(short, long, default_value = "100")]
        pieces: u32,
        /// Seed for the random steering commands
        #[arg(long, default_value = "7")]
        command_seed: u32,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play);
    let headless = matches!(command, Commands::Simulate { .. });

    init_logging(cli.verbose, cli.log_file.as_deref(), headless)?;
    let config = load_config(cli.config.as_deref(), cli.seed, cli.spawn_mode)?;
    let mut engine = Engine::new(&config).context("building engine")?;

    match command {
        Commands::Play => play(&mut engine),
        Commands::Simulate {
            pieces,
            command_seed,
            json,
        } => {
            let summary = simulate(&mut engine, pieces, command_seed);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
            Ok(())
        }
    }
}

/// The play screen owns the terminal, so without a log file it gets no subscriber.
fn init_logging(verbose: bool, log_file: Option<&Path>, stderr: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn load_config(
    path: Option<&Path>,
    seed: Option<u32>,
    spawn_mode: Option<SpawnModeArg>,
) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(mode) = spawn_mode {
        config.spawn_mode = mode.into();
    }

    config.validate().context("invalid configuration")?;
    info!(
        width = config.width,
        depth = config.depth,
        height = config.height,
        seed = config.seed,
        spawn_mode = config.spawn_mode.as_str(),
        "configuration loaded"
    );
    Ok(config)
}

fn play(engine: &mut Engine) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let frame = Duration::from_millis(TICK_MS);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        info!(episode_id = engine.episode_id(), "quit");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        let accepted = engine.apply(command);
                        trace!(command = command.as_str(), accepted, "command");
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity runs on wall-clock time since startup.
        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();
            engine.tick(started.elapsed().as_millis() as u64);
        }
    }
}

// pktreplay - Packet Replay
// Animated terminal replay of recorded packet traffic between network nodes

mod app;
mod capture;
mod replay;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::{event::handle_key_event, AppState, RefreshConfig};
use capture::synth::SyntheticSource;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use replay::{load_nodes, NodeRegistry, Renderer, Replay, ReplayConfig, Scene};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pktreplay",
    about = "Replay a packet log as packets moving between network nodes"
)]
struct Args {
    /// Packet log or capture export (JSON array or one record per line)
    #[arg(long, required_unless_present = "synthetic", conflicts_with = "synthetic")]
    log: Option<PathBuf>,

    /// Generate random traffic between the nodes instead of reading a log
    #[arg(long)]
    synthetic: bool,

    /// Seed for the synthetic source
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of ticks the synthetic source covers
    #[arg(long, default_value_t = 10_000)]
    synthetic_ticks: u64,

    /// Node layout (JSON list of {name, x, y, width, height})
    #[arg(long)]
    nodes: Option<PathBuf>,

    /// Clock ticks per second of log time
    #[arg(long, default_value_t = 1.0)]
    ticks_per_second: f64,

    /// Clock value of the first tick (defaults to the first event)
    #[arg(long)]
    start_time: Option<u64>,

    /// Ticks a packet takes from source to destination
    #[arg(long, default_value_t = replay::DEFAULT_TOTAL_STEPS)]
    steps: u32,

    /// Initial tick interval in milliseconds
    #[arg(long, default_value_t = app::DEFAULT_REFRESH_MS)]
    refresh_ms: u64,

    /// Print one line per tick instead of opening the terminal UI
    #[arg(long)]
    headless: bool,

    /// Number of ticks to run in headless mode (default: until idle)
    #[arg(long)]
    ticks: Option<u64>,

    /// Include sprite positions in headless output
    #[arg(long)]
    positions: bool,

    /// Write tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let replay = build_replay(&args)?;

    if args.headless {
        let stdout = io::stdout();
        let mut renderer = TextRenderer::new(stdout.lock(), args.positions);
        return run_headless(replay, &mut renderer, args.ticks);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = AppState::new(replay, RefreshConfig::with_interval(args.refresh_ms));
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "Replay aborted");
    }
    res
}

/// Install the tracing subscriber
///
/// The terminal UI owns the screen, so without `--log-file` it runs with no
/// subscriber at all; headless runs log to stderr.
fn init_tracing(args: &Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

/// Load nodes and events and validate them into a replay
fn build_replay(args: &Args) -> Result<Replay> {
    let registry = match &args.nodes {
        Some(path) => NodeRegistry::new(load_nodes(path)?)
            .with_context(|| format!("invalid node layout in {}", path.display()))?,
        None => NodeRegistry::default_layout(),
    };

    let events = match &args.log {
        Some(path) => capture::load_events(path, args.ticks_per_second)
            .with_context(|| format!("failed to load packet log {}", path.display()))?,
        None => {
            let mut source = SyntheticSource::new(SyntheticSource::default_routes(), args.seed);
            source.generate(args.start_time.unwrap_or(0), args.synthetic_ticks)
        }
    };

    let config = ReplayConfig {
        start_time: args.start_time,
        total_steps: args.steps,
        ..ReplayConfig::default()
    };
    Replay::new(registry, events, &config).context("cannot start replay")
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: AppState) -> Result<()> {
    loop {
        let overlay = app.overlay();
        app.on_tick(&mut ui::TerminalRenderer::new(terminal, overlay))?;
        app.update_frame_time();

        if !app.running {
            return Ok(());
        }

        if event::poll(app.refresh_config.ui_interval())? {
            if let Event::Key(key) = event::read()? {
                handle_key_event(&mut app, key.code);
            }
        }
    }
}

/// Step the replay without a terminal
///
/// Runs `ticks` ticks, or until nothing is waiting or in flight.
fn run_headless<R>(mut replay: Replay, renderer: &mut R, ticks: Option<u64>) -> Result<()>
where
    R: Renderer<Error = io::Error>,
{
    match ticks {
        Some(ticks) => {
            for _ in 0..ticks {
                replay.step(renderer)?;
            }
        }
        None => {
            while !replay.is_idle() {
                replay.step(renderer)?;
            }
        }
    }

    let stats = replay.stats();
    tracing::info!(
        now = replay.now(),
        admitted = stats.admitted,
        delivered = stats.delivered,
        "Headless replay finished"
    );
    Ok(())
}

/// Writes one summary line per tick
struct TextRenderer<W: Write> {
    out: W,
    positions: bool,
}

impl<W: Write> TextRenderer<W> {
    fn new(out: W, positions: bool) -> Self {
        Self { out, positions }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, scene: &Scene<'_>) -> io::Result<()> {
        write!(
            self.out,
            "tick={} backlog={} live={} admitted={} delivered={}",
            scene.now,
            scene.backlog,
            scene.sprites.len(),
            scene.stats.admitted,
            scene.stats.delivered
        )?;

        if self.positions {
            let sprites: Vec<String> = scene
                .sprites
                .iter()
                .map(|sprite| {
                    let p = sprite.position();
                    format!("({:.1},{:.1})", p.x, p.y)
                })
                .collect();
            write!(self.out, " sprites=[{}]", sprites.join(" "))?;
        }

        writeln!(self.out)
    }
}

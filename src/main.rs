// pcaptop - the busiest flows of a packet capture, top-style
// Reads captured frames and keeps a ranked, continuously refreshed flow view

mod app;
mod capture;
mod flow;
mod net;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::config::{DEFAULT_MAX_AGE, DEFAULT_MAX_ENTRIES};
use app::{event::handle_key_event, AppState, FlowTableConfig};
use capture::{FrameSource, PcapFileSource};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// pcaptop - top-style view of the busiest flows in a packet capture
#[derive(Parser, Debug)]
#[command(name = "pcaptop")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Show the busiest network flows of a packet capture")]
struct Cli {
    /// Packet capture (pcap) file to read
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write debug logs to this file
    #[arg(short = 'l', long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Maximum number of flows tracked at once
    #[arg(long = "max-flows", value_name = "N", default_value_t = DEFAULT_MAX_ENTRIES)]
    max_flows: usize,

    /// Seconds of capture time a flow may stay idle before it expires
    #[arg(long = "max-age", value_name = "SECONDS", default_value_t = DEFAULT_MAX_AGE.as_secs())]
    max_age: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path).context("Failed to initialize logging")?;
    }
    anyhow::ensure!(cli.max_flows > 0, "--max-flows must be at least 1");

    // Open the capture before touching the terminal so errors print normally
    let source = PcapFileSource::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let table_config = FlowTableConfig {
        max_entries: cli.max_flows,
        max_age: Duration::from_secs(cli.max_age),
    };
    info!(
        input = %cli.input.display(),
        link = ?source.link(),
        max_flows = table_config.max_entries,
        max_age_secs = cli.max_age,
        "pcaptop starting"
    );

    let mut app = AppState::new(Box::new(source), table_config);

    // The guard restores the terminal before any error reaches main's caller
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    run_app(&mut terminal, &mut app)
}

/// Install a file-backed subscriber at DEBUG level
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(LevelFilter::DEBUG),
        )
        .init();

    Ok(())
}

/// Raw mode and alternate screen, released on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        // Constructed first so a failed setup is still undone
        let guard = TerminalGuard;
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    let size = terminal.size()?;
    app.on_resize(size.width, size.height)?;

    loop {
        // Zero timeout while reading, so frames keep flowing between keys
        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(app, key);
                }
                Event::Resize(width, height) => app.on_resize(width, height)?,
                _ => {}
            }
        }

        if !app.running() {
            return Ok(());
        }

        app.on_tick();
        terminal.draw(|f| ui::draw(f, app))?;
    }
}

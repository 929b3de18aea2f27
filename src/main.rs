// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use config::{Config, Environment, File};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use serde_json::Value;

mod app;
mod client;
mod data;
mod events;
mod source;
mod ui;

use app::{App, View};
use client::MetricClient;
use data::FilterStore;
use source::Poller;

#[derive(Parser, Debug)]
#[command(name = "devtrack-doctor")]
#[command(about = "Diagnostic TUI for monitoring a DevTrack metrics API")]
struct Args {
    /// Base URL of the service exposing the DevTrack endpoints
    #[arg(short, long)]
    url: Option<String>,

    /// Refresh interval in seconds (0 pauses auto-refresh)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Lookback window in hours for the time-series resources
    #[arg(long)]
    hours: Option<u32>,

    /// Maximum number of request records to fetch per cycle
    #[arg(long)]
    limit: Option<u32>,

    /// Path of the persisted-filter state file
    #[arg(long)]
    filters: Option<PathBuf>,

    /// Optional config file; explicit flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch one snapshot, write an HTML detail page for the record with
    /// this id, and exit
    #[arg(long, value_name = "ID")]
    export_detail: Option<String>,
}

/// Settings resolved from defaults, config file, environment, and flags.
#[derive(Debug)]
struct Settings {
    url: String,
    refresh: Duration,
    hours: u32,
    limit: u32,
    filters: PathBuf,
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut builder = Config::builder()
        .set_default("url", "http://localhost:8000")?
        .set_default("refresh", 5i64)?
        .set_default("hours", 24i64)?
        .set_default("limit", 100_000i64)?
        .set_default("filters", "devtrack_filters.json")?;

    if let Some(ref path) = args.config {
        builder = builder.add_source(File::from(path.clone()));
    }
    builder = builder.add_source(Environment::with_prefix("DEVTRACK"));

    let config = builder.build()?;

    Ok(Settings {
        url: match args.url {
            Some(ref url) => url.clone(),
            None => config.get_string("url")?,
        },
        refresh: Duration::from_secs(match args.refresh {
            Some(refresh) => refresh,
            None => config.get_int("refresh")?.max(0) as u64,
        }),
        hours: match args.hours {
            Some(hours) => hours,
            None => config.get_int("hours")?.max(0) as u32,
        },
        limit: match args.limit {
            Some(limit) => limit,
            None => config.get_int("limit")?.max(0) as u32,
        },
        filters: match args.filters {
            Some(ref path) => path.clone(),
            None => PathBuf::from(config.get_string("filters")?),
        },
    })
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    let metric_client = MetricClient::builder()
        .endpoint(&settings.url)
        .hours(settings.hours)
        .limit(settings.limit)
        .build();

    // Handle export mode (non-interactive)
    if let Some(ref id) = args.export_detail {
        return export_detail_page(metric_client, id);
    }

    // The poller runs on the tokio runtime; the TUI loop stays on the
    // main thread and drains its events without blocking.
    let rt = tokio::runtime::Runtime::new()?;
    let poller = rt.block_on(async { Poller::spawn(metric_client, settings.refresh) });

    let store = FilterStore::new(&settings.filters);
    let app = App::new(poller, store, settings.refresh);

    run_tui(app)
}

/// Run the TUI with the given app
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal and stop the poller
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    app.shutdown();

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        // Apply any cycle outcomes that arrived since the last frame
        app.pump_poller();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Connection status / error banner
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_status_line(frame, app, chunks[1]);
            ui::common::render_tabs(frame, app, chunks[2]);

            // Render current view
            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[3]),
                View::Traffic => ui::traffic::render(frame, app, chunks[3]),
                View::Errors => ui::errors::render(frame, app, chunks[3]),
                View::Latency => ui::latency::render(frame, app, chunks[3]),
                View::Consumers => ui::consumers::render(frame, app, chunks[3]),
                View::Logs => ui::logs::render(frame, app, chunks[3]),
            }

            ui::common::render_status_bar(frame, app, chunks[4]);

            // Render detail overlay if active
            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Log rows start after header (1) + status (1) + tabs (1)
                    // + filter bar (1)
                    events::handle_mouse_event(app, mouse, 4);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch one snapshot and write the HTML detail page for a single record.
fn export_detail_page(client: MetricClient, id: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let stats = rt.block_on(client.fetch_stats(source::cycle_token()))?;

    let record = stats.entries.iter().find(|entry| {
        entry
            .get("id")
            .map(|v| match v {
                Value::String(s) => s == id,
                other => other.to_string() == id,
            })
            .unwrap_or(false)
    });

    let Some(record) = record else {
        anyhow::bail!("No record with id {} in the current snapshot", id);
    };

    let html = data::detail::render_html_page(record);
    let path = PathBuf::from(format!("devtrack_record_{}.html", id));
    std::fs::write(&path, html)?;

    println!("Wrote request detail to: {}", path.display());
    Ok(())
}

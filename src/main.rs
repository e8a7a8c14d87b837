//! # Bannergen CLI Entry Point
//!
//! This is the main entry point for the banner copy TUI.
//!
//! ## Overview
//!
//! Enter a movie title and, optionally, a running promotional event. The
//! form is posted to the copy-generation webhook and the returned copy is
//! split into sets and shown per banner type.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive form
//! bannergen
//!
//! # Prefill the form
//! bannergen --title "범죄도시4" --event-content "50% 할인쿠폰"
//!
//! # Generate once and print a plain-text report
//! bannergen --print --title "범죄도시4"
//!
//! # Point at another webhook for this run
//! bannergen --endpoint http://localhost:8080/hook --timeout 30
//! ```
//!
//! ## Key Bindings
//!
//! ### Form
//! - `Tab` / `Shift+Tab` - Move between fields, buttons and output
//! - `←` / `→` / `Space` - Toggle the event selector
//! - `Enter` - Press the focused button
//! - `Ctrl+G` - Generate from anywhere
//! - `Ctrl+R` - Reset the form
//! - `Esc` / `Ctrl+C` - Quit
//!
//! ### Points block
//! - `j` / `k` - Scroll
//! - `t` - Cycle theme
//! - `q` - Quit
//!
//! ### Banner tabs
//! - `←` / `→` / `1`-`3` - Switch banner tab
//! - `j` / `k` - Scroll
//! - `t` - Cycle theme
//! - `q` - Quit

use bannergen::client::{CopyClient, CopyGenerator};
use bannergen::form::{EventStatus, FormState};
use bannergen::logging;
use bannergen::ui;
use bannergen::ui::app::KeyAction;
use bannergen::ui::config::Config;
use bannergen::ui::theme::Theme;
use bannergen::ui::App;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Source of terminal events for the main loop.
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Reads from the real terminal.
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Bannergen - generate movie banner copy from a title and event details
#[derive(Parser, Debug)]
#[command(name = "bannergen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate movie banner marketing copy from a title and event details", long_about = None)]
struct Args {
    /// Webhook URL to post the form to (overrides the config file)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Theme name for this run
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Write logs to this file instead of the data directory
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Movie title to prefill (required with --print)
    #[arg(short, long, value_name = "TITLE")]
    title: Option<String>,

    /// Running event details; marks the event as present when non-blank
    #[arg(short, long, value_name = "TEXT")]
    event_content: Option<String>,

    /// Generate once and print a plain-text report instead of opening the TUI
    #[arg(long, requires = "title")]
    print: bool,
}

impl Args {
    fn initial_form(&self) -> FormState {
        let content = self.event_content.clone().unwrap_or_default();
        let status = if content.trim().is_empty() {
            EventStatus::Absent
        } else {
            EventStatus::Present
        };
        FormState::new(self.title.clone().unwrap_or_default(), status, content)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if let Err(e) = logging::init(args.log_file.as_deref()) {
        eprintln!("Warning: Logging disabled: {:#}", e);
    }

    // Leave raw mode before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<ExitCode> {
    let config = Config::load().with_overrides(
        args.endpoint.as_deref(),
        args.timeout,
        args.theme.as_deref(),
    );

    let client = CopyClient::new(config.endpoint.clone(), config.timeout())
        .context("Failed to create webhook client")?;
    tracing::info!(endpoint = %client.endpoint(), timeout = ?client.timeout(), "Client ready");

    if args.print {
        return run_print(&args, &client).await;
    }

    let theme = config.resolve_theme().unwrap_or_else(|| {
        eprintln!("Warning: Unknown theme '{}', using default", config.theme);
        Theme::default_theme()
    });

    let mut app = App::new(args.initial_form(), theme.clone());

    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader, &client).await;

    // Runs whether or not the loop failed
    let cleanup_result = cleanup_terminal(&mut terminal);

    // Persist a theme picked at runtime (not one passed with --theme)
    if args.theme.is_none() && app.theme.name != theme.name {
        if let Err(e) = Config::store_theme(app.theme.name) {
            tracing::warn!("Failed to save theme: {:#}", e);
            eprintln!("Warning: Failed to save theme: {:#}", e);
        }
    }

    run_result?;
    cleanup_result?;

    Ok(ExitCode::SUCCESS)
}

/// Generate once and print the report to stdout.
///
/// Exits with 2 for a blank title and 1 for a failed request.
async fn run_print(args: &Args, generator: &dyn CopyGenerator) -> Result<ExitCode> {
    let request = match args.initial_form().to_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Warning: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    eprintln!("AI가 영화 정보를 분석하고 문구를 생성 중입니다...");
    let response = match generator.generate(&request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Generation failed: {}", e);
            eprintln!("Error: {}", e.user_message());
            return Ok(ExitCode::from(1));
        }
    };

    let generated = bannergen::copy::GeneratedCopy::from_response(&response)
        .context("Failed to process webhook response")?;
    print!("{}", generated.to_report());
    Ok(ExitCode::SUCCESS)
}

/// Leave raw mode and the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
    generator: &dyn CopyGenerator,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        let size = terminal.size().context("Failed to read terminal size")?;
        app.set_terminal_width(size.width);
        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        let event = match event_reader.read_event(Duration::from_millis(250))? {
            Some(e) => e,
            None => continue,
        };

        if let Event::Key(key) = event {
            match app.handle_key(key) {
                KeyAction::Quit => app.should_quit = true,
                KeyAction::Generate => {
                    // The request blocks the loop; draw the busy notice first.
                    app.generate(generator, |app| {
                        terminal
                            .draw(|f| ui::render(f, app))
                            .map(|_| ())
                            .context("Failed to draw terminal UI")
                    })
                    .await;
                }
                KeyAction::None => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

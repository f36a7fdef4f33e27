use anyhow::{Result, bail};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sendlog::api::ApiClient;
use sendlog::app::{App, Mode};
use sendlog::cli::{Cli, Command};
use sendlog::config::Config;
use sendlog::ui::render;
use sendlog::unsubscribe::{UnsubscribeFlow, UnsubscribeState};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Unsubscribe { k, to, from }) = &cli.command {
        init_logging(false)?;
        return run_unsubscribe(&cli, k, to, from);
    }

    init_logging(true)?;

    let config = Arc::new(Config::load(cli.config_path().as_deref()));
    let api_config = cli.api_config(&config)?;
    let client = ApiClient::new(&api_config)?;
    let base_url = client.base_url().to_string();
    tracing::info!("Starting dashboard against {}", base_url);

    let mut app = App::new(config, Arc::new(client), Local::now().date_naive());
    if let Some(date) = cli.date {
        app.view.set_date(date);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &base_url);

    // Nothing may touch the view after this point
    if app.fetch_in_flight() {
        tracing::debug!("Abandoning in-flight fetch on exit");
    }
    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    base_url: &str,
) -> Result<()> {
    let mut tick = 0usize;

    loop {
        // Fetch whenever page, size or date changed, then apply finished fetches
        app.sync_fetch();
        app.poll_fetch();

        let today = Local::now().date_naive();
        if today != app.view.today() {
            app.view.set_today(today);
        }
        app.expire_toast(Instant::now());

        terminal.draw(|f| render(app, f, tick, base_url))?;
        tick = tick.wrapping_add(1);

        // Poll with timeout so the spinner animates and results get picked up
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key.code),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved => app.hover_at(mouse.column, mouse.row),
                MouseEventKind::Down(_) => {
                    if app.mode == Mode::Browse {
                        app.handle_click(mouse.column, mouse.row);
                    }
                }
                MouseEventKind::ScrollDown => app.next_row(),
                MouseEventKind::ScrollUp => app.previous_row(),
                _ => {}
            },
            Event::Resize(_, _) => {
                // Geometry is recomputed on the next draw
                app.hover = None;
            }
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode) {
    match app.mode {
        Mode::Browse => match code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Esc => {
                app.hover = None;
                app.dismiss_toast();
            }
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            KeyCode::Char('h') | KeyCode::Left => app.view.previous_page(),
            KeyCode::Char('l') | KeyCode::Right => app.view.next_page(),
            KeyCode::Char('g') | KeyCode::Home => app.view.set_page(1),
            KeyCode::Char('G') | KeyCode::End => {
                let last = app.view.total_pages();
                app.view.set_page(last);
            }
            KeyCode::Char('s') => app.view.cycle_page_size(),
            KeyCode::Char('f') => app.cycle_responds_filter(),
            KeyCode::Char('d') => app.start_date_input(),
            KeyCode::Char('[') => app.view.shift_date(-1),
            KeyCode::Char(']') => app.view.shift_date(1),
            KeyCode::Char('t') => {
                let today = app.view.today();
                app.view.set_date(today);
            }
            KeyCode::Char('b') => app.toggle_preview(),
            KeyCode::Enter => app.open_detail(),
            KeyCode::Char('R') => app.reload(),
            _ => {}
        },
        Mode::DateInput => match code {
            KeyCode::Enter => app.confirm_date_input(),
            KeyCode::Esc => app.cancel_date_input(),
            KeyCode::Backspace => app.pop_date_char(),
            KeyCode::Char(c) => app.push_date_char(c),
            _ => {}
        },
        Mode::Detail => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_detail(),
            _ => {}
        },
    }
}

fn run_unsubscribe(cli: &Cli, k: &str, to: &str, from: &str) -> Result<()> {
    let config = Config::load(cli.config_path().as_deref());
    let api_config = cli.api_config(&config)?;
    let client = ApiClient::new(&api_config)?;

    let mut flow = UnsubscribeFlow::new(k, to, from);
    tracing::info!(
        "Unsubscribing {} from {} via {}",
        flow.request().to,
        flow.request().from,
        client.base_url()
    );
    flow.submit(&client);
    if let UnsubscribeState::Failed(_) = flow.state() {
        bail!("{}", flow.summary());
    }
    println!("{}", flow.summary());
    Ok(())
}

/// The dashboard owns the terminal, so it logs to a file; the one-shot
/// subcommand logs to stderr.
fn init_logging(to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into());

    if to_file {
        let dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("sendlog");
        std::fs::create_dir_all(&dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("sendlog.log"))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(())
}

mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod ui;

use app::{AfterFetch, App, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use db::Database;
use error::{Result, SkycastError};
use logic::rules::{spawn_derive, InsightEvent};
use logic::weather_service::FetchEvent;
use logic::WeatherService;
use models::LocationQuery;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing_subscriber::EnvFilter;
use ui::screens::{DashboardScreen, ForecastScreen, InsightsScreen, SearchScreen};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; -v flags set the default, RUST_LOG still wins
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match &cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive()?;
            return Ok(());
        }
        Some(Commands::Check) => {
            return run_check(&cli).await;
        }
        None => {}
    }

    // Load configuration
    let config = match Config::load(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `skycast init` to create one.");
            std::process::exit(1);
        }
    };

    // Initialize database
    let db = Database::open(cli.data_dir.as_ref())?;
    match db.prune_cache(30) {
        Ok(removed) if removed > 0 => {
            tracing::debug!(removed, "Pruned stale cached reports");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Cache prune failed"),
    }

    // Create app and weather service
    let mut app = App::new(config.clone(), db.clone())?;
    let service = WeatherService::new(&config, db);

    let (fetch_tx, fetch_rx) = tokio::sync::mpsc::unbounded_channel::<FetchEvent>();
    let (insight_tx, insight_rx) = tokio::sync::mpsc::unbounded_channel::<InsightEvent>();

    // A cached report can be analyzed right away; a live fetch replaces
    // it (and its insight) when it lands.
    if let Some((snapshot, generation)) = app.begin_cached_derivation() {
        spawn_derive(snapshot, generation, insight_tx.clone());
    }
    let initial = service.initial_query(&config);
    let generation = app.begin_fetch(&initial);
    service.spawn_fetch(initial, generation, fetch_tx.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let mut channels = Channels {
        fetch_tx,
        fetch_rx,
        insight_tx,
        insight_rx,
    };
    let result = run_app(&mut terminal, &mut app, &service, &mut channels).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_check(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    println!("Config OK (default city: {})", config.location.default_city);

    let db = Database::open(cli.data_dir.as_ref())?;
    println!("Database OK at {}", db.path().display());

    let service = WeatherService::new(&config, db);
    let status = service.check_connection().await;
    if status.connected {
        println!("{}: OK", status.provider);
    } else {
        println!("{}: OFFLINE", status.provider);
    }

    Ok(())
}

struct Channels {
    fetch_tx: UnboundedSender<FetchEvent>,
    fetch_rx: UnboundedReceiver<FetchEvent>,
    insight_tx: UnboundedSender<InsightEvent>,
    insight_rx: UnboundedReceiver<InsightEvent>,
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    service: &WeatherService,
    channels: &mut Channels,
) -> Result<()>
where
    SkycastError: From<<B as ratatui::backend::Backend>::Error>,
{
    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen = DashboardScreen::new(app.report.as_ref(), app.insight.as_ref())
                        .deriving(app.deriving)
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Forecast => {
                    let screen = ForecastScreen::new(app.report.as_ref());
                    f.render_widget(screen, area);
                }
                Screen::Insights => {
                    let screen = InsightsScreen::new(app.insight.as_ref())
                        .deriving(app.deriving)
                        .with_selection(app.insights_state.selected_index);
                    f.render_widget(screen, area);
                }
                Screen::Search => {
                    // The dashboard stays visible under the overlay.
                    let screen = DashboardScreen::new(app.report.as_ref(), app.insight.as_ref())
                        .deriving(app.deriving)
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);

                    let overlay = SearchScreen::new(&app.search_state.query)
                        .with_selection(app.search_state.selected_city)
                        .fetching(app.fetching);
                    f.render_widget(overlay, area);
                }
            }
        })?;

        // Handle input with timeout so async results keep flowing
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let searching = app.screen == Screen::Search;
                match key.code {
                    KeyCode::Char('q') if !searching => {
                        app.quit();
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Esc => {
                        app.switch_screen(Screen::Dashboard);
                    }
                    KeyCode::Char(c) if !searching => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, service, &channels.fetch_tx, key.code);
                        }
                    }
                    _ => {
                        handle_screen_input(app, service, &channels.fetch_tx, key.code);
                    }
                }
            }
        }

        // Drain async results; stale generations are dropped inside App.
        while let Ok(fetch_event) = channels.fetch_rx.try_recv() {
            match app.handle_fetch_event(fetch_event) {
                AfterFetch::Derive(snapshot, generation) => {
                    spawn_derive(snapshot, generation, channels.insight_tx.clone());
                }
                AfterFetch::Fallback(query) => {
                    let generation = app.begin_fetch(&query);
                    service.spawn_fetch(query, generation, channels.fetch_tx.clone());
                }
                AfterFetch::None => {}
            }
        }
        while let Ok(insight_event) = channels.insight_rx.try_recv() {
            app.handle_insight_event(insight_event);
        }

        if app.should_auto_refresh() {
            let query = app.refresh_query();
            let generation = app.begin_fetch(&query);
            service.spawn_fetch(query, generation, channels.fetch_tx.clone());
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(
    app: &mut App,
    service: &WeatherService,
    fetch_tx: &UnboundedSender<FetchEvent>,
    code: KeyCode,
) {
    match app.screen {
        Screen::Dashboard | Screen::Forecast => {
            if let KeyCode::Char('r') = code {
                let query = app.refresh_query();
                let generation = app.begin_fetch(&query);
                service.spawn_fetch(query, generation, fetch_tx.clone());
            }
        }
        Screen::Insights => {
            let count = app
                .insight
                .as_ref()
                .map(|i| i.recommendations.len())
                .unwrap_or(0);
            match code {
                KeyCode::Up => app.insights_state.prev(),
                KeyCode::Down => app.insights_state.next(count),
                _ => {}
            }
        }
        Screen::Search => match code {
            KeyCode::Enter => {
                let city = app.search_state.submit();
                if !city.is_empty() {
                    let query = LocationQuery::City(city);
                    let generation = app.begin_fetch(&query);
                    service.spawn_fetch(query, generation, fetch_tx.clone());
                    app.switch_screen(Screen::Dashboard);
                }
            }
            KeyCode::Up => app.search_state.prev_city(),
            KeyCode::Down => app.search_state.next_city(),
            KeyCode::Backspace => {
                app.search_state.query.pop();
            }
            KeyCode::Char(c) => {
                app.search_state.query.push(c);
            }
            _ => {}
        },
    }
}

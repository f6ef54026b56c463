mod app;
mod config;
mod error;
mod fixtures;
mod gateway;
mod money;
mod render;
mod state;
mod store;
mod theme;
mod ui;
mod widgets;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use gateway::{Latency, SimulatedGateway};
use render::{Component, Layout, Site};
use store::{FileStore, MemoryStore, PreferenceStore};
use theme::SiteTheme;

#[derive(Parser, Debug)]
#[command(name = "tuskblocks")]
#[command(version)]
#[command(about = "Render and play with TuskPHP website components")]
struct Args {
    /// Print the component registry as JSON
    #[arg(short, long)]
    list: bool,

    /// Print the markup of a component (repeat for several)
    #[arg(short, long, value_name = "NAME")]
    render: Vec<Component>,

    /// Wrap the output in a full HTML document (all components if none given)
    #[arg(short, long)]
    page: bool,

    /// Site theme for this run
    #[arg(short, long)]
    theme: Option<SiteTheme>,

    /// Listing layout for this run (grid or list)
    #[arg(long)]
    layout: Option<Layout>,

    /// Ignore saved visitor preferences
    #[arg(long)]
    fresh: bool,
}

impl Args {
    fn is_cli(&self) -> bool {
        self.list || self.page || !self.render.is_empty()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The TUI owns the terminal, so it logs to a file instead
    let _guard = if args.is_cli() {
        init_logging(None);
        None
    } else {
        init_logging(Some(&AppConfig::data_home()?))
    };

    let mut config = AppConfig::load()?;
    if let Some(theme) = args.theme {
        config.render.theme = theme;
    }
    if let Some(layout) = args.layout {
        config.render.layout = layout;
    }

    if args.is_cli() {
        return run_cli(&args, &config);
    }

    // Run TUI
    run_tui(config, args.fresh).await
}

fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::from_default_env());
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "tuskblocks.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
            None
        }
    }
}

fn open_store(config: &AppConfig, fresh: bool) -> Result<Box<dyn PreferenceStore>> {
    if fresh {
        return Ok(Box::new(MemoryStore::new()));
    }
    Ok(Box::new(FileStore::new(config.preferences_dir()?)))
}

fn run_cli(args: &Args, config: &AppConfig) -> Result<()> {
    if args.list {
        let registry: Vec<_> = Component::ALL
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name(),
                    "description": c.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }

    let store = open_store(config, args.fresh)?;
    let mut site = Site::new(config.render.clone(), store.as_ref(), config.prefers_dark);
    site.palette = theme::load_palette(config.render.theme);

    let components: &[Component] = if args.render.is_empty() {
        &Component::PAGE
    } else {
        &args.render
    };
    tracing::debug!("Rendering {} component(s)", components.len());

    let markup = if args.page {
        render::page(components, &site)
    } else {
        render::fragments(components, &site)
    };
    println!("{}", markup.into_string());
    Ok(())
}

async fn run_tui(config: AppConfig, fresh: bool) -> Result<()> {
    let store = open_store(&config, fresh)?;
    let gateway = Arc::new(SimulatedGateway::new(Latency::default()));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, store, gateway);
    tracing::info!("Playground started");

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

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

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                                app.status_message_time = Some(std::time::Instant::now());
                            }
                        }
                    }
                }
            }
        }

        // Timers and finished requests
        if let Err(e) = app.tick().await {
            tracing::warn!("Tick failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_components() {
        let args = Args::try_parse_from(["tuskblocks", "-r", "pricing-table", "--render", "dark_mode", "--page"]).unwrap();
        assert_eq!(args.render, vec![Component::PricingTable, Component::DarkMode]);
        assert!(args.page);
        assert!(args.is_cli());
    }

    #[test]
    fn test_args_reject_unknown_component() {
        assert!(Args::try_parse_from(["tuskblocks", "--render", "carousel-3d"]).is_err());
    }

    #[test]
    fn test_no_flags_starts_the_playground() {
        let args = Args::try_parse_from(["tuskblocks", "--theme", "neon"]).unwrap();
        assert_eq!(args.theme, Some(SiteTheme::Neon));
        assert!(!args.is_cli());
    }
}

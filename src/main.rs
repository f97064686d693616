use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cirrus_core::{AppError, Config};
use cirrus_widget::WeatherWidget;

mod app;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

/// Redraw interval while idle; keeps the loading indicator current
const TICK_RATE: Duration = Duration::from_millis(100);

/// Current weather and favorite cities in the terminal
#[derive(Parser, Debug)]
#[command(name = "cirrus")]
#[command(about = "Current weather for your location or any city, with saved favorites")]
struct Args {
    /// Config file (defaults to <config dir>/cirrus/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Log file (defaults to <data dir>/cirrus/cirrus.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn build_widget(args: &Args) -> Result<WeatherWidget, AppError> {
    let (config, _validation) = Config::load_validated(args.config.as_deref())?;
    WeatherWidget::from_config(&config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(cirrus_core::default_log_file);
    cirrus_core::init(&log_file)?;

    let widget = match build_widget(&args) {
        Ok(w) => w,
        Err(e) => {
            tracing::error!("Failed to start widget: {}", e);
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    tracing::info!("Cirrus started");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let mut app = App::new(widget);
    app.start();
    let result = run(&mut terminal, &mut app).await;

    tui::restore()?;
    terminal.show_cursor()?;

    tracing::info!("Cirrus shutting down");
    result
}

async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new(TICK_RATE);

    while !app.should_quit {
        let view = app.widget.view();
        terminal.draw(|frame| ui::render(frame, &view, &app.ui))?;

        match events.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }
    }

    Ok(())
}

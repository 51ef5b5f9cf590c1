use std::path::PathBuf;
use std::time::Instant;
use anyhow::Result;
use clap::Parser;

mod app;
mod config;
mod handler;
mod input;
mod logging;
mod tui;
mod ui;

use app::App;
use config::Config;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "aichat")]
#[command(version, about = "Terminal chat shell with a simulated conversation partner")]
struct Cli {
    /// Path to a config file (defaults to <config dir>/aichat/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let config = Config::load(cli.config.as_deref())?;
    tracing::info!(?config, "starting aichat");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let result = run(&mut terminal, &config).await;

    tui::restore()?;
    if let Err(e) = &result {
        tracing::error!("exited with error: {:#}", e);
    }
    result
}

async fn run(terminal: &mut Tui, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(config.tick_rate());

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        let Some(event) = events.next().await else {
            break;
        };
        handler::handle_event(&mut app, event);
        // Surface any notice raised by this event before the next draw
        app.present_pending_notice(Instant::now());
    }

    Ok(())
}

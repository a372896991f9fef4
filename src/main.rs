//! Application entry point — media transcriber session.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run, and writes
//!    that default out so there is a file to edit).
//! 3. Create a single-threaded [`tokio`] runtime.
//! 4. Build the HTTP transcription service client from config.
//! 5. Spawn the progress printer fed by [`WorkflowEvent`]s.
//! 6. Load the language catalog (failure is logged, never fatal).
//! 7. Read actions from stdin until `quit` or end of input.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use media_transcriber::{
    app::{Command, Outcome, Session, HELP},
    config::{AppConfig, AppPaths},
    service::HttpTranscriptionService,
    workflow::WorkflowEvent,
};

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("media-transcriber starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    let settings_file = AppPaths::new().settings_file;
    if !settings_file.exists() {
        match config.save_to(&settings_file) {
            Ok(()) => log::info!("wrote default settings to {}", settings_file.display()),
            Err(e) => log::warn!("Failed to write default settings: {e}"),
        }
    }

    // 3. All work runs on one thread; only the catalog fetch and the
    //    transcription request suspend.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(run(config))
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    // 4. Service client
    let service = Arc::new(HttpTranscriptionService::from_config(&config.service));
    log::info!("transcription service at {}", service.base_url());
    let links = service.links();

    // 5. Progress printer — shows the Processing label while a request is
    //    in flight.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<WorkflowEvent>();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if let WorkflowEvent::Processing { label } = event {
                println!("{label}");
            }
        }
    });

    // 6. Session + language catalog
    let mut session = Session::new(service, links, &config.defaults).with_events(event_tx);
    session.initialise(&config.defaults).await;

    println!("{HELP}\n");
    println!("{}", session.view());

    // 7. Action loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match session.dispatch(command).await {
            Ok(Outcome::Render(view)) => println!("{view}"),
            Ok(Outcome::Message(text)) => println!("{text}"),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                if !e.is_shown_in_view() {
                    eprintln!("{e}");
                }
                println!("{}", session.view());
            }
        }
    }

    log::info!("session closed");
    Ok(())
}

//! Application startup
//!
//! Logging initialisation, configuration resolution and the operator session
//! loop: start the engine, wait for a decode, classify it, validate when a
//! ticket identity exists, record it to history, render, repeat. The engine
//! is torn down on every exit path.

use std::io::IsTerminal;
use std::sync::Arc;

use clap::Parser;

use crate::app::cli::args::Args;
use crate::app::cli::config::{ConfigError, ConsoleConfig};
use crate::app::cli::display;
use crate::app::console::TerminalCamera;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{init_logging, reconfigure_logging};
use crate::history::{ScanHistory, ScanHistoryEntry};
use crate::payload;
use crate::scanner::engine::ScannerEngine;
use crate::scanner::error::EngineError;
use crate::scanner::types::ScanEvent;
use crate::validation::coordinator::ValidationCoordinator;
use crate::validation::error::TransportError;
use crate::validation::transport::HttpTransport;

#[derive(Debug, thiserror::Error)]
enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Scanner failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Session event channel was already taken")]
    Subscribe,
}

impl crate::core::error_handling::ContextualError for ConsoleError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ConsoleError::Config(err) => err.is_user_actionable(),
            ConsoleError::Transport(err) => err.is_user_actionable(),
            ConsoleError::Engine(err) => err.is_user_actionable(),
            ConsoleError::Subscribe => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConsoleError::Config(err) => err.user_message(),
            ConsoleError::Transport(err) => err.user_message(),
            ConsoleError::Engine(err) => err.user_message(),
            ConsoleError::Subscribe => None,
        }
    }
}

/// Initialize application startup
pub fn startup() {
    let args = Args::parse();

    let use_color = (args.color || std::io::stdout().is_terminal()) && !args.no_color;
    if let Err(err) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        args.log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error initialising logging: {}", err);
        std::process::exit(1);
    }

    log::info!(
        "gatescan {} starting ({} {})",
        env!("CARGO_PKG_VERSION"),
        crate::GIT_HASH,
        crate::BUILD_TIME
    );

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error starting async runtime: {}", err);
            std::process::exit(1);
        }
    };

    let exit_code = runtime.block_on(run(args));
    std::process::exit(exit_code);
}

async fn run(args: Args) -> i32 {
    let config = match ConsoleConfig::resolve(&args).await {
        Ok(config) => config,
        Err(err) => {
            log_error_with_context(&err, "configuration loading");
            return 1;
        }
    };

    // Config file may raise or lower verbosity relative to the CLI defaults
    if args.log_level.is_none() {
        if let Some(level) = &config.log_level {
            let _ = reconfigure_logging(Some(level));
        }
    }
    log::debug!("Resolved configuration: {:?}", config);

    match run_console(config).await {
        Ok(()) => 0,
        Err(err) => {
            log_error_with_context(&err, "scanning session");
            1
        }
    }
}

async fn run_console(config: ConsoleConfig) -> Result<(), ConsoleError> {
    let terminal = TerminalCamera::new();
    let engine = ScannerEngine::new(terminal.clone(), terminal, config.platform);
    let transport = HttpTransport::new(config.endpoints())?;
    let coordinator = ValidationCoordinator::new(Arc::new(transport));
    let history = ScanHistory::new();

    let mut events = engine.subscribe().ok_or(ConsoleError::Subscribe)?;

    let result = session_loop(&engine, &coordinator, &history, &config, &mut events).await;

    // Teardown on every exit path; no camera track may outlive the session
    engine.teardown().await;
    display::print_history(&history.snapshot());
    result
}

async fn session_loop(
    engine: &ScannerEngine,
    coordinator: &ValidationCoordinator,
    history: &ScanHistory,
    config: &ConsoleConfig,
    events: &mut tokio::sync::mpsc::Receiver<ScanEvent>,
) -> Result<(), ConsoleError> {
    if let Err(err) = engine.start().await {
        if let Some(hint) = err.remediation_hint(config.platform) {
            display::render_hint(hint);
        }
        return Err(err.into());
    }

    // Honour an explicit device preference once scanning is up
    if let Some(device) = &config.device {
        let session = engine.session().await;
        if session.active_device_id.as_deref() != Some(device.as_str()) {
            if let Err(err) = engine.switch_device(device).await {
                log::warn!("Could not switch to device '{}': {}", device, err);
            }
        }
    }

    println!("Scan a code, or type a payload and press enter (Ctrl-D to quit).");

    loop {
        match events.recv().await {
            Some(ScanEvent::Decoded(event)) => {
                let parsed = payload::parse(&event.text);
                history.record(ScanHistoryEntry::new(event.text.clone(), event.format));

                match payload::extract_ticket_identity(&parsed) {
                    Some(identity) => {
                        let outcome = coordinator.validate(&identity).await;
                        display::render_outcome(&outcome);
                    }
                    None => display::render_non_ticket(&parsed),
                }

                // The engine auto-stopped on decode; rearm for the next scan.
                // Validation outcomes never restart scanning by themselves.
                if let Err(err) = engine.start().await {
                    if let Some(hint) = err.remediation_hint(config.platform) {
                        display::render_hint(hint);
                    }
                    return Err(err.into());
                }
            }
            Some(ScanEvent::Ended { message }) => {
                if let Some(message) = message {
                    log::info!("Scan session ended: {}", message);
                }
                return Ok(());
            }
            None => return Ok(()),
        }
    }
}

//! Dawa - appointment booking for a small healthcare practice
//!
//! Console front end over the booking form and the admin dashboard.
//! Appointments persist as a JSON snapshot in the platform data directory.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod console;
mod state;
mod viewmodel;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Dawa");

    let config = match dawa_core::ClinicConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tokio runtime for notification dispatch
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    // Initialize application state
    let app_state = match state::AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();

    let result = runtime.block_on(async {
        console::Console::new(&app_state, stdin, stdout.lock())
            .run()
            .await
    });

    if let Err(e) = result {
        tracing::error!("Console failed: {}", e);
        std::process::exit(1);
    }
}

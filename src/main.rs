#![warn(clippy::all, clippy::pedantic)]

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use diary_upsert::Cli;
use diary_upsert::app::{dispatch, error_exit_code};
use diary_upsert::config::API_KEY_ENV;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Install default crypto provider for Rustls TLS.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report line.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {e}");
    }

    let env_api_key = std::env::var(API_KEY_ENV).ok();
    let today = Utc::now().date_naive();

    match dispatch(&cli, env_api_key.as_deref(), today, &mut std::io::stdout()).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(error_exit_code(&err))
        }
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

use std::path::PathBuf;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the diary upsert client.
///
/// Configuration problems are detected before any request is issued and map
/// to exit status 2. API errors cover failures below the HTTP application
/// layer (the server never produced a usable JSON object) and abort the run.
/// HTTP-level application failures are *not* errors: they are reported
/// verbatim in the printed outcome.
#[derive(Debug, Error)]
pub enum UpsertError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ── API / Transport ─────────────────────────────────────────────────
    #[error(transparent)]
    Api(#[from] ApiError),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing API key. Use --api-key or API_KEY env.")]
    MissingApiKey,

    #[error("Diary file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read diary file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Request timeout must be at least one second")]
    InvalidTimeout,
}

// ─── API errors ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned status {status} with an undecodable body: {message}")]
    Decode {
        method: String,
        url: String,
        status: u16,
        message: String,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl UpsertError {
    /// Process exit status for a run that ended with this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Api(_) => 1,
        }
    }
}

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod diary;
pub mod error;
pub mod utils;
pub mod workflow;

pub use api::{DiaryApi, DiaryClient, RequestOutcome};
pub use cli::Cli;
pub use config::Settings;
pub use diary::DiaryPayload;
pub use error::{ApiError, ConfigError, UpsertError};
pub use workflow::{UpsertAction, UpsertReport, upsert};

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::api::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_API_BASE_URL: &str = "https://api.moltbb.com";

/// `diary-upsert` - Upsert a runtime diary from a local markdown file.
///
/// Looks up the diary for the date, PATCHes it if present, POSTs otherwise,
/// and retries a conflicting POST as a PATCH.
#[derive(Parser, Debug, Clone)]
#[command(name = "diary-upsert")]
#[command(version)]
#[command(about = "Upsert runtime diary from local file", long_about = None)]
pub struct Cli {
    /// Path to local diary markdown file
    #[arg(long)]
    pub file: PathBuf,

    /// Diary date (YYYY-MM-DD). If omitted, infer from filename or UTC today
    #[arg(long)]
    pub date: Option<String>,

    /// Runtime API base URL
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Runtime API key. Can also use API_KEY env
    #[arg(long)]
    pub api_key: Option<String>,

    /// Execution level (0-4); out-of-range values are clamped
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub execution_level: i64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

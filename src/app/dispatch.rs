use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::api::DiaryClient;
use crate::cli::Cli;
use crate::config::Settings;
use crate::diary::{DiaryPayload, resolve_diary_date};
use crate::error::{ConfigError, UpsertError};
use crate::workflow::{UpsertReport, upsert};

/// Run one upsert and write its report line to `out`.
///
/// 1. Resolves settings; configuration errors stop here, before any request.
/// 2. Reads the diary file and builds the payload.
/// 3. Runs the lookup-then-upsert workflow.
/// 4. Prints `{action, status, body}` as one JSON line.
///
/// Returns the process exit status for a completed run (0 or 1). Failures
/// are returned as errors wrapping [`UpsertError`] so the caller can map
/// them to an exit status.
pub async fn dispatch<W: Write>(
    cli: &Cli,
    env_api_key: Option<&str>,
    today: NaiveDate,
    out: &mut W,
) -> Result<u8> {
    let settings = Settings::resolve(cli, env_api_key).map_err(UpsertError::from)?;

    let text = read_diary(&settings.file).await?;
    let diary_date = resolve_diary_date(&settings.file, settings.explicit_date.as_deref(), today);
    let payload = DiaryPayload::build(&text, diary_date, settings.execution_level);
    info!(
        file = %settings.file.display(),
        diary_date = %payload.diary_date,
        execution_level = payload.execution_level,
        api_base_url = %settings.api_base_url,
        "diary payload ready"
    );

    let client = DiaryClient::new(&settings.api_base_url, &settings.api_key, settings.timeout)
        .map_err(UpsertError::from)?;
    let report = upsert(&client, &payload).await.map_err(UpsertError::from)?;

    write_report(out, &report)?;
    Ok(report.exit_code())
}

async fn read_diary(path: &Path) -> Result<String, UpsertError> {
    tokio::fs::read_to_string(path).await.map_err(|source| {
        UpsertError::from(ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Serialize the report as a single line; non-ASCII text is written as-is.
pub fn write_report<W: Write>(out: &mut W, report: &UpsertReport) -> Result<()> {
    serde_json::to_writer(&mut *out, report).context("Failed to serialize upsert report")?;
    writeln!(out).context("Failed to write upsert report")?;
    out.flush().context("Failed to flush upsert report")
}

/// Exit status for an error returned by [`dispatch`].
pub fn error_exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<UpsertError>()
        .map_or(1, UpsertError::exit_code)
}

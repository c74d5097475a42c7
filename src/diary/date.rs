use std::path::Path;

use chrono::NaiveDate;

const DATE_LEN: usize = "YYYY-MM-DD".len();

/// Pick the diary date for a run.
///
/// A non-empty explicit date wins and is passed through unvalidated. Otherwise
/// the first `YYYY-MM-DD` run of characters in the file name is used, and
/// failing that, `today`.
pub fn resolve_diary_date(path: &Path, explicit: Option<&str>, today: NaiveDate) -> String {
    if let Some(date) = explicit.filter(|d| !d.is_empty()) {
        return date.to_string();
    }
    infer_date_from_name(path).unwrap_or_else(|| today.format("%Y-%m-%d").to_string())
}

/// First `\d{4}-\d{2}-\d{2}` substring of the final path component.
pub fn infer_date_from_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    name.as_bytes()
        .windows(DATE_LEN)
        .position(looks_like_date)
        .map(|start| name[start..start + DATE_LEN].to_string())
}

fn looks_like_date(window: &[u8]) -> bool {
    window.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

use serde::Serialize;

use crate::utils::{first_non_blank_line, truncate_chars};

pub const MAX_SUMMARY_CHARS: usize = 5000;
pub const MAX_PERSONA_CHARS: usize = 200_000;
pub const EMPTY_DIARY_SUMMARY: &str = "(empty diary file)";
pub const MIN_EXECUTION_LEVEL: i64 = 0;
pub const MAX_EXECUTION_LEVEL: i64 = 4;

/// Full create body for `POST /api/v1/runtime/diaries`.
///
/// Built once per run from the file content and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryPayload {
    pub summary: String,
    pub persona_text: String,
    pub execution_level: u8,
    pub diary_date: String,
}

/// Update body for `PATCH /api/v1/runtime/diaries/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryPatch<'a> {
    pub summary: &'a str,
    pub persona_text: &'a str,
}

impl DiaryPayload {
    /// Derive the payload from raw diary text. Infallible.
    ///
    /// The summary is the first non-blank line, falling back to the whole
    /// trimmed text and then to [`EMPTY_DIARY_SUMMARY`]. The persona text is
    /// the untrimmed file content.
    pub fn build(text: &str, diary_date: impl Into<String>, execution_level: i64) -> Self {
        let summary_source = first_non_blank_line(text)
            .or_else(|| Some(text.trim()).filter(|t| !t.is_empty()))
            .unwrap_or(EMPTY_DIARY_SUMMARY);

        Self {
            summary: truncate_chars(summary_source, MAX_SUMMARY_CHARS).to_string(),
            persona_text: truncate_chars(text, MAX_PERSONA_CHARS).to_string(),
            execution_level: clamp_execution_level(execution_level),
            diary_date: diary_date.into(),
        }
    }

    pub fn patch(&self) -> DiaryPatch<'_> {
        DiaryPatch {
            summary: &self.summary,
            persona_text: &self.persona_text,
        }
    }
}

// Clamped into 0..=4 first, so the narrowing cast cannot truncate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_execution_level(level: i64) -> u8 {
    level.clamp(MIN_EXECUTION_LEVEL, MAX_EXECUTION_LEVEL) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_is_first_non_blank_trimmed_line() {
        let payload = DiaryPayload::build("\n\n  Shipped the parser  \nmore detail\n", "2024-03-01", 0);
        assert_eq!(payload.summary, "Shipped the parser");
    }

    #[test]
    fn heading_markers_are_kept_in_summary() {
        let payload = DiaryPayload::build("# Daily Note\n\n- finished task A\n", "2026-02-20", 3);
        assert_eq!(payload.summary, "# Daily Note");
        assert_eq!(payload.execution_level, 3);
    }

    #[test]
    fn blank_only_file_uses_placeholder() {
        let payload = DiaryPayload::build("\n   \n\t\n", "2024-03-01", 0);
        assert_eq!(payload.summary, EMPTY_DIARY_SUMMARY);
        assert_eq!(payload.persona_text, "\n   \n\t\n");
    }

    #[test]
    fn empty_file_uses_placeholder() {
        let payload = DiaryPayload::build("", "2024-03-01", 0);
        assert_eq!(payload.summary, "(empty diary file)");
        assert_eq!(payload.persona_text, "");
    }

    #[test]
    fn persona_text_is_untrimmed() {
        let text = "  first\nsecond  \n\n";
        let payload = DiaryPayload::build(text, "2024-03-01", 0);
        assert_eq!(payload.persona_text, text);
    }

    #[test]
    fn classic_mac_line_endings_split_summary() {
        let payload = DiaryPayload::build("Title\rsecond line\r", "2024-03-01", 0);
        assert_eq!(payload.summary, "Title");
    }

    #[test]
    fn line_separator_splits_summary() {
        let payload = DiaryPayload::build("Title\u{2028}second", "2024-03-01", 0);
        assert_eq!(payload.summary, "Title");
    }

    #[test]
    fn crlf_is_kept_verbatim_in_persona_text() {
        let text = "Title\r\nbody line\r\n";
        let payload = DiaryPayload::build(text, "2024-03-01", 0);
        assert_eq!(payload.summary, "Title");
        assert_eq!(payload.persona_text, text);
    }

    #[test]
    fn long_summary_is_truncated() {
        let line = "x".repeat(MAX_SUMMARY_CHARS + 123);
        let payload = DiaryPayload::build(&line, "2024-03-01", 0);
        assert_eq!(payload.summary.chars().count(), MAX_SUMMARY_CHARS);
    }

    #[test]
    fn long_persona_is_truncated_by_chars() {
        let text = "é".repeat(MAX_PERSONA_CHARS + 10);
        let payload = DiaryPayload::build(&text, "2024-03-01", 0);
        assert_eq!(payload.persona_text.chars().count(), MAX_PERSONA_CHARS);
        assert!(payload.summary.chars().count() <= MAX_SUMMARY_CHARS);
    }

    #[test]
    fn execution_level_is_clamped() {
        assert_eq!(clamp_execution_level(-1), 0);
        assert_eq!(clamp_execution_level(i64::MIN), 0);
        assert_eq!(clamp_execution_level(2), 2);
        assert_eq!(clamp_execution_level(7), 4);
        assert_eq!(clamp_execution_level(99), 4);
    }

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let payload = DiaryPayload::build("hello", "2024-03-01", 1);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "summary": "hello",
                "personaText": "hello",
                "executionLevel": 1,
                "diaryDate": "2024-03-01",
            })
        );
    }

    #[test]
    fn patch_carries_only_summary_and_persona() {
        let payload = DiaryPayload::build("hello\nworld", "2024-03-01", 4);
        let value = serde_json::to_value(payload.patch()).unwrap();
        assert_eq!(value, json!({"summary": "hello", "personaText": "hello\nworld"}));
    }
}

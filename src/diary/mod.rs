//! Local side of the upsert: turning a diary file into a request payload.

pub mod date;
pub mod payload;

pub use date::{infer_date_from_name, resolve_diary_date};
pub use payload::{
    DiaryPatch, DiaryPayload, EMPTY_DIARY_SUMMARY, MAX_EXECUTION_LEVEL, MAX_PERSONA_CHARS,
    MAX_SUMMARY_CHARS, MIN_EXECUTION_LEVEL, clamp_execution_level,
};

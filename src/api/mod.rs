//! Client for the runtime diary REST endpoints.

pub mod client;
pub mod http_client;
pub mod traits;
pub mod types;

pub use client::{DIARIES_PATH, DiaryClient};
pub use http_client::{DEFAULT_TIMEOUT_SECS, build_api_client_with_timeout};
pub use traits::DiaryApi;
pub use types::{CONFLICT_CODE, JsonObject, RequestOutcome, is_success_response, is_truthy};

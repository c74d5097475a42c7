use async_trait::async_trait;

use super::types::RequestOutcome;
use crate::diary::DiaryPayload;
use crate::error::ApiError;

/// Remote diary operations the upsert workflow depends on.
#[async_trait]
pub trait DiaryApi: Send + Sync {
    /// Id of the diary already stored for `diary_date`.
    ///
    /// Fails open: any unsuccessful or malformed listing is `Ok(None)`. Only
    /// transport and decode failures are errors.
    async fn find_existing_id(&self, diary_date: &str) -> Result<Option<String>, ApiError>;

    /// Create a diary from the full payload.
    async fn create(&self, payload: &DiaryPayload) -> Result<RequestOutcome, ApiError>;

    /// Overwrite summary and persona text of diary `diary_id`.
    async fn update(
        &self,
        diary_id: &str,
        payload: &DiaryPayload,
    ) -> Result<RequestOutcome, ApiError>;
}

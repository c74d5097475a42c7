//! Lookup-then-upsert for one diary.
//!
//! 1. Look up an existing diary for the payload's date.
//! 2. PATCH it if found.
//! 3. Otherwise POST a new one.
//! 4. If the POST reports the date is already taken, PATCH the id it names.

use serde::Serialize;
use strum::Display;
use tracing::{info, warn};

use crate::api::{DiaryApi, JsonObject, RequestOutcome, is_success_response};
use crate::diary::DiaryPayload;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UpsertAction {
    /// Updated a diary found by the date lookup.
    Patch,
    /// Created a new diary (or the create attempt failed).
    Post,
    /// Create collided with an existing diary, which was then updated.
    PatchAfterConflict,
}

/// Terminal result of a run; printed as one JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsertReport {
    pub action: UpsertAction,
    pub status: u16,
    pub body: JsonObject,
}

impl UpsertReport {
    fn from_outcome(action: UpsertAction, outcome: RequestOutcome) -> Self {
        Self {
            action,
            status: outcome.status,
            body: outcome.body,
        }
    }

    /// Final request returned 200 with a truthy `success`.
    pub fn is_success(&self) -> bool {
        is_success_response(self.status, &self.body)
    }

    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_success())
    }
}

/// Run the upsert against `api`.
///
/// Issues at most one create and at most one update. Transport and decode
/// failures abort immediately without further requests.
pub async fn upsert<A>(api: &A, payload: &DiaryPayload) -> Result<UpsertReport, ApiError>
where
    A: DiaryApi + ?Sized,
{
    if let Some(existing_id) = api.find_existing_id(&payload.diary_date).await? {
        info!(diary_id = %existing_id, "updating existing diary");
        let outcome = api.update(&existing_id, payload).await?;
        return Ok(UpsertReport::from_outcome(UpsertAction::Patch, outcome));
    }

    info!(diary_date = %payload.diary_date, "creating diary");
    let created = api.create(payload).await?;

    if let Some(conflict_id) = created.conflict_diary_id().map(str::to_string) {
        warn!(diary_id = %conflict_id, "diary already exists; retrying as update");
        let outcome = api.update(&conflict_id, payload).await?;
        return Ok(UpsertReport::from_outcome(
            UpsertAction::PatchAfterConflict,
            outcome,
        ));
    }

    Ok(UpsertReport::from_outcome(UpsertAction::Post, created))
}

use async_trait::async_trait;
use reqwest::{Client, Method, header};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::http_client::build_api_client_with_timeout;
use super::traits::DiaryApi;
use super::types::{JsonObject, RequestOutcome};
use crate::diary::DiaryPayload;
use crate::error::ApiError;

pub const DIARIES_PATH: &str = "/api/v1/runtime/diaries";
const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the runtime diary endpoints.
///
/// Every call is a single attempt; error statuses come back as regular
/// [`RequestOutcome`]s so the caller can report them verbatim.
pub struct DiaryClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl DiaryClient {
    /// `base_url` is the API origin (optionally with a path prefix), without
    /// a trailing slash.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: build_api_client_with_timeout(timeout)?,
        })
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{DIARIES_PATH}", self.base_url))?)
    }

    fn diary_url(&self, diary_id: &str) -> Result<Url, ApiError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(diary_id);
        Ok(url)
    }

    /// Send one request and decode the response body as a JSON object.
    ///
    /// An empty body decodes to an empty object. Bodies that are not a JSON
    /// object are a [`ApiError::Decode`].
    pub async fn request_json<B>(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        payload: Option<&B>,
    ) -> Result<RequestOutcome, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let transport_err = |source| ApiError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source,
        };

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(header::ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        debug!(%method, %url, "sending diary API request");
        let response = request.send().await.map_err(transport_err)?;
        let status = response.status().as_u16();
        let raw = response.text().await.map_err(transport_err)?;
        info!(%method, %url, status, "diary API responded");

        let body = decode_object(&raw).map_err(|message| ApiError::Decode {
            method: method.to_string(),
            url: url.to_string(),
            status,
            message,
        })?;
        Ok(RequestOutcome::new(status, body))
    }
}

fn decode_object(raw: &str) -> Result<JsonObject, String> {
    if raw.is_empty() {
        return Ok(JsonObject::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl DiaryApi for DiaryClient {
    async fn find_existing_id(&self, diary_date: &str) -> Result<Option<String>, ApiError> {
        let query = [
            ("startDate", diary_date),
            ("endDate", diary_date),
            ("page", "1"),
            ("pageSize", "1"),
        ];
        let outcome = self
            .request_json::<()>(Method::GET, self.collection_url()?, &query, None)
            .await?;

        let existing = outcome.first_diary_id().map(str::to_string);
        match &existing {
            Some(id) => debug!(diary_date, diary_id = %id, "found existing diary"),
            None => debug!(diary_date, status = outcome.status, "no existing diary"),
        }
        Ok(existing)
    }

    async fn create(&self, payload: &DiaryPayload) -> Result<RequestOutcome, ApiError> {
        self.request_json(Method::POST, self.collection_url()?, &[], Some(payload))
            .await
    }

    async fn update(
        &self,
        diary_id: &str,
        payload: &DiaryPayload,
    ) -> Result<RequestOutcome, ApiError> {
        let patch = payload.patch();
        self.request_json(Method::PATCH, self.diary_url(diary_id)?, &[], Some(&patch))
            .await
    }
}

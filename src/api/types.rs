use serde_json::{Map, Value};

/// Response code the API returns when a create collides with an existing
/// diary for the same date.
pub const CONFLICT_CODE: &str = "DIARY_ALREADY_EXISTS_USE_PATCH";

pub type JsonObject = Map<String, Value>;

/// Status plus decoded JSON object for one HTTP exchange.
///
/// Produced for every response, error statuses included.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    pub status: u16,
    pub body: JsonObject,
}

impl RequestOutcome {
    pub fn new(status: u16, body: JsonObject) -> Self {
        Self { status, body }
    }

    /// Status 200 with a truthy `success` field.
    pub fn is_success(&self) -> bool {
        is_success_response(self.status, &self.body)
    }

    /// Id of the first record of a list response, if the listing succeeded.
    ///
    /// Anything short of a successful listing with a non-empty string id in
    /// `data[0].id` yields `None`.
    pub fn first_diary_id(&self) -> Option<&str> {
        if !self.is_success() {
            return None;
        }
        self.body
            .get("data")?
            .as_array()?
            .first()?
            .get("id")
            .and_then(non_empty_str)
    }

    /// Existing diary id carried by a create-conflict response.
    pub fn conflict_diary_id(&self) -> Option<&str> {
        if self.status != 200 || success_flag(&self.body) {
            return None;
        }
        if self.body.get("code").and_then(Value::as_str) != Some(CONFLICT_CODE) {
            return None;
        }
        self.body
            .get("details")?
            .get("diaryId")
            .and_then(non_empty_str)
    }
}

pub fn is_success_response(status: u16, body: &JsonObject) -> bool {
    status == 200 && success_flag(body)
}

fn success_flag(body: &JsonObject) -> bool {
    body.get("success").is_some_and(is_truthy)
}

/// Loose JSON truthiness: `null`, `false`, zero, and empty strings, arrays or
/// objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

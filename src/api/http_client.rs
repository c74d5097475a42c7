use reqwest::Client;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// One attempt per request: the timeout bounds the whole exchange and there
/// is no retry layer on top of this client.
pub fn build_api_client_with_timeout(timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(CONNECT_TIMEOUT_SECS)))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ApiError::Client)
}

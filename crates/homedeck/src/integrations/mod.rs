//! Upstream lookups. Every integration maps transport and decode failures to
//! [`CoreError::Upstream`]; callers that render output substitute a static
//! fallback string. Nothing is retried.

pub mod dictionary;
pub mod qr;
pub mod translate;

use std::time::Duration;

use crate::error::{CoreError, CoreResult};

const USER_AGENT: &str = "homedeck/0.1";

/// Shared client builder: consistent UA and a per-call timeout.
pub fn http_client(timeout_secs: u64) -> CoreResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| CoreError::Internal(format!("failed to build http client: {e}")))
}

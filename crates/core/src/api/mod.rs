//! SiYuan kernel HTTP API client.
//!
//! Every endpoint is a JSON `POST` authenticated with `Authorization: Token
//! <token>`. Replies are wrapped in a `{code, msg, data}` envelope; a non-zero
//! code is turned into [`ApiError::Api`].

mod block;
mod document;
pub mod error;
mod notebook;
mod query;
pub mod types;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use ureq::Agent;

use crate::config::{Config, validate};
pub use error::ApiError;
pub use types::*;

/// Synchronous client for one SiYuan instance.
pub struct SiyuanClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl SiyuanClient {
    /// Create a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the configuration fails validation
    /// (missing token, empty endpoint, timeout below the minimum).
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        validate(config)?;

        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(config.timeout_ms)))
            .http_status_as_error(false)
            .proxy(None)
            .build()
            .into();

        Ok(Self {
            agent,
            base_url: config.endpoint.trim_end_matches('/').to_owned(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token shortened for display.
    pub fn masked_token(&self) -> String {
        crate::config::types::mask_token(&self.token)
    }

    /// POST `payload` to `path` and return the unwrapped `data` value.
    ///
    /// Replies without an envelope are returned as-is.
    pub fn post_value(&self, path: &str, payload: &Value) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        trace!(payload = %payload, "request body");

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send_json(payload)
            .map_err(|source| ApiError::Transport { path: path.to_string(), source })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let text = body_reader
            .read_to_string()
            .map_err(|source| ApiError::Transport { path: path.to_string(), source })?;
        trace!(status, body = %text, "response");

        if status >= 400 {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("msg").and_then(Value::as_str).map(str::to_string))
                .filter(|m| !m.is_empty())
                .unwrap_or(text);
            return Err(ApiError::Http { path: path.to_string(), status, message });
        }

        let value: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|source| ApiError::Decode { path: path.to_string(), source })?
        };

        unwrap_envelope(path, value)
    }

    /// POST and deserialize the `data` value.
    pub fn post<T: DeserializeOwned>(&self, path: &str, payload: &Value) -> Result<T, ApiError> {
        let data = self.post_value(path, payload)?;
        serde_json::from_value(data)
            .map_err(|source| ApiError::Decode { path: path.to_string(), source })
    }

    /// POST for endpoints whose reply carries no useful data.
    pub fn post_unit(&self, path: &str, payload: &Value) -> Result<(), ApiError> {
        self.post_value(path, payload).map(|_| ())
    }
}

fn unwrap_envelope(path: &str, value: Value) -> Result<Value, ApiError> {
    if value.get("code").is_none() {
        return Ok(value);
    }
    let envelope: types::Envelope = serde_json::from_value(value)
        .map_err(|source| ApiError::Decode { path: path.to_string(), source })?;
    if envelope.code != 0 {
        return Err(ApiError::Api {
            path: path.to_string(),
            code: envelope.code,
            message: envelope.msg,
        });
    }
    Ok(envelope.data)
}

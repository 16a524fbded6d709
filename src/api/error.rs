//! Error handling for the backend API module

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to decode a JSON payload from the server
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP error with status {status}: {message}")]
    Http {
        status: u16,
        message: String,
        /// The `detail` field of the error body, when the server sent one.
        detail: Option<String>,
    },
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        Self::from_status_and_body(status, message)
    }

    pub fn from_status_and_body(status: u16, body: String) -> ApiError {
        let detail = extract_detail(&body);
        let message = detail.clone().unwrap_or(body);
        ApiError::Http {
            status,
            message,
            detail,
        }
    }

    /// The backend-supplied explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Human-readable message for operators: the backend detail, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http { .. } => self.detail().unwrap_or(fallback).to_string(),
            ApiError::Reqwest(e) => format!("Network error: {}", e),
            ApiError::Decode(_) => fallback.to_string(),
        }
    }
}

/// Pull the `detail` out of a FastAPI-style error body.
///
/// `detail` is either a string or a list of validation entries with a `msg` field.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let detail = match value.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        // The call endpoint reports refusals as `{"success": false, "message": ...}`.
        _ => value.get("message").and_then(Value::as_str)?.to_string(),
    };
    let detail = detail.trim().to_string();
    (!detail.is_empty()).then_some(detail)
}

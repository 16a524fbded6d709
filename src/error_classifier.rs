use crate::api::error::ApiError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Severity of a failed backend request, used for the activity log.
    pub fn classify_api_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            ApiError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            ApiError::Http { status, .. } if *status == 401 => LogLevel::Error,
            ApiError::Http { status, .. } if *status == 403 => LogLevel::Error,
            ApiError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::from_status_and_body(status, String::new())
    }

    #[test]
    fn test_classify_http_statuses() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_api_error(&http(429)), LogLevel::Debug);
        assert_eq!(classifier.classify_api_error(&http(503)), LogLevel::Warn);
        assert_eq!(classifier.classify_api_error(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify_api_error(&http(403)), LogLevel::Error);
        assert_eq!(classifier.classify_api_error(&http(404)), LogLevel::Warn);
    }

    #[test]
    fn test_decode_errors_are_critical() {
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(
            ErrorClassifier::new().classify_api_error(&ApiError::Decode(decode)),
            LogLevel::Error
        );
    }
}

//! Error types for the dashboard utilities and the API error handler.
//!
//! Validation failures are returned to callers, who decide how to surface
//! them. Operational failures (the backend rejected a call, the network went
//! away) are never raised here: callers hand them to [`handle_api_error`].

use thiserror::Error;

use super::toast::{Severity, ToastId, ToastSink};

/// Shown when an API error carries no message.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "Une erreur est survenue";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Clé API requise")]
    ApiKeyRequired,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage unavailable")]
    Unavailable,
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not serialise stats: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("download failed: {0}")]
    Delivery(String),
}

/// A failed call to the dashboard backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", describe_api_error(.message, .status))]
pub struct ApiError {
    pub message: Option<String>,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Message suitable for a toast, falling back to the generic French text.
    pub fn display_message(&self) -> &str {
        message_or_default(self.message.as_deref())
    }
}

fn message_or_default(message: Option<&str>) -> &str {
    message
        .filter(|message| !message.is_empty())
        .unwrap_or(DEFAULT_API_ERROR_MESSAGE)
}

fn describe_api_error(message: &Option<String>, status: &Option<u16>) -> String {
    let message = message_or_default(message.as_deref());
    match status {
        Some(status) => format!("{message} (HTTP {status})"),
        None => message.to_string(),
    }
}

/// Logs `error` and shows it to the user as an error toast.
pub fn handle_api_error(sink: &mut impl ToastSink, error: &ApiError) -> ToastId {
    tracing::error!(status = error.status, error = %error, "API Error");
    sink.show_toast(error.display_message(), Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::toast::ToastStack;

    #[test]
    fn validation_message_is_french() {
        assert_eq!(ValidationError::ApiKeyRequired.to_string(), "Clé API requise");
    }

    #[test]
    fn api_error_uses_its_message() {
        let mut stack = ToastStack::default();
        let error = ApiError::new("Campagne introuvable").with_status(404);
        let id = handle_api_error(&mut stack, &error);

        let toast = stack.get(id).unwrap();
        assert_eq!(toast.message, "Campagne introuvable");
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(toast.class_name(), "toast toast-error");
    }

    #[test]
    fn api_error_falls_back_to_default_message() {
        let mut stack = ToastStack::default();
        let missing = handle_api_error(&mut stack, &ApiError::default());
        let empty = handle_api_error(&mut stack, &ApiError::new(""));

        assert_eq!(stack.get(missing).unwrap().message, DEFAULT_API_ERROR_MESSAGE);
        assert_eq!(stack.get(empty).unwrap().message, DEFAULT_API_ERROR_MESSAGE);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::new("Timeout").with_status(504);
        assert_eq!(err.to_string(), "Timeout (HTTP 504)");
        assert_eq!(ApiError::default().to_string(), DEFAULT_API_ERROR_MESSAGE);
    }

    #[test]
    fn api_error_boxes_as_std_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(ApiError::new("").with_status(500));
        assert_eq!(boxed.to_string(), "Une erreur est survenue (HTTP 500)");
    }
}

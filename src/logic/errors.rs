//! Worker error classification
//!
//! Failures from the worker gateway are classified so the status bar can show
//! a short reason, and formatted down to their root cause for toasts.

use anyhow::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401, bad api key
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

impl ErrorType {
    /// Short label for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            ErrorType::ConnectionRefused => "worker unreachable",
            ErrorType::Timeout => "timed out",
            ErrorType::Unauthorized => "unauthorized",
            ErrorType::NotFound => "not found",
            ErrorType::ServerError => "server error",
            ErrorType::NetworkError => "network error",
            ErrorType::Other => "error",
        }
    }
}

/// Classify an error based on its message and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    let error_msg = format!("{:#}", error).to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }

    // HTTP status codes surface through reqwest errors anywhere in the chain
    for cause in error.chain() {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            if let Some(status) = reqwest_err.status() {
                return match status.as_u16() {
                    401 | 403 => ErrorType::Unauthorized,
                    404 => ErrorType::NotFound,
                    500..=599 => ErrorType::ServerError,
                    _ => ErrorType::Other,
                };
            }
        }
    }

    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Message shown to the user: the reqwest error if there is one, otherwise
/// the root cause of the chain
pub fn format_error_message(error: &Error) -> String {
    for cause in error.chain() {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
    }

    error
        .chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| error.to_string())
}

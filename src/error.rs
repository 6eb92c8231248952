//! Error types and handling for the `ThoiTiet` weather backend

use serde::Serialize;
use thiserror::Error;

/// Main error type for the `ThoiTiet` backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThoiTietError {
    /// A location query was empty or whitespace only
    #[error("Empty location query")]
    EmptyQuery,

    /// Network failure or non-success status from the weather provider
    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// The weather provider did not answer within the configured timeout
    #[error("Upstream timeout: {message}")]
    UpstreamTimeout { message: String },

    /// The weather provider rejected the location or coordinates
    #[error("Invalid location: {message}")]
    InvalidLocation { message: String },

    /// The weather provider rejected our API key
    #[error("API key rejected: {message}")]
    ApiKey { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Unknown endpoint
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Known endpoint called with an unsupported HTTP method
    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },
}

/// Stable machine-readable error codes returned to the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyQuery,
    UpstreamUnavailable,
    TimeoutError,
    InvalidLocation,
    ApiKeyError,
    ValidationError,
    ConfigError,
    NotFound,
    MethodNotAllowed,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyQuery => "EMPTY_QUERY",
            ErrorCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorCode::TimeoutError => "TIMEOUT_ERROR",
            ErrorCode::InvalidLocation => "INVALID_LOCATION",
            ErrorCode::ApiKeyError => "API_KEY_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }
}

impl ThoiTietError {
    /// Create a new upstream-unavailable error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    /// Create a new upstream timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::UpstreamTimeout {
            message: message.into(),
        }
    }

    /// Create a new invalid-location error
    pub fn invalid_location<S: Into<String>>(message: S) -> Self {
        Self::InvalidLocation {
            message: message.into(),
        }
    }

    /// Create a new API key error
    pub fn api_key<S: Into<String>>(message: S) -> Self {
        Self::ApiKey {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn method_not_allowed<S: Into<String>>(method: S) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
        }
    }

    /// Machine-readable code for this error
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            ThoiTietError::EmptyQuery => ErrorCode::EmptyQuery,
            ThoiTietError::UpstreamUnavailable { .. } => ErrorCode::UpstreamUnavailable,
            ThoiTietError::UpstreamTimeout { .. } => ErrorCode::TimeoutError,
            ThoiTietError::InvalidLocation { .. } => ErrorCode::InvalidLocation,
            ThoiTietError::ApiKey { .. } => ErrorCode::ApiKeyError,
            ThoiTietError::Validation { .. } => ErrorCode::ValidationError,
            ThoiTietError::Config { .. } => ErrorCode::ConfigError,
            ThoiTietError::NotFound { .. } => ErrorCode::NotFound,
            ThoiTietError::MethodNotAllowed { .. } => ErrorCode::MethodNotAllowed,
        }
    }

    /// HTTP status the error is reported with
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            ThoiTietError::EmptyQuery
            | ThoiTietError::InvalidLocation { .. }
            | ThoiTietError::Validation { .. } => 400,
            ThoiTietError::NotFound { .. } => 404,
            ThoiTietError::MethodNotAllowed { .. } => 405,
            ThoiTietError::UpstreamUnavailable { .. } => 502,
            ThoiTietError::UpstreamTimeout { .. } => 504,
            ThoiTietError::ApiKey { .. } | ThoiTietError::Config { .. } => 500,
        }
    }

    /// Get a user-facing message in Vietnamese
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ThoiTietError::EmptyQuery => "Cần cung cấp tham số tìm kiếm \"q\"".to_string(),
            ThoiTietError::UpstreamUnavailable { .. } => {
                "Không thể kết nối tới dịch vụ thời tiết. Vui lòng thử lại sau.".to_string()
            }
            ThoiTietError::UpstreamTimeout { .. } => {
                "Yêu cầu quá thời gian. Vui lòng thử lại.".to_string()
            }
            ThoiTietError::InvalidLocation { .. } => {
                "Địa điểm hoặc tọa độ không hợp lệ".to_string()
            }
            ThoiTietError::ApiKey { .. } => "API key không hợp lệ hoặc đã hết hạn".to_string(),
            ThoiTietError::Validation { message } => message.clone(),
            ThoiTietError::Config { .. } => "Lỗi cấu hình máy chủ".to_string(),
            ThoiTietError::NotFound { .. } => "Endpoint không tồn tại".to_string(),
            ThoiTietError::MethodNotAllowed { .. } => {
                "Phương thức HTTP không được hỗ trợ".to_string()
            }
        }
    }
}

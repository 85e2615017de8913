use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    InvalidInput,
    RoutingUnavailable(RoutingFailure),
    ConfigurationMissing,
    ConfigurationInvalid,
    Unexpected,
}

/// Typed failure reported by the routing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingFailure {
    LocationsNotFound,
    NoRoute,
    RouteTooLong,
    RateLimited,
    Timeout,
    Upstream,
}

impl RoutingFailure {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocationsNotFound => "locations_not_found",
            Self::NoRoute => "no_route",
            Self::RouteTooLong => "route_too_long",
            Self::RateLimited => "rate_limited",
            Self::Timeout => "timeout",
            Self::Upstream => "upstream",
        }
    }
}

impl fmt::Display for RoutingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<RoutingFailure> for Error {
    fn from(failure: RoutingFailure) -> Self {
        routing_unavailable_error(failure)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self.kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::RoutingUnavailable(RoutingFailure::Timeout) => StatusCode::REQUEST_TIMEOUT,
            ErrorKind::RoutingUnavailable(
                RoutingFailure::LocationsNotFound
                | RoutingFailure::NoRoute
                | RoutingFailure::RouteTooLong,
            ) => StatusCode::BAD_REQUEST,
            ErrorKind::RoutingUnavailable(_)
            | ErrorKind::ConfigurationMissing
            | ErrorKind::ConfigurationInvalid => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_message = match self.code {
            1..=99 => "Internal Server Error",
            _ => self.message.as_str(),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    pub fn is_invalid_input(&self) -> bool {
        self.kind == ErrorKind::InvalidInput
    }

    pub fn routing_failure(&self) -> Option<RoutingFailure> {
        match self.kind {
            ErrorKind::RoutingUnavailable(failure) => Some(failure),
            _ => None,
        }
    }
}

pub fn invalid_input_error(message: &str) -> Error {
    Error {
        kind: ErrorKind::InvalidInput,
        code: 101,
        message: format!("invalid input: {}", message),
    }
}

pub fn routing_unavailable_error(failure: RoutingFailure) -> Error {
    Error {
        kind: ErrorKind::RoutingUnavailable(failure),
        code: 102,
        message: format!("routing unavailable: {}", failure),
    }
}

pub fn configuration_missing_error(setting: &str) -> Error {
    Error {
        kind: ErrorKind::ConfigurationMissing,
        code: 103,
        message: format!("configuration missing: {}", setting),
    }
}

pub fn configuration_invalid_error(message: &str) -> Error {
    Error {
        kind: ErrorKind::ConfigurationInvalid,
        code: 104,
        message: format!("invalid configuration: {}", message),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        kind: ErrorKind::Unexpected,
        code: 5,
        message: "unexpected error".into(),
    }
}

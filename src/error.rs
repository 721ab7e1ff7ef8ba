use std::{
    collections::BTreeMap,
    fmt::{self, Formatter},
};

use serde_json::Value;
use thiserror::Error;

use crate::clients::base::Method;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Which half of the access pair was missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Credential {
    Token,
    Url,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Token => write!(f, "token"),
            Credential::Url => write!(f, "url"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("No {0} provided")]
    MissingCredential(Credential),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Api(Box<ApiError>),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The HTTP failure, if this error came from a non-2xx response.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        self.as_api().map(|e| e.kind)
    }
}

impl From<ApiError> for Error {
    fn from(value: ApiError) -> Self {
        Error::Api(Box::new(value))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimited,
    InternalServerError,
    /// Any other non-2xx status.
    Transport,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::BadRequest,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            409 => ApiErrorKind::Conflict,
            429 => ApiErrorKind::RateLimited,
            500 => ApiErrorKind::InternalServerError,
            _ => ApiErrorKind::Transport,
        }
    }
}

/// What was sent, kept on the error so a failure can be reproduced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSummary {
    pub method: Method,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug, Error)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: u16,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub call: CallSummary,
}

impl ApiError {
    pub fn new(status: u16, body: &[u8], call: CallSummary) -> Self {
        let (error_code, error_message) = parse_error_body(body);
        Self {
            kind: ApiErrorKind::from_status(status),
            status,
            error_code,
            error_message,
            call,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let code = self.error_code.as_deref().unwrap_or("None");
        let message = self.error_message.as_deref().unwrap_or("None");
        match self.kind {
            ApiErrorKind::BadRequest => write!(formatter, "Bad Request: {code}: {message}"),
            ApiErrorKind::Unauthorized => write!(formatter, "Unauthorized: {code}: {message}"),
            ApiErrorKind::Forbidden => write!(formatter, "Forbidden: {code}: {message}"),
            ApiErrorKind::NotFound => write!(formatter, "Not Found: {}", self.call.uri),
            ApiErrorKind::Conflict => write!(formatter, "Conflict: {code}: {message}"),
            ApiErrorKind::RateLimited => write!(
                formatter,
                "Too Many Requests (Rate Limit Reached): {code}: {message}"
            ),
            ApiErrorKind::InternalServerError => {
                write!(formatter, "Internal Server Error: {code}: {message}")
            }
            ApiErrorKind::Transport => write!(
                formatter,
                "HTTP Error {} for {} {}: {message}",
                self.status, self.call.method, self.call.uri
            ),
        }
    }
}

/// Pulls `(code, message)` out of an error body.
///
/// Accepts `{"error": {"code", "message"}}` and flat `{"code", "message"}`.
/// A body that is not JSON is kept verbatim as the message.
pub(crate) fn parse_error_body(body: &[u8]) -> (Option<String>, Option<String>) {
    if body.is_empty() {
        return (None, None);
    }

    let parsed: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return (None, Some(String::from_utf8_lossy(body).into_owned())),
    };

    let source = match parsed.get("error") {
        Some(inner) if inner.is_object() => inner,
        _ => &parsed,
    };

    (field_as_string(source, "code"), field_as_string(source, "message"))
}

fn field_as_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

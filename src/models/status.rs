use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-reported lifecycle of a long-running request.
///
/// The client never checks that transitions move forward; it reports
/// whatever the server said last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Queued,
    Processing,
    Complete,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RequestStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, RequestStatus::Complete | RequestStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Queued => "queued",
            RequestStatus::Processing => "processing",
            RequestStatus::Complete => "complete",
            RequestStatus::Failed => "failed",
            RequestStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicates over anything that carries a status.
pub trait Lifecycle {
    fn status(&self) -> RequestStatus;

    fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    fn is_successful(&self) -> bool {
        self.status() == RequestStatus::Complete
    }

    fn is_failed(&self) -> bool {
        self.status() == RequestStatus::Failed
    }

    fn is_processing(&self) -> bool {
        self.status() == RequestStatus::Processing
    }

    fn is_queued(&self) -> bool {
        self.status() == RequestStatus::Queued
    }
}

/// A payload the server hands back for a long-running request.
pub trait RequestPayload: Lifecycle {
    fn request_id(&self) -> &str;

    fn file_id(&self) -> Option<&str>;
}

/// Why a request failed, as the server put it: a plain message, a
/// `{code, message}` object, or anything else kept verbatim.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum RequestError {
    Message(String),
    Detail {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
    Other(Value),
}

impl RequestError {
    pub fn code(&self) -> Option<&str> {
        match self {
            RequestError::Detail { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            RequestError::Message(message) => Some(message),
            RequestError::Detail { message, .. } => message.as_deref(),
            RequestError::Other(_) => None,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Message(message) => f.write_str(message),
            RequestError::Detail { code, message } => write!(
                f,
                "{}: {}",
                code.as_deref().unwrap_or("None"),
                message.as_deref().unwrap_or("None")
            ),
            RequestError::Other(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_and_unknown_values() {
        let parsed: Vec<RequestStatus> =
            serde_json::from_str(r#"["queued","processing","complete","failed","paused"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                RequestStatus::Queued,
                RequestStatus::Processing,
                RequestStatus::Complete,
                RequestStatus::Failed,
                RequestStatus::Unknown,
            ]
        );
    }

    #[test]
    fn only_complete_and_failed_are_terminal() {
        assert!(RequestStatus::Complete.is_finished());
        assert!(RequestStatus::Failed.is_finished());
        assert!(!RequestStatus::Queued.is_finished());
        assert!(!RequestStatus::Processing.is_finished());
        assert!(!RequestStatus::Unknown.is_finished());
    }

    #[test]
    fn request_errors_accept_text_and_objects() {
        let errors: Vec<RequestError> = serde_json::from_str(
            r#"["unreadable", {"code": "OCR_FAILED", "message": "blank pages"}, 42]"#,
        )
        .unwrap();

        assert_eq!(errors[0].message(), Some("unreadable"));
        assert_eq!(errors[1].code(), Some("OCR_FAILED"));
        assert_eq!(errors[1].to_string(), "OCR_FAILED: blank pages");
        assert_eq!(errors[2], RequestError::Other(Value::from(42)));
        assert_eq!(errors[2].message(), None);
    }
}

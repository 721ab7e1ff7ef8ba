use serde::{Deserialize, Serialize};

use crate::impl_request_payload;
use crate::models::{RequestError, RequestStatus};

/// A field the token has access to, as listed by `fields`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Field {
    pub field_id: String,
    pub name: String,
    pub description: Option<String>,
    pub bias: Option<f64>,
    pub f_score: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    #[serde(default)]
    pub document_count: u64,
    #[serde(default)]
    pub is_custom: bool,
    pub is_trained: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewField {
    pub field_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldMetadata {
    pub field_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_trained: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct FieldAccuracy {
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationLocation {
    pub character_start: u64,
    pub character_end: u64,
}

/// How one training annotation scored during validation
/// (`tp`, `fp`, `fn`, ... as reported by the server).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldValidationDetails {
    pub file_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: ValidationLocation,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnnotationLocation {
    pub start: u64,
    pub end: u64,
}

/// Character ranges of one file that show the field's answer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub file_id: String,
    pub locations: Vec<AnnotationLocation>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TrainingStatus {
    pub request_id: String,
    pub field_id: Option<String>,
    pub file_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    pub error: Option<RequestError>,
}
impl_request_payload!(TrainingStatus);

use serde::{Deserialize, Serialize};

use crate::impl_request_payload;
use crate::models::{RequestError, RequestStatus};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OcrStatus {
    pub request_id: String,
    pub file_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    pub page_count: Option<u32>,
    pub character_count: Option<u64>,
    pub scan_quality: Option<String>,
    pub scan_score: Option<f64>,
    pub error: Option<RequestError>,
}
impl_request_payload!(OcrStatus);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OcrText {
    pub request_id: Option<String>,
    pub file_id: Option<String>,
    #[serde(default)]
    pub text: String,
}

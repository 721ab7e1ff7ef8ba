use serde::{Deserialize, Serialize};

use crate::impl_request_payload;
use crate::models::{RequestError, RequestStatus};

/// Document classification request.
///
/// `is_contract` must be a JSON boolean when present; anything else fails to
/// decode as a malformed response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClassificationStatus {
    pub request_id: String,
    pub file_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    pub classification: Option<String>,
    pub is_contract: Option<bool>,
    pub error: Option<RequestError>,
}
impl_request_payload!(ClassificationStatus);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LanguageStatus {
    pub request_id: String,
    pub file_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    pub language: Option<String>,
    pub error: Option<RequestError>,
}
impl_request_payload!(LanguageStatus);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MlcLanguage {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// Multi-level classification request; `classifications` is ranked, most
/// general first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MlcStatus {
    pub request_id: String,
    pub file_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub classifications: Vec<String>,
    pub language: Option<MlcLanguage>,
    pub is_amendment: Option<bool>,
    pub is_master_agreement: Option<bool>,
    pub error: Option<RequestError>,
}
impl_request_payload!(MlcStatus);

impl MlcStatus {
    pub fn has_classifications(&self) -> bool {
        !self.classifications.is_empty()
    }

    /// The `level`-th classification, counting from 1.
    pub fn classification(&self, level: usize) -> Option<&str> {
        level
            .checked_sub(1)
            .and_then(|i| self.classifications.get(i))
            .map(String::as_str)
    }

    pub fn is_contract(&self) -> Option<bool> {
        self.classification(1)
            .map(|c| c.eq_ignore_ascii_case("contract"))
    }

    pub fn language_name(&self) -> Option<&str> {
        self.language.as_ref()?.name.as_deref()
    }

    pub fn language_code(&self) -> Option<&str> {
        self.language.as_ref()?.code.as_deref()
    }
}

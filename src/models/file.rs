use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::OCR_PACKAGE_CONTENT_TYPE;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FileAttributes {
    #[serde(rename = "content-type")]
    pub content_type: Option<String>,
}

/// A file stored by the service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct File {
    pub file_id: String,
    #[serde(default)]
    pub attributes: FileAttributes,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub expiration: Option<DateTime<Utc>>,
}

impl File {
    pub fn id(&self) -> &str {
        &self.file_id
    }

    pub fn content_type(&self) -> Option<&str> {
        self.attributes.content_type.as_deref()
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type_contains("application/pdf")
    }

    pub fn is_text(&self) -> bool {
        self.content_type_contains("text/plain")
    }

    pub fn is_ocr_package(&self) -> bool {
        self.content_type_contains(OCR_PACKAGE_CONTENT_TYPE)
    }

    fn content_type_contains(&self, media_type: &str) -> bool {
        self.content_type().is_some_and(|ct| ct.contains(media_type))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FileExpiration {
    pub file_id: String,
    pub expiration: Option<DateTime<Utc>>,
}

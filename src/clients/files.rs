use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::CONTENT_TYPE;
use tracing::info;

use crate::clients::{ApiCall, CallOptions, Method};
use crate::error::Result;
use crate::models::{File, FileExpiration};
use crate::utils::{OCR_PACKAGE_CONTENT_TYPE, get_content_type};

/// Uploading and managing the documents other endpoints work on.
#[derive(Clone)]
pub struct FileApi {
    call: ApiCall,
}

impl FileApi {
    pub fn new(call: ApiCall) -> Self {
        Self { call }
    }

    /// Uploads raw document bytes; the server sniffs the type.
    pub fn create(&self, content: impl Into<Vec<u8>>) -> Result<File> {
        self.upload(content.into(), None)
    }

    /// Uploads an OCR package produced earlier by `OcrApi::get_eocr`.
    pub fn create_ocr_package(&self, content: impl Into<Vec<u8>>) -> Result<File> {
        self.upload(content.into(), Some(OCR_PACKAGE_CONTENT_TYPE))
    }

    pub fn create_from_path(&self, path: impl AsRef<Path>) -> Result<File> {
        let path = path.as_ref();
        let content = self.call.block_on(tokio::fs::read(path))??;
        info!(path = %path.display(), bytes = content.len(), "Uploading file");
        self.upload(content, Some(get_content_type(path)))
    }

    /// `true` when the server confirms the deletion with 204.
    pub fn delete(&self, file_id: &str) -> Result<bool> {
        let mut request = self.call.new_call(Method::Delete, format!("files/{file_id}"));
        Ok(request.send()?.status() == 204)
    }

    pub fn set_expiration(
        &self,
        file_id: &str,
        expiration: DateTime<Utc>,
    ) -> Result<FileExpiration> {
        let mut request = self
            .call
            .new_call(Method::Put, format!("files/{file_id}/expiration"));
        request.add_body_field(
            "expiration",
            expiration.to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;
        request.send()?.json()
    }

    fn upload(&self, content: Vec<u8>, content_type: Option<&str>) -> Result<File> {
        let mut request = self
            .call
            .new_call_with(Method::Post, "files", CallOptions::raw());
        if let Some(content_type) = content_type {
            request.add_header(CONTENT_TYPE.as_str(), content_type);
        }
        request.set_body_value(content)?;
        let file: File = request.send()?.json()?;
        info!(file_id = file.id(), "Created file");
        Ok(file)
    }
}

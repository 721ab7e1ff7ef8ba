use std::sync::Arc;

use crate::clients::{ApiCall, Method, get_batch, id_list, submit};
use crate::error::Result;
use crate::models::{AsyncRequest, OcrStatus, OcrText, StatusSource};

/// Optical character recognition over uploaded files.
#[derive(Clone)]
pub struct OcrApi {
    call: ApiCall,
}

impl OcrApi {
    pub fn new(call: ApiCall) -> Self {
        Self { call }
    }

    pub fn create<S: AsRef<str>>(&self, file_ids: &[S]) -> Result<Vec<AsyncRequest<OcrStatus>>> {
        let mut request = self.call.new_call(Method::Post, "ocr");
        request
            .add_body_field("file_ids", id_list(file_ids))?
            // Without it the server keeps no layout for `get_layouts`.
            .add_body_field("layout", true)?;
        submit(request, Arc::new(self.clone()))
    }

    pub fn get(&self, request_id: &str) -> Result<AsyncRequest<OcrStatus>> {
        let status = self.get_status(request_id)?;
        Ok(AsyncRequest::new(status, Arc::new(self.clone())))
    }

    pub fn get_multiple<S: AsRef<str>>(&self, request_ids: &[S]) -> Result<Vec<OcrStatus>> {
        get_batch(&self.call, "ocrs", request_ids)
    }

    pub fn get_text(&self, request_id: &str) -> Result<OcrText> {
        self.call.get_json(format!("ocr/{request_id}/text"))
    }

    /// Page images as a zip archive.
    pub fn get_images(&self, request_id: &str) -> Result<Vec<u8>> {
        self.call.get_bytes(format!("ocr/{request_id}/images"))
    }

    /// The OCR package, suitable for re-upload through `FileApi::create_ocr_package`.
    pub fn get_eocr(&self, request_id: &str) -> Result<Vec<u8>> {
        self.call.get_bytes(format!("ocr/{request_id}/eocr"))
    }

    pub fn get_layouts(&self, request_id: &str) -> Result<Vec<u8>> {
        self.call.get_bytes(format!("ocr/{request_id}/layouts"))
    }
}

impl StatusSource<OcrStatus> for OcrApi {
    fn get_status(&self, request_id: &str) -> Result<OcrStatus> {
        self.call.get_json(format!("ocr/{request_id}"))
    }
}

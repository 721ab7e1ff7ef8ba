use std::sync::Arc;

use crate::clients::{ApiCall, Method, get_batch, id_list, submit};
use crate::error::Result;
use crate::models::{AsyncRequest, ExtractionResults, ExtractionStatus, StatusSource};

/// Field extraction: one request per file, covering every requested field.
#[derive(Clone)]
pub struct ExtractionApi {
    call: ApiCall,
}

impl ExtractionApi {
    pub fn new(call: ApiCall) -> Self {
        Self { call }
    }

    pub fn create<S: AsRef<str>, F: AsRef<str>>(
        &self,
        file_ids: &[S],
        field_ids: &[F],
    ) -> Result<Vec<AsyncRequest<ExtractionStatus>>> {
        let mut request = self.call.new_call(Method::Post, "extraction");
        request
            .add_body_field("file_ids", id_list(file_ids))?
            .add_body_field("field_ids", id_list(field_ids))?;
        submit(request, Arc::new(self.clone()))
    }

    pub fn get(&self, request_id: &str) -> Result<AsyncRequest<ExtractionStatus>> {
        let status = self.get_status(request_id)?;
        Ok(AsyncRequest::new(status, Arc::new(self.clone())))
    }

    pub fn get_multiple<S: AsRef<str>>(&self, request_ids: &[S]) -> Result<Vec<ExtractionStatus>> {
        get_batch(&self.call, "extractions", request_ids)
    }

    /// Extracted text per field, available once the request is complete.
    pub fn get_result(&self, request_id: &str) -> Result<ExtractionResults> {
        self.call
            .get_json(format!("extraction/{request_id}/results/text"))
    }
}

impl StatusSource<ExtractionStatus> for ExtractionApi {
    fn get_status(&self, request_id: &str) -> Result<ExtractionStatus> {
        self.call.get_json(format!("extraction/{request_id}"))
    }
}

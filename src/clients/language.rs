use std::sync::Arc;

use crate::clients::{ApiCall, Method, get_batch, id_list, submit};
use crate::error::Result;
use crate::models::{AsyncRequest, LanguageStatus, StatusSource};

/// Dominant-language detection (`language`).
#[derive(Clone)]
pub struct LanguageApi {
    call: ApiCall,
}

impl LanguageApi {
    pub fn new(call: ApiCall) -> Self {
        Self { call }
    }

    pub fn create<S: AsRef<str>>(&self, file_ids: &[S]) -> Result<Vec<AsyncRequest<LanguageStatus>>> {
        let mut request = self.call.new_call(Method::Post, "language");
        request.add_body_field("file_ids", id_list(file_ids))?;
        submit(request, Arc::new(self.clone()))
    }

    pub fn get(&self, request_id: &str) -> Result<AsyncRequest<LanguageStatus>> {
        let status = self.get_status(request_id)?;
        Ok(AsyncRequest::new(status, Arc::new(self.clone())))
    }

    pub fn get_multiple<S: AsRef<str>>(&self, request_ids: &[S]) -> Result<Vec<LanguageStatus>> {
        get_batch(&self.call, "languages", request_ids)
    }
}

impl StatusSource<LanguageStatus> for LanguageApi {
    fn get_status(&self, request_id: &str) -> Result<LanguageStatus> {
        self.call.get_json(format!("language/{request_id}"))
    }
}

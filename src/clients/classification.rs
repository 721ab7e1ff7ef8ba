use std::sync::Arc;

use crate::clients::{ApiCall, Method, id_list, submit};
use crate::error::Result;
use crate::models::{AsyncRequest, ClassificationStatus, StatusSource};

/// Document-type classification (`classification`).
#[derive(Clone)]
pub struct ClassificationApi {
    call: ApiCall,
}

impl ClassificationApi {
    pub fn new(call: ApiCall) -> Self {
        Self { call }
    }

    pub fn create<S: AsRef<str>>(
        &self,
        file_ids: &[S],
    ) -> Result<Vec<AsyncRequest<ClassificationStatus>>> {
        let mut request = self.call.new_call(Method::Post, "classification");
        request.add_body_field("file_ids", id_list(file_ids))?;
        submit(request, Arc::new(self.clone()))
    }

    pub fn get(&self, request_id: &str) -> Result<AsyncRequest<ClassificationStatus>> {
        let status = self.get_status(request_id)?;
        Ok(AsyncRequest::new(status, Arc::new(self.clone())))
    }
}

impl StatusSource<ClassificationStatus> for ClassificationApi {
    fn get_status(&self, request_id: &str) -> Result<ClassificationStatus> {
        self.call.get_json(format!("classification/{request_id}"))
    }
}

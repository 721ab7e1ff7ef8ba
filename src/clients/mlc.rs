use std::sync::Arc;

use crate::clients::{ApiCall, Method, id_list, submit};
use crate::error::Result;
use crate::models::{AsyncRequest, MlcStatus, StatusSource};

/// Multi-level classification (`mlc`).
#[derive(Clone)]
pub struct MlcApi {
    call: ApiCall,
}

impl MlcApi {
    pub fn new(call: ApiCall) -> Self {
        Self { call }
    }

    pub fn create<S: AsRef<str>>(&self, file_ids: &[S]) -> Result<Vec<AsyncRequest<MlcStatus>>> {
        let mut request = self.call.new_call(Method::Post, "mlc");
        request.add_body_field("file_ids", id_list(file_ids))?;
        submit(request, Arc::new(self.clone()))
    }

    pub fn get(&self, request_id: &str) -> Result<AsyncRequest<MlcStatus>> {
        let status = self.get_status(request_id)?;
        Ok(AsyncRequest::new(status, Arc::new(self.clone())))
    }
}

impl StatusSource<MlcStatus> for MlcApi {
    fn get_status(&self, request_id: &str) -> Result<MlcStatus> {
        self.call.get_json(format!("mlc/{request_id}"))
    }
}

pub mod base;
pub mod classification;
pub mod extraction;
pub mod fields;
pub mod files;
pub mod language;
pub mod mlc;
pub mod normalization;
pub mod ocr;
pub mod trainer;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::info;

pub use base::{ApiCall, ApiResponse, Body, CallOptions, Method, Param, PendingRequest};
pub use classification::ClassificationApi;
pub use extraction::ExtractionApi;
pub use fields::FieldApi;
pub use files::FileApi;
pub use language::LanguageApi;
pub use mlc::MlcApi;
pub use normalization::NormalizationApi;
pub use ocr::OcrApi;
pub use trainer::FieldTrainer;

use crate::error::Result;
use crate::models::{AsyncRequest, BatchStatuses, CreatedRequests, RequestPayload, StatusSource};

fn id_list<S: AsRef<str>>(ids: &[S]) -> Vec<&str> {
    ids.iter().map(AsRef::as_ref).collect()
}

/// Sends a prepared `create` call and wraps every returned entry.
fn submit<T>(
    mut request: PendingRequest,
    source: Arc<dyn StatusSource<T>>,
) -> Result<Vec<AsyncRequest<T>>>
where
    T: RequestPayload + DeserializeOwned,
{
    let created: CreatedRequests<T> = request.send()?.json()?;
    info!(
        path = request.path(),
        count = created.file_ids.len(),
        "Submitted requests"
    );
    Ok(created
        .file_ids
        .into_iter()
        .map(|payload| AsyncRequest::new(payload, Arc::clone(&source)))
        .collect())
}

/// `GET path?request_id=…` for several requests at once, in the caller's order.
fn get_batch<T, S>(call: &ApiCall, path: &str, request_ids: &[S]) -> Result<Vec<T>>
where
    T: DeserializeOwned + Clone,
    S: AsRef<str>,
{
    let mut request = call.new_call(Method::Get, path);
    request.add_parameter("request_id", id_list(request_ids));
    let batch: BatchStatuses<T> = request.send()?.json()?;
    Ok(batch.in_order_of(request_ids))
}

use std::{fmt, ops::Deref, sync::Arc};

use tracing::debug;

use crate::error::Result;
use crate::models::{Lifecycle, RequestPayload, RequestStatus};

/// Narrow capability handed to an [`AsyncRequest`] so it can refresh itself
/// without holding on to the facade that created it.
pub trait StatusSource<T>: Send + Sync {
    fn get_status(&self, request_id: &str) -> Result<T>;
}

impl<T, F> StatusSource<T> for F
where
    F: Fn(&str) -> Result<T> + Send + Sync,
{
    fn get_status(&self, request_id: &str) -> Result<T> {
        self(request_id)
    }
}

/// A server-side job observed by polling.
///
/// `update()` performs one blocking round trip and swaps in whatever the
/// server reports. There is no delay, timeout or attempt limit here; a polling
/// loop, and its sleep between calls, belongs to the caller.
pub struct AsyncRequest<T> {
    payload: T,
    source: Arc<dyn StatusSource<T>>,
}

impl<T: RequestPayload> AsyncRequest<T> {
    pub fn new(payload: T, source: Arc<dyn StatusSource<T>>) -> Self {
        Self { payload, source }
    }

    pub fn id(&self) -> &str {
        self.payload.request_id()
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Re-fetches the request and replaces the held payload.
    pub fn update(&mut self) -> Result<&T> {
        let latest = self.source.get_status(self.payload.request_id())?;
        debug!(
            request_id = self.payload.request_id(),
            status = latest.status().as_str(),
            "Refreshed request status"
        );
        self.payload = latest;
        Ok(&self.payload)
    }
}

impl<T: RequestPayload> Lifecycle for AsyncRequest<T> {
    fn status(&self) -> RequestStatus {
        self.payload.status()
    }
}

impl<T> Deref for AsyncRequest<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.payload
    }
}

impl<T: fmt::Debug> fmt::Debug for AsyncRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncRequest")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

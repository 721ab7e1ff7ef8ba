/// Implements [`Lifecycle`](crate::models::Lifecycle) and
/// [`RequestPayload`](crate::models::RequestPayload) for a payload struct with
/// `request_id: String`, `file_id: Option<String>` and `status: RequestStatus`.
#[macro_export]
macro_rules! impl_request_payload {
    ($t:ty) => {
        impl $crate::models::Lifecycle for $t {
            fn status(&self) -> $crate::models::RequestStatus {
                self.status
            }
        }

        impl $crate::models::RequestPayload for $t {
            fn request_id(&self) -> &str {
                &self.request_id
            }

            fn file_id(&self) -> Option<&str> {
                self.file_id.as_deref()
            }
        }
    };
}

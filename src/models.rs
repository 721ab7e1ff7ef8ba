pub mod async_request;
pub mod classification;
pub mod credentials;
pub mod extraction;
pub mod field;
pub mod file;
pub mod normalization;
pub mod ocr;
pub mod status;
pub mod status_response;

pub use async_request::{AsyncRequest, StatusSource};
pub use classification::{ClassificationStatus, LanguageStatus, MlcLanguage, MlcStatus};
pub use credentials::Credentials;
pub use extraction::*;
pub use field::*;
pub use file::{File, FileAttributes, FileExpiration};
pub use normalization::{
    Currency, CurrencyNormalization, Date, DateNormalization, Duration, DurationNormalization,
};
pub use ocr::{OcrStatus, OcrText};
pub use status::{Lifecycle, RequestError, RequestPayload, RequestStatus};
pub use status_response::{BatchStatuses, CreatedRequests};

//! Blocking client for a document-analysis REST service: file upload, OCR,
//! classification, language detection, field extraction, custom field
//! training and text normalization.
//!
//! ```no_run
//! use rusty_docai::{DocAi, Lifecycle};
//!
//! # fn main() -> rusty_docai::Result<()> {
//! let sdk = DocAi::new("https://docai.example.com", "token")?;
//! let file = sdk.files().create_from_path("lease.pdf")?;
//! let mut requests = sdk.ocr().create(&[file.id()])?;
//! let ocr = &mut requests[0];
//! while !ocr.is_finished() {
//!     std::thread::sleep(std::time::Duration::from_secs(2));
//!     ocr.update()?;
//! }
//! println!("{}", sdk.ocr().get_text(ocr.id())?.text);
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod sdk;
pub mod utils;

pub use clients::{
    ApiCall, ApiResponse, CallOptions, ClassificationApi, ExtractionApi, FieldApi, FieldTrainer,
    FileApi, LanguageApi, Method, MlcApi, NormalizationApi, OcrApi, Param, PendingRequest,
};
pub use config::{AccessConfig, AccessStore, JsonFileStore};
pub use error::{ApiError, ApiErrorKind, CallSummary, Credential, Error, Result};
pub use models::{
    AsyncRequest, Credentials, Lifecycle, RequestError, RequestPayload, RequestStatus, StatusSource,
};
pub use sdk::DocAi;
pub use utils::init_tracing;

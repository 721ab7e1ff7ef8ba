pub mod helpers;
pub mod logger;
mod macros;

pub use helpers::{OCR_PACKAGE_CONTENT_TYPE, get_content_type};
pub use logger::init_tracing;

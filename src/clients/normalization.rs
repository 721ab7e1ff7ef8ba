use serde::de::DeserializeOwned;

use crate::clients::{ApiCall, Method};
use crate::error::Result;
use crate::models::{CurrencyNormalization, DateNormalization, DurationNormalization};

/// Turns free text into structured dates, durations and amounts.
///
/// These are answered synchronously; there is nothing to poll.
#[derive(Clone)]
pub struct NormalizationApi {
    call: ApiCall,
}

impl NormalizationApi {
    pub fn new(call: ApiCall) -> Self {
        Self { call }
    }

    pub fn get_dates(&self, text: &str) -> Result<DateNormalization> {
        self.normalize("date", text)
    }

    pub fn get_durations(&self, text: &str) -> Result<DurationNormalization> {
        self.normalize("duration", text)
    }

    pub fn get_currencies(&self, text: &str) -> Result<CurrencyNormalization> {
        self.normalize("currency", text)
    }

    fn normalize<T: DeserializeOwned>(&self, kind: &str, text: &str) -> Result<T> {
        let mut request = self.call.new_call(Method::Post, format!("normalize/{kind}"));
        request.add_body_field("text", text)?;
        request.send()?.json()
    }
}

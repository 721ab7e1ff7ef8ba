use tracing::info;

use crate::clients::{
    ApiCall, ClassificationApi, ExtractionApi, FieldApi, FieldTrainer, FileApi, LanguageApi,
    MlcApi, NormalizationApi, OcrApi,
};
use crate::config::{AccessStore, JsonFileStore};
use crate::error::Result;
use crate::models::Credentials;

/// Entry point: one access pair, every endpoint family.
///
/// All facades share one HTTP client and one runtime. Calls block the
/// calling thread; from inside an async runtime they fail with
/// [`Error::InvalidInput`](crate::Error::InvalidInput) instead of blocking.
#[derive(Clone)]
pub struct DocAi {
    call: ApiCall,
    files: FileApi,
    classification: ClassificationApi,
    language: LanguageApi,
    mlc: MlcApi,
    extraction: ExtractionApi,
    fields: FieldApi,
    ocr: OcrApi,
    normalization: NormalizationApi,
}

impl DocAi {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::with_credentials(Credentials::new(url, token)?)
    }

    pub fn with_credentials(credentials: Credentials) -> Result<Self> {
        let call = ApiCall::new(credentials)?;
        Ok(Self {
            files: FileApi::new(call.clone()),
            classification: ClassificationApi::new(call.clone()),
            language: LanguageApi::new(call.clone()),
            mlc: MlcApi::new(call.clone()),
            extraction: ExtractionApi::new(call.clone()),
            fields: FieldApi::new(call.clone()),
            ocr: OcrApi::new(call.clone()),
            normalization: NormalizationApi::new(call.clone()),
            call,
        })
    }

    pub fn from_store(store: &impl AccessStore) -> Result<Self> {
        Self::with_credentials(store.load()?.credentials()?)
    }

    /// Reads the access pair from the default `access.json`.
    pub fn from_config() -> Result<Self> {
        Self::from_store(&JsonFileStore::default_location()?)
    }

    pub fn access(&self) -> &Credentials {
        self.call.credentials()
    }

    pub fn files(&self) -> &FileApi {
        &self.files
    }

    pub fn classification(&self) -> &ClassificationApi {
        &self.classification
    }

    pub fn language(&self) -> &LanguageApi {
        &self.language
    }

    pub fn mlc(&self) -> &MlcApi {
        &self.mlc
    }

    pub fn extraction(&self) -> &ExtractionApi {
        &self.extraction
    }

    pub fn fields(&self) -> &FieldApi {
        &self.fields
    }

    pub fn ocr(&self) -> &OcrApi {
        &self.ocr
    }

    pub fn normalization(&self) -> &NormalizationApi {
        &self.normalization
    }

    pub fn trainer(&self, name: impl Into<String>) -> FieldTrainer {
        FieldTrainer::new(self.fields.clone(), name)
    }

    /// Lists fields as a smoke test; returns how many came back.
    pub fn test_connection(&self) -> Result<usize> {
        let count = self.fields.list()?.len();
        info!(url = self.access().url(), fields = count, "Connection OK");
        Ok(count)
    }
}

use std::sync::Arc;

use tracing::info;

use crate::clients::{ApiCall, Method};
use crate::error::{Error, Result};
use crate::models::{
    Annotation, AsyncRequest, Field, FieldAccuracy, FieldMetadata, FieldValidationDetails,
    NewField, StatusSource, TrainingStatus,
};

/// Field catalogue, custom field creation and training.
#[derive(Clone)]
pub struct FieldApi {
    call: ApiCall,
}

impl FieldApi {
    pub fn new(call: ApiCall) -> Self {
        Self { call }
    }

    /// Every field the token can see, built-in and custom.
    pub fn list(&self) -> Result<Vec<Field>> {
        self.call.get_json("fields")
    }

    /// Creates a custom field, optionally seeded from an existing one.
    pub fn create(
        &self,
        name: &str,
        from_field_id: Option<&str>,
        description: Option<&str>,
    ) -> Result<NewField> {
        let mut request = self.call.new_call(Method::Post, "fields");
        request.add_body_field("field_name", name)?;
        if let Some(from_field_id) = from_field_id {
            request.add_body_field("from_field_id", from_field_id)?;
        }
        if let Some(description) = description {
            request.add_body_field("description", description)?;
        }
        let field: NewField = request.send()?.json()?;
        info!(field_id = field.field_id.as_str(), name, "Created field");
        Ok(field)
    }

    pub fn train(
        &self,
        field_id: &str,
        annotations: &[Annotation],
    ) -> Result<AsyncRequest<TrainingStatus>> {
        let body = serde_json::to_vec(annotations)
            .map_err(|e| Error::InvalidInput(format!("Unable to encode annotations: {e}")))?;
        let mut request = self
            .call
            .new_call(Method::Post, format!("fields/{field_id}/train"));
        request.set_body_value(body)?;
        let status: TrainingStatus = request.send()?.json()?;
        info!(
            field_id,
            request_id = status.request_id.as_str(),
            annotated_files = annotations.len(),
            "Submitted training"
        );
        Ok(AsyncRequest::new(status, self.training_source(field_id)))
    }

    pub fn get_training_status(
        &self,
        field_id: &str,
        request_id: &str,
    ) -> Result<AsyncRequest<TrainingStatus>> {
        let status = self.fetch_training_status(field_id, request_id)?;
        Ok(AsyncRequest::new(status, self.training_source(field_id)))
    }

    pub fn get_metadata(&self, field_id: &str) -> Result<FieldMetadata> {
        self.call.get_json(format!("fields/{field_id}/metadata"))
    }

    /// Renames and/or re-describes a field; `None` leaves that value as is.
    pub fn update_metadata(
        &self,
        field_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        if name.is_none() && description.is_none() {
            return Err(Error::InvalidInput(
                "Nothing to update: provide a name or a description.".to_owned(),
            ));
        }
        let mut request = self
            .call
            .new_call(Method::Put, format!("fields/{field_id}/metadata"));
        if let Some(name) = name {
            request.add_body_field("name", name)?;
        }
        if let Some(description) = description {
            request.add_body_field("description", description)?;
        }
        request.send()?;
        Ok(())
    }

    pub fn get_accuracy(&self, field_id: &str) -> Result<FieldAccuracy> {
        self.call.get_json(format!("fields/{field_id}/accuracy"))
    }

    pub fn get_validation_details(&self, field_id: &str) -> Result<Vec<FieldValidationDetails>> {
        self.call
            .get_json(format!("fields/{field_id}/validation-details"))
    }

    fn fetch_training_status(&self, field_id: &str, request_id: &str) -> Result<TrainingStatus> {
        self.call
            .get_json(format!("fields/{field_id}/train/{request_id}"))
    }

    /// Training status lives under the field, so the source carries the field id.
    fn training_source(&self, field_id: &str) -> Arc<dyn StatusSource<TrainingStatus>> {
        let api = self.clone();
        let field_id = field_id.to_owned();
        Arc::new(move |request_id: &str| api.fetch_training_status(&field_id, request_id))
    }
}

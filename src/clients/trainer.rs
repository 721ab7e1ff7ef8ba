use crate::clients::FieldApi;
use crate::error::{Error, Result};
use crate::models::{
    Annotation, AnnotationLocation, AsyncRequest, FieldAccuracy, FieldMetadata,
    FieldValidationDetails, TrainingStatus,
};

/// Builds a custom field from annotated character ranges.
///
/// ```no_run
/// # fn main() -> rusty_docai::Result<()> {
/// let sdk = rusty_docai::DocAi::new("https://docai.example.com", "token")?;
/// let mut trainer = sdk.trainer("Governing law");
/// trainer.create_empty()?;
/// trainer.add_annotation("file-1", 100, 150);
/// let training = trainer.train()?;
/// println!("{} is {}", training.id(), training.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FieldTrainer {
    api: FieldApi,
    name: String,
    description: Option<String>,
    field_id: Option<String>,
    annotations: Vec<Annotation>,
}

impl FieldTrainer {
    pub fn new(api: FieldApi, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
            description: None,
            field_id: None,
            annotations: Vec::new(),
        }
    }

    /// Picks up an existing custom field instead of creating one.
    pub fn with_field_id(mut self, field_id: impl Into<String>) -> Self {
        self.field_id = Some(field_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_id(&self) -> Option<&str> {
        self.field_id.as_deref()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn create_empty(&mut self) -> Result<&str> {
        self.create(None)
    }

    /// Creates the field using `field_id` as its starting point.
    pub fn create_from_field(&mut self, field_id: &str) -> Result<&str> {
        self.create(Some(field_id))
    }

    /// Marks `start..end` of `file_id` as an answer. Ranges for the same file
    /// are grouped into one annotation.
    pub fn add_annotation(&mut self, file_id: &str, start: u64, end: u64) {
        let location = AnnotationLocation { start, end };
        match self.annotations.iter_mut().find(|a| a.file_id == file_id) {
            Some(annotation) => annotation.locations.push(location),
            None => self.annotations.push(Annotation {
                file_id: file_id.to_owned(),
                locations: vec![location],
            }),
        }
    }

    /// Submits the collected annotations. Poll the returned request to follow it.
    pub fn train(&self) -> Result<AsyncRequest<TrainingStatus>> {
        if self.annotations.is_empty() {
            return Err(Error::InvalidInput(
                "No annotations to train on.".to_owned(),
            ));
        }
        self.api.train(self.require_field_id()?, &self.annotations)
    }

    pub fn get_accuracy(&self) -> Result<FieldAccuracy> {
        self.api.get_accuracy(self.require_field_id()?)
    }

    pub fn get_validation_details(&self) -> Result<Vec<FieldValidationDetails>> {
        self.api.get_validation_details(self.require_field_id()?)
    }

    pub fn get_metadata(&self) -> Result<FieldMetadata> {
        self.api.get_metadata(self.require_field_id()?)
    }

    fn create(&mut self, from_field_id: Option<&str>) -> Result<&str> {
        let field = self
            .api
            .create(&self.name, from_field_id, self.description.as_deref())?;
        Ok(self.field_id.insert(field.field_id).as_str())
    }

    fn require_field_id(&self) -> Result<&str> {
        self.field_id.as_deref().ok_or_else(|| {
            Error::InvalidInput(format!("Field '{}' has not been created yet.", self.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ApiCall;
    use crate::models::Credentials;

    fn trainer() -> FieldTrainer {
        let call = ApiCall::new(Credentials::new("https://docai.test", "secret").unwrap()).unwrap();
        FieldTrainer::new(FieldApi::new(call), "Governing law")
    }

    #[test]
    fn annotations_are_grouped_per_file() {
        let mut trainer = trainer();
        trainer.add_annotation("a", 100, 150);
        trainer.add_annotation("b", 10, 20);
        trainer.add_annotation("a", 500, 550);

        let annotations = trainer.annotations();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].file_id, "a");
        assert_eq!(
            annotations[0].locations,
            vec![
                AnnotationLocation { start: 100, end: 150 },
                AnnotationLocation { start: 500, end: 550 },
            ]
        );
    }

    #[test]
    fn field_id_is_required_before_training() {
        let mut trainer = trainer();
        trainer.add_annotation("a", 1, 2);
        assert!(matches!(trainer.train(), Err(Error::InvalidInput(_))));
        assert!(matches!(trainer.get_accuracy(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn training_without_annotations_is_rejected() {
        let trainer = trainer().with_field_id("f-1");
        assert_eq!(trainer.field_id(), Some("f-1"));
        assert!(matches!(trainer.train(), Err(Error::InvalidInput(_))));
    }
}

use serde::{Deserialize, Deserializer, Serialize};

use crate::impl_request_payload;
use crate::models::{RequestError, RequestStatus};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtractionStatus {
    pub request_id: String,
    pub file_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub field_ids: Vec<String>,
    pub error: Option<RequestError>,
}
impl_request_payload!(ExtractionStatus);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

/// A bounding box, in page coordinates, on one page.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    /// Absent when the server sends a single box for the whole span.
    pub page: Option<u32>,
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// A character range in the extracted text, with the pages it crosses and
/// its geometry on each of them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ExtractionSpan {
    pub start: u64,
    pub end: u64,
    pub pages: Option<PageRange>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub bounds: Vec<BoundingBox>,
}

impl ExtractionSpan {
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Boxes on `page`; a page-less box counts for the span's first page.
    pub fn bounds_on_page(&self, page: u32) -> Vec<&BoundingBox> {
        let first_page = self.pages.map(|p| p.start);
        self.bounds
            .iter()
            .filter(|b| b.page.or(first_page) == Some(page))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<ExtractionSpan>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FieldResult {
    pub field_id: String,
    #[serde(default)]
    pub extractions: Vec<Extraction>,
}

/// Body of `extraction/{id}/results/text`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtractionResults {
    pub request_id: Option<String>,
    pub file_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub results: Vec<FieldResult>,
}

impl ExtractionResults {
    pub fn field(&self, field_id: &str) -> Option<&FieldResult> {
        self.results.iter().find(|r| r.field_id == field_id)
    }

    /// One row per span, carrying its field id and text.
    pub fn flatten(&self) -> Vec<FieldExtractionResult> {
        let mut rows = Vec::new();
        for result in &self.results {
            for extraction in &result.extractions {
                for span in &extraction.spans {
                    let bounds = span.bounds.first().copied();
                    rows.push(FieldExtractionResult {
                        field_id: result.field_id.clone(),
                        text: extraction.text.clone(),
                        text_start: span.start,
                        text_end: span.end,
                        page_start: span.pages.map(|p| p.start),
                        page_end: span.pages.map(|p| p.end),
                        bounds,
                    });
                }
            }
        }
        rows
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FieldExtractionResult {
    pub field_id: String,
    pub text: String,
    pub text_start: u64,
    pub text_end: u64,
    pub page_start: Option<u32>,
    pub page_end: Option<u32>,
    pub bounds: Option<BoundingBox>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<BoundingBox>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(BoundingBox),
        Many(Vec<BoundingBox>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(b)) => vec![b],
        Some(OneOrMany::Many(bs)) => bs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"{
        "request_id": "ex-1",
        "file_id": "f-1",
        "status": "complete",
        "results": [
            {
                "field_id": "title",
                "extractions": [
                    {
                        "text": "Master Services Agreement",
                        "spans": [
                            {
                                "start": 10,
                                "end": 35,
                                "pages": {"start": 1, "end": 2},
                                "bounds": [
                                    {"page": 1, "top": 100, "left": 50, "bottom": 120, "right": 400},
                                    {"page": 2, "top": 10, "left": 50, "bottom": 30, "right": 200}
                                ]
                            }
                        ]
                    }
                ]
            },
            {
                "field_id": "parties",
                "extractions": [
                    {
                        "text": "Acme Corp",
                        "spans": [
                            {
                                "start": 60,
                                "end": 69,
                                "pages": {"start": 3, "end": 3},
                                "bounds": {"top": 5, "left": 6, "bottom": 7, "right": 8}
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn spans_group_bounds_per_page() {
        let results: ExtractionResults = serde_json::from_str(RESULTS).unwrap();
        let span = &results.field("title").unwrap().extractions[0].spans[0];

        assert_eq!(span.len(), 25);
        assert_eq!(span.pages, Some(PageRange { start: 1, end: 2 }));
        assert_eq!(span.bounds_on_page(1).len(), 1);
        assert_eq!(span.bounds_on_page(2)[0].right, 200.0);
        assert!(span.bounds_on_page(3).is_empty());
    }

    #[test]
    fn single_bounds_object_is_accepted() {
        let results: ExtractionResults = serde_json::from_str(RESULTS).unwrap();
        let span = &results.field("parties").unwrap().extractions[0].spans[0];

        assert_eq!(span.bounds.len(), 1);
        assert_eq!(span.bounds[0].page, None);
        assert_eq!(span.bounds_on_page(3).len(), 1);
    }

    #[test]
    fn flatten_yields_one_row_per_span() {
        let results: ExtractionResults = serde_json::from_str(RESULTS).unwrap();
        let rows = results.flatten();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field_id, "title");
        assert_eq!(rows[0].text_start, 10);
        assert_eq!(rows[0].page_end, Some(2));
        assert_eq!(rows[1].text, "Acme Corp");
        assert_eq!(rows[1].bounds.map(|b| b.top), Some(5.0));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let results: ExtractionResults =
            serde_json::from_str(r#"{"request_id":"ex-2","status":"processing"}"#).unwrap();
        assert!(results.results.is_empty());
        assert!(results.flatten().is_empty());

        let span: ExtractionSpan = serde_json::from_str(r#"{"start":1,"end":1}"#).unwrap();
        assert!(span.is_empty());
        assert!(span.bounds.is_empty());
    }
}

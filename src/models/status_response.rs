use std::collections::HashMap;

use serde::Deserialize;

/// Body returned by every `create` endpoint: one entry per submitted file.
#[derive(Debug, Deserialize)]
pub struct CreatedRequests<T> {
    pub file_ids: Vec<T>,
}

/// Body returned by batch status endpoints, keyed by request id.
#[derive(Debug, Deserialize)]
pub struct BatchStatuses<T> {
    #[serde(default = "HashMap::new")]
    pub statuses: HashMap<String, T>,
}

impl<T: Clone> BatchStatuses<T> {
    /// Payloads in the order of `request_ids`; ids the server left out are
    /// skipped. A repeated id yields its payload once per occurrence.
    pub fn in_order_of<S: AsRef<str>>(&self, request_ids: &[S]) -> Vec<T> {
        request_ids
            .iter()
            .filter_map(|id| self.statuses.get(id.as_ref()).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ids_are_dropped() {
        let batch: BatchStatuses<u32> =
            serde_json::from_str(r#"{"statuses": {"a": 1, "c": 3}}"#).unwrap();
        assert_eq!(batch.in_order_of(&["c", "b", "a"]), vec![3, 1]);
    }

    #[test]
    fn absent_statuses_mean_nothing_found() {
        let batch: BatchStatuses<u32> = serde_json::from_str("{}").unwrap();
        assert!(batch.in_order_of(&["a"]).is_empty());
    }

    #[test]
    fn repeated_ids_are_answered_each_time() {
        let batch: BatchStatuses<u32> =
            serde_json::from_str(r#"{"statuses": {"r1": 7}}"#).unwrap();
        assert_eq!(batch.in_order_of(&["r1", "r2", "r1"]), vec![7, 7]);
    }
}

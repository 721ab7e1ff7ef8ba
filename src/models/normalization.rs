use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Date {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Duration {
    pub unit: String,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Currency {
    pub value: f64,
    pub symbol: String,
    pub precision: u32,
}

/// Result of `normalize/date`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DateNormalization {
    pub request_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "sha-256")]
    pub sha256: Option<String>,
    #[serde(rename = "date", default, deserialize_with = "nullable_list")]
    pub dates: Vec<Date>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DurationNormalization {
    pub request_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "sha-256")]
    pub sha256: Option<String>,
    #[serde(rename = "duration", default, deserialize_with = "nullable_list")]
    pub durations: Vec<Duration>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CurrencyNormalization {
    pub request_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "sha-256")]
    pub sha256: Option<String>,
    #[serde(rename = "currency", default, deserialize_with = "nullable_list")]
    pub currencies: Vec<Currency>,
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_decode() {
        let normalized: DateNormalization = serde_json::from_str(
            r#"{"request_id":"n1","text":"March 3rd, 2021","sha-256":"abc",
                "date":[{"day":3,"month":3,"year":2021}]}"#,
        )
        .unwrap();
        assert_eq!(normalized.dates, vec![Date { day: 3, month: 3, year: 2021 }]);
        assert_eq!(normalized.sha256.as_deref(), Some("abc"));
    }

    #[test]
    fn null_values_mean_nothing_found() {
        let normalized: DurationNormalization =
            serde_json::from_str(r#"{"text":"whenever","duration":null}"#).unwrap();
        assert!(normalized.durations.is_empty());

        let normalized: CurrencyNormalization = serde_json::from_str(
            r#"{"text":"$1,500.25","currency":[{"value":1500.25,"symbol":"$","precision":2}]}"#,
        )
        .unwrap();
        assert_eq!(normalized.currencies[0].precision, 2);
    }
}

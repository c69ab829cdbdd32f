use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed prediction as shown in the rolling history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    #[serde(rename = "class")]
    pub predicted_label: String,
    /// Top-1 probability as a percentage, e.g. `"85.00%"`.
    pub confidence: String,
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Local>,
    #[serde(rename = "image")]
    pub encoded_image: String,
    pub simulated: bool,
}

impl HistoryEntry {
    pub fn new(
        predicted_label: String,
        probability: f32,
        encoded_image: String,
        simulated: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            predicted_label,
            confidence: format_confidence(probability),
            timestamp: Local::now(),
            encoded_image,
            simulated,
        }
    }
}

pub fn format_confidence(probability: f32) -> String {
    format!("{:.2}%", probability * 100.0)
}

mod timestamp_format {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(D::Error::custom)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| D::Error::custom(format!("nonexistent local time: {raw}")))
    }
}

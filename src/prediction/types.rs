use crate::history::HistoryEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub label: String,
    pub prob: f32,
}

/// Everything one successful prediction produced.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Exactly three records, highest probability first.
    pub top_preds: Vec<PredictionRecord>,
    pub description: String,
    pub encoded_image: String,
    pub simulated: bool,
    pub entry: HistoryEntry,
    /// History right after this prediction was appended, most recent first.
    pub history: Vec<HistoryEntry>,
}

impl Prediction {
    pub fn best(&self) -> &PredictionRecord {
        &self.top_preds[0]
    }
}

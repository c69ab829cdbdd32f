use crate::{
    history::HistoryEntry,
    prediction::{Prediction, PredictionRecord},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted: String,
    pub confidence: f32,
    pub top_preds: Vec<PredictionRecord>,
    pub description: String,
    pub image: String,
    pub history: Vec<HistoryEntry>,
    pub simulated: bool,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        let best = prediction.best().clone();
        Self {
            predicted: best.label,
            confidence: best.prob,
            top_preds: prediction.top_preds,
            description: prediction.description,
            image: prediction.encoded_image,
            history: prediction.history,
            simulated: prediction.simulated,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub mode: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

mod service;
mod types;

pub use service::{PredictionService, TOP_K, top_k};
pub use types::{Prediction, PredictionRecord};

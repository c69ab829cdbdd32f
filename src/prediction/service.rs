use super::{Prediction, PredictionRecord};
use crate::{
    Error, Result,
    catalog::Catalog,
    classifier::Classifier,
    history::{HistoryEntry, HistoryRing},
    vision,
};
use std::sync::Arc;
use tracing::{debug, info};

pub const TOP_K: usize = 3;

pub struct PredictionService {
    catalog: Arc<Catalog>,
    classifier: Arc<Classifier>,
    history: Arc<HistoryRing>,
}

impl PredictionService {
    pub fn new(catalog: Arc<Catalog>, classifier: Arc<Classifier>, history: Arc<HistoryRing>) -> Self {
        Self {
            catalog,
            classifier,
            history,
        }
    }

    /// Runs the full pipeline. History is only written once every other step
    /// has succeeded.
    pub fn predict(&self, image_bytes: &[u8]) -> Result<Prediction> {
        let image = vision::decode(image_bytes)?;
        let input = vision::to_tensor(&image);

        let scores = self.classifier.predict(&input)?;
        if scores.len() != self.catalog.len() {
            return Err(Error::OutputShape {
                expected: self.catalog.len(),
                actual: scores.len(),
            });
        }

        let top_preds = top_k(&scores, TOP_K)
            .into_iter()
            .map(|(index, prob)| {
                Ok(PredictionRecord {
                    label: self.catalog.label_at(index)?.to_string(),
                    prob,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let best = top_preds
            .first()
            .ok_or_else(|| Error::internal("classifier returned no scores"))?;
        let description = self.catalog.describe(&best.label)?.to_string();
        debug!("Top prediction: {} ({:.4})", best.label, best.prob);

        let encoded_image = vision::encode_jpeg_base64(&image)?;
        let simulated = self.classifier.is_simulated();
        let entry = HistoryEntry::new(
            best.label.clone(),
            best.prob,
            encoded_image.clone(),
            simulated,
        );

        let history = self.history.record(entry.clone())?;
        info!(
            "Predicted {} with confidence {} (simulated: {})",
            entry.predicted_label, entry.confidence, simulated
        );

        Ok(Prediction {
            top_preds,
            description,
            encoded_image,
            simulated,
            entry,
            history,
        })
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.history.snapshot()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

/// Indices of the `k` largest scores, descending. Equal scores keep their
/// original index order.
pub fn top_k(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}

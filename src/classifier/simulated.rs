use crate::{Error, Result, vision::InputTensor};
use rand::{SeedableRng, rngs::StdRng, seq::index};
use std::sync::Mutex;

/// Probabilities handed out to the three randomly drawn classes, in draw order.
pub const SIMULATED_SCORES: [f32; 3] = [0.85, 0.10, 0.05];

/// Stand-in predictor used when no model artifact could be loaded.
/// The pixel content is never looked at.
#[derive(Debug)]
pub struct SimulatedModel {
    num_classes: usize,
    rng: Mutex<StdRng>,
}

impl SimulatedModel {
    pub fn new(num_classes: usize) -> Self {
        Self {
            num_classes,
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn with_seed(num_classes: usize, seed: u64) -> Self {
        Self {
            num_classes,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn predict(&self, _input: &InputTensor) -> Result<Vec<f32>> {
        if self.num_classes < SIMULATED_SCORES.len() {
            return Err(Error::internal(format!(
                "simulation needs at least {} classes, got {}",
                SIMULATED_SCORES.len(),
                self.num_classes
            )));
        }

        let picks = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))?;
            index::sample(&mut *rng, self.num_classes, SIMULATED_SCORES.len())
        };

        let mut scores = vec![0.0; self.num_classes];
        for (idx, score) in picks.into_iter().zip(SIMULATED_SCORES) {
            scores[idx] = score;
        }
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tract_onnx::prelude::tract_ndarray::Array4;

    fn blank() -> InputTensor {
        Array4::zeros((1, 224, 224, 3))
    }

    #[test]
    fn test_exactly_three_nonzero_scores() {
        let model = SimulatedModel::new(100);
        for _ in 0..20 {
            let scores = model.predict(&blank()).unwrap();
            assert_eq!(scores.len(), 100);

            let mut nonzero: Vec<f32> = scores.iter().copied().filter(|s| *s > 0.0).collect();
            nonzero.sort_by(|a, b| b.partial_cmp(a).unwrap());
            assert_eq!(nonzero, vec![0.85, 0.10, 0.05]);
        }
    }

    #[test]
    fn test_seeded_model_is_reproducible() {
        let a = SimulatedModel::with_seed(100, 42);
        let b = SimulatedModel::with_seed(100, 42);
        for _ in 0..5 {
            assert_eq!(a.predict(&blank()).unwrap(), b.predict(&blank()).unwrap());
        }
    }

    #[test]
    fn test_small_catalog_still_fills_top_three() {
        let model = SimulatedModel::new(3);
        let mut scores = model.predict(&blank()).unwrap();
        scores.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(scores, vec![0.85, 0.10, 0.05]);
    }

    #[test]
    fn test_too_few_classes() {
        let model = SimulatedModel::new(2);
        assert!(matches!(model.predict(&blank()), Err(Error::Internal(_))));
    }
}

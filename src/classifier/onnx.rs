use crate::{
    Error, Result,
    vision::{CHANNELS, INPUT_SIZE, InputTensor},
};
use std::any::Any;
use std::panic;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::debug;

/// Pre-trained classifier exported to ONNX, run through tract.
pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
    num_classes: usize,
}

impl OnnxModel {
    /// Some malformed graphs make tract panic rather than error; those are
    /// reported as `ModelUnavailable` like any other load failure.
    pub fn load(path: impl AsRef<Path>, num_classes: usize) -> Result<Self> {
        let path = path.as_ref();
        let side = INPUT_SIZE as usize;

        let loaded = panic::catch_unwind(|| {
            tract_onnx::onnx()
                .model_for_path(path)
                .and_then(|model| {
                    model.with_input_fact(0, f32::fact([1, side, side, CHANNELS]).into())
                })
                .and_then(|model| model.into_optimized())
                .and_then(|model| model.into_runnable())
        });

        let plan = match loaded {
            Ok(Ok(plan)) => plan,
            Ok(Err(e)) => {
                return Err(Error::ModelUnavailable(format!("{}: {e}", path.display())));
            }
            Err(payload) => {
                return Err(Error::ModelUnavailable(format!(
                    "{}: model loader panicked: {}",
                    path.display(),
                    panic_message(payload.as_ref())
                )));
            }
        };

        Ok(Self { plan, num_classes })
    }

    pub fn predict(&self, input: &InputTensor) -> Result<Vec<f32>> {
        let tensor: Tensor = input.clone().into();
        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| Error::inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| Error::inference("model returned no outputs"))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| Error::inference(e.to_string()))?;
        let scores: Vec<f32> = view.iter().copied().collect();
        debug!("Model produced {} scores", scores.len());

        if scores.len() != self.num_classes {
            return Err(Error::OutputShape {
                expected: self.num_classes,
                actual: scores.len(),
            });
        }

        into_probabilities(scores)
    }
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("num_classes", &self.num_classes)
            .finish_non_exhaustive()
    }
}

/// Leaves a distribution untouched; runs softmax over raw logits.
pub(crate) fn into_probabilities(scores: Vec<f32>) -> Result<Vec<f32>> {
    if !scores.iter().all(|s| s.is_finite()) {
        return Err(Error::inference("model produced non-finite scores"));
    }
    if scores.iter().all(|s| (0.0..=1.0).contains(s)) {
        return Ok(scores);
    }

    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / sum).collect())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

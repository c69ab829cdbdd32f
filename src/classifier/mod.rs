mod onnx;
mod simulated;

pub use onnx::OnnxModel;
pub use simulated::{SIMULATED_SCORES, SimulatedModel};

use crate::{Result, config::ModelConfig, vision::InputTensor};
use std::path::Path;
use tracing::{info, warn};

/// Maps a normalized image to one probability per catalog class.
/// Decided once at startup and never swapped afterwards.
#[derive(Debug)]
pub enum Classifier {
    Loaded(OnnxModel),
    Simulated(SimulatedModel),
}

impl Classifier {
    /// Falls back to simulation when the artifact is missing or unreadable.
    pub fn load(config: &ModelConfig, num_classes: usize) -> Self {
        if !Path::new(&config.path).exists() {
            warn!(
                "Model file '{}' not found, running in simulation mode",
                config.path
            );
            return Self::simulated(config, num_classes);
        }

        match OnnxModel::load(&config.path, num_classes) {
            Ok(model) => {
                info!("Model loaded successfully: {}", config.path);
                Self::Loaded(model)
            }
            Err(e) => {
                warn!("Failed to load model, running in simulation mode: {}", e);
                Self::simulated(config, num_classes)
            }
        }
    }

    fn simulated(config: &ModelConfig, num_classes: usize) -> Self {
        let model = match config.simulation_seed {
            Some(seed) => SimulatedModel::with_seed(num_classes, seed),
            None => SimulatedModel::new(num_classes),
        };
        Self::Simulated(model)
    }

    pub fn predict(&self, input: &InputTensor) -> Result<Vec<f32>> {
        match self {
            Self::Loaded(model) => model.predict(input),
            Self::Simulated(model) => model.predict(input),
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated(_))
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Loaded(_) => "model",
            Self::Simulated(_) => "simulation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn model_config(path: &str) -> ModelConfig {
        ModelConfig {
            path: path.to_string(),
            labels_path: None,
            simulation_seed: Some(1),
        }
    }

    #[test]
    fn test_missing_model_falls_back_to_simulation() {
        let classifier = Classifier::load(&model_config("/nonexistent/sports.onnx"), 100);
        assert!(classifier.is_simulated());
        assert_eq!(classifier.mode(), "simulation");
    }

    #[test]
    fn test_unloadable_model_falls_back_to_simulation() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xde, 0xad, 0xbe, 0xef]).unwrap();

        let classifier = Classifier::load(&model_config(file.path().to_str().unwrap()), 100);
        assert!(classifier.is_simulated());
    }
}

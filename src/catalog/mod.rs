mod labels;

pub use labels::SPORT_LABELS;

use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Smallest catalog that can still fill a top-3 response.
pub const MIN_CLASSES: usize = 3;

/// Fixed, ordered set of class labels with a description per label.
#[derive(Debug, Clone)]
pub struct Catalog {
    labels: Vec<String>,
    descriptions: HashMap<String, String>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let labels: Vec<String> = SPORT_LABELS.iter().map(|l| l.to_string()).collect();
        let descriptions = labels
            .iter()
            .map(|l| (l.clone(), describe_sport(l)))
            .collect();
        Self {
            labels,
            descriptions,
        }
    }

    pub fn from_labels(labels: Vec<String>) -> Result<Self> {
        if labels.len() < MIN_CLASSES {
            return Err(Error::config(format!(
                "catalog needs at least {MIN_CLASSES} labels, got {}",
                labels.len()
            )));
        }

        let mut seen = HashSet::new();
        for label in &labels {
            if label.is_empty() {
                return Err(Error::config("catalog contains an empty label"));
            }
            if !seen.insert(label.as_str()) {
                return Err(Error::config(format!("duplicate label in catalog: {label}")));
            }
        }

        let descriptions = labels
            .iter()
            .map(|l| (l.clone(), describe_sport(l)))
            .collect();
        Ok(Self {
            labels,
            descriptions,
        })
    }

    /// Reads one label per line; blank lines are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let labels = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let catalog = Self::from_labels(labels)?;
        info!(
            "Loaded {} labels from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn label_at(&self, index: usize) -> Result<&str> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(Error::LabelIndex {
                index,
                size: self.labels.len(),
            })
    }

    pub fn describe(&self, label: &str) -> Result<&str> {
        self.descriptions
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownLabel {
                label: label.to_string(),
            })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn describe_sport(label: &str) -> String {
    format!("A fascinating sport: {label}")
}

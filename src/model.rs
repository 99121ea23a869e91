// src/model.rs - Model artifact loading and eager shape validation
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dense::DenseLayer;
use crate::error::{Result, SignError};
use crate::labels::NUM_CLASSES;
use crate::landmarks::FEATURE_COUNT;
use crate::scaler::ScalerParams;

/// On-disk artifact layout, as exported by the training notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArtifact {
    pub scaler: RawScaler,
    pub model: RawLayers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLayers {
    pub fc1_w: Vec<Vec<f64>>,
    pub fc1_b: Vec<f64>,
    pub fc2_w: Vec<Vec<f64>>,
    pub fc2_b: Vec<f64>,
    pub fc3_w: Vec<Vec<f64>>,
    pub fc3_b: Vec<f64>,
}

/// Validated, immutable classifier parameters.
///
/// Construction checks every shape up front (63 -> h1 -> h2 -> 28), so a
/// loaded artifact can never fail a matrix product for dimensional reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    scaler: ScalerParams,
    fc1: DenseLayer,
    fc2: DenseLayer,
    fc3: DenseLayer,
}

impl ModelArtifact {
    pub fn from_raw(raw: &RawArtifact) -> Result<Self> {
        let scaler = ScalerParams::new(&raw.scaler.mean, &raw.scaler.scale, FEATURE_COUNT)?;

        let fc1 = DenseLayer::from_rows("fc1", &raw.model.fc1_w, &raw.model.fc1_b)?;
        let fc2 = DenseLayer::from_rows("fc2", &raw.model.fc2_w, &raw.model.fc2_b)?;
        let fc3 = DenseLayer::from_rows("fc3", &raw.model.fc3_w, &raw.model.fc3_b)?;

        if fc1.columns() != FEATURE_COUNT {
            return Err(SignError::shape("fc1.weights columns", FEATURE_COUNT, fc1.columns()));
        }
        if fc2.columns() != fc1.rows() {
            return Err(SignError::shape("fc2.weights columns", fc1.rows(), fc2.columns()));
        }
        if fc3.columns() != fc2.rows() {
            return Err(SignError::shape("fc3.weights columns", fc2.rows(), fc3.columns()));
        }
        if fc3.rows() != NUM_CLASSES {
            return Err(SignError::shape("fc3.weights rows", NUM_CLASSES, fc3.rows()));
        }

        debug!(
            "Validated artifact: {} -> {} -> {} -> {}",
            fc1.columns(),
            fc1.rows(),
            fc2.rows(),
            fc3.rows()
        );

        Ok(Self { scaler, fc1, fc2, fc3 })
    }

    /// Parse an artifact from JSON text.
    ///
    /// Also accepts the web demo's `asl_model.js` form, where the object is
    /// wrapped in `const ASL_MODEL_DATA = { ... };`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(strip_js_assignment(text))?;
        Self::from_raw(&raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let artifact = Self::from_json_str(&text)?;

        info!(
            "Loaded model artifact from {} (hidden sizes {} / {})",
            path.display(),
            artifact.hidden_sizes().0,
            artifact.hidden_sizes().1
        );

        Ok(artifact)
    }

    pub fn scaler(&self) -> &ScalerParams {
        &self.scaler
    }

    /// The three dense layers in evaluation order.
    pub fn layers(&self) -> [&DenseLayer; 3] {
        [&self.fc1, &self.fc2, &self.fc3]
    }

    /// `(h1, h2)`
    pub fn hidden_sizes(&self) -> (usize, usize) {
        (self.fc1.rows(), self.fc2.rows())
    }

    pub fn num_classes(&self) -> usize {
        self.fc3.rows()
    }
}

fn strip_js_assignment(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return trimmed;
    }

    match (trimmed.find('='), trimmed.rfind('}')) {
        (Some(eq), Some(end)) if eq < end => match trimmed[eq..].find('{') {
            Some(start) => &trimmed[eq + start..=end],
            None => trimmed,
        },
        _ => trimmed,
    }
}

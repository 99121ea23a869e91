// src/predictor.rs - Per-frame orchestration with last-prediction fallback
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use once_cell::unsync::OnceCell;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::config::PredictorConfig;
use crate::error::{Result, SignError};
use crate::labels::{self, Symbol};
use crate::landmarks::LandmarkFrame;
use crate::metrics::PerformanceMetrics;
use crate::model::ModelArtifact;

/// Text shown when there is no symbol to report
pub const NO_SYMBOL_LABEL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// `None` is the "no symbol" sentinel
    pub symbol: Option<Symbol>,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(symbol: Symbol, confidence: f64) -> Self {
        Self {
            symbol: Some(symbol),
            confidence,
        }
    }

    pub fn none() -> Self {
        Self {
            symbol: None,
            confidence: 0.0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.symbol.is_none()
    }

    /// Display text: the symbol, or `-` for the sentinel.
    pub fn label(&self) -> String {
        self.symbol
            .map(|s| s.to_string())
            .unwrap_or_else(|| NO_SYMBOL_LABEL.to_string())
    }

    pub fn is_displayable(&self, min_confidence: f64) -> bool {
        self.symbol.is_some() && self.confidence >= min_confidence
    }
}

impl Default for Prediction {
    fn default() -> Self {
        Self::none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorState {
    Uninitialized,
    Ready,
}

/// Runs the classifier once per landmark frame.
///
/// Starts `Uninitialized`; a successful `load` moves it to `Ready` for the
/// rest of its life. Besides the model, the only state is the last emitted
/// prediction and timing metrics.
pub struct FramePredictor {
    classifier: OnceCell<Classifier>,
    last_prediction: Option<Prediction>,
    config: PredictorConfig,
    metrics: PerformanceMetrics,
}

impl FramePredictor {
    pub fn new(config: PredictorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            classifier: OnceCell::new(),
            last_prediction: None,
            metrics: PerformanceMetrics::new(config.metrics_window),
            config,
        })
    }

    pub fn with_artifact(artifact: Arc<ModelArtifact>, config: PredictorConfig) -> Result<Self> {
        let mut predictor = Self::new(config)?;
        predictor.load(artifact)?;
        Ok(predictor)
    }

    /// Install the model. Fails if one is already installed.
    pub fn load(&mut self, artifact: Arc<ModelArtifact>) -> Result<()> {
        let (h1, h2) = artifact.hidden_sizes();
        self.classifier
            .set(Classifier::new(artifact))
            .map_err(|_| SignError::ModelAlreadyLoaded)?;

        info!("Sign classifier ready (63 -> {} -> {} -> {})", h1, h2, labels::NUM_CLASSES);
        Ok(())
    }

    /// Read, validate and install an artifact from disk.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_ready() {
            return Err(SignError::ModelAlreadyLoaded);
        }

        let artifact = ModelArtifact::from_path(path)?;
        self.load(Arc::new(artifact))
    }

    pub fn state(&self) -> PredictorState {
        if self.classifier.get().is_some() {
            PredictorState::Ready
        } else {
            PredictorState::Uninitialized
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == PredictorState::Ready
    }

    /// Shared handle to the loaded artifact, for predictors on other streams.
    pub fn artifact(&self) -> Option<Arc<ModelArtifact>> {
        self.classifier.get().map(|c| Arc::clone(c.artifact()))
    }

    /// Classify one frame.
    ///
    /// A frame with the wrong landmark count or a non-finite coordinate yields
    /// `Prediction::none()` and leaves the last prediction untouched. So does a
    /// finite frame whose logits overflow.
    pub fn predict(&mut self, frame: &LandmarkFrame) -> Result<Prediction> {
        let classifier = self.classifier.get().ok_or(SignError::ModelNotLoaded)?;
        let start = Instant::now();

        let features = match frame.to_features() {
            Ok(features) => features,
            Err(SignError::MalformedFrame(reason)) => {
                debug!("Skipping frame: {}", reason);
                self.metrics.record_skipped();
                return Ok(Prediction::none());
            }
            Err(e) => return Err(e),
        };

        let classification = match classifier.classify(&features) {
            Ok(classification) => classification,
            Err(SignError::NonFiniteOutput(class)) => {
                debug!("Skipping frame: logit {} overflowed", class);
                self.metrics.record_skipped();
                return Ok(Prediction::none());
            }
            Err(e) => return Err(e),
        };
        let symbol = labels::decode(classification.class_index).map_err(|e| {
            warn!("Classifier produced an out-of-range class: {}", e);
            e
        })?;

        let prediction = Prediction::new(symbol, classification.confidence);
        self.last_prediction = Some(prediction);
        self.metrics.record_classified(start.elapsed());

        debug!("Predicted {} ({:.3})", symbol, prediction.confidence);
        Ok(prediction)
    }

    /// What to show when the pose collaborator found no hand this frame.
    pub fn no_hand(&self) -> Prediction {
        self.last_prediction.unwrap_or_default()
    }

    pub fn last_prediction(&self) -> Option<Prediction> {
        self.last_prediction
    }

    /// Whether `prediction` clears the configured display threshold.
    pub fn should_display(&self, prediction: &Prediction) -> bool {
        prediction.is_displayable(self.config.min_display_confidence)
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }
}

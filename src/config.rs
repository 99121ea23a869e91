// src/config.rs
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Predictions below this confidence are reported as not displayable.
    /// 0.0 keeps the raw softmax semantics: everything is shown.
    pub min_display_confidence: f64,
    /// Frames averaged by the rolling timing metrics
    pub metrics_window: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            min_display_confidence: 0.0,
            metrics_window: 30,
        }
    }
}

impl PredictorConfig {
    pub fn with_min_display_confidence(mut self, threshold: f64) -> Self {
        self.min_display_confidence = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_display_confidence) {
            return Err(SignError::degenerate(
                "config.min_display_confidence",
                0,
                format!("{} is outside [0, 1]", self.min_display_confidence),
            ));
        }
        if self.metrics_window == 0 {
            return Err(SignError::degenerate("config.metrics_window", 0, "window must hold at least one frame"));
        }
        Ok(())
    }
}

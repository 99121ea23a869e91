//! ASL fingerspelling recognition over MediaPipe hand landmarks.
//!
//! A [`FramePredictor`] takes one hand's 21 world-space landmarks per video
//! frame and returns the predicted symbol (`A`..`Z`, `DEL`, `SPACE`) with its
//! softmax confidence. The model is a small standardize -> MLP -> softmax
//! pipeline loaded once from a JSON artifact.

pub mod classifier;
pub mod config;
pub mod data;
pub mod dense;
pub mod error;
pub mod labels;
pub mod landmarks;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod scaler;

#[cfg(test)]
mod test_support;

pub use classifier::{argmax, softmax, Classification, Classifier};
pub use config::PredictorConfig;
pub use error::{Result, SignError};
pub use labels::{decode, Letter, Symbol, NUM_CLASSES};
pub use landmarks::{FeatureVector, Landmark, LandmarkFrame, FEATURE_COUNT, NUM_LANDMARKS};
pub use model::ModelArtifact;
pub use predictor::{FramePredictor, Prediction, PredictorState};
pub use scaler::ScalerParams;

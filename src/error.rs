// src/error.rs
use thiserror::Error;

/// Errors raised by the sign classification pipeline.
#[derive(Error, Debug)]
pub enum SignError {
    /// A prediction was requested before any model artifact was loaded
    #[error("Model not loaded: load an artifact before requesting predictions")]
    ModelNotLoaded,

    /// The predictor already holds a model; it cannot be replaced
    #[error("Model already loaded")]
    ModelAlreadyLoaded,

    /// A vector or matrix has the wrong dimension
    #[error("Shape mismatch in {field}: expected {expected}, found {found}")]
    ShapeMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    /// A value in the artifact makes the model unusable (zero scale, NaN weight)
    #[error("Degenerate value in {field}[{index}]: {reason}")]
    DegenerateValue {
        field: String,
        index: usize,
        reason: String,
    },

    /// Class index outside the label table
    #[error("Invalid class index {0} (label table has 28 entries)")]
    InvalidClassIndex(usize),

    /// Landmark frame that cannot be turned into a feature vector
    #[error("Malformed landmark frame: {0}")]
    MalformedFrame(String),

    /// A finite frame overflowed inside the network
    #[error("Non-finite logit for class {0}")]
    NonFiniteOutput(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SignError {
    pub(crate) fn shape(field: impl Into<String>, expected: usize, found: usize) -> Self {
        SignError::ShapeMismatch {
            field: field.into(),
            expected,
            found,
        }
    }

    pub(crate) fn degenerate(field: impl Into<String>, index: usize, reason: impl Into<String>) -> Self {
        SignError::DegenerateValue {
            field: field.into(),
            index,
            reason: reason.into(),
        }
    }

    /// True for errors that mean the artifact itself is inconsistent.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            SignError::ShapeMismatch { .. } | SignError::DegenerateValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SignError>;

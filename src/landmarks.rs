// src/landmarks.rs - MediaPipe hand landmarks and feature flattening
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignError};

// MediaPipe hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Landmarks per hand
pub const NUM_LANDMARKS: usize = 21;

/// Flattened (x, y, z) features per hand
pub const FEATURE_COUNT: usize = NUM_LANDMARKS * 3;

/// Standardized or raw model input, one value per coordinate.
pub type FeatureVector = DVector<f64>;

/// A single world-space landmark in meters.
///
/// Deserializes from MediaPipe's `{"x", "y", "z"}` objects; extra fields such
/// as `visibility` are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One hand's landmarks for one video frame, in anatomical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Check the count and that every coordinate is finite.
    pub fn validate(&self) -> Result<()> {
        if self.landmarks.len() != NUM_LANDMARKS {
            return Err(SignError::MalformedFrame(format!(
                "expected {} landmarks, got {}",
                NUM_LANDMARKS,
                self.landmarks.len()
            )));
        }

        if let Some(i) = self.landmarks.iter().position(|lm| !lm.is_finite()) {
            return Err(SignError::MalformedFrame(format!(
                "landmark {} has a non-finite coordinate",
                i
            )));
        }

        Ok(())
    }

    /// Flatten to `[x0, y0, z0, x1, ...]` after validating the frame.
    pub fn to_features(&self) -> Result<FeatureVector> {
        self.validate()?;

        Ok(DVector::from_iterator(
            FEATURE_COUNT,
            self.landmarks.iter().flat_map(|lm| [lm.x, lm.y, lm.z]),
        ))
    }
}

impl From<Vec<Landmark>> for LandmarkFrame {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Self::new(landmarks)
    }
}

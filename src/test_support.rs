// Artifact and frame builders shared by unit tests.
use crate::labels::NUM_CLASSES;
use crate::landmarks::{Landmark, LandmarkFrame, FEATURE_COUNT, NUM_LANDMARKS};
use crate::model::{ModelArtifact, RawArtifact, RawLayers, RawScaler};

/// Identity scaler, single-unit hidden layers with zero weights, and a bias of
/// `strength` on `class` in the output layer.
pub fn biased_raw(class: usize, strength: f64) -> RawArtifact {
    let mut fc3_b = vec![0.0; NUM_CLASSES];
    fc3_b[class] = strength;

    RawArtifact {
        scaler: RawScaler {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        },
        model: RawLayers {
            fc1_w: vec![vec![0.0; FEATURE_COUNT]],
            fc1_b: vec![0.0],
            fc2_w: vec![vec![0.0]],
            fc2_b: vec![0.0],
            fc3_w: vec![vec![0.0]; NUM_CLASSES],
            fc3_b,
        },
    }
}

pub fn biased_artifact(class: usize, strength: f64) -> ModelArtifact {
    ModelArtifact::from_raw(&biased_raw(class, strength)).unwrap()
}

/// Large fc1 weights and opposite-signed fc3 rows, so extreme but finite
/// coordinates overflow to infinite logits of both signs.
pub fn overflow_artifact() -> ModelArtifact {
    let mut raw = biased_raw(0, 0.0);
    raw.model.fc1_w = vec![vec![10.0; FEATURE_COUNT]];
    raw.model.fc2_w = vec![vec![1.0]];
    raw.model.fc3_w = (0..NUM_CLASSES)
        .map(|r| vec![if r % 2 == 0 { 1.0 } else { -1.0 }])
        .collect();
    ModelArtifact::from_raw(&raw).unwrap()
}

/// Non-trivial weights so every layer contributes to the result.
pub fn dense_artifact(h1: usize, h2: usize) -> ModelArtifact {
    let wave = |seed: usize| ((seed as f64) * 0.618).sin() * 0.5;

    let raw = RawArtifact {
        scaler: RawScaler {
            mean: (0..FEATURE_COUNT).map(|i| wave(i) * 0.1).collect(),
            scale: (0..FEATURE_COUNT).map(|i| 0.05 + (i % 7) as f64 * 0.01).collect(),
        },
        model: RawLayers {
            fc1_w: (0..h1)
                .map(|r| (0..FEATURE_COUNT).map(|c| wave(r * 131 + c)).collect())
                .collect(),
            fc1_b: (0..h1).map(|r| wave(r + 3) * 0.1).collect(),
            fc2_w: (0..h2).map(|r| (0..h1).map(|c| wave(r * 17 + c + 5)).collect()).collect(),
            fc2_b: (0..h2).map(|r| wave(r + 11) * 0.1).collect(),
            fc3_w: (0..NUM_CLASSES)
                .map(|r| (0..h2).map(|c| wave(r * 29 + c + 7)).collect())
                .collect(),
            fc3_b: (0..NUM_CLASSES).map(|r| wave(r + 13) * 0.1).collect(),
        },
    };

    ModelArtifact::from_raw(&raw).unwrap()
}

/// A full-size frame with every coordinate set to `value`.
pub fn uniform_frame(value: f64) -> LandmarkFrame {
    LandmarkFrame::new(vec![Landmark::new(value, value, value); NUM_LANDMARKS])
}

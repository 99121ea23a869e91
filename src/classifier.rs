// src/classifier.rs - Forward pass: scaler -> fc1 -> relu -> fc2 -> relu -> fc3 -> softmax
use std::sync::Arc;

use nalgebra::DVector;

use crate::dense::relu_in_place;
use crate::error::{Result, SignError};
use crate::landmarks::FeatureVector;
use crate::model::ModelArtifact;

/// Outcome of one forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Winning class (lowest index on exact ties)
    pub class_index: usize,
    /// `probabilities[class_index]`
    pub confidence: f64,
    /// Softmax over all classes
    pub probabilities: Vec<f64>,
}

impl Classification {
    /// The `k` most probable classes, highest first; equal probabilities keep
    /// index order.
    pub fn top_k(&self, k: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.probabilities.iter().copied().enumerate().collect();
        // sort_by is stable, so ties stay in ascending index order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

/// Numerically stable softmax: every logit is shifted by the maximum before
/// exponentiation, so large logits cannot overflow.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest value; the first one wins ties. NaN entries are
/// skipped.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            Some(_) => best = Some((i, v)),
            None => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Three-layer MLP over a shared, read-only artifact.
#[derive(Debug, Clone)]
pub struct Classifier {
    artifact: Arc<ModelArtifact>,
}

impl Classifier {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self { artifact }
    }

    pub fn artifact(&self) -> &Arc<ModelArtifact> {
        &self.artifact
    }

    /// Raw fc3 outputs for a 63-value feature vector.
    pub fn logits(&self, features: &FeatureVector) -> Result<DVector<f64>> {
        let [fc1, fc2, fc3] = self.artifact.layers();

        let scaled = self.artifact.scaler().transform(features)?;

        let mut hidden = fc1.forward(&scaled)?;
        relu_in_place(&mut hidden);

        let mut hidden = fc2.forward(&hidden)?;
        relu_in_place(&mut hidden);

        fc3.forward(&hidden)
    }

    /// Fails with `NonFiniteOutput` when the logits overflowed.
    pub fn classify(&self, features: &FeatureVector) -> Result<Classification> {
        let logits = self.logits(features)?;
        if let Some(i) = logits.iter().position(|x| !x.is_finite()) {
            return Err(SignError::NonFiniteOutput(i));
        }

        let probabilities = softmax(logits.as_slice());

        let class_index = argmax(&probabilities)
            .ok_or_else(|| SignError::shape("fc3 output", self.artifact.num_classes(), 0))?;

        Ok(Classification {
            class_index,
            confidence: probabilities[class_index],
            probabilities,
        })
    }
}

// src/scaler.rs - StandardScaler parameters exported alongside the model
use nalgebra::DVector;

use crate::error::{Result, SignError};
use crate::landmarks::FeatureVector;

/// Per-feature mean and scale used to standardize raw landmark features.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerParams {
    mean: DVector<f64>,
    scale: DVector<f64>,
}

impl ScalerParams {
    /// Validate and build scaler params.
    ///
    /// Every `scale[i]` must be finite and non-zero; a zero scale would turn
    /// the affected feature into an infinity on every frame.
    pub fn new(mean: &[f64], scale: &[f64], expected_len: usize) -> Result<Self> {
        if mean.len() != expected_len {
            return Err(SignError::shape("scaler.mean", expected_len, mean.len()));
        }
        if scale.len() != expected_len {
            return Err(SignError::shape("scaler.scale", expected_len, scale.len()));
        }

        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(SignError::degenerate("scaler.mean", i, "mean is not finite"));
        }
        for (i, s) in scale.iter().enumerate() {
            if !s.is_finite() {
                return Err(SignError::degenerate("scaler.scale", i, "scale is not finite"));
            }
            if *s == 0.0 {
                return Err(SignError::degenerate("scaler.scale", i, "scale must be non-zero"));
            }
        }

        Ok(Self {
            mean: DVector::from_column_slice(mean),
            scale: DVector::from_column_slice(scale),
        })
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &DVector<f64> {
        &self.scale
    }

    /// `(v[i] - mean[i]) / scale[i]`
    pub fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        self.check_len(features)?;

        Ok(DVector::from_iterator(
            features.len(),
            features
                .iter()
                .zip(self.mean.iter().zip(self.scale.iter()))
                .map(|(v, (m, s))| (v - m) / s),
        ))
    }

    /// `v[i] * scale[i] + mean[i]`, undoing `transform`.
    pub fn inverse_transform(&self, scaled: &FeatureVector) -> Result<FeatureVector> {
        self.check_len(scaled)?;

        Ok(DVector::from_iterator(
            scaled.len(),
            scaled
                .iter()
                .zip(self.mean.iter().zip(self.scale.iter()))
                .map(|(v, (m, s))| v * s + m),
        ))
    }

    fn check_len(&self, features: &FeatureVector) -> Result<()> {
        if features.len() != self.mean.len() {
            return Err(SignError::shape("scaler input", self.mean.len(), features.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::FEATURE_COUNT;

    fn params() -> ScalerParams {
        let mean: Vec<f64> = (0..FEATURE_COUNT).map(|i| i as f64 * 0.01 - 0.3).collect();
        let scale: Vec<f64> = (0..FEATURE_COUNT)
            .map(|i| if i % 2 == 0 { 0.05 + i as f64 * 0.001 } else { -1.5 })
            .collect();
        ScalerParams::new(&mean, &scale, FEATURE_COUNT).unwrap()
    }

    #[test]
    fn standardizes_each_feature() {
        let p = ScalerParams::new(&[1.0, -2.0], &[2.0, 0.5], 2).unwrap();
        let out = p.transform(&DVector::from_vec(vec![5.0, -1.0])).unwrap();
        assert_eq!(out.as_slice(), &[2.0, 2.0]);
    }

    #[test]
    fn inverse_round_trip() {
        let p = params();
        let samples = [
            DVector::zeros(FEATURE_COUNT),
            DVector::from_fn(FEATURE_COUNT, |i, _| (i as f64 * 0.37).sin() * 0.1),
            DVector::from_fn(FEATURE_COUNT, |i, _| -(i as f64) * 3.0 + 12.5),
        ];

        for v in samples.iter() {
            let back = p.inverse_transform(&p.transform(v).unwrap()).unwrap();
            for (a, b) in back.iter().zip(v.iter()) {
                assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn transform_does_not_touch_input() {
        let p = params();
        let v = DVector::from_element(FEATURE_COUNT, 0.2);
        let before = v.clone();
        let _ = p.transform(&v).unwrap();
        assert_eq!(v, before);
    }

    #[test]
    fn rejects_wrong_input_length() {
        let p = params();
        assert!(matches!(
            p.transform(&DVector::zeros(FEATURE_COUNT - 1)),
            Err(SignError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            p.inverse_transform(&DVector::zeros(FEATURE_COUNT + 3)),
            Err(SignError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn rejects_zero_and_non_finite_scale() {
        let mean = vec![0.0; 4];
        let zero = ScalerParams::new(&mean, &[1.0, 1.0, 0.0, 1.0], 4);
        match zero {
            Err(SignError::DegenerateValue { field, index, .. }) => {
                assert_eq!(field, "scaler.scale");
                assert_eq!(index, 2);
            }
            other => panic!("expected degenerate scale, got {:?}", other),
        }

        assert!(ScalerParams::new(&mean, &[1.0, f64::INFINITY, 1.0, 1.0], 4).is_err());
        assert!(ScalerParams::new(&mean, &[1.0; 3], 4).is_err());
    }
}

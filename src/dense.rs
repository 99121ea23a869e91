// src/dense.rs - Fully connected layers and activations
use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SignError};

/// Weights and bias of one fully connected layer.
///
/// `weights` is `rows x columns` (output features x input features), matching
/// the `[out][in]` layout of the exported PyTorch `Linear` weights.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    name: String,
    weights: DMatrix<f64>,
    bias: DVector<f64>,
}

impl DenseLayer {
    /// Build a layer from row-major nested weights, rejecting ragged rows,
    /// empty layers, bias length mismatches and non-finite values.
    pub fn from_rows(name: &str, rows: &[Vec<f64>], bias: &[f64]) -> Result<Self> {
        let columns = match rows.first() {
            Some(first) => first.len(),
            None => return Err(SignError::degenerate(format!("{}.weights", name), 0, "layer has no output units")),
        };

        if columns == 0 {
            return Err(SignError::degenerate(format!("{}.weights", name), 0, "layer has no input features"));
        }

        for (r, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(SignError::shape(format!("{}.weights[{}]", name, r), columns, row.len()));
            }
            if let Some(c) = row.iter().position(|w| !w.is_finite()) {
                return Err(SignError::degenerate(
                    format!("{}.weights[{}]", name, r),
                    c,
                    "weight is not finite",
                ));
            }
        }

        if bias.len() != rows.len() {
            return Err(SignError::shape(format!("{}.bias", name), rows.len(), bias.len()));
        }
        if let Some(i) = bias.iter().position(|b| !b.is_finite()) {
            return Err(SignError::degenerate(format!("{}.bias", name), i, "bias is not finite"));
        }

        Ok(Self {
            name: name.to_string(),
            weights: DMatrix::from_fn(rows.len(), columns, |r, c| rows[r][c]),
            bias: DVector::from_column_slice(bias),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output features
    pub fn rows(&self) -> usize {
        self.weights.nrows()
    }

    /// Input features
    pub fn columns(&self) -> usize {
        self.weights.ncols()
    }

    pub fn weights(&self) -> &DMatrix<f64> {
        &self.weights
    }

    pub fn bias(&self) -> &DVector<f64> {
        &self.bias
    }

    /// `out[j] = bias[j] + sum_i input[i] * weights[j][i]`.
    ///
    /// Each output is accumulated over `i` in ascending order from 0.0 with the
    /// bias added last, so results are bit-identical across platforms.
    /// nalgebra's gemv is not used here since it may reorder the sum.
    pub fn forward(&self, input: &DVector<f64>) -> Result<DVector<f64>> {
        if input.len() != self.columns() {
            return Err(SignError::shape(format!("{} input", self.name), self.columns(), input.len()));
        }

        let mut output = DVector::zeros(self.rows());
        for j in 0..self.rows() {
            let mut sum = 0.0;
            for i in 0..self.columns() {
                sum += input[i] * self.weights[(j, i)];
            }
            output[j] = sum + self.bias[j];
        }

        Ok(output)
    }
}

/// Rectified linear unit, elementwise `max(0, x)`.
pub fn relu(input: &DVector<f64>) -> DVector<f64> {
    input.map(|x| x.max(0.0))
}

/// Apply ReLU in place on a freshly computed activation.
pub fn relu_in_place(values: &mut DVector<f64>) {
    values.apply(|x| *x = x.max(0.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_2x3() -> DenseLayer {
        DenseLayer::from_rows(
            "fc",
            &[vec![1.0, 2.0, 3.0], vec![-1.0, 0.5, 0.0]],
            &[0.5, -2.0],
        )
        .unwrap()
    }

    #[test]
    fn forward_matches_hand_computation() {
        let layer = layer_2x3();
        let out = layer.forward(&DVector::from_vec(vec![1.0, 1.0, 2.0])).unwrap();
        assert_eq!(out.len(), layer.rows());
        assert_eq!(out[0], 1.0 + 2.0 + 6.0 + 0.5);
        assert_eq!(out[1], -1.0 + 0.5 - 2.0);
    }

    #[test]
    fn forward_rejects_wrong_input_length() {
        let layer = layer_2x3();
        for len in [0, 2, 4, 63] {
            let result = layer.forward(&DVector::zeros(len));
            match result {
                Err(SignError::ShapeMismatch { expected, found, .. }) => {
                    assert_eq!(expected, 3);
                    assert_eq!(found, len);
                }
                other => panic!("expected shape mismatch, got {:?}", other),
            }
        }
    }

    #[test]
    fn output_length_follows_rows() {
        for rows in 1..6 {
            let weights: Vec<Vec<f64>> = (0..rows).map(|r| vec![r as f64; 4]).collect();
            let bias = vec![0.0; rows];
            let layer = DenseLayer::from_rows("fc", &weights, &bias).unwrap();
            let out = layer.forward(&DVector::from_element(4, 1.0)).unwrap();
            assert_eq!(out.len(), rows);
        }
    }

    #[test]
    fn rejects_ragged_rows_and_bad_bias() {
        let ragged = DenseLayer::from_rows("fc2", &[vec![1.0, 2.0], vec![1.0]], &[0.0, 0.0]);
        assert!(matches!(ragged, Err(SignError::ShapeMismatch { .. })));

        let short_bias = DenseLayer::from_rows("fc2", &[vec![1.0, 2.0]], &[]);
        assert!(matches!(short_bias, Err(SignError::ShapeMismatch { .. })));

        let nan = DenseLayer::from_rows("fc2", &[vec![1.0, f64::NAN]], &[0.0]);
        assert!(matches!(nan, Err(SignError::DegenerateValue { index: 1, .. })));

        let empty = DenseLayer::from_rows("fc2", &[], &[]);
        assert!(matches!(empty, Err(SignError::DegenerateValue { .. })));
    }

    #[test]
    fn relu_clamps_negatives_only() {
        let v = DVector::from_vec(vec![-2.0, -0.0, 0.0, 0.25, 7.0]);
        let out = relu(&v);
        assert_eq!(out.len(), v.len());
        assert_eq!(out.as_slice(), &[0.0, 0.0, 0.0, 0.25, 7.0]);

        let mut in_place = v.clone();
        relu_in_place(&mut in_place);
        assert_eq!(in_place, out);
    }
}

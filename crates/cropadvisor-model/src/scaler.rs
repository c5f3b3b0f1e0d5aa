//! Feature standardization.

use crate::error::{FitError, PredictionFailure};

/// Standard deviations below this are treated as zero and leave the feature unscaled
const MIN_STD: f64 = 1e-12;

/// Per-feature standardization to zero mean and unit variance.
///
/// Only constructed fitted, so the same mean/std pair is used for the training
/// rows and for every query afterwards. Uses the population standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    /// Fit over training rows
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, FitError> {
        let n_features = check_matrix(rows)?;
        let n = rows.len() as f64;

        let mut mean = vec![0.0; n_features];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut std = vec![0.0; n_features];
        for row in rows {
            for ((s, v), m) in std.iter_mut().zip(row).zip(&mean) {
                *s += (v - m) * (v - m);
            }
        }
        for s in &mut std {
            *s = (*s / n).sqrt();
        }

        tracing::debug!("Scaler fitted: mean={:?} std={:?}", mean, std);
        Ok(Self { mean, std })
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn std(&self) -> &[f64] {
        &self.std
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize one row
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictionFailure> {
        if row.len() != self.n_features() {
            return Err(PredictionFailure::DimensionMismatch {
                expected: self.n_features(),
                actual: row.len(),
            });
        }

        if let Some((index, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(PredictionFailure::NonFiniteFeature { index, value });
        }

        Ok(self.apply(row))
    }

    /// Standardize a row already known to be finite and of the fitted width
    pub(crate) fn apply(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.std))
            .map(|(v, (m, s))| if *s > MIN_STD { (v - m) / s } else { v - m })
            .collect()
    }
}

/// Check a training matrix is non-empty, rectangular and finite; returns its width
pub(crate) fn check_matrix(rows: &[Vec<f64>]) -> Result<usize, FitError> {
    let width = rows.first().map(Vec::len).ok_or(FitError::EmptyTrainingSet)?;

    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(FitError::RaggedRow { row: row_idx, expected: width, actual: row.len() });
        }
        if let Some(index) = row.iter().position(|v| !v.is_finite()) {
            return Err(FitError::NonFiniteTrainingValue { row: row_idx, index });
        }
    }

    Ok(width)
}

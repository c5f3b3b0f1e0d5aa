//! Error types for fitting and prediction

use cropadvisor_core::models::Feature;
use thiserror::Error;

/// Failure while fitting the encoder, scaler, or classifier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Training set has {samples} samples but {k} neighbors are required")]
    TooFewSamples { samples: usize, k: usize },

    #[error("Got {samples} samples but {labels} labels")]
    LabelCountMismatch { samples: usize, labels: usize },

    #[error("Row {row} has {actual} features, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("Row {row} has a non-finite value in feature {index}")]
    NonFiniteTrainingValue { row: usize, index: usize },
}

/// Why a recommendation could not be computed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionFailure {
    #[error("{} is not a finite number ({value})", feature_name(.index))]
    NonFiniteFeature { index: usize, value: f64 },

    #[error("Query has {actual} features, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Classifier produced unknown label code {code}")]
    UnknownLabel { code: usize },

    #[error("No neighbors to vote")]
    NoNeighbors,

    #[error("Neighbor row {index} is outside the catalog")]
    NeighborOutOfRange { index: usize },

    #[error("Crop '{crop}' has no catalog entry")]
    CropNotInCatalog { crop: String },

    #[error("District '{name}' is not in the catalog")]
    UnknownDistrict { name: String },
}

fn feature_name(index: &usize) -> String {
    Feature::ALL
        .get(*index)
        .map(|f| f.to_string())
        .unwrap_or_else(|| format!("feature {}", index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_message_names_feature() {
        let err = PredictionFailure::NonFiniteFeature { index: 2, value: f64::NAN };
        assert_eq!(err.to_string(), "soil pH is not a finite number (NaN)");

        let err = PredictionFailure::NonFiniteFeature { index: 7, value: f64::INFINITY };
        assert_eq!(err.to_string(), "feature 7 is not a finite number (inf)");
    }
}

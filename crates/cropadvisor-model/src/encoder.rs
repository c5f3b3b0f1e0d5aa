//! Crop label encoding.

use crate::error::FitError;
use std::collections::BTreeSet;

/// Bijection between crop names and dense integer codes.
///
/// Codes follow the sorted order of the distinct labels, so `Cotton` gets 0 in the
/// built-in catalog and `Wheat` gets the highest code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit the encoder over a label column
    pub fn fit<'a, I>(labels: I) -> Result<Self, FitError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<String> = labels
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        if classes.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }

        tracing::debug!("Label encoder fitted with {} classes", classes.len());
        Ok(Self { classes })
    }

    /// Distinct labels in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn transform(&self, label: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(label)).ok()
    }

    /// Encode a whole label column; every label must have been seen during fit
    pub fn transform_all<'a, I>(&self, labels: I) -> Option<Vec<usize>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels.into_iter().map(|l| self.transform(l)).collect()
    }

    pub fn inverse_transform(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}

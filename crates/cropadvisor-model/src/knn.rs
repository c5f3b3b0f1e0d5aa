//! k-nearest-neighbor classifier over standardized features.

use crate::error::{FitError, PredictionFailure};
use crate::scaler::check_matrix;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of neighbors consulted for every query
pub const NEIGHBOR_COUNT: usize = 3;

/// A training row near a query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    /// Row index into the training set
    pub index: usize,

    /// Euclidean distance in standardized feature space
    pub distance: f64,
}

/// k-NN classifier with k fixed at [`NEIGHBOR_COUNT`].
///
/// Each neighbor casts one vote and the majority label wins, except that when
/// any neighbor sits exactly on the query only those exact matches vote. Equal
/// counts go to the label whose closest voter is nearer, then to the lower
/// label code.
#[derive(Debug, Clone)]
pub struct KNeighborsClassifier {
    samples: Vec<Vec<f64>>,
    labels: Vec<usize>,
}

#[derive(Debug)]
struct Ballot {
    votes: usize,
    nearest: f64,
}

impl KNeighborsClassifier {
    /// Fit on standardized training rows and their encoded labels
    pub fn fit(samples: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Self, FitError> {
        check_matrix(&samples)?;

        if samples.len() != labels.len() {
            return Err(FitError::LabelCountMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }

        if samples.len() < NEIGHBOR_COUNT {
            return Err(FitError::TooFewSamples { samples: samples.len(), k: NEIGHBOR_COUNT });
        }

        tracing::debug!("k-NN fitted on {} samples (k={})", samples.len(), NEIGHBOR_COUNT);
        Ok(Self { samples, labels })
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn n_features(&self) -> usize {
        self.samples[0].len()
    }

    /// The [`NEIGHBOR_COUNT`] nearest training rows, closest first.
    ///
    /// Rows at equal distance are ordered by row index.
    pub fn neighbors(&self, query: &[f64]) -> Result<Vec<Neighbor>, PredictionFailure> {
        self.check_query(query)?;

        let mut all: Vec<Neighbor> = self
            .samples
            .iter()
            .enumerate()
            .map(|(index, sample)| Neighbor { index, distance: euclidean(sample, query) })
            .collect();

        all.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.index.cmp(&b.index)));
        all.truncate(NEIGHBOR_COUNT);
        Ok(all)
    }

    /// Predicted label code for a standardized query
    pub fn predict(&self, query: &[f64]) -> Result<usize, PredictionFailure> {
        let neighbors = self.neighbors(query)?;
        self.vote(&neighbors)
    }

    /// Majority label among a set of neighbors.
    ///
    /// Neighbors sitting exactly on the query outrank all others: when there
    /// is one, only exact matches vote.
    pub(crate) fn vote(&self, neighbors: &[Neighbor]) -> Result<usize, PredictionFailure> {
        let exact_match = neighbors.iter().any(|n| n.distance == 0.0);
        let mut ballots: BTreeMap<usize, Ballot> = BTreeMap::new();

        for n in neighbors {
            if exact_match && n.distance != 0.0 {
                continue;
            }

            let code = *self
                .labels
                .get(n.index)
                .ok_or(PredictionFailure::NeighborOutOfRange { index: n.index })?;
            let ballot = ballots
                .entry(code)
                .or_insert(Ballot { votes: 0, nearest: f64::INFINITY });
            ballot.votes += 1;
            ballot.nearest = ballot.nearest.min(n.distance);
        }

        // BTreeMap iterates by ascending code, so max_by keeps the last maximum;
        // compare codes reversed so the lower code wins a full tie
        ballots
            .iter()
            .max_by(|(code_a, a), (code_b, b)| {
                a.votes
                    .cmp(&b.votes)
                    .then(b.nearest.total_cmp(&a.nearest))
                    .then(code_b.cmp(code_a))
            })
            .map(|(code, _)| *code)
            .ok_or(PredictionFailure::NoNeighbors)
    }

    fn check_query(&self, query: &[f64]) -> Result<(), PredictionFailure> {
        if query.len() != self.n_features() {
            return Err(PredictionFailure::DimensionMismatch {
                expected: self.n_features(),
                actual: query.len(),
            });
        }

        if let Some((index, &value)) = query.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(PredictionFailure::NonFiniteFeature { index, value });
        }

        Ok(())
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

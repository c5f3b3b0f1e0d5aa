//! Recommendation pipeline: query → scale → predict → catalog lookup.

use crate::encoder::LabelEncoder;
use crate::error::{FitError, PredictionFailure};
use crate::knn::{KNeighborsClassifier, Neighbor};
use crate::scaler::StandardScaler;
use cropadvisor_core::models::{
    Catalog, CatalogRecord, ClampedField, QueryInput, QueryPoint,
};
use serde::Serialize;
use std::collections::HashSet;

/// Catalog plus everything fitted on it, built once and shared by reference
#[derive(Debug, Clone)]
pub struct RecommenderContext {
    catalog: Catalog,
    encoder: LabelEncoder,
    scaler: StandardScaler,
    classifier: KNeighborsClassifier,
}

impl RecommenderContext {
    /// Fit the encoder, scaler and classifier over a catalog
    pub fn new(catalog: Catalog) -> Result<Self, FitError> {
        let encoder = LabelEncoder::fit(catalog.crops())?;
        // every crop was seen by the encoder fit
        let labels = encoder
            .transform_all(catalog.crops())
            .ok_or(FitError::EmptyTrainingSet)?;

        let rows: Vec<Vec<f64>> = catalog.feature_rows().iter().map(|r| r.to_vec()).collect();
        let scaler = StandardScaler::fit(&rows)?;
        let scaled = rows.iter().map(|row| scaler.apply(row)).collect();
        let classifier = KNeighborsClassifier::fit(scaled, labels)?;

        tracing::info!(
            "Recommender ready: {} districts, {} crops",
            catalog.len(),
            encoder.len()
        );

        Ok(Self { catalog, encoder, scaler, classifier })
    }

    /// Context over the built-in ten-district catalog
    ///
    /// # Panics
    ///
    /// Never in practice: the built-in catalog is a valid training set, which
    /// `test_builtin_context` checks.
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin()).expect("built-in catalog is a valid training set")
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &KNeighborsClassifier {
        &self.classifier
    }

    /// Resolve a form submission to a query point
    pub fn resolve(
        &self,
        input: &QueryInput,
    ) -> Result<(QueryPoint, Option<String>, Vec<ClampedField>), PredictionFailure> {
        match input {
            QueryInput::District(name) => {
                let record = self.catalog.find_district(name).ok_or_else(|| {
                    PredictionFailure::UnknownDistrict { name: name.clone() }
                })?;
                Ok((record.query_point(), Some(record.district.clone()), Vec::new()))
            }
            QueryInput::Manual(manual) => {
                let (point, clamped) = manual.clamp();
                Ok((point, None, clamped))
            }
        }
    }

    /// Nearest catalog rows for a query point, closest first
    pub fn neighbors(&self, point: &QueryPoint) -> Result<Vec<Neighbor>, PredictionFailure> {
        let scaled = self.scaler.transform_row(&point.to_features())?;
        self.classifier.neighbors(&scaled)
    }

    /// Recommend a crop for a form submission
    pub fn recommend(&self, input: &QueryInput) -> Result<Recommendation, PredictionFailure> {
        let (point, district, clamped) = self.resolve(input)?;
        let mut recommendation = self.recommend_point(&point)?;
        recommendation.district = district;
        recommendation.clamped = clamped;
        Ok(recommendation)
    }

    /// Recommend a crop for a query point
    pub fn recommend_point(&self, point: &QueryPoint) -> Result<Recommendation, PredictionFailure> {
        let scaled = self.scaler.transform_row(&point.to_features())?;
        tracing::debug!("Scaled query {:?} -> {:?}", point, scaled);

        let neighbors = self.classifier.neighbors(&scaled)?;
        let code = self.classifier.vote(&neighbors)?;
        let best_crop = self
            .encoder
            .inverse_transform(code)
            .ok_or(PredictionFailure::UnknownLabel { code })?;

        let best_row = self.catalog.first_with_crop(best_crop).ok_or_else(|| {
            PredictionFailure::CropNotInCatalog { crop: best_crop.to_string() }
        })?;

        let neighbor_rows = neighbors
            .iter()
            .map(|n| {
                self.catalog
                    .get(n.index)
                    .map(|row| (row, n.distance))
                    .ok_or(PredictionFailure::NeighborOutOfRange { index: n.index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let alternatives = alternatives(neighbor_rows.iter().map(|(row, _)| *row), best_crop);

        let neighbors = neighbor_rows
            .iter()
            .zip(&neighbors)
            .map(|((row, distance), n)| NeighborDistrict::new(n.index, row, *distance))
            .collect();

        tracing::info!("Recommended {} for {:?}", best_crop, point);

        Ok(Recommendation {
            query: *point,
            district: None,
            clamped: Vec::new(),
            best: CropSummary::from(best_row),
            alternatives,
            neighbors,
        })
    }
}

/// Neighbor rows minus the best crop, one entry per crop, in neighbor order
fn alternatives<'a, I>(rows: I, best_crop: &str) -> Vec<CropSummary>
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| row.crop != best_crop)
        .filter(|row| seen.insert(row.crop.clone()))
        .map(CropSummary::from)
        .collect()
}

/// One submission handled end to end
pub fn recommend(
    context: &RecommenderContext,
    input: &QueryInput,
) -> Result<Recommendation, PredictionFailure> {
    context.recommend(input)
}

/// Crop with the historical figures shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropSummary {
    pub crop: String,
    pub yield_per_ha: f64,
    pub profit_per_ha: i64,
    pub success_rate_pct: f64,
}

impl From<&CatalogRecord> for CropSummary {
    fn from(row: &CatalogRecord) -> Self {
        Self {
            crop: row.crop.clone(),
            yield_per_ha: row.yield_per_ha,
            profit_per_ha: row.profit_per_ha,
            success_rate_pct: row.success_rate_pct,
        }
    }
}

/// A catalog district among the nearest neighbors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborDistrict {
    pub index: usize,
    pub district: String,
    pub crop: String,
    pub yield_per_ha: f64,
    pub profit_per_ha: i64,
    pub distance: f64,
}

impl NeighborDistrict {
    fn new(index: usize, row: &CatalogRecord, distance: f64) -> Self {
        Self {
            index,
            district: row.district.clone(),
            crop: row.crop.clone(),
            yield_per_ha: row.yield_per_ha,
            profit_per_ha: row.profit_per_ha,
            distance,
        }
    }
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Query point the classifier saw (after clamping)
    pub query: QueryPoint,

    /// District the query was copied from, in district mode
    pub district: Option<String>,

    /// Manual fields that were moved into bounds
    pub clamped: Vec<ClampedField>,

    pub best: CropSummary,

    /// Other crops among the neighbors, deduplicated
    pub alternatives: Vec<CropSummary>,

    /// All nearest districts, closest first
    pub neighbors: Vec<NeighborDistrict>,
}

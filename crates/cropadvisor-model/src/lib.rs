//! Crop Advisor Model - label encoding, feature scaling, and the k-nearest-neighbor
//! recommender built on top of the district catalog.

pub mod encoder;
pub mod error;
pub mod knn;
pub mod recommend;
pub mod scaler;

pub use encoder::LabelEncoder;
pub use error::{FitError, PredictionFailure};
pub use knn::{KNeighborsClassifier, Neighbor, NEIGHBOR_COUNT};
pub use recommend::{
    recommend, CropSummary, NeighborDistrict, Recommendation, RecommenderContext,
};
pub use scaler::StandardScaler;

pub mod catalog;
pub mod query;

pub use catalog::{Catalog, CatalogRecord};
pub use query::{
    ClampedField, Feature, InputBounds, InputMode, ManualInput, QueryInput, QueryPoint,
    FEATURE_COUNT,
};

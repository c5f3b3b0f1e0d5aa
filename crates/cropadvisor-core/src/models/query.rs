use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of numeric features the classifier works on
pub const FEATURE_COUNT: usize = 3;

/// Numeric input features, in model order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Rainfall,
    Temperature,
    SoilPh,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] =
        [Feature::Rainfall, Feature::Temperature, Feature::SoilPh];

    /// Position of the feature in a feature vector
    pub fn index(self) -> usize {
        match self {
            Feature::Rainfall => 0,
            Feature::Temperature => 1,
            Feature::SoilPh => 2,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Feature::Rainfall => "mm",
            Feature::Temperature => "°C",
            Feature::SoilPh => "pH",
        }
    }

    /// Accepted range for manual entry
    pub fn bounds(self) -> InputBounds {
        match self {
            Feature::Rainfall => InputBounds::RAINFALL_MM,
            Feature::Temperature => InputBounds::TEMPERATURE_C,
            Feature::SoilPh => InputBounds::SOIL_PH,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Rainfall => "rainfall",
            Feature::Temperature => "temperature",
            Feature::SoilPh => "soil pH",
        };
        f.write_str(name)
    }
}

/// Inclusive range for a manual input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
}

impl InputBounds {
    pub const RAINFALL_MM: InputBounds = InputBounds { min: 0.0, max: 10_000.0 };
    pub const TEMPERATURE_C: InputBounds = InputBounds { min: -10.0, max: 60.0 };
    pub const SOIL_PH: InputBounds = InputBounds { min: 0.0, max: 14.0 };

    /// Clamp a value into the range. NaN passes through unchanged.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// One point in feature space submitted for a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryPoint {
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub soil_ph: f64,
}

impl QueryPoint {
    pub fn new(rainfall_mm: f64, temperature_c: f64, soil_ph: f64) -> Self {
        Self { rainfall_mm, temperature_c, soil_ph }
    }

    pub fn to_features(&self) -> [f64; FEATURE_COUNT] {
        [self.rainfall_mm, self.temperature_c, self.soil_ph]
    }
}

/// A manual field whose requested value was moved into its bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClampedField {
    pub feature: Feature,
    pub requested: f64,
    pub applied: f64,
}

/// Values typed into the manual-entry fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualInput {
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub soil_ph: f64,
}

impl Default for ManualInput {
    fn default() -> Self {
        Self { rainfall_mm: 1000.0, temperature_c: 25.0, soil_ph: 6.5 }
    }
}

impl ManualInput {
    pub fn new(rainfall_mm: f64, temperature_c: f64, soil_ph: f64) -> Self {
        Self { rainfall_mm, temperature_c, soil_ph }
    }

    /// Clamp every field into its bounds, reporting the fields that moved
    pub fn clamp(&self) -> (QueryPoint, Vec<ClampedField>) {
        let requested = [self.rainfall_mm, self.temperature_c, self.soil_ph];
        let mut applied = requested;
        let mut clamped = Vec::new();

        for feature in Feature::ALL {
            let i = feature.index();
            applied[i] = feature.bounds().clamp(requested[i]);
            if applied[i] != requested[i] && !requested[i].is_nan() {
                tracing::debug!(
                    "{} {} {} is out of range, using {}",
                    feature,
                    requested[i],
                    feature.unit(),
                    applied[i]
                );
                clamped.push(ClampedField {
                    feature,
                    requested: requested[i],
                    applied: applied[i],
                });
            }
        }

        (QueryPoint::new(applied[0], applied[1], applied[2]), clamped)
    }

    /// Clamped query point, discarding the clamp report
    pub fn to_query_point(&self) -> QueryPoint {
        self.clamp().0
    }
}

/// Input mode offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    District,
    Manual,
}

impl InputMode {
    pub const ALL: [InputMode; 2] = [InputMode::District, InputMode::Manual];

    pub fn label(self) -> &'static str {
        match self {
            InputMode::District => "📍 Select District",
            InputMode::Manual => "✍️ Manual Input",
        }
    }
}

/// What the user submitted: a district choice or manual values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryInput {
    District(String),
    Manual(ManualInput),
}

impl QueryInput {
    pub fn mode(&self) -> InputMode {
        match self {
            QueryInput::District(_) => InputMode::District,
            QueryInput::Manual(_) => InputMode::Manual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_manual_defaults() {
        let input = ManualInput::default();
        assert_eq!(input.to_query_point(), QueryPoint::new(1000.0, 25.0, 6.5));
    }

    #[test]
    fn test_negative_rainfall_clamped_to_zero() {
        let (point, clamped) = ManualInput::new(-5.0, 25.0, 6.5).clamp();
        assert_eq!(point.rainfall_mm, 0.0);
        assert_eq!(clamped.len(), 1);
        assert_eq!(clamped[0].feature, Feature::Rainfall);
        assert_eq!(clamped[0].requested, -5.0);
    }

    #[test]
    fn test_in_range_values_untouched() {
        let (point, clamped) = ManualInput::new(880.0, 25.0, 6.7).clamp();
        assert_eq!(point, QueryPoint::new(880.0, 25.0, 6.7));
        assert!(clamped.is_empty());
    }

    #[test]
    fn test_upper_bounds() {
        let (point, clamped) = ManualInput::new(20_000.0, 75.0, 15.0).clamp();
        assert_eq!(point, QueryPoint::new(10_000.0, 60.0, 14.0));
        assert_eq!(clamped.len(), 3);
    }

    #[test]
    fn test_nan_passes_through() {
        let (point, clamped) = ManualInput::new(f64::NAN, 25.0, 6.5).clamp();
        assert!(point.rainfall_mm.is_nan());
        assert!(clamped.is_empty());
    }

    proptest! {
        #[test]
        fn prop_clamped_point_within_bounds(
            r in -1.0e6f64..1.0e6,
            t in -1.0e3f64..1.0e3,
            p in -100.0f64..100.0,
        ) {
            let values = ManualInput::new(r, t, p).to_query_point().to_features();
            for feature in Feature::ALL {
                prop_assert!(feature.bounds().contains(values[feature.index()]));
            }
        }
    }
}

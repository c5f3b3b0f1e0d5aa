use serde::{Deserialize, Serialize};

use super::query::{QueryPoint, FEATURE_COUNT};

/// One district row: growing conditions plus the crop grown there and its history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// District name (unique within a catalog)
    pub district: String,

    /// Average annual rainfall in millimetres
    pub rainfall_mm: f64,

    /// Average temperature in degrees Celsius
    pub temperature_c: f64,

    /// Soil pH
    pub soil_ph: f64,

    /// Crop grown in the district
    pub crop: String,

    /// Historical yield, quintals per hectare
    pub yield_per_ha: f64,

    /// Historical profit, whole rupees per hectare
    pub profit_per_ha: i64,

    /// Share of similar regions where the crop succeeded, in percent
    pub success_rate_pct: f64,
}

impl CatalogRecord {
    /// Growing conditions of this row as a query point
    pub fn query_point(&self) -> QueryPoint {
        QueryPoint::new(self.rainfall_mm, self.temperature_c, self.soil_ph)
    }

    /// The three numeric features in model order
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        self.query_point().to_features()
    }
}

// district, rainfall, temperature, pH, crop, yield, profit, success rate
const BUILTIN_ROWS: [(&str, f64, f64, f64, &str, f64, i64, f64); 10] = [
    ("Ludhiana", 880.0, 25.0, 6.7, "Wheat", 42.0, 45_000, 78.0),
    ("Amritsar", 900.0, 24.0, 6.8, "Wheat", 44.0, 46_000, 82.0),
    ("Patiala", 870.0, 26.0, 6.5, "Rice", 39.0, 41_000, 75.0),
    ("Karnal", 850.0, 27.0, 6.9, "Rice", 38.0, 40_000, 73.0),
    ("Nagpur", 1100.0, 30.0, 6.2, "Cotton", 25.0, 35_000, 65.0),
    ("Mumbai", 2400.0, 32.0, 5.8, "Sugarcane", 80.0, 90_000, 90.0),
    ("Hyderabad", 950.0, 28.0, 6.4, "Maize", 32.0, 30_000, 70.0),
    ("Bengaluru", 970.0, 23.0, 6.6, "Millets", 28.0, 27_000, 68.0),
    ("Chennai", 1200.0, 29.0, 6.3, "Pulses", 22.0, 20_000, 60.0),
    ("Kolkata", 1600.0, 26.0, 6.5, "Jute", 30.0, 32_000, 72.0),
];

/// Read-only district catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// The fixed ten-district catalog the advisor ships with
    pub fn builtin() -> Self {
        let records = BUILTIN_ROWS
            .iter()
            .map(|row| CatalogRecord {
                district: row.0.to_string(),
                rainfall_mm: row.1,
                temperature_c: row.2,
                soil_ph: row.3,
                crop: row.4.to_string(),
                yield_per_ha: row.5,
                profit_per_ha: row.6,
                success_rate_pct: row.7,
            })
            .collect();

        Self { records }
    }

    /// Build a catalog from arbitrary rows
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogRecord> {
        self.records.get(index)
    }

    /// District names in catalog order (the selector's options)
    pub fn districts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.district.as_str())
    }

    /// Find a district by name, ignoring ASCII case and surrounding whitespace
    pub fn find_district(&self, name: &str) -> Option<&CatalogRecord> {
        let name = name.trim();
        self.records.iter().find(|r| r.district.eq_ignore_ascii_case(name))
    }

    /// First row growing the given crop
    pub fn first_with_crop(&self, crop: &str) -> Option<&CatalogRecord> {
        self.records.iter().find(|r| r.crop == crop)
    }

    /// Crop column in catalog order
    pub fn crops(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.crop.as_str())
    }

    /// Feature matrix, one row per record
    pub fn feature_rows(&self) -> Vec<[f64; FEATURE_COUNT]> {
        self.records.iter().map(CatalogRecord::features).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

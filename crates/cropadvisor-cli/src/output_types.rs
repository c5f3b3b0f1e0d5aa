use cropadvisor_core::models::CatalogRecord;
use cropadvisor_model::Recommendation;
use serde::Serialize;
use tabled::Tabled;

use crate::render::format_thousands;

/// Output for advise command
#[derive(Debug, Serialize)]
pub struct RecommendationOutput<'a> {
    #[serde(flatten)]
    pub recommendation: &'a Recommendation,
    pub currency_symbol: &'a str,
}

/// Row of the districts command
#[derive(Debug, Serialize, Tabled)]
pub struct DistrictRow {
    #[tabled(rename = "District")]
    pub district: String,
    #[tabled(rename = "Rainfall (mm)")]
    pub rainfall_mm: f64,
    #[tabled(rename = "Temp (°C)")]
    pub temperature_c: f64,
    #[tabled(rename = "Soil pH")]
    pub soil_ph: f64,
    #[tabled(rename = "Crop")]
    pub crop: String,
    #[tabled(rename = "Yield (q/ha)")]
    pub yield_per_ha: f64,
    #[tabled(rename = "Profit/ha", display_with = "display_profit")]
    pub profit_per_ha: i64,
    #[tabled(rename = "Success (%)")]
    pub success_rate_pct: f64,
}

fn display_profit(profit: &i64) -> String {
    format_thousands(*profit)
}

impl From<&CatalogRecord> for DistrictRow {
    fn from(row: &CatalogRecord) -> Self {
        Self {
            district: row.district.clone(),
            rainfall_mm: row.rainfall_mm,
            temperature_c: row.temperature_c,
            soil_ph: row.soil_ph,
            crop: row.crop.clone(),
            yield_per_ha: row.yield_per_ha,
            profit_per_ha: row.profit_per_ha,
            success_rate_pct: row.success_rate_pct,
        }
    }
}

/// Row of the config command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

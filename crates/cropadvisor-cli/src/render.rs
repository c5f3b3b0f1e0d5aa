//! Text rendering of recommendations.

use crate::output::OutputWriter;
use crate::output_types::RecommendationOutput;
use cropadvisor_core::models::ClampedField;
use cropadvisor_model::{PredictionFailure, Recommendation};

pub const NO_ALTERNATIVES: &str = "No alternative crops found among the closest neighbors.";

/// Whole number with comma thousands separators, e.g. `45000` -> `45,000`
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn best_crop_lines(rec: &Recommendation, currency: &str) -> Vec<String> {
    vec![
        format!("🌾 {}", rec.best.crop),
        format!("  - Expected Yield: {} q/ha", rec.best.yield_per_ha),
        format!(
            "  - Expected Profit: {}{} per hectare",
            currency,
            format_thousands(rec.best.profit_per_ha)
        ),
        format!("  - Success Rate: {}% in similar regions", rec.best.success_rate_pct),
    ]
}

pub fn alternative_lines(rec: &Recommendation, currency: &str) -> Vec<String> {
    rec.alternatives
        .iter()
        .enumerate()
        .map(|(i, alt)| {
            format!(
                "{}. {} – Yield: {} q/ha, Profit: {}{}/ha",
                i + 1,
                alt.crop,
                alt.yield_per_ha,
                currency,
                format_thousands(alt.profit_per_ha)
            )
        })
        .collect()
}

pub fn neighbor_lines(rec: &Recommendation, currency: &str) -> Vec<String> {
    rec.neighbors
        .iter()
        .map(|n| {
            format!(
                "- {} → {} ({} q/ha, {}{})",
                n.district,
                n.crop,
                n.yield_per_ha,
                currency,
                format_thousands(n.profit_per_ha)
            )
        })
        .collect()
}

pub fn clamp_warning(field: &ClampedField) -> String {
    let bounds = field.feature.bounds();
    format!(
        "{} {} is outside {}..={} {}, using {}",
        field.feature,
        field.requested,
        bounds.min,
        bounds.max,
        field.feature.unit(),
        field.applied
    )
}

pub fn failure_line(failure: &PredictionFailure) -> String {
    format!("Could not compute recommendation: {}", failure)
}

/// Print a recommendation the way the form shows it
pub fn render_recommendation(
    output: &OutputWriter,
    rec: &Recommendation,
    currency: &str,
) -> anyhow::Result<()> {
    for field in &rec.clamped {
        output.warning(clamp_warning(field));
    }

    if output.is_json() {
        return output.result(RecommendationOutput {
            recommendation: rec,
            currency_symbol: currency,
        });
    }

    if let Some(ref district) = rec.district {
        output.kv("District", district);
    }
    output.kv(
        "Conditions",
        format!(
            "{} mm rainfall, {} °C, soil pH {}",
            rec.query.rainfall_mm, rec.query.temperature_c, rec.query.soil_ph
        ),
    );

    println!();
    output.success("Best Crop for Your Farm:");
    for line in best_crop_lines(rec, currency) {
        output.line(line);
    }

    output.section("🌱 Alternative Options");
    let alternatives = alternative_lines(rec, currency);
    if alternatives.is_empty() {
        output.info(NO_ALTERNATIVES);
    } else {
        for line in alternatives {
            output.info(line);
        }
    }

    output.section("📊 Neighbor Districts Considered");
    for line in neighbor_lines(rec, currency) {
        output.line(line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropadvisor_core::models::{ManualInput, QueryInput};
    use cropadvisor_model::RecommenderContext;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(45_000), "45,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-20_000), "-20,000");
    }

    #[test]
    fn test_ludhiana_summary() {
        let ctx = RecommenderContext::builtin();
        let rec = ctx.recommend(&QueryInput::District("Ludhiana".into())).unwrap();

        assert_eq!(
            best_crop_lines(&rec, "₹"),
            vec![
                "🌾 Wheat",
                "  - Expected Yield: 42 q/ha",
                "  - Expected Profit: ₹45,000 per hectare",
                "  - Success Rate: 78% in similar regions",
            ]
        );
        assert_eq!(
            alternative_lines(&rec, "₹"),
            vec!["1. Rice – Yield: 39 q/ha, Profit: ₹41,000/ha"]
        );
        assert_eq!(
            neighbor_lines(&rec, "₹"),
            vec![
                "- Ludhiana → Wheat (42 q/ha, ₹45,000)",
                "- Amritsar → Wheat (44 q/ha, ₹46,000)",
                "- Patiala → Rice (39 q/ha, ₹41,000)",
            ]
        );
    }

    #[test]
    fn test_clamp_warning_text() {
        let ctx = RecommenderContext::builtin();
        let rec = ctx
            .recommend(&QueryInput::Manual(ManualInput::new(-5.0, 25.0, 6.5)))
            .unwrap();
        assert_eq!(clamp_warning(&rec.clamped[0]), "rainfall -5 is outside 0..=10000 mm, using 0");
    }

    #[test]
    fn test_failure_line() {
        let failure = PredictionFailure::UnknownDistrict { name: "Atlantis".into() };
        assert_eq!(
            failure_line(&failure),
            "Could not compute recommendation: District 'Atlantis' is not in the catalog"
        );
    }
}

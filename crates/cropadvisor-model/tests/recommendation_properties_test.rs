//! Property tests for the recommender over the built-in catalog
//!
//! These tests verify that:
//! - every district recommends its own crop, by selection and by manual entry
//! - the neighbor list is always three distinct rows, closest first
//! - alternatives never repeat a crop or contain the recommended one

use cropadvisor_core::models::{ManualInput, QueryInput, QueryPoint};
use cropadvisor_model::{recommend, RecommenderContext, NEIGHBOR_COUNT};
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn test_every_district_recommends_its_own_crop() {
    let ctx = RecommenderContext::builtin();

    for record in ctx.catalog().records() {
        let rec = recommend(&ctx, &QueryInput::District(record.district.clone())).unwrap();
        assert_eq!(rec.best.crop, record.crop, "district {}", record.district);
        assert_eq!(rec.neighbors[0].district, record.district);
        assert_eq!(rec.neighbors[0].distance, 0.0);
    }
}

#[test]
fn test_manual_entry_matches_district_selection() {
    let ctx = RecommenderContext::builtin();

    for record in ctx.catalog().records() {
        let by_district = ctx.recommend(&QueryInput::District(record.district.clone())).unwrap();
        let manual = ManualInput::new(record.rainfall_mm, record.temperature_c, record.soil_ph);
        let by_manual = ctx.recommend(&QueryInput::Manual(manual)).unwrap();

        assert_eq!(by_manual.best, by_district.best);
        assert_eq!(by_manual.alternatives, by_district.alternatives);
        assert_eq!(by_manual.neighbors, by_district.neighbors);
    }
}

#[test]
fn test_karnal_is_rice_despite_two_wheat_neighbors() {
    let ctx = RecommenderContext::builtin();
    let rec = ctx.recommend(&QueryInput::District("Karnal".into())).unwrap();

    assert_eq!(rec.best.crop, "Rice");
    let crops: Vec<&str> = rec.neighbors.iter().map(|n| n.crop.as_str()).collect();
    assert_eq!(crops, ["Rice", "Wheat", "Wheat"]);
    assert_eq!(rec.alternatives.len(), 1);
    assert_eq!(rec.alternatives[0].crop, "Wheat");
    // first Wheat row among the neighbors is Ludhiana
    assert_eq!(rec.alternatives[0].profit_per_ha, 45_000);
}

#[test]
fn test_two_wheat_neighbors_outvote_nearer_rice() {
    let ctx = RecommenderContext::builtin();
    let rec = ctx.recommend(&QueryInput::Manual(ManualInput::new(855.0, 26.5, 6.85))).unwrap();

    let names: Vec<&str> = rec.neighbors.iter().map(|n| n.district.as_str()).collect();
    assert_eq!(names, ["Karnal", "Ludhiana", "Amritsar"]);
    assert_eq!(rec.best.crop, "Wheat");
    assert_eq!(rec.alternatives.len(), 1);
    assert_eq!(rec.alternatives[0].crop, "Rice");
    // alternative figures come from the neighbor row itself
    assert_eq!(rec.alternatives[0].yield_per_ha, 38.0);
}

#[test]
fn test_mumbai_values() {
    let ctx = RecommenderContext::builtin();
    let rec = ctx.recommend_point(&QueryPoint::new(2400.0, 32.0, 5.8)).unwrap();

    assert_eq!(rec.best.crop, "Sugarcane");
    assert_eq!(rec.best.yield_per_ha, 80.0);
    assert_eq!(rec.best.profit_per_ha, 90_000);
    assert_eq!(rec.best.success_rate_pct, 90.0);
}

#[test]
fn test_negative_rainfall_reaches_classifier_as_zero() {
    let ctx = RecommenderContext::builtin();
    let clamped = ctx.recommend(&QueryInput::Manual(ManualInput::new(-5.0, 25.0, 6.5))).unwrap();
    let zero = ctx.recommend_point(&QueryPoint::new(0.0, 25.0, 6.5)).unwrap();

    assert_eq!(clamped.query.rainfall_mm, 0.0);
    assert_eq!(clamped.neighbors, zero.neighbors);
    assert_eq!(clamped.best, zero.best);
}

proptest! {
    #[test]
    fn prop_three_distinct_neighbors_in_distance_order(
        rainfall in 0.0f64..=10_000.0,
        temperature in -10.0f64..=60.0,
        soil_ph in 0.0f64..=14.0,
    ) {
        let ctx = RecommenderContext::builtin();
        let neighbors = ctx.neighbors(&QueryPoint::new(rainfall, temperature, soil_ph)).unwrap();

        prop_assert_eq!(neighbors.len(), NEIGHBOR_COUNT);
        let indices: HashSet<usize> = neighbors.iter().map(|n| n.index).collect();
        prop_assert_eq!(indices.len(), NEIGHBOR_COUNT);
        for pair in neighbors.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
        }
        for n in &neighbors {
            prop_assert!(n.index < ctx.catalog().len());
        }
    }

    #[test]
    fn prop_alternatives_exclude_best_and_are_unique(
        rainfall in -100.0f64..=12_000.0,
        temperature in -20.0f64..=70.0,
        soil_ph in -1.0f64..=15.0,
    ) {
        let ctx = RecommenderContext::builtin();
        let input = QueryInput::Manual(ManualInput::new(rainfall, temperature, soil_ph));
        let rec = ctx.recommend(&input).unwrap();

        let mut seen = HashSet::new();
        for alt in &rec.alternatives {
            prop_assert_ne!(&alt.crop, &rec.best.crop);
            prop_assert!(seen.insert(alt.crop.clone()));
        }
        prop_assert_eq!(rec.neighbors.len(), NEIGHBOR_COUNT);
        prop_assert!(rec.alternatives.len() < NEIGHBOR_COUNT);
    }
}

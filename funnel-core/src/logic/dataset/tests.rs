use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tempfile::tempdir;

use super::export::{self, ExportFormat};
use super::generator::{assign_conversions, generate_dataset, generate_with, sample_features};
use super::label::LabelCoefficients;
use super::record::SessionRecord;

#[test]
fn test_same_seed_same_dataset() {
    let a = generate_dataset(500, 42).unwrap();
    let b = generate_dataset(500, 42).unwrap();

    assert_eq!(a.records, b.records);
    assert_eq!(a.seed, 42);
}

#[test]
fn test_different_seed_different_dataset() {
    let a = generate_dataset(200, 1).unwrap();
    let b = generate_dataset(200, 2).unwrap();

    assert_ne!(a.records, b.records);
}

#[test]
fn test_empty_dataset() {
    let data = generate_dataset(0, 42).unwrap();

    assert!(data.is_empty());
    assert_eq!(data.conversion_rate(), 0.0);
    assert!(data.head(1000).is_empty());
}

#[test]
fn test_column_bounds() {
    let data = generate_dataset(5_000, 42).unwrap();

    for r in &data.records {
        assert!((1.0..=30.0).contains(&r.time_spent));
        assert!((0.0..=1.0).contains(&r.bounce_rate));
        assert!((1..=20).contains(&r.interactions));
        assert!((1..=10).contains(&r.visits));
        assert!((0.0..=1.0).contains(&r.cart_abandonment_rate));
        assert!((0.0..=10.0).contains(&r.loyalty_score));
        assert!((0.0..1.0).contains(&r.noise_feature_1));
        assert!(r.noise_feature_2 < 100);
        assert!(r.conversion <= 1);
    }
}

/// Labels are exactly `uniform < p(row)` when the uniform stream is replayed
#[test]
fn test_labels_follow_closed_form_probability() {
    let coef = LabelCoefficients::service();
    let mut rng = StdRng::seed_from_u64(7);

    let mut records = sample_features(&mut rng, 2_000).unwrap();
    let mut replay = rng.clone();
    assign_conversions(&mut rng, &mut records, &coef);

    for record in &records {
        let draw: f64 = replay.gen();
        let expected = u8::from(draw < coef.conversion_probability(record));
        assert_eq!(record.conversion, expected);
    }

    // generate_with runs the same sequence
    let generated = generate_with(2_000, 7, &coef).unwrap();
    assert_eq!(generated.records, records);
}

/// Empirical conversion rate tracks the mean closed-form probability
#[test]
fn test_conversion_rate_matches_mean_probability() {
    let coef = LabelCoefficients::service();
    let data = generate_dataset(20_000, 42).unwrap();

    let mean_p = data.records.iter()
        .map(|r| coef.conversion_probability(r))
        .sum::<f64>() / data.len() as f64;

    assert!((data.conversion_rate() - mean_p).abs() < 0.02);
}

#[test]
fn test_categorical_frequencies_near_weights() {
    let data = generate_dataset(20_000, 42).unwrap();
    let organic = data.records.iter().filter(|r| r.is_organic()).count() as f64;
    let purchase = data.records.iter().filter(|r| r.has_purchase_history()).count() as f64;

    assert!((organic / 20_000.0 - 0.4).abs() < 0.02);
    assert!((purchase / 20_000.0 - 0.3).abs() < 0.02);
}

#[test]
fn test_head_is_prefix() {
    let data = generate_dataset(50, 42).unwrap();

    assert_eq!(data.head(10), &data.records[..10]);
    assert_eq!(data.head(1000).len(), 50);
}

#[test]
fn test_csv_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("funnel.csv");
    let data = generate_dataset(25, 42).unwrap();

    let written = export::to_file(&data.records, &path, ExportFormat::Csv).unwrap();
    assert_eq!(written, 25);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 26);
    assert!(lines[0].starts_with("Traffic_Source,Time_Spent_on_Funnel_Stages"));
    assert!(lines[0].ends_with(",Conversion"));
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), 14);
    }
}

#[test]
fn test_jsonl_export_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("funnel.jsonl");
    let data = generate_dataset(10, 42).unwrap();

    assert_eq!(ExportFormat::from_path(&path), ExportFormat::Jsonl);
    export::to_file(&data.records, &path, ExportFormat::Jsonl).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let parsed: Vec<SessionRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(parsed.len(), data.len());
    for (read, original) in parsed.iter().zip(&data.records) {
        assert_eq!(read.traffic_source, original.traffic_source);
        assert_eq!(read.interactions, original.interactions);
        assert_eq!(read.conversion, original.conversion);
        assert!((read.loyalty_score - original.loyalty_score).abs() < 1e-9);
    }
}

//! Dataset Generator - seeded synthesis of funnel sessions
//!
//! Columns are drawn one after another over all rows, then the conversion
//! label is drawn last from the label model. Same seed, same dataset.

use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Normal, Poisson};

use crate::error::{CoreError, CoreResult};
use super::label::LabelCoefficients;
use super::record::{
    Categorical, DeviceType, DiscountUsage, PurchaseHistory, SessionRecord, TimeOfDay,
    TrafficSource,
};
use super::Dataset;

/// Generate `num_rows` sessions labelled with the service coefficients
pub fn generate_dataset(num_rows: usize, seed: u64) -> CoreResult<Dataset> {
    generate_with(num_rows, seed, &LabelCoefficients::service())
}

/// Generate `num_rows` sessions labelled with the given coefficients
pub fn generate_with(
    num_rows: usize,
    seed: u64,
    coefficients: &LabelCoefficients,
) -> CoreResult<Dataset> {
    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut records = sample_features(&mut rng, num_rows)?;
    assign_conversions(&mut rng, &mut records, coefficients);

    log::debug!(
        "Generated {} sessions (seed {}) in {} ms",
        num_rows,
        seed,
        start.elapsed().as_millis()
    );

    Ok(Dataset { records, seed })
}

/// Draw every feature column, leaving `conversion` at 0
pub fn sample_features<R: Rng>(rng: &mut R, num_rows: usize) -> CoreResult<Vec<SessionRecord>> {
    let traffic = categorical_column::<TrafficSource, _>(rng, num_rows)?;
    let time_spent = clipped_normal(rng, num_rows, 8.0, 3.0, 1.0, 30.0)?;
    let bounce = clipped_normal(rng, num_rows, 0.4, 0.2, 0.0, 1.0)?;
    let interactions = poisson_column(rng, num_rows, 5.0, 1.0, 20.0)?;
    let visits: Vec<u32> = clipped_normal(rng, num_rows, 3.0, 2.0, 1.0, 10.0)?
        .into_iter()
        .map(|v| v.trunc() as u32)
        .collect();
    let cart = clipped_normal(rng, num_rows, 0.5, 0.2, 0.0, 1.0)?;
    let purchase = categorical_column::<PurchaseHistory, _>(rng, num_rows)?;
    let device = categorical_column::<DeviceType, _>(rng, num_rows)?;
    let time_of_day = categorical_column::<TimeOfDay, _>(rng, num_rows)?;
    let discount = categorical_column::<DiscountUsage, _>(rng, num_rows)?;
    let loyalty = clipped_normal(rng, num_rows, 5.0, 2.0, 0.0, 10.0)?;

    let unit = Uniform::new(0.0f64, 1.0);
    let noise_1: Vec<f64> = (0..num_rows).map(|_| unit.sample(rng)).collect();
    let noise_2: Vec<u32> = (0..num_rows).map(|_| rng.gen_range(0..100u32)).collect();

    let records = (0..num_rows)
        .map(|i| SessionRecord {
            traffic_source: traffic[i],
            time_spent: time_spent[i],
            bounce_rate: bounce[i],
            interactions: interactions[i],
            visits: visits[i],
            cart_abandonment_rate: cart[i],
            purchase_history: purchase[i],
            device_type: device[i],
            time_of_day: time_of_day[i],
            discount_usage: discount[i],
            loyalty_score: loyalty[i],
            noise_feature_1: noise_1[i],
            noise_feature_2: noise_2[i],
            conversion: 0,
        })
        .collect();

    Ok(records)
}

/// Label each record: converted iff a fresh uniform draw falls below `p`
pub fn assign_conversions<R: Rng>(
    rng: &mut R,
    records: &mut [SessionRecord],
    coefficients: &LabelCoefficients,
) {
    for record in records.iter_mut() {
        let p = coefficients.conversion_probability(record);
        let draw: f64 = rng.gen();
        record.conversion = u8::from(draw < p);
    }
}

// ============================================================================
// COLUMN SAMPLERS
// ============================================================================

fn categorical_column<C: Categorical, R: Rng>(rng: &mut R, n: usize) -> CoreResult<Vec<C>> {
    let index = WeightedIndex::new(C::probabilities())
        .map_err(|e| CoreError::Distribution(format!("{}: {}", C::COLUMN, e)))?;
    let variants = C::variants();

    Ok((0..n).map(|_| variants[index.sample(rng)]).collect())
}

fn clipped_normal<R: Rng>(
    rng: &mut R,
    n: usize,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
) -> CoreResult<Vec<f64>> {
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| CoreError::Distribution(format!("normal({}, {}): {}", mean, std_dev, e)))?;

    Ok((0..n).map(|_| normal.sample(rng).clamp(min, max)).collect())
}

fn poisson_column<R: Rng>(
    rng: &mut R,
    n: usize,
    lambda: f64,
    min: f64,
    max: f64,
) -> CoreResult<Vec<u32>> {
    let poisson = Poisson::new(lambda)
        .map_err(|e| CoreError::Distribution(format!("poisson({}): {}", lambda, e)))?;

    Ok((0..n)
        .map(|_| {
            let count: f64 = poisson.sample(rng);
            count.clamp(min, max) as u32
        })
        .collect())
}

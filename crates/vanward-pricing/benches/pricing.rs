//! Pricing performance benchmarks
//!
//! The calculator sits on every booking-draft request, so it has to stay
//! comfortably inside TARGET_PRICING_LATENCY_MS even for item-heavy jobs.

use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vanward_common::{JobItem, JobType, PricingInput, RateProfileId};
use vanward_pricing::{calculate_price, PricingEngine, PricingOptions, QuoteCache};

fn input_with_items(item_count: u32) -> PricingInput {
    let items = (0..item_count)
        .map(|i| JobItem::new(format!("Item {i}"), 1 + i % 4, 12.5, 0.15))
        .collect();

    PricingInput::new(
        JobType::HouseMove,
        85.0,
        NaiveDate::from_ymd_opt(2025, 8, 16).unwrap(),
        Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap(),
    )
    .with_items(items)
    .with_floors(3, 1)
    .with_services(true, true, false, true)
}

fn bench_calculate_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_price");

    for item_count in [1u32, 10, 50, 200] {
        let input = input_with_items(item_count);
        let options = PricingOptions::new(RateProfileId::Standard, true);

        group.bench_with_input(
            BenchmarkId::new("items", item_count),
            &input,
            |b, input| {
                b.iter(|| calculate_price(black_box(input), black_box(&options)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_quote_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("quote");

    let input = input_with_items(20);

    let cold = PricingEngine::new(PricingOptions::default());
    group.bench_function("uncached", |b| {
        b.iter(|| cold.quote(black_box(&input)).unwrap());
    });

    let warm = PricingEngine::new(PricingOptions::default()).with_cache(QuoteCache::new(128));
    warm.quote(&input).unwrap();
    group.bench_function("cached", |b| {
        b.iter(|| warm.quote(black_box(&input)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_calculate_price, bench_quote_cache);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cronplan::CronExpression;

fn fixed_now() -> jiff::Zoned {
    jiff::civil::Date::new(2024, 2, 6)
        .unwrap()
        .to_datetime(jiff::civil::Time::new(12, 0, 0, 0).unwrap())
        .to_zoned(jiff::tz::TimeZone::UTC)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Parse benchmarks
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("crontab", |b| {
        b.iter(|| CronExpression::parse(black_box("*/15 9-17 * * MON-FRI")).unwrap());
    });

    group.bench_function("scheduler_with_year", |b| {
        b.iter(|| {
            CronExpression::parse(black_box("0 0,30 8-18/2 1,15,L JAN-JUN ? 2024-2030")).unwrap()
        });
    });

    group.bench_function("is_valid", |b| {
        b.iter(|| cronplan::is_valid(black_box("0 15 10 ? * 6L 2002-2005")));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Search benchmarks (next_from)
// ---------------------------------------------------------------------------

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let now = fixed_now();

    let every_minute = CronExpression::parse("* * * * *").unwrap();
    group.bench_function("every_minute", |b| {
        b.iter(|| every_minute.next_from(black_box(&now)).unwrap());
    });

    let weekday_noon = CronExpression::parse("0 0 12 ? * MON-FRI").unwrap();
    group.bench_function("weekday_noon", |b| {
        b.iter(|| weekday_noon.next_from(black_box(&now)).unwrap());
    });

    let last_day = CronExpression::parse("0 0 18 L * ?").unwrap();
    group.bench_function("last_day", |b| {
        b.iter(|| last_day.next_from(black_box(&now)).unwrap());
    });

    let second_walk = CronExpression::parse("59 59 23 31 12 ?").unwrap();
    group.bench_function("second_walk", |b| {
        b.iter(|| second_walk.next_from(black_box(&now)).unwrap());
    });

    // Exhausts the lookahead horizon.
    let impossible = CronExpression::parse("0 0 0 31 2 ?").unwrap();
    group.bench_function("impossible", |b| {
        b.iter(|| impossible.next_from(black_box(&now)));
    });

    group.bench_function("next_n_100", |b| {
        b.iter(|| weekday_noon.next_n_from(black_box(&now), 100));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Describe benchmark
// ---------------------------------------------------------------------------

fn bench_describe(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe");

    let expr = CronExpression::parse("0 30 9 1,15 */3 MON-FRI 2030").unwrap();
    group.bench_function("describe", |b| {
        b.iter(|| black_box(&expr).describe());
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_search, bench_describe);
criterion_main!(benches);

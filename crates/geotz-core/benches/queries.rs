use criterion::{criterion_group, criterion_main, Criterion};
use geotz_core::{CoordinateBounds, DefaultBackend, GeoDb, GeoSearch, Report, Sources};
use std::hint::black_box;

fn sample_db() -> GeoDb<DefaultBackend> {
    let mut report = Report::new();
    let sources = Sources::load_from_dir(GeoDb::default_source_dir(), &mut report)
        .expect("bundled sample sources");
    geotz_core::pipeline::run(&sources, &mut report)
}

fn criterion_benchmark(c: &mut Criterion) {
    let db = sample_db();

    c.bench_function("find_country_by_iso", |b| {
        b.iter(|| db.find_country_by_iso(black_box("jpn")))
    });

    c.bench_function("find_timezone_by_city_name", |b| {
        b.iter(|| db.find_timezone_by_city_name(black_box("sao paulo")))
    });

    c.bench_function("find_locations_by_coordinates", |b| {
        let bounds = CoordinateBounds {
            latitude_from: Some(0.0),
            longitude_from: Some(0.0),
            ..Default::default()
        };
        b.iter(|| db.find_locations_by_coordinates(black_box(&bounds)))
    });

    c.bench_function("find_locations_by_country_name partial", |b| {
        b.iter(|| db.find_locations_by_country_name(black_box("united"), true))
    });

    c.bench_function("pipeline run", |b| {
        let mut report = Report::new();
        let sources = Sources::load_from_dir(GeoDb::default_source_dir(), &mut report)
            .expect("bundled sample sources");
        b.iter(|| {
            let mut report = Report::new();
            let db: GeoDb<DefaultBackend> = geotz_core::pipeline::run(black_box(&sources), &mut report);
            db
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal_macros::dec;
use rowstrength::{
    get_split_500m, BarbellInput, Converter, ErgInput, ErgTime, Exercise, Gender, ReferenceTables,
};

/// Benchmarks for table loading and the two conversion directions

fn bench_table_loading(c: &mut Criterion) {
    c.bench_function("load_bundled_tables", |b| {
        b.iter(|| ReferenceTables::bundled().unwrap());
    });
}

fn bench_erg_to_barbell(c: &mut Criterion) {
    let tables = ReferenceTables::bundled().unwrap();
    let converter = Converter::new(&tables);

    let mut group = c.benchmark_group("Erg to barbell");

    for &(distance, time) in &[(500, "01:30"), (2000, "06:30"), (10000, "38:00")] {
        let input = ErgInput {
            gender: Gender::Male,
            body_weight: dec!(85),
            distance,
            time: ErgTime::parse(time).unwrap(),
        };

        group.bench_with_input(BenchmarkId::new("erg_to_barbell", distance), &input, |b, input| {
            b.iter(|| converter.erg_to_barbell(black_box(input)));
        });
    }

    group.finish();
}

fn bench_barbell_to_erg(c: &mut Criterion) {
    let tables = ReferenceTables::bundled().unwrap();
    let converter = Converter::new(&tables);

    let mut group = c.benchmark_group("Barbell to erg");

    for exercise in Exercise::ALL {
        let input = BarbellInput {
            gender: Gender::Female,
            body_weight: dec!(65),
            exercise,
            bar_weight: dec!(70),
            reps: 5,
        };

        group.bench_with_input(
            BenchmarkId::new("barbell_to_erg", exercise.as_key()),
            &input,
            |b, input| {
                b.iter(|| converter.barbell_to_erg(black_box(input)));
            },
        );
    }

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    c.bench_function("get_split_500m", |b| {
        b.iter(|| get_split_500m(black_box(2000), black_box("06:10.4")));
    });
}

criterion_group!(
    benches,
    bench_table_loading,
    bench_erg_to_barbell,
    bench_barbell_to_erg,
    bench_split
);
criterion_main!(benches);

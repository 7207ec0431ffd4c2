//! Benchmarks for the Ellingham engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ellingham_engine::math::linspace;
use ellingham_engine::prelude::*;

fn benchmark_off_equilibrium(c: &mut Criterion) {
    let db = MaterialDatabase::reference().unwrap();
    let engine = ThermodynamicEngine::new(&db);
    let temps = linspace(300.0, 2400.0, 1000);

    c.bench_function("off_equilibrium_dg_1000", |b| {
        b.iter(|| {
            let curve = engine.off_equilibrium_dg("TiO2", black_box(temps.as_slice()), 2e6, 5e-6);
            black_box(curve);
        })
    });
}

fn benchmark_crossover(c: &mut Criterion) {
    let db = MaterialDatabase::reference().unwrap();
    let engine = ThermodynamicEngine::new(&db);

    c.bench_function("crossover_all_oxides", |b| {
        b.iter(|| {
            for m in db.by_category(Category::Oxide) {
                black_box(engine.crossover_temperature(&m.name, 2e6, 5e-6));
            }
        })
    });
}

fn benchmark_gas_ratios(c: &mut Criterion) {
    let db = MaterialDatabase::reference().unwrap();
    let engine = ThermodynamicEngine::new(&db);
    let temps = linspace(300.0, 2400.0, 1000);
    let dg = engine.off_equilibrium_dg("Fe2O3", temps.as_slice(), 1e6, 1e-5);

    c.bench_function("comprehensive_gas_ratios_1000", |b| {
        b.iter(|| {
            let scales = engine
                .comprehensive_gas_ratios(black_box(temps.as_slice()), dg.as_slice())
                .unwrap();
            black_box(scales);
        })
    });
}

fn benchmark_residence(c: &mut Criterion) {
    let db = MaterialDatabase::reference().unwrap();
    let kinetics = KineticModel::new(&db);
    let request = ResidenceTimeRequest::new("TiO2", 1273.0, 2e6, 5e-6)
        .with_entry_temperature(300.0)
        .with_display_range(800.0, 1800.0, 200);

    c.bench_function("residence_time_analysis_profile", |b| {
        b.iter(|| {
            black_box(kinetics.residence_time_analysis(black_box(&request)));
        })
    });
}

criterion_group!(
    benches,
    benchmark_off_equilibrium,
    benchmark_crossover,
    benchmark_gas_ratios,
    benchmark_residence,
);

criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::hint::black_box;
use sumstats::analysis::{count_alleles, heterozygosity_profile, tajima_d};
use sumstats::prelude::*;

fn create_test_callset(n_variants: usize, n_samples: usize, n_contigs: usize) -> Callset {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    let genotypes = Array3::from_shape_fn((n_variants, n_samples, 2), |_| {
        if rng.random_range(0..100) == 0 {
            -1
        } else {
            rng.random_range(0..2)
        }
    });
    let contigs = (0..n_variants)
        .map(|v| format!("chr{}", v * n_contigs / n_variants + 1))
        .collect();
    let positions = (0..n_variants).map(|v| (v as i64) * 100 + 1).collect();
    let samples = (0..n_samples).map(|s| format!("ind{s}")).collect();

    Callset::new(samples, positions, contigs, genotypes).unwrap()
}

fn bench_count_alleles(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_alleles");

    for &(n_var, n_samp) in &[(1000, 10), (1000, 100), (10000, 100)] {
        let callset = create_test_callset(n_var, n_samp, 1);
        let variants: Vec<usize> = (0..n_var).collect();
        let samples: Vec<usize> = (0..n_samp).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_var}var_{n_samp}samp")),
            &callset,
            |b, callset| {
                b.iter(|| black_box(count_alleles(callset.genotypes(), &variants, &samples)));
            },
        );
    }

    group.finish();
}

fn bench_tajimas_d(c: &mut Criterion) {
    let mut group = c.benchmark_group("tajimas_d");

    for &n_samp in &[10, 100] {
        let callset = create_test_callset(10000, n_samp, 1);
        let variants: Vec<usize> = (0..callset.n_variants()).collect();
        let samples: Vec<usize> = (0..n_samp).collect();
        let counts = count_alleles(callset.genotypes(), &variants, &samples).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_samp}samp")),
            &counts,
            |b, counts| {
                b.iter(|| black_box(tajima_d(counts, 1)));
            },
        );
    }

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_compute_all");
    group.sample_size(10);

    for &(n_var, n_contigs) in &[(10000, 1), (10000, 10)] {
        let callset = create_test_callset(n_var, 50, n_contigs);
        let mut groups = CladeMap::new();
        groups.insert("first".into(), callset.samples()[..25].to_vec());
        groups.insert("second".into(), callset.samples()[25..].to_vec());

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_var}var_{n_contigs}contigs")),
            &(callset, groups),
            |b, (callset, groups)| {
                b.iter(|| {
                    let engine = DiversityEngine::new(callset, AnalysisConfig::default());
                    black_box(engine.compute_all(&Statistic::ALL, Some(groups)))
                });
            },
        );
    }

    group.finish();
}

fn bench_heterozygosity_profile(c: &mut Criterion) {
    let callset = create_test_callset(10000, 50, 1);
    let samples: Vec<usize> = (0..50).collect();

    c.bench_function("heterozygosity_profile_10000var", |b| {
        b.iter(|| black_box(heterozygosity_profile(&callset, &samples, 2)));
    });
}

criterion_group!(
    benches,
    bench_count_alleles,
    bench_tajimas_d,
    bench_engine,
    bench_heterozygosity_profile
);
criterion_main!(benches);

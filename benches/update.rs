use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use life_arcade::{regulate, seeding, Arcade, ArcadeConfig, CellGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;

criterion_group!(frame_budget, update_benchmark, regulator_benchmark, arcade_benchmark);
criterion_main!(frame_budget);

fn update_benchmark(c: &mut Criterion) {
    for &(cols, rows) in &[(16, 16), (60, 24), (128, 128)] {
        let mut grid = CellGrid::with_size(cols, rows).expect("non-empty grid");
        grid.random_seed_with(&mut StdRng::seed_from_u64(1), 0.3);
        c.bench_function(&format!("update_{}x{}", cols, rows), |b| {
            b.iter(|| {
                grid.update();
                black_box(grid.generation())
            })
        });
    }
}

fn regulator_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    c.bench_function("life_force_16x16", |b| {
        b.iter_batched(
            || CellGrid::with_size(16, 16).expect("non-empty grid"),
            |mut grid| regulate::apply_life_force_with(&mut rng, Some(&mut grid), Default::default()),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("maintain_density_6x3", |b| {
        b.iter_batched(
            || CellGrid::with_size(6, 3).expect("non-empty grid"),
            |mut grid| regulate::maintain_density(Some(&mut grid), 0.6),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("radial_seed_60x24", |b| {
        let mut grid = CellGrid::with_size(60, 24).expect("non-empty grid");
        b.iter(|| seeding::seed_radial_density(&mut grid, 0.7, 0.1))
    });
}

fn arcade_benchmark(c: &mut Criterion) {
    let mut arcade = Arcade::new(ArcadeConfig::default()).expect("default arcade");
    c.bench_function("arcade_frame", |b| b.iter(|| arcade.tick()));
}

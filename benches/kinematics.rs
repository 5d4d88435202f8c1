//! Benchmarks for field construction and per-frame kinematics.
//!
//! Run with: `cargo bench`

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shatter::{FieldConfig, ParticleField, Rect, Timeline, DEFAULT_DURATION};

fn test_image() -> image::RgbaImage {
    image::RgbaImage::from_fn(170, 170, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

fn bench_field_construction(c: &mut Criterion) {
    let image = test_image();
    let rect = Rect::new(0.0, 0.0, 170.0, 170.0);

    c.bench_function("field_construction_15x15", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        b.iter(|| {
            black_box(ParticleField::new(
                &image,
                rect,
                Timeline::new(Duration::ZERO, DEFAULT_DURATION),
                FieldConfig::default(),
                &mut rng,
            ))
        })
    });
}

fn bench_full_grid_evaluation(c: &mut Criterion) {
    let image = test_image();
    let rect = Rect::new(0.0, 0.0, 170.0, 170.0);
    let mut rng = SmallRng::seed_from_u64(42);
    let field = ParticleField::new(
        &image,
        rect,
        Timeline::new(Duration::ZERO, DEFAULT_DURATION),
        FieldConfig::default(),
        &mut rng,
    );

    c.bench_function("evaluate_225_particles", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for state in field.evaluate(black_box(0.9)) {
                acc += state.radius + state.alpha;
            }
            black_box(acc)
        })
    });

    c.bench_function("evaluate_full_sweep", |b| {
        b.iter(|| {
            let mut visible = 0usize;
            for i in 0..=14 {
                let factor = i as f32 * 0.1;
                visible += field
                    .evaluate(black_box(factor))
                    .filter(|state| state.alpha > 0.0)
                    .count();
            }
            black_box(visible)
        })
    });
}

criterion_group!(benches, bench_field_construction, bench_full_grid_evaluation);
criterion_main!(benches);

//! Benchmarks for the profile pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use aina::prelude::*;
use nalgebra::Point3;

fn profile_grid() -> Vec<UserProfile> {
    let mut profiles = Vec::new();
    for gender in [Gender::Male, Gender::Female] {
        for chest in (80..=120).step_by(5) {
            for hips in (85..=125).step_by(5) {
                let mut p = UserProfile::for_gender(gender);
                p.chest = chest as f64;
                p.hips = hips as f64;
                profiles.push(p);
            }
        }
    }
    profiles
}

fn bench_classify(c: &mut Criterion) {
    let profiles = profile_grid();

    c.bench_function("classify_grid", |b| {
        b.iter(|| {
            for p in &profiles {
                black_box(classify(black_box(p)));
            }
        })
    });

    let imperial: Vec<UserProfile> = profiles
        .iter()
        .map(|p| convert_profile(p, UnitSystem::Metric, UnitSystem::Imperial))
        .collect();
    c.bench_function("resolve_imperial_grid", |b| {
        b.iter(|| {
            for p in &imperial {
                black_box(ResolverMode::Shape.resolve_profile(black_box(p)));
            }
        })
    });
}

fn bench_placement(c: &mut Criterion) {
    let n = 100;
    let mut model = ModelData::new();
    let mut positions = Vec::with_capacity((n + 1) * (n + 1));
    let mut indices = Vec::with_capacity(n * n * 6);
    for j in 0..=n {
        for i in 0..=n {
            positions.push(Point3::new(i as f32 * 0.01, j as f32 * 0.02, 0.0));
        }
    }
    for j in 0..n {
        for i in 0..n {
            let v00 = (j * (n + 1) + i) as u32;
            let v10 = v00 + 1;
            let v01 = v00 + (n as u32 + 1);
            let v11 = v01 + 1;
            indices.extend_from_slice(&[v00, v10, v11, v00, v11, v01]);
        }
    }
    model.append(&positions, &[], &indices);

    c.bench_function("fit_and_transform_100x100", |b| {
        b.iter(|| {
            let bounds = model.bounds().unwrap();
            let placement = Placement::fit(&bounds, 2.8, 1.4);
            let m = placement.model_matrix(0.3);
            model
                .positions
                .iter()
                .map(|p| m.transform_point(p).y)
                .fold(f32::MIN, f32::max)
        })
    });
}

criterion_group!(benches, bench_classify, bench_placement);
criterion_main!(benches);

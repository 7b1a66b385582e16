//! Benchmarks for mesh construction.
//!
//! Run with: cargo bench --package scan-mesh --bench mesh_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use polar_grid::{compute_edges, PolarScan, ScanMetadata};
use projection::{EllipsoidalProjection, ProjectionMode};
use scan_mesh::{MeshBuilder, MeshConfig};

/// A dense super-resolution reflectivity scan: 720 rays of 0.5 degrees.
fn dense_scan(ngates: usize) -> PolarScan {
    let nazs = 720;
    let metadata = ScanMetadata {
        azimuths: (0..nazs).map(|i| i as f64 * 0.5).collect(),
        gate_spacing: 250.0,
        first_gate: 0.0,
        nazs,
        ngates,
        scanangle: 0.5,
        radar_lat: 35.333,
        radar_lon: -97.278,
    };
    let samples = (0..nazs * ngates).map(|i| (i % 251) as u8).collect();
    PolarScan::from_parts(metadata, samples).unwrap()
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");

    for ngates in [200usize, 1832] {
        let scan = dense_scan(ngates);
        let edges = compute_edges(scan.azimuths());
        let (lat, lon) = scan.origin();
        let projection = EllipsoidalProjection::new(lat, lon, scan.elevation_deg());

        group.bench_with_input(
            BenchmarkId::new("ellipsoidal", ngates),
            &ngates,
            |b, _| {
                let mut builder = MeshBuilder::new(MeshConfig::default());
                b.iter(|| {
                    let buffers = builder.rebuild(&scan, &edges, &projection);
                    black_box(buffers.logical_count())
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("analytic", ngates), &ngates, |b, _| {
            let config = MeshConfig {
                projection_mode: ProjectionMode::Analytic,
                ..MeshConfig::default()
            };
            let mut builder = MeshBuilder::new(config);
            b.iter(|| {
                let buffers = builder.rebuild(&scan, &edges, &projection);
                black_box(buffers.logical_count())
            });
        });
    }

    group.finish();
}

fn bench_interpolation_off(c: &mut Criterion) {
    // Threshold 0 forces exact projection of every edge, showing what the
    // optimizer saves on a dense scan.
    let scan = dense_scan(1832);
    let edges = compute_edges(scan.azimuths());
    let (lat, lon) = scan.origin();
    let projection = EllipsoidalProjection::new(lat, lon, scan.elevation_deg());

    c.bench_function("rebuild/ellipsoidal_no_interpolation", |b| {
        let config = MeshConfig {
            interpolation_threshold_deg: 0.0,
            ..MeshConfig::default()
        };
        let mut builder = MeshBuilder::new(config);
        b.iter(|| {
            let buffers = builder.rebuild(&scan, &edges, &projection);
            black_box(buffers.logical_count())
        });
    });
}

criterion_group!(benches, bench_rebuild, bench_interpolation_off);
criterion_main!(benches);

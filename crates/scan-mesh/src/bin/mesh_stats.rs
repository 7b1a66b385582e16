//! Mesh construction diagnostics.
//!
//! Builds meshes for a synthetic scan and reports vertex counts, buffer
//! sizes, and cold/warm rebuild timings for both projection modes.
//!
//! Run with: cargo run --release --bin mesh-stats -- --nazs 720 --ngates 1832

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use std::time::Instant;

use polar_grid::ScanMetadata;
use projection::ProjectionMode;
use scan_mesh::{MeshConfig, MeshPipeline, RawScan, ScanSource};

#[derive(Parser, Debug)]
#[command(about = "Report mesh construction statistics for a synthetic scan")]
struct Args {
    /// Number of rays.
    #[arg(long, env = "MESH_STATS_NAZS", default_value_t = 720)]
    nazs: usize,

    /// Number of range gates per ray.
    #[arg(long, env = "MESH_STATS_NGATES", default_value_t = 1832)]
    ngates: usize,

    /// Gate spacing in meters.
    #[arg(long, default_value_t = 250.0)]
    gate_spacing: f64,

    /// Antenna elevation in degrees.
    #[arg(long, default_value_t = 0.5)]
    elevation: f64,

    /// Radar latitude in degrees.
    #[arg(long, default_value_t = 35.333)]
    lat: f64,

    /// Radar longitude in degrees.
    #[arg(long, default_value_t = -97.278)]
    lon: f64,
}

struct SyntheticSource {
    args_nazs: usize,
    args_ngates: usize,
    gate_spacing: f64,
    elevation: f64,
    lat: f64,
    lon: f64,
}

#[async_trait]
impl ScanSource for SyntheticSource {
    async fn fetch(&self, _source_id: &str) -> scan_mesh::Result<RawScan> {
        let nazs = self.args_nazs;
        let ngates = self.args_ngates;
        let samples = (0..nazs * ngates).map(|i| (i % 251) as u8).collect();
        Ok(RawScan {
            metadata: ScanMetadata {
                azimuths: (0..nazs)
                    .map(|i| i as f64 * 360.0 / nazs as f64)
                    .collect(),
                gate_spacing: self.gate_spacing,
                first_gate: 0.0,
                nazs,
                ngates,
                scanangle: self.elevation,
                radar_lat: self.lat,
                radar_lon: self.lon,
            },
            samples,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    println!("Mesh Construction Statistics");
    println!("============================\n");
    println!(
        "Scan: {} rays x {} gates, {} m spacing, {:.1} deg elevation\n",
        args.nazs, args.ngates, args.gate_spacing, args.elevation
    );

    println!(
        "{:<14} {:>10} {:>12} {:>12}",
        "Mode", "Vertices", "Cold (ms)", "Warm (ms)"
    );
    println!("{:-<50}", "");

    for mode in [ProjectionMode::Ellipsoidal, ProjectionMode::Analytic] {
        let source = SyntheticSource {
            args_nazs: args.nazs,
            args_ngates: args.ngates,
            gate_spacing: args.gate_spacing,
            elevation: args.elevation,
            lat: args.lat,
            lon: args.lon,
        };
        let config = MeshConfig {
            projection_mode: mode,
            ..MeshConfig::from_env()
        };
        let mut pipeline = MeshPipeline::new(source, config);

        let cold_start = Instant::now();
        let vertex_count = pipeline.rebuild("synthetic").await?.vertex_count();
        let cold = cold_start.elapsed();

        let warm_start = Instant::now();
        pipeline.rebuild("synthetic").await?;
        let warm = warm_start.elapsed();

        println!(
            "{:<14} {:>10} {:>12.2} {:>12.2}",
            mode.to_string(),
            vertex_count,
            cold.as_secs_f64() * 1000.0,
            warm.as_secs_f64() * 1000.0
        );
    }

    Ok(())
}

//! Rebuild pipeline: fetch, decode, build, publish.
//!
//! One logical pipeline is in flight at a time (`rebuild` takes `&mut
//! self`); a new request arriving while one is pending is the caller's
//! responsibility to defer or drop. There is no cancellation: a started
//! build runs to completion and publishes, and a superseded result is simply
//! overwritten by the next publish. Publishing copies the logical region of
//! the build buffers into a fresh [`MeshOutput`], so a consumer can never
//! observe a buffer mid-write.

use std::sync::Arc;
use std::time::Instant;

use polar_grid::{compute_edges, PolarScan};

use crate::builder::MeshBuilder;
use crate::cache::{CacheStats, ScanCache, ScanRecord};
use crate::config::MeshConfig;
use crate::error::Result;
use crate::source::ScanSource;

/// A fully published mesh, ready for the render collaborator.
#[derive(Debug, Clone)]
pub struct MeshOutput {
    /// Vertex positions, 2 floats per vertex. Normalized map coordinates in
    /// ellipsoidal mode; (gate position, azimuth degrees) beam parameters in
    /// analytic mode.
    pub positions: Vec<f32>,
    /// Texture coordinates addressing the sample grid, 2 floats per vertex.
    pub tex_coords: Vec<f32>,
    /// The scan's sample codes, row-major, for texture upload.
    pub sample_grid: Vec<u8>,
    /// Sample grid shape (rays, gates).
    pub shape: (usize, usize),
    /// True when the geometry buffers changed size and must be re-uploaded;
    /// false when only the sample texture needs refreshing.
    ///
    /// Keyed on vertex count alone: an equal-size scan with different
    /// geometry (say, another elevation of the same dimensions) still
    /// publishes fresh `positions` with this flag false. Consumers that
    /// step across such scans must re-upload from `positions` themselves,
    /// or compare contents before skipping the upload.
    pub rebuild_needed: bool,
}

impl MeshOutput {
    /// Vertex count of the published mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }
}

/// Drives scans from a source through decode and mesh construction.
pub struct MeshPipeline<S> {
    source: S,
    config: MeshConfig,
    cache: ScanCache,
    builder: MeshBuilder,
    published: Option<MeshOutput>,
    last_vertex_count: Option<usize>,
}

impl<S: ScanSource> MeshPipeline<S> {
    pub fn new(source: S, config: MeshConfig) -> Self {
        let cache = ScanCache::new(config.cache_max_entries);
        let builder = MeshBuilder::new(config.clone());
        Self {
            source,
            config,
            cache,
            builder,
            published: None,
            last_vertex_count: None,
        }
    }

    /// Fetch (or reuse) the scan behind `source_id`, rebuild its mesh, and
    /// publish the result.
    ///
    /// Decode and fetch failures surface to the caller and leave both the
    /// cache and the previously published mesh untouched.
    pub async fn rebuild(&mut self, source_id: &str) -> Result<&MeshOutput> {
        let entry = match self.cache.get(source_id) {
            Some(entry) => {
                tracing::debug!(source_id, "scan cache hit");
                entry
            }
            None => {
                let raw = self.source.fetch(source_id).await?;
                let scan = PolarScan::from_parts(raw.metadata, raw.samples)?;
                let edges = compute_edges(scan.azimuths());
                let entry = Arc::new(ScanRecord { scan, edges });
                self.cache.insert(source_id.to_string(), Arc::clone(&entry));
                entry
            }
        };

        let started = Instant::now();
        let (radar_lat, radar_lon) = self.config.radar_origin.unwrap_or_else(|| entry.scan.origin());
        let projector =
            self.config
                .projection_mode
                .projector(radar_lat, radar_lon, entry.scan.elevation_deg());
        let buffers = self
            .builder
            .rebuild(&entry.scan, &entry.edges, projector.as_ref());

        let vertex_count = buffers.logical_count();
        let rebuild_needed = self.last_vertex_count != Some(vertex_count);
        self.last_vertex_count = Some(vertex_count);

        let output = MeshOutput {
            positions: buffers.positions().to_vec(),
            tex_coords: buffers.tex_coords().to_vec(),
            sample_grid: entry.scan.samples().to_vec(),
            shape: (entry.scan.nazs(), entry.scan.ngates()),
            rebuild_needed,
        };

        tracing::info!(
            source_id,
            vertex_count,
            rebuild_needed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "mesh rebuilt"
        );

        Ok(self.published.insert(output))
    }

    /// The most recently published mesh, if any.
    pub fn published(&self) -> Option<&MeshOutput> {
        self.published.as_ref()
    }

    /// Scan cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::source::RawScan;
    use async_trait::async_trait;
    use polar_grid::ScanMetadata;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn raw_scan(nazs: usize, ngates: usize) -> RawScan {
        RawScan {
            metadata: ScanMetadata {
                azimuths: (0..nazs)
                    .map(|i| i as f64 * 360.0 / nazs as f64)
                    .collect(),
                gate_spacing: 100.0,
                first_gate: 0.0,
                nazs,
                ngates,
                scanangle: 0.5,
                radar_lat: 35.0,
                radar_lon: -97.0,
            },
            samples: vec![42u8; nazs * ngates],
        }
    }

    /// Serves synthetic scans and counts fetches; ids look like "NxG".
    struct StubSource {
        fetches: AtomicUsize,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ScanSource for StubSource {
        async fn fetch(&self, source_id: &str) -> Result<RawScan> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let (n, g) = source_id
                .split_once('x')
                .ok_or_else(|| MeshError::source(format!("bad id {source_id}")))?;
            let n: usize = n.parse().map_err(|_| MeshError::source("bad ray count"))?;
            let g: usize = g.parse().map_err(|_| MeshError::source("bad gate count"))?;
            Ok(raw_scan(n, g))
        }
    }

    /// Always produces a payload whose grid disagrees with its metadata.
    struct BrokenSource;

    #[async_trait]
    impl ScanSource for BrokenSource {
        async fn fetch(&self, _source_id: &str) -> Result<RawScan> {
            let mut raw = raw_scan(4, 8);
            raw.samples.pop();
            Ok(raw)
        }
    }

    #[test]
    fn test_repeat_rebuild_hits_cache() {
        tokio_test::block_on(async {
            let mut pipeline = MeshPipeline::new(StubSource::new(), MeshConfig::default());

            let first = pipeline.rebuild("8x50").await.unwrap();
            assert!(first.rebuild_needed, "first publish re-uploads geometry");
            assert_eq!(first.vertex_count(), 8 * 6);

            let second = pipeline.rebuild("8x50").await.unwrap();
            assert!(!second.rebuild_needed, "same size, texture-only update");

            assert_eq!(pipeline.source.fetches.load(Ordering::SeqCst), 1);
            let stats = pipeline.cache_stats();
            assert_eq!(stats.hits, 1);
            assert_eq!(stats.misses, 1);
        });
    }

    #[test]
    fn test_size_change_sets_rebuild_needed() {
        tokio_test::block_on(async {
            let mut pipeline = MeshPipeline::new(StubSource::new(), MeshConfig::default());

            assert!(pipeline.rebuild("10x50").await.unwrap().rebuild_needed);
            assert!(pipeline.rebuild("20x100").await.unwrap().rebuild_needed);
            let third = pipeline.rebuild("5x20").await.unwrap();
            assert!(third.rebuild_needed);
            assert_eq!(third.vertex_count(), 5 * 6);
            assert_eq!(third.shape, (5, 20));
            assert_eq!(third.sample_grid.len(), 100);
        });
    }

    #[test]
    fn test_failed_decode_preserves_published_mesh() {
        tokio_test::block_on(async {
            let mut pipeline = MeshPipeline::new(StubSource::new(), MeshConfig::default());
            pipeline.rebuild("8x50").await.unwrap();
            let published_before = pipeline.published().unwrap().positions.clone();

            let err = pipeline.rebuild("not-an-id").await.unwrap_err();
            assert!(matches!(err, MeshError::Source(_)));

            let published = pipeline.published().unwrap();
            assert_eq!(published.positions, published_before);
        });
    }

    #[test]
    fn test_shape_mismatch_does_not_pollute_cache() {
        tokio_test::block_on(async {
            let mut pipeline = MeshPipeline::new(BrokenSource, MeshConfig::default());

            assert!(matches!(
                pipeline.rebuild("any").await.unwrap_err(),
                MeshError::Decode(_)
            ));
            assert_eq!(pipeline.cache_stats().entries, 0);
            assert!(pipeline.published().is_none());
        });
    }
}

//! Mesh assembly: edge-ring projection and triangle emission.
//!
//! A scan's mesh is a ring of N azimuth cells, each subdivided radially into
//! `nj` segments. Cell (i, j) covers the quad between azimuth edges `i` and
//! `i+1` and slant ranges `r0 + j/nj * depth` and `r0 + (j+1)/nj * depth`,
//! and is emitted as two triangles (six vertices, no index buffer).
//!
//! In ellipsoidal mode every edge ring is projected on the CPU, with an
//! optimization for dense scans: even-indexed edges are projected exactly,
//! while an odd edge flanked by small angular steps is interpolated from its
//! two exact neighbors. In analytic mode the buffer carries raw beam
//! parameters per vertex (fractional gate position, azimuth edge in degrees)
//! and the renderer's vertex stage performs the projection.

use polar_grid::{angle_diff, PolarScan};
use projection::{ProjectionFunction, ProjectionMode};

use crate::buffers::MeshBuffers;
use crate::config::MeshConfig;
use crate::subdivide::segment_count;

/// Builds and owns the mesh buffers for the scan currently on screen.
///
/// The builder exclusively owns its buffers between build-start and publish;
/// `rebuild` is synchronous, runs to completion, and is deterministic for a
/// given scan.
pub struct MeshBuilder {
    config: MeshConfig,
    buffers: MeshBuffers,
    // Projected edge positions, (nj + 1) rings of N entries, reused across
    // rebuilds.
    rings: Vec<(f64, f64)>,
}

impl MeshBuilder {
    pub fn new(config: MeshConfig) -> Self {
        Self {
            config,
            buffers: MeshBuffers::new(),
            rings: Vec::new(),
        }
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Rebuild the mesh for one scan.
    ///
    /// `edges` must be the azimuth cell boundaries of `scan` (one per ray).
    /// Returns the buffers with `logical_count` set for this scan; reused
    /// tail capacity from a previous, larger scan is degenerate.
    pub fn rebuild(
        &mut self,
        scan: &PolarScan,
        edges: &[f64],
        projection: &dyn ProjectionFunction,
    ) -> &MeshBuffers {
        let n = scan.nazs();
        assert_eq!(edges.len(), n, "edge count must match ray count");

        let nj = segment_count(
            scan.ngates(),
            scan.gate_spacing(),
            self.config.max_segment_ground_distance_m,
        );
        self.buffers.begin(n * nj * 6);

        match self.config.projection_mode {
            ProjectionMode::Ellipsoidal => self.emit_projected(scan, edges, nj, projection),
            ProjectionMode::Analytic => self.emit_beam_params(scan, edges, nj),
        }

        self.buffers.finish();
        &self.buffers
    }

    /// Most recently built buffers.
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    fn emit_projected(
        &mut self,
        scan: &PolarScan,
        edges: &[f64],
        nj: usize,
        projection: &dyn ProjectionFunction,
    ) {
        let n = edges.len();
        let depth = scan.range_depth_m();
        let threshold = self.config.interpolation_threshold_deg;

        self.rings.clear();
        self.rings.resize((nj + 1) * n, (0.0, 0.0));
        for j in 0..=nj {
            let slant = scan.first_gate() + j as f64 / nj as f64 * depth;
            project_ring(
                &mut self.rings[j * n..(j + 1) * n],
                edges,
                slant,
                projection,
                threshold,
            );
        }

        for i in 0..n {
            let i_next = (i + 1) % n;
            let v = (i as f32 + 0.5) / n as f32;
            for j in 0..nj {
                let t0 = j as f32 / nj as f32;
                let t1 = (j + 1) as f32 / nj as f32;
                let p00 = as_f32(self.rings[j * n + i]);
                let p10 = as_f32(self.rings[j * n + i_next]);
                let p01 = as_f32(self.rings[(j + 1) * n + i]);
                let p11 = as_f32(self.rings[(j + 1) * n + i_next]);

                self.buffers.push_vertex(p00, [t0, v]);
                self.buffers.push_vertex(p10, [t0, v]);
                self.buffers.push_vertex(p01, [t1, v]);
                self.buffers.push_vertex(p10, [t0, v]);
                self.buffers.push_vertex(p11, [t1, v]);
                self.buffers.push_vertex(p01, [t1, v]);
            }
        }
    }

    // Analytic mode: each vertex carries (fractional gate position from the
    // first gate, azimuth edge in degrees). The vertex stage reconstructs
    // slant range as `first_gate + pos * gate_spacing` and projects.
    fn emit_beam_params(&mut self, scan: &PolarScan, edges: &[f64], nj: usize) {
        let n = edges.len();
        let gates = scan.ngates() as f64;

        for i in 0..n {
            let i_next = (i + 1) % n;
            let a0 = edges[i] as f32;
            let a1 = edges[i_next] as f32;
            let v = (i as f32 + 0.5) / n as f32;
            for j in 0..nj {
                let g0 = (j as f64 / nj as f64 * gates) as f32;
                let g1 = ((j + 1) as f64 / nj as f64 * gates) as f32;
                let t0 = j as f32 / nj as f32;
                let t1 = (j + 1) as f32 / nj as f32;

                self.buffers.push_vertex([g0, a0], [t0, v]);
                self.buffers.push_vertex([g0, a1], [t0, v]);
                self.buffers.push_vertex([g1, a0], [t1, v]);
                self.buffers.push_vertex([g0, a1], [t0, v]);
                self.buffers.push_vertex([g1, a1], [t1, v]);
                self.buffers.push_vertex([g1, a0], [t1, v]);
            }
        }
    }
}

fn as_f32(p: (f64, f64)) -> [f32; 2] {
    [p.0 as f32, p.1 as f32]
}

/// Project one ring of azimuth edge positions at a fixed slant range.
///
/// Even-indexed edges are projected exactly. An odd edge whose neighboring
/// angular steps d1, d2 are both below the threshold is interpolated as
/// `(d2 * left + d1 * right) / (d1 + d2)` from its exact neighbors, halving
/// the projection evaluations on dense scans; larger steps fall back to
/// exact projection.
fn project_ring(
    out: &mut [(f64, f64)],
    edges: &[f64],
    slant_range_m: f64,
    projection: &dyn ProjectionFunction,
    threshold_deg: f64,
) {
    let n = edges.len();

    for i in (0..n).step_by(2) {
        out[i] = projection.project(edges[i], slant_range_m);
    }

    for i in (1..n).step_by(2) {
        let left = i - 1;
        let right = (i + 1) % n;
        let d1 = angle_diff(edges[left], edges[i]);
        let d2 = angle_diff(edges[i], edges[right]);

        out[i] = if d1 < threshold_deg && d2 < threshold_deg && d1 + d2 > 0.0 {
            let pl = out[left];
            let pr = out[right];
            let w = d1 + d2;
            ((d2 * pl.0 + d1 * pr.0) / w, (d2 * pl.1 + d1 * pr.1) / w)
        } else {
            projection.project(edges[i], slant_range_m)
        };
    }
}

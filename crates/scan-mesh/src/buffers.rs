//! Mesh vertex buffers with growth-only reuse.

/// Position and texture-coordinate buffers for one scan's mesh.
///
/// Capacity never shrinks across rebuilds: a later, smaller scan reuses the
/// existing allocation, and every vertex in `[logical_count, capacity)` is
/// collapsed onto a single shared position so stale tail geometry draws as
/// zero-area triangles. Consumers must draw `logical_count` vertices, never
/// the raw capacity.
#[derive(Debug, Default)]
pub struct MeshBuffers {
    positions: Vec<f32>,
    tex_coords: Vec<f32>,
    capacity_vertices: usize,
    logical_vertices: usize,
    write_cursor: usize,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare for a build that will write exactly `vertices` vertices.
    ///
    /// Grows the allocation if needed; never shrinks it.
    pub(crate) fn begin(&mut self, vertices: usize) {
        if vertices > self.capacity_vertices {
            self.positions.resize(vertices * 2, 0.0);
            self.tex_coords.resize(vertices * 2, 0.0);
            self.capacity_vertices = vertices;
        }
        self.logical_vertices = vertices;
        self.write_cursor = 0;
    }

    /// Append one vertex.
    ///
    /// Writing more vertices than planned in [`Self::begin`] is a capacity
    /// invariant violation and aborts; silent truncation would corrupt the
    /// mesh.
    pub(crate) fn push_vertex(&mut self, pos: [f32; 2], tex: [f32; 2]) {
        assert!(
            self.write_cursor < self.logical_vertices,
            "vertex write {} exceeds planned count {}",
            self.write_cursor,
            self.logical_vertices
        );
        debug_assert!(
            pos[0].is_finite() && pos[1].is_finite(),
            "non-finite vertex position ({}, {})",
            pos[0],
            pos[1]
        );

        let at = self.write_cursor * 2;
        self.positions[at] = pos[0];
        self.positions[at + 1] = pos[1];
        self.tex_coords[at] = tex[0];
        self.tex_coords[at + 1] = tex[1];
        self.write_cursor += 1;
    }

    /// Finish a build: verify the planned vertex count was written and
    /// collapse any reused tail capacity onto one shared position.
    pub(crate) fn finish(&mut self) {
        assert_eq!(
            self.write_cursor, self.logical_vertices,
            "build wrote {} of {} planned vertices",
            self.write_cursor, self.logical_vertices
        );

        let pad = if self.logical_vertices > 0 {
            [self.positions[0], self.positions[1]]
        } else {
            [0.0, 0.0]
        };
        for v in self.logical_vertices..self.capacity_vertices {
            let at = v * 2;
            self.positions[at] = pad[0];
            self.positions[at + 1] = pad[1];
            self.tex_coords[at] = 0.0;
            self.tex_coords[at + 1] = 0.0;
        }
    }

    /// Vertex positions for the current scan, 2 floats per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions[..self.logical_vertices * 2]
    }

    /// Texture coordinates for the current scan, 2 floats per vertex.
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords[..self.logical_vertices * 2]
    }

    /// Vertices meaningful for the current scan.
    pub fn logical_count(&self) -> usize {
        self.logical_vertices
    }

    /// Vertices allocated; monotonically non-decreasing.
    pub fn capacity(&self) -> usize {
        self.capacity_vertices
    }
}

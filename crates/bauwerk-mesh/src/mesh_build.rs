//! Flat mesh buffers and quad accumulation.

use bauwerk_geom::Vec3;

/// Geometry buffers for one meshed chunk.
///
/// `vertices` and `normals` hold xyz triples, `uvs` holds uv pairs, and
/// `indices` addresses vertices as two triangles per emitted quad. A chunk
/// whose meshing pass ran out of budget is stored with `is_complete = false`
/// and re-meshed on a later frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub uvs: Vec<f32>,
    pub normals: Vec<f32>,
    pub block_count: usize,
    pub is_complete: bool,
}

impl ChunkMesh {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Accumulates quads into flat buffers during a meshing pass.
#[derive(Default)]
pub(crate) struct MeshBuild {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    uvs: Vec<f32>,
    normals: Vec<f32>,
}

impl MeshBuild {
    /// Appends one quad, reordering to counter-clockwise winding as seen
    /// from the `n` side. Corner 0 stays fixed so UV assignment survives
    /// the flip.
    pub fn add_quad(&mut self, corners: [Vec3; 4], uv: [(f32, f32); 4], n: Vec3) {
        let mut vs = corners;
        let mut uv = uv;
        let c = (vs[1] - vs[0]).cross(vs[2] - vs[0]);
        if c.dot(n) < 0.0 {
            vs.swap(1, 3);
            uv.swap(1, 3);
        }
        let base = (self.vertices.len() / 3) as u32;
        for v in &vs {
            self.vertices.extend_from_slice(&[v.x, v.y, v.z]);
        }
        for &(u, v) in &uv {
            self.uvs.push(u);
            self.uvs.push(v);
        }
        for _ in 0..4 {
            self.normals.extend_from_slice(&[n.x, n.y, n.z]);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn into_mesh(self, block_count: usize, is_complete: bool) -> ChunkMesh {
        ChunkMesh {
            vertices: self.vertices,
            indices: self.indices,
            uvs: self.uvs,
            normals: self.normals,
            block_count,
            is_complete,
        }
    }
}

//! Flat position/normal arrays for rendering.

use serde::{Deserialize, Serialize};

use crate::mesh::QuadMesh;

/// Quad list ready for a rasterizer.
///
/// Both arrays hold one `[x, y, z]` triple per face corner, laid out face by
/// face and corner by corner: four corners per quad.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuadBuffers {
    /// Flat array of corner positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub positions: Vec<f32>,
    /// Flat array of corner normals, same layout as `positions`.
    pub normals: Vec<f32>,
}

impl QuadBuffers {
    /// Flatten every face of `mesh`.
    pub fn from_mesh(mesh: &QuadMesh) -> Self {
        let len = mesh.num_faces() * 4 * 3;
        let mut positions = Vec::with_capacity(len);
        let mut normals = Vec::with_capacity(len);
        for face in mesh.faces() {
            for (&v, n) in face.vertices().iter().zip(face.normals()) {
                let p = mesh.position(v);
                positions.extend([p.x as f32, p.y as f32, p.z as f32]);
                normals.extend([n.x as f32, n.y as f32, n.z as f32]);
            }
        }
        Self { positions, normals }
    }

    /// Number of corner entries (four per quad).
    pub fn num_corners(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of quads.
    pub fn num_quads(&self) -> usize {
        self.num_corners() / 4
    }

    /// Index list splitting every quad into two triangles `(0, 1, 2)` and `(0, 2, 3)`.
    pub fn triangle_indices(&self) -> Vec<u32> {
        (0..self.num_quads() as u32)
            .flat_map(|q| {
                let b = q * 4;
                [b, b + 1, b + 2, b, b + 2, b + 3]
            })
            .collect()
    }
}

impl QuadMesh {
    /// Flat buffers of this mesh, built on first call and cached.
    ///
    /// The cache is never invalidated; meshes cannot change after
    /// [`QuadMeshBuilder::build`](crate::QuadMeshBuilder::build).
    pub fn buffers(&self) -> &QuadBuffers {
        self.buffers.get_or_init(|| QuadBuffers::from_mesh(self))
    }
}

//! Small reference meshes.

use quadmesh_math::Point3;

use crate::builder::{QuadMeshBuilder, VertexRef};
use crate::error::Result;
use crate::mesh::QuadMesh;

/// Corners of the unit square in the z = 0 plane, counter-clockwise seen from +z.
pub const UNIT_QUAD: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Faces of the unit cube `[0, 1]^3`, wound counter-clockwise seen from outside.
const CUBE_FACES: [[[f64; 3]; 4]; 6] = [
    // bottom (-z)
    [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    // top (+z)
    [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
    // front (-y)
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
    // back (+y)
    [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
    // left (-x)
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
    // right (+x)
    [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
];

fn corners(quad: &[[f64; 3]; 4]) -> [VertexRef; 4] {
    quad.map(|[x, y, z]| VertexRef::Position(Point3::new(x, y, z)))
}

/// A single unit quad with a flat `+z` normal.
pub fn unit_quad() -> Result<QuadMesh> {
    let mut builder = QuadMeshBuilder::new();
    builder.add_face(corners(&UNIT_QUAD), None)?;
    Ok(builder.build())
}

/// The closed unit cube: 8 vertices, 12 edges, 6 faces.
pub fn unit_cube() -> Result<QuadMesh> {
    let mut builder = QuadMeshBuilder::with_capacity(8, 12, 6);
    for face in &CUBE_FACES {
        builder.add_face(corners(face), None)?;
    }
    Ok(builder.build())
}

/// An open `n` x `n` grid of unit quads in the z = 0 plane, facing `+z`.
pub fn grid(n: usize) -> Result<QuadMesh> {
    let mut builder = QuadMeshBuilder::with_capacity((n + 1) * (n + 1), 2 * n * (n + 1), n * n);
    for j in 0..n {
        for i in 0..n {
            let (x, y) = (i as f64, j as f64);
            builder.add_face(
                corners(&[
                    [x, y, 0.0],
                    [x + 1.0, y, 0.0],
                    [x + 1.0, y + 1.0, 0.0],
                    [x, y + 1.0, 0.0],
                ]),
                None,
            )?;
        }
    }
    Ok(builder.build())
}

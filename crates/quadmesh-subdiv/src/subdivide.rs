//! Catmull-Clark refinement.

use quadmesh_math::Point3;
use quadmesh_topo::{QuadMesh, QuadMeshBuilder, VertexId, VertexRef};
use tracing::debug;

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::points::SubdivisionPoints;

/// Apply one Catmull-Clark pass and return the refined mesh.
///
/// Every quad becomes four quads. For a closed mesh with `V` vertices, `E`
/// edges and `F` faces the result has `V + E + F` vertices, `2E + 4F` edges
/// and `4F` faces. The input mesh is left untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh has no faces
/// - Some edge has no incident face
/// - The result would exceed `params.max_faces`
/// - Rebuilding hits a topology violation (e.g. a non-manifold edge)
///
/// # Examples
///
/// ```
/// use quadmesh_subdiv::{subdivide, SubdivideParams};
/// use quadmesh_topo::primitives::unit_cube;
///
/// let cube = unit_cube()?;
/// let refined = subdivide(&cube, &SubdivideParams::default())?;
/// assert_eq!(refined.num_faces(), 24);
/// assert_eq!(refined.num_vertices(), 26);
/// assert_eq!(refined.num_edges(), 48);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn subdivide(mesh: &QuadMesh, params: &SubdivideParams) -> SubdivideResult<QuadMesh> {
    if mesh.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    let projected = SubdivideParams::expected_faces(mesh.num_faces(), 1);
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: mesh.num_faces(),
            projected,
            max: params.max_faces,
        });
    }

    let points = SubdivisionPoints::compute(mesh, params)?;
    let refined = rebuild(mesh, &points)?;

    debug!(
        "Subdivided mesh: {} -> {} faces, {} -> {} edges, {} -> {} vertices",
        mesh.num_faces(),
        refined.num_faces(),
        mesh.num_edges(),
        refined.num_edges(),
        mesh.num_vertices(),
        refined.num_vertices()
    );
    Ok(refined)
}

/// Apply `levels` passes, each on the result of the previous one.
///
/// Zero levels returns a copy of `mesh`.
pub fn subdivide_levels(
    mesh: &QuadMesh,
    levels: u32,
    params: &SubdivideParams,
) -> SubdivideResult<QuadMesh> {
    let projected = SubdivideParams::expected_faces(mesh.num_faces(), levels);
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: mesh.num_faces(),
            projected,
            max: params.max_faces,
        });
    }

    let mut current = mesh.clone();
    for level in 0..levels {
        current = subdivide(&current, params)?;
        debug!("Level {}: {} faces", level + 1, current.num_faces());
    }
    Ok(current)
}

/// Phase 2: register every new point once, then emit four quads per face.
fn rebuild(mesh: &QuadMesh, points: &SubdivisionPoints) -> SubdivideResult<QuadMesh> {
    let mut builder = QuadMeshBuilder::with_capacity(
        mesh.num_vertices() + mesh.num_edges() + mesh.num_faces(),
        2 * mesh.num_edges() + 4 * mesh.num_faces(),
        4 * mesh.num_faces(),
    );

    let face_ids = register(&mut builder, &points.face_points)?;
    let edge_ids = register(&mut builder, &points.edge_points)?;
    let vertex_ids = register(&mut builder, &points.vertex_points)?;

    for (fi, face) in mesh.faces().iter().enumerate() {
        let (vs, es) = (face.vertices(), face.edges());
        for j in 0..4 {
            let next = (j + 1) % 4;
            let (e0, v, e1) = (es[j].index(), vs[next].index(), es[next].index());
            builder.add_face(
                [
                    VertexRef::Id(face_ids[fi]),
                    VertexRef::Id(edge_ids[e0]),
                    VertexRef::Id(vertex_ids[v]),
                    VertexRef::Id(edge_ids[e1]),
                ],
                Some([
                    points.face_normals[fi],
                    points.edge_normals[e0],
                    points.vertex_normals[v],
                    points.edge_normals[e1],
                ]),
            )?;
        }
    }

    Ok(builder.build())
}

fn register(
    builder: &mut QuadMeshBuilder,
    points: &[Point3],
) -> SubdivideResult<Vec<VertexId>> {
    points
        .iter()
        .map(|&p| builder.vertex_id(p).map_err(SubdivideError::from))
        .collect()
}

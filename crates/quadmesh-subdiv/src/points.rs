//! Phase 1: face, edge and vertex points.

use quadmesh_math::{centroid, unit, Point3, Vec3};
use quadmesh_topo::{EdgeId, FaceId, QuadMesh};
use rayon::prelude::*;

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::{NormalRule, SubdivideParams};

/// New points of one subdivision pass, indexed in parallel with the source
/// mesh's faces, edges and vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubdivisionPoints {
    /// One point per face: the centroid of its corners.
    pub face_points: Vec<Point3>,
    /// Normal carried by each face point.
    pub face_normals: Vec<Vec3>,
    /// One point per edge.
    pub edge_points: Vec<Point3>,
    /// Normal carried by each edge point.
    pub edge_normals: Vec<Vec3>,
    /// One point per original vertex, moved (regular) or kept (extraordinary).
    pub vertex_points: Vec<Point3>,
    /// Normal carried by each vertex point: the original vertex normal.
    pub vertex_normals: Vec<Vec3>,
}

impl SubdivisionPoints {
    /// Compute every new point of `mesh`.
    ///
    /// Face points are complete before edge points are computed, and both
    /// before vertex points.
    pub fn compute(mesh: &QuadMesh, params: &SubdivideParams) -> SubdivideResult<Self> {
        let rule = params.normal_rule;

        let (face_points, face_normals) = map_indexed(mesh.num_faces(), params.parallel, |i| {
            face_point(mesh, FaceId::new(i), rule)
        })?;

        let (edge_points, edge_normals) = map_indexed(mesh.num_edges(), params.parallel, |i| {
            edge_point(mesh, EdgeId::new(i), &face_points, &face_normals, rule)
        })?;

        let (vertex_points, vertex_normals) =
            map_indexed(mesh.num_vertices(), params.parallel, |i| {
                Ok(vertex_point(mesh, i, &face_points))
            })?;

        Ok(Self {
            face_points,
            face_normals,
            edge_points,
            edge_normals,
            vertex_points,
            vertex_normals,
        })
    }
}

/// Evaluate `f` for `0..len`, keeping index order, and split the pairs.
fn map_indexed<F>(len: usize, parallel: bool, f: F) -> SubdivideResult<(Vec<Point3>, Vec<Vec3>)>
where
    F: Fn(usize) -> SubdivideResult<(Point3, Vec3)> + Sync + Send,
{
    let pairs: Vec<(Point3, Vec3)> = if parallel {
        (0..len).into_par_iter().map(f).collect::<SubdivideResult<_>>()?
    } else {
        (0..len).map(f).collect::<SubdivideResult<_>>()?
    };
    Ok(pairs.into_iter().unzip())
}

fn face_point(mesh: &QuadMesh, id: FaceId, rule: NormalRule) -> SubdivideResult<(Point3, Vec3)> {
    let face = &mesh.faces()[id.index()];
    let corners = mesh.face_positions(face);
    let point = Point3::from(corners.iter().map(|p| p.coords).sum::<Vec3>() / 4.0);

    let sum: Vec3 = face.normals().iter().sum();
    let normal = match rule {
        NormalRule::Literal => sum / 4.0,
        NormalRule::Renormalized => {
            unit(&sum).ok_or(SubdivideError::DegenerateFaceNormal(id))?
        }
    };
    Ok((point, normal))
}

fn edge_point(
    mesh: &QuadMesh,
    id: EdgeId,
    face_points: &[Point3],
    face_normals: &[Vec3],
    rule: NormalRule,
) -> SubdivideResult<(Point3, Vec3)> {
    let edge = &mesh.edges()[id.index()];
    let n = edge.face_count();
    if n == 0 {
        return Err(SubdivideError::IsolatedEdge(id));
    }
    let [a, b] = edge.vertices();
    let (va, vb) = (&mesh.vertices()[a.index()], &mesh.vertices()[b.index()]);

    let mut sum = va.position().coords + vb.position().coords;
    for f in edge.faces() {
        sum += face_points[f.index()].coords;
    }
    let point = Point3::from(sum / (2 + n) as f64);

    let endpoint_normals = va.normal() + vb.normal();
    let normal = match rule {
        NormalRule::Literal => endpoint_normals / (2 + n) as f64,
        NormalRule::Renormalized => {
            let total = edge
                .faces()
                .fold(endpoint_normals, |acc, f| acc + face_normals[f.index()]);
            unit(&total).ok_or(SubdivideError::DegenerateEdgeNormal(id))?
        }
    };
    Ok((point, normal))
}

fn vertex_point(mesh: &QuadMesh, index: usize, face_points: &[Point3]) -> (Point3, Vec3) {
    let vertex = &mesh.vertices()[index];
    let position = *vertex.position();
    let normal = *vertex.normal();

    let n = vertex.valence();
    if vertex.is_extraordinary() || n == 0 {
        return (position, normal);
    }

    let Some(f) = centroid(vertex.faces().iter().map(|f| face_points[f.index()])) else {
        return (position, normal);
    };
    let Some(r) = centroid(vertex.edges().iter().map(|&e| {
        let [a, b] = mesh.edges()[e.index()].vertices();
        Point3::from((mesh.position(a).coords + mesh.position(b).coords) / 2.0)
    })) else {
        return (position, normal);
    };

    let n = n as f64;
    let moved = (f.coords + r.coords * 2.0 + position.coords * (n - 3.0)) / n;
    (Point3::from(moved), normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quadmesh_topo::primitives::{grid, unit_cube, unit_quad};
    use quadmesh_topo::{QuadMeshBuilder, VertexRef};

    fn sequential() -> SubdivideParams {
        SubdivideParams::default().with_parallel(false)
    }

    /// 2x2 grid whose centre vertex is lifted to z = 1.
    fn tent() -> QuadMesh {
        let mut b = QuadMeshBuilder::new();
        let z = |x: usize, y: usize| if x == 1 && y == 1 { 1.0 } else { 0.0 };
        let p = |x: usize, y: usize| VertexRef::from(Point3::new(x as f64, y as f64, z(x, y)));
        for j in 0..2 {
            for i in 0..2 {
                b.add_face([p(i, j), p(i + 1, j), p(i + 1, j + 1), p(i, j + 1)], None)
                    .unwrap();
            }
        }
        b.build()
    }

    #[test]
    fn test_face_point_is_centroid() {
        let mesh = unit_quad().unwrap();
        let points = SubdivisionPoints::compute(&mesh, &sequential()).unwrap();
        assert_eq!(points.face_points.len(), 1);
        assert_relative_eq!(points.face_points[0], Point3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(points.face_normals[0], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_boundary_edge_point() {
        let mesh = unit_quad().unwrap();
        let points = SubdivisionPoints::compute(&mesh, &sequential()).unwrap();
        let v0 = mesh.find_vertex(&Point3::new(0.0, 0.0, 0.0)).unwrap();
        let v1 = mesh.find_vertex(&Point3::new(1.0, 0.0, 0.0)).unwrap();
        let e = mesh.find_edge(v0, v1).unwrap();
        // (v0 + v1 + face point) / 3
        assert_relative_eq!(points.edge_points[e.index()], Point3::new(0.5, 1.0 / 6.0, 0.0));
        // endpoint normals only, divided by 2 + 1
        assert_relative_eq!(points.edge_normals[e.index()], Vec3::new(0.0, 0.0, 2.0 / 3.0));
    }

    #[test]
    fn test_interior_edge_point() {
        let mesh = grid(2).unwrap();
        let points = SubdivisionPoints::compute(&mesh, &sequential()).unwrap();
        let a = mesh.find_vertex(&Point3::new(1.0, 0.0, 0.0)).unwrap();
        let b = mesh.find_vertex(&Point3::new(1.0, 1.0, 0.0)).unwrap();
        let e = mesh.find_edge(a, b).unwrap();
        // ((1,0) + (1,1) + (0.5,0.5) + (1.5,0.5)) / 4
        assert_relative_eq!(points.edge_points[e.index()], Point3::new(1.0, 0.5, 0.0));
        assert_relative_eq!(points.edge_normals[e.index()], Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_regular_vertex_point() {
        let mesh = tent();
        let points = SubdivisionPoints::compute(&mesh, &sequential()).unwrap();
        let center = mesh.find_vertex(&Point3::new(1.0, 1.0, 1.0)).unwrap();
        let vertex = mesh.vertex(center).unwrap();
        assert!(!vertex.is_extraordinary());
        assert_eq!(vertex.valence(), 4);

        // F = (1, 1, 0.25), R = (1, 1, 0.5), P = (1, 1, 1), n = 4
        let f = Vec3::new(1.0, 1.0, 0.25);
        let r = Vec3::new(1.0, 1.0, 0.5);
        let p = Vec3::new(1.0, 1.0, 1.0);
        let expected = (f + r * 2.0 + p * (4.0 - 3.0)) / 4.0;
        assert_relative_eq!(points.vertex_points[center.index()].coords, expected);
        assert_relative_eq!(points.vertex_points[center.index()], Point3::new(1.0, 1.0, 0.5625));
        assert_eq!(points.vertex_normals[center.index()], *vertex.normal());
    }

    #[test]
    fn test_extraordinary_vertex_keeps_position() {
        let mesh = grid(2).unwrap();
        let points = SubdivisionPoints::compute(&mesh, &sequential()).unwrap();
        for (id, vertex) in mesh.vertex_ids() {
            if vertex.is_extraordinary() {
                assert_eq!(points.vertex_points[id.index()], *vertex.position());
                assert_eq!(points.vertex_normals[id.index()], *vertex.normal());
            }
        }
    }

    #[test]
    fn test_cube_corner_is_regular() {
        let mesh = unit_cube().unwrap();
        let points = SubdivisionPoints::compute(&mesh, &sequential()).unwrap();
        let corner = mesh.find_vertex(&Point3::origin()).unwrap();
        assert!(!mesh.vertex(corner).unwrap().is_extraordinary());
        // F = (1/3, 1/3, 1/3), R = (1/6, 1/6, 1/6), n = 3
        let c = 2.0 / 9.0;
        assert_relative_eq!(points.vertex_points[corner.index()], Point3::new(c, c, c));
    }

    #[test]
    fn test_renormalized_rule() {
        let mesh = unit_quad().unwrap();
        let params = sequential().with_normal_rule(NormalRule::Renormalized);
        let points = SubdivisionPoints::compute(&mesh, &params).unwrap();
        for n in points.face_normals.iter().chain(&points.edge_normals) {
            assert_relative_eq!(*n, Vec3::new(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh = tent();
        let seq = SubdivisionPoints::compute(&mesh, &sequential()).unwrap();
        let par = SubdivisionPoints::compute(&mesh, &sequential().with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_isolated_edge_is_rejected() {
        let mut b = QuadMeshBuilder::new();
        let a = b.vertex_id(Point3::new(0.0, 0.0, 0.0)).unwrap();
        let c = b.vertex_id(Point3::new(1.0, 0.0, 0.0)).unwrap();
        let e = b.edge_id(a, c).unwrap();
        let mesh = b.build();
        assert_eq!(
            SubdivisionPoints::compute(&mesh, &sequential()),
            Err(SubdivideError::IsolatedEdge(e))
        );
    }
}

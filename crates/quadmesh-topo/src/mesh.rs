//! The indexed quad mesh.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use quadmesh_math::{centroid, Point3, PositionKey, Transform, MIN_NORM};
use serde::{Deserialize, Serialize};

use crate::buffers::QuadBuffers;
use crate::builder::{QuadMeshBuilder, VertexRef};
use crate::entity::{edge_key, Edge, Face, Vertex};
use crate::error::{Result, TopologyError};
use crate::ids::{EdgeId, FaceId, VertexId};

/// A quad mesh with deduplicated vertices and edges.
///
/// Meshes are assembled with [`QuadMeshBuilder`] and are read-only once
/// built, which keeps the buffers cached by [`QuadMesh::buffers`] valid for
/// the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct QuadMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) faces: Vec<Face>,
    pub(crate) vertex_index: BTreeMap<PositionKey, VertexId>,
    pub(crate) edge_index: BTreeMap<(VertexId, VertexId), EdgeId>,
    pub(crate) buffers: OnceLock<QuadBuffers>,
}

/// Element counts and irregularities of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeshStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges.
    pub edges: usize,
    /// Number of faces.
    pub faces: usize,
    /// Edges with a single incident face.
    pub boundary_edges: usize,
    /// Vertices whose edge and face counts differ.
    pub extraordinary_vertices: usize,
}

impl MeshStats {
    /// `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }

    /// True when every edge is shared by two faces.
    pub fn is_closed(&self) -> bool {
        self.boundary_edges == 0
    }
}

impl QuadMesh {
    /// An empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start assembling a new mesh.
    pub fn builder() -> QuadMeshBuilder {
        QuadMeshBuilder::new()
    }

    /// Vertices in creation order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Faces in creation order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Look up a vertex by id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Look up a face by id.
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Id of the vertex at exactly `position`, if any.
    pub fn find_vertex(&self, position: &Point3) -> Option<VertexId> {
        self.vertex_index.get(&PositionKey::new(position)).copied()
    }

    /// Id of the edge joining `a` and `b` in either order, if any.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_index.get(&edge_key(a, b)).copied()
    }

    /// Iterate over `(id, vertex)` pairs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().enumerate().map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over `(id, face)` pairs.
    pub fn face_ids(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter().enumerate().map(|(i, f)| (FaceId::new(i), f))
    }

    /// Position of a vertex. Panics on an id from another mesh.
    pub fn position(&self, id: VertexId) -> &Point3 {
        &self.vertices[id.index()].position
    }

    /// Corner positions of a face in winding order.
    pub fn face_positions(&self, face: &Face) -> [Point3; 4] {
        face.vertices.map(|v| self.vertices[v.index()].position)
    }

    /// Element counts and irregularities.
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.vertices.len(),
            edges: self.edges.len(),
            faces: self.faces.len(),
            boundary_edges: self.edges.iter().filter(|e| e.is_boundary()).count(),
            extraordinary_vertices: self
                .vertices
                .iter()
                .filter(|v| v.is_extraordinary())
                .count(),
        }
    }

    /// Axis-aligned bounding box `(min, max)` over all vertices.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (lo.inf(&v.position), hi.sup(&v.position))
        }))
    }

    /// A copy of this mesh centred on the origin and scaled uniformly so its
    /// largest extent is 1.
    ///
    /// Vertex, edge and face ids and the per-corner normals carry over.
    pub fn unitized(&self) -> Result<QuadMesh> {
        let (lo, hi) = self.bounds().ok_or(TopologyError::DegenerateBounds)?;
        let extent = (hi - lo).max();
        if !extent.is_finite() || extent < MIN_NORM {
            return Err(TopologyError::DegenerateBounds);
        }
        let Some(center) = centroid([lo, hi]) else {
            return Err(TopologyError::DegenerateBounds);
        };
        let transform = Transform::uniform_scale(1.0 / extent)
            .then(&Transform::translation(-center.x, -center.y, -center.z));
        self.transformed(&transform)
    }

    /// Rebuild this mesh with every position mapped through `transform`.
    ///
    /// Corner normals are copied unchanged, so the transform must not
    /// reflect the mesh.
    fn transformed(&self, transform: &Transform) -> Result<QuadMesh> {
        debug_assert!(!transform.is_reflection());
        let mut builder = QuadMeshBuilder::with_capacity(
            self.vertices.len(),
            self.edges.len(),
            self.faces.len(),
        );
        for (id, vertex) in self.vertex_ids() {
            let mapped = builder.vertex_id(transform.apply_point(&vertex.position))?;
            if mapped != id {
                return Err(TopologyError::CollapsedVertex(id));
            }
        }
        for face in &self.faces {
            builder.add_face(face.vertices.map(VertexRef::Id), Some(face.normals))?;
        }
        Ok(builder.build())
    }

    /// Check every adjacency invariant of the mesh.
    pub fn validate(&self) -> Result<()> {
        let invariant = |msg: String| Err(TopologyError::Invariant(msg));

        for (fi, face) in self.faces.iter().enumerate() {
            let f = FaceId::new(fi);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    if face.vertices[i] == face.vertices[j] {
                        return invariant(format!("{f} repeats vertex {}", face.vertices[i]));
                    }
                }
                let (a, b) = (face.vertices[i], face.vertices[(i + 1) % 4]);
                let Some(edge) = self.edges.get(face.edges[i].index()) else {
                    return invariant(format!("{f} references missing {}", face.edges[i]));
                };
                if edge.key() != edge_key(a, b) {
                    return invariant(format!("{f} edge {i} does not join {a} and {b}"));
                }
                if !edge.faces().any(|ef| ef == f) {
                    return invariant(format!("{} does not list {f}", face.edges[i]));
                }
                if !self.vertices[a.index()].faces.contains(&f) {
                    return invariant(format!("{a} does not list {f}"));
                }
            }
        }

        for (ei, edge) in self.edges.iter().enumerate() {
            let e = EdgeId::new(ei);
            let [a, b] = edge.vertices;
            if a == b {
                return invariant(format!("{e} joins {a} to itself"));
            }
            for v in [a, b] {
                match self.vertices.get(v.index()) {
                    Some(vertex) if vertex.edges.contains(&e) => {}
                    _ => return invariant(format!("{v} does not list {e}")),
                }
            }
            if self.edge_index.get(&edge.key()) != Some(&e) {
                return invariant(format!("{e} is not indexed by its vertex pair"));
            }
        }

        for (vi, vertex) in self.vertices.iter().enumerate() {
            let v = VertexId::new(vi);
            if self.vertex_index.get(&PositionKey::new(&vertex.position)) != Some(&v) {
                return invariant(format!("{v} is not indexed by its position"));
            }
            for &f in &vertex.faces {
                match self.faces.get(f.index()) {
                    Some(face) if face.vertices.contains(&v) => {}
                    _ => return invariant(format!("{v} lists {f} which does not use it")),
                }
            }
        }

        if self.vertex_index.len() != self.vertices.len() {
            return invariant("vertex index size differs from vertex count".into());
        }
        if self.edge_index.len() != self.edges.len() {
            return invariant("edge index size differs from edge count".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{grid, unit_cube, unit_quad};
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_stats() {
        let mesh = unit_cube().unwrap();
        let stats = mesh.stats();
        assert_eq!(stats.vertices, 8);
        assert_eq!(stats.edges, 12);
        assert_eq!(stats.faces, 6);
        assert!(stats.is_closed());
        assert_eq!(stats.extraordinary_vertices, 0);
        assert_eq!(stats.euler_characteristic(), 2);
        mesh.validate().unwrap();
    }

    #[test]
    fn test_grid_stats() {
        let mesh = grid(3).unwrap();
        let stats = mesh.stats();
        assert_eq!(stats.vertices, 16);
        assert_eq!(stats.faces, 9);
        assert_eq!(stats.edges, 24);
        assert_eq!(stats.boundary_edges, 12);
        // the 4 interior vertices are regular
        assert_eq!(stats.extraordinary_vertices, 12);
        mesh.validate().unwrap();
    }

    #[test]
    fn test_find_vertex_and_edge() {
        let mesh = unit_quad().unwrap();
        let a = mesh.find_vertex(&Point3::new(0.0, 0.0, 0.0)).unwrap();
        let b = mesh.find_vertex(&Point3::new(1.0, 0.0, 0.0)).unwrap();
        let c = mesh.find_vertex(&Point3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(mesh.find_vertex(&Point3::new(0.5, 0.5, 0.0)).is_none());
        assert_eq!(mesh.find_edge(a, b), mesh.find_edge(b, a));
        assert!(mesh.find_edge(a, b).is_some());
        assert!(mesh.find_edge(a, c).is_none());
    }

    #[test]
    fn test_bounds() {
        let (lo, hi) = unit_cube().unwrap().bounds().unwrap();
        assert_relative_eq!(lo, Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(hi, Point3::new(1.0, 1.0, 1.0));
        assert!(QuadMesh::new().bounds().is_none());
    }

    #[test]
    fn test_unitized_fits_unit_box() {
        let mut b = QuadMesh::builder();
        b.add_face(
            [
                Point3::new(2.0, 2.0, 0.0).into(),
                Point3::new(6.0, 2.0, 0.0).into(),
                Point3::new(6.0, 4.0, 0.0).into(),
                Point3::new(2.0, 4.0, 0.0).into(),
            ],
            None,
        )
        .unwrap();
        let mesh = b.build();
        let unit = mesh.unitized().unwrap();
        let (lo, hi) = unit.bounds().unwrap();
        assert_relative_eq!(lo, Point3::new(-0.5, -0.25, 0.0));
        assert_relative_eq!(hi, Point3::new(0.5, 0.25, 0.0));
        assert_eq!(unit.stats(), mesh.stats());
        assert_eq!(unit.faces()[0].normals(), mesh.faces()[0].normals());
        unit.validate().unwrap();
    }

    #[test]
    fn test_unitized_rejects_empty_mesh() {
        assert_eq!(
            QuadMesh::new().unitized().unwrap_err(),
            TopologyError::DegenerateBounds
        );
    }
}

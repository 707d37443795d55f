//! Incremental mesh assembly: the topology index and face assembly.

use quadmesh_math::{unit, Point3, PositionKey, Vec3};
use tracing::debug;

use crate::entity::{edge_key, Edge, Face, Vertex};
use crate::error::{Result, TopologyError};
use crate::ids::{EdgeId, FaceId, VertexId};
use crate::mesh::QuadMesh;

/// A face corner: either a position to look up (or create), or an existing vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexRef {
    /// Resolve through the position index, creating the vertex if needed.
    Position(Point3),
    /// Use a vertex that already exists in the mesh.
    Id(VertexId),
}

impl From<Point3> for VertexRef {
    fn from(p: Point3) -> Self {
        Self::Position(p)
    }
}

impl From<VertexId> for VertexRef {
    fn from(id: VertexId) -> Self {
        Self::Id(id)
    }
}

/// Corner before anything is written to the mesh.
#[derive(Debug, Clone, Copy)]
enum Corner {
    Existing(VertexId, Point3),
    Pending(Point3),
}

impl Corner {
    fn position(&self) -> Point3 {
        match *self {
            Corner::Existing(_, p) | Corner::Pending(p) => p,
        }
    }

    fn existing(&self) -> Option<VertexId> {
        match *self {
            Corner::Existing(id, _) => Some(id),
            Corner::Pending(_) => None,
        }
    }
}

/// Assembles a [`QuadMesh`] face by face.
///
/// Every lookup is exact: positions are matched component-wise with no
/// tolerance, and edges by their unordered vertex pair.
#[derive(Debug, Default)]
pub struct QuadMeshBuilder {
    mesh: QuadMesh,
}

impl QuadMeshBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty builder with room for the given element counts.
    pub fn with_capacity(vertices: usize, edges: usize, faces: usize) -> Self {
        let mut mesh = QuadMesh::new();
        mesh.vertices.reserve(vertices);
        mesh.edges.reserve(edges);
        mesh.faces.reserve(faces);
        Self { mesh }
    }

    /// Vertices created so far.
    pub fn num_vertices(&self) -> usize {
        self.mesh.vertices.len()
    }

    /// Edges created so far.
    pub fn num_edges(&self) -> usize {
        self.mesh.edges.len()
    }

    /// Faces added so far.
    pub fn num_faces(&self) -> usize {
        self.mesh.faces.len()
    }

    /// Look up a vertex created so far.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.mesh.vertex(id)
    }

    /// Look up an edge created so far.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.mesh.edge(id)
    }

    /// Id of the vertex at `position`, creating it if no vertex sits there.
    pub fn vertex_id(&mut self, position: Point3) -> Result<VertexId> {
        if !position.iter().all(|c| c.is_finite()) {
            return Err(TopologyError::NonFinitePosition(position));
        }
        let key = PositionKey::new(&position);
        if let Some(&id) = self.mesh.vertex_index.get(&key) {
            return Ok(id);
        }
        let id = VertexId::new(self.mesh.vertices.len());
        self.mesh.vertices.push(Vertex::new(position));
        self.mesh.vertex_index.insert(key, id);
        Ok(id)
    }

    /// Id of the edge joining `a` and `b` in either order, creating it if needed.
    ///
    /// A new edge is appended to the incident-edge lists of both endpoints.
    pub fn edge_id(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b {
            return Err(TopologyError::DegenerateEdge(a));
        }
        let key = edge_key(a, b);
        if let Some(&id) = self.mesh.edge_index.get(&key) {
            return Ok(id);
        }
        let id = EdgeId::new(self.mesh.edges.len());
        self.mesh.edges.push(Edge::new(a, b));
        self.mesh.edge_index.insert(key, id);
        self.mesh.vertices[a.index()].edges.push(id);
        self.mesh.vertices[b.index()].edges.push(id);
        Ok(id)
    }

    /// Append a quad.
    ///
    /// Corners are given in counter-clockwise winding. With `normals`, each
    /// corner takes its given normal; without, all four corners share the
    /// flat normal `normalize((v0 - v1) x (v1 - v2))`. Each corner vertex's
    /// normal is updated as a running mean over its incident faces and
    /// renormalized.
    ///
    /// All checks run before the mesh is touched, so on error the builder is
    /// left exactly as it was.
    pub fn add_face(
        &mut self,
        corners: [VertexRef; 4],
        normals: Option<[Vec3; 4]>,
    ) -> Result<FaceId> {
        let resolved = self.resolve_corners(corners)?;
        let positions = resolved.map(|c| c.position());

        let corner_normals = match normals {
            Some(n) => n,
            None => {
                let a = positions[0] - positions[1];
                let b = positions[1] - positions[2];
                let n = unit(&a.cross(&b))
                    .ok_or(TopologyError::DegenerateFaceNormal(positions[0]))?;
                [n; 4]
            }
        };

        self.check_edge_capacity(&resolved)?;

        let mut vertex_normals = [Vec3::zeros(); 4];
        for (i, corner) in resolved.iter().enumerate() {
            let (old, count) = match corner.existing() {
                Some(id) => {
                    let v = &self.mesh.vertices[id.index()];
                    (v.normal, v.faces.len())
                }
                None => (Vec3::zeros(), 0),
            };
            let k = (count + 1) as f64;
            let mean = (old * (k - 1.0) + corner_normals[i]) / k;
            vertex_normals[i] =
                unit(&mean).ok_or(TopologyError::DegenerateVertexNormal(positions[i]))?;
        }

        // Nothing below can fail: every id exists and every edge has room.
        let face_id = FaceId::new(self.mesh.faces.len());
        let mut vertices = [VertexId::new(0); 4];
        for (i, corner) in resolved.iter().enumerate() {
            vertices[i] = match *corner {
                Corner::Existing(id, _) => id,
                Corner::Pending(p) => self.vertex_id(p)?,
            };
        }
        let mut edges = [EdgeId::new(0); 4];
        for i in 0..4 {
            let e = self.edge_id(vertices[i], vertices[(i + 1) % 4])?;
            if !self.mesh.edges[e.index()].attach(face_id) {
                return Err(self.non_manifold(e));
            }
            edges[i] = e;
        }
        for (i, &v) in vertices.iter().enumerate() {
            let vertex = &mut self.mesh.vertices[v.index()];
            vertex.faces.push(face_id);
            vertex.normal = vertex_normals[i];
        }

        self.mesh.faces.push(Face {
            vertices,
            edges,
            normals: corner_normals,
        });
        Ok(face_id)
    }

    /// Finish assembly.
    pub fn build(self) -> QuadMesh {
        debug!(
            "Built quad mesh: {} vertices, {} edges, {} faces",
            self.mesh.vertices.len(),
            self.mesh.edges.len(),
            self.mesh.faces.len()
        );
        self.mesh
    }

    fn check_vertex(&self, id: VertexId) -> Result<()> {
        if id.index() < self.mesh.vertices.len() {
            Ok(())
        } else {
            Err(TopologyError::UnknownVertex(id))
        }
    }

    fn resolve_corners(&self, corners: [VertexRef; 4]) -> Result<[Corner; 4]> {
        let mut resolved = [Corner::Pending(Point3::origin()); 4];
        for (slot, corner) in resolved.iter_mut().zip(corners) {
            *slot = match corner {
                VertexRef::Id(id) => {
                    self.check_vertex(id)?;
                    Corner::Existing(id, self.mesh.vertices[id.index()].position)
                }
                VertexRef::Position(p) => {
                    if !p.iter().all(|c| c.is_finite()) {
                        return Err(TopologyError::NonFinitePosition(p));
                    }
                    match self.mesh.find_vertex(&p) {
                        Some(id) => Corner::Existing(id, p),
                        None => Corner::Pending(p),
                    }
                }
            };
        }

        // Positions are unique per vertex, so equal keys mean the same vertex.
        let keys = resolved.map(|c| PositionKey::new(&c.position()));
        for first in 0..4 {
            for second in (first + 1)..4 {
                if keys[first] == keys[second] {
                    return Err(TopologyError::DuplicateVertex { first, second });
                }
            }
        }
        Ok(resolved)
    }

    fn check_edge_capacity(&self, corners: &[Corner; 4]) -> Result<()> {
        for i in 0..4 {
            let (Some(a), Some(b)) = (corners[i].existing(), corners[(i + 1) % 4].existing())
            else {
                continue;
            };
            if let Some(e) = self.mesh.find_edge(a, b) {
                if self.mesh.edges[e.index()].face_count() >= 2 {
                    return Err(self.non_manifold(e));
                }
            }
        }
        Ok(())
    }

    fn non_manifold(&self, edge: EdgeId) -> TopologyError {
        TopologyError::NonManifoldEdge {
            edge,
            vertices: self.mesh.edges[edge.index()].vertices,
        }
    }
}

//! Vertex, edge and face records.
//!
//! Records reference each other only through typed ids into the owning
//! mesh's sequences, never by pointer.

use quadmesh_math::{Point3, Vec3};

use crate::ids::{EdgeId, FaceId, VertexId};

/// A mesh vertex: a unique position plus its adjacency.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub(crate) position: Point3,
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) faces: Vec<FaceId>,
    pub(crate) normal: Vec3,
}

impl Vertex {
    pub(crate) fn new(position: Point3) -> Self {
        Self {
            position,
            edges: Vec::new(),
            faces: Vec::new(),
            normal: Vec3::zeros(),
        }
    }

    /// Position of the vertex.
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    /// Incident edges, in the order they were created.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Incident faces, in the order they were added.
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Unit-length mean of the normals of every incident face.
    ///
    /// Zero for a vertex no face has touched yet.
    pub fn normal(&self) -> &Vec3 {
        &self.normal
    }

    /// Number of incident edges.
    pub fn valence(&self) -> usize {
        self.edges.len()
    }

    /// True when the incident edge and face counts differ, e.g. on a boundary.
    pub fn is_extraordinary(&self) -> bool {
        self.edges.len() != self.faces.len()
    }
}

/// An edge: an unordered vertex pair shared by at most two faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub(crate) vertices: [VertexId; 2],
    pub(crate) faces: [Option<FaceId>; 2],
}

impl Edge {
    pub(crate) fn new(a: VertexId, b: VertexId) -> Self {
        Self {
            vertices: [a, b],
            faces: [None, None],
        }
    }

    /// Endpoints, in the order of the face that created the edge.
    pub fn vertices(&self) -> [VertexId; 2] {
        self.vertices
    }

    /// Incident faces (at most two).
    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.iter().flatten().copied()
    }

    /// Number of incident faces: 0, 1 or 2.
    pub fn face_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    /// An edge with exactly one incident face.
    pub fn is_boundary(&self) -> bool {
        self.face_count() == 1
    }

    /// Whether `v` is one of the endpoints.
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// The endpoint opposite `v`, if `v` is an endpoint.
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        match self.vertices {
            [a, b] if a == v => Some(b),
            [a, b] if b == v => Some(a),
            _ => None,
        }
    }

    /// Canonical (sorted) key of the vertex pair.
    pub fn key(&self) -> (VertexId, VertexId) {
        edge_key(self.vertices[0], self.vertices[1])
    }

    /// Record `face` as incident; returns false if both slots are taken.
    pub(crate) fn attach(&mut self, face: FaceId) -> bool {
        match self.faces.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(face);
                true
            }
            None => false,
        }
    }
}

/// Canonicalize an unordered vertex pair so smaller id comes first.
pub fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A quad face.
///
/// Edge `i` joins vertex `i` and vertex `(i + 1) % 4`; `normals[i]` is the
/// shading normal at corner `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub(crate) vertices: [VertexId; 4],
    pub(crate) edges: [EdgeId; 4],
    pub(crate) normals: [Vec3; 4],
}

impl Face {
    /// Corner vertices in winding order.
    pub fn vertices(&self) -> &[VertexId; 4] {
        &self.vertices
    }

    /// Edges in winding order.
    pub fn edges(&self) -> &[EdgeId; 4] {
        &self.edges
    }

    /// Per-corner normals.
    pub fn normals(&self) -> &[Vec3; 4] {
        &self.normals
    }
}

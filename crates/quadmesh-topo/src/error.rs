//! Error types for mesh topology operations.

use quadmesh_math::Point3;
use thiserror::Error;

use crate::ids::{EdgeId, VertexId};

/// Errors raised while building or checking a quad mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// Attaching another face would give an edge more than two incident faces.
    #[error("edge {edge} ({} - {}) already has two incident faces", .vertices[0], .vertices[1])]
    NonManifoldEdge {
        /// The saturated edge.
        edge: EdgeId,
        /// Its two endpoints.
        vertices: [VertexId; 2],
    },

    /// A face references the same vertex more than once.
    #[error("face corners {first} and {second} resolve to the same vertex")]
    DuplicateVertex {
        /// Index of the first corner (0..4).
        first: usize,
        /// Index of the repeated corner (0..4).
        second: usize,
    },

    /// An edge was requested between a vertex and itself.
    #[error("edge endpoints must differ, got {0} twice")]
    DegenerateEdge(VertexId),

    /// A vertex id does not refer to a vertex of this mesh.
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),

    /// A position with NaN or infinite components.
    #[error("position {0} is not finite")]
    NonFinitePosition(Point3),

    /// The flat normal of a face has zero length (collinear corners).
    #[error("face with first corner at {0} has a zero-length normal")]
    DegenerateFaceNormal(Point3),

    /// The running-mean normal of a vertex cancelled out to zero length.
    #[error("normal of vertex at {0} averages to zero length")]
    DegenerateVertexNormal(Point3),

    /// The mesh has no extent to rescale.
    #[error("mesh bounding box is empty or has zero extent")]
    DegenerateBounds,

    /// A transform mapped two distinct vertices onto one position.
    #[error("transform collapsed vertex {0} onto an existing vertex")]
    CollapsedVertex(VertexId),

    /// An internal invariant does not hold.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;
